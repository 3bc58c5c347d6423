use anyhow::{bail, Context, Result};
use api::{landmarks_from_rows, Landmark, Viewport};
use common::{StabilizationConfig, StabilizerKind, StabilizerSet};
use log::{debug, info};

use crate::trace::{JitterSummary, ReplayReport, StabilizedFrame, Trace};

/// Accumulates frame-to-frame landmark steps per face slot.
#[derive(Default)]
struct JitterMeter {
    previous: Vec<Option<(Vec<Landmark>, Vec<Landmark>)>>,
    samples: usize,
    raw_total: f32,
    stabilized_total: f32,
}

impl JitterMeter {
    fn record(&mut self, slot: usize, raw: &[Landmark], stabilized: &[Landmark]) {
        if slot >= self.previous.len() {
            self.previous.resize_with(slot + 1, || None);
        }
        if let Some((prev_raw, prev_stab)) = &self.previous[slot] {
            if prev_raw.len() == raw.len() {
                for (cur, prev) in raw.iter().zip(prev_raw) {
                    self.raw_total += cur.distance(*prev);
                }
                for (cur, prev) in stabilized.iter().zip(prev_stab) {
                    self.stabilized_total += cur.distance(*prev);
                }
                self.samples += raw.len();
            }
        }
        self.previous[slot] = Some((raw.to_vec(), stabilized.to_vec()));
    }

    fn lost(&mut self, slot: usize) {
        if let Some(prev) = self.previous.get_mut(slot) {
            *prev = None;
        }
    }

    fn summary(&self) -> JitterSummary {
        if self.samples == 0 {
            return JitterSummary::default();
        }
        JitterSummary {
            samples: self.samples,
            raw_mean_step: self.raw_total / self.samples as f32,
            stabilized_mean_step: self.stabilized_total / self.samples as f32,
        }
    }
}

/// Runs every frame of `trace` through one stabilizer per face slot.
pub fn replay(trace: &Trace, config: &StabilizationConfig) -> Result<ReplayReport> {
    let mut set = StabilizerSet::new(config.clone())?;
    let mut meter = JitterMeter::default();
    let mut frames = Vec::with_capacity(trace.frames.len());
    let fallback_hz = config.adaptive.freq as f64;

    for (index, frame) in trace.frames.iter().enumerate() {
        let timestamp = frame.timestamp.unwrap_or(index as f64 / fallback_hz);
        let viewport = match frame.viewport.or(trace.viewport) {
            Some(viewport) => viewport,
            None if config.kind == StabilizerKind::DistanceGated => {
                bail!("frame {index} has no viewport and the trace sets no default")
            }
            None => Viewport::default(),
        };

        let mut faces = Vec::with_capacity(frame.faces.len());
        for (slot, face) in frame.faces.iter().enumerate() {
            if !face.detected || face.landmarks.is_empty() {
                debug!("frame {index}: slot {slot} lost");
                set.mark_lost(slot);
                meter.lost(slot);
                faces.push(None);
                continue;
            }

            let raw = landmarks_from_rows(&face.landmarks)
                .with_context(|| format!("frame {index}, face {slot}"))?;
            let stabilized = set.update_at(slot, &raw, viewport, timestamp)?;
            meter.record(slot, &raw, stabilized);
            faces.push(Some(stabilized.iter().map(|p| p.to_array()).collect()));
        }

        frames.push(StabilizedFrame {
            index,
            timestamp,
            faces,
        });
    }

    let summary = meter.summary();
    info!(
        "Replayed {} frames with {:?}: mean step {:.5} raw -> {:.5} stabilized",
        frames.len(),
        config.kind,
        summary.raw_mean_step,
        summary.stabilized_mean_step
    );

    Ok(ReplayReport {
        stabilizer: format!("{:?}", config.kind),
        frames,
        summary,
    })
}
