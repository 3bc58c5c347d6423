//! Distance-gated stabilizer.
//!
//! Small moves between frames are most likely detection jitter, large moves
//! are most likely real. Each landmark is blended between its previous
//! stabilized position and the new sample with a weight driven by how far
//! it moved, measured in pixels.

use glam::Vec2;
use log::{debug, trace};

use crate::{
    landmarks_from_rows, DistanceGatedConfig, Landmark, Stabilizer, StabilizerError, Viewport,
};

#[derive(Debug, Clone, Copy, Default)]
struct PointState {
    raw_px: Vec2,
    stabilized_px: Vec2,
    /// False until a finite sample has written pixel history.
    seeded: bool,
}

#[derive(Debug, Clone, Default)]
struct DistanceBank {
    points: Vec<PointState>,
    viewport: Viewport,
    /// Frames seen since the last reset.
    counter: u32,
}

impl DistanceBank {
    fn new(count: usize, viewport: Viewport) -> Self {
        Self {
            points: vec![PointState::default(); count],
            viewport,
            counter: 0,
        }
    }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub struct DistanceGatedStabilizer {
    config: DistanceGatedConfig,
    bank: DistanceBank,
    output: Vec<Landmark>,
}

impl DistanceGatedStabilizer {
    pub fn new(config: DistanceGatedConfig) -> Result<Self, StabilizerError> {
        config.validate()?;
        Ok(Self {
            config,
            bank: DistanceBank::default(),
            output: Vec::new(),
        })
    }

    pub fn config(&self) -> &DistanceGatedConfig {
        &self.config
    }

    /// Replaces the bank; all pixel history is discarded.
    fn reallocate(&mut self, count: usize, viewport: Viewport) {
        debug!(
            "Reallocating distance bank: {} landmarks at {}x{} -> {} landmarks at {}x{}",
            self.bank.points.len(),
            self.bank.viewport.width,
            self.bank.viewport.height,
            count,
            viewport.width,
            viewport.height
        );
        self.bank = DistanceBank::new(count, viewport);
        self.output = vec![Vec2::ZERO; count];
    }

    /// Copies `landmarks` to the output. Non-finite points keep their
    /// previous output.
    fn pass_through(&mut self, landmarks: &[Landmark]) -> &[Landmark] {
        for (out, lm) in self.output.iter_mut().zip(landmarks) {
            if lm.is_finite() {
                *out = *lm;
            }
        }
        &self.output
    }

    pub fn update(&mut self, landmarks: &[Landmark], viewport: Viewport) -> &[Landmark] {
        if landmarks.is_empty() {
            return &[];
        }
        if viewport.is_degenerate() {
            trace!(
                "Degenerate viewport {}x{}, passing through",
                viewport.width,
                viewport.height
            );
            if landmarks.len() != self.bank.points.len() {
                self.reallocate(landmarks.len(), self.bank.viewport);
            }
            return self.pass_through(landmarks);
        }
        if landmarks.len() != self.bank.points.len() || viewport != self.bank.viewport {
            self.reallocate(landmarks.len(), viewport);
        }

        let half = viewport.half_size();
        for (point, lm) in self.bank.points.iter_mut().zip(landmarks) {
            point.raw_px = *lm * half;
        }

        self.bank.counter = self.bank.counter.saturating_add(1);
        if self.bank.counter < self.config.n {
            for point in &mut self.bank.points {
                if point.raw_px.is_finite() {
                    point.stabilized_px = point.raw_px;
                    point.seeded = true;
                }
            }
            return self.pass_through(landmarks);
        }

        for ((point, out), lm) in self
            .bank
            .points
            .iter_mut()
            .zip(self.output.iter_mut())
            .zip(landmarks)
        {
            if !point.raw_px.is_finite() {
                continue;
            }
            if !point.seeded {
                point.stabilized_px = point.raw_px;
                point.seeded = true;
                *out = *lm;
                continue;
            }

            let d = point.raw_px.distance(point.stabilized_px);
            let w = smoothstep(self.config.jitter_threshold, self.config.move_threshold, d);
            point.stabilized_px = point.stabilized_px.lerp(point.raw_px, w);
            *out = point.stabilized_px / half;
        }

        &self.output
    }

    /// Shape-checks `[x, y]` rows, then stabilizes them.
    pub fn update_rows(
        &mut self,
        rows: &[Vec<f32>],
        viewport: Viewport,
    ) -> Result<&[Landmark], StabilizerError> {
        let landmarks = landmarks_from_rows(rows)?;
        Ok(self.update(&landmarks, viewport))
    }

    /// Restarts the warm-up window. Pixel history is kept and gets reseeded
    /// by the warm-up frames.
    pub fn reset(&mut self) {
        self.bank.counter = 0;
    }

    /// Frames seen since the last reset or reallocation.
    pub fn frame_counter(&self) -> u32 {
        self.bank.counter
    }
}

impl Stabilizer for DistanceGatedStabilizer {
    fn update(&mut self, landmarks: &[Landmark], viewport: Viewport) -> &[Landmark] {
        DistanceGatedStabilizer::update(self, landmarks, viewport)
    }

    fn reset(&mut self) {
        DistanceGatedStabilizer::reset(self)
    }

    fn landmark_count(&self) -> usize {
        self.output.len()
    }

    fn name(&self) -> &str {
        "DistanceGated"
    }
}
