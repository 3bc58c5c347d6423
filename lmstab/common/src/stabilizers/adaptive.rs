use glam::Vec2;
use log::{debug, trace};

use crate::{
    landmarks_from_rows, AdaptiveCutoffConfig, AdaptiveCutoffFilter, Clock, Landmark,
    MonotonicClock, Stabilizer, StabilizerError, Viewport,
};

/// Bank of One-Euro filters, one for each x and y coordinate.
pub struct AdaptiveCutoffStabilizer {
    config: AdaptiveCutoffConfig,
    clock: Box<dyn Clock>,
    filters: Vec<AdaptiveCutoffFilter>,
    output: Vec<Landmark>,
}

impl AdaptiveCutoffStabilizer {
    pub fn new(config: AdaptiveCutoffConfig) -> Result<Self, StabilizerError> {
        Self::with_clock(config, Box::new(MonotonicClock::new()))
    }

    pub fn with_clock(
        config: AdaptiveCutoffConfig,
        clock: Box<dyn Clock>,
    ) -> Result<Self, StabilizerError> {
        config.validate()?;
        Ok(Self {
            config,
            clock,
            filters: Vec::new(),
            output: Vec::new(),
        })
    }

    pub fn config(&self) -> &AdaptiveCutoffConfig {
        &self.config
    }

    /// Discards every filter and sizes the bank for `count` landmarks.
    fn reallocate(&mut self, count: usize) {
        debug!(
            "Reallocating adaptive filter bank: {} -> {} landmarks",
            self.output.len(),
            count
        );
        self.filters = vec![AdaptiveCutoffFilter::new(self.config); count * 2];
        self.output = vec![Vec2::ZERO; count];
    }

    pub fn update(&mut self, landmarks: &[Landmark]) -> &[Landmark] {
        if landmarks.is_empty() {
            return &[];
        }
        let timestamp = self.clock.now_seconds();
        self.update_at(landmarks, timestamp)
    }

    /// Filters every coordinate against the shared `timestamp` (seconds).
    pub fn update_at(&mut self, landmarks: &[Landmark], timestamp: f64) -> &[Landmark] {
        if landmarks.is_empty() {
            return &[];
        }
        if self.filters.len() != landmarks.len() * 2 || self.output.len() != landmarks.len() {
            self.reallocate(landmarks.len());
        }

        trace!("Filtering {} landmarks at t={:.4}", landmarks.len(), timestamp);
        for ((lm, out), pair) in landmarks
            .iter()
            .zip(self.output.iter_mut())
            .zip(self.filters.chunks_exact_mut(2))
        {
            out.x = pair[0].filter(lm.x, timestamp);
            out.y = pair[1].filter(lm.y, timestamp);
        }

        &self.output
    }

    /// Shape-checks `[x, y]` rows, then filters them.
    pub fn update_rows(&mut self, rows: &[Vec<f32>]) -> Result<&[Landmark], StabilizerError> {
        let landmarks = landmarks_from_rows(rows)?;
        Ok(self.update(&landmarks))
    }

    pub fn reset(&mut self) {
        debug!("Resetting {} adaptive filters", self.filters.len());
        self.filters.iter_mut().for_each(AdaptiveCutoffFilter::reset);
    }
}

impl Stabilizer for AdaptiveCutoffStabilizer {
    fn update(&mut self, landmarks: &[Landmark], _viewport: Viewport) -> &[Landmark] {
        AdaptiveCutoffStabilizer::update(self, landmarks)
    }

    fn update_at(
        &mut self,
        landmarks: &[Landmark],
        _viewport: Viewport,
        timestamp: f64,
    ) -> &[Landmark] {
        AdaptiveCutoffStabilizer::update_at(self, landmarks, timestamp)
    }

    fn reset(&mut self) {
        AdaptiveCutoffStabilizer::reset(self)
    }

    fn landmark_count(&self) -> usize {
        self.output.len()
    }

    fn name(&self) -> &str {
        "AdaptiveCutoff"
    }
}
