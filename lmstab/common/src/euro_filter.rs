use crate::{AdaptiveCutoffConfig, ExponentialLowPass};

/// One-Euro filter over a single coordinate.
///
/// Cutoff rises with the smoothed speed of the signal, so slow drift is
/// smoothed hard while fast motion keeps up with the input.
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveCutoffFilter {
    config: AdaptiveCutoffConfig,
    freq: f32,
    last_timestamp: Option<f64>,
    x: ExponentialLowPass,
    dx: ExponentialLowPass,
}

impl Default for AdaptiveCutoffFilter {
    fn default() -> Self {
        Self::new(AdaptiveCutoffConfig::default())
    }
}

impl AdaptiveCutoffFilter {
    pub fn new(config: AdaptiveCutoffConfig) -> Self {
        Self {
            config,
            freq: Self::default_freq(&config),
            last_timestamp: None,
            x: ExponentialLowPass::default(),
            dx: ExponentialLowPass::default(),
        }
    }

    fn default_freq(config: &AdaptiveCutoffConfig) -> f32 {
        config.freq.max(config.freq_min()).min(config.freq_max())
    }

    fn alpha(hz: f32, cutoff: f32) -> f32 {
        let tau = 1.0 / (2.0 * std::f32::consts::PI * cutoff);
        let te = 1.0 / hz;
        1.0 / (1.0 + tau / te)
    }

    /// Current sampling frequency estimate, always within `freq_range`.
    pub fn frequency(&self) -> f32 {
        self.freq
    }

    pub fn filter(&mut self, x: f32, timestamp: f64) -> f32 {
        if !x.is_finite() {
            return self.x.value().unwrap_or(0.0);
        }

        if let Some(last) = self.last_timestamp {
            let dt_min = 1.0 / self.config.freq_max() as f64;
            let dt = (timestamp - last).max(dt_min);
            self.freq = ((1.0 / dt) as f32)
                .max(self.config.freq_min())
                .min(self.config.freq_max());
        }
        self.last_timestamp = Some(timestamp);

        let dx = match self.x.last_raw_value() {
            Some(raw_prev) => (x - raw_prev) * self.freq,
            None => 0.0,
        };
        let edx = self
            .dx
            .filter_with_alpha(dx, Self::alpha(self.freq, self.config.d_cutoff));
        let cutoff = self.config.min_cutoff + self.config.beta * edx.abs();

        self.x.filter_with_alpha(x, Self::alpha(self.freq, cutoff))
    }

    pub fn reset(&mut self) {
        self.last_timestamp = None;
        self.freq = Self::default_freq(&self.config);
        self.x.reset();
        self.dx.reset();
    }
}
