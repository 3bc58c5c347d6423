/// Single-channel exponential smoothing.
///
/// The first sample after construction or [`reset`](Self::reset) passes
/// through unchanged and seeds the smoothed state.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialLowPass {
    alpha: f32,
    smoothed: f32,
    raw_prev: f32,
    initialized: bool,
}

impl Default for ExponentialLowPass {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ExponentialLowPass {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            smoothed: 0.0,
            raw_prev: 0.0,
            initialized: false,
        }
    }

    pub fn filter(&mut self, x: f32) -> f32 {
        self.raw_prev = x;
        if !self.initialized {
            self.initialized = true;
            self.smoothed = x;
            return x;
        }

        self.smoothed = self.alpha * x + (1.0 - self.alpha) * self.smoothed;
        self.smoothed
    }

    pub fn filter_with_alpha(&mut self, x: f32, alpha: f32) -> f32 {
        self.alpha = alpha;
        self.filter(x)
    }

    pub fn reset(&mut self) {
        self.initialized = false;
    }

    pub fn has_last_raw_value(&self) -> bool {
        self.initialized
    }

    pub fn last_raw_value(&self) -> Option<f32> {
        self.initialized.then_some(self.raw_prev)
    }

    /// Current smoothed output, if any sample has been seen.
    pub fn value(&self) -> Option<f32> {
        self.initialized.then_some(self.smoothed)
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}
