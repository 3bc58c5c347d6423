use std::time::Instant;

/// Source of per-frame timestamps, in seconds.
pub trait Clock: Send {
    fn now_seconds(&mut self) -> f64;
}

/// Monotonic clock measured from its construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now_seconds(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Advances by a fixed step on every read: `start, start + step, ...`.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    next: f64,
    step: f64,
}

impl FixedStepClock {
    pub fn new(start: f64, step: f64) -> Self {
        Self { next: start, step }
    }

    pub fn at_rate(hz: f64) -> Self {
        Self::new(0.0, 1.0 / hz)
    }
}

impl Clock for FixedStepClock {
    fn now_seconds(&mut self) -> f64 {
        let now = self.next;
        self.next += self.step;
        now
    }
}
