use crate::{Landmark, Viewport};

/// Common contract of every landmark stabilization strategy.
///
/// Returned slices borrow an output buffer owned by the stabilizer. The
/// buffer is reused across calls while the landmark count is unchanged.
pub trait Stabilizer: Send {
    /// Stabilizes one frame of landmarks, timestamped by the stabilizer itself.
    fn update(&mut self, landmarks: &[Landmark], viewport: Viewport) -> &[Landmark];

    /// Stabilizes one frame against a caller-supplied timestamp in seconds.
    ///
    /// Strategies without time-based adaptivity ignore the timestamp.
    fn update_at(
        &mut self,
        landmarks: &[Landmark],
        viewport: Viewport,
        timestamp: f64,
    ) -> &[Landmark] {
        let _ = timestamp;
        self.update(landmarks, viewport)
    }

    /// Clears filtering history without changing allocation.
    fn reset(&mut self);

    /// Landmark count the internal bank is currently sized for.
    fn landmark_count(&self) -> usize;

    /// Unique identifier for this strategy (e.g., "AdaptiveCutoff")
    fn name(&self) -> &str;
}
