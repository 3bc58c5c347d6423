pub mod adaptive;
pub mod distance_gated;

pub use adaptive::AdaptiveCutoffStabilizer;
pub use distance_gated::DistanceGatedStabilizer;

use crate::{StabilizationConfig, Stabilizer, StabilizerError, StabilizerKind};

/// Builds the strategy selected by `config.kind`.
pub fn build_stabilizer(
    config: &StabilizationConfig,
) -> Result<Box<dyn Stabilizer>, StabilizerError> {
    Ok(match config.kind {
        StabilizerKind::AdaptiveCutoff => Box::new(AdaptiveCutoffStabilizer::new(config.adaptive)?),
        StabilizerKind::DistanceGated => {
            Box::new(DistanceGatedStabilizer::new(config.distance_gated)?)
        }
    })
}
