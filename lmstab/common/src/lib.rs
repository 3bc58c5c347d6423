pub use api::{
    landmarks_from_flat, landmarks_from_rows, Landmark, StabilizerError, Viewport,
};

mod clock;
pub mod config;
mod euro_filter;
mod low_pass;
mod slots;
mod stabilizer_trait;
pub mod stabilizers;

pub use clock::{Clock, FixedStepClock, MonotonicClock};
pub use config::{AdaptiveCutoffConfig, DistanceGatedConfig, StabilizationConfig, StabilizerKind};
pub use euro_filter::AdaptiveCutoffFilter;
pub use low_pass::ExponentialLowPass;
pub use slots::StabilizerSet;
pub use stabilizer_trait::Stabilizer;
pub use stabilizers::{build_stabilizer, AdaptiveCutoffStabilizer, DistanceGatedStabilizer};
