//! Fallible boundaries of the crate.
//!
//! The geodesic tracer and transfer orchestrator never throw: the
//! engine's failure modes — path truncation, non-finite intermediates, a
//! singular implicit-step pivot — are handled in place, documented, and
//! surfaced through `tracing` rather than `Result`. The one place a caller
//! can hand in genuinely invalid input is the configuration record that
//! gets threaded through every component; that is what `ConfigError` guards.

use thiserror::Error;

/// Errors produced while validating a [`crate::config::RenderConfig`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("step_scale must be positive, got {0}")]
    NonPositiveStepScale(f64),
    #[error("max_steps must be at least 1, got {0}")]
    ZeroMaxSteps(usize),
    #[error("cutoff_inner ({inner}) must be less than cutoff_outer ({outer})")]
    InvertedCutoffs { inner: f64, outer: f64 },
    #[error("cutoff_inner must be positive, got {0}")]
    NonPositiveCutoffInner(f64),
    #[error("rt_outer_cutoff must be positive, got {0}")]
    NonPositiveRtOuterCutoff(f64),
    #[error("stiffness_threshold must lie in (0, 1), got {0}")]
    StiffnessThresholdOutOfRange(f64),
    #[error("zero_polarization_floor must be positive, got {0}")]
    NonPositiveZeroPolarizationFloor(f64),
}
