//! # Gravitas -- Polarized General-Relativistic Radiative Transfer Core
//!
//! Adaptive backward integration of null geodesics through curved,
//! magnetized spacetime, coupled with polarized synchrotron radiative
//! transfer: tetrad construction, parallel transport of the polarization
//! four-vector, Stokes/Jones conversion, and a stiff/non-stiff transfer
//! step selector.
//!
//! The metric backend, fluid sampler, and emission/absorption/rotation
//! coefficient closures are external collaborators, expressed here as
//! traits ([`metric::Metric`], [`fluid::FluidProvider`],
//! [`coefficients::CoefficientClosure`], [`tetrad::ObserverTetradFactory`],
//! [`geodesic::PhotonInitializer`]) the core is generic over. Camera/pixel
//! orchestration, configuration file parsing, and image/spectrum output
//! are out of scope; callers drive [`geodesic::integrate_geodesic`] and
//! [`transfer::radiative_transfer_polarized`] per pixel.
//!
//! ## Architecture
//!
//! - [`config`] -- Immutable render configuration (`RenderConfig`) threaded through every component.
//! - [`constants`] -- Geometric (G=c=1) and CGS physical constants.
//! - [`error`] -- `ConfigError`, the one fallible boundary (the transfer engine itself never throws).
//! - [`tensor`] -- `MetricTensor4`, Christoffel symbol utilities.
//! - [`metric`] -- The `Metric` trait and concrete `Kerr`/`Schwarzschild`/`Minkowski` implementations.
//! - [`stepper`] -- RK4/RK2/velocity-Verlet primitives parameterized by a right-hand-side functor.
//! - [`geodesic`] -- Geodesic right-hand side, adaptive step controller, backward tracer.
//! - [`fluid`] -- `FluidProvider`: plasma sampling contract.
//! - [`coefficients`] -- `CoefficientClosure`: invariant emission/absorption/Faraday coefficients.
//! - [`polarization`] -- Parallel transport of the polarization four-vector alongside a geodesic.
//! - [`tetrad`] -- Tetrad construction contract and Jones/Stokes transforms.
//! - [`stiffness`] -- Stiffness detector for the linearized polarized transfer operator.
//! - [`transfer`] -- The transfer stepper (explicit RK4 / implicit trapezoidal) and the backward-march orchestrator.
//! - [`observer`] -- Observer four-velocity construction.

pub mod coefficients;
pub mod config;
pub mod constants;
pub mod error;
pub mod fluid;
pub mod geodesic;
pub mod metric;
pub mod observer;
pub mod polarization;
pub mod stepper;
pub mod stiffness;
pub mod tensor;
pub mod tetrad;
pub mod transfer;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::{IntegrationMethod, RenderConfig};
    pub use crate::error::ConfigError;
    pub use crate::geodesic::{integrate_geodesic, GeodesicState, Path, PhotonInitializer, Sample};
    pub use crate::metric::{Kerr, Metric, Minkowski, Orbit, Schwarzschild};
    pub use crate::transfer::{radiative_transfer, radiative_transfer_polarized, StokesQuartet};
}
