//! Geodesic integration: ray states, right-hand side, step control, and
//! the backward tracer.
//!
//! This module traces null geodesics (photon paths) through any spacetime
//! implementing [`Metric`](crate::metric::Metric), in the direct
//! contravariant-velocity formulation: `A^i = -Gamma^i_jk U^j U^k`. One set
//! of stepper primitives ([`crate::stepper`]) serves both the plain state
//! here and the coupled geodesic+polarization state in
//! [`crate::polarization`].

mod rhs;
mod state;
mod step_controller;
mod tracer;

pub use rhs::geodesic_rhs;
pub use state::GeodesicState;
pub use step_controller::adaptive_step;
pub use tracer::{integrate_geodesic, Path, PhotonInitializer, Sample};
