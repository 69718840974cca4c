//! Polarized radiative transfer: stepper (C9) and orchestrator (C10).

mod orchestrator;
mod rk4;
mod scalar;
mod trapezoid;

pub use orchestrator::{radiative_transfer_polarized, StokesQuartet};
pub use rk4::pol_rte_rk4_step;
pub use scalar::radiative_transfer;
pub use trapezoid::pol_rte_trapezoid_step;

/// The four (complex, though always real-valued along the trajectory)
/// Stokes parameters `[I, Q, U, V]` threaded through the transfer
/// stepper, invariant form.
pub type StokesVector = [num_complex::Complex64; 4];
