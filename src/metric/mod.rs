//! Spacetime metric implementations.
//!
//! The [`Metric`] trait is the external geometry contract the tracer and
//! transfer orchestrator are generic over: `connection`,
//! `metric_uu`/`metric_dd`, and index raising/lowering are
//! supplied by whichever spacetime geometry a render is configured with.
//! Concrete implementations include:
//!
//! - [`Kerr`] -- Rotating black hole (the general case)
//! - [`Schwarzschild`] -- Non-rotating black hole (Kerr with a=0)
//! - [`Minkowski`] -- Flat spacetime (for baselines and testing)

mod kerr;
mod minkowski;
mod schwarzschild;

pub use kerr::{CoordinateSystem, Kerr};
pub use minkowski::Minkowski;
pub use schwarzschild::Schwarzschild;

use crate::tensor::{christoffel_from_metric_derivs, Christoffel, MetricTensor4};

/// Orbit type for ISCO and photon sphere calculations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orbit {
    /// Co-rotating with the black hole spin.
    Prograde,
    /// Counter-rotating against the black hole spin.
    Retrograde,
}

/// The spacetime metric trait.
///
/// Coordinates are always passed as the full 4-vector `x = [t, r_coord,
/// theta, phi]`, where `r_coord` is whatever radial coordinate the
/// implementation actually integrates in (`r` or `log r`) -- callers that
/// need the physical radius use [`Metric::radius`], which folds away the
/// "is this a logarithmic radial coordinate" branch out of the tracer's
/// termination loop entirely.
///
/// # Required Methods
///
/// - [`covariant`](Metric::covariant) -- the metric tensor g_{mu nu}
/// - [`contravariant`](Metric::contravariant) -- the inverse metric g^{mu nu}
/// - [`mass`](Metric::mass) -- black hole mass parameter
///
/// # Provided Methods
///
/// - [`connection`](Metric::connection) -- Christoffel symbols, numeric by default
/// - [`raise_index`] / [`lower_index`](Metric::lower_index) -- tensor bookkeeping
/// - [`radius`](Metric::radius) -- physical radius, logscale-aware
/// - [`event_horizon`](Metric::event_horizon) -- r_+ = M + sqrt(M^2 - a^2)
pub trait Metric: Sync {
    /// Covariant metric tensor g_{mu nu} at `x`.
    fn covariant(&self, x: &[f64; 4]) -> MetricTensor4;

    /// Contravariant (inverse) metric tensor g^{mu nu} at `x`.
    fn contravariant(&self, x: &[f64; 4]) -> MetricTensor4;

    /// Black hole mass parameter M (in geometric units).
    fn mass(&self) -> f64;

    /// Dimensionless spin parameter a* = J/(M^2), in range [-1, 1].
    /// Zero for non-rotating spacetimes.
    fn spin(&self) -> f64 {
        0.0
    }

    /// Christoffel symbols Gamma^alpha_{mu nu} at `x`.
    ///
    /// The default implementation differentiates [`covariant`](Metric::covariant)
    /// numerically (C2's external connection contract); implementations with
    /// a closed form should override this for speed and accuracy near
    /// coordinate singularities.
    fn connection(&self, x: &[f64; 4]) -> Christoffel {
        christoffel_from_metric_derivs(
            |x| self.covariant(x),
            |x| self.contravariant(x),
            x,
            1e-6,
        )
    }

    /// Physical (areal) radius at `x`, folding away the logarithmic-radial-
    /// coordinate boolean: `radius(x) = x[1]` or `exp(x[1])` depending on
    /// the implementation's coordinate choice.
    fn radius(&self, x: &[f64; 4]) -> f64 {
        x[1]
    }

    /// Raise an index: p^mu = g^{mu nu} p_nu, at `x`.
    fn raise_index(&self, x: &[f64; 4], p_lower: &[f64; 4]) -> [f64; 4] {
        self.contravariant(x).raise_index(p_lower)
    }

    /// Lower an index: p_mu = g_{mu nu} p^nu, at `x`.
    fn lower_index(&self, x: &[f64; 4], p_upper: &[f64; 4]) -> [f64; 4] {
        self.covariant(x).lower_index(p_upper)
    }

    /// Event horizon radius: r_+ = M + sqrt(M^2 - a^2).
    fn event_horizon(&self) -> f64 {
        let m = self.mass();
        let a = self.spin() * m;
        let disc = m * m - a * a;
        if disc < 0.0 {
            m
        } else {
            m + disc.sqrt()
        }
    }
}
