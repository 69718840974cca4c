//! Parallel transport of the polarization vector alongside a geodesic (C5).
//!
//! Shares the stepper primitives of [`crate::stepper`] with the plain
//! geodesic tracer (C1/C4), but is kept an independent stepper at the
//! interface: the RK4 tableau happens to be the same four weights, not a
//! reason to bolt the two states together permanently.

use num_complex::Complex64;

use crate::geodesic::{geodesic_rhs, GeodesicState};
use crate::metric::Metric;
use crate::stepper::PhaseVector;

/// The complex Jones-like polarization 4-vector `F^mu`, transported
/// alongside a null geodesic.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarizationVector(pub [Complex64; 4]);

impl PolarizationVector {
    pub fn new(f: [Complex64; 4]) -> Self {
        Self(f)
    }

    pub fn zero() -> Self {
        Self([Complex64::new(0.0, 0.0); 4])
    }
}

/// The coupled `(X, U, F)` state parallel-transported by C5's RK4 stepper.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarizedGeodesicState {
    pub geo: GeodesicState,
    pub f: PolarizationVector,
}

impl PolarizedGeodesicState {
    pub fn new(geo: GeodesicState, f: PolarizationVector) -> Self {
        Self { geo, f }
    }
}

impl PhaseVector for PolarizedGeodesicState {
    fn add_scaled(&self, other: &Self, h: f64) -> Self {
        let geo = self.geo.add_scaled(&other.geo, h);
        let mut f = self.f;
        for i in 0..4 {
            f.0[i] += other.f.0[i] * h;
        }
        PolarizedGeodesicState { geo, f }
    }
}

/// `Fdot^i = -Gamma^i_jk(X) U^j F^k`, the complex analogue of the geodesic
/// acceleration, grounded in `integrator.c: f_parallel`'s `f_u_vector`
/// computation. The geodesic half of the right-hand side is delegated to
/// [`geodesic_rhs`] unchanged -- the two equations share the connection but
/// not the unknowns.
pub fn polarization_rhs<M: Metric>(
    state: &PolarizedGeodesicState,
    metric: &M,
) -> PolarizedGeodesicState {
    let geo_dot = geodesic_rhs(&state.geo, metric);

    let gamma = metric.connection(&state.geo.x);
    let u = state.geo.u;
    let f = state.f.0;

    let mut f_dot = [Complex64::new(0.0, 0.0); 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                f_dot[i] -= gamma[i][j][k] * u[j] * f[k];
            }
        }
    }

    PolarizedGeodesicState {
        geo: geo_dot,
        f: PolarizationVector(f_dot),
    }
}
