//! Geodesic right-hand side (C2): the geodesic equation via the connection.

use crate::geodesic::GeodesicState;
use crate::metric::Metric;

/// `Ydot = (U, A)` with `A^i = -Gamma^i_{jk}(X) U^j U^k` (Einstein
/// summation), grounded in the direct velocity formulation of the geodesic
/// equation. Never signals failure; NaNs at coordinate singularities
/// propagate to the tracer's termination logic (C4).
pub fn geodesic_rhs<M: Metric>(state: &GeodesicState, metric: &M) -> GeodesicState {
    let gamma = metric.connection(&state.x);
    let u = state.u;

    let mut a = [0.0; 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                a[i] -= gamma[i][j][k] * u[j] * u[k];
            }
        }
    }

    GeodesicState { x: u, u: a }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Minkowski;

    #[test]
    fn flat_spacetime_has_zero_acceleration_for_any_velocity() {
        // Minkowski's connection() is hard-zeroed rather than derived from
        // the spherical metric (see its doc comment), so acceleration
        // vanishes here even for a velocity with nonzero angular
        // components -- this is a property of this crate's Minkowski
        // implementation, not a general fact about spherical coordinates.
        let mk = Minkowski;
        let state = GeodesicState::new([0.0, 10.0, 1.2, 0.3], [1.0, -0.5, 0.2, 0.1]);
        let ydot = geodesic_rhs(&state, &mk);
        assert_eq!(ydot.x, state.u);
        assert_eq!(ydot.u, [0.0; 4]);
    }
}
