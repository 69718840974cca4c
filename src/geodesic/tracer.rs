//! Backward geodesic tracer (C4): termination logic, order culling, path
//! recording.

use crate::config::{IntegrationMethod, RenderConfig};
use crate::geodesic::rhs::geodesic_rhs;
use crate::geodesic::state::GeodesicState;
use crate::geodesic::step_controller::adaptive_step;
use crate::metric::Metric;
use crate::stepper::{step_rk2_midpoint, step_rk4, step_velocity_verlet};

/// One recorded path entry: a state plus the absolute affine step taken
/// from it to the next recorded state. Layout
/// `[X^0 X^1 X^2 X^3 U^0 U^1 U^2 U^3 |dlambda|]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub state: GeodesicState,
    pub dlambda: f64,
}

/// An ordered, finite sequence of [`Sample`]s in integration order (camera
/// toward plasma/horizon). A `Vec<Sample>` *is* the "contiguous block of
/// 9*max_steps doubles" a flat recorded path amounts to: `Sample` is
/// `repr(C)` and 9 `f64`s wide, so no parallel flat-array representation
/// is needed.
pub type Path = Vec<Sample>;

/// Produces initial conditions for a pixel's geodesic from image-plane
/// coordinates.
pub trait PhotonInitializer: Sync {
    fn initialize_photon(&self, alpha: f64, beta: f64, t0: f64) -> GeodesicState;
}

/// Backward-integrate the null geodesic for one pixel.
///
/// Termination: radial cutoffs via `Metric::radius` (which folds away the
/// logscale boolean so this loop never branches on coordinate identity),
/// order-culling on `U^2` sign flips (skipped for the first two steps, per
/// the uninitialized-`thetadot_prev` guard in the original), and the hard
/// step cap.
pub fn integrate_geodesic<M, P>(
    alpha: f64,
    beta: f64,
    photon_init: &P,
    metric: &M,
    config: &RenderConfig,
) -> Path
where
    M: Metric,
    P: PhotonInitializer,
{
    let mut state = photon_init.initialize_photon(alpha, beta, 0.0);
    let mut path: Path = Vec::with_capacity(config.max_steps.min(1024));

    let mut r_current = metric.radius(&state.x);
    let mut theta_turns: u32 = 0;
    let mut thetadot_prev = 0.0_f64;
    let mut steps: usize = 0;
    let mut terminate = false;

    while r_current > config.cutoff_inner
        && r_current < config.cutoff_outer
        && steps < config.max_steps
        && !terminate
    {
        // Order-culling: count U^2 sign flips, skipping the first two
        // steps since `thetadot_prev` is not yet meaningful (mirrors
        // `integrator.c`'s `*steps > 2` guard).
        if steps > 2 && thetadot_prev * state.u[2] < 0.0 {
            theta_turns += 1;
        }
        thetadot_prev = state.u[2];

        if (beta < 0.0 && theta_turns > config.max_order)
            || (beta > 0.0 && theta_turns > config.max_order + 1)
        {
            // Mirrors `integrator.c`'s `TERMINATE=1`: the order-culled
            // sample is still recorded and the state still advanced once
            // more before the `while` guard above re-checks and exits.
            terminate = true;
        }

        let dlambda = adaptive_step(&state.x, &state.u, config.step_scale);

        path.push(Sample {
            state,
            dlambda: dlambda.abs(),
        });

        state = match config.geodesic_method {
            IntegrationMethod::Rk4 => step_rk4(&state, |s| geodesic_rhs(s, metric), dlambda),
            IntegrationMethod::Rk2 => {
                step_rk2_midpoint(&state, |s| geodesic_rhs(s, metric), dlambda)
            }
            IntegrationMethod::Verlet => {
                step_velocity_verlet(&state, |s| geodesic_rhs(s, metric), dlambda)
            }
        };

        r_current = metric.radius(&state.x);
        steps += 1;
    }

    if steps >= config.max_steps {
        tracing::warn!(
            steps,
            max_steps = config.max_steps,
            r_current,
            "geodesic tracer hit the hard step cap before a termination criterion; path truncated"
        );
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Minkowski;
    use std::f64::consts::FRAC_PI_2;

    struct StraightLine;
    impl PhotonInitializer for StraightLine {
        fn initialize_photon(&self, _alpha: f64, _beta: f64, t0: f64) -> GeodesicState {
            GeodesicState::new([t0, 10.0, FRAC_PI_2, 0.0], [1.0, -1.0, 0.0, 0.0])
        }
    }

    #[test]
    fn flat_spacetime_tracer_reaches_inner_cutoff() {
        let mk = Minkowski;
        let init = StraightLine;
        let mut config = RenderConfig::default();
        config.cutoff_inner = 1.0;
        config.cutoff_outer = 100.0;

        let path = integrate_geodesic(0.0, 0.0, &init, &mk, &config);
        assert!(!path.is_empty());
        let last = path.last().unwrap();
        assert!(last.state.r_coord() > config.cutoff_inner - 1.0);
        assert!(path.len() < config.max_steps);
    }

    #[test]
    fn hard_step_cap_is_respected() {
        let mk = Minkowski;
        struct NeverTerminates;
        impl PhotonInitializer for NeverTerminates {
            fn initialize_photon(&self, _a: f64, _b: f64, t0: f64) -> GeodesicState {
                GeodesicState::new([t0, 50.0, FRAC_PI_2, 0.0], [1.0, 0.0, 0.0, 0.0])
            }
        }
        let mut config = RenderConfig::default();
        config.max_steps = 5;
        config.cutoff_inner = 1.0;
        config.cutoff_outer = 1e6;

        let path = integrate_geodesic(0.0, 0.0, &NeverTerminates, &mk, &config);
        assert_eq!(path.len(), config.max_steps);
    }
}
