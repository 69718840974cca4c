//! Polarized transfer orchestrator (C10): backward march over a recorded
//! path, coupling fluid sampling, coefficient evaluation (C7), stiffness
//! detection (C8), the transfer stepper (C9), and polarization-vector
//! parallel transport (C5) into a per-pixel observer Stokes quartet.

use num_complex::Complex64;

use crate::coefficients::{evaluate_invariant_coeffs, CoefficientClosure};
use crate::config::RenderConfig;
use crate::constants::{ELECTRON_REST_ENERGY, PLANCK_CONSTANT};
use crate::fluid::FluidProvider;
use crate::geodesic::Path;
use crate::metric::Metric;
use crate::observer::observer_four_velocity;
use crate::polarization::{polarization_rhs, PolarizationVector, PolarizedGeodesicState};
use crate::stepper::step_rk4;
use crate::stiffness::check_stiffness;
use crate::tetrad::{
    f_to_tetrad_frame, jones_to_stokes, stokes_to_jones, tetrad_frame_to_f, ObserverTetradFactory,
    Tetrad,
};
use crate::transfer::trapezoid::pivots_are_nonsingular;
use crate::transfer::{pol_rte_rk4_step, pol_rte_trapezoid_step, StokesVector};

/// The four observer-frame Stokes parameters produced by one pixel's
/// polarized transfer pass, already de-invariantized (scaled by `nu^3`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StokesQuartet {
    pub i: f64,
    pub q: f64,
    pub u: f64,
    pub v: f64,
}

impl StokesQuartet {
    fn zero() -> Self {
        Self {
            i: 0.0,
            q: 0.0,
            u: 0.0,
            v: 0.0,
        }
    }
}

const ZERO4: StokesVector = [Complex64::new(0.0, 0.0); 4];

/// Walk `path` in reverse, integrating the polarized transfer ODE (C9)
/// against invariant coefficients (C7) under a stiffness-gated stepper
/// choice (C8), parallel-transporting the polarization four-vector (C5)
/// between samples, and finally projecting into an observer tetrad built
/// at the camera sample (`up = (0,0,0,-1)`, the observer four-velocity
/// construction). `r_g_cm` is the CGS path length of one geometric unit
/// of affine parameter (`C` in the transfer equation) -- a per-render
/// derived quantity, not part of the static configuration surface.
///
/// Grounded in `integrator.c: radiative_transfer_polarized`.
pub fn radiative_transfer_polarized<M, F, C, T>(
    path: &Path,
    nu: f64,
    metric: &M,
    fluid: &F,
    coeffs_closure: &C,
    tetrad_factory: &T,
    r_g_cm: f64,
    config: &RenderConfig,
) -> StokesQuartet
where
    M: Metric,
    F: FluidProvider,
    C: CoefficientClosure,
    T: ObserverTetradFactory,
{
    if path.len() < 2 {
        return StokesQuartet::zero();
    }

    let mut f = PolarizationVector::zero();
    let mut s_a: StokesVector = ZERO4;
    let mut polarization_active = false;
    let mut iinv_running = 0.0_f64;
    let mut iinv_pol_running = 0.0_f64;

    for idx in (1..path.len()).rev() {
        let sample = path[idx];
        let x = sample.state.x;
        let k = sample.state.u;
        let dl_geometric = path[idx - 1].dlambda;

        let fluid_sample = fluid.sample(&x);
        let out_of_bounds = !fluid_sample.in_volume || metric.radius(&x) >= config.rt_outer_cutoff;

        if !out_of_bounds {
            let pitch_ang =
                fluid.pitch_angle(&x, &k, &fluid_sample.b_u, &fluid_sample.u_plasma_u);

            let unit_factor = PLANCK_CONSTANT * nu / ELECTRON_REST_ENERGY;
            let mut k_scaled = k;
            for c in k_scaled.iter_mut() {
                *c *= unit_factor;
            }
            let dl_current = dl_geometric / unit_factor;

            let k_d = metric.lower_index(&x, &k_scaled);
            let nu_p = fluid.freq_in_plasma_frame(&fluid_sample.u_plasma_u, &k_d);

            if nu_p.is_finite() && nu_p > 0.0 {
                let coeffs = evaluate_invariant_coeffs(
                    coeffs_closure,
                    nu_p,
                    fluid_sample.theta_e,
                    fluid_sample.n_e,
                    fluid_sample.b_mag,
                    pitch_ang,
                );

                let tetrad_u = tetrad_factory.create_observer_tetrad(
                    &x,
                    &k_scaled,
                    &fluid_sample.u_plasma_u,
                    &fluid_sample.b_u,
                );
                let tetrad_d = tetrad_factory.create_tetrad_d(&x, &tetrad_u);
                let tetrad = Tetrad {
                    u: tetrad_u,
                    d: tetrad_d,
                };

                if polarization_active {
                    let f_tetrad = f_to_tetrad_frame(&tetrad, &f.0);
                    let stokes =
                        jones_to_stokes(iinv_running, iinv_pol_running, &f_tetrad);
                    s_a = [
                        Complex64::new(stokes[0], 0.0),
                        Complex64::new(stokes[1], 0.0),
                        Complex64::new(stokes[2], 0.0),
                        Complex64::new(stokes[3], 0.0),
                    ];
                }

                // tau = dl * lambda; the steppers themselves apply the `C`
                // (r_g_cm) factor internally, so the detector is handed the
                // bare dl_current, matching `pol_integration_step`'s
                // `check_stiffness(..., *dl_current)` call.
                let stiff = check_stiffness(&coeffs, dl_current, config.stiffness_threshold);
                s_a = if stiff {
                    if pivots_are_nonsingular(&coeffs, dl_current, r_g_cm) {
                        tracing::trace!(idx, "transfer step flagged STIFF; using implicit trapezoidal stepper");
                        pol_rte_trapezoid_step(&coeffs, dl_current, r_g_cm, &s_a)
                    } else {
                        tracing::warn!(
                            idx,
                            dl_current,
                            r_g_cm,
                            "implicit trapezoidal pivot is singular; leaving S_A unchanged for this sample"
                        );
                        s_a
                    }
                } else {
                    pol_rte_rk4_step(&coeffs, dl_current, r_g_cm, &s_a)
                };

                let iinv = s_a[0].re;
                let iinv_pol =
                    (s_a[1].re * s_a[1].re + s_a[2].re * s_a[2].re + s_a[3].re * s_a[3].re).sqrt();

                if iinv_pol > config.zero_polarization_floor {
                    let stokes_real = [iinv, s_a[1].re, s_a[2].re, s_a[3].re];
                    let (iinv_out, iinv_pol_out, f_tetrad_new) = stokes_to_jones(&stokes_real);
                    f = PolarizationVector(tetrad_frame_to_f(&tetrad, &f_tetrad_new));
                    polarization_active = true;
                    iinv_running = iinv_out;
                    iinv_pol_running = iinv_pol_out;
                } else {
                    s_a[1] = Complex64::new(0.0, 0.0);
                    s_a[2] = Complex64::new(0.0, 0.0);
                    s_a[3] = Complex64::new(0.0, 0.0);
                    polarization_active = false;
                    iinv_running = iinv;
                    iinv_pol_running = 0.0;
                }
            }
        }

        if polarization_active {
            let coupled = PolarizedGeodesicState::new(sample.state, f);
            let transported = step_rk4(&coupled, |s| polarization_rhs(s, metric), -dl_geometric);
            f = transported.f;
        }
    }

    let camera = path[0];
    let x_cam = camera.state.x;
    let u_obs = observer_four_velocity(&x_cam, metric);
    let up = [0.0, 0.0, 0.0, -1.0];

    let tetrad_u_final =
        tetrad_factory.create_observer_tetrad(&x_cam, &camera.state.u, &u_obs, &up);
    let tetrad_d_final = tetrad_factory.create_tetrad_d(&x_cam, &tetrad_u_final);
    let tetrad_final = Tetrad {
        u: tetrad_u_final,
        d: tetrad_d_final,
    };

    let f_tetrad_final = f_to_tetrad_frame(&tetrad_final, &f.0);
    let stokes_final = jones_to_stokes(iinv_running, iinv_pol_running, &f_tetrad_final);

    let nu3 = nu * nu * nu;
    StokesQuartet {
        i: stokes_final[0] * nu3,
        q: stokes_final[1] * nu3,
        u: stokes_final[2] * nu3,
        v: stokes_final[3] * nu3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluid::FluidSample;
    use crate::geodesic::{GeodesicState, Sample};
    use crate::metric::Minkowski;
    use std::f64::consts::FRAC_PI_2;

    struct VacuumFluid;
    impl FluidProvider for VacuumFluid {
        fn sample(&self, _x: &[f64; 4]) -> FluidSample {
            FluidSample {
                n_e: 0.0,
                theta_e: 0.0,
                b_mag: 0.0,
                b_u: [0.0; 4],
                u_plasma_u: [1.0, 0.0, 0.0, 0.0],
                in_volume: false,
            }
        }
        fn pitch_angle(&self, _x: &[f64; 4], _k: &[f64; 4], _b: &[f64; 4], _u: &[f64; 4]) -> f64 {
            0.0
        }
        fn freq_in_plasma_frame(&self, _u: &[f64; 4], _k_d: &[f64; 4]) -> f64 {
            1.0
        }
    }

    struct NullCoeffs;
    impl CoefficientClosure for NullCoeffs {
        fn j_i(&self, _t: f64, _n: f64, _nu: f64, _b: f64, _p: f64) -> f64 {
            0.0
        }
        fn j_q(&self, _t: f64, _n: f64, _nu: f64, _b: f64, _p: f64) -> f64 {
            0.0
        }
        fn j_v(&self, _t: f64, _n: f64, _nu: f64, _b: f64, _p: f64) -> f64 {
            0.0
        }
        fn rho_q(&self, _t: f64, _n: f64, _nu: f64, _b: f64, _p: f64) -> f64 {
            0.0
        }
        fn rho_v(&self, _t: f64, _n: f64, _nu: f64, _b: f64, _p: f64) -> f64 {
            0.0
        }
        fn absorption_coeff_th(&self, _j_nu: f64, _nu_p: f64, _theta_e: f64) -> f64 {
            0.0
        }
    }

    struct IdentityTetradFactory;
    impl ObserverTetradFactory for IdentityTetradFactory {
        fn create_observer_tetrad(
            &self,
            _x: &[f64; 4],
            _k: &[f64; 4],
            _u_obs: &[f64; 4],
            _up: &[f64; 4],
        ) -> [[f64; 4]; 4] {
            let mut m = [[0.0; 4]; 4];
            for i in 0..4 {
                m[i][i] = 1.0;
            }
            m
        }
        fn create_tetrad_d(&self, _x: &[f64; 4], tetrad_u: &[[f64; 4]; 4]) -> [[f64; 4]; 4] {
            *tetrad_u
        }
    }

    fn straight_path(n: usize, dl: f64) -> Path {
        let mut path: Path = Vec::with_capacity(n);
        let mut x = [0.0, 10.0, FRAC_PI_2, 0.0];
        for _ in 0..n {
            path.push(Sample {
                state: GeodesicState::new(x, [1.0, -1.0, 0.0, 0.0]),
                dlambda: dl,
            });
            x[1] -= dl;
        }
        path
    }

    #[test]
    fn vacuum_path_yields_zero_stokes() {
        let mk = Minkowski;
        let fluid = VacuumFluid;
        let coeffs = NullCoeffs;
        let tetrad_factory = IdentityTetradFactory;
        let config = RenderConfig::default();

        let path = straight_path(50, 0.01);
        let stokes = radiative_transfer_polarized(
            &path,
            1.0,
            &mk,
            &fluid,
            &coeffs,
            &tetrad_factory,
            1.0,
            &config,
        );
        assert_eq!(stokes.i, 0.0);
        assert_eq!(stokes.q, 0.0);
        assert_eq!(stokes.u, 0.0);
        assert_eq!(stokes.v, 0.0);
    }

    #[test]
    fn empty_path_yields_zero_stokes() {
        let mk = Minkowski;
        let fluid = VacuumFluid;
        let coeffs = NullCoeffs;
        let tetrad_factory = IdentityTetradFactory;
        let config = RenderConfig::default();

        let path: Path = Vec::new();
        let stokes = radiative_transfer_polarized(
            &path,
            1.0,
            &mk,
            &fluid,
            &coeffs,
            &tetrad_factory,
            1.0,
            &config,
        );
        assert_eq!(stokes, StokesQuartet::zero());
    }
}
