//! Unpolarized legacy transfer path: the scalar `(j_nu, a_nu)` boundary
//! case of C9, driven over a recorded path the same way the polarized
//! orchestrator is, but without Q/U/V or parallel transport.

use crate::config::RenderConfig;
use crate::constants::{ELECTRON_REST_ENERGY, PLANCK_CONSTANT};
use crate::coefficients::CoefficientClosure;
use crate::fluid::FluidProvider;
use crate::geodesic::Path;
use crate::metric::Metric;

/// Horner-form truncated exponential for small optical depth, grounded in
/// `integrator.c: radiative_transfer`'s `tau < 1e-5` branch: avoids the
/// catastrophic cancellation of `1 - e^{-tau}` for tiny `tau`.
#[inline]
fn small_tau_update(i_n: f64, source: f64, tau: f64) -> f64 {
    i_n - (i_n - source) * (tau * (6.0 - tau * (3.0 - tau)) / 6.0)
}

/// Scalar radiative transfer step: `tau = nu_p*a_nu*dl*c + tau_old`,
/// `source = j_nu / a_nu`, `I' = I*e^-tau + source*(1 - e^-tau)`.
///
/// Preserves the original's `dtau_old` bookkeeping verbatim: the
/// accumulator is declared and folded into `tau` but never reassigned
/// across steps in `integrator.c`, so the optical-depth term the formula
/// uses is effectively local to this step, not a running total. This is
/// documented in DESIGN.md as an Open Question resolved by preserving the
/// original's (likely unintended) local-only behaviour.
fn scalar_transfer_step(i_n: f64, j_nu: f64, a_nu: f64, dl_c: f64, c: f64, dtau_old: f64) -> f64 {
    if a_nu == 0.0 {
        return i_n;
    }
    let tau = a_nu * dl_c * c + dtau_old;
    let source = j_nu / a_nu;
    if tau < 1e-5 {
        small_tau_update(i_n, source, tau)
    } else {
        i_n * (-tau).exp() + source * (1.0 - (-tau).exp())
    }
}

/// Unpolarized radiative transfer over a recorded path: walks `path` in
/// reverse, samples the fluid, converts units exactly as the polarized
/// orchestrator's step 4 does, and accumulates scalar intensity via
/// [`scalar_transfer_step`]. Returns the observer-frame (non-invariant)
/// intensity at frequency `nu`.
///
/// Grounded in `integrator.c: radiative_transfer`, the scalar/unpolarized
/// comparison path kept alongside the polarized orchestrator for quick
/// intensity-only renders and cross-checks. `r_g_cm` is the same CGS
/// path-length-per-geometric-unit factor (`C`) the polarized orchestrator
/// threads into its steppers.
pub fn radiative_transfer<M, F, C>(
    path: &Path,
    nu: f64,
    metric: &M,
    fluid: &F,
    coeffs: &C,
    r_g_cm: f64,
    config: &RenderConfig,
) -> f64
where
    M: Metric,
    F: FluidProvider,
    C: CoefficientClosure,
{
    let mut i_inv = 0.0_f64;
    let dtau_old = 0.0_f64;

    if path.is_empty() {
        return 0.0;
    }

    for idx in (1..path.len()).rev() {
        let sample = path[idx];
        let x = sample.state.x;
        let k = sample.state.u;

        let r = metric.radius(&x);
        if r >= config.rt_outer_cutoff {
            continue;
        }

        let fluid_sample = fluid.sample(&x);
        if !fluid_sample.in_volume {
            continue;
        }

        let dl_geometric = path[idx - 1].dlambda;

        let unit_factor = PLANCK_CONSTANT * nu / ELECTRON_REST_ENERGY;
        let mut k_cgs = k;
        for c in k_cgs.iter_mut() {
            *c *= unit_factor;
        }
        let dl_current = dl_geometric / unit_factor;

        let k_d = metric.lower_index(&x, &k_cgs);
        let nu_p = fluid.freq_in_plasma_frame(&fluid_sample.u_plasma_u, &k_d);
        if nu_p <= 0.0 || !nu_p.is_finite() {
            continue;
        }

        let pitch_ang = fluid.pitch_angle(&x, &k, &fluid_sample.b_u, &fluid_sample.u_plasma_u);

        let j_nu = coeffs.j_i(
            fluid_sample.theta_e,
            fluid_sample.n_e,
            nu_p,
            fluid_sample.b_mag,
            pitch_ang,
        );
        if j_nu.is_nan() {
            continue;
        }
        let a_nu = coeffs.absorption_coeff_th(j_nu, nu_p, fluid_sample.theta_e);

        i_inv = scalar_transfer_step(
            i_inv,
            j_nu / (nu_p * nu_p),
            a_nu * nu_p,
            dl_current,
            r_g_cm,
            dtau_old,
        );
    }

    i_inv * nu * nu * nu
}
