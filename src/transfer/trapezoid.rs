//! Implicit trapezoidal polarized transfer step (C9).

use num_complex::Complex64;

use crate::coefficients::InvariantCoeffs;
use crate::transfer::StokesVector;

/// Advances the Stokes vector one step of the implicit trapezoidal rule,
/// solved via a closed-form Crout LU factorization of the 4x4 system.
/// Numerically identical to `integrator.c: pol_rte_trapezoid_step`.
///
/// Precondition: valid only when `rho_u = j_u = 0` (the tetrad-choice
/// forcing applied in C7's `evaluate_invariant_coeffs`) -- the pivot
/// structure below was hand-derived for that zero pattern and does not
/// generalize to a nonzero `j_U`/`rho_U`.
pub fn pol_rte_trapezoid_step(
    coeffs: &InvariantCoeffs,
    dl_current: f64,
    c: f64,
    s_a: &StokesVector,
) -> StokesVector {
    let InvariantCoeffs {
        j_i,
        j_q,
        j_u,
        j_v,
        rho_q: r_q,
        rho_v: r_v,
        a_i,
        a_q,
        a_u,
        a_v,
        ..
    } = *coeffs;

    let i0 = s_a[0];
    let q0 = s_a[1];
    let u0 = s_a[2];
    let v0 = s_a[3];

    let dc = dl_current * c;

    let u11 = 1.0 + 0.5 * dc * a_i;
    let u12 = 0.5 * dc * a_q;
    let u14 = 0.5 * dc * a_v;
    let l21 = 0.5 * dc * a_q / u11;
    let u22 = 1.0 + 0.5 * dc * a_i - l21 * u12;
    let u23 = 0.5 * dc * r_v;
    let u24 = -l21 * u14;
    let l32 = -0.5 * dc * r_v / u22;
    let u33 = 1.0 + 0.5 * dc * a_i - l32 * u23;
    let u34 = 0.5 * dc * r_q - l32 * u24;
    let l41 = 0.5 * dc * a_v / u11;
    let l42 = -l41 * u12 / u22;
    let l43 = (-0.5 * dc * r_q - l42 * u23) / u33;
    let u44 = 1.0 + 0.5 * dc * a_i - l41 * u14 - l42 * u24 - l43 * u34;

    let b1 = i0 + dc / 2.0 * (2.0 * j_i - (a_i * i0 + a_q * q0 + a_v * v0));
    let b2 = q0 + dc / 2.0 * (2.0 * j_q - (a_q * i0 + a_i * q0 + r_v * u0));
    let b3 = u0 + dc / 2.0 * (2.0 * j_u - (-r_v * q0 + a_i * u0 + r_q * v0));
    let b4 = v0 + dc / 2.0 * (2.0 * j_v - (a_v * i0 - r_q * u0 + a_i * v0));

    let y1 = b1;
    let y2 = b2 - l21 * y1;
    let y3 = b3 - l32 * y2;
    let y4 = b4 - l41 * y1 - l42 * y2 - l43 * y3;

    let x4 = y4 / u44;
    let x3 = (y3 - u34 * x4) / u33;
    let x2 = (y2 - u23 * x3 - u24 * x4) / u22;
    let x1 = (y1 - u12 * x2 - u14 * x4) / u11;

    [x1, x2, x3, x4]
}

/// Whether the closed-form Crout pivots above remain well defined for
/// these coefficients, i.e. no pivot divides by (near) zero. Callers
/// should fall back to [`super::pol_rte_rk4_step`] if this returns
/// `false`; the original assumes a well-posed pivot structure and does
/// not check it.
pub fn pivots_are_nonsingular(coeffs: &InvariantCoeffs, dl_current: f64, c: f64) -> bool {
    const EPS: f64 = 1e-300;
    let dc = dl_current * c;
    let u11 = 1.0 + 0.5 * dc * coeffs.a_i;
    if u11.abs() < EPS {
        return false;
    }
    let u12 = 0.5 * dc * coeffs.a_q;
    let l21 = 0.5 * dc * coeffs.a_q / u11;
    let u22 = 1.0 + 0.5 * dc * coeffs.a_i - l21 * u12;
    if u22.abs() < EPS {
        return false;
    }
    let u23 = 0.5 * dc * coeffs.rho_v;
    let l32 = -0.5 * dc * coeffs.rho_v / u22;
    let u33 = 1.0 + 0.5 * dc * coeffs.a_i - l32 * u23;
    if u33.abs() < EPS {
        return false;
    }
    let u14 = 0.5 * dc * coeffs.a_v;
    let u24 = -l21 * u14;
    let u34 = 0.5 * dc * coeffs.rho_q - l32 * u24;
    let l41 = 0.5 * dc * coeffs.a_v / u11;
    let l42 = -l41 * u12 / u22;
    let l43 = (-0.5 * dc * coeffs.rho_q - l42 * u23) / u33;
    let u44 = 1.0 + 0.5 * dc * coeffs.a_i - l41 * u14 - l42 * u24 - l43 * u34;
    u44.abs() >= EPS
}
