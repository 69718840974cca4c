//! Explicit RK4 polarized transfer step (C9).

use num_complex::Complex64;

use crate::coefficients::InvariantCoeffs;
use crate::transfer::StokesVector;

/// Advances the Stokes vector `[I, Q, U, V]` one step of the linear ODE
/// `dS/dl = C*j - C*A(S)`, with constant coefficients over the step
/// (fixed `j`, `A`), via classic RK4. Grounded verbatim in
/// `integrator.c: pol_rte_rk4_step`.
pub fn pol_rte_rk4_step(
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
        rho_u: r_u,
        rho_v: r_v,
        a_i,
        a_q,
        a_u,
        a_v,
    } = *coeffs;

    let i0 = s_a[0];
    let q0 = s_a[1];
    let u0 = s_a[2];
    let v0 = s_a[3];

    let dc = dl_current * c;

    let rhs = |i: Complex64, q: Complex64, u: Complex64, v: Complex64| -> [Complex64; 4] {
        [
            dc * j_i - dc * (a_i * i + a_q * q + a_u * u + a_v * v),
            dc * j_q - dc * (a_q * i + a_i * q + r_v * u - r_u * v),
            dc * j_u - dc * (a_u * i - r_v * q + a_i * u + r_q * v),
            dc * j_v - dc * (a_v * i + r_u * q - r_q * u + a_i * v),
        ]
    };

    let k1 = rhs(i0, q0, u0, v0);
    let k2 = rhs(
        i0 + 0.5 * k1[0],
        q0 + 0.5 * k1[1],
        u0 + 0.5 * k1[2],
        v0 + 0.5 * k1[3],
    );
    let k3 = rhs(
        i0 + 0.5 * k2[0],
        q0 + 0.5 * k2[1],
        u0 + 0.5 * k2[2],
        v0 + 0.5 * k2[3],
    );
    let k4 = rhs(i0 + k3[0], q0 + k3[1], u0 + k3[2], v0 + k3[3]);

    let sixth = 1.0 / 6.0;
    [
        i0 + sixth * (k1[0] + 2.0 * k2[0] + 2.0 * k3[0] + k4[0]),
        q0 + sixth * (k1[1] + 2.0 * k2[1] + 2.0 * k3[1] + k4[1]),
        u0 + sixth * (k1[2] + 2.0 * k2[2] + 2.0 * k3[2] + k4[2]),
        v0 + sixth * (k1[3] + 2.0 * k2[3] + 2.0 * k3[3] + k4[3]),
    ]
}
