//! Stiffness detector for the linearized polarized transfer operator (C8).

use num_complex::Complex64;

use crate::coefficients::InvariantCoeffs;

/// Flags a transfer step STIFF if any of the four eigenvalue-linearized
/// transfer-matrix magnitudes exceeds `STIFFTHRESH` (0.99 in the
/// original), via the same quartic Taylor-expansion magnitude test as
/// `integrator.c: check_stiffness`.
pub fn check_stiffness(coeffs: &InvariantCoeffs, dl_current: f64, threshold: f64) -> bool {
    let InvariantCoeffs {
        rho_q: r_q,
        rho_v: r_v,
        a_q,
        a_v,
        a_i,
        ..
    } = *coeffs;

    let a2 = r_q * r_q + r_v * r_v - a_q * a_q - a_v * a_v;
    let a0 = -2.0 * a_v * a_q * r_v * r_q - a_q * a_q * r_q * r_q - a_v * a_v * r_v * r_v;

    let disc = Complex64::new(a2 * a2 - 4.0 * a0, 0.0).sqrt();
    let zplus = (-a2 + disc) / 2.0;
    let zminus = (-a2 - disc) / 2.0;

    let ai = Complex64::new(a_i, 0.0);
    let l1 = ai + zplus.sqrt();
    let l2 = ai - zplus.sqrt();
    let l3 = ai + zminus.sqrt();
    let l4 = ai - zminus.sqrt();

    [l1, l2, l3, l4].iter().any(|l| {
        let tau = dl_current * l;
        let mag = Complex64::new(1.0, 0.0)
            + tau
            + 0.5 * tau * tau
            + (1.0 / 6.0) * tau * tau * tau
            + (1.0 / 24.0) * tau * tau * tau * tau;
        mag.norm() > threshold
    })
}
