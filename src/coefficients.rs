//! Polarized emission/absorption/Faraday coefficient evaluation (C7).

/// The sixteen synchrotron-coefficient functions of local plasma state, as
/// an external contract: the physical closure (thermal, kappa, power-law,
/// whatever a caller's plasma model prescribes) is supplied by the
/// implementor, not this crate -- `integrator.c` likewise calls out to
/// `j_I`/`j_Q`/`j_V`/`rho_Q`/`rho_V`/`absorption_coeff_TH` as externally
/// linked functions of `(theta_e, n_e, nu_p, b, pitch_ang)`.
pub trait CoefficientClosure: Sync {
    fn j_i(&self, theta_e: f64, n_e: f64, nu_p: f64, b: f64, pitch_ang: f64) -> f64;
    fn j_q(&self, theta_e: f64, n_e: f64, nu_p: f64, b: f64, pitch_ang: f64) -> f64;
    fn j_v(&self, theta_e: f64, n_e: f64, nu_p: f64, b: f64, pitch_ang: f64) -> f64;
    fn rho_q(&self, theta_e: f64, n_e: f64, nu_p: f64, b: f64, pitch_ang: f64) -> f64;
    fn rho_v(&self, theta_e: f64, n_e: f64, nu_p: f64, b: f64, pitch_ang: f64) -> f64;
    /// Thermal Kirchhoff-like closure turning an emission coefficient into
    /// an absorption coefficient (`absorption_coeff_TH` in the original).
    fn absorption_coeff_th(&self, j_nu: f64, nu_p: f64, theta_e: f64) -> f64;
}

/// The eleven invariant-form coefficients the transfer stepper (C9)
/// integrates: `(j_I, j_Q, j_U, j_V, rho_Q, rho_U, rho_V, a_I, a_Q, a_U,
/// a_V)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvariantCoeffs {
    pub j_i: f64,
    pub j_q: f64,
    pub j_u: f64,
    pub j_v: f64,
    pub rho_q: f64,
    pub rho_u: f64,
    pub rho_v: f64,
    pub a_i: f64,
    pub a_q: f64,
    pub a_u: f64,
    pub a_v: f64,
}

/// Evaluate all coefficients at a point and rescale them into
/// Lorentz-invariant form: `j /= nu_p^2`, `a *= nu_p`, `rho *= nu_p`.
/// `j_U` and `rho_U` are forced to zero -- a consequence of the tetrad
/// choice (the linear-polarization basis is aligned so U vanishes by
/// construction), not a physical closure result, mirrored verbatim from
/// `integrator.c: evaluate_coeffs`.
pub fn evaluate_invariant_coeffs(
    closure: &dyn CoefficientClosure,
    nu_p: f64,
    theta_e: f64,
    n_e: f64,
    b: f64,
    pitch_ang: f64,
) -> InvariantCoeffs {
    let mut j_i = closure.j_i(theta_e, n_e, nu_p, b, pitch_ang);
    let mut j_q = closure.j_q(theta_e, n_e, nu_p, b, pitch_ang);
    let mut j_u = 0.0;
    let mut j_v = closure.j_v(theta_e, n_e, nu_p, b, pitch_ang);

    let mut rho_q = closure.rho_q(theta_e, n_e, nu_p, b, pitch_ang);
    let rho_u = 0.0;
    let mut rho_v = closure.rho_v(theta_e, n_e, nu_p, b, pitch_ang);

    let mut a_i = closure.absorption_coeff_th(j_i, nu_p, theta_e);
    let mut a_q = closure.absorption_coeff_th(j_q, nu_p, theta_e);
    let mut a_u = closure.absorption_coeff_th(j_u, nu_p, theta_e);
    let mut a_v = closure.absorption_coeff_th(j_v, nu_p, theta_e);

    let nu2 = nu_p * nu_p;
    j_i /= nu2;
    j_q /= nu2;
    j_u /= nu2;
    j_v /= nu2;

    a_i *= nu_p;
    a_q *= nu_p;
    a_u *= nu_p;
    a_v *= nu_p;

    rho_q *= nu_p;
    rho_v *= nu_p;

    InvariantCoeffs {
        j_i,
        j_q,
        j_u,
        j_v,
        rho_q,
        rho_u,
        rho_v,
        a_i,
        a_q,
        a_u,
        a_v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantClosure;
    impl CoefficientClosure for ConstantClosure {
        fn j_i(&self, _t: f64, _n: f64, _nu: f64, _b: f64, _p: f64) -> f64 {
            2.0
        }
        fn j_q(&self, _t: f64, _n: f64, _nu: f64, _b: f64, _p: f64) -> f64 {
            0.5
        }
        fn j_v(&self, _t: f64, _n: f64, _nu: f64, _b: f64, _p: f64) -> f64 {
            0.1
        }
        fn rho_q(&self, _t: f64, _n: f64, _nu: f64, _b: f64, _p: f64) -> f64 {
            0.3
        }
        fn rho_v(&self, _t: f64, _n: f64, _nu: f64, _b: f64, _p: f64) -> f64 {
            0.2
        }
        fn absorption_coeff_th(&self, j_nu: f64, _nu_p: f64, _theta_e: f64) -> f64 {
            j_nu * 10.0
        }
    }

    #[test]
    fn u_components_are_forced_to_zero() {
        let closure = ConstantClosure;
        let c = evaluate_invariant_coeffs(&closure, 2.0, 10.0, 1.0, 1.0, 0.5);
        assert_eq!(c.j_u, 0.0);
        assert_eq!(c.rho_u, 0.0);
    }

    #[test]
    fn invariant_scaling_matches_manual_computation() {
        let closure = ConstantClosure;
        let nu_p = 3.0;
        let c = evaluate_invariant_coeffs(&closure, nu_p, 10.0, 1.0, 1.0, 0.5);
        assert!((c.j_i - 2.0 / (nu_p * nu_p)).abs() < 1e-12);
        assert!((c.a_i - (2.0 * 10.0) * nu_p).abs() < 1e-9);
        assert!((c.rho_q - 0.3 * nu_p).abs() < 1e-12);
    }
}
