//! Adaptive affine-parameter step controller (C3).
//!
//! Ref. Dolence & Moscibrodzka 2009. Exact formula and the `1e-40`
//! floor-squared guard preserved verbatim from `integrator.c: stepsize`.

/// Produce a signed step `dlambda < 0` for backward integration, from
/// current position `x` and tangent vector `u`. `step_scale` is the
/// user-supplied `STEP` scale (C0's `RenderConfig::step_scale`).
///
/// `dlambda = -1 / (1/|dlambda_1| + 1/|dlambda_2| + 1/|dlambda_3|)`, where
/// `dlambda_1 = STEP/|u^1|`, `dlambda_2 = STEP*min(x^2, pi-x^2)/|u^2|`,
/// `dlambda_3 = STEP/|u^3|`. The `min(x^2, pi-x^2)` factor guards the polar
/// coordinate singularity.
pub fn adaptive_step(x: &[f64; 4], u: &[f64; 4], step_scale: f64) -> f64 {
    const SMALL: f64 = 1e-40;

    let dlx1 = step_scale / (u[1].abs() + SMALL * SMALL);
    let dlx2 = step_scale * x[2].min(std::f64::consts::PI - x[2]) / (u[2].abs() + SMALL * SMALL);
    let dlx3 = step_scale / (u[3].abs() + SMALL * SMALL);

    let idlx1 = 1.0 / (dlx1.abs() + SMALL * SMALL);
    let idlx2 = 1.0 / (dlx2.abs() + SMALL * SMALL);
    let idlx3 = 1.0 / (dlx3.abs() + SMALL * SMALL);

    -1.0 / (idlx1 + idlx2 + idlx3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn step_is_always_negative() {
        let x = [0.0, 10.0, FRAC_PI_2, 0.0];
        let u = [1.0, -0.5, 0.01, 0.02];
        assert!(adaptive_step(&x, &u, 0.02) < 0.0);
    }

    #[test]
    fn step_magnitude_shrinks_as_radial_velocity_grows() {
        let x = [0.0, 10.0, FRAC_PI_2, 0.0];
        let slow = adaptive_step(&x, &[1.0, 0.1, 0.0, 0.1], 0.02).abs();
        let fast = adaptive_step(&x, &[1.0, 10.0, 0.0, 0.1], 0.02).abs();
        assert!(fast <= slow);
    }

    #[test]
    fn step_contracts_near_pole() {
        let u = [1.0, 0.1, 0.3, 0.1];
        let equator = adaptive_step(&[0.0, 10.0, FRAC_PI_2, 0.0], &u, 0.02).abs();
        let near_pole = adaptive_step(&[0.0, 10.0, 1e-3, 0.0], &u, 0.02).abs();
        assert!(near_pole <= equator);
    }
}
