//! Tetrad construction and Jones/Stokes transforms (C6).

use num_complex::Complex64;

/// An orthonormal observer tetrad at a spacetime point: `u[mu][nu]` raises
/// tetrad-frame indices to spacetime indices, `d[mu][nu]` is its dual
/// (lowers spacetime indices into the tetrad frame).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tetrad {
    pub u: [[f64; 4]; 4],
    pub d: [[f64; 4]; 4],
}

/// Builds an observer tetrad from the local spacetime point, photon wave
/// vector, plasma/observer four-velocity, and a reference ("up") vector.
/// Implementations are metric-specific (the original's `create_observer_tetrad`
/// is defined per coordinate system); this crate exposes it as a seam so a
/// Kerr-specific or camera-specific construction can be supplied without
/// `Tetrad` itself knowing about coordinates.
pub trait ObserverTetradFactory: Sync {
    fn create_observer_tetrad(
        &self,
        x: &[f64; 4],
        k: &[f64; 4],
        u_obs: &[f64; 4],
        up: &[f64; 4],
    ) -> [[f64; 4]; 4];

    fn create_tetrad_d(&self, x: &[f64; 4], tetrad_u: &[[f64; 4]; 4]) -> [[f64; 4]; 4];
}

/// `F^mu_spacetime = sum_j tetrad.u[mu][j] * f_tetrad[j]`, grounded in
/// `integrator.c: f_tetrad_to_f`.
pub fn tetrad_frame_to_f(tetrad: &Tetrad, f_tetrad: &[Complex64; 4]) -> [Complex64; 4] {
    let mut f_u = [Complex64::new(0.0, 0.0); 4];
    for i in 0..4 {
        for j in 0..4 {
            f_u[i] += tetrad.u[i][j] * f_tetrad[j];
        }
    }
    f_u
}

/// `f_tetrad[mu] = sum_j tetrad.d[j][mu] * F^j_spacetime`, grounded in
/// `integrator.c: f_to_f_tetrad`.
pub fn f_to_tetrad_frame(tetrad: &Tetrad, f_u: &[Complex64; 4]) -> [Complex64; 4] {
    let mut f_tetrad = [Complex64::new(0.0, 0.0); 4];
    for i in 0..4 {
        for j in 0..4 {
            f_tetrad[i] += tetrad.d[j][i] * f_u[j];
        }
    }
    f_tetrad
}

/// Jones (tetrad-frame polarization vector) to Stokes, per
/// `integrator.c: f_tetrad_to_stokes`. `f_tetrad[0]` and `f_tetrad[3]` are
/// unused by construction (the tetrad frame carries polarization only in
/// the 1,2 components); only `[1]` and `[2]` enter the Stokes parameters.
pub fn jones_to_stokes(iinv: f64, iinv_pol: f64, f_tetrad: &[Complex64; 4]) -> [f64; 4] {
    let f1 = f_tetrad[1];
    let f2 = f_tetrad[2];

    let s0 = iinv;
    let s1 = iinv_pol * (f1.norm() * f1.norm() - f2.norm() * f2.norm());
    let s2 = iinv_pol * (f1.conj() * f2 + f1 * f2.conj()).re;
    let s3 = iinv_pol * (Complex64::new(0.0, 1.0) * (f1.conj() * f2 - f1 * f2.conj())).re;

    [s0, s1, s2, s3]
}

/// Stokes to Jones (tetrad-frame polarization vector), per
/// `integrator.c: stokes_to_f_tetrad`. Falls back to `f_tetrad[2] = 1` when
/// `f_tetrad[1] == 0`, preserved verbatim from the original to avoid a
/// division by zero at exactly zero linear polarization fraction.
pub fn stokes_to_jones(stokes: &[f64; 4]) -> (f64, f64, [Complex64; 4]) {
    let iinv = stokes[0];
    let iinv_pol = (stokes[1] * stokes[1] + stokes[2] * stokes[2] + stokes[3] * stokes[3]).sqrt();

    let (qnorm, unorm, vnorm) = if iinv_pol > 0.0 {
        (
            stokes[1] / iinv_pol,
            stokes[2] / iinv_pol,
            stokes[3] / iinv_pol,
        )
    } else {
        (0.0, 0.0, 0.0)
    };

    let mut f_tetrad = [Complex64::new(0.0, 0.0); 4];
    f_tetrad[1] = Complex64::new(((1.0 + qnorm) / 2.0).sqrt(), 0.0);

    if f_tetrad[1] == Complex64::new(0.0, 0.0) {
        f_tetrad[2] = Complex64::new(1.0, 0.0);
    } else {
        f_tetrad[2] = Complex64::new(
            unorm / (2.0 * f_tetrad[1].re),
            -vnorm / (2.0 * f_tetrad[1].re),
        );
    }

    (iinv, iinv_pol, f_tetrad)
}
