//! Physical constants in both geometric (G = c = 1) and CGS unit systems.
//!
//! The geodesic tracer (C2-C4) works entirely in geometric units. The
//! radiative-transfer orchestrator (C10) crosses into CGS partway through
//! each sample, scaling the wave vector by `h*nu/(m_e c^2)` — the CGS
//! constants below are exactly the set that unit crossing needs.

// ============================================================================
// Geometric units (G = c = 1)
// ============================================================================

/// Speed of light in geometric units.
pub const C: f64 = 1.0;

/// Gravitational constant in geometric units.
pub const G: f64 = 1.0;

// ============================================================================
// CGS units (radiative transfer, emission/absorption closures)
// ============================================================================

/// Electron charge, esu.
pub const ELECTRON_CHARGE: f64 = 4.803_204_25e-10;

/// Electron rest mass, g.
pub const ELECTRON_MASS: f64 = 9.109_382_9e-28;

/// Proton rest mass, g.
pub const PROTON_MASS: f64 = 1.672_621_9e-24;

/// Boltzmann constant, erg/K.
pub const BOLTZMANN_CONSTANT: f64 = 1.380_648_8e-16;

/// Speed of light, cm/s.
pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e10;

/// Planck constant, erg*s.
pub const PLANCK_CONSTANT: f64 = 6.626_068_85e-27;

/// Newton's gravitational constant, cm^3 g^-1 s^-2.
pub const GGRAV: f64 = 6.674e-8;

/// Solar mass, g.
pub const MSUN: f64 = 1.989e33;

/// Thomson scattering cross section, cm^2.
pub const SIGMA_THOMSON: f64 = 0.665_245_873e-24;

/// Proton-to-electron mass ratio.
pub const M_P_OVER_M_E: f64 = PROTON_MASS / ELECTRON_MASS;

/// `m_e c^2 / h` — the factor that converts a photon frequency (Hz) into the
/// dimensionless energy scale a geometric wave vector is multiplied by
/// before it can be combined with CGS emission/absorption coefficients.
///
/// Used as `k_u *= PLANCK_CONSTANT * nu / (ELECTRON_MASS * SPEED_OF_LIGHT^2)`
/// (and `dl_current` by the reciprocal) at the geometric -> CGS boundary in
/// the transfer orchestrator (C10 step 4).
pub const ELECTRON_REST_ENERGY: f64 = ELECTRON_MASS * SPEED_OF_LIGHT * SPEED_OF_LIGHT;

/// Gravitational radius of a black hole of mass `m_bh_grams`, in cm.
///
/// `Rg = G M / c^2`; this is the length unit the affine-parameter step
/// `dlambda` is expressed in before the radiative-transfer CGS conversion.
#[inline]
pub fn gravitational_radius_cm(m_bh_grams: f64) -> f64 {
    GGRAV * m_bh_grams / (SPEED_OF_LIGHT * SPEED_OF_LIGHT)
}
