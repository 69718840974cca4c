//! Plasma sampling contract: local fluid state and the geometric
//! quantities derived from a photon's wave vector inside it.

/// Local plasma state at a spacetime point, grounded in `integrator.c:
/// get_fluid_params`'s out-parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidSample {
    pub n_e: f64,
    pub theta_e: f64,
    pub b_mag: f64,
    pub b_u: [f64; 4],
    pub u_plasma_u: [f64; 4],
    pub in_volume: bool,
}

/// Read-only, thread-safe access to plasma state and the two
/// wave-vector/magnetic-field geometric quantities the radiative transfer
/// orchestrator needs at every step. `pitch_angle` and `freq_in_plasma_frame`
/// are grouped onto this trait rather than standing alone as free
/// functions because both need exactly the fields a `FluidSample` already
/// carries -- the caller supplying fluid data is the natural place to also
/// supply the geometry built from it (`integrator.c`'s `pitch_angle` and
/// `freq_in_plasma_frame` are themselves free functions of the GRMHD model
/// module, called right after `get_fluid_params`).
pub trait FluidProvider: Sync {
    fn sample(&self, x: &[f64; 4]) -> FluidSample;

    /// Angle between the photon wave vector and the local magnetic field,
    /// in the plasma rest frame, in geometric units (`pitch_angle` in the
    /// original).
    fn pitch_angle(&self, x: &[f64; 4], k: &[f64; 4], b_u: &[f64; 4], u_plasma_u: &[f64; 4])
        -> f64;

    /// Photon frequency measured in the plasma rest frame:
    /// `nu_p = -(k_d . u_plasma)` up to the caller's normalization
    /// (`freq_in_plasma_frame` in the original).
    fn freq_in_plasma_frame(&self, u_plasma_u: &[f64; 4], k_d: &[f64; 4]) -> f64;
}
