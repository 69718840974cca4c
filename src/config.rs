//! Immutable configuration threaded through every component.
//!
//! Grounded in the `IntegrationOptions`-style plain record this crate's
//! original geodesic integrator used, extended with the radiative-transfer
//! knobs from `integrator.c`/`definitions.h` (`max_order`,
//! `RT_OUTER_CUTOFF`, the stiffness threshold, the zero-polarization
//! floor). No process-wide mutable state; a `RenderConfig` is constructed
//! once per render and passed by reference.

use crate::error::ConfigError;

/// Integration method selecting how the geodesic tracer (C4) advances a
/// state by the step `adaptive_step` (C3) produces. This is a method
/// selector only -- the step length itself is always the adaptive one;
/// no variant carries its own fixed step size (`integrator.c` likewise
/// calls `rk4_step`/`verlet_step` with `dlambda_adaptive` regardless of
/// which method is compiled in).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationMethod {
    /// 2nd-order midpoint Runge-Kutta.
    Rk2,
    /// 4th-order Runge-Kutta (the default in the original RAPTOR build).
    Rk4,
    /// Velocity-Verlet (Dolence et al. 2009 eq 14a-14d).
    Verlet,
}

/// Immutable render configuration: the build/configuration surface of the
/// tracer and transfer orchestrator, realized as a value type instead of
/// process-wide constants (the `#define`s of `definitions.h`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// `STEP` in `stepsize()` — the affine-parameter step-size scale.
    pub step_scale: f64,
    /// Hard cap on recorded samples per pixel (`max_steps`, default 1e4).
    pub max_steps: usize,
    /// Inner radial termination bound (`cutoff_inner`, BL/KS dependent).
    pub cutoff_inner: f64,
    /// Outer radial termination bound for the geodesic tracer
    /// (`cutoff_outer`, distinct from `rt_outer_cutoff` below).
    pub cutoff_outer: f64,
    /// Maximum number of `U^2` sign flips before order-culling terminates
    /// the ray (`max_order`).
    pub max_order: u32,
    /// Method used to advance the geodesic (C4).
    pub geodesic_method: IntegrationMethod,
    /// Whether the transfer orchestrator runs the polarized pass (C5-C10)
    /// or only the scalar legacy path.
    pub polarization_enabled: bool,
    /// Radius beyond which the polarized transfer pass skips the plasma
    /// update for a sample (`OUTER_BOUND_POL` in the original, a distinct
    /// constant from `cutoff_outer` — see DESIGN.md Open Questions).
    pub rt_outer_cutoff: f64,
    /// Threshold on `|M(tau)|` above which C8 flags a sample STIFF
    /// (`STIFFTHRESH`, 0.99 in the original).
    pub stiffness_threshold: f64,
    /// Floor on `I_inv^pol` below which the polarization-active latch is
    /// cleared (`1e-100` in the original).
    pub zero_polarization_floor: f64,
}

impl RenderConfig {
    /// Validate the configuration, mirroring the invariants the original
    /// C preprocessor constants enforced implicitly by construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_scale <= 0.0 {
            return Err(ConfigError::NonPositiveStepScale(self.step_scale));
        }
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroMaxSteps(self.max_steps));
        }
        if self.cutoff_inner <= 0.0 {
            return Err(ConfigError::NonPositiveCutoffInner(self.cutoff_inner));
        }
        if self.cutoff_inner >= self.cutoff_outer {
            return Err(ConfigError::InvertedCutoffs {
                inner: self.cutoff_inner,
                outer: self.cutoff_outer,
            });
        }
        if self.rt_outer_cutoff <= 0.0 {
            return Err(ConfigError::NonPositiveRtOuterCutoff(self.rt_outer_cutoff));
        }
        if !(0.0..1.0).contains(&self.stiffness_threshold) {
            return Err(ConfigError::StiffnessThresholdOutOfRange(
                self.stiffness_threshold,
            ));
        }
        if self.zero_polarization_floor <= 0.0 {
            return Err(ConfigError::NonPositiveZeroPolarizationFloor(
                self.zero_polarization_floor,
            ));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    /// Defaults mirror `definitions.h`: `rcam = 1e4`, `max_order = 100`,
    /// `RT_OUTER_CUTOFF = 1000`, `cutoff_outer = 1.1 * rcam`.
    fn default() -> Self {
        Self {
            step_scale: 0.01,
            max_steps: 10_000,
            cutoff_inner: 1.0 + 1e-2,
            cutoff_outer: 1.1e4,
            max_order: 100,
            geodesic_method: IntegrationMethod::Rk4,
            polarization_enabled: true,
            rt_outer_cutoff: 1000.0,
            stiffness_threshold: 0.99,
            zero_polarization_floor: 1e-100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_cutoffs() {
        let mut cfg = RenderConfig::default();
        cfg.cutoff_inner = 100.0;
        cfg.cutoff_outer = 10.0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvertedCutoffs {
                inner: 100.0,
                outer: 10.0
            })
        );
    }

    #[test]
    fn rejects_zero_max_steps() {
        let mut cfg = RenderConfig::default();
        cfg.max_steps = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroMaxSteps(0)));
    }

    #[test]
    fn rejects_stiffness_threshold_out_of_range() {
        let mut cfg = RenderConfig::default();
        cfg.stiffness_threshold = 1.5;
        assert!(cfg.validate().is_err());
    }
}
