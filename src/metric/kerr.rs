//! Kerr spacetime metric for a rotating black hole.
//!
//! Implements the full Kerr solution in both Boyer-Lindquist and Kerr-Schild
//! coordinate systems, each optionally integrated in a logarithmic radial
//! coordinate. This is the primary metric used for astrophysical black holes.
//!
//! # References
//!
//! - Kerr, R. P. (1963). "Gravitational field of a spinning mass"
//! - Bardeen, Press & Teukolsky (1972). "Rotating Black Holes: ISCO and Photon Orbits"
//! - Visser, M. (2007). "The Kerr spacetime: A Brief Introduction"

use crate::metric::{Metric, Orbit};
use crate::tensor::MetricTensor4;

/// Coordinate system for the Kerr metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateSystem {
    /// Boyer-Lindquist coordinates. Standard, but singular at the event horizon.
    BoyerLindquist,
    /// Kerr-Schild (ingoing) coordinates. Non-singular at the event horizon.
    KerrSchild,
}

/// A Kerr (rotating) black hole spacetime.
///
/// # Example
///
/// ```
/// use gravitas::metric::{Kerr, Orbit, Metric};
///
/// let bh = Kerr::new(1.0, 0.9);
/// assert!((bh.event_horizon() - 1.4358898944).abs() < 1e-6);
/// assert!((bh.isco(Orbit::Prograde) - 2.3209).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Kerr {
    mass_val: f64,
    spin_val: f64,
    coords: CoordinateSystem,
    logscale: bool,
}

impl Kerr {
    /// Create a new Kerr black hole metric in Boyer-Lindquist coordinates,
    /// integrated directly in `r`.
    ///
    /// # Arguments
    /// - `mass` -- Black hole mass in geometric units (M)
    /// - `spin` -- Dimensionless spin parameter a* = J/M^2, clamped to [-1, 1]
    pub fn new(mass: f64, spin: f64) -> Self {
        Self {
            mass_val: mass,
            spin_val: spin.clamp(-1.0, 1.0),
            coords: CoordinateSystem::BoyerLindquist,
            logscale: false,
        }
    }

    /// Create a Kerr metric in Kerr-Schild coordinates (non-singular at horizon).
    pub fn kerr_schild(mass: f64, spin: f64) -> Self {
        Self {
            mass_val: mass,
            spin_val: spin.clamp(-1.0, 1.0),
            coords: CoordinateSystem::KerrSchild,
            logscale: false,
        }
    }

    /// Switch this metric to integrate in `x[1] = ln(r)` rather than `r`
    /// directly. [`Metric::radius`] and the tensor components both fold the
    /// logarithmic-coordinate jacobian away so callers never branch on it.
    pub fn with_logscale(mut self, logscale: bool) -> Self {
        self.logscale = logscale;
        self
    }

    /// Get the coordinate system in use.
    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.coords
    }

    /// Whether this metric integrates in a logarithmic radial coordinate.
    pub fn is_logscale(&self) -> bool {
        self.logscale
    }

    /// Geometric spin parameter a = a* * M.
    #[inline]
    pub fn a(&self) -> f64 {
        self.spin_val * self.mass_val
    }

    /// Inner (Cauchy) horizon: r_- = M - sqrt(M^2 - a^2).
    pub fn cauchy_horizon(&self) -> f64 {
        let m = self.mass_val;
        let a = self.a();
        let disc = m * m - a * a;
        if disc < 0.0 {
            0.0
        } else {
            m - disc.sqrt()
        }
    }

    /// Photon sphere radius (prograde circular photon orbit).
    ///
    /// r_ph = 2M * [1 + cos(2/3 * arccos(-a*))]
    pub fn photon_sphere(&self) -> f64 {
        let term = (2.0 / 3.0) * (-self.spin_val).acos();
        2.0 * self.mass_val * (1.0 + term.cos())
    }

    /// Innermost Stable Circular Orbit (ISCO) using the Bardeen-Press-Teukolsky formula.
    ///
    /// # Arguments
    /// - `orbit` -- Prograde (co-rotating) or Retrograde (counter-rotating)
    pub fn isco(&self, orbit: Orbit) -> f64 {
        let a_star = self.spin_val;
        let m = self.mass_val;

        if a_star.abs() < 1e-6 {
            return m * 6.0;
        }

        let a2 = a_star * a_star;
        let z1 = 1.0
            + (1.0 - a2).powf(1.0 / 3.0)
                * ((1.0 + a_star).powf(1.0 / 3.0) + (1.0 - a_star).powf(1.0 / 3.0));
        let z2 = (3.0 * a2 + z1 * z1).sqrt();

        let sign = match orbit {
            Orbit::Prograde => -1.0,
            Orbit::Retrograde => 1.0,
        };

        let disc = (3.0 - z1) * (3.0 + z1 + 2.0 * z2);
        let root = if disc < 0.0 { 0.0 } else { disc.sqrt() };

        m * (3.0 + z2 + sign * root)
    }

    /// Angular velocity of frame dragging at the equator.
    ///
    /// omega = 2Ma / (r^3 + a^2*r + 2Ma^2)
    pub fn frame_dragging_equator(&self, r: f64) -> f64 {
        let a = self.a();
        let m = self.mass_val;
        let num = 2.0 * m * a;
        let den = r.powi(3) + a.powi(2) * r + 2.0 * m * a.powi(2);
        if den.abs() < 1e-30 {
            0.0
        } else {
            num / den
        }
    }

    /// Angular velocity of frame dragging at arbitrary (r, theta).
    ///
    /// omega = -g_{t phi} / g_{phi phi}
    pub fn frame_dragging(&self, r: f64, theta: f64) -> f64 {
        let g = self.covariant_bl(r, theta);
        let g_tph = g.get(0, 3);
        let g_phph = g.get(3, 3);
        if g_phph.abs() < 1e-30 {
            0.0
        } else {
            -g_tph / g_phph
        }
    }

    /// Ergosphere radius at angle theta.
    ///
    /// r_ergo = M + sqrt(M^2 - a^2 cos^2(theta))
    pub fn ergosphere(&self, theta: f64) -> f64 {
        let m = self.mass_val;
        let a = self.a();
        let cos_theta = theta.cos();
        let disc = m * m - a * a * cos_theta * cos_theta;
        if disc < 0.0 {
            m
        } else {
            m + disc.sqrt()
        }
    }

    /// Keplerian orbital angular frequency at radius r (equatorial circular orbit).
    ///
    /// Omega_K = sqrt(M) / (r^{3/2} + a * sqrt(M))
    pub fn keplerian_frequency(&self, r: f64) -> f64 {
        let m = self.mass_val;
        let a = self.a();
        m.sqrt() / (r.powf(1.5) + a * m.sqrt())
    }

    /// Gravitational time dilation factor for a static observer at (r, theta).
    ///
    /// Returns dt_proper / dt_coordinate = sqrt(-g_{tt})
    pub fn time_dilation(&self, r: f64, theta: f64) -> f64 {
        let g_tt = self.covariant_bl(r, theta).get(0, 0);
        if g_tt >= 0.0 {
            0.0
        } else {
            (-g_tt).sqrt()
        }
    }

    /// Sigma = r^2 + a^2 cos^2(theta). Appears in every Kerr metric component.
    #[inline]
    pub fn sigma(&self, r: f64, theta: f64) -> f64 {
        let a = self.a();
        r * r + a * a * theta.cos().powi(2)
    }

    /// Delta = r^2 - 2Mr + a^2. Zero at the event horizons.
    #[inline]
    pub fn delta(&self, r: f64) -> f64 {
        let a = self.a();
        r * r - 2.0 * self.mass_val * r + a * a
    }

    /// Rescale the `r`-indexed row/column of a tensor by `jac`, folding a
    /// logarithmic radial coordinate's jacobian into an otherwise
    /// physical-r tensor. Works for both covariant (`jac = r`) and
    /// contravariant (`jac = 1/r`) tensors since the diagonal entry picks
    /// up `jac^2` automatically from both the row and column scaling.
    fn scale_radial_index(mut g: MetricTensor4, jac: f64) -> MetricTensor4 {
        for nu in 0..4 {
            if nu != 1 {
                let v = g.get(1, nu) * jac;
                g.set(1, nu, v);
                g.set(nu, 1, v);
            }
        }
        let v11 = g.get(1, 1) * jac * jac;
        g.set(1, 1, v11);
        g
    }
}

impl Metric for Kerr {
    fn covariant(&self, x: &[f64; 4]) -> MetricTensor4 {
        let r = self.radius(x);
        let theta = x[2];
        let g = match self.coords {
            CoordinateSystem::BoyerLindquist => self.covariant_bl(r, theta),
            CoordinateSystem::KerrSchild => self.covariant_ks(r, theta),
        };
        if self.logscale {
            Self::scale_radial_index(g, r)
        } else {
            g
        }
    }

    fn contravariant(&self, x: &[f64; 4]) -> MetricTensor4 {
        let r = self.radius(x);
        let theta = x[2];
        let g = match self.coords {
            CoordinateSystem::BoyerLindquist => self.contravariant_bl(r, theta),
            CoordinateSystem::KerrSchild => self.contravariant_ks(r, theta),
        };
        if self.logscale {
            Self::scale_radial_index(g, 1.0 / r)
        } else {
            g
        }
    }

    fn radius(&self, x: &[f64; 4]) -> f64 {
        if self.logscale {
            x[1].exp()
        } else {
            x[1]
        }
    }

    fn mass(&self) -> f64 {
        self.mass_val
    }

    fn spin(&self) -> f64 {
        self.spin_val
    }
}

// ========================================================================
// Boyer-Lindquist implementation
// ========================================================================
impl Kerr {
    fn covariant_bl(&self, r: f64, theta: f64) -> MetricTensor4 {
        let m = self.mass_val;
        let a = self.a();
        let r2 = r * r;
        let a2 = a * a;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();
        let sin2 = sin_theta * sin_theta;
        let cos2 = cos_theta * cos_theta;

        let sigma = r2 + a2 * cos2;
        let delta = r2 - 2.0 * m * r + a2;

        let g_tt = -(1.0 - (2.0 * m * r) / sigma);
        let g_rr = sigma / delta;
        let g_thth = sigma;
        let g_phph = (r2 + a2 + (2.0 * m * r * a2 * sin2) / sigma) * sin2;
        let g_tph = -(2.0 * m * r * a * sin2) / sigma;

        MetricTensor4::from_array([
            g_tt, 0.0, 0.0, g_tph, //
            0.0, g_rr, 0.0, 0.0, //
            0.0, 0.0, g_thth, 0.0, //
            g_tph, 0.0, 0.0, g_phph,
        ])
    }

    fn contravariant_bl(&self, r: f64, theta: f64) -> MetricTensor4 {
        let m = self.mass_val;
        let a = self.a();
        let r2 = r * r;
        let a2 = a * a;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();
        let sin2 = sin_theta * sin_theta;
        let cos2 = cos_theta * cos_theta;

        let sigma = r2 + a2 * cos2;
        let delta = r2 - 2.0 * m * r + a2;

        let g_tt = -((sigma * (r2 + a2) + 2.0 * m * r * a2 * sin2) / (delta * sigma));
        let g_rr = delta / sigma;
        let g_thth = 1.0 / sigma;
        let g_phph = if sin2 < 1e-9 {
            0.0
        } else {
            (delta - a2 * sin2) / (delta * sigma * sin2)
        };
        let g_tph = -(2.0 * m * r * a) / (delta * sigma);

        MetricTensor4::from_array([
            g_tt, 0.0, 0.0, g_tph, //
            0.0, g_rr, 0.0, 0.0, //
            0.0, 0.0, g_thth, 0.0, //
            g_tph, 0.0, 0.0, g_phph,
        ])
    }
}

// ========================================================================
// Kerr-Schild implementation (non-singular at horizon)
// ========================================================================
impl Kerr {
    fn covariant_ks(&self, r: f64, theta: f64) -> MetricTensor4 {
        let m = self.mass_val;
        let a = self.a();
        let r2 = r * r;
        let a2 = a * a;
        let cos2 = theta.cos().powi(2);
        let sin2 = 1.0 - cos2;
        let sigma = r2 + a2 * cos2;

        let h = (m * r) / sigma;
        let l_r = sigma / (r2 + a2);
        let l = [1.0, l_r, 0.0, -a * sin2];

        let eta_tt = -1.0;
        let eta_rr = sigma / (r2 + a2);
        let eta_thth = sigma;
        let eta_phph = (r2 + a2) * sin2;

        let mut g = [0.0; 16];
        g[0] = eta_tt + 2.0 * h * l[0] * l[0];
        g[1] = 2.0 * h * l[0] * l[1];
        g[3] = 2.0 * h * l[0] * l[3];
        g[4] = 2.0 * h * l[1] * l[0];
        g[5] = eta_rr + 2.0 * h * l[1] * l[1];
        g[7] = 2.0 * h * l[1] * l[3];
        g[10] = eta_thth;
        g[12] = 2.0 * h * l[3] * l[0];
        g[13] = 2.0 * h * l[3] * l[1];
        g[15] = eta_phph + 2.0 * h * l[3] * l[3];

        MetricTensor4::from_array(g)
    }

    fn contravariant_ks(&self, r: f64, theta: f64) -> MetricTensor4 {
        let m = self.mass_val;
        let a = self.a();
        let r2 = r * r;
        let a2 = a * a;
        let sin2 = theta.sin().powi(2).max(1e-12);
        let cos2 = 1.0 - sin2;
        let sigma = r2 + a2 * cos2;
        let delta = r2 - 2.0 * m * r + a2;

        let g_tt = -(1.0 + 2.0 * m * r / sigma);
        let g_tr = 2.0 * m * r / sigma;
        let g_rr = delta / sigma;
        let g_thth = 1.0 / sigma;
        let g_phph = 1.0 / (sigma * sin2);
        let g_rph = a / sigma;

        let mut g = [0.0; 16];
        g[0] = g_tt;
        g[1] = g_tr;
        g[4] = g_tr;
        g[5] = g_rr;
        g[7] = g_rph;
        g[10] = g_thth;
        g[13] = g_rph;
        g[15] = g_phph;

        MetricTensor4::from_array(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_schwarzschild_isco() {
        let bh = Kerr::new(1.0, 0.0);
        let isco = bh.isco(Orbit::Prograde);
        assert!((isco - 6.0).abs() < 1e-6, "Schwarzschild ISCO should be 6M, got {}", isco);
    }

    #[test]
    fn test_extreme_kerr_isco() {
        let bh = Kerr::new(1.0, 0.998);
        let isco = bh.isco(Orbit::Prograde);
        // For a* = 0.998, prograde ISCO should be approximately 1.24M
        assert!(isco < 1.5, "Extreme Kerr prograde ISCO should be < 1.5M, got {}", isco);
    }

    #[test]
    fn test_event_horizon() {
        let bh = Kerr::new(1.0, 0.0);
        assert!((bh.event_horizon() - 2.0).abs() < 1e-12, "Schwarzschild horizon = 2M");

        let bh = Kerr::new(1.0, 1.0);
        assert!((bh.event_horizon() - 1.0).abs() < 1e-12, "Extreme Kerr horizon = M");
    }

    #[test]
    fn test_photon_sphere() {
        let bh = Kerr::new(1.0, 0.0);
        let rph = bh.photon_sphere();
        assert!((rph - 3.0).abs() < 1e-6, "Schwarzschild photon sphere = 3M, got {}", rph);
    }

    #[test]
    fn test_metric_signature() {
        let bh = Kerr::new(1.0, 0.5);
        let x = [0.0, 10.0, FRAC_PI_2, 0.0];
        let g = bh.covariant(&x);
        // g_tt should be negative (timelike)
        assert!(g[(0, 0)] < 0.0, "g_tt should be negative at r=10M");
        // g_rr, g_thth, g_phph should be positive (spacelike)
        assert!(g[(1, 1)] > 0.0, "g_rr should be positive");
        assert!(g[(2, 2)] > 0.0, "g_thth should be positive");
        assert!(g[(3, 3)] > 0.0, "g_phph should be positive");
    }

    #[test]
    fn test_bl_ks_agree_on_invariant_contraction() {
        let bl = Kerr::new(1.0, 0.5);
        let ks = Kerr::kerr_schild(1.0, 0.5);
        let r = 10.0;
        let theta = FRAC_PI_2;
        let x = [0.0, r, theta, 0.0];
        let u = [1.02, 0.0, 0.0, 0.03];

        let norm_bl = bl.covariant(&x).contract(&u);
        let norm_ks = ks.covariant(&x).contract(&u);
        assert!(
            (norm_bl - norm_ks).abs() < 1e-6,
            "BL and KS metrics should agree on a coordinate-independent norm far from the horizon: {} vs {}",
            norm_bl,
            norm_ks
        );
    }

    #[test]
    fn test_logscale_radius_round_trips() {
        let bh = Kerr::new(1.0, 0.5).with_logscale(true);
        let x = [0.0, 10.0_f64.ln(), FRAC_PI_2, 0.0];
        assert!((bh.radius(&x) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_logscale_preserves_contraction() {
        let plain = Kerr::new(1.0, 0.5);
        let logged = Kerr::new(1.0, 0.5).with_logscale(true);
        let r = 12.0;
        let theta = 1.1;
        let x_plain = [0.0, r, theta, 0.0];
        let x_log = [0.0, r.ln(), theta, 0.0];

        // u_log is the image of u_plain under dr -> d(ln r) = dr / r.
        let u_plain = [1.0, 0.2, 0.0, 0.05];
        let u_log = [1.0, 0.2 * r, 0.0, 0.05];

        let norm_plain = plain.covariant(&x_plain).contract(&u_plain);
        let norm_log = logged.covariant(&x_log).contract(&u_log);
        assert!(
            (norm_plain - norm_log).abs() < 1e-6,
            "logscale metric should reproduce the same invariant norm: {} vs {}",
            norm_plain,
            norm_log
        );
    }

    #[test]
    fn test_connection_reduces_to_schwarzschild_at_zero_spin() {
        use crate::metric::Schwarzschild;
        let kerr = Kerr::new(1.0, 0.0);
        let schw = Schwarzschild::new(1.0);
        let x = [0.0, 8.0, 1.0, 0.2];
        let gamma_kerr = kerr.connection(&x);
        let gamma_schw = schw.connection(&x);
        for alpha in 0..4 {
            for mu in 0..4 {
                for nu in 0..4 {
                    assert!(
                        (gamma_kerr[alpha][mu][nu] - gamma_schw[alpha][mu][nu]).abs() < 1e-3,
                        "mismatch at [{alpha}][{mu}][{nu}]"
                    );
                }
            }
        }
    }
}
