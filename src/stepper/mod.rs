//! Fixed-order integrators parameterized by a right-hand-side functor.
//!
//! `PhaseVector` is the minimal shape a state needs to be advanced by
//! [`step_rk4`] or [`step_rk2_midpoint`]: componentwise addition scaled by a
//! step length. Both [`crate::geodesic::GeodesicState`] and the coupled
//! geodesic-plus-polarization state implement it, so one set of stepper
//! functions serves the plain geodesic tracer and the polarization
//! transport alongside it. [`VelocityVerlet`] additionally exposes the
//! position/velocity split that `step_velocity_verlet` needs; no internal
//! error estimation happens at this layer; robustness is the adaptive step
//! controller's job (C3).

/// A state advanceable by `self + h * derivative`, componentwise.
pub trait PhaseVector: Copy {
    /// `self + h * other`.
    fn add_scaled(&self, other: &Self, h: f64) -> Self;
}

/// A [`PhaseVector`] that additionally splits into position and velocity
/// halves, as required by velocity-Verlet.
pub trait VelocityVerlet: PhaseVector {
    fn positions(&self) -> [f64; 4];
    fn velocities(&self) -> [f64; 4];
    fn from_parts(positions: [f64; 4], velocities: [f64; 4]) -> Self;
}

/// Standard 4th-order Runge-Kutta: stage weights (1/2, 1/2, 1, 0), final
/// combination (1, 2, 2, 1)/6.
pub fn step_rk4<S>(y: &S, mut rhs: impl FnMut(&S) -> S, dt: f64) -> S
where
    S: PhaseVector,
{
    let k1 = rhs(y);
    let y2 = y.add_scaled(&k1, 0.5 * dt);
    let k2 = rhs(&y2);
    let y3 = y.add_scaled(&k2, 0.5 * dt);
    let k3 = rhs(&y3);
    let y4 = y.add_scaled(&k3, dt);
    let k4 = rhs(&y4);

    y.add_scaled(&k1, dt / 6.0)
        .add_scaled(&k2, dt / 3.0)
        .add_scaled(&k3, dt / 3.0)
        .add_scaled(&k4, dt / 6.0)
}

/// Midpoint RK2: stage weight 1/2 for the single intermediate stage; the
/// final update equals k2 alone.
pub fn step_rk2_midpoint<S>(y: &S, mut rhs: impl FnMut(&S) -> S, dt: f64) -> S
where
    S: PhaseVector,
{
    let k1 = rhs(y);
    let y2 = y.add_scaled(&k1, 0.5 * dt);
    let k2 = rhs(&y2);
    y.add_scaled(&k2, dt)
}

/// Velocity-Verlet per Dolence et al. 2009 eq 14a-14d: position advances by
/// `v*dl + 1/2*a*dl^2`; velocity is the average of `a(lambda)` and
/// `a(lambda + dl)`. `rhs`'s output velocity slot must carry acceleration,
/// matching the input's velocity-slot convention.
pub fn step_velocity_verlet<S>(y: &S, mut rhs: impl FnMut(&S) -> S, dl: f64) -> S
where
    S: VelocityVerlet,
{
    let d0 = rhs(y);
    let a0 = d0.velocities();
    let pos0 = y.positions();
    let vel0 = y.velocities();

    let mut new_pos = [0.0; 4];
    let mut mid_vel = [0.0; 4];
    for i in 0..4 {
        new_pos[i] = pos0[i] + dl * vel0[i] + 0.5 * dl * dl * a0[i];
        mid_vel[i] = vel0[i] + a0[i] * dl;
    }

    let y_mid = S::from_parts(new_pos, mid_vel);
    let d1 = rhs(&y_mid);
    let a1 = d1.velocities();

    let mut final_vel = [0.0; 4];
    for i in 0..4 {
        final_vel[i] = vel0[i] + 0.5 * (a0[i] + a1[i]) * dl;
    }

    S::from_parts(new_pos, final_vel)
}
