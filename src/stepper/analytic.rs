//! Closed-form solution of `dx/dt = u0 + du*(x - x0)` and the six-way
//! exit-time comparison that picks the next event for
//! [`super::AnalyticStepper`].

use super::particle::VelocitySample;
use super::ParticleState;

/// Position at time `t` along an axis whose velocity is linear in the
/// axis's own local coordinate: `u(x) = u0 + du*(x - x0)`, where `u0`
/// is the velocity sampled at the particle's own starting position
/// `x0` (not at the cell center).
///
/// Falls back to the `du = 0` (uniform velocity) case rather than
/// dividing by zero.
#[must_use]
pub fn stationary(t: f64, u0: f64, du: f64, x0: f64) -> f64 {
    if du == 0.0 {
        u0.mul_add(t, x0)
    } else {
        u0 / du * (du * t).exp_m1() + x0
    }
}

/// Time needed to reach `bound` from `x0` under the same ODE as
/// [`stationary`]. Returns `f64::NAN` if that boundary is never
/// reached (velocity carries the particle away from it, or it is
/// already stationary short of it).
#[must_use]
fn exit_time_to(bound: f64, u0: f64, du: f64, x0: f64) -> f64 {
    if du == 0.0 {
        if u0 == 0.0 {
            return f64::NAN;
        }
        return (bound - x0) / u0;
    }
    let ratio = du.mul_add((bound - x0) / u0, 1.0);
    if ratio <= 0.0 {
        return f64::NAN;
    }
    ratio.ln() / du
}

/// Exit times to the low and high bound of an axis, in that order.
#[must_use]
pub fn exit_time(lo: f64, hi: f64, u0: f64, du: f64, x0: f64) -> (f64, f64) {
    (exit_time_to(lo, u0, du, x0), exit_time_to(hi, u0, du, x0))
}

/// Which boundary (if any) a step's event corresponds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitKind {
    /// Exited through the home cell's west edge; enters the
    /// neighboring cell from its east side.
    Left,
    /// Exited through the east edge.
    Right,
    /// Exited through the south edge.
    Down,
    /// Exited through the north edge.
    Up,
    /// Crossed into the layer above (shallower).
    LayerUp,
    /// Crossed into the layer below (deeper).
    LayerDown,
    /// Reached the requested time horizon before any boundary.
    WallTime,
}

/// The resolved next event: how far to advance and what happens then.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExitEvent {
    /// Duration to advance by.
    pub dt: f64,
    /// What happens at the end of that duration.
    pub kind: ExitKind,
}

/// Finds the earliest of the six possible boundary crossings (or the
/// time horizon `tf`, whichever comes first) for `particle` under
/// `sample`.
///
/// `tf` may be negative (stepping the particle backward in time);
/// candidates are filtered to the ones whose sign matches `tf`'s, then
/// the one smallest in magnitude wins, so the same logic drives both
/// forward and backward integration.
#[must_use]
pub fn analytical_step(
    particle: &ParticleState,
    sample: &VelocitySample,
    tf: f64,
) -> ExitEvent {
    let (tl_x, tr_x) = exit_time(-0.5, 0.5, sample.u, sample.du, particle.rx);
    let (tl_y, tr_y) = exit_time(-0.5, 0.5, sample.v, sample.dv, particle.ry);
    let (tl_z, tr_z) = exit_time(0.0, 1.0, sample.w, sample.dw, particle.rzl);

    let candidates = [
        (tl_x, ExitKind::Left),
        (tr_x, ExitKind::Right),
        (tl_y, ExitKind::Down),
        (tr_y, ExitKind::Up),
        (tl_z, ExitKind::LayerUp),
        (tr_z, ExitKind::LayerDown),
    ];

    let sign = tf.signum();
    let mut best_dt = tf;
    let mut best_kind = ExitKind::WallTime;
    for &(dt, kind) in &candidates {
        if dt.is_finite() && dt != 0.0 && dt.signum() == sign && dt.abs() < best_dt.abs() {
            best_dt = dt;
            best_kind = kind;
        }
    }

    ExitEvent { dt: best_dt, kind: best_kind }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stationary_matches_exit_time_uniform() {
        // u0 = 1, du = 0, x0 = 0: should cross -0.5 at t=-0.5 and
        // +0.5 at t=0.5.
        let (tl, tr) = exit_time(-0.5, 0.5, 1.0, 0.0, 0.0);
        assert!((tl - -0.5).abs() < 1e-12);
        assert!((tr - 0.5).abs() < 1e-12);
    }

    #[test]
    fn stationary_matches_exit_time_exponential() {
        // u0 = 1, du = 1, x0 = 0: x(t) = exp(t) - 1, so x(t) = 0.5
        // at t = ln(1.5).
        let (_, tr) = exit_time(-0.5, 0.5, 1.0, 1.0, 0.0);
        assert!((tr - 1.5_f64.ln()).abs() < 1e-10);
        assert!((stationary(tr, 1.0, 1.0, 0.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn stationary_round_trips_exit_time_for_arbitrary_offset() {
        let (u0, du, x0) = (0.3, -0.8, 0.1);
        let (_, tr) = exit_time(-0.5, 0.5, u0, du, x0);
        assert!(tr.is_finite());
        assert!((stationary(tr, u0, du, x0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn analytical_step_supports_negative_wall_time() {
        // u0=2, du=0, x0=0, stepping backward: the particle exits the
        // west edge (x=-0.5) at t=-0.25, which should win over the
        // wall-time horizon of -1.0.
        let particle = ParticleState::new(
            crate::topology::CellCoord::new(0, 0, 0),
            0.0,
            0.0,
            0,
            0.5,
            0.0,
        );
        let sample =
            VelocitySample { u: 2.0, v: 0.0, w: 0.0, du: 0.0, dv: 0.0, dw: 0.0 };
        let event = analytical_step(&particle, &sample, -1.0);
        assert_eq!(event.kind, ExitKind::Left);
        assert!((event.dt - -0.25).abs() < 1e-9, "dt was {}", event.dt);
    }

    #[test]
    fn zero_velocity_never_exits() {
        let (tl, tr) = exit_time(-0.5, 0.5, 0.0, 0.0, 0.0);
        assert!(tl.is_nan());
        assert!(tr.is_nan());
    }

    #[test]
    fn stationary_uses_velocity_at_the_particles_own_position() {
        // u0=0.5, du=0.4, x0=0.2: u0 is the velocity sampled at x0
        // itself, not at the cell center (x=0), so x(t) = x0 +
        // (u0/du)*(exp(du*t)-1). Expected values are computed directly
        // from that closed form, independent of `exit_time_to`'s own
        // inversion of it.
        let (u0, du, x0) = (0.5, 0.4, 0.2);

        let x = stationary(0.3, u0, du, x0);
        assert!((x - 0.359_370_8).abs() < 1e-6, "x was {x}");

        let (tl, tr) = exit_time(-0.5, 0.5, u0, du, x0);
        assert!((tl - -2.052_452).abs() < 1e-5, "tl was {tl}");
        assert!((tr - 0.537_777).abs() < 1e-5, "tr was {tr}");

        // Round-trip: stepping for exactly tr lands on the high bound.
        assert!((stationary(tr, u0, du, x0) - 0.5).abs() < 1e-9);
    }
}
