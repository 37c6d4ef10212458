//! The per-particle state an [`super::AnalyticStepper`] advances.

use super::analytic::stationary;
use crate::topology::CellCoord;

/// The velocity and own-axis spatial derivative a [`ParticleState`]
/// experiences at its current position, as sampled through a
/// [`super::VelocityField`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocitySample {
    /// Zonal velocity.
    pub u: f64,
    /// Meridional velocity.
    pub v: f64,
    /// Vertical velocity (positive up).
    pub w: f64,
    /// `du/dx`, in home-cell-fraction units.
    pub du: f64,
    /// `dv/dy`, in home-cell-fraction units.
    pub dv: f64,
    /// `dw/dz`, in home-cell-fraction units.
    pub dw: f64,
}

/// A Lagrangian particle's position: a home cell plus fractional
/// offsets within it, and the absolute time of this state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleState {
    /// The cell currently containing the particle.
    pub cell: CellCoord,
    /// Fractional x offset from the cell center, in `[-0.5, 0.5]`.
    pub rx: f64,
    /// Fractional y offset from the cell center, in `[-0.5, 0.5]`.
    pub ry: f64,
    /// Index of the shallower bounding interface of the particle's
    /// vertical layer.
    pub izl: i64,
    /// Fractional depth within that layer, in `[0, 1]` (0 = shallow
    /// interface, 1 = deep interface).
    pub rzl: f64,
    /// Absolute time.
    pub t: f64,
}

impl ParticleState {
    /// Builds a new particle state.
    #[must_use]
    pub const fn new(
        cell: CellCoord,
        rx: f64,
        ry: f64,
        izl: i64,
        rzl: f64,
        t: f64,
    ) -> Self {
        Self { cell, rx, ry, izl, rzl, t }
    }

    /// Nudges any coordinate sitting at or past its cell boundary back
    /// inside by `tol`, so the next velocity sample is taken from
    /// inside the cell rather than exactly on its edge.
    pub(super) fn trim(&mut self, tol: f64) {
        self.rx = self.rx.clamp(-0.5 + tol, 0.5 - tol);
        self.ry = self.ry.clamp(-0.5 + tol, 0.5 - tol);
        self.rzl = self.rzl.clamp(tol, 1.0 - tol);
    }

    /// Advances the in-cell position and time by `dt` under `sample`,
    /// without resolving any cell crossing.
    pub(super) fn advance(&mut self, sample: &VelocitySample, dt: f64) {
        self.rx = stationary(dt, sample.u, sample.du, self.rx);
        self.ry = stationary(dt, sample.v, sample.dv, self.ry);
        self.rzl = stationary(dt, sample.w, sample.dw, self.rzl);
        self.t += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_moves_time_forward() {
        let mut p = ParticleState::new(CellCoord::new(0, 0, 0), 0.0, 0.0, 0, 0.5, 10.0);
        let sample = VelocitySample { u: 1.0, v: 0.0, w: 0.0, du: 0.0, dv: 0.0, dw: 0.0 };
        p.advance(&sample, 2.0);
        assert!((p.t - 12.0).abs() < 1e-12);
        assert!((p.rx - 2.0).abs() < 1e-12);
    }

    #[test]
    fn trim_only_moves_coordinates_past_tolerance() {
        let mut p = ParticleState::new(CellCoord::new(0, 0, 0), 0.5, -0.5, 0, 0.0, 0.0);
        p.trim(1e-6);
        assert!((p.rx - (0.5 - 1e-6)).abs() < 1e-12);
        assert!((p.ry - (-0.5 + 1e-6)).abs() < 1e-12);
        assert!((p.rzl - 1e-6).abs() < 1e-12);
    }
}
