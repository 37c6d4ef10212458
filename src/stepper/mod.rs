//! Analytic, cell-by-cell particle advection.
//!
//! Within a cell, each velocity component is modeled as linear in its
//! own local coordinate about the particle's current position:
//! `u(x) = u0 + du*(x - x0)`. The ODE `dx/dt = u(x)` has a closed-form
//! solution, so a step can jump directly to either the requested time
//! horizon or the next cell-boundary crossing, rather than sub-stepping
//! a numerical integrator.

mod analytic;
mod particle;

pub use analytic::{exit_time, stationary, ExitEvent, ExitKind};
pub use particle::{ParticleState, VelocitySample};

use crate::config::InterpConfig;
use crate::coord::{latlon_to_local, local_to_latlon, to_180};
use crate::topology::{CellCoord, Tendency, Topology};
use std::fmt;

/// Supplies the velocity (and its own-axis spatial derivative) a
/// [`ParticleState`] experiences at its current position.
///
/// Decouples the stepper from the interpolation façade: a real
/// deployment backs this with [`crate::interp::Interpolator`] sampling
/// the `u`, `v`, `w` fields and their `dx`/`dy`/`dz` kernels at the
/// particle's home cell.
pub trait VelocityField {
    /// Samples velocity and its own-axis gradient at `particle`'s
    /// current cell and offset.
    fn sample(&self, particle: &ParticleState) -> VelocitySample;
}

/// A cell's horizontal anchor: its center's geographic position, local
/// axis cosine/sine, and cell width along x/y.
///
/// Everything [`AnalyticStepper::to_next_stop`] needs to convert
/// between a cell-local `(rx, ry)` offset and an absolute `(lon, lat)`,
/// which it does once per horizontal cell crossing to re-derive the
/// particle's offset in the cell it just entered (see
/// [`CellGeometry`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellAnchor {
    /// Cell-center longitude.
    pub bx: f64,
    /// Cell-center latitude.
    pub by: f64,
    /// Cosine of the local grid rotation.
    pub cs: f64,
    /// Sine of the local grid rotation.
    pub sn: f64,
    /// Cell width along x.
    pub dx: f64,
    /// Cell width along y.
    pub dy: f64,
}

/// Supplies the horizontal anchor [`AnalyticStepper`] re-derives a
/// particle's `rx`/`ry` against on every cell crossing.
///
/// On a grid whose spacing or local axis rotation varies from cell to
/// cell, a crossing can't just reset the crossed axis to `±0.5` and
/// leave the other axis untouched: the particle's absolute position
/// has to be recomputed under the old cell's anchor and re-projected
/// under the new one. Decoupled from [`crate::grid::Grid`] the same way
/// [`VelocityField`] is decoupled from [`crate::interp::Interpolator`];
/// [`crate::grid::Grid`] implements it directly from its own
/// `xc`/`yc`/`cs`/`sn`/`dx_c`/`dy_c` tables.
pub trait CellGeometry {
    /// Anchor for `cell`.
    fn anchor(&self, cell: CellCoord) -> CellAnchor;
}

/// A [`CellGeometry`] for grids whose cells all share one width, one
/// height and no local axis rotation: the common case for simple
/// Cartesian grids, and a reference implementation other deployments
/// can model theirs on (see [`crate::coord::BruteForceLocator`] for the
/// same role on the lookup side).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformGeometry {
    /// Cell width along x.
    pub dx: f64,
    /// Cell width along y.
    pub dy: f64,
}

impl CellGeometry for UniformGeometry {
    #[allow(clippy::cast_precision_loss, reason = "grid extents stay well under 2^52")]
    fn anchor(&self, cell: CellCoord) -> CellAnchor {
        CellAnchor {
            bx: cell.ix as f64 * self.dx,
            by: cell.iy as f64 * self.dy,
            cs: 1.0,
            sn: 0.0,
            dx: self.dx,
            dy: self.dy,
        }
    }
}

/// Absolute (non-relative) convergence tolerance, in seconds, for
/// [`AnalyticStepper::to_next_stop`].
const TIME_TOLERANCE: f64 = 1.0;

/// Fractional-offset tolerance used to nudge a particle back off a
/// cell boundary before sampling its velocity.
const TRIM_TOLERANCE: f64 = 1e-6;

/// Maximum number of cell-to-cell hops a single [`to_next_stop`] call
/// will take before giving up and returning the current state.
///
/// [`to_next_stop`]: AnalyticStepper::to_next_stop
const MAX_ITERATIONS: usize = 200;

/// Outcome of [`AnalyticStepper::to_next_stop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Reached the requested time horizon.
    TimeHorizon,
    /// Walked off the edge of the grid; `particle.cell` is
    /// [`crate::topology::OFF_GRID`] and stopped advancing.
    OffGrid,
    /// Hit [`MAX_ITERATIONS`] without converging; state reflects the
    /// last resolved cell crossing.
    NotConverged,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeHorizon => write!(f, "reached time horizon"),
            Self::OffGrid => write!(f, "particle left the grid"),
            Self::NotConverged => {
                write!(f, "stepper did not converge within {MAX_ITERATIONS} iterations")
            }
        }
    }
}

/// Drives a [`ParticleState`] forward through a [`VelocityField`],
/// analytically, one cell crossing at a time.
pub struct AnalyticStepper<'a, V, G> {
    velocity: &'a V,
    topology: &'a Topology,
    geometry: &'a G,
    config: InterpConfig,
}

impl<'a, V: VelocityField, G: CellGeometry> AnalyticStepper<'a, V, G> {
    /// Builds a stepper sampling `velocity` over `topology` under
    /// `config`, re-anchoring crossings against `geometry`.
    #[must_use]
    pub fn new(
        velocity: &'a V,
        topology: &'a Topology,
        geometry: &'a G,
        config: InterpConfig,
    ) -> Self {
        Self { velocity, topology, geometry, config }
    }

    /// Pushes `particle` forward to `t1` (or as close as convergence
    /// or the grid's edge allows), resolving every cell crossing along
    /// the way.
    ///
    /// Mutates `particle` in place and returns why it stopped.
    pub fn to_next_stop(&self, particle: &mut ParticleState, t1: f64) -> StopReason {
        for iteration in 0..MAX_ITERATIONS {
            let tf = t1 - particle.t;
            if tf.abs() < TIME_TOLERANCE {
                return StopReason::TimeHorizon;
            }

            let mut sample = self.velocity.sample(particle);
            if self.config.dont_fly && particle.izl == 0 {
                sample.w = 0.0;
                sample.dw = 0.0;
            }

            particle.trim(TRIM_TOLERANCE);

            let event = analytic::analytical_step(particle, &sample, tf);
            tracing::trace!(
                iteration,
                t = particle.t,
                kind = ?event.kind,
                dt = event.dt,
                "stepper advanced"
            );

            particle.advance(&sample, event.dt);

            match event.kind {
                ExitKind::WallTime => return StopReason::TimeHorizon,
                ExitKind::LayerUp => {
                    particle.izl -= 1;
                    particle.rzl = 1.0;
                }
                ExitKind::LayerDown => {
                    particle.izl += 1;
                    particle.rzl = 0.0;
                }
                ExitKind::Left
                | ExitKind::Right
                | ExitKind::Down
                | ExitKind::Up => {
                    let tend = horizontal_tendency(event.kind);

                    // Resolve the particle's absolute position under the
                    // cell it's leaving before moving the cell index, then
                    // re-derive rx/ry under the cell it lands in. A plain
                    // "set the crossed axis to ±0.5, leave the other one
                    // alone" reset is only correct when every cell shares
                    // the same width/rotation; this works on curvilinear
                    // and variable-spacing grids too.
                    let old_anchor = self.geometry.anchor(particle.cell);
                    let (east, north) = local_to_latlon(
                        particle.rx * old_anchor.dx,
                        particle.ry * old_anchor.dy,
                        old_anchor.cs,
                        old_anchor.sn,
                    );
                    let lon = old_anchor.bx + east;
                    let lat = old_anchor.by + north;

                    let outcome = self.topology.step(particle.cell, tend);
                    particle.cell = outcome.coord;
                    if particle.cell.is_off_grid() {
                        return StopReason::OffGrid;
                    }

                    let new_anchor = self.geometry.anchor(particle.cell);
                    let dlon = to_180(lon - new_anchor.bx);
                    let dlat = lat - new_anchor.by;
                    let (u, v) =
                        latlon_to_local(dlon, dlat, new_anchor.cs, new_anchor.sn);
                    particle.rx = u / new_anchor.dx;
                    particle.ry = v / new_anchor.dy;
                }
            }
        }

        StopReason::NotConverged
    }
}

/// Maps a horizontal [`ExitKind`] to the [`Tendency`] that reaches the
/// neighboring cell it exits into.
fn horizontal_tendency(kind: ExitKind) -> Tendency {
    match kind {
        ExitKind::Left => Tendency::Left,
        ExitKind::Right => Tendency::Right,
        ExitKind::Down => Tendency::Down,
        ExitKind::Up => Tendency::Up,
        ExitKind::LayerUp | ExitKind::LayerDown | ExitKind::WallTime => {
            unreachable!("caller only passes horizontal exit kinds")
        }
    }
}

#[cfg(test)]
#[path = "./tests.rs"]
mod tests;
