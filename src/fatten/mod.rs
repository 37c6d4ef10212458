//! Turns base cell indices into the neighbor-index tensors the weight
//! composer gathers from.

use crate::coord::RelH;
use crate::kernel::Kernel;
use crate::topology::{CellCoord, Tendency, Topology};
use ndarray::Array2;

/// Horizontal fattening result: for each of the `n` query points, the
/// `m` stencil nodes' cell addresses, plus the quarter-turn rotation
/// accumulated resolving each node across a topology seam (`0` for
/// nodes that never crossed one).
///
/// The rotation tensor feeds [`crate::topology::four_matrix_for_uv`]
/// when interpolating a vector field on a multi-face grid.
pub struct FattenedH {
    /// Shape `(n, m)`.
    pub cells: Array2<CellCoord>,
    /// Shape `(n, m)`, quarter turns in `0..4`.
    pub rotation: Array2<u8>,
}

/// Fattens `positions` over `kernel`'s horizontal stencil.
///
/// Nodes that land outside their home face are re-resolved through
/// `topology`, translating the `(dx, dy)` offset into an ordered move
/// list with vertical (`j`) moves first, then horizontal (`i`) moves,
/// matching [`Topology::ind_moves`]'s edge-crossing rotation rule.
#[must_use]
pub fn fatten_h(
    positions: &[RelH],
    kernel: &Kernel,
    topology: &Topology,
) -> FattenedH {
    let n = positions.len();
    let m = kernel.len();
    let mut cells = Array2::from_elem((n, m), CellCoord::new(0, 0, 0));
    let mut rotation = Array2::<u8>::zeros((n, m));

    for (ni, pos) in positions.iter().enumerate() {
        for (mi, &(dx, dy)) in kernel.offsets().iter().enumerate() {
            let home = CellCoord::new(pos.face, pos.iy, pos.ix);
            let raw = CellCoord::new(pos.face, pos.iy + dy, pos.ix + dx);

            let (cell, rot) = if topology.check_illegal(raw) {
                let moves = offset_to_moves(dx, dy);
                topology.ind_moves_tracked(home, &moves)
            } else {
                (raw, 0)
            };

            cells[(ni, mi)] = cell;
            rotation[(ni, mi)] = rot;
        }
    }

    FattenedH { cells, rotation }
}

/// Translates a `(dx, dy)` cell offset into the move list
/// [`Topology::ind_moves`] expects: `|dy|` vertical moves, then `|dx|`
/// horizontal moves.
fn offset_to_moves(dx: i64, dy: i64) -> Vec<Tendency> {
    let mut moves = Vec::with_capacity(
        usize::try_from(dx.unsigned_abs() + dy.unsigned_abs())
            .unwrap_or(usize::MAX),
    );
    if dy > 0 {
        moves.extend(std::iter::repeat(Tendency::Up).take(dy as usize));
    } else if dy < 0 {
        moves.extend(std::iter::repeat(Tendency::Down).take((-dy) as usize));
    }
    if dx > 0 {
        moves.extend(std::iter::repeat(Tendency::Right).take(dx as usize));
    } else if dx < 0 {
        moves.extend(std::iter::repeat(Tendency::Left).take((-dx) as usize));
    }
    moves
}

/// Vertical fattening for the `nearest` kernel: one column, the
/// bracketing layer itself.
#[must_use]
pub fn fatten_v_nearest(iz: &[i64]) -> Array2<i64> {
    Array2::from_shape_fn((iz.len(), 1), |(n, _)| iz[n])
}

/// Vertical fattening for `linear`/`dz` kernels: two columns, the
/// upper-interface layer and the one above it.
///
/// When `iz_lin == 0` (the shallowest layer, no layer above it) the
/// second column is clamped to `0` rather than `-1`; the weight
/// composer is responsible for zeroing that column's contribution
/// (see [`crate::compose`]), matching the crate's resolution of the
/// "iz=0 clamp" design question.
#[must_use]
pub fn fatten_v_linear(iz_lin: &[i64]) -> Array2<i64> {
    Array2::from_shape_fn((iz_lin.len(), 2), |(n, col)| {
        if col == 0 {
            iz_lin[n]
        } else {
            (iz_lin[n] - 1).max(0)
        }
    })
}

/// Temporal fattening, mirroring [`fatten_v_linear`]: `it` and
/// `it + 1`, with the upper bound clamped to `it_max`.
#[must_use]
pub fn fatten_t(it: &[i64], it_max: i64) -> Array2<i64> {
    Array2::from_shape_fn((it.len(), 2), |(n, col)| {
        if col == 0 {
            it[n]
        } else {
            (it[n] + 1).min(it_max)
        }
    })
}
