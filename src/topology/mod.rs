//! Grid topology: face adjacency, cross-face index translation and the
//! rotation matrices needed to carry a vector field across a seam.
//!
//! A single-face grid (most regional or Cartesian ocean models) is
//! represented as one face whose four edges are all "off-grid" (no
//! neighbor). Multi-face ("cubed-sphere"-like) grids connect faces
//! through [`Adjacency`] entries that additionally record the quarter
//! turn needed to align the crossed edge's tangential axis with the
//! neighbor's own (j, i) axes.

mod tendency;

pub use tendency::Tendency;

use ndarray::{Array1, Array2};

/// Sentinel face id meaning "no neighbor in this direction": the query
/// point has walked off the edge of the grid entirely.
pub const OFF_GRID: i32 = -1;

/// A grid cell address: face id (or [`OFF_GRID`]), row (j / y) and column
/// (i / x).
///
/// Components are signed so that a cell can transiently overshoot its
/// face's bounds (e.g. mid-fattening, before [`Topology::resolve`] folds
/// it back onto a legal tuple) without extra bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellCoord {
    /// Face id, or [`OFF_GRID`] if the cell fell off the grid.
    pub face: i32,
    /// Row index (j / y).
    pub iy: i64,
    /// Column index (i / x).
    pub ix: i64,
}

impl CellCoord {
    /// Creates a new cell address.
    #[must_use]
    pub const fn new(face: i32, iy: i64, ix: i64) -> Self {
        Self { face, iy, ix }
    }

    /// Whether this address fell off the grid.
    #[must_use]
    pub const fn is_off_grid(self) -> bool {
        self.face == OFF_GRID
    }
}

/// How a face connects to its neighbor across one edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Adjacency {
    /// Neighboring face id, or [`OFF_GRID`] if this edge is a grid
    /// boundary.
    pub face: i32,
    /// Quarter turns (counterclockwise, 0..4) to rotate a vector
    /// expressed in the source face's (i, j) axes into the
    /// neighbor's axes.
    pub rotation: u8,
}

impl Adjacency {
    /// A grid-boundary edge: no neighbor.
    pub const BOUNDARY: Self = Self { face: OFF_GRID, rotation: 0 };
}

/// Per-face shape, in cells: `(ny, nx)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceShape {
    /// Number of rows.
    pub ny: i64,
    /// Number of columns.
    pub nx: i64,
}

/// The face-adjacency graph of a grid.
///
/// Each face stores its shape and the [`Adjacency`] reached by walking
/// off each of its four edges, in `Tendency` order (up, down, left,
/// right).
#[derive(Clone, Debug)]
pub struct Topology {
    shapes: Vec<FaceShape>,
    neighbors: Vec<[Adjacency; 4]>,
}

/// Outcome of resolving a single face-crossing move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The cell reached.
    pub coord: CellCoord,
    /// Quarter turns accumulated while crossing edges on this move,
    /// to be applied to any remaining queued moves and to any vector
    /// sampled at the destination (see [`four_matrix_for_uv`]).
    pub rotation: u8,
}

impl Topology {
    /// Builds a single-face topology: a plain rectangular grid with no
    /// neighbors (every edge is a grid boundary).
    #[must_use]
    pub fn single_face(ny: i64, nx: i64) -> Self {
        Self {
            shapes: vec![FaceShape { ny, nx }],
            neighbors: vec![[Adjacency::BOUNDARY; 4]],
        }
    }

    /// Builds a multi-face topology from explicit shapes and adjacency.
    ///
    /// `neighbors[f]` must give the `[up, down, left, right]` adjacency
    /// of face `f`.
    #[must_use]
    pub fn new(
        shapes: Vec<FaceShape>,
        neighbors: Vec<[Adjacency; 4]>,
    ) -> Self {
        assert_eq!(
            shapes.len(),
            neighbors.len(),
            "one adjacency entry required per face"
        );
        Self { shapes, neighbors }
    }

    /// Number of faces in this topology.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.shapes.len()
    }

    /// Shape of the given face.
    #[must_use]
    pub fn shape(&self, face: i32) -> Option<FaceShape> {
        usize::try_from(face).ok().and_then(|f| self.shapes.get(f)).copied()
    }

    /// Whether `coord` lies within its face's bounds.
    ///
    /// An [`OFF_GRID`] face is always illegal.
    #[must_use]
    pub fn check_illegal(&self, coord: CellCoord) -> bool {
        match self.shape(coord.face) {
            None => true,
            Some(shape) => {
                coord.iy < 0
                    || coord.iy >= shape.ny
                    || coord.ix < 0
                    || coord.ix >= shape.nx
            }
        }
    }

    /// Vectorized [`Self::check_illegal`].
    #[must_use]
    pub fn check_illegal_many(&self, coords: &[CellCoord]) -> Array1<bool> {
        Array1::from_iter(coords.iter().map(|&c| self.check_illegal(c)))
    }

    /// Applies a single unit tendency, resolving a face crossing (and
    /// its rotation) if the move walks off the current face.
    ///
    /// Moves that leave a grid boundary (no neighbor) land on
    /// [`OFF_GRID`]; callers must mask such points out downstream.
    #[must_use]
    pub fn step(&self, start: CellCoord, tend: Tendency) -> MoveOutcome {
        let moved = match tend {
            Tendency::Up => CellCoord::new(start.face, start.iy + 1, start.ix),
            Tendency::Down => {
                CellCoord::new(start.face, start.iy - 1, start.ix)
            }
            Tendency::Left => {
                CellCoord::new(start.face, start.iy, start.ix - 1)
            }
            Tendency::Right => {
                CellCoord::new(start.face, start.iy, start.ix + 1)
            }
        };

        if !self.check_illegal(moved) {
            return MoveOutcome { coord: moved, rotation: 0 };
        }

        let Some(_shape) = self.shape(start.face) else {
            return MoveOutcome {
                coord: CellCoord::new(OFF_GRID, 0, 0),
                rotation: 0,
            };
        };
        let Some(neighbors) = self.neighbors.get(
            usize::try_from(start.face).expect("face already validated"),
        ) else {
            return MoveOutcome {
                coord: CellCoord::new(OFF_GRID, 0, 0),
                rotation: 0,
            };
        };
        let adjacency = neighbors[tend as usize];

        if adjacency.face == OFF_GRID {
            return MoveOutcome {
                coord: CellCoord::new(OFF_GRID, 0, 0),
                rotation: 0,
            };
        }

        // The tangential coordinate (the one running along the crossed
        // edge) carries over, rotated into the neighbor's frame; the
        // other coordinate resets to the neighbor's edge.
        let tangential = match tend {
            Tendency::Up | Tendency::Down => start.ix,
            Tendency::Left | Tendency::Right => start.iy,
        };
        let Some(dst_shape) = self.shape(adjacency.face) else {
            return MoveOutcome {
                coord: CellCoord::new(OFF_GRID, 0, 0),
                rotation: 0,
            };
        };
        let coord = entry_point(
            adjacency.face,
            tend,
            adjacency.rotation,
            tangential,
            dst_shape,
        );

        MoveOutcome { coord, rotation: adjacency.rotation }
    }

    /// Applies an ordered list of unit tendencies, rotating the
    /// remaining queue by the rotation accumulated at each edge
    /// crossing, as described in the crate's topology design.
    ///
    /// `ind_moves(start, [])` is always `start`.
    #[must_use]
    pub fn ind_moves(&self, start: CellCoord, moves: &[Tendency]) -> CellCoord {
        self.ind_moves_tracked(start, moves).0
    }

    /// Like [`Self::ind_moves`] but also returns the total quarter-turn
    /// rotation accumulated along the path, for use with
    /// [`four_matrix_for_uv`].
    #[must_use]
    pub fn ind_moves_tracked(
        &self,
        start: CellCoord,
        moves: &[Tendency],
    ) -> (CellCoord, u8) {
        let mut coord = start;
        let mut pending: Vec<Tendency> = moves.to_vec();
        let mut total_rotation = 0u8;
        let mut i = 0;

        while i < pending.len() {
            if coord.is_off_grid() {
                break;
            }
            let outcome = self.step(coord, pending[i]);
            coord = outcome.coord;
            if outcome.rotation != 0 {
                total_rotation = (total_rotation + outcome.rotation) % 4;
                for t in &mut pending[(i + 1)..] {
                    *t = t.rotate(outcome.rotation);
                }
            }
            i += 1;
        }

        (coord, total_rotation)
    }

    /// Vectorized one-step move: applies `tends[n]` to `starts[n]` for
    /// every `n`.
    #[must_use]
    pub fn ind_tend_vec(
        &self,
        starts: &[CellCoord],
        tends: &[Tendency],
    ) -> Vec<CellCoord> {
        assert_eq!(starts.len(), tends.len());
        starts
            .iter()
            .zip(tends.iter())
            .map(|(&s, &t)| self.step(s, t).coord)
            .collect()
    }
}

/// Computes the entry (j, i) on the destination face when crossing an
/// edge with the given accumulated rotation.
fn entry_point(
    dst_face: i32,
    tend: Tendency,
    rotation: u8,
    tangential: i64,
    dst_shape: FaceShape,
) -> CellCoord {
    // The edge we *arrive* through on the destination face, after
    // applying the quarter-turn rotation to the edge we *left* from.
    let dst_edge = tend.opposite().rotate(rotation);

    let (iy, ix) = match dst_edge {
        Tendency::Up => (0, tangential),
        Tendency::Down => (dst_shape.ny - 1, tangential),
        Tendency::Left => (tangential, dst_shape.nx - 1),
        Tendency::Right => (tangential, 0),
    };

    CellCoord::new(dst_face, iy, ix)
}

/// Builds the 2x2 matrix rotating a `(u, v)` pair by `quarter_turns`
/// counterclockwise, restricted to the exact integer entries a quarter
/// turn produces (`{-1, 0, 1}`), as required when carrying a velocity
/// sample across a topology seam.
///
/// Returns `(u_from_u, u_from_v, v_from_u, v_from_v)` such that
/// `u' = u_from_u * u + u_from_v * v` and `v' = v_from_u * u + v_from_v * v`.
#[must_use]
pub fn four_matrix_for_uv(quarter_turns: u8) -> (f64, f64, f64, f64) {
    match quarter_turns % 4 {
        0 => (1.0, 0.0, 0.0, 1.0),
        1 => (0.0, -1.0, 1.0, 0.0),
        2 => (-1.0, 0.0, 0.0, -1.0),
        3 => (0.0, 1.0, -1.0, 0.0),
        _ => unreachable!("quarter_turns % 4 is in 0..4"),
    }
}

/// Dense matrix form of [`four_matrix_for_uv`], convenient for batched
/// rotation of an `N`-length `(u, v)` array pair sharing the same
/// rotation.
#[must_use]
pub fn four_matrix_for_uv_array(quarter_turns: &[u8]) -> Array2<f64> {
    let mut out = Array2::zeros((quarter_turns.len(), 4));
    for (row, &q) in out.rows_mut().into_iter().zip(quarter_turns.iter()) {
        let (a, b, c, d) = four_matrix_for_uv(q);
        let mut row = row;
        row[0] = a;
        row[1] = b;
        row[2] = c;
        row[3] = d;
    }
    out
}
