//! The in-memory, dense-array grid collaborator.
//!
//! [`Grid`] is the crate's own implementation of the data the
//! interpolation pipeline needs (axis tables, masks, topology). It's
//! suitable for unit tests and for datasets that comfortably fit in
//! memory; a disk-backed or lazily-chunked dataset would implement the
//! same role by exposing the same tables.

use crate::mask::{self, MaskKind};
use crate::stepper::{CellAnchor, CellGeometry};
use crate::topology::{CellCoord, Topology};
use ndarray::{Array1, Array2, Array3};
use std::sync::OnceLock;

/// Dense axis and mask tables for a (possibly multi-face) staggered
/// curvilinear grid, plus its topology.
///
/// All horizontal tables share the shape `(ny, nx)`; `maskC` has shape
/// `(nz, ny, nx)`. Multi-face grids are represented by giving
/// [`Grid::topology`] more than one face and constructing one `Grid`
/// per face, or by composing several grids behind a shared façade —
/// this type itself models a single face's tables, which is all the
/// fattener and weight composer need per lookup.
pub struct Grid {
    xc: Array2<f64>,
    yc: Array2<f64>,
    xg: Array2<f64>,
    yg: Array2<f64>,
    dx_c: Array2<f64>,
    dy_c: Array2<f64>,
    dx_g: Array2<f64>,
    dy_g: Array2<f64>,
    cs: Array2<f64>,
    sn: Array2<f64>,
    dr_c: Array1<f64>,
    dr_f: Array1<f64>,
    z: Array1<f64>,
    zl: Array1<f64>,
    time: Array1<f64>,
    mask_c: Array3<f64>,
    topology: Topology,
    mask_cache: MaskCache,
}

#[derive(Default)]
struct MaskCache {
    u: OnceLock<Array3<f64>>,
    v: OnceLock<Array3<f64>>,
    wvel: OnceLock<Array3<f64>>,
}

/// Constructor arguments for [`Grid::new`], bundled to keep the
/// constructor's signature from growing unreadable as tables are
/// added.
pub struct GridTables {
    /// Cell-center longitude.
    pub xc: Array2<f64>,
    /// Cell-center latitude.
    pub yc: Array2<f64>,
    /// Corner longitude.
    pub xg: Array2<f64>,
    /// Corner latitude.
    pub yg: Array2<f64>,
    /// Center-to-center spacing along x.
    pub dx_c: Array2<f64>,
    /// Center-to-center spacing along y.
    pub dy_c: Array2<f64>,
    /// Corner-to-corner spacing along x.
    pub dx_g: Array2<f64>,
    /// Corner-to-corner spacing along y.
    pub dy_g: Array2<f64>,
    /// Cosine of local grid rotation.
    pub cs: Array2<f64>,
    /// Sine of local grid rotation.
    pub sn: Array2<f64>,
    /// Vertical spacing between cell centers.
    pub dr_c: Array1<f64>,
    /// Vertical spacing between cell interfaces.
    pub dr_f: Array1<f64>,
    /// Cell-center depths, strictly decreasing (surface first).
    pub z: Array1<f64>,
    /// Interface depths; `zl[0]` must be `0`.
    pub zl: Array1<f64>,
    /// Time axis.
    pub time: Array1<f64>,
    /// Scalar-grid wet mask, `(nz, ny, nx)`, values in `{0, 1}`.
    pub mask_c: Array3<f64>,
    /// Face adjacency graph.
    pub topology: Topology,
}

impl Grid {
    /// Builds a grid from its tables.
    ///
    /// # Panics
    ///
    /// Panics if `zl[0] != 0`, if `z` isn't strictly decreasing, or if
    /// the horizontal tables don't all share the same shape.
    #[must_use]
    pub fn new(tables: GridTables) -> Self {
        let shape = tables.xc.dim();
        assert_eq!(tables.yc.dim(), shape);
        assert_eq!(tables.dx_c.dim(), shape);
        assert_eq!(tables.dy_c.dim(), shape);
        assert_eq!(tables.cs.dim(), shape);
        assert_eq!(tables.sn.dim(), shape);
        assert!(
            tables.z.windows(2).into_iter().all(|w| w[0] > w[1]),
            "Z must be strictly decreasing"
        );
        assert!(
            tables.zl.first().copied().unwrap_or(0.0) == 0.0,
            "Zl[0] must be 0"
        );

        Self {
            xc: tables.xc,
            yc: tables.yc,
            xg: tables.xg,
            yg: tables.yg,
            dx_c: tables.dx_c,
            dy_c: tables.dy_c,
            dx_g: tables.dx_g,
            dy_g: tables.dy_g,
            cs: tables.cs,
            sn: tables.sn,
            dr_c: tables.dr_c,
            dr_f: tables.dr_f,
            z: tables.z,
            zl: tables.zl,
            time: tables.time,
            mask_c: tables.mask_c,
            topology: tables.topology,
            mask_cache: MaskCache::default(),
        }
    }

    /// Cell-center longitude table.
    #[must_use]
    pub const fn xc(&self) -> &Array2<f64> {
        &self.xc
    }

    /// Cell-center latitude table.
    #[must_use]
    pub const fn yc(&self) -> &Array2<f64> {
        &self.yc
    }

    /// Corner longitude table.
    #[must_use]
    pub const fn xg(&self) -> &Array2<f64> {
        &self.xg
    }

    /// Corner latitude table.
    #[must_use]
    pub const fn yg(&self) -> &Array2<f64> {
        &self.yg
    }

    /// Center-to-center spacing along x.
    #[must_use]
    pub const fn dx_c(&self) -> &Array2<f64> {
        &self.dx_c
    }

    /// Center-to-center spacing along y.
    #[must_use]
    pub const fn dy_c(&self) -> &Array2<f64> {
        &self.dy_c
    }

    /// Corner-to-corner spacing along x.
    #[must_use]
    pub const fn dx_g(&self) -> &Array2<f64> {
        &self.dx_g
    }

    /// Corner-to-corner spacing along y.
    #[must_use]
    pub const fn dy_g(&self) -> &Array2<f64> {
        &self.dy_g
    }

    /// Cosine of the local grid rotation.
    #[must_use]
    pub const fn cs(&self) -> &Array2<f64> {
        &self.cs
    }

    /// Sine of the local grid rotation.
    #[must_use]
    pub const fn sn(&self) -> &Array2<f64> {
        &self.sn
    }

    /// Vertical spacing between cell centers.
    #[must_use]
    pub const fn dr_c(&self) -> &Array1<f64> {
        &self.dr_c
    }

    /// Vertical spacing between cell interfaces.
    #[must_use]
    pub const fn dr_f(&self) -> &Array1<f64> {
        &self.dr_f
    }

    /// Cell-center depths.
    #[must_use]
    pub const fn z(&self) -> &Array1<f64> {
        &self.z
    }

    /// Interface depths.
    #[must_use]
    pub const fn zl(&self) -> &Array1<f64> {
        &self.zl
    }

    /// Time axis.
    #[must_use]
    pub const fn time(&self) -> &Array1<f64> {
        &self.time
    }

    /// The scalar-grid wet mask.
    #[must_use]
    pub const fn mask_c(&self) -> &Array3<f64> {
        &self.mask_c
    }

    /// The face adjacency graph.
    #[must_use]
    pub const fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Returns the mask at the requested staggered location, computing
    /// and caching it on first request for anything other than `C`.
    ///
    /// Matches the "warn and assume all-wet" behavior for a missing
    /// `maskC`: this crate requires `maskC` at construction, so that
    /// case is represented by callers passing an all-ones `mask_c`
    /// rather than by a runtime fallback here.
    pub fn masked(&self, kind: MaskKind) -> &Array3<f64> {
        match kind {
            MaskKind::C => &self.mask_c,
            MaskKind::U => self.mask_cache.u.get_or_init(|| {
                tracing::debug!(kind = "U", "materializing staggered mask");
                mask::project(&self.mask_c, MaskKind::U)
            }),
            MaskKind::V => self.mask_cache.v.get_or_init(|| {
                tracing::debug!(kind = "V", "materializing staggered mask");
                mask::project(&self.mask_c, MaskKind::V)
            }),
            MaskKind::Wvel => self.mask_cache.wvel.get_or_init(|| {
                tracing::debug!(kind = "Wvel", "materializing staggered mask");
                mask::project(&self.mask_c, MaskKind::Wvel)
            }),
        }
    }
}

impl CellGeometry for Grid {
    /// # Panics
    ///
    /// Panics if `cell` is off-grid or outside the `xc`/`yc`/... tables'
    /// shape; callers resolve a cell through [`Self::topology`] before
    /// asking for its anchor, which never produces such a cell.
    #[allow(clippy::cast_sign_loss, reason = "topology only hands back non-negative, in-bounds indices")]
    fn anchor(&self, cell: CellCoord) -> CellAnchor {
        let (iy, ix) = (cell.iy as usize, cell.ix as usize);
        CellAnchor {
            bx: self.xc[(iy, ix)],
            by: self.yc[(iy, ix)],
            cs: self.cs[(iy, ix)],
            sn: self.sn[(iy, ix)],
            dx: self.dx_c[(iy, ix)],
            dy: self.dy_c[(iy, ix)],
        }
    }
}
