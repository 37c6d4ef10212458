use super::{latlon_to_local, RelH};

/// Finds the cell owning a geographic point and the point's fractional
/// offset inside it.
///
/// Production deployments back this with a real spatial index (a
/// kd-tree over cell centers, as real ocean-model grids typically
/// carry tens of thousands to millions of cells). Building and
/// maintaining that index is explicitly out of scope for this crate;
/// [`BruteForceLocator`] is a reference implementation so the rest of
/// the pipeline is runnable and testable standalone.
pub trait PointLocator {
    /// Locates `(lon, lat)`, returning `None` if the point falls
    /// outside the grid's coverage.
    fn locate(&self, lon: f64, lat: f64) -> Option<RelH>;
}

/// A reference [`PointLocator`] that scans every cell center for the
/// nearest match.
///
/// `O(n)` per query; unsuitable for grids beyond a few thousand cells.
/// Kept as the crate's default because it needs no auxiliary index and
/// is trivially correct, which makes it useful for tests and small
/// grids.
pub struct BruteForceLocator<'a> {
    xc: &'a [f64],
    yc: &'a [f64],
    dx: &'a [f64],
    dy: &'a [f64],
    cs: &'a [f64],
    sn: &'a [f64],
    #[allow(dead_code, reason = "kept for symmetry with nx and future use")]
    ny: usize,
    nx: usize,
}

impl<'a> BruteForceLocator<'a> {
    /// Builds a locator over flattened, row-major `(ny, nx)` cell-center
    /// tables.
    ///
    /// # Panics
    ///
    /// Panics if the table lengths don't all equal `ny * nx`.
    #[must_use]
    pub fn new(
        xc: &'a [f64],
        yc: &'a [f64],
        dx: &'a [f64],
        dy: &'a [f64],
        cs: &'a [f64],
        sn: &'a [f64],
        ny: usize,
        nx: usize,
    ) -> Self {
        let n = ny * nx;
        assert!(
            xc.len() == n
                && yc.len() == n
                && dx.len() == n
                && dy.len() == n
                && cs.len() == n
                && sn.len() == n,
            "all tables must have ny*nx elements"
        );
        Self { xc, yc, dx, dy, cs, sn, ny, nx }
    }
}

impl PointLocator for BruteForceLocator<'_> {
    fn locate(&self, lon: f64, lat: f64) -> Option<RelH> {
        let mut best: Option<(usize, f64)> = None;

        for idx in 0..self.xc.len() {
            let dlon = super::to_180(lon - self.xc[idx]);
            let dlat = lat - self.yc[idx];
            let dist2 = dlon * dlon + dlat * dlat;
            if best.is_none_or(|(_, best_dist2)| dist2 < best_dist2) {
                best = Some((idx, dist2));
            }
        }

        let (idx, _) = best?;
        let iy = idx / self.nx;
        let ix = idx % self.nx;
        let (cs, sn) = (self.cs[idx], self.sn[idx]);
        let (dx, dy) = (self.dx[idx], self.dy[idx]);

        let dlon = super::to_180(lon - self.xc[idx]);
        let dlat = lat - self.yc[idx];
        let (u, v) = latlon_to_local(dlon, dlat, cs, sn);
        let rx = (u / dx).clamp(-0.5, 0.5);
        let ry = (v / dy).clamp(-0.5, 0.5);

        #[allow(
            clippy::cast_possible_wrap,
            reason = "grid dimensions never approach i64::MAX"
        )]
        Some(RelH {
            face: 0,
            iy: iy as i64,
            ix: ix as i64,
            rx,
            ry,
            cs,
            sn,
            dx,
            dy,
            bx: self.xc[idx],
            by: self.yc[idx],
        })
    }
}
