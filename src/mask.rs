//! Staggered mask projection.
//!
//! Ocean-model masks are defined on the scalar (`C`) grid; velocity
//! components live on staggered locations whose masks are derived from
//! `maskC` by purely local rules (see [`MaskKind`]).

use ndarray::Array3;

/// Which staggered location a mask (or a field sampled on that
/// location) lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MaskKind {
    /// Cell-center scalar location.
    C,
    /// Zonal-velocity (east face) location.
    U,
    /// Meridional-velocity (north face) location.
    V,
    /// Vertical-velocity (upper face) location.
    Wvel,
}

/// Derives the `U`, `V` or `Wvel` mask from a `(nz, ny, nx)` `maskC`
/// tensor using the local rules:
///
/// - `U(z,j,i)` is wet if `C(z,j,i)` or `C(z,j,i-1)` is wet.
/// - `V(z,j,i)` is wet if `C(z,j,i)` or `C(z,j-1,i)` is wet.
/// - `Wvel(z,j,i)` is wet if `C(z,j,i)` or `C(z-1,j,i)` is wet, with
///   `Wvel[0]` equal to `C[0]` (no layer above the surface).
///
/// `C` is returned as-is (cloned).
#[must_use]
pub fn project(mask_c: &Array3<f64>, kind: MaskKind) -> Array3<f64> {
    let (nz, ny, nx) = mask_c.dim();
    match kind {
        MaskKind::C => mask_c.clone(),
        MaskKind::U => Array3::from_shape_fn((nz, ny, nx), |(z, j, i)| {
            let here = mask_c[(z, j, i)];
            let west = if i == 0 { 0.0 } else { mask_c[(z, j, i - 1)] };
            f64::from(here != 0.0 || west != 0.0)
        }),
        MaskKind::V => Array3::from_shape_fn((nz, ny, nx), |(z, j, i)| {
            let here = mask_c[(z, j, i)];
            let south = if j == 0 { 0.0 } else { mask_c[(z, j - 1, i)] };
            f64::from(here != 0.0 || south != 0.0)
        }),
        MaskKind::Wvel => Array3::from_shape_fn((nz, ny, nx), |(z, j, i)| {
            if z == 0 {
                mask_c[(z, j, i)]
            } else {
                let here = mask_c[(z, j, i)];
                let above = mask_c[(z - 1, j, i)];
                f64::from(here != 0.0 || above != 0.0)
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn single_layer(rows: [[f64; 3]; 2]) -> Array3<f64> {
        Array3::from_shape_fn((1, 2, 3), |(_, j, i)| rows[j][i])
    }

    #[test]
    fn u_mask_unions_with_west_neighbor() {
        let mask_c = single_layer([[0.0, 1.0, 0.0], [1.0, 0.0, 1.0]]);
        let u = project(&mask_c, MaskKind::U);

        // West boundary: only the home cell counts.
        assert_eq!(u[(0, 0, 0)], 0.0);
        // i=1 wet because home (1) is wet.
        assert_eq!(u[(0, 0, 1)], 1.0);
        // i=2 wet because west neighbor (i=1) is wet even though home is dry.
        assert_eq!(u[(0, 0, 2)], 1.0);
    }

    #[test]
    fn wvel_top_layer_equals_mask_c() {
        let mask_c = single_layer([[1.0, 0.0, 1.0], [0.0, 0.0, 0.0]]);
        let w = project(&mask_c, MaskKind::Wvel);

        for i in 0..3 {
            assert_eq!(w[(0, 0, i)], mask_c[(0, 0, i)]);
        }
    }

    #[test]
    fn c_mask_is_identity() {
        let mask_c = single_layer([[1.0, 0.0, 1.0], [0.0, 1.0, 0.0]]);
        assert_eq!(project(&mask_c, MaskKind::C), mask_c);
    }

    #[test]
    fn v_mask_unions_with_south_neighbor() {
        let mask_c = array![[[0.0, 0.0], [1.0, 1.0]]];
        let v = project(&mask_c, MaskKind::V);
        assert_eq!(v[(0, 0, 0)], 0.0);
        assert_eq!(v[(0, 1, 0)], 1.0);
    }
}
