//! The interpolation façade: resolves a field name and a query point
//! to an interpolated value (or a rotated vector pair).
//!
//! This implementation models a single grid face's tables; a
//! multi-face deployment composes several [`Interpolator`]s (one per
//! face) behind [`crate::topology::Topology`]'s cross-face routing and
//! rotates stencil-node samples gathered from a neighboring face's
//! table with [`four_matrix_for_uv`](crate::topology::four_matrix_for_uv)
//! before summation, as described in the crate's design notes.

use crate::compose::{apply_no_flux, compose_4d, temporal_weights, vertical_weights};
use crate::config::InterpConfig;
use crate::coord::{bracket, local_to_latlon, PointLocator, RelH};
use crate::error::{DimensionError, InterpError};
use crate::field::{FieldDescriptor, FieldTable};
use crate::fatten::fatten_h;
use crate::grid::Grid;
use crate::kernel::{find_pk_4d, Kernel, KernelKind, RussianDoll};
use crate::topology::{four_matrix_for_uv, CellCoord};
use ndarray::ArrayD;

/// Ties a grid, its field table and a kernel cascade together behind a
/// single entry point.
pub struct Interpolator<'a> {
    grid: &'a Grid,
    fields: &'a FieldTable,
    kernel: Kernel,
    dolls: RussianDoll,
    config: InterpConfig,
}

impl<'a> Interpolator<'a> {
    /// Builds a façade over `grid` and `fields` using the crate's
    /// default 9-point cross kernel and cascade.
    #[must_use]
    pub fn new(grid: &'a Grid, fields: &'a FieldTable, config: InterpConfig) -> Self {
        let kernel = Kernel::default_cross();
        let dolls = RussianDoll::cross_cascade(&kernel);
        Self { grid, fields, kernel, dolls, config }
    }

    /// Interpolates a scalar field at `(lon, lat, dep, time)`.
    ///
    /// Returns `Ok(f64::NAN)` for a point outside the grid's coverage
    /// or whose stencil has no fully-wet doll, matching the crate's
    /// "out-of-grid query" and "no bucket" behaviors rather than
    /// raising.
    ///
    /// # Errors
    ///
    /// [`InterpError::FieldNotFound`] if `name` isn't registered.
    /// [`InterpError::Kernel`] if the configured kernel can't be
    /// built for this field (e.g. derivative order too high).
    /// [`InterpError::Dimension`] if the backing array's rank doesn't
    /// match what `name`'s [`FieldDescriptor`] declares.
    pub fn interpolate_scalar(
        &self,
        name: &str,
        locator: &dyn PointLocator,
        lon: f64,
        lat: f64,
        dep: f64,
        time: f64,
    ) -> Result<f64, InterpError> {
        let (descriptor, data) =
            self.fields.get(name).ok_or(InterpError::FieldNotFound)?;

        let Some(rel_h) = locator.locate(lon, lat) else {
            return Ok(f64::NAN);
        };

        let fattened = fatten_h(&[rel_h], &self.kernel, self.grid.topology());
        let cells: Vec<CellCoord> = fattened.cells.row(0).to_vec();

        match self.node_contributions(descriptor, data, rel_h, dep, time, &cells)? {
            Some(nodes) => Ok(nodes.into_iter().sum()),
            None => Ok(f64::NAN),
        }
    }

    /// Interpolates a vector field stored as a `(uname, vname)` pair.
    ///
    /// Before summation, each stencil node's sampled `(u, v)` is rotated
    /// from its own cell's face into the home cell's face axes via
    /// [`four_matrix_for_uv`], so the weighted sum is well-defined even
    /// when the stencil straddles a multi-face topology seam. The result
    /// is in the home cell's local axes unless
    /// [`InterpConfig::vec_transform`] requests the final rotation to
    /// the geographic (east, north) frame.
    ///
    /// Returns `(NAN, NAN)` under the same out-of-grid / no-bucket
    /// conditions as [`Self::interpolate_scalar`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::interpolate_scalar`], evaluated independently for
    /// each component.
    pub fn interpolate_vector(
        &self,
        uname: &str,
        vname: &str,
        locator: &dyn PointLocator,
        lon: f64,
        lat: f64,
        dep: f64,
        time: f64,
    ) -> Result<(f64, f64), InterpError> {
        let (u_descriptor, u_data) =
            self.fields.get(uname).ok_or(InterpError::FieldNotFound)?;
        let (v_descriptor, v_data) =
            self.fields.get(vname).ok_or(InterpError::FieldNotFound)?;

        let Some(rel_h) = locator.locate(lon, lat) else {
            return Ok((f64::NAN, f64::NAN));
        };

        let fattened = fatten_h(&[rel_h], &self.kernel, self.grid.topology());
        let cells: Vec<CellCoord> = fattened.cells.row(0).to_vec();
        let rotation = fattened.rotation.row(0);

        let Some(u_nodes) =
            self.node_contributions(u_descriptor, u_data, rel_h, dep, time, &cells)?
        else {
            return Ok((f64::NAN, f64::NAN));
        };
        let Some(v_nodes) =
            self.node_contributions(v_descriptor, v_data, rel_h, dep, time, &cells)?
        else {
            return Ok((f64::NAN, f64::NAN));
        };

        let mut u_total = 0.0;
        let mut v_total = 0.0;
        for m in 0..cells.len() {
            let (a, b, c, d) = four_matrix_for_uv(rotation[m]);
            let (node_u, node_v) = (u_nodes[m], v_nodes[m]);
            u_total += a.mul_add(node_u, b * node_v);
            v_total += c.mul_add(node_u, d * node_v);
        }

        if self.config.vec_transform {
            Ok(local_to_latlon(u_total, v_total, rel_h.cs, rel_h.sn))
        } else {
            Ok((u_total, v_total))
        }
    }

    /// Computes, for a single field, the per-stencil-node weighted
    /// contribution to the interpolated value: `node[m]` already
    /// includes that node's horizontal, vertical and temporal weights,
    /// so `node.iter().sum()` equals [`Self::interpolate_scalar`]'s
    /// result. Kept separate so [`Self::interpolate_vector`] can rotate
    /// each node's `(u, v)` pair before summing across the stencil.
    ///
    /// Returns `None` for an out-of-grid query or a point with no
    /// fully-wet doll bucket.
    fn node_contributions(
        &self,
        descriptor: FieldDescriptor,
        data: &ArrayD<f64>,
        rel_h: RelH,
        dep: f64,
        time: f64,
        cells: &[CellCoord],
    ) -> Result<Option<Vec<f64>>, InterpError> {
        if data.ndim() != descriptor.rank() {
            return Err(DimensionError::new(descriptor.rank(), data.ndim()).into());
        }

        let z_axis = match descriptor {
            FieldDescriptor::VelocityW => self.grid.zl(),
            _ => self.grid.z(),
        };
        let Some((iz, rz)) = bracket(z_axis.as_slice().expect("contiguous"), dep)
        else {
            return Ok(None);
        };
        let Some((it, rt)) =
            bracket(self.grid.time().as_slice().expect("contiguous"), time)
        else {
            return Ok(None);
        };
        #[allow(
            clippy::cast_possible_wrap,
            reason = "axis lengths never approach i64::MAX"
        )]
        let iz = iz as i64;
        #[allow(clippy::cast_possible_wrap, reason = "see above")]
        let it = it as i64;

        let mask = self.grid.masked(descriptor.mask_kind());
        let nz_max = mask.dim().0 as i64 - 1;

        let home_wet: Vec<bool> =
            cells.iter().map(|&c| cell_wet(mask, c, iz.min(nz_max))).collect();
        let wet_row = ndarray::Array2::from_shape_vec(
            (1, home_wet.len()),
            home_wet.clone(),
        )
        .expect("shape matches");
        let buckets = find_pk_4d(&wet_row, &self.dolls);

        let Some(bucket) = buckets.iter().position(|b| !b.is_empty()) else {
            return Ok(None);
        };
        let indices = &self.dolls.dolls()[bucket];
        let sub_kernel = self.kernel.subset(indices);

        // A staggered field (U on Xp1, V on Yp1) is addressed relative
        // to its own face, half a cell east/north of the tracer grid
        // this locator was built against; shift the weight-evaluation
        // point to match before asking the kernel for weights.
        let wx = rel_h.rx + if descriptor.staggered_x() { 0.5 } else { 0.0 };
        let wy = rel_h.ry + if descriptor.staggered_y() { 0.5 } else { 0.0 };
        let sub_weights = sub_kernel.weights(wx, wy, KernelKind::Interp)?;

        let mut h_weights = vec![0.0; self.kernel.len()];
        for (&idx, &w) in indices.iter().zip(sub_weights.iter()) {
            h_weights[idx] = w;
        }

        let z_weights_vec = vertical_weights(self.config.vkernel, rz);
        let mut z_pair = [1.0, 0.0];
        let z_indices: Vec<i64> = if z_weights_vec.len() == 2 {
            let lower = (iz - 1).max(0);
            z_pair = [z_weights_vec[0], z_weights_vec[1]];
            vec![iz.min(nz_max), lower.min(nz_max)]
        } else {
            vec![iz.min(nz_max)]
        };
        if z_weights_vec.len() == 2 {
            let home_cell = cells[0];
            let wet_pair = [
                cell_wet(mask, home_cell, z_indices[0]),
                z_indices[1] != z_indices[0]
                    && cell_wet(mask, home_cell, z_indices[1]),
            ];
            apply_no_flux(&mut z_pair, wet_pair, self.config.bottom_scheme);
        }
        let z_weights: Vec<f64> = if z_weights_vec.len() == 2 {
            z_pair.to_vec()
        } else {
            z_weights_vec
        };

        let t_weights_vec = temporal_weights(self.config.tkernel, rt);
        let t_indices: Vec<i64> =
            if t_weights_vec.len() == 2 { vec![it, it + 1] } else { vec![it] };

        let tensor = compose_4d(&h_weights, &z_weights, &t_weights_vec);

        let mut nodes = vec![0.0; cells.len()];
        for (m, &cell) in cells.iter().enumerate() {
            if cell.is_off_grid() {
                continue;
            }
            let mut value = 0.0;
            for (zi, &z_idx) in z_indices.iter().enumerate() {
                for (ti, &t_idx) in t_indices.iter().enumerate() {
                    let w = tensor[(m, zi, ti)];
                    if w == 0.0 {
                        continue;
                    }
                    value += w * gather(data, descriptor, t_idx, z_idx, cell);
                }
            }
            nodes[m] = value;
        }

        Ok(Some(nodes))
    }
}

fn cell_wet(mask: &ndarray::Array3<f64>, cell: CellCoord, iz: i64) -> bool {
    if cell.is_off_grid() || iz < 0 {
        return false;
    }
    let (nz, ny, nx) = mask.dim();
    #[allow(clippy::cast_sign_loss, reason = "bounds checked just below")]
    let (iz, iy, ix) = (iz as usize, cell.iy, cell.ix);
    if iz >= nz || iy < 0 || ix < 0 {
        return false;
    }
    #[allow(clippy::cast_sign_loss, reason = "bounds checked just above")]
    let (iy, ix) = (iy as usize, ix as usize);
    iy < ny && ix < nx && mask[(iz, iy, ix)] != 0.0
}

fn gather(
    data: &ArrayD<f64>,
    descriptor: FieldDescriptor,
    it: i64,
    iz: i64,
    cell: CellCoord,
) -> f64 {
    if cell.is_off_grid() || iz < 0 || it < 0 {
        return 0.0;
    }
    #[allow(clippy::cast_sign_loss, reason = "negative values filtered above")]
    let (it, iz, iy, ix) =
        (it as usize, iz as usize, cell.iy as usize, cell.ix as usize);
    let idx: &[usize] = match descriptor {
        FieldDescriptor::Scalar2D => return index_or_zero(data, &[iy, ix]),
        FieldDescriptor::Scalar3D => return index_or_zero(data, &[iz, iy, ix]),
        FieldDescriptor::Surface => return index_or_zero(data, &[it, iy, ix]),
        FieldDescriptor::Scalar4D
        | FieldDescriptor::VelocityU
        | FieldDescriptor::VelocityV
        | FieldDescriptor::VelocityW => &[it, iz, iy, ix],
    };
    index_or_zero(data, idx)
}

fn index_or_zero(data: &ArrayD<f64>, idx: &[usize]) -> f64 {
    data.get(ndarray::IxDyn(idx)).copied().unwrap_or(0.0)
}

/// Rotates an interpolated local `(u, v)` pair to the geographic
/// (east, north) frame using the home cell's axis cosine/sine, the
/// final step of vector interpolation when
/// [`InterpConfig::vec_transform`] is set.
#[must_use]
pub fn vec_transform(u: f64, v: f64, cs: f64, sn: f64) -> (f64, f64) {
    local_to_latlon(u, v, cs, sn)
}

#[cfg(test)]
#[path = "./tests.rs"]
mod tests;
