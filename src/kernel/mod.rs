//! Interpolation stencils and their Lagrange weight functions.
//!
//! A [`Kernel`] names the nodes (integer cell offsets from the home
//! cell) a weight function draws on; a [`RussianDoll`] orders a
//! kernel's nodes into nested sub-stencils so the
//! [`find_pk_4d`] selector can fall back to a smaller, fully-wet
//! stencil near a coastline rather than read masked data.

mod lagrange;
mod russian_doll;

pub use russian_doll::{find_pk_4d, RussianDoll};

use crate::error::KernelError;
use lagrange::lagrange_weights_all;

/// Which quantity a weight function computes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KernelKind {
    /// The interpolated value itself.
    Interp,
    /// First derivative along x.
    Dx,
    /// First derivative along y.
    Dy,
}

/// The shape of a stencil's nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StencilShape {
    /// Nodes lie only on the home cell's x-axis or y-axis; the
    /// interpolant decomposes as `fx(rx) + fy(ry) - f(0,0)`.
    Cross,
    /// Nodes form a full rectangular grid; the interpolant is the
    /// tensor product of per-axis Lagrange polynomials.
    Rectangular,
}

/// An ordered list of integer `(dx, dy)` cell offsets from the home
/// cell, plus the decomposition used to turn them into weights.
///
/// Offset order is significant: it's the order results are returned
/// in, and [`RussianDoll`] sub-kernels are expressed as index subsets
/// into this list.
#[derive(Clone, Debug)]
pub struct Kernel {
    offsets: Vec<(i64, i64)>,
    shape: StencilShape,
}

impl Kernel {
    /// Builds a cross-shaped stencil: the home cell plus `half_x` nodes
    /// on either side along x and `half_y` nodes on either side along
    /// y. `half_x = half_y = 2` gives the crate's default 9-point
    /// stencil.
    #[must_use]
    pub fn cross(half_x: i64, half_y: i64) -> Self {
        let mut offsets = vec![(0, 0)];
        for dx in 1..=half_x {
            offsets.push((dx, 0));
            offsets.push((-dx, 0));
        }
        for dy in 1..=half_y {
            offsets.push((0, dy));
            offsets.push((0, -dy));
        }
        Self { offsets, shape: StencilShape::Cross }
    }

    /// Builds a full rectangular (tensor-product) stencil.
    #[must_use]
    pub fn rectangular(half_x: i64, half_y: i64) -> Self {
        let mut offsets = Vec::new();
        for dy in -half_y..=half_y {
            for dx in -half_x..=half_x {
                offsets.push((dx, dy));
            }
        }
        Self { offsets, shape: StencilShape::Rectangular }
    }

    /// The crate's default kernel: a 9-point cross stencil
    /// (`half_x = half_y = 2`), matching a 4th-order fit along each
    /// axis.
    #[must_use]
    pub fn default_cross() -> Self {
        Self::cross(2, 2)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the stencil has no nodes (never true for kernels built
    /// through the constructors above, which always include the home
    /// cell).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The `(dx, dy)` offsets, in the order weights are returned.
    #[must_use]
    pub fn offsets(&self) -> &[(i64, i64)] {
        &self.offsets
    }

    /// The stencil's decomposition.
    #[must_use]
    pub const fn shape(&self) -> StencilShape {
        self.shape
    }

    /// Builds the sub-kernel containing only the given offset indices,
    /// preserving their relative order and this kernel's decomposition.
    ///
    /// Used to compile a doll-specific weight function: each
    /// [`crate::kernel::RussianDoll`] layer gets its own [`Kernel`]
    /// over just its nodes, rather than zeroing the unused nodes of
    /// the full stencil.
    #[must_use]
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            offsets: indices.iter().map(|&i| self.offsets[i]).collect(),
            shape: self.shape,
        }
    }

    fn axis_nodes(&self, cross_axis_is_x: bool) -> Vec<i64> {
        match self.shape {
            StencilShape::Cross => {
                let mut nodes: Vec<i64> = self
                    .offsets
                    .iter()
                    .filter_map(|&(dx, dy)| {
                        if cross_axis_is_x && dy == 0 {
                            Some(dx)
                        } else if !cross_axis_is_x && dx == 0 {
                            Some(dy)
                        } else {
                            None
                        }
                    })
                    .collect();
                nodes.sort_unstable();
                nodes.dedup();
                nodes
            }
            StencilShape::Rectangular => {
                let mut nodes: Vec<i64> = self
                    .offsets
                    .iter()
                    .map(
                        |&(dx, dy)| {
                            if cross_axis_is_x {
                                dx
                            } else {
                                dy
                            }
                        },
                    )
                    .collect();
                nodes.sort_unstable();
                nodes.dedup();
                nodes
            }
        }
    }

    /// Computes one weight per offset (in [`Self::offsets`] order) for
    /// the given fractional home-cell position and [`KernelKind`].
    ///
    /// # Errors
    ///
    /// [`KernelError::DerivativeTooHighOrder`] if `kind` requests a
    /// derivative of an order the stencil's node count along that axis
    /// can't support.
    pub fn weights(
        &self,
        rx: f64,
        ry: f64,
        kind: KernelKind,
    ) -> Result<Vec<f64>, KernelError> {
        let x_nodes = self.axis_nodes(true);
        let y_nodes = self.axis_nodes(false);
        let x_order = usize::from(kind == KernelKind::Dx);
        let y_order = usize::from(kind == KernelKind::Dy);

        let lx = lagrange_weights_all(&x_nodes, rx, x_order)?;
        let ly = lagrange_weights_all(&y_nodes, ry, y_order)?;
        let lx_at = |d: i64| lx[x_nodes.iter().position(|&n| n == d).expect("node present")];
        let ly_at = |d: i64| ly[y_nodes.iter().position(|&n| n == d).expect("node present")];

        Ok(self
            .offsets
            .iter()
            .map(|&(dx, dy)| match self.shape {
                StencilShape::Cross => cross_weight(dx, dy, kind, lx_at, ly_at),
                StencilShape::Rectangular => lx_at(dx) * ly_at(dy),
            })
            .collect())
    }
}

fn cross_weight(
    dx: i64,
    dy: i64,
    kind: KernelKind,
    lx_at: impl Fn(i64) -> f64,
    ly_at: impl Fn(i64) -> f64,
) -> f64 {
    if dx != 0 {
        match kind {
            KernelKind::Dy => 0.0,
            KernelKind::Interp | KernelKind::Dx => lx_at(dx),
        }
    } else if dy != 0 {
        match kind {
            KernelKind::Dx => 0.0,
            KernelKind::Interp | KernelKind::Dy => ly_at(dy),
        }
    } else {
        match kind {
            KernelKind::Interp => lx_at(0) + ly_at(0) - 1.0,
            KernelKind::Dx => lx_at(0),
            KernelKind::Dy => ly_at(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interp_weights_sum_to_one() {
        let kernel = Kernel::default_cross();
        let w = kernel.weights(0.17, -0.34, KernelKind::Interp).expect("ok");
        let sum: f64 = w.iter().sum();
        assert!((sum - 1.0).abs() < 1e-10, "sum was {sum}");
    }

    #[test]
    fn interp_reproduces_linear_field() {
        // f(x,y) = x: any cross kernel should exactly reproduce a
        // field that is linear in the home cell's local x coordinate.
        let kernel = Kernel::cross(1, 1);
        let rx = 0.3;
        let ry = -0.2;
        let w = kernel.weights(rx, ry, KernelKind::Interp).expect("ok");
        let values: f64 = kernel
            .offsets()
            .iter()
            .zip(w.iter())
            .map(|(&(dx, _), &wi)| dx as f64 * wi)
            .sum();
        assert!((values - rx).abs() < 1e-10);
    }

    #[test]
    fn rectangular_tensor_product_sums_to_one() {
        let kernel = Kernel::rectangular(1, 1);
        let w = kernel.weights(0.1, 0.4, KernelKind::Interp).expect("ok");
        let sum: f64 = w.iter().sum();
        assert!((sum - 1.0).abs() < 1e-10);
    }

    #[test]
    fn derivative_too_high_order_is_reported() {
        let kernel = Kernel::cross(0, 0); // only the home node on each axis
        let err = kernel.weights(0.0, 0.0, KernelKind::Dx).unwrap_err();
        assert!(matches!(
            err,
            KernelError::DerivativeTooHighOrder { order: 1, nodes: 1 }
        ));
    }
}
