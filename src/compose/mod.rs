//! Combines horizontal, vertical and temporal weights into the final
//! per-point weight tensor, applying the no-flux bottom correction.

use crate::config::{BottomScheme, TKernel, VKernel};
use ndarray::Array3;

/// The per-axis vertical weight vector for a given [`VKernel`].
///
/// `rz` is the fractional offset appropriate to the kernel: centered
/// (`[-0.5, 0.5]`, unused here since `nearest` needs no weight split)
/// for `nearest`, or linear (`[0, 1]`, relative to the upper interface)
/// for `linear`/`dz`.
#[must_use]
pub fn vertical_weights(vkernel: VKernel, rz: f64) -> Vec<f64> {
    match vkernel {
        VKernel::Nearest => vec![1.0],
        VKernel::Linear => vec![1.0 - rz, rz],
        VKernel::Dz => vec![-1.0, 1.0],
    }
}

/// The per-axis temporal weight vector for a given [`TKernel`].
/// Mirrors [`vertical_weights`].
#[must_use]
pub fn temporal_weights(tkernel: TKernel, rt: f64) -> Vec<f64> {
    match tkernel {
        TKernel::Nearest => vec![1.0],
        TKernel::Linear => vec![1.0 - rt, rt],
        TKernel::Dt => vec![-1.0, 1.0],
    }
}

/// Applies the no-flux bottom correction to a two-entry vertical weight
/// pair `(w[iz_lin], w[iz_lin - 1])` when exactly one of the two
/// bracketing layers is masked: the wet layer takes weight `1` and the
/// dry one `0`, regardless of `rz`, so the interpolated value is the
/// wet layer's value with no gradient toward the dry one.
///
/// No-op when both or neither layer is wet, or when `scheme` isn't
/// [`BottomScheme::NoFlux`].
pub fn apply_no_flux(
    z_weights: &mut [f64; 2],
    layer_wet: [bool; 2],
    scheme: BottomScheme,
) {
    if scheme != BottomScheme::NoFlux {
        return;
    }
    match layer_wet {
        [true, false] => {
            z_weights[0] = 1.0;
            z_weights[1] = 0.0;
        }
        [false, true] => {
            z_weights[0] = 0.0;
            z_weights[1] = 1.0;
        }
        [true, true] | [false, false] => {}
    }
}

/// Builds the dense `(m, nz, nt)` weight tensor for one query point as
/// the outer product of the horizontal, vertical and temporal weight
/// vectors.
#[must_use]
pub fn compose_4d(h: &[f64], z: &[f64], t: &[f64]) -> Array3<f64> {
    Array3::from_shape_fn((h.len(), z.len(), t.len()), |(m, zi, ti)| {
        h[m] * z[zi] * t[ti]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_vertical_weights_sum_to_one() {
        let w = vertical_weights(VKernel::Linear, 0.3);
        assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn no_flux_pins_to_wet_layer_regardless_of_rz() {
        let mut w = [0.8, 0.2];
        apply_no_flux(&mut w, [true, false], BottomScheme::NoFlux);
        assert_eq!(w, [1.0, 0.0]);
    }

    #[test]
    fn no_flux_is_noop_when_both_wet() {
        let mut w = [0.8, 0.2];
        apply_no_flux(&mut w, [true, true], BottomScheme::NoFlux);
        assert_eq!(w, [0.8, 0.2]);
    }

    #[test]
    fn no_flux_disabled_is_noop() {
        let mut w = [0.8, 0.2];
        apply_no_flux(&mut w, [true, false], BottomScheme::None);
        assert_eq!(w, [0.8, 0.2]);
    }

    #[test]
    fn compose_4d_sums_to_one_when_factors_do() {
        let h = vec![0.5, 0.5];
        let z = vec![0.3, 0.7];
        let t = vec![1.0];
        let tensor = compose_4d(&h, &z, &t);
        let sum: f64 = tensor.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}
