use crate::error::KernelError;
use itertools::Itertools;

/// Computes, for every node in `nodes`, the `order`-th derivative of its
/// Lagrange basis polynomial evaluated at `r`.
///
/// `nodes` must be distinct integer positions; `order = 0` gives plain
/// interpolation weights.
///
/// # Errors
///
/// [`KernelError::DerivativeTooHighOrder`] if `order` is at least the
/// number of nodes (a basis polynomial of degree `n-1` has no
/// non-trivial `n`-th derivative).
pub(super) fn lagrange_weights_all(
    nodes: &[i64],
    r: f64,
    order: usize,
) -> Result<Vec<f64>, KernelError> {
    if order >= nodes.len() {
        return Err(KernelError::DerivativeTooHighOrder {
            order,
            nodes: nodes.len(),
        });
    }

    Ok((0..nodes.len())
        .map(|j| lagrange_basis_derivative(nodes, j, r, order))
        .collect())
}

/// The `order`-th derivative of node `j`'s Lagrange basis polynomial,
/// `L_j(x) = prod_{k != j} (x - x_k) / (x_j - x_k)`, evaluated at `r`.
///
/// Each factor of the numerator is linear, so differentiating removes
/// exactly one factor per order; summing over every way to remove
/// `order` of the `m = nodes.len() - 1` factors gives the standard
/// identity `L_j^(d)(r) = d! / denom * e_{m-d}({r - x_k})`, where `e_i`
/// is the `i`-th elementary symmetric polynomial.
fn lagrange_basis_derivative(
    nodes: &[i64],
    j: usize,
    r: f64,
    order: usize,
) -> f64 {
    let xj = nodes[j] as f64;
    let others: Vec<f64> = nodes
        .iter()
        .enumerate()
        .filter(|&(k, _)| k != j)
        .map(|(_, &x)| r - x as f64)
        .collect();
    let denom: f64 = nodes
        .iter()
        .enumerate()
        .filter(|&(k, _)| k != j)
        .map(|(_, &x)| xj - x as f64)
        .product();

    let m = others.len();
    let factorial: f64 = (1..=order).map(|v| v as f64).product::<f64>();
    let factorial = if order == 0 { 1.0 } else { factorial };
    let sym = elementary_symmetric(&others, m - order);

    factorial * sym / denom
}

/// The `degree`-th elementary symmetric polynomial of `values`: the sum
/// of the products of every `degree`-sized subset.
fn elementary_symmetric(values: &[f64], degree: usize) -> f64 {
    if degree == 0 {
        return 1.0;
    }
    if degree > values.len() {
        return 0.0;
    }
    values
        .iter()
        .copied()
        .combinations(degree)
        .map(|subset| subset.iter().product::<f64>())
        .sum()
}
