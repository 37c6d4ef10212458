use super::Kernel;
use ndarray::Array2;

/// A nested cascade of sub-stencils, largest first, each a subset of
/// the previous, expressed as index sets into a parent [`Kernel`]'s
/// offset list.
#[derive(Clone, Debug)]
pub struct RussianDoll {
    dolls: Vec<Vec<usize>>,
}

impl RussianDoll {
    /// Builds the cascade directly from explicit, pre-nested index
    /// sets (largest doll first).
    ///
    /// # Panics
    ///
    /// Panics if `dolls` is empty, or if any doll isn't a subset of
    /// the previous one.
    #[must_use]
    pub fn new(dolls: Vec<Vec<usize>>) -> Self {
        assert!(!dolls.is_empty(), "need at least one doll");
        for pair in dolls.windows(2) {
            let (outer, inner) = (&pair[0], &pair[1]);
            assert!(
                inner.iter().all(|i| outer.contains(i)),
                "each doll must be a subset of the previous one"
            );
        }
        Self { dolls }
    }

    /// Builds the default cascade for a [`Kernel::cross`] stencil: one
    /// doll per decreasing half-width down to the home cell alone.
    #[must_use]
    pub fn cross_cascade(kernel: &Kernel) -> Self {
        let max_half = kernel
            .offsets()
            .iter()
            .map(|&(dx, dy)| dx.unsigned_abs().max(dy.unsigned_abs()))
            .max()
            .unwrap_or(0);

        let dolls = (0..=max_half)
            .rev()
            .map(|half| {
                kernel
                    .offsets()
                    .iter()
                    .enumerate()
                    .filter(|&(_, &(dx, dy))| {
                        dx.unsigned_abs() <= half && dy.unsigned_abs() <= half
                    })
                    .map(|(i, _)| i)
                    .collect()
            })
            .collect();

        Self { dolls }
    }

    /// The cascade, largest doll first.
    #[must_use]
    pub fn dolls(&self) -> &[Vec<usize>] {
        &self.dolls
    }
}

/// Partitions the rows of `wet` (shape `N x M`, `M` matching a
/// [`RussianDoll`]'s parent kernel length) into the buckets of `dolls`.
///
/// Returns one `Vec<usize>` of row indices per doll (same order as
/// [`RussianDoll::dolls`]); a row is assigned to the first (largest)
/// doll whose nodes are all wet. Rows that don't fit even the smallest
/// doll are omitted from every bucket — downstream, such points
/// receive no weight and the interpolated value is `NaN`.
#[must_use]
pub fn find_pk_4d(wet: &Array2<bool>, dolls: &RussianDoll) -> Vec<Vec<usize>> {
    let mut pk = vec![Vec::new(); dolls.dolls().len()];

    for (row_idx, row) in wet.rows().into_iter().enumerate() {
        if let Some(bucket) = dolls
            .dolls()
            .iter()
            .position(|doll| doll.iter().all(|&m| row[m]))
        {
            pk[bucket].push(row_idx);
        }
    }

    pk
}
