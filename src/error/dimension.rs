use core::fmt;

/// Errors occurring when a fattened index tensor's rank doesn't match the
/// shape a field declares for itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimensionError {
    /// The rank the field declares (see
    /// [`FieldDescriptor`](crate::field::FieldDescriptor)).
    pub expected: usize,
    /// The rank actually produced by the fattener.
    pub got: usize,
}

impl DimensionError {
    pub(crate) const fn new(expected: usize, got: usize) -> Self {
        Self { expected, got }
    }
}

impl fmt::Display for DimensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected a rank-{} index tensor, got rank-{}",
            self.expected, self.got
        )
    }
}

impl std::error::Error for DimensionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}
