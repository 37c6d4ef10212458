//! Error types for grid topology, kernel construction, dimension matching
//! and coordinate validation.

mod coordinate;
mod dimension;
mod kernel;

pub use coordinate::InvalidCoordinate;
pub use dimension::DimensionError;
pub use kernel::KernelError;

use core::fmt;

/// Top-level error produced by the interpolation façade and the particle
/// stepper.
///
/// Aggregates the family-specific errors (see [`KernelError`],
/// [`DimensionError`], [`InvalidCoordinate`]) behind a single type so
/// callers that don't care about the exact failure family can propagate
/// with `?` without naming each one.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum InterpError {
    /// A kernel was requested that cannot be built (see [`KernelError`]).
    Kernel(KernelError),
    /// Fattened index rank doesn't match a field's declared dimensions.
    Dimension(DimensionError),
    /// A query coordinate is not finite.
    Coordinate(InvalidCoordinate),
    /// The requested field name isn't registered in the
    /// [`crate::field::FieldTable`].
    FieldNotFound,
}

impl fmt::Display for InterpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Kernel(ref err) => write!(f, "kernel error: {err}"),
            Self::Dimension(ref err) => write!(f, "dimension error: {err}"),
            Self::Coordinate(ref err) => write!(f, "coordinate error: {err}"),
            Self::FieldNotFound => write!(f, "field not found"),
        }
    }
}

impl std::error::Error for InterpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Self::Kernel(ref err) => Some(err),
            Self::Dimension(ref err) => Some(err),
            Self::Coordinate(ref err) => Some(err),
            Self::FieldNotFound => None,
        }
    }
}

impl From<KernelError> for InterpError {
    fn from(value: KernelError) -> Self {
        Self::Kernel(value)
    }
}

impl From<DimensionError> for InterpError {
    fn from(value: DimensionError) -> Self {
        Self::Dimension(value)
    }
}

impl From<InvalidCoordinate> for InterpError {
    fn from(value: InvalidCoordinate) -> Self {
        Self::Coordinate(value)
    }
}
