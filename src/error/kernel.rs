use core::fmt;

/// Errors raised while constructing or selecting an interpolation kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum KernelError {
    /// The requested derivative order is at least as large as the number
    /// of distinct nodes available along that axis.
    DerivativeTooHighOrder {
        /// The requested order.
        order: usize,
        /// The number of distinct nodes on the axis.
        nodes: usize,
    },
    /// `u` and `v` kernels differ in stencil size; cross-face vector
    /// rotation requires both components to share a stencil shape.
    VectorKernelSizeMismatch {
        /// Size of the `u` stencil.
        u_len: usize,
        /// Size of the `v` stencil.
        v_len: usize,
    },
    /// The requested vertical or temporal kernel kind isn't one of the
    /// supported variants.
    UnsupportedKernelKind,
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::DerivativeTooHighOrder { order, nodes } => write!(
                f,
                "derivative order {order} requires more than {nodes} nodes"
            ),
            Self::VectorKernelSizeMismatch { u_len, v_len } => write!(
                f,
                "u kernel has {u_len} nodes but v kernel has {v_len}"
            ),
            Self::UnsupportedKernelKind => {
                write!(f, "unsupported kernel kind")
            }
        }
    }
}

impl std::error::Error for KernelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}
