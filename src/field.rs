//! Field lookup: maps a variable name to its dimensions and backing
//! data without string-matching on dimension names.

use crate::mask::MaskKind;
use ndarray::ArrayD;
use std::collections::HashMap;

/// Declares which axes a field varies over and, for staggered
/// velocity components, which mask location it should be gathered
/// against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldDescriptor {
    /// `(Y, X)`.
    Scalar2D,
    /// `(Z, Y, X)`.
    Scalar3D,
    /// `(time, Z, Y, X)`.
    Scalar4D,
    /// `(time, Z, Y, Xp1)`: zonal velocity, staggered east.
    VelocityU,
    /// `(time, Z, Yp1, X)`: meridional velocity, staggered north.
    VelocityV,
    /// `(time, Zl, Y, X)`: vertical velocity, staggered on interfaces.
    VelocityW,
    /// `(time, Y, X)`, with an implicit `z = 0` prepended before
    /// masking.
    Surface,
}

impl FieldDescriptor {
    /// Number of index axes a fattened tensor for this field must
    /// have: `(n, m, nz, nt)` is always rank 4 once broadcast, but
    /// this reports how many of those axes are non-trivial (size > 1
    /// before broadcasting), which is what
    /// [`crate::error::DimensionError`] checks against.
    #[must_use]
    pub const fn rank(self) -> usize {
        match self {
            Self::Scalar2D => 2,
            Self::Scalar3D | Self::Surface => 3,
            Self::Scalar4D
            | Self::VelocityU
            | Self::VelocityV
            | Self::VelocityW => 4,
        }
    }

    /// Whether this field's horizontal axis is staggered on `Xp1`
    /// (needs `rx` shifted by `+0.5`).
    #[must_use]
    pub const fn staggered_x(self) -> bool {
        matches!(self, Self::VelocityU)
    }

    /// Whether this field's horizontal axis is staggered on `Yp1`
    /// (needs `ry` shifted by `+0.5`).
    #[must_use]
    pub const fn staggered_y(self) -> bool {
        matches!(self, Self::VelocityV)
    }

    /// The mask location to gather this field's validity against.
    #[must_use]
    pub const fn mask_kind(self) -> MaskKind {
        match self {
            Self::Scalar2D | Self::Scalar3D | Self::Scalar4D | Self::Surface => {
                MaskKind::C
            }
            Self::VelocityU => MaskKind::U,
            Self::VelocityV => MaskKind::V,
            Self::VelocityW => MaskKind::Wvel,
        }
    }

    /// Whether this field needs a `z = 0` index prepended before
    /// masking (surface-only variables carry no `Z` axis of their
    /// own).
    #[must_use]
    pub const fn implicit_surface_z(self) -> bool {
        matches!(self, Self::Surface)
    }
}

/// Owns named fields' descriptors and backing dense arrays.
///
/// The sole entry point the interpolation façade uses to resolve a
/// variable name into dimensions and data; avoids dispatching on
/// dimension-name strings at call sites.
#[derive(Default)]
pub struct FieldTable {
    fields: HashMap<String, (FieldDescriptor, ArrayD<f64>)>,
}

impl FieldTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self { fields: HashMap::new() }
    }

    /// Registers a field, replacing any previous entry with the same
    /// name.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        descriptor: FieldDescriptor,
        data: ArrayD<f64>,
    ) {
        self.fields.insert(name.into(), (descriptor, data));
    }

    /// Looks up a field's descriptor and data.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<(FieldDescriptor, &ArrayD<f64>)> {
        self.fields.get(name).map(|(d, a)| (*d, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn velocity_u_is_staggered_on_x() {
        assert!(FieldDescriptor::VelocityU.staggered_x());
        assert!(!FieldDescriptor::VelocityU.staggered_y());
    }

    #[test]
    fn table_round_trips_a_field() {
        let mut table = FieldTable::new();
        table.insert(
            "UVEL",
            FieldDescriptor::VelocityU,
            ArrayD::zeros(IxDyn(&[2, 3, 4, 4])),
        );
        let (desc, data) = table.get("UVEL").expect("present");
        assert_eq!(desc, FieldDescriptor::VelocityU);
        assert_eq!(data.shape(), &[2, 3, 4, 4]);
    }
}
