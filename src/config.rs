//! Interpolation configuration knobs.

/// Vertical stencil kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VKernel {
    /// Pick the nearest layer; no vertical interpolation.
    Nearest,
    /// Linear interpolation between the bracketing layers.
    #[default]
    Linear,
    /// Finite-difference vertical gradient (first derivative).
    Dz,
}

/// Temporal stencil kind. Mirrors [`VKernel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TKernel {
    /// Pick the nearest time step.
    Nearest,
    /// Linear interpolation between bracketing time steps.
    #[default]
    Linear,
    /// Finite-difference time derivative.
    Dt,
}

/// Bottom-boundary treatment for vertical interpolation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BottomScheme {
    /// Extrapolate with zero gradient past the last wet layer.
    #[default]
    NoFlux,
    /// No special handling; masked contributions stay masked out.
    None,
}

/// Which staggered location to resolve a field's indices against.
///
/// Re-exported alongside [`crate::mask::MaskKind`], which this mirrors;
/// kept distinct because a caller may want a `GridType` without pulling
/// in mask-projection machinery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GridType {
    /// Cell-center scalar location.
    #[default]
    C,
    /// Zonal-velocity location.
    U,
    /// Meridional-velocity location.
    V,
    /// Vertical-velocity location.
    Wvel,
}

impl From<GridType> for crate::mask::MaskKind {
    fn from(value: GridType) -> Self {
        match value {
            GridType::C => Self::C,
            GridType::U => Self::U,
            GridType::V => Self::V,
            GridType::Wvel => Self::Wvel,
        }
    }
}

/// Logging verbosity for the mask projector and the particle stepper.
///
/// Gates `tracing` events emitted by the library; does not affect
/// error reporting, which always happens through `Result`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DebugLevel {
    /// Warnings only.
    #[default]
    Low,
    /// Also logs mask materialization.
    Medium,
    /// Also logs per-batch fattener activity.
    High,
    /// Also logs per-iteration stepper activity.
    VeryHigh,
}

/// Bundles the knobs that select how the interpolation façade and the
/// particle stepper build their weight tensors.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterpConfig {
    /// Vertical stencil kind.
    pub vkernel: VKernel,
    /// Temporal stencil kind.
    pub tkernel: TKernel,
    /// Bottom-boundary treatment.
    pub bottom_scheme: BottomScheme,
    /// Staggered location to resolve indices against.
    pub gridtype: GridType,
    /// Rotate interpolated vectors to the geographic (east, north)
    /// frame; `false` leaves them in the home cell's local axes.
    pub vec_transform: bool,
    /// Byte budget for the particle stepper's preload-vs-gather
    /// strategy (see [`crate::stepper`]).
    pub memory_limit: usize,
    /// Zero the surface vertical velocity before advecting, preventing
    /// particles from being lifted out of the ocean by a nonzero
    /// diagnostic `w` at the surface.
    pub dont_fly: bool,
}

impl Default for InterpConfig {
    fn default() -> Self {
        Self {
            vkernel: VKernel::default(),
            tkernel: TKernel::default(),
            bottom_scheme: BottomScheme::default(),
            gridtype: GridType::default(),
            vec_transform: true,
            memory_limit: 1 << 30, // 1 GiB
            dont_fly: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_defaults() {
        let cfg = InterpConfig::default();
        assert_eq!(cfg.tkernel, TKernel::Linear);
        assert_eq!(cfg.bottom_scheme, BottomScheme::NoFlux);
        assert!(cfg.vec_transform);
        assert!(cfg.dont_fly);
    }

    #[test]
    fn debug_level_orders_by_verbosity() {
        assert!(DebugLevel::Low < DebugLevel::Medium);
        assert!(DebugLevel::Medium < DebugLevel::High);
        assert!(DebugLevel::High < DebugLevel::VeryHigh);
    }
}
