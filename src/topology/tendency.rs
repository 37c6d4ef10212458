use core::fmt;

/// A unit move on the grid, in the fixed encoding used by the index
/// fattener and the particle stepper: `0 = up (+j), 1 = down (-j),
/// 2 = left (-i), 3 = right (+i)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tendency {
    /// +j.
    Up = 0,
    /// -j.
    Down = 1,
    /// -i.
    Left = 2,
    /// +i.
    Right = 3,
}

impl Tendency {
    /// All four tendencies, in their fixed encoding order.
    pub const ALL: [Self; 4] =
        [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The move that undoes this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Rotates this tendency by `quarter_turns` counterclockwise steps
    /// of 90 degrees, cycling `Up -> Left -> Down -> Right -> Up`.
    #[must_use]
    pub const fn rotate(self, quarter_turns: u8) -> Self {
        const CCW_SEQUENCE: [Tendency; 4] = [
            Tendency::Up,
            Tendency::Left,
            Tendency::Down,
            Tendency::Right,
        ];
        let start = match self {
            Self::Up => 0,
            Self::Left => 1,
            Self::Down => 2,
            Self::Right => 3,
        };
        CCW_SEQUENCE[(start + quarter_turns as usize) % 4]
    }
}

impl TryFrom<u8> for Tendency {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Up),
            1 => Ok(Self::Down),
            2 => Ok(Self::Left),
            3 => Ok(Self::Right),
            _ => Err(value),
        }
    }
}

impl fmt::Display for Tendency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        write!(f, "{s}")
    }
}
