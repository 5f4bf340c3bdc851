use strum::VariantArray;

use crate::location::Location;

/// The four ways to leave a square cell; white regions are connected along these and nothing else.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    Up,
    Down,
    Left,
    Right,
}

impl SquareStep {
    /// The [`Location`] reached by stepping from `location` in this direction.
    ///
    /// The result may lie outside the board; callers bounds-check it against their grid.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }
}
