use serde::{Deserialize, Serialize};

use crate::{board::Position, BOARD_SIZE};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up = 0,
    Down = 1,
    Right = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Right, Self::Left];

    pub fn iter() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }

    /// `Left`/`Right` sweep rows, `Up`/`Down` sweep columns.
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Row,
            Self::Up | Self::Down => Axis::Column,
        }
    }

    /// True when tiles travel towards the high end of a line (index 3).
    pub const fn towards_end(self) -> bool {
        matches!(self, Self::Right | Self::Down)
    }
}

/// Orientation of a line of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Fixed row, varying column.
    Row,
    /// Fixed column, varying row.
    Column,
}

impl Axis {
    /// Positions of line `index` along this axis, in natural order 0..4.
    ///
    /// Panics if `index` is not below `BOARD_SIZE`.
    pub fn positions(self, index: usize) -> [Position; BOARD_SIZE] {
        assert!(index < BOARD_SIZE, "line index {index} out of range");

        let mut positions = [Position::ORIGIN; BOARD_SIZE];

        for (i, position) in positions.iter_mut().enumerate() {
            *position = match self {
                Self::Row => Position::new_unchecked(i, index),
                Self::Column => Position::new_unchecked(index, i),
            };
        }

        positions
    }
}
