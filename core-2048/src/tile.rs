use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a tile, stable across slides and merges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
}

impl Tile {
    /// Value of every freshly spawned tile.
    pub const SPAWN_VALUE: u32 = 2;

    pub const fn new(id: TileId, value: u32) -> Self {
        Self { id, value }
    }

    pub const fn spawned(id: TileId) -> Self {
        Self::new(id, Self::SPAWN_VALUE)
    }

    /// The tile produced when this tile absorbs an equal neighbour. Keeps this tile's id.
    pub const fn doubled(self) -> Self {
        Self::new(self.id, self.value * 2)
    }

    pub const fn exponent(self) -> u32 {
        self.value.trailing_zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubled_keeps_id() {
        let tile = Tile::new(TileId(7), 8);
        assert_eq!(tile.doubled(), Tile::new(TileId(7), 16));
    }

    #[test]
    fn test_exponent() {
        assert_eq!(Tile::spawned(TileId(1)).exponent(), 1);
        assert_eq!(Tile::new(TileId(1), 2048).exponent(), 11);
    }
}
