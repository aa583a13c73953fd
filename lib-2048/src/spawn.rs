use rand::Rng;
use tracing::trace;

use core_2048::{Board, Position, Tile, TileId};

/// Number of tiles placed by each spawn step.
pub const SPAWN_COUNT: usize = 2;

/// Source of tile ids. The first id handed out is 1.
#[derive(Clone, Debug, Default)]
pub struct TileIds {
    last: u64,
}

impl TileIds {
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Continues numbering after `id`.
    pub const fn after(id: TileId) -> Self {
        Self { last: id.0 }
    }

    pub fn fresh(&mut self) -> TileId {
        self.last += 1;
        TileId(self.last)
    }
}

/// Places `SPAWN_COUNT` new value-2 tiles on distinct empty cells.
///
/// Does nothing when fewer than `SPAWN_COUNT` cells are empty. The first cell is drawn uniformly
/// from `board.empty_cells()`; its slot is then filled with the last candidate and the second cell
/// is drawn from the remaining ones.
pub fn spawn_tiles<R: Rng + ?Sized>(
    board: &mut Board,
    rng: &mut R,
    ids: &mut TileIds,
) -> Vec<(Position, Tile)> {
    let mut candidates = board.empty_cells();

    if candidates.len() < SPAWN_COUNT {
        trace!(empty = candidates.len(), "not enough room to spawn");
        return Vec::new();
    }

    (0..SPAWN_COUNT)
        .map(|_| {
            let slot = rng.gen_range(0..candidates.len());
            let position = candidates.swap_remove(slot);
            let tile = Tile::spawned(ids.fresh());

            board.place(position, Some(tile));
            trace!(%position, id = %tile.id, "spawned tile");

            (position, tile)
        })
        .collect()
}
