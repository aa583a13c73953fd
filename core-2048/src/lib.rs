//! Board primitives for the sliding-tile merge puzzle.
//!
//! - `Tile` is a numbered block with a stable identity.
//! - `Board` is the 4x4 grid of optional tiles addressed by `(column, row)`.
//! - `Direction` and `Axis` describe how a move sweeps the grid.
//!
//! No game rules live here; see `lib-2048` for the engine.

mod board;
mod direction;
mod error;
mod tile;

pub use board::{Board, Line, Position};
pub use direction::{Axis, Direction};
pub use error::BoardError;
pub use tile::{Tile, TileId};

/// Width and height of the board.
pub const BOARD_SIZE: usize = 4;
