pub use core_2048::*;

pub mod engine;
pub mod line;
pub mod spawn;

pub use engine::{GameEngine, GameEvent, ListenerId, MoveOutcome};
pub use line::{LineSlide, Merge};
pub use spawn::TileIds;
