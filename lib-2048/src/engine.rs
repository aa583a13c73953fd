//! The game engine: owns the board, applies moves and tells listeners about it.
//!
//! A collaborator drives the engine with [`GameEngine::move_tiles`] and reads the board back
//! through [`GameEngine::board`]. Every call to `new_game` or `move_tiles` is followed by a
//! synchronous [`GameEvent`] to each registered listener, whether or not the board changed.

use rand::Rng;
use tracing::{debug, trace};

use core_2048::{Board, Direction, Position, Tile, BOARD_SIZE};

use crate::{
    line::{self, Merge},
    spawn::{self, TileIds},
};

/// Everything a single move did to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub direction: Direction,
    /// True if any cell's value changed. Tiles are spawned only then.
    pub moved: bool,
    pub merges: Vec<Merge>,
    pub spawned: Vec<(Position, Tile)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    NewGame { spawned: Vec<(Position, Tile)> },
    Moved(MoveOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&Board, &GameEvent)>;

pub struct GameEngine<R> {
    board: Board,
    ids: TileIds,
    last_direction: Direction,
    rng: R,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl<R> GameEngine<R>
where
    R: Rng,
{
    /// Creates an engine and starts a game on it.
    pub fn new(rng: R) -> Self {
        let mut engine = Self::from_board(Board::new(), rng);
        engine.new_game();
        engine
    }

    /// Resumes from an existing board. New ids continue after the largest id on it.
    pub fn from_board(board: Board, rng: R) -> Self {
        let ids = board
            .tiles()
            .map(|(_, tile)| tile.id)
            .max()
            .map_or_else(TileIds::new, TileIds::after);

        Self {
            board,
            ids,
            last_direction: Direction::default(),
            rng,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direction of the most recent move. Only an animation hint; it has no effect on the rules.
    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    pub fn new_game(&mut self) {
        self.board = Board::new();
        self.ids = TileIds::new();
        self.last_direction = Direction::default();

        let spawned = spawn::spawn_tiles(&mut self.board, &mut self.rng, &mut self.ids);
        debug!(spawned = spawned.len(), "started new game");

        self.notify(&GameEvent::NewGame { spawned });
    }

    pub fn move_tiles(&mut self, direction: Direction) -> MoveOutcome {
        let axis = direction.axis();

        let mut moved = false;
        let mut merges = Vec::new();

        for index in 0..BOARD_SIZE {
            let slide = line::slide(self.board.line(axis, index), direction.towards_end());

            self.board.set_line(axis, index, slide.cells);
            moved |= slide.changed;

            for merge in &slide.merges {
                trace!(survivor = %merge.survivor, consumed = %merge.consumed, value = merge.value, "merged");
            }
            merges.extend(slide.merges);
        }

        self.last_direction = direction;

        let spawned = if moved {
            spawn::spawn_tiles(&mut self.board, &mut self.rng, &mut self.ids)
        } else {
            Vec::new()
        };

        let outcome = MoveOutcome {
            direction,
            moved,
            merges,
            spawned,
        };

        debug!(
            ?direction,
            moved,
            merges = outcome.merges.len(),
            spawned = outcome.spawned.len(),
            "applied move"
        );

        self.notify(&GameEvent::Moved(outcome.clone()));

        outcome
    }
}

impl<R> GameEngine<R> {
    /// Registers a callback run after every `new_game` and `move_tiles`.
    pub fn subscribe(&mut self, listener: impl FnMut(&Board, &GameEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;

        self.listeners.push((id, Box::new(listener)));

        id
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let count = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);

        self.listeners.len() != count
    }

    fn notify(&mut self, event: &GameEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&self.board, event);
        }
    }
}
