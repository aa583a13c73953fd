use lib_2048::{Direction, GameEngine, MoveOutcome};
use rand::{seq::SliceRandom, Rng};

/// Plays uniformly random directions until nothing moves.
pub struct RandomAi<R> {
    rng: R,
}

impl<R> RandomAi<R>
where
    R: Rng,
{
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Tries directions in random order and stops at the first one that changes the board.
    ///
    /// Returns `None` when every direction was a no-op.
    pub fn play_turn(&mut self, engine: &mut GameEngine<impl Rng>) -> Option<MoveOutcome> {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);

        directions
            .into_iter()
            .map(|direction| engine.move_tiles(direction))
            .find(|outcome| outcome.moved)
    }
}
