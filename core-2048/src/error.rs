use crate::BOARD_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("cell ({column}, {row}) is outside the {size}x{size} board", size = BOARD_SIZE)]
    OutOfBounds { column: usize, row: usize },
}
