use std::{fmt, mem, ops::Index};

use serde::{Deserialize, Serialize};

use crate::{direction::Axis, error::BoardError, tile::Tile, BOARD_SIZE};

/// The cells of one row or column, in natural index order.
pub type Line = [Option<Tile>; BOARD_SIZE];

/// A validated `(column, row)` coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Position {
    column: u8,
    row: u8,
}

impl Position {
    pub(crate) const ORIGIN: Self = Self::new_unchecked(0, 0);

    pub fn new(column: usize, row: usize) -> Result<Self, BoardError> {
        if column < BOARD_SIZE && row < BOARD_SIZE {
            Ok(Self::new_unchecked(column, row))
        } else {
            Err(BoardError::OutOfBounds { column, row })
        }
    }

    pub(crate) const fn new_unchecked(column: usize, row: usize) -> Self {
        Self {
            column: column as u8,
            row: row as u8,
        }
    }

    pub const fn column(self) -> usize {
        self.column as usize
    }

    pub const fn row(self) -> usize {
        self.row as usize
    }

    /// Every position in row-major raster order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |column| Self::new_unchecked(column, row)))
    }
}

impl TryFrom<(usize, usize)> for Position {
    type Error = BoardError;

    fn try_from((column, row): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(column, row)
    }
}

impl From<Position> for (usize, usize) {
    fn from(position: Position) -> Self {
        (position.column(), position.row())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// 4x4 grid of optional tiles. Storage only, no game rules.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    // Indexed as cells[row][column].
    cells: [[Option<Tile>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: usize, row: usize) -> Result<Option<Tile>, BoardError> {
        let position = Position::new(column, row)?;

        Ok(self[position])
    }

    /// Places or clears a cell, returning whatever was there before.
    pub fn set(
        &mut self,
        column: usize,
        row: usize,
        tile: Option<Tile>,
    ) -> Result<Option<Tile>, BoardError> {
        let position = Position::new(column, row)?;

        Ok(self.place(position, tile))
    }

    pub fn place(&mut self, position: Position, tile: Option<Tile>) -> Option<Tile> {
        mem::replace(&mut self.cells[position.row()][position.column()], tile)
    }

    /// Empty cells in row-major order. Spawning indexes into this sequence, so the order is fixed.
    pub fn empty_cells(&self) -> Vec<Position> {
        Position::all()
            .filter(|&position| self[position].is_none())
            .collect()
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        Position::all().filter_map(|position| self[position].map(|tile| (position, tile)))
    }

    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles().next().is_none()
    }

    pub fn line(&self, axis: Axis, index: usize) -> Line {
        axis.positions(index).map(|position| self[position])
    }

    pub fn set_line(&mut self, axis: Axis, index: usize, cells: Line) {
        for (position, tile) in axis.positions(index).into_iter().zip(cells) {
            self.place(position, tile);
        }
    }
}

impl Index<Position> for Board {
    type Output = Option<Tile>;

    fn index(&self, position: Position) -> &Self::Output {
        &self.cells[position.row()][position.column()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for (column, cell) in row.iter().enumerate() {
                if column != 0 {
                    f.write_str(" ")?;
                }

                match cell {
                    Some(tile) => write!(f, "{:>5}", tile.value)?,
                    None => write!(f, "{:>5}", ".")?,
                }
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileId;

    fn tile(id: u64, value: u32) -> Option<Tile> {
        Some(Tile::new(TileId(id), value))
    }

    #[test]
    fn test_get_set() {
        let mut board = Board::new();
        assert_eq!(board.get(2, 3), Ok(None));

        assert_eq!(board.set(2, 3, tile(1, 2)), Ok(None));
        assert_eq!(board.get(2, 3), Ok(tile(1, 2)));

        assert_eq!(board.set(2, 3, None), Ok(tile(1, 2)));
        assert!(board.is_empty());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new();

        assert_eq!(
            board.get(4, 0),
            Err(BoardError::OutOfBounds { column: 4, row: 0 })
        );
        assert_eq!(
            board.set(0, 7, tile(1, 2)),
            Err(BoardError::OutOfBounds { column: 0, row: 7 })
        );
        assert!(board.is_empty());
    }

    #[test]
    fn test_empty_cells_row_major() {
        let mut board = Board::new();
        board.set(0, 0, tile(1, 2)).unwrap();
        board.set(2, 0, tile(2, 2)).unwrap();
        board.set(1, 1, tile(3, 4)).unwrap();

        let empty = board.empty_cells();
        assert_eq!(empty.len(), 13);
        assert_eq!(
            empty[..4].iter().map(|&p| p.into()).collect::<Vec<(usize, usize)>>(),
            vec![(1, 0), (3, 0), (0, 1), (2, 1)]
        );
    }

    #[test]
    fn test_full_board_has_no_empty_cells() {
        let mut board = Board::new();
        for (i, position) in Position::all().enumerate() {
            board.place(position, tile(i as u64 + 1, 2));
        }

        assert!(board.empty_cells().is_empty());
        assert_eq!(board.tile_count(), 16);
    }

    #[test]
    fn test_line_round_trip_through_column() {
        let mut board = Board::new();
        board.set(3, 1, tile(5, 8)).unwrap();

        let mut line = board.line(Axis::Column, 3);
        assert_eq!(line, [None, tile(5, 8), None, None]);

        line.swap(1, 3);
        board.set_line(Axis::Column, 3, line);

        assert_eq!(board.get(3, 1), Ok(None));
        assert_eq!(board.get(3, 3), Ok(tile(5, 8)));
    }

    #[test]
    fn test_position_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Position>("[1, 3]").is_ok());
        assert!(serde_json::from_str::<Position>("[4, 0]").is_err());
    }

    #[test]
    fn test_snapshot_json() {
        let mut board = Board::new();
        board.set(1, 0, tile(9, 16)).unwrap();

        let json = serde_json::to_string(&board).unwrap();
        assert!(json.contains(r#"{"id":9,"value":16}"#));

        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.set(0, 0, tile(1, 2)).unwrap();
        board.set(3, 3, tile(2, 1024)).unwrap();

        let text = board.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "    2     .     .     .");
        assert_eq!(lines[3], "    .     .     .  1024");
    }
}
