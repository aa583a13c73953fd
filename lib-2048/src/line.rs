//! Compaction and merging of a single line of cells.

use core_2048::{Line, Tile, TileId, BOARD_SIZE};

/// Two equal tiles combined into one during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Merge {
    /// Id kept by the merged tile: the pair member met first in scan order.
    pub survivor: TileId,
    /// Id that no longer exists after the move.
    pub consumed: TileId,
    pub value: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineSlide {
    pub cells: Line,
    pub merges: Vec<Merge>,
    /// True if any position holds a different value than before.
    pub changed: bool,
}

/// Slides `line` towards index 0, or towards index 3 when `towards_end` is set.
///
/// Scanning always starts at the edge the tiles travel to, and a tile produced by a merge never
/// merges again in the same slide, so `[2, 2, 2, 2]` becomes `[4, 4, _, _]`.
pub fn slide(line: Line, towards_end: bool) -> LineSlide {
    let mut compact: Vec<Tile> = line.iter().flatten().copied().collect();

    if towards_end {
        compact.reverse();
    }

    let mut merges = Vec::new();
    let mut accumulated: Vec<(bool, Tile)> = Vec::with_capacity(BOARD_SIZE);

    for tile in compact {
        match accumulated.last_mut() {
            Some((just_merged, last)) if !*just_merged && last.value == tile.value => {
                *last = last.doubled();
                *just_merged = true;

                merges.push(Merge {
                    survivor: last.id,
                    consumed: tile.id,
                    value: last.value,
                });
            }
            _ => accumulated.push((false, tile)),
        }
    }

    if towards_end {
        accumulated.reverse();
    }

    let offset = if towards_end {
        BOARD_SIZE - accumulated.len()
    } else {
        0
    };

    let mut cells: Line = [None; BOARD_SIZE];

    for (i, (_, tile)) in accumulated.into_iter().enumerate() {
        cells[offset + i] = Some(tile);
    }

    let changed = line
        .iter()
        .zip(&cells)
        .any(|(before, after)| before.map(|t| t.value) != after.map(|t| t.value));

    LineSlide {
        cells,
        merges,
        changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Builds a line from values, 0 meaning empty. Ids are 1-based positions.
    fn line(values: [u32; BOARD_SIZE]) -> Line {
        let mut cells = [None; BOARD_SIZE];

        for (i, value) in values.into_iter().enumerate() {
            if value != 0 {
                cells[i] = Some(Tile::new(TileId(i as u64 + 1), value));
            }
        }

        cells
    }

    fn values(cells: &Line) -> [u32; BOARD_SIZE] {
        cells.map(|cell| cell.map_or(0, |tile| tile.value))
    }

    fn ids(cells: &Line) -> [u64; BOARD_SIZE] {
        cells.map(|cell| cell.map_or(0, |tile| tile.id.0))
    }

    #[test]
    fn test_slide_towards_start() {
        assert_eq!(values(&slide(line([0, 0, 0, 0]), false).cells), [0, 0, 0, 0]);
        assert_eq!(values(&slide(line([2, 4, 2, 4]), false).cells), [2, 4, 2, 4]);
        assert_eq!(values(&slide(line([2, 2, 4, 4]), false).cells), [4, 8, 0, 0]);
        assert_eq!(values(&slide(line([2, 0, 2, 2]), false).cells), [4, 2, 0, 0]);
        assert_eq!(values(&slide(line([2, 0, 0, 2]), false).cells), [4, 0, 0, 0]);
        assert_eq!(values(&slide(line([0, 0, 0, 8]), false).cells), [8, 0, 0, 0]);
    }

    #[test]
    fn test_slide_towards_end() {
        assert_eq!(values(&slide(line([2, 2, 4, 4]), true).cells), [0, 0, 4, 8]);
        assert_eq!(values(&slide(line([0, 2, 2, 2]), true).cells), [0, 0, 2, 4]);
        assert_eq!(values(&slide(line([2, 0, 0, 0]), true).cells), [0, 0, 0, 2]);
        assert_eq!(values(&slide(line([2, 4, 2, 4]), true).cells), [2, 4, 2, 4]);
    }

    #[test]
    fn test_merge_product_does_not_merge_again() {
        assert_eq!(values(&slide(line([2, 2, 2, 2]), false).cells), [4, 4, 0, 0]);
        assert_eq!(values(&slide(line([2, 2, 2, 2]), true).cells), [0, 0, 4, 4]);
        assert_eq!(values(&slide(line([4, 2, 2, 4]), true).cells), [0, 4, 4, 4]);
        assert_eq!(values(&slide(line([4, 2, 2, 0]), false).cells), [4, 4, 0, 0]);
    }

    #[test]
    fn test_survivor_is_first_in_scan_order() {
        let result = slide(line([2, 2, 0, 0]), false);
        assert_eq!(ids(&result.cells), [1, 0, 0, 0]);
        assert_eq!(
            result.merges,
            vec![Merge {
                survivor: TileId(1),
                consumed: TileId(2),
                value: 4
            }]
        );

        let result = slide(line([2, 2, 0, 0]), true);
        assert_eq!(ids(&result.cells), [0, 0, 0, 2]);
        assert_eq!(result.merges[0].survivor, TileId(2));
        assert_eq!(result.merges[0].consumed, TileId(1));
    }

    #[test]
    fn test_compaction_keeps_ids_and_order() {
        let result = slide(line([0, 4, 0, 2]), false);
        assert_eq!(ids(&result.cells), [2, 4, 0, 0]);
        assert!(result.merges.is_empty());
        assert!(result.changed);
    }

    #[test]
    fn test_change_detection() {
        assert!(!slide(line([0, 0, 0, 0]), false).changed);
        assert!(!slide(line([2, 4, 8, 0]), false).changed);
        assert!(!slide(line([0, 2, 4, 8]), true).changed);
        assert!(slide(line([0, 2, 4, 8]), false).changed);
        assert!(slide(line([2, 2, 4, 8]), false).changed);
    }
}
