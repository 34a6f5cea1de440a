//! Gravity module - column compaction after removal
//!
//! Each column is compacted independently with a two-pointer sweep from the
//! bottom row upward, so filled cells keep their relative order and every gap
//! closes. Zero-allocation.

use crate::board::Board;
use crate::types::{Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Compact a single column. Returns how many cells moved.
pub fn settle_column(board: &mut Board, x: usize) -> usize {
    let mut moved = 0;
    let mut write_y = BOARD_HEIGHT as usize;

    for read_y in (0..BOARD_HEIGHT as usize).rev() {
        let color = board.at(x, read_y);
        if !color.is_piece() {
            continue;
        }
        write_y -= 1;
        if write_y != read_y {
            board.put(x, write_y, color);
            board.put(x, read_y, Color::Empty);
            moved += 1;
        }
    }

    moved
}

/// Compact every column. Returns how many cells moved.
pub fn apply_gravity(board: &mut Board) -> usize {
    (0..BOARD_WIDTH as usize)
        .map(|x| settle_column(board, x))
        .sum()
}

/// True when no filled cell has an empty cell below it.
pub fn is_settled(board: &Board) -> bool {
    (0..BOARD_WIDTH as usize).all(|x| {
        let mut seen_filled = false;
        (0..BOARD_HEIGHT as usize).all(|y| {
            let filled = board.at(x, y).is_piece();
            let ok = filled || !seen_filled;
            seen_filled |= filled;
            ok
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_keeps_order() {
        // Column 0 top to bottom: R, gap, B, Y
        let mut board = Board::from_rows(&["R.....", "......", "B.....", "Y....."]).unwrap();

        assert_eq!(apply_gravity(&mut board), 1);
        assert_eq!(board.get(0, 11), Some(Color::Yellow));
        assert_eq!(board.get(0, 10), Some(Color::Blue));
        assert_eq!(board.get(0, 9), Some(Color::Red));
        assert_eq!(board.get(0, 8), Some(Color::Empty));
        assert!(is_settled(&board));
    }

    #[test]
    fn test_columns_are_independent() {
        let mut board = Board::from_rows(&["RG....", "......", ".B...."]).unwrap();

        apply_gravity(&mut board);
        assert_eq!(board.get(0, 11), Some(Color::Red));
        assert_eq!(board.get(1, 11), Some(Color::Blue));
        assert_eq!(board.get(1, 10), Some(Color::Green));
        assert_eq!(board.filled_count(), 3);
    }

    #[test]
    fn test_gravity_is_idempotent() {
        let mut board = Board::from_rows(&["Y.R.G.", ".B.P..", "......", "R....Y"]).unwrap();

        apply_gravity(&mut board);
        let once = board;
        assert_eq!(apply_gravity(&mut board), 0);
        assert_eq!(board, once);
    }

    #[test]
    fn test_is_settled_detects_floating_cell() {
        let board = Board::from_rows(&["R.....", "......"]).unwrap();
        assert!(!is_settled(&board));
        assert!(is_settled(&Board::new()));
    }
}
