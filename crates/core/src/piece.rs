//! Piece module - the falling pair and its placement rules
//!
//! A pair is an anchor cell plus a second cell whose offset is fixed by the
//! orientation. There is no wall kick: a candidate that leaves the board or
//! overlaps a filled cell is simply rejected.

use crate::board::Board;
use crate::types::{
    ColorPair, MoveDirection, Orientation, Pos, RotateDirection, SPAWN_ORIENTATION, SPAWN_X,
    SPAWN_Y,
};

/// Active falling pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub colors: ColorPair,
    pub orientation: Orientation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a new pair at the spawn position
    pub fn new(colors: ColorPair) -> Self {
        Self {
            colors,
            orientation: SPAWN_ORIENTATION,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Anchor cell position
    pub fn anchor(&self) -> Pos {
        (self.x, self.y)
    }

    /// Second cell position for the current orientation
    pub fn second(&self) -> Pos {
        second_cell(self.x, self.y, self.orientation)
    }

    /// Both occupied cells, anchor first
    pub fn cells(&self) -> [Pos; 2] {
        [self.anchor(), self.second()]
    }

    /// Check if both cells are on the board and empty
    pub fn is_valid(&self, board: &Board) -> bool {
        is_valid_placement(board, self.x, self.y, self.orientation)
    }

    /// Candidate after a translation (not validated)
    pub fn moved(&self, direction: MoveDirection) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Candidate after a rotation about the anchor (not validated)
    pub fn rotated(&self, direction: RotateDirection) -> Self {
        let orientation = match direction {
            RotateDirection::Right => self.orientation.rotate_cw(),
            RotateDirection::Left => self.orientation.rotate_ccw(),
        };
        Self {
            orientation,
            ..*self
        }
    }

    /// Check if the pair cannot fall any further
    pub fn is_grounded(&self, board: &Board) -> bool {
        !self.moved(MoveDirection::Down).is_valid(board)
    }

    /// Lowest valid anchor row reachable by falling straight down
    pub fn landing_y(&self, board: &Board) -> i8 {
        let mut probe = *self;
        loop {
            let next = probe.moved(MoveDirection::Down);
            if !next.is_valid(board) {
                return probe.y;
            }
            probe = next;
        }
    }
}

/// Second cell for an anchor and orientation:
/// up `(x, y-1)`, right `(x+1, y)`, down `(x, y+1)`, left `(x-1, y)`.
pub fn second_cell(x: i8, y: i8, orientation: Orientation) -> Pos {
    let (dx, dy) = orientation.offset();
    (x + dx, y + dy)
}

/// A placement is valid iff both cells are within bounds and currently empty.
pub fn is_valid_placement(board: &Board, x: i8, y: i8, orientation: Orientation) -> bool {
    let (sx, sy) = second_cell(x, y, orientation);
    board.is_empty(x, y) && board.is_empty(sx, sy)
}
