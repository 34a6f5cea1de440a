//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behaviour beyond small conversions, so they
//! can be shared by the simulation core, replay tooling, and any presentation layer.
//!
//! # Board Dimensions
//!
//! Standard field dimensions:
//!
//! - **Width**: 6 columns (indexed 0-5)
//! - **Height**: 12 rows (indexed 0-11, row 0 is the top)
//! - **Spawn position**: anchor at (2, 0), second cell hanging below it
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CLEAR_THRESHOLD` | 4 | Minimum connected group size that is removed |
//! | `CELL_SCORE` | 10 | Points per removed cell before the chain multiplier |
//! | `DEFAULT_COLOR_COUNT` | 4 | Number of palette colors dealt by default |
//!
//! # Examples
//!
//! ```
//! use puyo_engine_types::{Action, Color, Orientation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let color = Color::from_str("r").unwrap();
//! assert_eq!(color, Color::Red);
//! assert!(!Color::Empty.is_piece());
//!
//! assert_eq!(Orientation::Up.rotate_cw(), Orientation::Right);
//! assert_eq!(Orientation::Up.rotate_ccw(), Orientation::Left);
//!
//! assert_eq!(Action::from_str("hardDrop"), Some(Action::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 6);
//! assert_eq!(BOARD_HEIGHT, 12);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (6 columns)
pub const BOARD_WIDTH: u8 = 6;

/// Board height in cells (12 rows)
pub const BOARD_HEIGHT: u8 = 12;

/// Total number of cells on the board
pub const BOARD_SIZE: usize = BOARD_WIDTH as usize * BOARD_HEIGHT as usize;

/// Minimum group size that gets cleared
pub const CLEAR_THRESHOLD: usize = 4;

/// Points per cleared cell at chain depth 1
pub const CELL_SCORE: u32 = 10;

/// Palette colors dealt when no config overrides it
pub const DEFAULT_COLOR_COUNT: u8 = 4;

/// Spawn column of the anchor cell
pub const SPAWN_X: i8 = 2;

/// Spawn row of the anchor cell (top row)
pub const SPAWN_Y: i8 = 0;

/// Orientation a freshly spawned pair starts in.
///
/// `Down` keeps both spawn cells on the board while the anchor sits on the top row.
pub const SPAWN_ORIENTATION: Orientation = Orientation::Down;

/// A board coordinate `(x, y)`; y grows downward.
pub type Pos = (i8, i8);

/// Contents of a single cell.
///
/// `Empty` is a valid cell state but never takes part in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Empty,
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
}

impl Color {
    /// Piece colors in deal order. The first `color_count` entries are used.
    pub const PALETTE: [Color; 5] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Purple,
    ];

    /// True for every color except `Empty`.
    pub fn is_piece(self) -> bool {
        self != Color::Empty
    }

    /// Compact numeric code used by snapshots (0 = empty).
    pub fn code(self) -> u8 {
        match self {
            Color::Empty => 0,
            Color::Red => 1,
            Color::Green => 2,
            Color::Blue => 3,
            Color::Yellow => 4,
            Color::Purple => 5,
        }
    }

    /// Single-character glyph used by text fixtures.
    pub fn as_char(self) -> char {
        match self {
            Color::Empty => '.',
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
            Color::Purple => 'P',
        }
    }

    /// Inverse of [`Color::as_char`] (case-insensitive).
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            '.' => Some(Color::Empty),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            'Y' => Some(Color::Yellow),
            'P' => Some(Color::Purple),
            _ => None,
        }
    }

    /// Parse color from string (case-insensitive, full name or glyph)
    ///
    /// # Examples
    ///
    /// ```
    /// use puyo_engine_types::Color;
    ///
    /// assert_eq!(Color::from_str("blue"), Some(Color::Blue));
    /// assert_eq!(Color::from_str("Y"), Some(Color::Yellow));
    /// assert_eq!(Color::from_str("gray"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "empty" | "." => Some(Color::Empty),
            "red" | "r" => Some(Color::Red),
            "green" | "g" => Some(Color::Green),
            "blue" | "b" => Some(Color::Blue),
            "yellow" | "y" => Some(Color::Yellow),
            "purple" | "p" => Some(Color::Purple),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Empty => "empty",
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
        }
    }
}

/// The two colors of a falling pair: `[anchor, second]`.
pub type ColorPair = [Color; 2];

/// Where the second cell of a pair sits relative to its anchor.
///
/// - **Up**: second cell directly above the anchor
/// - **Right**: second cell to the right
/// - **Down**: second cell directly below
/// - **Left**: second cell to the left
///
/// The cycle clockwise is: Up → Right → Down → Left → Up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    /// Offset of the second cell from the anchor.
    ///
    /// # Examples
    ///
    /// ```
    /// use puyo_engine_types::Orientation;
    ///
    /// assert_eq!(Orientation::Up.offset(), (0, -1));
    /// assert_eq!(Orientation::Right.offset(), (1, 0));
    /// assert_eq!(Orientation::Down.offset(), (0, 1));
    /// assert_eq!(Orientation::Left.offset(), (-1, 0));
    /// ```
    pub fn offset(self) -> (i8, i8) {
        match self {
            Orientation::Up => (0, -1),
            Orientation::Right => (1, 0),
            Orientation::Down => (0, 1),
            Orientation::Left => (-1, 0),
        }
    }

    /// Numeric orientation 0..=3 (up, right, down, left)
    pub fn index(self) -> u8 {
        match self {
            Orientation::Up => 0,
            Orientation::Right => 1,
            Orientation::Down => 2,
            Orientation::Left => 3,
        }
    }

    /// Orientation for `index mod 4`.
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Orientation::Up,
            1 => Orientation::Right,
            2 => Orientation::Down,
            _ => Orientation::Left,
        }
    }

    /// Rotate clockwise: `r = (r + 1) mod 4`
    pub fn rotate_cw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise: `r = (r + 3) mod 4`
    pub fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

/// Translation requests for the active pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    /// Cell delta `(dx, dy)` for this move
    pub fn delta(self) -> (i8, i8) {
        match self {
            MoveDirection::Left => (-1, 0),
            MoveDirection::Right => (1, 0),
            MoveDirection::Down => (0, 1),
        }
    }
}

/// Rotation requests for the active pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    /// Counter-clockwise
    Left,
    /// Clockwise
    Right,
}

/// Intents that can be applied to a session
///
/// These are used by replay tooling and any input layer that maps devices
/// onto logical moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move pair one cell left
    MoveLeft,
    /// Move pair one cell right
    MoveRight,
    /// Move pair one cell down
    SoftDrop,
    /// Drop pair as far as it goes and lock it
    HardDrop,
    /// Rotate pair counter-clockwise
    RotateLeft,
    /// Rotate pair clockwise
    RotateRight,
    /// Lock pair where it is
    Lock,
    /// One gravity step; locks when the pair cannot fall
    Advance,
    /// Start over with an empty board
    Reset,
}

impl Action {
    /// Parse action from string (case-insensitive camelCase names)
    ///
    /// # Examples
    ///
    /// ```
    /// use puyo_engine_types::Action;
    ///
    /// assert_eq!(Action::from_str("moveLeft"), Some(Action::MoveLeft));
    /// assert_eq!(Action::from_str("rotateright"), Some(Action::RotateRight));
    /// assert_eq!(Action::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Action::MoveLeft),
            "moveright" => Some(Action::MoveRight),
            "softdrop" => Some(Action::SoftDrop),
            "harddrop" => Some(Action::HardDrop),
            "rotateleft" => Some(Action::RotateLeft),
            "rotateright" => Some(Action::RotateRight),
            "lock" => Some(Action::Lock),
            "advance" => Some(Action::Advance),
            "reset" => Some(Action::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::MoveLeft => "moveLeft",
            Action::MoveRight => "moveRight",
            Action::SoftDrop => "softDrop",
            Action::HardDrop => "hardDrop",
            Action::RotateLeft => "rotateLeft",
            Action::RotateRight => "rotateRight",
            Action::Lock => "lock",
            Action::Advance => "advance",
            Action::Reset => "reset",
        }
    }
}

/// Session lifecycle phase
///
/// `Spawning → Active → Locking → Resolving → (Spawning | GameOver)`.
/// Callers only ever observe `Spawning`, `Active`, or `GameOver`; the
/// `Locking` and `Resolving` phases run to completion inside a lock call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Spawning,
    Active,
    Locking,
    Resolving,
    GameOver,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Spawning => "spawning",
            SessionState::Active => "active",
            SessionState::Locking => "locking",
            SessionState::Resolving => "resolving",
            SessionState::GameOver => "game_over",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_defaults() {
        assert_eq!(CLEAR_THRESHOLD, 4);
        assert_eq!(CELL_SCORE, 10);
        assert_eq!(DEFAULT_COLOR_COUNT, 4);
        assert_eq!(BOARD_SIZE, 72);
    }

    #[test]
    fn orientation_full_turns_return_home() {
        for index in 0..4 {
            let o = Orientation::from_index(index);
            assert_eq!(o.rotate_cw().rotate_ccw(), o);
            assert_eq!(o.rotate_cw().rotate_cw().rotate_cw().rotate_cw(), o);
            assert_eq!(o.index(), index);
        }
    }

    #[test]
    fn color_glyphs_are_inverse() {
        for c in [Color::Empty]
            .into_iter()
            .chain(Color::PALETTE.iter().copied())
        {
            assert_eq!(Color::from_char(c.as_char()), Some(c));
            assert_eq!(Color::from_str(c.as_str()), Some(c));
        }
        assert_eq!(Color::from_char('x'), None);
    }

    #[test]
    fn action_names_parse_back() {
        for action in [
            Action::MoveLeft,
            Action::MoveRight,
            Action::SoftDrop,
            Action::HardDrop,
            Action::RotateLeft,
            Action::RotateRight,
            Action::Lock,
            Action::Advance,
            Action::Reset,
        ] {
            assert_eq!(Action::from_str(action.as_str()), Some(action));
        }
    }
}
