//! Snapshot module - plain-data view of a session for observers

use serde::Serialize;

use crate::piece::ActivePiece;
use crate::types::{Color, ColorPair, Orientation, SessionState, BOARD_HEIGHT, BOARD_WIDTH};

/// Board grid of [`Color::code`] values, row 0 on top
pub type BoardGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

const EMPTY_GRID: BoardGrid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub colors: ColorPair,
    pub orientation: Orientation,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            colors: value.colors,
            orientation: value.orientation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Everything an observer needs to render or replay a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    /// FNV-1a over `board`, row-major
    pub board_hash: u64,
    pub active: Option<ActiveSnapshot>,
    pub current: ColorPair,
    pub next: ColorPair,
    pub state: SessionState,
    pub game_over: bool,
    pub episode_id: u32,
    pub score: u32,
    pub pieces_locked: u32,
    pub cells_cleared: u32,
    pub last_chain: u32,
    pub max_chain: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: EMPTY_GRID,
            board_hash: fnv1a64_board(&EMPTY_GRID),
            active: None,
            current: [Color::Empty; 2],
            next: [Color::Empty; 2],
            state: SessionState::Spawning,
            game_over: false,
            episode_id: 0,
            score: 0,
            pieces_locked: 0,
            cells_cleared: 0,
            last_chain: 0,
            max_chain: 0,
        }
    }
}

/// FNV-1a 64-bit over the grid bytes.
pub fn fnv1a64_board(board: &BoardGrid) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in board.iter().flat_map(|row| row.iter().copied()) {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}
