//! Core engine module - pure, deterministic, and testable
//!
//! This crate contains the rules and state transitions of a falling-pair
//! matching game. It has **no dependencies** on rendering, input devices, or
//! timers, making it:
//!
//! - **Deterministic**: Same seed (or same injected [`ColorSource`]) produces identical games
//! - **Testable**: Every rule is reachable through plain synchronous calls
//! - **Portable**: Any scheduler or front end can drive it
//! - **Fast**: Board scans, flood fills, and gravity run without heap allocation
//!
//! # Module Structure
//!
//! - [`board`]: 6x12 grid of colors with bounds-checked access
//! - [`piece`]: the falling pair and placement validation
//! - [`matching`]: connected-group detection, removal, and per-pass scoring
//! - [`gravity`]: column compaction
//! - [`chain`]: repeated clear + gravity until a fixed point
//! - [`rng`]: injectable color source and the current/next piece queue
//! - [`session`]: spawn, move, rotate, lock, game over, reset
//! - [`snapshot`]: plain-data view of a session for observers
//! - [`config`]: tunable rules (threshold, cell score, color count)
//!
//! # Game Rules
//!
//! - A group is a 4-directionally connected set of same-colored cells
//! - Every group of 4 or more is removed in the same pass
//! - A pass scores `size × 10 × depth` per group; depth counts clearing passes
//! - Spawning onto an occupied spawn cell ends the game
//!
//! # Example
//!
//! ```
//! use puyo_engine_core::GameSession;
//! use puyo_engine_types::{MoveDirection, SessionState};
//!
//! let mut session = GameSession::with_seed(12345);
//! assert_eq!(session.spawn_next(), SessionState::Active);
//!
//! session.try_move(MoveDirection::Left);
//! let outcome = session.hard_drop().unwrap();
//!
//! assert_eq!(outcome.chain_depth, 0);
//! assert_eq!(session.board().filled_count(), 2);
//! ```

pub mod board;
pub mod chain;
pub mod config;
pub mod error;
pub mod gravity;
pub mod matching;
pub mod piece;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use puyo_engine_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use chain::{resolve_chain, ChainOutcome};
pub use config::EngineConfig;
pub use error::{ConfigError, EngineError};
pub use gravity::apply_gravity;
pub use matching::{connected_group, find_clearable, resolve_pass, PassReport};
pub use piece::{is_valid_placement, ActivePiece};
pub use rng::{ColorSource, PieceQueue, SimpleRng};
pub use session::{Advance, GameSession, LockOutcome};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
