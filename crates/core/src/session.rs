//! Session module - orchestrates one single-player game
//!
//! Ties together the board, the piece queue, the falling pair, and chain
//! resolution. Every call runs to completion; a lock always resolves the
//! board to its fixed point before returning.
//!
//! State machine: `Spawning → Active → Locking → Resolving → (Spawning | GameOver)`.
//! `GameOver` is terminal until [`GameSession::reset`].

use arrayvec::ArrayVec;
use log::{debug, info, trace};

use crate::board::Board;
use crate::chain::resolve_chain;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::gravity::apply_gravity;
use crate::matching::PassReport;
use crate::piece::ActivePiece;
use crate::rng::{ColorSource, PieceQueue, SimpleRng};
use crate::snapshot::{fnv1a64_board, ActiveSnapshot, GameSnapshot};
use crate::types::{Action, ColorPair, MoveDirection, RotateDirection, SessionState, BOARD_SIZE};

/// What a lock produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockOutcome {
    /// Score added by this lock's chain
    pub cleared_score: u32,
    /// Number of clearing passes (0 when nothing cleared)
    pub chain_depth: u32,
    pub cells_cleared: usize,
    pub passes: ArrayVec<PassReport, BOARD_SIZE>,
    /// Board after resolution
    pub board: Board,
}

/// Result of one external gravity tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// A waiting session spawned its next pair (possibly ending the game)
    Spawned(SessionState),
    /// The pair fell one row
    Moved,
    /// The pair could not fall, so it locked and the next pair spawned
    Locked(LockOutcome),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession<R: ColorSource = SimpleRng> {
    config: EngineConfig,
    board: Board,
    queue: PieceQueue<R>,
    active: Option<ActivePiece>,
    state: SessionState,
    score: u32,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    pieces_locked: u32,
    cells_cleared: u32,
    last_chain: u32,
    max_chain: u32,
}

impl GameSession<SimpleRng> {
    /// Default rules, colors dealt from a seeded [`SimpleRng`]
    pub fn with_seed(seed: u32) -> Self {
        Self::new(EngineConfig::default(), SimpleRng::new(seed))
    }
}

impl<R: ColorSource> GameSession<R> {
    /// Create a session waiting for its first spawn
    pub fn new(config: EngineConfig, rng: R) -> Self {
        Self {
            config,
            board: Board::new(),
            queue: PieceQueue::new(rng, config.color_count),
            active: None,
            state: SessionState::Spawning,
            score: 0,
            episode_id: 0,
            pieces_locked: 0,
            cells_cleared: 0,
            last_chain: 0,
            max_chain: 0,
        }
    }

    /// Start from a prepared field instead of an empty one.
    ///
    /// Only meaningful before the first spawn.
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Pair that the next spawn places (or the one already falling)
    pub fn current_pair(&self) -> ColorPair {
        self.queue.current()
    }

    pub fn next_pair(&self) -> ColorPair {
        self.queue.peek_next()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn cells_cleared(&self) -> u32 {
        self.cells_cleared
    }

    /// Chain depth of the most recent lock
    pub fn last_chain(&self) -> u32 {
        self.last_chain
    }

    pub fn max_chain(&self) -> u32 {
        self.max_chain
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Place the current pair at the spawn point.
    ///
    /// Blocked spawn cells end the game without placing anything. Outside
    /// `Spawning` this is a no-op that reports the current state.
    pub fn spawn_next(&mut self) -> SessionState {
        if self.state != SessionState::Spawning {
            return self.state;
        }

        let piece = ActivePiece::new(self.queue.current());
        if piece.is_valid(&self.board) {
            debug!("spawned {:?} at {:?}", piece.colors, piece.cells());
            self.active = Some(piece);
            self.state = SessionState::Active;
        } else {
            info!(
                "spawn blocked at {:?}; game over with score {}",
                piece.cells(),
                self.score
            );
            self.active = None;
            self.state = SessionState::GameOver;
        }
        self.state
    }

    /// Translate the active pair. Returns false (state untouched) when rejected.
    pub fn try_move(&mut self, direction: MoveDirection) -> bool {
        self.try_replace(|piece| piece.moved(direction))
    }

    /// Rotate the active pair about its anchor. No wall kicks.
    pub fn try_rotate(&mut self, direction: RotateDirection) -> bool {
        self.try_replace(|piece| piece.rotated(direction))
    }

    fn try_replace(&mut self, candidate: impl FnOnce(&ActivePiece) -> ActivePiece) -> bool {
        if self.state != SessionState::Active {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let next = candidate(&active);
        if next.is_valid(&self.board) {
            self.active = Some(next);
            true
        } else {
            trace!("rejected {:?} -> {:?}", active.cells(), next.cells());
            false
        }
    }

    /// Commit the active pair, resolve chains, and queue the next pair.
    ///
    /// Leaves the session in `Spawning`; call [`spawn_next`](Self::spawn_next)
    /// to continue.
    pub fn lock(&mut self) -> Result<LockOutcome, EngineError> {
        if self.state == SessionState::GameOver {
            return Err(EngineError::GameOver);
        }
        let Some(piece) = self.active else {
            return Err(EngineError::NoActivePiece);
        };

        // Locking
        self.state = SessionState::Locking;
        for (&(x, y), &color) in piece.cells().iter().zip(piece.colors.iter()) {
            self.board.set_cell(x, y, color)?;
        }
        self.active = None;

        // Resolving
        self.state = SessionState::Resolving;
        let chain = resolve_chain(&mut self.board, &self.config);
        if chain.chain_depth == 0 {
            // Nothing cleared, so a half-supported pair still hangs where it locked.
            apply_gravity(&mut self.board);
        }

        self.score = self.score.saturating_add(chain.score);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        self.cells_cleared = self
            .cells_cleared
            .saturating_add(chain.cells_cleared as u32);
        self.last_chain = chain.chain_depth;
        self.max_chain = self.max_chain.max(chain.chain_depth);
        if chain.chain_depth > 0 {
            debug!(
                "lock resolved {}-chain for {} (total {})",
                chain.chain_depth, chain.score, self.score
            );
        }

        self.queue.advance();
        self.state = SessionState::Spawning;

        Ok(LockOutcome {
            cleared_score: chain.score,
            chain_depth: chain.chain_depth,
            cells_cleared: chain.cells_cleared,
            passes: chain.passes,
            board: self.board,
        })
    }

    /// Drop the pair as far as it goes, lock it, and spawn the next one
    pub fn hard_drop(&mut self) -> Result<LockOutcome, EngineError> {
        if self.state == SessionState::GameOver {
            return Err(EngineError::GameOver);
        }
        let Some(active) = self.active.as_mut() else {
            return Err(EngineError::NoActivePiece);
        };

        active.y = active.landing_y(&self.board);
        let outcome = self.lock()?;
        self.spawn_next();
        Ok(outcome)
    }

    /// One gravity step as driven by an external fall timer.
    pub fn advance(&mut self) -> Result<Advance, EngineError> {
        match self.state {
            SessionState::GameOver => Err(EngineError::GameOver),
            SessionState::Spawning => Ok(Advance::Spawned(self.spawn_next())),
            _ => {
                let Some(active) = self.active else {
                    return Err(EngineError::NoActivePiece);
                };
                if !active.is_grounded(&self.board) && self.try_move(MoveDirection::Down) {
                    return Ok(Advance::Moved);
                }
                let outcome = self.lock()?;
                self.spawn_next();
                Ok(Advance::Locked(outcome))
            }
        }
    }

    /// Fresh empty board, zero score, new pairs from the same random stream.
    pub fn reset(&mut self) {
        self.board.clear();
        self.queue.refill();
        self.active = None;
        self.state = SessionState::Spawning;
        self.score = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.pieces_locked = 0;
        self.cells_cleared = 0;
        self.last_chain = 0;
        self.max_chain = 0;
        info!("session reset (episode {})", self.episode_id);
    }

    /// Apply an action. Returns whether it took effect.
    pub fn apply_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.try_move(MoveDirection::Left),
            Action::MoveRight => self.try_move(MoveDirection::Right),
            Action::SoftDrop => self.try_move(MoveDirection::Down),
            Action::RotateLeft => self.try_rotate(RotateDirection::Left),
            Action::RotateRight => self.try_rotate(RotateDirection::Right),
            Action::HardDrop => self.hard_drop().is_ok(),
            Action::Lock => match self.lock() {
                Ok(_) => {
                    self.spawn_next();
                    true
                }
                Err(_) => false,
            },
            Action::Advance => self.advance().is_ok(),
            Action::Reset => {
                self.reset();
                self.spawn_next();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.board_hash = fnv1a64_board(&out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.current = self.queue.current();
        out.next = self.queue.peek_next();
        out.state = self.state;
        out.game_over = self.is_game_over();
        out.episode_id = self.episode_id;
        out.score = self.score;
        out.pieces_locked = self.pieces_locked;
        out.cells_cleared = self.cells_cleared;
        out.last_chain = self.last_chain;
        out.max_chain = self.max_chain;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession<SimpleRng> {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Orientation};

    /// Deals the same color forever.
    struct Mono(u32);

    impl ColorSource for Mono {
        fn next_index(&mut self, bound: u32) -> u32 {
            self.0 % bound
        }
    }

    fn red_session() -> GameSession<Mono> {
        GameSession::new(EngineConfig::default(), Mono(0))
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::with_seed(12345);

        assert_eq!(session.state(), SessionState::Spawning);
        assert!(session.active().is_none());
        assert!(!session.is_game_over());
        assert_eq!(session.score(), 0);
        assert_eq!(session.board().filled_count(), 0);
    }

    #[test]
    fn test_spawn_places_current_pair() {
        let mut session = GameSession::with_seed(12345);
        let pair = session.current_pair();

        assert_eq!(session.spawn_next(), SessionState::Active);
        let active = session.active().unwrap();
        assert_eq!(active.colors, pair);
        assert_eq!(active.cells(), [(2, 0), (2, 1)]);

        // Spawning again while active changes nothing.
        assert_eq!(session.spawn_next(), SessionState::Active);
        assert_eq!(session.active(), Some(active));
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut session = red_session();
        session.board_mut().set_cell(2, 1, Color::Blue).unwrap();
        let before = *session.board();

        assert_eq!(session.spawn_next(), SessionState::GameOver);
        assert!(session.is_game_over());
        assert!(session.active().is_none());
        assert_eq!(*session.board(), before);
    }

    #[test]
    fn test_moves_rejected_outside_active() {
        let mut session = red_session();
        assert!(!session.try_move(MoveDirection::Left));
        assert!(!session.try_rotate(RotateDirection::Right));
        assert_eq!(session.lock(), Err(EngineError::NoActivePiece));
    }

    #[test]
    fn test_wall_rejects_move() {
        let mut session = red_session();
        session.spawn_next();

        assert!(session.try_move(MoveDirection::Left));
        assert!(session.try_move(MoveDirection::Left));
        let at_wall = session.active();
        assert!(!session.try_move(MoveDirection::Left));
        assert_eq!(session.active(), at_wall);
    }

    #[test]
    fn test_rotation_into_wall_is_rejected() {
        let mut session = red_session();
        session.spawn_next();
        while session.try_move(MoveDirection::Left) {}

        // Down -> Right is fine at the left wall; Down -> Left would leave the board.
        let before = session.active().unwrap();
        assert!(!session.try_rotate(RotateDirection::Right));
        assert_eq!(session.active(), Some(before));

        assert!(session.try_rotate(RotateDirection::Left));
        assert_eq!(session.active().unwrap().orientation, Orientation::Right);
    }

    #[test]
    fn test_lock_advances_queue() {
        let mut session = GameSession::with_seed(42);
        let next = session.next_pair();
        session.spawn_next();

        let outcome = session.hard_drop().unwrap();
        assert_eq!(outcome.chain_depth, 0);
        assert_eq!(session.pieces_locked(), 1);
        assert_eq!(session.active().unwrap().colors, next);
        assert_eq!(session.board().filled_count(), 2);
    }

    #[test]
    fn test_lock_settles_overhanging_pair() {
        let mut session = red_session();
        session.board_mut().set_cell(3, 11, Color::Blue).unwrap();
        session.spawn_next();
        // Horizontal over columns 2-3; column 3 holds it up at y=10.
        assert!(session.try_rotate(RotateDirection::Left));
        session.hard_drop().unwrap();

        assert_eq!(session.board().get(2, 11), Some(Color::Red));
        assert_eq!(session.board().get(3, 10), Some(Color::Red));
        assert_eq!(session.board().get(2, 10), Some(Color::Empty));
    }

    #[test]
    fn test_advance_locks_grounded_pair_without_moving() {
        let mut session = red_session();
        for y in 2..12 {
            let color = if y % 2 == 0 { Color::Blue } else { Color::Yellow };
            session.board_mut().set_cell(2, y, color).unwrap();
        }
        session.spawn_next();
        assert!(session.active().unwrap().is_grounded(session.board()));

        match session.advance() {
            Ok(Advance::Locked(outcome)) => assert_eq!(outcome.chain_depth, 0),
            other => panic!("expected lock, got {:?}", other),
        }
        // The next spawn is blocked by the locked pair.
        assert!(session.is_game_over());
    }

    #[test]
    fn test_game_over_rejects_play_until_reset() {
        let mut session = red_session();
        session.board_mut().set_cell(2, 0, Color::Blue).unwrap();
        session.spawn_next();
        assert!(session.is_game_over());

        assert_eq!(session.lock(), Err(EngineError::GameOver));
        assert_eq!(session.hard_drop(), Err(EngineError::GameOver));
        assert_eq!(session.advance(), Err(EngineError::GameOver));
        assert!(!session.try_move(MoveDirection::Down));

        session.reset();
        assert_eq!(session.state(), SessionState::Spawning);
        assert_eq!(session.episode_id(), 1);
        assert_eq!(session.board().filled_count(), 0);
        assert_eq!(session.spawn_next(), SessionState::Active);
    }

    #[test]
    fn test_advance_falls_then_locks() {
        let mut session = red_session();
        assert_eq!(
            session.advance(),
            Ok(Advance::Spawned(SessionState::Active))
        );

        // Anchor starts at y=0 with the second cell below; ten falls reach the floor.
        for _ in 0..10 {
            assert_eq!(session.advance(), Ok(Advance::Moved));
        }
        match session.advance() {
            Ok(Advance::Locked(outcome)) => assert_eq!(outcome.cleared_score, 0),
            other => panic!("expected lock, got {:?}", other),
        }
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.board().get(2, 11), Some(Color::Red));
        assert_eq!(session.board().get(2, 10), Some(Color::Red));
    }

    #[test]
    fn test_mono_stack_chains_and_scores() {
        let mut session = red_session();
        session.spawn_next();
        session.hard_drop().unwrap();
        let outcome = session.hard_drop().unwrap();

        assert_eq!(outcome.chain_depth, 1);
        assert_eq!(outcome.cleared_score, 40);
        assert_eq!(session.score(), 40);
        assert_eq!(session.board().filled_count(), 0);
        assert_eq!(session.last_chain(), 1);
        assert_eq!(session.max_chain(), 1);
        assert_eq!(session.cells_cleared(), 4);
    }

    #[test]
    fn test_snapshot_reflects_session() {
        let mut session = red_session();
        session.spawn_next();
        session.hard_drop().unwrap();

        let snap = session.snapshot();
        assert_eq!(snap.board[11][2], Color::Red.code());
        assert_eq!(snap.board[10][2], Color::Red.code());
        assert_eq!(snap.board_hash, fnv1a64_board(&snap.board));
        assert_eq!(snap.state, SessionState::Active);
        assert_eq!(snap.pieces_locked, 1);
        assert!(snap.playable());
    }
}
