//! Chain module - fixed-point resolution of clears and gravity
//!
//! Loop: one matching pass at the current depth; if it removed anything,
//! compact the columns, bump the depth, and go again. A pass that removes
//! nothing ends the loop without consuming a depth. Every clearing pass
//! removes at least one cell, so the loop is bounded by the board size.

use arrayvec::ArrayVec;
use log::debug;

use crate::board::Board;
use crate::config::EngineConfig;
use crate::gravity::apply_gravity;
use crate::matching::{resolve_pass, PassReport};
use crate::types::BOARD_SIZE;

/// Result of resolving a board to its fixed point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainOutcome {
    /// Total score over all passes
    pub score: u32,
    /// Number of clearing passes (0 when nothing cleared)
    pub chain_depth: u32,
    /// Total cells removed
    pub cells_cleared: usize,
    /// Per-pass breakdown in resolution order
    pub passes: ArrayVec<PassReport, BOARD_SIZE>,
}

/// Resolve `board` in place until no group qualifies.
pub fn resolve_chain(board: &mut Board, config: &EngineConfig) -> ChainOutcome {
    let mut outcome = ChainOutcome::default();
    let mut depth: u32 = 1;

    while let Some(pass) = resolve_pass(board, depth, config) {
        debug!(
            "chain pass {}: {} group(s), {} cell(s), +{}",
            pass.depth, pass.groups, pass.cells, pass.score
        );

        apply_gravity(board);

        outcome.score = outcome.score.saturating_add(pass.score);
        outcome.chain_depth = depth;
        outcome.cells_cleared += pass.cells;
        outcome.passes.push(pass);
        depth += 1;
    }

    outcome
}
