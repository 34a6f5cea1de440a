//! Matching module - connected-group detection and removal
//!
//! A group is the maximal set of same-colored cells reachable through
//! up/down/left/right neighbours. Groups are found with an explicit stack and
//! visited bitmap (no recursion, no heap allocation); membership does not
//! depend on traversal order.
//!
//! A pass removes every qualifying group on the board at once, and all of
//! them share the pass's chain depth when scored.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::board::Board;
use crate::config::EngineConfig;
use crate::types::{Color, Pos, BOARD_HEIGHT, BOARD_SIZE, BOARD_WIDTH};

/// Cells of one connected group
pub type Group = ArrayVec<Pos, BOARD_SIZE>;

const NEIGHBOURS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Color and size of a group selected for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub color: Color,
    pub size: usize,
}

/// Everything one pass will remove
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearSet {
    /// Union of all qualifying groups' cells
    pub cells: ArrayVec<Pos, BOARD_SIZE>,
    /// One entry per qualifying group, in row-major discovery order
    pub groups: ArrayVec<GroupSummary, BOARD_SIZE>,
}

impl ClearSet {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Score for removing this set at `depth`: Σ size × cell_score × depth
    pub fn score(&self, depth: u32, cell_score: u32) -> u32 {
        self.groups.iter().fold(0u32, |acc, g| {
            acc.saturating_add((g.size as u32).saturating_mul(cell_score).saturating_mul(depth))
        })
    }
}

/// Outcome of one clearing pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassReport {
    /// Chain depth this pass was scored at (1-based)
    pub depth: u32,
    /// Number of groups removed
    pub groups: usize,
    /// Number of cells removed
    pub cells: usize,
    pub score: u32,
}

/// Flood-fill from `start`, marking every reached cell in `visited`.
fn flood(board: &Board, start: Pos, color: Color, visited: &mut [bool; BOARD_SIZE]) -> Group {
    let mut group = Group::new();
    let mut stack: ArrayVec<Pos, BOARD_SIZE> = ArrayVec::new();

    if let Some(idx) = Board::index(start.0, start.1) {
        visited[idx] = true;
        stack.push(start);
    }

    while let Some((x, y)) = stack.pop() {
        group.push((x, y));
        for (dx, dy) in NEIGHBOURS {
            let (nx, ny) = (x + dx, y + dy);
            let Some(idx) = Board::index(nx, ny) else {
                continue;
            };
            if !visited[idx] && board.get(nx, ny) == Some(color) {
                // Marked on push so a cell is never stacked twice.
                visited[idx] = true;
                stack.push((nx, ny));
            }
        }
    }

    group
}

/// Connected group containing (x, y), or `None` for empty/out-of-bounds cells.
pub fn connected_group(board: &Board, x: i8, y: i8) -> Option<Group> {
    let color = board.get(x, y).filter(|c| c.is_piece())?;
    let mut visited = [false; BOARD_SIZE];
    Some(flood(board, (x, y), color, &mut visited))
}

/// Scan row-major and collect every group of at least `threshold` cells.
pub fn find_clearable(board: &Board, threshold: usize) -> ClearSet {
    let mut visited = [false; BOARD_SIZE];
    let mut set = ClearSet::default();

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            let idx = (y as usize) * (BOARD_WIDTH as usize) + (x as usize);
            let color = board.at(x as usize, y as usize);
            if visited[idx] || !color.is_piece() {
                continue;
            }

            let group = flood(board, (x, y), color, &mut visited);
            if group.len() >= threshold {
                set.groups.push(GroupSummary {
                    color,
                    size: group.len(),
                });
                set.cells.extend(group);
            }
        }
    }

    set
}

/// Detect, remove, and score one pass at chain depth `depth`.
///
/// Returns `None` (board untouched) when no group qualifies.
pub fn resolve_pass(board: &mut Board, depth: u32, config: &EngineConfig) -> Option<PassReport> {
    let set = find_clearable(board, config.clear_threshold);
    if set.is_empty() {
        return None;
    }

    for &(x, y) in &set.cells {
        board.put(x as usize, y as usize, Color::Empty);
    }

    Some(PassReport {
        depth,
        groups: set.groups.len(),
        cells: set.cells.len(),
        score: set.score(depth, config.cell_score),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(group: &Group) -> Vec<Pos> {
        let mut cells = group.to_vec();
        cells.sort();
        cells
    }

    #[test]
    fn test_group_ignores_diagonals() {
        let board = Board::from_rows(&["R.....", ".R....", "RR...."]).unwrap();

        let group = connected_group(&board, 0, 11).unwrap();
        assert_eq!(sorted(&group), vec![(0, 11), (1, 10), (1, 11)]);

        let lone = connected_group(&board, 0, 9).unwrap();
        assert_eq!(lone.len(), 1);
    }

    #[test]
    fn test_group_does_not_cross_other_colors() {
        let board = Board::from_rows(&["RBR...", "RBR..."]).unwrap();

        assert_eq!(connected_group(&board, 0, 10).unwrap().len(), 2);
        assert_eq!(connected_group(&board, 2, 11).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_cell_has_no_group() {
        let board = Board::new();
        assert!(connected_group(&board, 0, 0).is_none());
        assert!(connected_group(&board, -1, 0).is_none());
    }

    #[test]
    fn test_find_clearable_threshold() {
        let board = Board::from_rows(&["GGG...", "RRRR.."]).unwrap();

        let set = find_clearable(&board, 4);
        assert_eq!(
            set.groups.as_slice(),
            &[GroupSummary {
                color: Color::Red,
                size: 4
            }]
        );
        assert_eq!(set.cells.len(), 4);

        let set = find_clearable(&board, 3);
        assert_eq!(set.groups.len(), 2);
        assert_eq!(set.cells.len(), 7);
    }

    #[test]
    fn test_resolve_pass_clears_all_groups_at_once() {
        let mut board = Board::from_rows(&["RR..BB", "RR..BB"]).unwrap();
        let config = EngineConfig::default();

        let report = resolve_pass(&mut board, 2, &config).unwrap();
        assert_eq!(report.groups, 2);
        assert_eq!(report.cells, 8);
        assert_eq!(report.score, 4 * 10 * 2 + 4 * 10 * 2);
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_resolve_pass_without_match_is_noop() {
        let mut board = Board::from_rows(&["RRRB.."]).unwrap();
        let before = board;

        assert!(resolve_pass(&mut board, 1, &EngineConfig::default()).is_none());
        assert_eq!(board, before);
    }
}
