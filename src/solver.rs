//! Backtracking search for a move sequence that clears the board.
use crate::engine::{Board, Tile};
use crate::rules::{enumerate_moves, is_dead_end, playable_marbles, Move};

/// Represents a solution found by the solver: applying the moves in order
/// to the starting board empties it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Sequence of paired removals, in play order.
    pub moves: Vec<Move>,
}

impl Solution {
    /// Number of moves in the solution.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Receives notifications about search progress. The search never changes
/// behavior based on an observer; implementations are free to count, log,
/// or ignore the events.
pub trait SearchObserver {
    /// A candidate move is about to be applied at the given recursion depth.
    fn on_move_tried(&mut self, _depth: usize, _mov: &Move) {}
    /// The board produced by a candidate move failed the dead-end test and
    /// the branch was pruned.
    fn on_dead_end(&mut self, _depth: usize, _mov: &Move) {}
    /// Every candidate move at this depth failed; backtracking to the caller.
    fn on_exhausted(&mut self, _depth: usize) {}
}

/// The do-nothing observer, used by [`solve`].
impl SearchObserver for () {}

/// Counts search events; used by the CLI to report how much work a solve took.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    /// Number of candidate moves applied.
    pub moves_tried: u64,
    /// Number of branches pruned by the dead-end test.
    pub dead_ends: u64,
    /// Number of exhausted (backtracked) nodes.
    pub backtracks: u64,
    /// Deepest recursion level reached.
    pub max_depth: usize,
}

impl SearchObserver for SearchStats {
    fn on_move_tried(&mut self, depth: usize, _mov: &Move) {
        self.moves_tried += 1;
        if depth > self.max_depth {
            self.max_depth = depth;
        }
    }

    fn on_dead_end(&mut self, _depth: usize, _mov: &Move) {
        self.dead_ends += 1;
    }

    fn on_exhausted(&mut self, _depth: usize) {
        self.backtracks += 1;
    }
}

/// Searches for a move sequence that clears the given board.
///
/// Returns the first solution found (not necessarily the shortest), or
/// `None` when every branch is exhausted. An unsolvable board is an expected
/// outcome, not an error.
pub fn solve(board: &Board) -> Option<Solution> {
    solve_with_observer(board, &mut ())
}

/// Same as [`solve`], reporting search progress to the given observer.
pub fn solve_with_observer(
    board: &Board,
    observer: &mut impl SearchObserver,
) -> Option<Solution> {
    if board.is_cleared() {
        return Some(Solution { moves: Vec::new() });
    }
    if is_dead_end(board) {
        return None;
    }
    search(board, 0, observer).map(|moves| Solution { moves })
}

/// Depth-first recursion over board states. Each branch owns an independent
/// board clone, so there is no undo step.
fn search(
    board: &Board,
    depth: usize,
    observer: &mut impl SearchObserver,
) -> Option<Vec<Move>> {
    let marbles = playable_marbles(board);
    let mut candidates = enumerate_moves(&marbles);
    // Stable sort keeps discovery order among equal priorities.
    candidates.sort_by_key(|mov| mov.priority);

    for mov in candidates {
        observer.on_move_tried(depth, &mov);

        let mut next = board.clone();
        next.set_tile(mov.first.0, mov.first.1, Tile::Empty);
        next.set_tile(mov.second.0, mov.second.1, Tile::Empty);

        if next.is_cleared() {
            return Some(vec![mov]);
        }

        // A dead-end clone prunes only this candidate; its siblings removed
        // different marbles and may still pass.
        if is_dead_end(&next) {
            observer.on_dead_end(depth, &mov);
            continue;
        }

        if let Some(rest) = search(&next, depth + 1, observer) {
            let mut moves = Vec::with_capacity(rest.len() + 1);
            moves.push(mov);
            moves.extend(rest);
            return Some(moves);
        }
    }

    observer.on_exhausted(depth);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::is_playable;
    use crate::utils::board_from_str_array;

    /// Applies a solution move by move, asserting that every targeted cell
    /// holds a marble at the moment it is removed.
    fn apply_solution(board: &Board, solution: &Solution) -> Board {
        let mut board = board.clone();
        for mov in &solution.moves {
            assert_ne!(
                board.get_tile(mov.first.0, mov.first.1),
                Tile::Empty,
                "first target of {:?} already empty",
                mov
            );
            board.set_tile(mov.first.0, mov.first.1, Tile::Empty);
            assert_ne!(
                board.get_tile(mov.second.0, mov.second.1),
                Tile::Empty,
                "second target of {:?} already empty",
                mov
            );
            board.set_tile(mov.second.0, mov.second.1, Tile::Empty);
        }
        board
    }

    #[test]
    fn test_solve_already_cleared_board() {
        let board = Board::new_empty();
        let solution = solve(&board).unwrap();
        assert!(solution.is_empty());
    }

    #[test]
    fn test_trivial_gold_board() {
        let mut board = Board::new_empty();
        board.set_tile(5, 5, Tile::Gold);
        let solution = solve(&board).unwrap();
        assert_eq!(solution.len(), 1);
        let mov = solution.moves[0];
        assert_eq!(mov.first, (5, 5));
        assert_eq!(mov.second, (5, 5));
        assert_eq!(mov.priority, 0);
        assert!(apply_solution(&board, &solution).is_cleared());
    }

    #[test]
    fn test_quicksilver_metal_board() {
        let mut board = Board::new_empty();
        board.set_tile(3, 3, Tile::Quicksilver);
        board.set_tile(7, 7, Tile::Lead);
        let solution = solve(&board).unwrap();
        assert_eq!(solution.len(), 1);
        let mov = solution.moves[0];
        assert_eq!(mov.priority, 1);
        assert_eq!((mov.first, mov.second), ((3, 3), (7, 7)));
        assert!(apply_solution(&board, &solution).is_cleared());
    }

    #[test]
    fn test_same_kind_elemental_board() {
        let mut board = Board::new_empty();
        board.set_tile(3, 3, Tile::Air);
        board.set_tile(7, 7, Tile::Air);
        let solution = solve(&board).unwrap();
        assert_eq!(solution.len(), 1);
        assert_eq!(solution.moves[0].priority, 3);
        assert!(apply_solution(&board, &solution).is_cleared());
    }

    #[test]
    fn test_unsolvable_board_flagged_before_search() {
        let mut board = Board::new_empty();
        board.set_tile(5, 5, Tile::Air);

        let mut stats = SearchStats::default();
        assert!(solve_with_observer(&board, &mut stats).is_none());
        // The dead-end test fires on the input board, before any candidate
        // move is explored.
        assert_eq!(stats.moves_tried, 0);
    }

    #[test]
    fn test_mismatched_elementals_unsolvable() {
        let mut board = Board::new_empty();
        board.set_tile(3, 3, Tile::Air);
        board.set_tile(7, 7, Tile::Fire);
        assert!(solve(&board).is_none());
    }

    #[test]
    fn test_dead_end_pruning_counts() {
        // Two airs and a salt. Pairing the airs strands the salt, and
        // pairing the salt with either air strands the other air; the two
        // air+salt branches are cut by the dead-end test without recursing.
        let mut board = Board::new_empty();
        board.set_tile(3, 3, Tile::Air);
        board.set_tile(5, 5, Tile::Air);
        board.set_tile(7, 7, Tile::Salt);

        let mut stats = SearchStats::default();
        assert!(solve_with_observer(&board, &mut stats).is_none());
        assert_eq!(stats.moves_tried, 3);
        assert_eq!(stats.dead_ends, 2);
        assert_eq!(stats.backtracks, 2);
    }

    #[test]
    fn test_metal_sequence_followed_in_solution() {
        // Two quicksilvers and two metals: Lead must be consumed before Tin.
        let board = board_from_str_array(&[
            "...Q...L...",
            "...........",
            "..Q....T...",
        ])
        .unwrap();
        let solution = solve(&board).unwrap();
        assert_eq!(solution.len(), 2);

        let metal_of = |mov: &Move| {
            [mov.first, mov.second]
                .into_iter()
                .map(|(x, y)| board.get_tile(x, y))
                .find(|kind| kind.is_metal())
                .unwrap()
        };
        assert_eq!(metal_of(&solution.moves[0]), Tile::Lead);
        assert_eq!(metal_of(&solution.moves[1]), Tile::Tin);
        assert!(apply_solution(&board, &solution).is_cleared());
    }

    #[test]
    fn test_multi_pair_board_solution_validity() {
        // One of every pairing rule: gold solo, quicksilver+lead, vitae+mors,
        // two airs, two fires, earth+salt. Marbles are spread out so the
        // openness gate never blocks.
        let board = board_from_str_array(&[
            "...Q.L.V...",
            "...........",
            "..M..A.A.F.",
            "...........",
            "..F..G..E..",
            "...........",
            "....S......",
        ])
        .unwrap();
        let mut stats = SearchStats::default();
        let solution = solve_with_observer(&board, &mut stats).unwrap();
        assert_eq!(solution.len(), 6);
        assert!(apply_solution(&board, &solution).is_cleared());
        assert!(stats.moves_tried >= 6);

        // Gold is free to play alone, so it sorts first.
        assert_eq!(solution.moves[0].priority, 0);
    }

    #[test]
    fn test_blocked_marble_requires_unblocking_first() {
        let mut board = Board::new_empty();
        // Water at (5, 4) with ring indices 1 and 4 occupied: its longest
        // contiguous free arc is 2, so it starts blocked.
        board.set_tile(5, 4, Tile::Water);
        board.set_tile(4, 3, Tile::Fire);
        board.set_tile(5, 5, Tile::Fire);
        // Its partner, wide open elsewhere.
        board.set_tile(8, 7, Tile::Water);
        assert!(!is_playable(&board, 5, 4));
        assert!(is_playable(&board, 8, 7));

        let solution = solve(&board).unwrap();
        assert_eq!(solution.len(), 2);
        // The fires must go first to open the water's arc.
        let first = solution.moves[0];
        assert_eq!(
            (board.get_tile(first.first.0, first.first.1), first.priority),
            (Tile::Fire, 3)
        );
        assert!(apply_solution(&board, &solution).is_cleared());
    }
}
