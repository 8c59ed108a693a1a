//! Matching rules: which marbles may be removed right now, which pairs form
//! legal moves, and the cheap dead-end test used to prune the search.
use crate::engine::{is_valid_coordinate, neighbors, Board, Marble, Tile, BOARD_SIZE, ELEMENTALS};

/// A candidate move: two board positions to clear, plus a priority score.
/// Lower priority scores are tried first. Gold is the only marble that pairs
/// with itself, in which case `first == second`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    /// Board coordinates of the first marble to be played.
    pub first: (usize, usize),
    /// Board coordinates of the other marble to be played.
    pub second: (usize, usize),
    /// Priority score of the move. A higher score means less priority.
    pub priority: u8,
}

/// Whether the given neighbor coordinate counts as free: off the board, a
/// dead spot, or an empty cell.
fn is_free(board: &Board, (nx, ny): (isize, isize)) -> bool {
    !is_valid_coordinate(nx, ny) || board.get_tile(nx as usize, ny as usize) == Tile::Empty
}

/// Whether the cell at `(x, y)` has at least 3 contiguous free neighbors on
/// its hex ring, wraparound included.
///
/// The ring is scanned once in topology order. `last_run` tracks the current
/// run of free neighbors; `first_run` remembers the length of the run that
/// started at ring index 0, so a run wrapping from index 5 back to index 0
/// is counted as `last_run + first_run`. The first blocked neighbor freezes
/// `first_run`, which makes the two runs disjoint, so the sum never counts a
/// neighbor twice (the all-free ring exits early inside the loop).
pub fn has_open_arc(board: &Board, x: usize, y: usize) -> bool {
    let mut last_run = 0;
    let mut first_run: Option<u32> = None;
    for neighbor in neighbors(x, y) {
        if is_free(board, neighbor) {
            last_run += 1;
            if last_run >= 3 {
                return true;
            }
        } else {
            if first_run.is_none() {
                first_run = Some(last_run);
            }
            last_run = 0;
        }
    }
    last_run + first_run.unwrap_or(0) >= 3
}

/// Decides whether the marble at `(x, y)` may legally be removed right now.
///
/// A non-empty cell is playable iff:
/// 1. if its kind is a metal, it is the board's first pending metal, and
/// 2. its hex ring has an open arc of at least 3 free neighbors.
///
/// Returns `false` for empty cells.
pub fn is_playable(board: &Board, x: usize, y: usize) -> bool {
    let kind = board.get_tile(x, y);
    if kind == Tile::Empty {
        return false;
    }
    passes_metal_gate(kind, board.first_pending_metal()) && has_open_arc(board, x, y)
}

fn passes_metal_gate(kind: Tile, first_pending: Option<Tile>) -> bool {
    !kind.is_metal() || Some(kind) == first_pending
}

/// Scans the board (x outer, y inner) and returns every marble that is
/// currently playable.
pub fn playable_marbles(board: &Board) -> Vec<Marble> {
    let first_pending = board.first_pending_metal();
    let mut playable = Vec::new();
    for x in 0..BOARD_SIZE {
        for y in 0..BOARD_SIZE {
            let kind = board.get_tile(x, y);
            if kind == Tile::Empty {
                continue;
            }
            if passes_metal_gate(kind, first_pending) && has_open_arc(board, x, y) {
                playable.push(Marble { x, y, kind });
            }
        }
    }
    playable
}

/// Assuming the given marbles are all playable, returns every legal pairing
/// among them as a `Move` with its priority.
///
/// For every unordered pair `(i, j)` with `i <= j` over the input order:
/// - Gold paired with itself: priority 0.
/// - Any other self-pairing is skipped.
/// - Quicksilver with any metal: priority 1.
/// - Vitae with Mors: priority 2.
/// - Two elemental-compatible marbles where one is Salt or both share the
///   same elemental kind: priority 3, plus 1 for each Salt in the pair.
///   Salt is usually better saved for later moves.
/// - Anything else is not a legal pair.
pub fn enumerate_moves(marbles: &[Marble]) -> Vec<Move> {
    let mut moves = Vec::new();
    for i in 0..marbles.len() {
        for j in i..marbles.len() {
            let a = marbles[i];
            let b = marbles[j];

            let priority = if i == j {
                if a.kind == Tile::Gold {
                    Some(0)
                } else {
                    None
                }
            } else if a.kind.is_elemental_compatible()
                && b.kind.is_elemental_compatible()
                && (a.kind == Tile::Salt || b.kind == Tile::Salt || a.kind == b.kind)
            {
                let mut priority = 3;
                if a.kind == Tile::Salt {
                    priority += 1;
                }
                if b.kind == Tile::Salt {
                    priority += 1;
                }
                Some(priority)
            } else if (a.kind == Tile::Vitae && b.kind == Tile::Mors)
                || (a.kind == Tile::Mors && b.kind == Tile::Vitae)
            {
                Some(2)
            } else if (a.kind == Tile::Quicksilver && b.kind.is_metal())
                || (a.kind.is_metal() && b.kind == Tile::Quicksilver)
            {
                Some(1)
            } else {
                None
            };

            if let Some(priority) = priority {
                moves.push(Move {
                    first: a.position(),
                    second: b.position(),
                    priority,
                });
            }
        }
    }
    moves
}

/// Cheap necessary-condition test for unsolvable positions.
///
/// Counts the remaining marbles of each elemental kind. Every kind with an
/// odd count needs one Salt to pair off its stray marble, so if the number
/// of odd-count kinds exceeds the remaining Salt count the board can never
/// be cleared. A board passing this test is not guaranteed solvable.
pub fn is_dead_end(board: &Board) -> bool {
    let odd_elemental_counts = ELEMENTALS
        .into_iter()
        .filter(|&kind| board.find_tiles_of_kind(kind).count() % 2 == 1)
        .count();
    odd_elemental_counts > board.find_tiles_of_kind(Tile::Salt).count()
}
