//! # Sigmar Solver Library
//!
//! This library solves Sigmar's Garden, the hexagonal tile-matching
//! solitaire from Opus Magnum: given a starting board it searches for an
//! ordered sequence of paired removals that empties the board entirely.
//!
//! It is used by two binaries:
//! - `solve_board`: reads a board file, searches for a solution, and prints
//!   the move sequence.
//! - `generate_board`: emits a random starting board with the legitimate
//!   marble counts.
//!
//! ## Modules
//! - `engine`: the board representation (`Board`), marble kinds (`Tile`),
//!   the dead-spot layout, and the hex neighbor topology.
//! - `rules`: the playability predicate, legal-pair enumeration with
//!   priorities, and the dead-end pruning test.
//! - `solver`: the backtracking search (`solve`) and the `SearchObserver`
//!   progress hook.
//! - `utils`: board parsing from text and starting-board validation.

pub mod engine;
pub mod rules;
pub mod solver;
pub mod utils;
