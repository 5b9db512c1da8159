//! Sliding-tile puzzle solved with A* search.
//!
//! A best-first graph search over board states, guided by the sum of
//! Manhattan distances of every tile from its goal cell. The solver returns
//! the move list; applying it is left to the caller, one move at a time if
//! it wants to animate.
//!
//! # Examples
//!
//! ```
//! use slagalica::puzzle::{shuffle, Board, PuzzleRunner};
//! use slagalica::random::create_rng;
//!
//! let goal = Board::goal(3).unwrap();
//! let (start, _) = shuffle(&goal, 20, &mut create_rng(42));
//!
//! let result = PuzzleRunner::solve(&start).unwrap();
//! assert!(start.apply_all(result.moves).unwrap().is_goal());
//! ```
//!
//! # References
//!
//! - Hart, Nilsson & Raphael (1968), "A Formal Basis for the Heuristic
//!   Determination of Minimum Cost Paths"

mod config;
mod heuristic;
mod runner;
mod shuffle;
mod state;
mod types;

pub use config::PuzzleConfig;
pub use heuristic::manhattan;
pub use runner::{PuzzleResult, PuzzleRunner};
pub use shuffle::shuffle;
pub use state::{PuzzleState, StateArena, StateId};
pub use types::{Board, Direction, Move, Position, Tile};
