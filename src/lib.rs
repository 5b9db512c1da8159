//! Two small search engines behind a sliding-tile puzzle and a route finder.
//!
//! - **Puzzle (A\*)**: best-first search over sliding-tile boards with a
//!   Manhattan-distance heuristic, returning the shortest list of tile
//!   slides from a start board to the solved board.
//! - **ACO**: Ant Colony Optimization over a set of 2D points, returning the
//!   shortest open tour found by a colony of agents reinforcing a shared
//!   pheromone matrix.
//!
//! Both engines are synchronous and own all of their state for the length
//! of one run. Callers that need to keep an interactive thread free run
//! them on a worker and apply the returned result themselves.

pub mod aco;
pub mod error;
pub mod puzzle;
pub mod random;

pub use error::{Error, Result};
