//! Ant Colony Optimization (ACO) over a set of 2D points.
//!
//! A population of agents repeatedly builds tours through every point,
//! choosing each next point with probability proportional to the pheromone
//! on the connecting edge raised to `alpha`. Shorter tours deposit more
//! pheromone, and all pheromone evaporates each iteration, so edges used by
//! good tours come to dominate. The shortest tour seen over a fixed number
//! of iterations is returned.
//!
//! Transition weights use pheromone only. There is no distance heuristic
//! term; adding one would be the place to extend [`AcoConfig`].
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod config;
mod pheromone;
mod runner;
mod types;

pub use config::{AcoConfig, DeadEndPolicy};
pub use pheromone::PheromoneMatrix;
pub use runner::{AcoResult, AcoRunner, Colony};
pub use types::{tour_length, Agent, Point};
