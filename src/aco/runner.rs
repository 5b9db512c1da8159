//! ACO execution loop.
//!
//! # Algorithm
//!
//! 1. Pick one random start location shared by every agent
//! 2. Seed every edge with `scale * population / L`, `L` the input-order
//!    tour length
//! 3. Each iteration:
//!    a. Every agent builds a tour by roulette-wheel selection over
//!       `tau^alpha` of its unvisited locations
//!    b. Every agent deposits `deposit / length` on the edges it used
//!    c. All pheromone evaporates by the configured rate
//!    d. The shortest tour of the iteration replaces the best if shorter
//!    e. Agents reset to the start location
//!
//! # Reference
//!
//! Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a Colony
//! of Cooperating Agents"

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, trace};

use super::config::{AcoConfig, DeadEndPolicy};
use super::pheromone::PheromoneMatrix;
use super::types::{tour_length, Agent, Point};
use crate::error::{Error, Result};
use crate::random::rng_from;

/// Result of an ACO run.
#[derive(Debug, Clone)]
pub struct AcoResult {
    /// Shortest tour found, starting at `start`.
    pub best_path: Vec<Point>,

    /// Length of `best_path`.
    pub best_length: f64,

    /// Location every agent started from.
    pub start: Point,

    /// Number of iterations executed.
    pub iterations: usize,

    /// Best length after each iteration. Non-increasing.
    pub length_history: Vec<f64>,
}

/// A colony bound to one point set, advanced one iteration at a time.
///
/// [`AcoRunner::run`] drives a colony for the configured number of
/// iterations; use this directly to observe the pheromone matrix or the
/// agents between iterations.
#[derive(Debug)]
pub struct Colony {
    config: AcoConfig,
    locations: Arc<[Point]>,
    start: Point,
    pheromones: PheromoneMatrix,
    agents: Vec<Agent>,
    best: Option<(Vec<Point>, f64)>,
    iteration: usize,
    rng: StdRng,
}

impl Colony {
    /// Validates the input and seeds the colony.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfig`] if the configuration is invalid
    /// - [`Error::InvalidPoints`] for fewer than two points, duplicates,
    ///   non-finite coordinates, or a spread so extreme that the initial
    ///   pheromone level is not a positive finite number
    pub fn new(points: &[Point], config: &AcoConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;
        validate_points(points)?;

        let mut rng = rng_from(config.seed);
        let locations: Arc<[Point]> = points.into();
        let start = locations[rng.random_range(0..locations.len())];

        let naive_length = tour_length(&locations);
        if naive_length <= 0.0 || !naive_length.is_finite() {
            return Err(Error::InvalidPoints(format!(
                "input-order tour length {naive_length} is not a positive finite number"
            )));
        }
        let initial = config.initial_pheromone_scale * config.population_size as f64 / naive_length;
        if initial <= 0.0 || !initial.is_finite() {
            return Err(Error::InvalidPoints(format!(
                "points are too close together to seed pheromone (initial level {initial})"
            )));
        }
        let pheromones = PheromoneMatrix::new(locations.len(), initial);

        let agents = (0..config.population_size)
            .map(|id| Agent::new(id, Arc::clone(&locations), start))
            .collect();

        debug!(
            points = locations.len(),
            population = config.population_size,
            initial_pheromone = initial,
            "colony initialized"
        );

        Ok(Self {
            config: config.clone(),
            locations,
            start,
            pheromones,
            agents,
            best: None,
            iteration: 0,
            rng,
        })
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn pheromones(&self) -> &PheromoneMatrix {
        &self.pheromones
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Iterations completed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Best tour so far and its length.
    pub fn best(&self) -> Option<(&[Point], f64)> {
        self.best
            .as_ref()
            .map(|(path, length)| (path.as_slice(), *length))
    }

    /// Runs one construct, reinforce, evaporate, record, reset cycle.
    ///
    /// Returns the best length so far.
    pub fn iterate(&mut self) -> f64 {
        let steps = self.locations.len();
        for agent in &mut self.agents {
            construct_tour(
                agent,
                &self.locations,
                &self.pheromones,
                &self.config,
                steps,
                &mut self.rng,
            );
        }

        for agent in &self.agents {
            reinforce(&mut self.pheromones, &self.locations, agent, self.config.deposit);
        }
        self.pheromones.evaporate(self.config.evaporation);
        debug_assert!(self.pheromones.is_consistent());

        self.record_best();

        for agent in &mut self.agents {
            agent.reset(self.start);
        }
        self.iteration += 1;

        let best_length = self.best.as_ref().map_or(0.0, |(_, length)| *length);
        trace!(iteration = self.iteration, best_length, "aco iteration");
        best_length
    }

    fn record_best(&mut self) {
        let Some(candidate) = self
            .agents
            .iter()
            .min_by(|a, b| a.path_length().total_cmp(&b.path_length()))
        else {
            return;
        };
        let length = candidate.path_length();
        let improves = match &self.best {
            None => true,
            Some((_, best_length)) => length < *best_length,
        };
        if improves {
            self.best = Some((candidate.path().to_vec(), length));
        }
    }

    /// Consumes the colony and packages its best tour.
    fn into_result(self, length_history: Vec<f64>) -> AcoResult {
        let (best_path, best_length) = self.best.unwrap_or_default();
        AcoResult {
            best_path,
            best_length,
            start: self.start,
            iterations: self.iteration,
            length_history,
        }
    }
}

/// Executes Ant Colony Optimization.
pub struct AcoRunner;

impl AcoRunner {
    /// Finds a short tour through `points`.
    ///
    /// # Examples
    ///
    /// ```
    /// use slagalica::aco::{AcoConfig, AcoRunner, Point};
    ///
    /// let points = [
    ///     Point::new(0.0, 0.0),
    ///     Point::new(10.0, 0.0),
    ///     Point::new(10.0, 10.0),
    ///     Point::new(0.0, 10.0),
    /// ];
    /// let config = AcoConfig::default().with_iterations(20).with_seed(7);
    /// let result = AcoRunner::run(&points, &config).unwrap();
    ///
    /// assert_eq!(result.best_path.len(), 4);
    /// assert_eq!(result.best_path[0], result.start);
    /// ```
    ///
    /// # Errors
    ///
    /// See [`Colony::new`].
    pub fn run(points: &[Point], config: &AcoConfig) -> Result<AcoResult> {
        let mut colony = Colony::new(points, config)?;
        let mut length_history = Vec::with_capacity(config.iterations);

        for _ in 0..config.iterations {
            length_history.push(colony.iterate());
        }

        let result = colony.into_result(length_history);
        debug!(
            best_length = result.best_length,
            iterations = result.iterations,
            "aco finished"
        );
        Ok(result)
    }
}

fn validate_points(points: &[Point]) -> Result<()> {
    if points.len() < 2 {
        return Err(Error::InvalidPoints(format!(
            "at least 2 points are required, got {}",
            points.len()
        )));
    }
    if let Some(p) = points.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(Error::InvalidPoints(format!(
            "non-finite coordinate ({}, {})",
            p.x, p.y
        )));
    }
    for (i, p) in points.iter().enumerate() {
        if points[i + 1..].contains(p) {
            return Err(Error::InvalidPoints(format!(
                "duplicate point ({}, {})",
                p.x, p.y
            )));
        }
    }
    Ok(())
}

fn index_of(locations: &[Point], point: Point) -> Option<usize> {
    let index = locations.iter().position(|&p| p == point);
    debug_assert!(index.is_some(), "point {point:?} is not a known location");
    index
}

/// Extends `agent` for up to `steps` steps.
///
/// A complete tour takes `steps - 1` moves, so the final step always meets
/// an empty unvisited set and falls to the dead-end policy.
fn construct_tour<R: Rng>(
    agent: &mut Agent,
    locations: &[Point],
    pheromones: &PheromoneMatrix,
    config: &AcoConfig,
    steps: usize,
    rng: &mut R,
) {
    for _ in 0..steps {
        match choose_next(agent, locations, pheromones, config.alpha, rng) {
            Some(next) => agent.move_to(next),
            None => {
                if config.dead_end == DeadEndPolicy::RecordCurrent {
                    agent.move_to(agent.current());
                }
                break;
            }
        }
    }
}

/// Roulette-wheel choice over the agent's unvisited locations.
///
/// Candidates keep their order in the unvisited list; the first whose
/// cumulative share reaches the draw wins.
fn choose_next<R: Rng>(
    agent: &Agent,
    locations: &[Point],
    pheromones: &PheromoneMatrix,
    alpha: f64,
    rng: &mut R,
) -> Option<Point> {
    let unvisited = agent.unvisited();
    if unvisited.is_empty() {
        return None;
    }
    let from = index_of(locations, agent.current())?;

    let taus: Vec<f64> = unvisited
        .iter()
        .map(|&p| index_of(locations, p).map_or(0.0, |to| pheromones.get(from, to)))
        .collect();

    // Scaling by the strongest trail keeps tau^alpha from overflowing; the
    // shares are unchanged.
    let tau_max = taus.iter().copied().fold(0.0, f64::max);
    if tau_max <= 0.0 || !tau_max.is_finite() {
        return None;
    }
    let trails: Vec<f64> = taus.iter().map(|&tau| (tau / tau_max).powf(alpha)).collect();
    let sum: f64 = trails.iter().sum();
    if sum <= 0.0 || !sum.is_finite() {
        return None;
    }

    let draw: f64 = rng.random();
    let mut cumulative = 0.0;
    for (&candidate, trail) in unvisited.iter().zip(&trails) {
        cumulative += trail / sum;
        if draw <= cumulative {
            return Some(candidate);
        }
    }
    None
}

/// Deposits `deposit / length` on every edge of the agent's path.
///
/// A zero-length path deposits nothing.
fn reinforce(pheromones: &mut PheromoneMatrix, locations: &[Point], agent: &Agent, deposit: f64) {
    let length = agent.path_length();
    if length <= 0.0 {
        return;
    }
    let delta = deposit / length;
    for pair in agent.path().windows(2) {
        if let (Some(a), Some(b)) = (index_of(locations, pair[0]), index_of(locations, pair[1])) {
            pheromones.deposit(a, b, delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    fn scattered() -> Vec<Point> {
        // input order zig-zags, so the naive tour is long
        vec![
            Point::new(0.0, 0.0),
            Point::new(90.0, 80.0),
            Point::new(10.0, 5.0),
            Point::new(80.0, 90.0),
            Point::new(20.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(5.0, 15.0),
            Point::new(95.0, 70.0),
        ]
    }

    #[test]
    fn test_rejects_too_few_points() {
        let config = AcoConfig::default().with_seed(1);
        assert!(matches!(
            AcoRunner::run(&[], &config),
            Err(Error::InvalidPoints(_))
        ));
        assert!(matches!(
            AcoRunner::run(&[Point::new(1.0, 1.0)], &config),
            Err(Error::InvalidPoints(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_and_non_finite_points() {
        let config = AcoConfig::default().with_seed(1);
        let dup = [Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(1.0, 1.0)];
        assert!(matches!(
            AcoRunner::run(&dup, &config),
            Err(Error::InvalidPoints(_))
        ));
        let nan = [Point::new(1.0, 1.0), Point::new(f64::NAN, 2.0)];
        assert!(matches!(
            AcoRunner::run(&nan, &config),
            Err(Error::InvalidPoints(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = AcoConfig::default().with_iterations(0);
        assert!(matches!(
            AcoRunner::run(&square(), &config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_initial_pheromone() {
        let config = AcoConfig::default().with_population_size(5).with_seed(3);
        let colony = Colony::new(&square(), &config).unwrap();
        // input-order tour is 30 long
        let expected = 100.0 * 5.0 / 30.0;
        assert!((colony.pheromones().get(0, 1) - expected).abs() < 1e-9);
        assert!((colony.pheromones().get(3, 0) - expected).abs() < 1e-9);
        assert_eq!(colony.pheromones().get(2, 2), 0.0);
        assert!(colony.best().is_none());
    }

    #[test]
    fn test_record_current_policy_visits_every_point() {
        let points = scattered();
        let config = AcoConfig::default().with_iterations(5).with_seed(11);
        let result = AcoRunner::run(&points, &config).unwrap();

        assert_eq!(result.best_path.len(), points.len());
        assert_eq!(result.best_path[0], result.start);
        for p in &points {
            assert!(result.best_path.contains(p), "missing {p:?}");
        }
        assert!((tour_length(&result.best_path) - result.best_length).abs() < 1e-9);
    }

    #[test]
    fn test_stop_policy_leaves_last_point_out() {
        let points = scattered();
        let config = AcoConfig::default()
            .with_iterations(5)
            .with_dead_end(DeadEndPolicy::Stop)
            .with_seed(11);
        let result = AcoRunner::run(&points, &config).unwrap();
        assert_eq!(result.best_path.len(), points.len() - 1);
    }

    #[test]
    fn test_best_not_worse_than_input_order() {
        let points = scattered();
        let naive = tour_length(&points);
        let config = AcoConfig::default().with_iterations(100).with_seed(5);
        let result = AcoRunner::run(&points, &config).unwrap();
        assert!(
            result.best_length <= naive,
            "best {} worse than naive {naive}",
            result.best_length
        );
    }

    #[test]
    fn test_square_finds_perimeter_path() {
        // any open path along three sides has length 30; diagonals make it longer
        let config = AcoConfig::default().with_iterations(50).with_seed(21);
        let result = AcoRunner::run(&square(), &config).unwrap();
        assert!((result.best_length - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = AcoConfig::default().with_iterations(30).with_seed(99);
        let a = AcoRunner::run(&scattered(), &config).unwrap();
        let b = AcoRunner::run(&scattered(), &config).unwrap();
        assert_eq!(a.best_path, b.best_path);
        assert_eq!(a.best_length, b.best_length);
        assert_eq!(a.start, b.start);
        assert_eq!(a.length_history, b.length_history);
    }

    #[test]
    fn test_history_non_increasing() {
        let config = AcoConfig::default().with_iterations(60).with_seed(4);
        let result = AcoRunner::run(&scattered(), &config).unwrap();
        assert_eq!(result.length_history.len(), 60);
        assert_eq!(result.iterations, 60);
        for window in result.length_history.windows(2) {
            assert!(window[1] <= window[0]);
        }
    }

    #[test]
    fn test_pheromones_stay_consistent() {
        let config = AcoConfig::default().with_population_size(8).with_seed(2);
        let mut colony = Colony::new(&scattered(), &config).unwrap();
        for _ in 0..25 {
            colony.iterate();
            assert!(colony.pheromones().is_consistent());
        }
        assert_eq!(colony.iteration(), 25);
    }

    #[test]
    fn test_agents_reset_after_iteration() {
        let config = AcoConfig::default().with_population_size(3).with_seed(8);
        let mut colony = Colony::new(&square(), &config).unwrap();
        colony.iterate();
        for agent in colony.agents() {
            assert_eq!(agent.path_length(), 0.0);
            assert_eq!(agent.current(), colony.start());
            assert_eq!(agent.unvisited().len(), 3);
        }
    }

    #[test]
    fn test_reinforce_skips_zero_length() {
        let points: Arc<[Point]> = square().into();
        let mut pm = PheromoneMatrix::new(4, 1.0);
        let agent = Agent::new(0, Arc::clone(&points), points[0]);
        reinforce(&mut pm, &points, &agent, 1000.0);
        assert_eq!(pm, PheromoneMatrix::new(4, 1.0));
    }

    #[test]
    fn test_choose_next_follows_dominant_trail() {
        let points: Arc<[Point]> = square().into();
        let mut pm = PheromoneMatrix::new(4, 1e-9);
        pm.deposit(0, 2, 1e6);
        let agent = Agent::new(0, Arc::clone(&points), points[0]);
        let mut rng = crate::random::create_rng(0);
        for _ in 0..20 {
            assert_eq!(
                choose_next(&agent, &points, &pm, 2.0, &mut rng),
                Some(points[2])
            );
        }
    }

    #[test]
    fn test_large_alpha_still_builds_full_tours() {
        let config = AcoConfig::default()
            .with_alpha(200.0)
            .with_iterations(5)
            .with_seed(1);
        assert!(config.validate().is_ok());
        let result = AcoRunner::run(&square(), &config).unwrap();
        assert_eq!(result.best_path.len(), square().len());
        assert!(result.best_length > 0.0);
    }

    #[test]
    fn test_choose_next_none_for_all_zero_row() {
        let points: Arc<[Point]> = square().into();
        let pm = PheromoneMatrix::new(4, 0.0);
        let agent = Agent::new(0, Arc::clone(&points), points[0]);
        let mut rng = crate::random::create_rng(0);
        assert_eq!(choose_next(&agent, &points, &pm, 2.0, &mut rng), None);
    }

    #[test]
    fn test_rejects_extreme_spread() {
        let config = AcoConfig::default().with_seed(1);
        let huge = [
            Point::new(-1e308, 0.0),
            Point::new(1e308, 0.0),
            Point::new(0.0, 1.0),
        ];
        assert!(matches!(
            AcoRunner::run(&huge, &config),
            Err(Error::InvalidPoints(_))
        ));
        let tiny = [Point::new(0.0, 0.0), Point::new(1e-320, 0.0)];
        assert!(matches!(
            AcoRunner::run(&tiny, &config),
            Err(Error::InvalidPoints(_))
        ));
    }

    #[test]
    fn test_best_length_is_positive_zero_before_any_tour() {
        let config = AcoConfig::default().with_seed(3);
        let colony = Colony::new(&square(), &config).unwrap();
        for agent in colony.agents() {
            assert!(agent.path_length().is_sign_positive());
        }
    }
}
