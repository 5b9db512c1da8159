//! ACO configuration.

/// What an agent does when it cannot pick a next location.
///
/// This happens on the last construction step of every tour, when no
/// unvisited location is left, and on the rare draw that misses every
/// cumulative share because of rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeadEndPolicy {
    /// Move onto the current location, which commits it to the path.
    ///
    /// With a complete tour this appends the final location, so the path
    /// lists every point.
    #[default]
    RecordCurrent,

    /// Stop without touching the path. The final location stays out of it.
    Stop,
}

/// Configuration for [`AcoRunner`](super::AcoRunner).
///
/// Transition probabilities use pheromone alone, `tau^alpha`, with no
/// distance term.
///
/// # Examples
///
/// ```
/// use slagalica::aco::{AcoConfig, DeadEndPolicy};
///
/// let config = AcoConfig::default()
///     .with_iterations(50)
///     .with_population_size(10)
///     .with_dead_end(DeadEndPolicy::Stop)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Number of iterations. There is no convergence check.
    pub iterations: usize,

    /// Number of agents per iteration.
    pub population_size: usize,

    /// Fraction of pheromone removed per iteration, in `[0, 1)`.
    pub evaporation: f64,

    /// Exponent applied to pheromone when computing transition weights.
    pub alpha: f64,

    /// Initial pheromone is `initial_pheromone_scale * population_size / L`,
    /// with `L` the length of the input-order tour.
    pub initial_pheromone_scale: f64,

    /// Each agent deposits `deposit / path_length` on every edge it used.
    pub deposit: f64,

    /// Behavior when an agent has nowhere to go.
    pub dead_end: DeadEndPolicy,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            iterations: 200,
            population_size: 40,
            evaporation: 0.2,
            alpha: 2.0,
            initial_pheromone_scale: 100.0,
            deposit: 1000.0,
            dead_end: DeadEndPolicy::default(),
            seed: None,
        }
    }
}

impl AcoConfig {
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_evaporation(mut self, rate: f64) -> Self {
        self.evaporation = rate;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_initial_pheromone_scale(mut self, scale: f64) -> Self {
        self.initial_pheromone_scale = scale;
        self
    }

    pub fn with_deposit(mut self, deposit: f64) -> Self {
        self.deposit = deposit;
        self
    }

    pub fn with_dead_end(mut self, policy: DeadEndPolicy) -> Self {
        self.dead_end = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.iterations == 0 {
            return Err("iterations must be at least 1".into());
        }
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        if !(0.0..1.0).contains(&self.evaporation) {
            return Err(format!(
                "evaporation must be in [0, 1), got {}",
                self.evaporation
            ));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(format!(
                "alpha must be finite and non-negative, got {}",
                self.alpha
            ));
        }
        if !self.initial_pheromone_scale.is_finite() || self.initial_pheromone_scale <= 0.0 {
            return Err(format!(
                "initial_pheromone_scale must be positive, got {}",
                self.initial_pheromone_scale
            ));
        }
        if !self.deposit.is_finite() || self.deposit <= 0.0 {
            return Err(format!("deposit must be positive, got {}", self.deposit));
        }
        Ok(())
    }
}
