//! A* solver configuration.

/// Configuration for [`PuzzleRunner`](super::PuzzleRunner).
///
/// # Examples
///
/// ```
/// use slagalica::puzzle::PuzzleConfig;
///
/// let config = PuzzleConfig::default().with_max_expansions(50_000);
/// assert_eq!(config.max_expansions, 50_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PuzzleConfig {
    /// Maximum number of states to expand before giving up. 0 = no limit.
    ///
    /// A 3x3 board never needs a limit; larger boards can.
    pub max_expansions: usize,
}

impl PuzzleConfig {
    pub fn with_max_expansions(mut self, n: usize) -> Self {
        self.max_expansions = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}
