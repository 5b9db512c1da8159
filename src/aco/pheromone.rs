//! Edge desirability shared by the colony.

/// Symmetric `n x n` pheromone levels with a zero diagonal.
///
/// Only [`deposit`](Self::deposit) and [`evaporate`](Self::evaporate) mutate
/// the matrix, and both keep it symmetric with no self-loops.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PheromoneMatrix {
    n: usize,
    values: Vec<f64>,
}

impl PheromoneMatrix {
    /// Every off-diagonal cell starts at `initial`.
    pub fn new(n: usize, initial: f64) -> Self {
        let mut values = vec![initial; n * n];
        for i in 0..n {
            values[i * n + i] = 0.0;
        }
        Self { n, values }
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.values[from * self.n + to]
    }

    /// Adds `amount` to the edge in both directions. Self-loops are ignored.
    pub fn deposit(&mut self, a: usize, b: usize, amount: f64) {
        if a == b {
            return;
        }
        self.values[a * self.n + b] += amount;
        self.values[b * self.n + a] += amount;
    }

    /// Scales every cell by `1 - rate`.
    pub fn evaporate(&mut self, rate: f64) {
        let retention = 1.0 - rate;
        for v in &mut self.values {
            *v *= retention;
        }
    }

    /// Checks symmetry, non-negativity and the zero diagonal.
    pub fn is_consistent(&self) -> bool {
        (0..self.n).all(|i| {
            self.get(i, i) == 0.0
                && (0..self.n).all(|j| {
                    let v = self.get(i, j);
                    v >= 0.0 && v == self.get(j, i)
                })
        })
    }
}
