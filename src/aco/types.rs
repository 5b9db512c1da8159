//! Points and the agents that tour them.

use std::sync::Arc;

/// A 2D location. Compared by exact value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Length of the open path visiting `points` in order.
///
/// Zero for fewer than two points.
pub fn tour_length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .fold(0.0, |acc, w| acc + w[0].distance(w[1]))
}

/// One ant: a tour under construction over a shared set of locations.
///
/// `path` holds the locations the agent has left, in order; the location it
/// currently stands on joins the path only when it moves on.
#[derive(Debug, Clone)]
pub struct Agent {
    id: usize,
    locations: Arc<[Point]>,
    unvisited: Vec<Point>,
    current: Point,
    path: Vec<Point>,
}

impl Agent {
    /// Creates an agent standing on `start`.
    pub fn new(id: usize, locations: Arc<[Point]>, start: Point) -> Self {
        let mut agent = Self {
            id,
            unvisited: Vec::with_capacity(locations.len()),
            path: Vec::with_capacity(locations.len()),
            locations,
            current: start,
        };
        agent.reset(start);
        agent
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn unvisited(&self) -> &[Point] {
        &self.unvisited
    }

    pub fn locations(&self) -> &[Point] {
        &self.locations
    }

    /// Steps to `to`, recording the current location in the path.
    ///
    /// Moving to a location that was already visited is allowed; it is
    /// simply not in `unvisited` any more.
    pub fn move_to(&mut self, to: Point) {
        self.path.push(self.current);
        self.current = to;
        self.mark_visited(to);
    }

    /// Starts a fresh tour from `start`.
    pub fn reset(&mut self, start: Point) {
        self.path.clear();
        self.current = start;
        self.unvisited.clear();
        self.unvisited.extend_from_slice(&self.locations);
        self.mark_visited(start);
    }

    /// Sum of distances between consecutive path points.
    pub fn path_length(&self) -> f64 {
        tour_length(&self.path)
    }

    fn mark_visited(&mut self, location: Point) {
        if let Some(i) = self.unvisited.iter().position(|&p| p == location) {
            self.unvisited.remove(i);
        }
    }
}
