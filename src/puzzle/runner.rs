//! A* search loop.
//!
//! # Algorithm
//!
//! 1. Push the start state onto the open list
//! 2. Pop the open state with the lowest `f = cost + manhattan`; ties go to
//!    the state admitted first
//! 3. If it is the goal, walk parent links back to the start
//! 4. Otherwise close it and admit each child unless an equal board is
//!    already open or closed at a cost no greater than the child's
//! 5. Fail once the open list is empty
//!
//! # Reference
//!
//! Hart, Nilsson & Raphael (1968), "A Formal Basis for the Heuristic
//! Determination of Minimum Cost Paths"

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, trace};

use super::config::PuzzleConfig;
use super::heuristic::manhattan;
use super::state::{PuzzleState, StateArena, StateId};
use super::types::{Board, Move};
use crate::error::{Error, Result};

/// Result of a successful search.
#[derive(Debug, Clone)]
pub struct PuzzleResult {
    /// Moves from the start board to the goal, in execution order.
    pub moves: Vec<Move>,

    /// Number of states popped and expanded.
    pub expanded: usize,

    /// Number of child states generated (admitted or not).
    pub generated: usize,

    /// Largest size the open list reached.
    pub max_open: usize,
}

impl PuzzleResult {
    /// Number of moves in the solution.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Frontier entry ordered so the max-heap yields the lowest `f`, then the
/// lowest admission sequence.
#[derive(Debug, PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    seq: u64,
    id: StateId,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Open and closed lists for one search.
///
/// Both are keyed by board content. The open map records which arena state
/// currently represents a board; heap entries whose state has been replaced
/// by a cheaper duplicate are skipped when popped.
struct Frontier {
    heap: BinaryHeap<OpenEntry>,
    open: HashMap<Board, StateId>,
    closed: HashMap<Board, u32>,
    seq: u64,
}

impl Frontier {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            open: HashMap::new(),
            closed: HashMap::new(),
            seq: 0,
        }
    }

    fn push(&mut self, arena: &StateArena, id: StateId) {
        let state = arena.get(id);
        let f = state.cost() + manhattan(state.board());
        self.open.insert(state.board().clone(), id);
        self.heap.push(OpenEntry {
            f,
            seq: self.seq,
            id,
        });
        self.seq += 1;
    }

    fn pop(&mut self, arena: &StateArena) -> Option<StateId> {
        while let Some(entry) = self.heap.pop() {
            let board = arena.get(entry.id).board();
            if self.open.get(board) == Some(&entry.id) {
                self.open.remove(board);
                return Some(entry.id);
            }
        }
        None
    }

    /// Applies the duplicate policy to a child; true if it should be admitted.
    fn should_admit(&mut self, arena: &StateArena, child: &PuzzleState) -> bool {
        if let Some(&existing) = self.open.get(child.board()) {
            if arena.get(existing).cost() <= child.cost() {
                return false;
            }
            // stale heap entry is skipped on pop
            self.open.remove(child.board());
        }
        if let Some(&closed_cost) = self.closed.get(child.board()) {
            if closed_cost <= child.cost() {
                return false;
            }
            self.closed.remove(child.board());
        }
        true
    }

    fn close(&mut self, board: &Board, cost: u32) {
        self.closed.insert(board.clone(), cost);
    }

    fn open_len(&self) -> usize {
        self.open.len()
    }
}

/// Executes the A* search.
pub struct PuzzleRunner;

impl PuzzleRunner {
    /// Solves `start` with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use slagalica::puzzle::{Board, Direction, Move, PuzzleRunner};
    ///
    /// let start = Board::from_numbers(3, &[1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
    /// let result = PuzzleRunner::solve(&start).unwrap();
    /// assert_eq!(result.moves, vec![Move::new((2, 2), Direction::Left)]);
    /// ```
    pub fn solve(start: &Board) -> Result<PuzzleResult> {
        Self::run(start, &PuzzleConfig::default())
    }

    /// Searches for a shortest move sequence from `start` to the goal.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfig`] if the configuration is invalid
    /// - [`Error::Unsolvable`] if every reachable board was expanded
    /// - [`Error::BudgetExhausted`] if `max_expansions` was reached
    pub fn run(start: &Board, config: &PuzzleConfig) -> Result<PuzzleResult> {
        config.validate().map_err(Error::InvalidConfig)?;

        let mut arena = StateArena::new();
        let mut frontier = Frontier::new();

        let root = arena.push(PuzzleState::root(start.clone()));
        frontier.push(&arena, root);

        let mut expanded = 0usize;
        let mut generated = 0usize;
        let mut max_open = 1usize;

        debug!(
            size = start.size(),
            estimate = manhattan(start),
            "starting A* search"
        );

        while let Some(id) = frontier.pop(&arena) {
            let node = arena.get(id);
            if node.is_goal() {
                let moves = arena.moves_to(id);
                debug!(
                    moves = moves.len(),
                    expanded, generated, max_open, "A* search reached goal"
                );
                return Ok(PuzzleResult {
                    moves,
                    expanded,
                    generated,
                    max_open,
                });
            }

            if config.max_expansions > 0 && expanded >= config.max_expansions {
                debug!(expanded, "A* expansion budget exhausted");
                return Err(Error::BudgetExhausted { expanded });
            }

            let cost = node.cost();
            let board = node.board().clone();
            frontier.close(&board, cost);
            expanded += 1;

            for (mv, child_board) in board.successors() {
                generated += 1;
                let child = PuzzleState::new(child_board, Some(mv), Some(id), cost + 1);
                if frontier.should_admit(&arena, &child) {
                    let child_id = arena.push(child);
                    frontier.push(&arena, child_id);
                }
            }

            max_open = max_open.max(frontier.open_len());
            trace!(expanded, open = frontier.open_len(), "expanded state");
        }

        debug!(expanded, generated, "A* open list exhausted");
        Err(Error::Unsolvable { expanded })
    }
}
