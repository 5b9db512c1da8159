//! Scrambling a board with random legal moves.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::types::{Board, Move, Position};

/// Applies `n` random legal moves to `board`.
///
/// The empty cell is never sent straight back to the cell it just left, so
/// consecutive moves do not cancel out. Because only legal moves are used,
/// the result is always solvable back to `board`.
///
/// Returns the scrambled board along with the moves that produced it.
pub fn shuffle<R: Rng>(board: &Board, n: usize, rng: &mut R) -> (Board, Vec<Move>) {
    let mut current = board.clone();
    let mut history = Vec::with_capacity(n);
    let mut previous_empty: Option<Position> = None;

    for _ in 0..n {
        let empty = current.empty_position();
        let candidates: Vec<(Move, Board)> = current
            .successors()
            .into_iter()
            .filter(|(mv, _)| Some(mv.position) != previous_empty)
            .collect();

        // Every cell has at least two neighbours on a board of width >= 2,
        // so at most one candidate is filtered out.
        let Some((mv, next)) = candidates.choose(rng).cloned() else {
            debug_assert!(false, "no legal shuffle move");
            break;
        };

        previous_empty = Some(empty);
        history.push(mv);
        current = next;
    }

    (current, history)
}
