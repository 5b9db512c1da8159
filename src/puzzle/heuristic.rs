//! Manhattan-distance heuristic.

use super::types::{Board, Tile};

/// Sum of Manhattan distances of every numbered tile from its goal cell.
///
/// Each move shifts exactly one tile by one cell, so the estimate changes by
/// at most one per move. It is therefore admissible and consistent for
/// unit-cost moves.
pub fn manhattan(board: &Board) -> u32 {
    let size = board.size();
    board
        .cells()
        .filter(|&(_, tile)| tile != Tile::Empty)
        .map(|(pos, tile)| pos.manhattan(tile.goal_position(size)) as u32)
        .sum()
}
