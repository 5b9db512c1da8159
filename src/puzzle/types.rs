//! Board, tile, and move types for the sliding-tile puzzle.

use std::fmt;

use crate::error::{Error, Result};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    /// The hole that neighbouring tiles slide into.
    Empty,
    /// A numbered tile, `1..size*size`.
    Value(u32),
}

impl Tile {
    /// Row and column this tile occupies on a solved board of width `size`.
    ///
    /// # Panics
    /// Panics in debug builds on `Value(0)`; numbered tiles start at 1.
    pub fn goal_position(self, size: usize) -> Position {
        match self {
            Tile::Value(n) => {
                debug_assert!(n >= 1, "tile values start at 1");
                let index = n as usize - 1;
                Position::new(index / size, index % size)
            }
            Tile::Empty => Position::new(size - 1, size - 1),
        }
    }
}

/// Direction a tile slides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Every direction, in the order neighbours are generated.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The reverse direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// `(row, col)` offset of one step in this direction.
    fn offset(self) -> (isize, isize) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::Up => "Up",
            Direction::Down => "Down",
        };
        f.write_str(s)
    }
}

/// Zero-based `(row, col)` cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another cell.
    pub fn manhattan(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// One step of a solution: the tile at `position` slides one cell in
/// `direction`, into the empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub position: Position,
    pub direction: Direction,
}

impl Move {
    pub fn new(position: impl Into<Position>, direction: Direction) -> Self {
        Self {
            position: position.into(),
            direction,
        }
    }
}

/// A square sliding-tile board.
///
/// Holds exactly one [`Tile::Empty`] and each of `1..size*size` exactly
/// once. Every constructor checks this, so a `Board` value is always
/// well-formed. Equality and hashing compare tile contents only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<Tile>>", into = "Vec<Vec<Tile>>")
)]
pub struct Board {
    size: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Smallest supported board width.
    pub const MIN_SIZE: usize = 2;

    /// The solved board of width `size`.
    ///
    /// # Examples
    ///
    /// ```
    /// use slagalica::puzzle::{Board, Tile};
    ///
    /// let goal = Board::goal(3).unwrap();
    /// assert!(goal.is_goal());
    /// assert_eq!(goal.tile((2, 2).into()), Tile::Empty);
    /// ```
    pub fn goal(size: usize) -> Result<Self> {
        if size < Self::MIN_SIZE {
            return Err(Error::InvalidBoard(format!(
                "board size must be at least {}, got {size}",
                Self::MIN_SIZE
            )));
        }
        let cells = size * size;
        let mut tiles: Vec<Tile> = (1..cells as u32).map(Tile::Value).collect();
        tiles.push(Tile::Empty);
        Ok(Self { size, tiles })
    }

    /// Builds a board from its rows, validating shape and contents.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self> {
        let size = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(Error::InvalidBoard(format!(
                "row {i} has {} cells, expected {size}",
                row.len()
            )));
        }
        Self::from_tiles(size, rows.into_iter().flatten().collect())
    }

    /// Builds a board from row-major numbers, where `0` is the empty cell.
    ///
    /// ```
    /// use slagalica::puzzle::Board;
    ///
    /// let board = Board::from_numbers(3, &[1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
    /// assert!(!board.is_goal());
    /// ```
    pub fn from_numbers(size: usize, numbers: &[u32]) -> Result<Self> {
        let tiles = numbers
            .iter()
            .map(|&n| if n == 0 { Tile::Empty } else { Tile::Value(n) })
            .collect();
        Self::from_tiles(size, tiles)
    }

    fn from_tiles(size: usize, tiles: Vec<Tile>) -> Result<Self> {
        if size < Self::MIN_SIZE {
            return Err(Error::InvalidBoard(format!(
                "board size must be at least {}, got {size}",
                Self::MIN_SIZE
            )));
        }
        let cells = size * size;
        if tiles.len() != cells {
            return Err(Error::InvalidBoard(format!(
                "expected {cells} cells, got {}",
                tiles.len()
            )));
        }

        // Slot 0 counts the empty cell, slot n counts Value(n).
        let mut seen = vec![0usize; cells];
        for tile in &tiles {
            match *tile {
                Tile::Empty => seen[0] += 1,
                Tile::Value(n) if n >= 1 && (n as usize) < cells => seen[n as usize] += 1,
                Tile::Value(n) => {
                    return Err(Error::InvalidBoard(format!(
                        "tile value {n} out of range 1..{cells}"
                    )))
                }
            }
        }
        for (slot, &count) in seen.iter().enumerate() {
            if count != 1 {
                let what = if slot == 0 {
                    "empty cell".to_string()
                } else {
                    format!("tile {slot}")
                };
                let problem = if count == 0 { "missing" } else { "duplicated" };
                return Err(Error::InvalidBoard(format!("{what} is {problem}")));
            }
        }

        Ok(Self { size, tiles })
    }

    /// Board width (and height).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tile at `pos`.
    ///
    /// # Panics
    /// Panics if `pos` is outside the board.
    pub fn tile(&self, pos: Position) -> Tile {
        self.tiles[self.index(pos)]
    }

    /// Rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.size)
    }

    /// Every `(position, tile)` pair in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        let size = self.size;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &t)| (Position::new(i / size, i % size), t))
    }

    /// Position of the empty cell.
    pub fn empty_position(&self) -> Position {
        let index = self
            .tiles
            .iter()
            .position(|&t| t == Tile::Empty)
            .unwrap_or_default();
        debug_assert_eq!(self.tiles[index], Tile::Empty, "board has no empty cell");
        Position::new(index / self.size, index % self.size)
    }

    /// True iff every cell holds `Value(row*size+col+1)` and the last cell
    /// is empty.
    pub fn is_goal(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.tiles.iter().enumerate().all(|(i, &t)| {
            if i == last {
                t == Tile::Empty
            } else {
                t == Tile::Value(i as u32 + 1)
            }
        })
    }

    /// The cell one step from `pos` in `direction`, if it is on the board.
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.offset();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        (row < self.size && col < self.size).then_some(Position::new(row, col))
    }

    /// Direction the tile at `pos` may slide, if it borders the empty cell.
    pub fn legal_move_for(&self, pos: Position) -> Option<Direction> {
        if pos.row >= self.size || pos.col >= self.size || self.tile(pos) == Tile::Empty {
            return None;
        }
        Direction::ALL.into_iter().find(|&d| {
            self.neighbor(pos, d)
                .is_some_and(|next| self.tile(next) == Tile::Empty)
        })
    }

    /// Applies a single move, returning the resulting board.
    ///
    /// Fails if the move does not slide a numbered tile into the empty
    /// cell.
    pub fn apply(&self, mv: Move) -> Result<Board> {
        let Move {
            position,
            direction,
        } = mv;
        if position.row >= self.size || position.col >= self.size {
            return Err(Error::IllegalMove(format!(
                "position ({}, {}) is off the board",
                position.row, position.col
            )));
        }
        match self.neighbor(position, direction) {
            Some(target)
                if self.tile(target) == Tile::Empty && self.tile(position) != Tile::Empty =>
            {
                Ok(self.swapped(position, target))
            }
            _ => Err(Error::IllegalMove(format!(
                "tile at ({}, {}) cannot slide {direction}",
                position.row, position.col
            ))),
        }
    }

    /// Applies moves in order, returning the final board.
    pub fn apply_all<I>(&self, moves: I) -> Result<Board>
    where
        I: IntoIterator<Item = Move>,
    {
        moves
            .into_iter()
            .try_fold(self.clone(), |board, mv| board.apply(mv))
    }

    /// Every board reachable in one move, tagged with that move.
    ///
    /// Neighbours of the empty cell are visited in [`Direction::ALL`] order.
    /// The move describes the displaced tile, so its direction is the
    /// opposite of the direction from the empty cell to that tile.
    pub fn successors(&self) -> Vec<(Move, Board)> {
        let empty = self.empty_position();
        Direction::ALL
            .into_iter()
            .filter_map(|d| {
                let tile_pos = self.neighbor(empty, d)?;
                Some((Move::new(tile_pos, d.opposite()), self.swapped(empty, tile_pos)))
            })
            .collect()
    }

    fn swapped(&self, a: Position, b: Position) -> Board {
        let mut tiles = self.tiles.clone();
        tiles.swap(self.index(a), self.index(b));
        Board {
            size: self.size,
            tiles,
        }
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }
}

impl TryFrom<Vec<Vec<Tile>>> for Board {
    type Error = Error;

    fn try_from(rows: Vec<Vec<Tile>>) -> Result<Self> {
        Board::from_rows(rows)
    }
}

impl From<Board> for Vec<Vec<Tile>> {
    fn from(board: Board) -> Self {
        board.rows().map(<[Tile]>::to_vec).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.tiles.len() - 1).to_string().len();
        for row in self.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|t| match t {
                    Tile::Value(n) => format!("{n:>width$}"),
                    Tile::Empty => " ".repeat(width),
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(numbers: &[u32]) -> Board {
        Board::from_numbers(3, numbers).unwrap()
    }

    #[test]
    fn test_opposite_is_involution() {
        for d in Direction::ALL {
            assert_ne!(d, d.opposite());
            assert_eq!(d, d.opposite().opposite());
        }
    }

    #[test]
    fn test_goal_position_matches_goal_board() {
        let goal = Board::goal(3).unwrap();
        for (pos, tile) in goal.cells() {
            assert_eq!(tile.goal_position(3), pos);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "tile values start at 1")]
    fn test_goal_position_rejects_zero() {
        let _ = Tile::Value(0).goal_position(3);
    }

    #[test]
    fn test_goal_board() {
        let goal = Board::goal(3).unwrap();
        assert!(goal.is_goal());
        assert_eq!(goal, board(&[1, 2, 3, 4, 5, 6, 7, 8, 0]));
        assert_eq!(goal.empty_position(), Position::new(2, 2));
    }

    #[test]
    fn test_goal_rejects_tiny() {
        assert!(matches!(Board::goal(1), Err(Error::InvalidBoard(_))));
    }

    #[test]
    fn test_is_goal_requires_empty_last() {
        assert!(!board(&[0, 1, 2, 3, 4, 5, 6, 7, 8]).is_goal());
        assert!(!board(&[1, 2, 3, 4, 5, 6, 7, 0, 8]).is_goal());
    }

    #[test]
    fn test_from_rows_ragged() {
        let rows = vec![
            vec![Tile::Value(1), Tile::Value(2), Tile::Value(3)],
            vec![Tile::Value(4), Tile::Value(5)],
            vec![Tile::Value(7), Tile::Value(8), Tile::Empty],
        ];
        assert!(matches!(Board::from_rows(rows), Err(Error::InvalidBoard(_))));
    }

    #[test]
    fn test_from_numbers_rejects_bad_contents() {
        // duplicate empty
        assert!(Board::from_numbers(3, &[1, 2, 3, 4, 5, 6, 7, 0, 0]).is_err());
        // duplicate value
        assert!(Board::from_numbers(3, &[1, 1, 3, 4, 5, 6, 7, 8, 0]).is_err());
        // out of range
        assert!(Board::from_numbers(3, &[1, 2, 3, 4, 5, 6, 7, 9, 0]).is_err());
        // wrong length
        assert!(Board::from_numbers(3, &[1, 2, 3, 0]).is_err());
    }

    #[test]
    fn test_equality_is_by_content() {
        let a = board(&[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let b = Board::goal(3)
            .unwrap()
            .apply(Move::new((2, 1), Direction::Right))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_successors_from_corner() {
        let goal = Board::goal(3).unwrap();
        let succ = goal.successors();
        assert_eq!(succ.len(), 2);
        // empty at (2,2): left neighbour (2,1) slides Right, up neighbour (1,2) slides Down
        assert_eq!(succ[0].0, Move::new((2, 1), Direction::Right));
        assert_eq!(succ[1].0, Move::new((1, 2), Direction::Down));
        assert_eq!(succ[0].1.empty_position(), Position::new(2, 1));
    }

    #[test]
    fn test_successors_from_center() {
        let b = board(&[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        assert_eq!(b.successors().len(), 4);
    }

    #[test]
    fn test_apply_rejects_illegal() {
        let goal = Board::goal(3).unwrap();
        assert!(goal.apply(Move::new((0, 0), Direction::Right)).is_err());
        assert!(goal.apply(Move::new((2, 2), Direction::Left)).is_err());
        assert!(goal.apply(Move::new((5, 5), Direction::Up)).is_err());
        assert!(goal.apply(Move::new((2, 1), Direction::Right)).is_ok());
    }

    #[test]
    fn test_legal_move_for() {
        let b = board(&[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert_eq!(b.legal_move_for((2, 2).into()), Some(Direction::Left));
        assert_eq!(b.legal_move_for((1, 1).into()), Some(Direction::Down));
        assert_eq!(b.legal_move_for((0, 0).into()), None);
        assert_eq!(b.legal_move_for((2, 1).into()), None);
    }

    #[test]
    fn test_rows_round_trip() {
        let b = board(&[4, 1, 3, 0, 2, 6, 7, 5, 8]);
        let rows: Vec<Vec<Tile>> = b.clone().into();
        assert_eq!(rows[1], vec![Tile::Empty, Tile::Value(2), Tile::Value(6)]);
        assert_eq!(Board::try_from(rows).unwrap(), b);
    }

    #[test]
    fn test_display() {
        let s = Board::goal(3).unwrap().to_string();
        assert_eq!(s, "1 2 3\n4 5 6\n7 8  \n");
    }
}
