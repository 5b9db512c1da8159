//! Search nodes and the arena that owns them.

use super::types::{Board, Move};

/// Index of a [`PuzzleState`] inside a [`StateArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// An immutable search node.
///
/// Two states are equal when their boards are equal; cost and move history
/// are deliberately left out so duplicates can be detected by content.
#[derive(Debug, Clone)]
pub struct PuzzleState {
    board: Board,
    last_move: Option<Move>,
    parent: Option<StateId>,
    cost: u32,
}

impl PuzzleState {
    pub fn new(board: Board, last_move: Option<Move>, parent: Option<StateId>, cost: u32) -> Self {
        Self {
            board,
            last_move,
            parent,
            cost,
        }
    }

    /// A root state with no history.
    pub fn root(board: Board) -> Self {
        Self::new(board, None, None, 0)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The move that produced this state from its parent.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    /// Number of moves from the root.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn is_goal(&self) -> bool {
        self.board.is_goal()
    }
}

impl PartialEq for PuzzleState {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
    }
}

impl Eq for PuzzleState {}

/// Append-only storage for every state generated during one search.
///
/// Children point at their parent by [`StateId`], so reconstructing a path
/// is an index walk back to the root.
#[derive(Debug, Default)]
pub struct StateArena {
    states: Vec<PuzzleState>,
}

impl StateArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: PuzzleState) -> StateId {
        let id = StateId(self.states.len());
        self.states.push(state);
        id
    }

    pub fn get(&self, id: StateId) -> &PuzzleState {
        &self.states[id.0]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Moves leading from the root to `id`, in execution order.
    pub fn moves_to(&self, id: StateId) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.get(id).cost() as usize);
        let mut node = self.get(id);
        while let (Some(mv), Some(parent)) = (node.last_move(), node.parent()) {
            moves.push(mv);
            node = self.get(parent);
        }
        debug_assert!(node.parent().is_none(), "path walk stopped before the root");
        moves.reverse();
        moves
    }
}
