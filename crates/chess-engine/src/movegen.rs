//! Move lists.
//!
//! Legal move enumeration itself lives on
//! [`RulesEngine::legal_moves`](crate::RulesEngine::legal_moves); this module
//! provides the container it fills.

use chess_core::{Move, Square};

/// A list of legal moves.
///
/// Legal chess positions have at most 218 legal moves, but set-up positions
/// are only checked for kings and check, so the list grows as needed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Capacity reserved up front, enough for any reachable position.
    const TYPICAL_MAX: usize = 218;

    /// Creates an empty move list.
    #[inline]
    pub fn new() -> Self {
        MoveList {
            moves: Vec::with_capacity(Self::TYPICAL_MAX),
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Returns an iterator over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Returns true if the list holds the given move.
    pub fn contains(&self, m: Move) -> bool {
        self.moves.contains(&m)
    }

    /// Returns the moves that start on `from`.
    pub fn from_square(&self, from: Square) -> impl Iterator<Item = Move> + '_ {
        self.iter().copied().filter(move |m| m.from() == from)
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
