//! Random move bot - plays a random legal move.
//!
//! This is the simplest possible automated player, useful as a template
//! for more sophisticated ones. It plugs into the engine through
//! [`MovePicker`], so the moves it picks are still checked by the rules.

use chess_core::{Board, Color, Move};
use chess_engine::{MoveList, MovePicker};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Picks uniformly among the legal moves.
#[derive(Debug, Clone)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    /// Creates a picker with a fixed seed, for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        RandomPicker {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a picker seeded from the operating system.
    pub fn from_entropy() -> Self {
        RandomPicker {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl MovePicker for RandomPicker {
    fn pick_move(&mut self, _board: &Board, _side: Color, legal: &MoveList) -> Option<Move> {
        legal.as_slice().choose(&mut self.rng).copied()
    }
}
