//! The rules engine: turn/phase state machine, legality, move application.
//!
//! [`GameState`] is the mutable root. It owns the three decks, all hands,
//! the pre-enumerated move list, and the seeded RNG. External callers only
//! ever construct a state, query [`GameState::legal_move_ids`], apply a
//! chosen id with [`GameState::apply_move`], and read reward / terminal
//! status / observation accessors.

pub mod rules;
pub mod state;

pub use state::GameState;

use serde::{Deserialize, Serialize};

/// The turn/phase state machine. `Win` and `Loss` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The active player plays cards against the current enemy.
    Play,
    /// The active player discards card value to absorb pending damage.
    Discard,
    /// All enemies defeated.
    Win,
    /// The active player ran out of cards with enemies remaining.
    Loss,
}

impl Phase {
    /// Whether the game has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Win | Phase::Loss)
    }
}

/// A move id that failed the legality predicate (or was out of range).
///
/// Recoverable: the state is guaranteed unchanged, so the caller can
/// penalize and re-prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidMove {
    /// The rejected id.
    pub id: usize,
}

impl std::fmt::Display for InvalidMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "move id {} is not legal in the current state", self.id)
    }
}

impl std::error::Error for InvalidMove {}
