//! Move representation.
//!
//! A move is one tagged variant over four payload shapes, dispatched by
//! pattern match. Moves are stateless descriptions of intent; legality is a
//! property of the current state, evaluated by the engine.

pub mod generator;

pub use generator::MoveGenerator;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Color;

/// The card identities a move touches. At most four (a full-color combo).
pub type CardSet = SmallVec<[(Color, u8); 4]>;

/// A single agent move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Play one card from hand against the current enemy.
    Play { color: Color, rank: u8 },

    /// Discard one card to absorb pending enemy damage.
    Discard { color: Color, rank: u8 },

    /// Play an ace `(ace_color, rank 0)` together with one arbitrary card.
    Ace {
        ace_color: Color,
        color: Color,
        rank: u8,
    },

    /// Play 2..=4 equal-rank cards from a fixed combo-table entry.
    Combo { cards: CardSet },
}

impl Move {
    /// The card identities this move removes from the hand.
    ///
    /// For an ace move the ace card comes first, matching application order.
    #[must_use]
    pub fn cards(&self) -> CardSet {
        match self {
            Move::Play { color, rank } | Move::Discard { color, rank } => {
                SmallVec::from_slice(&[(*color, *rank)])
            }
            Move::Ace {
                ace_color,
                color,
                rank,
            } => SmallVec::from_slice(&[(*ace_color, 0), (*color, *rank)]),
            Move::Combo { cards } => cards.clone(),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Play { color, rank } => write!(f, "Play({color} {})", *rank as i32 + 1),
            Move::Discard { color, rank } => write!(f, "Discard({color} {})", *rank as i32 + 1),
            Move::Ace {
                ace_color,
                color,
                rank,
            } => write!(f, "Ace({ace_color} + {color} {})", *rank as i32 + 1),
            Move::Combo { cards } => {
                write!(f, "Combo(")?;
                for (i, (color, rank)) in cards.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{color} {}", *rank as i32 + 1)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A recorded move for history tracking and replay debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The player who took the move.
    pub player: usize,

    /// The flat move id that was applied.
    pub move_id: usize,

    /// Sequence number within the game (for ordering).
    pub sequence: u32,
}
