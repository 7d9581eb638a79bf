//! The discard pile.

use std::collections::VecDeque;

use crate::core::{Card, GameRng};

use super::Pile;

/// The discard pile.
///
/// Accumulates played and discarded cards in order. The Heart effect removes
/// cards uniformly at random via [`DiscardDeck::remove_random`], driven by
/// the engine RNG so replays with the same seed are reproducible.
#[derive(Clone, Debug, Default)]
pub struct DiscardDeck {
    cards: VecDeque<Card>,
}

impl DiscardDeck {
    /// Create an empty pile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a uniformly random card, or `None` if the pile is empty.
    pub fn remove_random(&mut self, rng: &mut GameRng) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.cards.len());
        self.cards.remove(index)
    }

    /// Iterate the pile front to back (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

impl Pile for DiscardDeck {
    type Item = Card;

    fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    fn len(&self) -> usize {
        self.cards.len()
    }

    fn deal_from_front(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    fn place_at_back(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    fn insert_at_front(&mut self, card: Card) {
        self.cards.push_front(card);
    }
}
