//! Per-player hand.
//!
//! A hand is a capacity-bounded collection looked up by card identity
//! `(color, rank)`. After every membership change it re-sorts by the
//! canonical key `color * 13 + rank`; the ordering exists only so that
//! observations are deterministic and has no effect on legality.

use crate::core::{Card, Color};
use crate::decks::{DrawDeck, Pile};

/// A player's hand.
#[derive(Clone, Debug)]
pub struct Hand {
    cards: Vec<Card>,
    capacity: usize,
}

impl Hand {
    /// Create an empty hand with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cards: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a hand dealt to capacity from the draw pile.
    #[must_use]
    pub fn dealt(capacity: usize, draw: &mut DrawDeck) -> Self {
        let mut hand = Self::new(capacity);
        for _ in 0..capacity {
            hand.draw_one(draw);
        }
        hand
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the hand holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether the hand is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.capacity
    }

    /// The configured capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The held cards in canonical order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Whether a card with this identity is held.
    #[must_use]
    pub fn contains(&self, color: Color, rank: u8) -> bool {
        self.cards
            .iter()
            .any(|c| c.color() == color && c.rank() == rank)
    }

    /// Remove and return the card with this identity, if held.
    ///
    /// Returns `None` rather than an error when absent; move application
    /// only calls this after legality has confirmed presence.
    pub fn take_if_present(&mut self, color: Color, rank: u8) -> Option<Card> {
        let index = self
            .cards
            .iter()
            .position(|c| c.color() == color && c.rank() == rank)?;
        Some(self.cards.remove(index))
    }

    /// Add a card, keeping canonical order.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
    }

    /// Draw one card from the draw pile. No-op if the hand is full or the
    /// pile is empty.
    pub fn draw_one(&mut self, draw: &mut DrawDeck) {
        if self.is_full() {
            return;
        }
        if let Some(card) = draw.deal_from_front() {
            self.add_card(card);
        }
    }

    /// Summed value of the held cards. Auxiliary scoring only.
    #[must_use]
    pub fn total_value(&self) -> i32 {
        self.cards.iter().map(|c| c.value()).sum()
    }

    /// Re-sort by canonical key.
    pub fn sort(&mut self) {
        self.cards.sort_unstable_by_key(|c| c.key());
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for card in &self.cards {
            write!(f, "{card}|")?;
        }
        Ok(())
    }
}
