//! The draw pile.

use std::collections::VecDeque;

use crate::core::{Card, Color, GameRng, NUM_START_RANKS};

use super::Pile;

/// The shuffled draw pile.
///
/// Starts with the 40 number cards (4 colors, ranks 0..10), shuffled once at
/// setup. Consumed from the front by dealing; the Heart effect refills it at
/// the back and perfect-killed enemies re-enter at the front.
#[derive(Clone, Debug, Default)]
pub struct DrawDeck {
    cards: VecDeque<Card>,
}

impl DrawDeck {
    /// Build and shuffle the initial pile.
    #[must_use]
    pub fn new(rng: &mut GameRng) -> Self {
        let mut cards: Vec<Card> = Vec::with_capacity(Color::ALL.len() * NUM_START_RANKS);
        for color in Color::ALL {
            for rank in 0..NUM_START_RANKS as u8 {
                cards.push(Card::new(color, rank));
            }
        }
        rng.shuffle(&mut cards);
        Self {
            cards: cards.into(),
        }
    }

    /// Iterate the pile front to back.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

impl Pile for DrawDeck {
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
