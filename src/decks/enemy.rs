//! The enemy pile.

use std::collections::VecDeque;

use crate::core::{Color, EnemyCard, GameConfig, GameRng, ENEMY_BASE_RANK, NUM_RANKS};

use super::Pile;

/// The enemy pile.
///
/// Built tier by tier in increasing difficulty (Jacks, then Queens, then
/// Kings), shuffled within each tier at setup. The front card is the current
/// enemy. The pile is only ever consumed; it never refills.
#[derive(Clone, Debug, Default)]
pub struct EnemyDeck {
    cards: VecDeque<EnemyCard>,
}

impl EnemyDeck {
    /// Build the tiered pile from the configured health/attack tables.
    #[must_use]
    pub fn new(config: &GameConfig, rng: &mut GameRng) -> Self {
        let mut cards = VecDeque::new();
        for rank in ENEMY_BASE_RANK..NUM_RANKS as u8 {
            let tier = (rank - ENEMY_BASE_RANK) as usize;
            let health = config.enemy_health[tier];
            let attack = config.enemy_attack[tier];

            let mut tier_cards: Vec<EnemyCard> = Color::ALL
                .into_iter()
                .map(|color| EnemyCard::new(color, rank, health, attack))
                .collect();
            rng.shuffle(&mut tier_cards);
            cards.extend(tier_cards);
        }
        Self { cards }
    }

    /// The enemy currently being fought, if any.
    #[must_use]
    pub fn current(&self) -> Option<&EnemyCard> {
        self.cards.front()
    }

    /// Mutable access to the current enemy, if any.
    pub fn current_mut(&mut self) -> Option<&mut EnemyCard> {
        self.cards.front_mut()
    }

    /// Summed health of all remaining enemies.
    #[must_use]
    pub fn total_health(&self) -> i32 {
        self.cards.iter().map(EnemyCard::health).sum()
    }

    /// Iterate the pile front to back.
    pub fn iter(&self) -> impl Iterator<Item = &EnemyCard> {
        self.cards.iter()
    }
}

impl Pile for EnemyDeck {
    type Item = EnemyCard;

    fn get(&self, index: usize) -> Option<&EnemyCard> {
        self.cards.get(index)
    }

    fn len(&self) -> usize {
        self.cards.len()
    }

    fn deal_from_front(&mut self) -> Option<EnemyCard> {
        self.cards.pop_front()
    }

    fn place_at_back(&mut self, card: EnemyCard) {
        self.cards.push_back(card);
    }

    fn insert_at_front(&mut self, card: EnemyCard) {
        self.cards.push_front(card);
    }
}
