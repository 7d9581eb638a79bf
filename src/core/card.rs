//! Playing cards and enemy cards.
//!
//! ## Card
//!
//! An immutable `(color, rank)` value. Rank 0 is an Ace, rank 12 a King;
//! `value = rank + 1`. The draw pile deals only ranks `0..10`; ranks 10..13
//! enter circulation when defeated enemies are recycled.
//!
//! ## EnemyCard
//!
//! A royal (rank 10..13) with mutable `health` and `attack`. Health may go
//! negative to distinguish an exact-lethal "perfect kill" (health == 0) from
//! an overkill. Attack is floored at 0 by shielding.

use serde::{Deserialize, Serialize};

/// Number of card colors (suits).
pub const NUM_COLORS: usize = 4;

/// Number of ranks per color, Ace (0) through King (12).
pub const NUM_RANKS: usize = 13;

/// Number of ranks dealt into the draw pile (Ace through 10).
pub const NUM_START_RANKS: usize = 10;

/// Size of the full card universe, `NUM_COLORS * NUM_RANKS`.
///
/// This is also the stride of the flat move-id encoding: Play, Discard and
/// Ace ranges each cover one full `(color, rank)` grid even though only 40
/// cards start in the draw pile.
pub const NUM_CARDS: usize = NUM_COLORS * NUM_RANKS;

/// First enemy rank (Jack).
pub const ENEMY_BASE_RANK: u8 = 10;

/// Total number of enemy cards (Jacks, Queens, Kings of every color).
pub const NUM_ENEMIES: usize = 12;

/// Card color (suit). The discriminant order is load-bearing: suit effects
/// resolve in `Heart..=Club` order and the canonical card key is
/// `color * 13 + rank`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Heart = 0,
    Diamond = 1,
    Spade = 2,
    Club = 3,
}

impl Color {
    /// All colors in effect-resolution order.
    pub const ALL: [Color; NUM_COLORS] = [Color::Heart, Color::Diamond, Color::Spade, Color::Club];

    /// Create a color from its index.
    ///
    /// Panics if `index >= 4`; an out-of-range color is a programming error.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index]
    }

    /// Get the raw index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Heart => "Heart",
            Color::Diamond => "Diamond",
            Color::Spade => "Spade",
            Color::Club => "Club",
        };
        write!(f, "{name}")
    }
}

/// An immutable playing card.
///
/// Equality is by `(color, rank)`. A card is owned by exactly one container
/// (draw pile, discard pile, or a hand) at any time; ownership transfers by
/// move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    color: Color,
    rank: u8,
}

impl Card {
    /// Create a new card.
    ///
    /// Panics if `rank > 12`; construction with an out-of-range rank is a
    /// programming error.
    #[must_use]
    pub fn new(color: Color, rank: u8) -> Self {
        assert!((rank as usize) < NUM_RANKS, "card rank {rank} out of range");
        Self { color, rank }
    }

    /// The card's color.
    #[must_use]
    pub const fn color(self) -> Color {
        self.color
    }

    /// The card's rank, 0 (Ace) through 12 (King).
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// The card's play value, `rank + 1`.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.rank as i32 + 1
    }

    /// Canonical sort key, `color * 13 + rank`. Unique per card identity.
    #[must_use]
    pub const fn key(self) -> usize {
        self.color.index() * NUM_RANKS + self.rank as usize
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value(), self.color)
    }
}

/// An enemy royal with mutable combat stats.
///
/// `base_attack` is frozen at construction and feeds the perfect-kill reward
/// bonus even after Spade shielding has reduced `attack`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyCard {
    color: Color,
    rank: u8,
    health: i32,
    attack: i32,
    base_attack: i32,
}

impl EnemyCard {
    /// Create a new enemy.
    ///
    /// Panics unless `rank` is 10..=12.
    #[must_use]
    pub fn new(color: Color, rank: u8, health: i32, attack: i32) -> Self {
        assert!(
            (ENEMY_BASE_RANK..NUM_RANKS as u8).contains(&rank),
            "enemy rank {rank} out of range"
        );
        Self {
            color,
            rank,
            health,
            attack,
            base_attack: attack,
        }
    }

    /// The enemy's color.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// The enemy's rank, 10 (Jack) through 12 (King).
    #[must_use]
    pub const fn rank(&self) -> u8 {
        self.rank
    }

    /// Current health. May be negative after an overkill.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Current attack, after any shielding.
    #[must_use]
    pub const fn attack(&self) -> i32 {
        self.attack
    }

    /// Attack value at construction, before shielding.
    #[must_use]
    pub const fn base_attack(&self) -> i32 {
        self.base_attack
    }

    /// Difficulty tier, 1 (Jack) through 3 (King).
    #[must_use]
    pub const fn level(&self) -> i32 {
        self.rank as i32 - ENEMY_BASE_RANK as i32 + 1
    }

    /// Flat index into the 12-entry enemy-alive bitmap used by observation
    /// building: `(rank - 10) * 4 + color`.
    #[must_use]
    pub const fn encoding_index(&self) -> usize {
        (self.rank as usize - ENEMY_BASE_RANK as usize) * NUM_COLORS + self.color.index()
    }

    /// Reduce health by `amount`. Health is allowed to go negative.
    pub fn reduce_health(&mut self, amount: i32) {
        self.health -= amount;
    }

    /// Reduce attack by `shield`, floored at 0.
    pub fn reduce_attack(&mut self, shield: i32) {
        self.attack = (self.attack - shield).max(0);
    }

    /// Demote to a plain card of the same identity.
    ///
    /// Defeated enemies re-enter circulation as regular cards: a recycled
    /// King drawn from the deck later plays for value 13, not its old attack.
    #[must_use]
    pub fn into_card(self) -> Card {
        Card::new(self.color, self.rank)
    }
}

impl std::fmt::Display for EnemyCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "E{} {} H{} A{}",
            self.rank as i32 + 1,
            self.color,
            self.health,
            self.attack
        )
    }
}
