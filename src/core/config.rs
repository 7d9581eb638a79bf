//! Game configuration.
//!
//! A [`GameConfig`] is an immutable parameter set validated once at state
//! construction. There is no process-wide configuration: every constructor
//! that needs parameters takes the config by value or reference.

use serde::{Deserialize, Serialize};

use super::card::{NUM_CARDS, NUM_COLORS, NUM_RANKS, NUM_START_RANKS};

/// Number of enemy rank tiers (Jack, Queen, King).
pub const NUM_ENEMY_TIERS: usize = 3;

/// Invalid configuration. Fatal at construction, never recovered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Player count outside the supported `{1, 2}`.
    PlayerCount(usize),
    /// Hand size outside the supported `6..=8`.
    HandSize(usize),
    /// An enemy tier with non-positive health.
    EnemyHealth(i32),
    /// An enemy tier with non-positive attack.
    EnemyAttack(i32),
    /// Combo ceiling too small to admit even a pair of twos.
    MaximumCombo(i32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::PlayerCount(n) => write!(f, "unsupported player count {n} (expected 1 or 2)"),
            ConfigError::HandSize(n) => write!(f, "unsupported hand size {n} (expected 6..=8)"),
            ConfigError::EnemyHealth(h) => write!(f, "non-positive enemy health {h}"),
            ConfigError::EnemyAttack(a) => write!(f, "non-positive enemy attack {a}"),
            ConfigError::MaximumCombo(m) => write!(f, "combo ceiling {m} admits no combos (minimum 4)"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Static game parameters.
///
/// `Default` is the single-player configuration exercised by the training
/// setup: hand size 8, enemy tiers (20/30/40 health, 10/15/20 attack),
/// combo ceiling 10, seed 42.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players, 1 or 2.
    pub players: usize,

    /// Hand capacity per player, 6..=8.
    pub hand_size: usize,

    /// Enemy health per rank tier (Jack, Queen, King).
    pub enemy_health: [i32; NUM_ENEMY_TIERS],

    /// Enemy attack per rank tier.
    pub enemy_attack: [i32; NUM_ENEMY_TIERS],

    /// Whether the yield option is enabled. Stored for parity with the
    /// tabletop rules; the current move space does not include yield moves.
    pub yield_enable: bool,

    /// Ceiling on the summed value of a combo play. Bounds which combo-table
    /// entries exist.
    pub maximum_combo: i32,

    /// Seed for all shuffling and random effect resolution.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: 1,
            hand_size: 8,
            enemy_health: [20, 30, 40],
            enemy_attack: [10, 15, 20],
            yield_enable: true,
            maximum_combo: 10,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Create a configuration with the given player count and hand size,
    /// defaults elsewhere.
    #[must_use]
    pub fn new(players: usize, hand_size: usize) -> Self {
        Self {
            players,
            hand_size,
            ..Self::default()
        }
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the enemy stat tiers.
    #[must_use]
    pub fn with_enemy_tiers(
        mut self,
        health: [i32; NUM_ENEMY_TIERS],
        attack: [i32; NUM_ENEMY_TIERS],
    ) -> Self {
        self.enemy_health = health;
        self.enemy_attack = attack;
        self
    }

    /// Set the combo ceiling.
    #[must_use]
    pub fn with_maximum_combo(mut self, maximum_combo: i32) -> Self {
        self.maximum_combo = maximum_combo;
        self
    }

    /// Validate the configuration. Called once at state construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=2).contains(&self.players) {
            return Err(ConfigError::PlayerCount(self.players));
        }
        if !(6..=8).contains(&self.hand_size) {
            return Err(ConfigError::HandSize(self.hand_size));
        }
        if let Some(&h) = self.enemy_health.iter().find(|&&h| h <= 0) {
            return Err(ConfigError::EnemyHealth(h));
        }
        if let Some(&a) = self.enemy_attack.iter().find(|&&a| a <= 0) {
            return Err(ConfigError::EnemyAttack(a));
        }
        // A pair of twos (value 2 * 2 cards) is the smallest combo.
        if self.maximum_combo < 4 {
            return Err(ConfigError::MaximumCombo(self.maximum_combo));
        }
        Ok(())
    }

    /// Number of distinct `(color, rank)` identities in the move encoding.
    #[must_use]
    pub const fn num_cards(&self) -> usize {
        NUM_CARDS
    }

    /// Number of colors.
    #[must_use]
    pub const fn num_colors(&self) -> usize {
        NUM_COLORS
    }

    /// Number of ranks in the move encoding.
    #[must_use]
    pub const fn num_ranks(&self) -> usize {
        NUM_RANKS
    }

    /// Number of ranks dealt into the draw pile.
    #[must_use]
    pub const fn num_start_ranks(&self) -> usize {
        NUM_START_RANKS
    }

    /// Number of enemy rank tiers.
    #[must_use]
    pub const fn enemy_ranks(&self) -> usize {
        NUM_ENEMY_TIERS
    }

    /// Largest enemy health across tiers. Used for observation sizing.
    #[must_use]
    pub fn max_enemy_health(&self) -> i32 {
        self.enemy_health.iter().copied().max().unwrap_or(0)
    }

    /// Largest enemy attack across tiers. Used for observation sizing.
    #[must_use]
    pub fn max_enemy_attack(&self) -> i32 {
        self.enemy_attack.iter().copied().max().unwrap_or(0)
    }
}
