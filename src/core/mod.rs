//! Core types: cards, enemies, configuration, RNG.

pub mod card;
pub mod config;
pub mod rng;

pub use card::{
    Card, Color, EnemyCard, ENEMY_BASE_RANK, NUM_CARDS, NUM_COLORS, NUM_ENEMIES, NUM_RANKS,
    NUM_START_RANKS,
};
pub use config::{ConfigError, GameConfig};
pub use rng::{GameRng, GameRngState};
