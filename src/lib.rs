//! # regicide-engine
//!
//! A rules engine for Regicide, the cooperative turn-based card game, built
//! as the core of a reinforcement-learning environment.
//!
//! ## Design Principles
//!
//! 1. **Explicit configuration**: every parameter (players, hand size, enemy
//!    tiers, combo ceiling, seed) lives in an immutable [`GameConfig`]
//!    validated once at construction. No process-wide state.
//!
//! 2. **Flat action space**: every possible move has a stable integer id in
//!    `[0, max_moves)`. The [`MoveGenerator`] is a bijection between ids and
//!    typed moves; legality is evaluated against the current state, never
//!    baked into the move.
//!
//! 3. **Deterministic**: all randomness (shuffles, Heart effect, discard
//!    random-pop) flows through one seeded [`GameRng`] owned by the
//!    [`GameState`]. A fixed seed yields a fully reproducible trajectory.
//!
//! ## Architecture
//!
//! - **Phase machine**: `Play -> Discard -> Play` under enemy counterattack,
//!   terminating in `Win` or `Loss`. One [`GameState::apply_move`] call fully
//!   resolves suit effects, combat, and termination before returning.
//!
//! - **Three deck types** behind one capability interface ([`Pile`]): the
//!   shuffled draw pile, the discard pile with uniform random removal, and
//!   the tiered enemy pile.
//!
//! ## Modules
//!
//! - `core`: cards, enemies, configuration, RNG
//! - `decks`: draw / discard / enemy piles
//! - `hand`: per-player hand with capacity and canonical ordering
//! - `moves`: move sum type, id bijection, combo tables
//! - `engine`: the state machine (legality, application, reward)

pub mod core;
pub mod decks;
pub mod engine;
pub mod hand;
pub mod moves;

// Re-export commonly used types
pub use crate::core::{
    Card, Color, ConfigError, EnemyCard, GameConfig, GameRng, GameRngState, ENEMY_BASE_RANK,
    NUM_CARDS, NUM_COLORS, NUM_ENEMIES, NUM_RANKS, NUM_START_RANKS,
};

pub use crate::decks::{DiscardDeck, DrawDeck, EnemyDeck, Pile};

pub use crate::hand::Hand;

pub use crate::moves::{Move, MoveGenerator, MoveRecord};

pub use crate::engine::{GameState, InvalidMove, Phase};
