//! Game state: construction, observation accessors, cloning.
//!
//! Mutation happens only through `apply_move` (see `rules`); everything else
//! here is setup and read-only surface for observation building.

use im::Vector;

use crate::core::{Card, Color, ConfigError, EnemyCard, GameConfig, GameRng, NUM_ENEMIES};
use crate::decks::{DiscardDeck, DrawDeck, EnemyDeck, Pile};
use crate::hand::Hand;
use crate::moves::{Move, MoveGenerator, MoveRecord};

use super::Phase;

/// Complete state of one Regicide game.
///
/// Created at reset, mutated only by [`GameState::apply_move`], replaced at
/// the next reset. Independent instances share nothing, so parallel rollout
/// workers need no locking.
pub struct GameState {
    pub(super) config: GameConfig,
    pub(super) generator: MoveGenerator,
    /// Every move, enumerated once; index == move id.
    pub(super) moves: Vec<Move>,

    pub(super) draw: DrawDeck,
    pub(super) discard: DiscardDeck,
    pub(super) enemies: EnemyDeck,
    pub(super) hands: Vec<Hand>,

    pub(super) phase: Phase,
    pub(super) active_player: usize,
    pub(super) pending_damage: i32,
    /// 1 while the enemy at that encoding index is undefeated.
    pub(super) enemy_alive: [u8; NUM_ENEMIES],
    /// Reward produced by the most recent `apply_move`.
    pub(super) reward: f64,

    pub(super) sequence: u32,
    pub(super) history: Vector<MoveRecord>,
    pub(super) rng: GameRng,
}

impl GameState {
    /// Build a fresh shuffled state. Deterministic given `config.seed`.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = GameRng::new(config.seed);
        let mut draw = DrawDeck::new(&mut rng);
        let enemies = EnemyDeck::new(&config, &mut rng);
        let hands: Vec<Hand> = (0..config.players)
            .map(|_| Hand::dealt(config.hand_size, &mut draw))
            .collect();

        let generator = MoveGenerator::new(&config);
        let moves = (0..generator.max_moves())
            .map(|id| {
                generator
                    .generate(id)
                    .expect("generator is total over its id range")
            })
            .collect();

        Ok(Self {
            config,
            generator,
            moves,
            draw,
            discard: DiscardDeck::new(),
            enemies,
            hands,
            phase: Phase::Play,
            active_player: 0,
            pending_damage: 0,
            enemy_alive: [1; NUM_ENEMIES],
            reward: 0.0,
            sequence: 0,
            history: Vector::new(),
            rng,
        })
    }

    /// Rebuild from the stored config. Same seed, same trajectory; vary the
    /// seed in the config for a different shuffle.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone()).expect("config was validated at construction");
    }

    /// Clone for an independent rollout branch.
    ///
    /// Takes `&mut self` because the clone's RNG is forked off this state's
    /// so the two trajectories diverge deterministically.
    #[must_use]
    pub fn clone_state(&mut self) -> Self {
        Self {
            config: self.config.clone(),
            generator: self.generator.clone(),
            moves: self.moves.clone(),
            draw: self.draw.clone(),
            discard: self.discard.clone(),
            enemies: self.enemies.clone(),
            hands: self.hands.clone(),
            phase: self.phase,
            active_player: self.active_player,
            pending_damage: self.pending_damage,
            enemy_alive: self.enemy_alive,
            reward: self.reward,
            sequence: self.sequence,
            history: self.history.clone(),
            rng: self.rng.fork(),
        }
    }

    // === Configuration ===

    /// The game configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The move-id bijection for this configuration.
    #[must_use]
    pub fn generator(&self) -> &MoveGenerator {
        &self.generator
    }

    /// Size of the flat action space. Stable for a given config.
    #[must_use]
    pub fn max_moves(&self) -> usize {
        self.moves.len()
    }

    /// Number of players.
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.config.players
    }

    // === Phase & termination ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Whether the game ended in a win.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.phase == Phase::Win
    }

    /// Count of undefeated enemies. Lower is better.
    #[must_use]
    pub fn score(&self) -> usize {
        self.enemies.len()
    }

    /// Reward produced by the most recent move.
    #[must_use]
    pub fn reward(&self) -> f64 {
        self.reward
    }

    /// Summed value of the active player's hand. Auxiliary scoring only.
    #[must_use]
    pub fn hand_score(&self) -> i32 {
        self.hands[self.active_player].total_value()
    }

    // === Players & hands ===

    /// Index of the player to act.
    #[must_use]
    pub fn active_player(&self) -> usize {
        self.active_player
    }

    /// A player's hand.
    #[must_use]
    pub fn hand(&self, player: usize) -> &Hand {
        &self.hands[player]
    }

    /// The active player's hand.
    #[must_use]
    pub fn active_hand(&self) -> &Hand {
        &self.hands[self.active_player]
    }

    /// A player's hand size.
    #[must_use]
    pub fn hand_size(&self, player: usize) -> usize {
        self.hands[player].len()
    }

    /// All hand sizes, by player index.
    #[must_use]
    pub fn all_hand_sizes(&self) -> Vec<usize> {
        self.hands.iter().map(Hand::len).collect()
    }

    /// Whether every hand is at capacity.
    #[must_use]
    pub fn all_hands_full(&self) -> bool {
        self.hands.iter().all(Hand::is_full)
    }

    // === Decks ===

    /// Cards left in the draw pile.
    #[must_use]
    pub fn draw_deck_size(&self) -> usize {
        self.draw.len()
    }

    /// Cards in the discard pile.
    #[must_use]
    pub fn discard_deck_size(&self) -> usize {
        self.discard.len()
    }

    /// Enemies left to fight.
    #[must_use]
    pub fn enemy_deck_size(&self) -> usize {
        self.enemies.len()
    }

    /// The draw pile.
    #[must_use]
    pub fn draw_deck(&self) -> &DrawDeck {
        &self.draw
    }

    /// The discard pile.
    #[must_use]
    pub fn discard_deck(&self) -> &DiscardDeck {
        &self.discard
    }

    /// The enemy pile.
    #[must_use]
    pub fn enemy_deck(&self) -> &EnemyDeck {
        &self.enemies
    }

    // === Current enemy ===

    /// The enemy being fought. `None` only once the game is won.
    #[must_use]
    pub fn current_enemy(&self) -> Option<&EnemyCard> {
        self.enemies.current()
    }

    /// Current enemy's color.
    #[must_use]
    pub fn current_enemy_color(&self) -> Option<Color> {
        self.enemies.current().map(EnemyCard::color)
    }

    /// Current enemy's health.
    #[must_use]
    pub fn current_enemy_health(&self) -> Option<i32> {
        self.enemies.current().map(EnemyCard::health)
    }

    /// Current enemy's attack, after shielding.
    #[must_use]
    pub fn current_enemy_attack(&self) -> Option<i32> {
        self.enemies.current().map(EnemyCard::attack)
    }

    /// Current enemy's rank tier, 0..3.
    #[must_use]
    pub fn current_enemy_tier(&self) -> Option<usize> {
        self.enemies
            .current()
            .map(|e| e.rank() as usize - crate::core::ENEMY_BASE_RANK as usize)
    }

    /// Unresolved enemy damage the active player must absorb. Nonzero only
    /// in the Discard phase.
    #[must_use]
    pub fn pending_damage(&self) -> i32 {
        self.pending_damage
    }

    /// Per-enemy alive bitmap, indexed by enemy encoding index.
    #[must_use]
    pub fn enemy_alive(&self) -> &[u8; NUM_ENEMIES] {
        &self.enemy_alive
    }

    // === History ===

    /// Moves applied so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    // === Scenario / test hooks ===
    //
    // Public mutable access to the owned containers, for wrappers and tests
    // that rig a specific position. Normal play never needs these.

    /// Mutable access to a player's hand.
    pub fn hand_mut(&mut self, player: usize) -> &mut Hand {
        &mut self.hands[player]
    }

    /// Mutable access to the draw pile.
    pub fn draw_deck_mut(&mut self) -> &mut DrawDeck {
        &mut self.draw
    }

    /// Mutable access to the discard pile.
    pub fn discard_deck_mut(&mut self) -> &mut DiscardDeck {
        &mut self.discard
    }

    /// Mutable access to the enemy pile.
    pub fn enemy_deck_mut(&mut self) -> &mut EnemyDeck {
        &mut self.enemies
    }

    // === Internal helpers ===

    /// Remove a card the legality predicate has confirmed present.
    pub(super) fn take_from_active(&mut self, color: Color, rank: u8) -> Card {
        self.hands[self.active_player]
            .take_if_present(color, rank)
            .expect("card presence confirmed by legality check")
    }
}
