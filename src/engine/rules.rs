//! Legality predicate, move application, suit effects, combat.
//!
//! The binding order of operations inside `apply_move` follows the tabletop
//! resolution: cards leave the hand, suit effects and combat resolve, and
//! only then do the played cards reach the discard pile. The Heart effect
//! therefore never recycles the cards being played.

use smallvec::SmallVec;

use crate::core::{Card, Color, NUM_COLORS};
use crate::decks::Pile;
use crate::moves::{Move, MoveRecord};

use super::{GameState, InvalidMove, Phase};

impl GameState {
    /// Pure legality predicate for a move against the current state.
    ///
    /// Play, Ace and Combo moves are legal only in the Play phase; Discard
    /// only in the Discard phase; every named card must be in the active
    /// player's hand; the two cards of an Ace move must be distinct.
    /// Terminal phases admit no moves.
    #[must_use]
    pub fn move_is_legal(&self, mov: &Move) -> bool {
        let hand = &self.hands[self.active_player];
        match self.phase {
            Phase::Win | Phase::Loss => false,
            Phase::Discard => match mov {
                Move::Discard { color, rank } => hand.contains(*color, *rank),
                _ => false,
            },
            Phase::Play => match mov {
                Move::Play { color, rank } => hand.contains(*color, *rank),
                Move::Discard { .. } => false,
                Move::Ace {
                    ace_color,
                    color,
                    rank,
                } => {
                    (*color, *rank) != (*ace_color, 0)
                        && hand.contains(*ace_color, 0)
                        && hand.contains(*color, *rank)
                }
                Move::Combo { cards } => cards.iter().all(|&(c, r)| hand.contains(c, r)),
            },
        }
    }

    /// Ids of all currently legal moves, ascending.
    ///
    /// Recomputed on every query: hand contents change every turn, so the
    /// result is never cached.
    #[must_use]
    pub fn legal_move_ids(&self) -> Vec<usize> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, mov)| self.move_is_legal(mov))
            .map(|(id, _)| id)
            .collect()
    }

    /// All currently legal moves.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<&Move> {
        self.moves
            .iter()
            .filter(|mov| self.move_is_legal(mov))
            .collect()
    }

    /// The move a flat id decodes to, if in range.
    #[must_use]
    pub fn get_move(&self, id: usize) -> Option<&Move> {
        self.moves.get(id)
    }

    /// Apply the move with the given id.
    ///
    /// Fails with [`InvalidMove`] (state untouched) when the id is out of
    /// range or the move is illegal in the current state. On success the
    /// state mutates in place and [`GameState::reward`] holds this step's
    /// signal.
    pub fn apply_move(&mut self, id: usize) -> Result<(), InvalidMove> {
        let mov = match self.moves.get(id) {
            Some(mov) if self.move_is_legal(mov) => mov.clone(),
            _ => return Err(InvalidMove { id }),
        };

        self.reward = 0.0;

        match &mov {
            Move::Play { color, rank } => {
                let card = self.take_from_active(*color, *rank);
                let mut colors = [false; NUM_COLORS];
                colors[card.color().index()] = true;
                self.resolve_played_set(colors, card.value());
                self.discard.place_at_back(card);
            }
            Move::Discard { color, rank } => {
                let card = self.take_from_active(*color, *rank);
                self.pending_damage -= card.value();
                self.discard.place_at_back(card);
                if self.pending_damage <= 0 {
                    self.pending_damage = 0;
                    self.phase = Phase::Play;
                }
            }
            Move::Ace { .. } | Move::Combo { .. } => {
                let mut played: SmallVec<[Card; 4]> = SmallVec::new();
                let mut colors = [false; NUM_COLORS];
                let mut value = 0;
                for (color, rank) in mov.cards() {
                    let card = self.take_from_active(color, rank);
                    colors[card.color().index()] = true;
                    value += card.value();
                    played.push(card);
                }
                self.resolve_played_set(colors, value);
                for card in played {
                    self.discard.place_at_back(card);
                }
            }
        }

        self.hands[self.active_player].sort();

        // Out of cards with enemies left: loss, penalized by remaining count.
        if self.hands[self.active_player].is_empty() && !self.enemies.is_empty() {
            self.phase = Phase::Loss;
            self.reward -= self.score() as f64;
        }

        let sequence = self.sequence;
        self.sequence += 1;
        self.history.push_back(MoveRecord {
            player: self.active_player,
            move_id: id,
            sequence,
        });

        Ok(())
    }

    /// Resolve a played card set: one effect per distinct suit present,
    /// excluding the enemy's own suit, then combat with the (possibly
    /// Club-doubled) total value.
    ///
    /// The enemy's own suit triggers no effect and costs a small penalty,
    /// but its value still counts toward damage.
    fn resolve_played_set(&mut self, colors: [bool; NUM_COLORS], value: i32) {
        let enemy_color = self
            .enemies
            .current()
            .expect("enemy present outside terminal phases")
            .color();

        let mut damage = value;
        for color in Color::ALL {
            if !colors[color.index()] {
                continue;
            }
            if color == enemy_color {
                self.reward -= f64::from(value) / 20.0;
                continue;
            }
            match color {
                Color::Heart => self.heart_effect(value),
                Color::Diamond => self.diamond_effect(value),
                Color::Spade => self.spade_effect(value),
                Color::Club => damage = self.club_effect(value),
            }
        }
        self.attack_enemy(damage);
    }

    /// Heart: recycle up to `value` uniform-random discard cards to the back
    /// of the draw pile. Credit is granted only when the discard pile runs
    /// dry early, proportional to the cards actually moved.
    fn heart_effect(&mut self, value: i32) {
        let mut moved = 0;
        for _ in 0..value {
            match self.discard.remove_random(&mut self.rng) {
                Some(card) => {
                    self.draw.place_at_back(card);
                    moved += 1;
                }
                None => {
                    self.reward += f64::from(moved) / 20.0;
                    return;
                }
            }
        }
    }

    /// Diamond: up to `value` round-robin draws starting at the active
    /// player, skipping full hands. Credit only when every hand fills early.
    /// An empty draw pile makes individual draws no-ops without ending the
    /// round-robin.
    fn diamond_effect(&mut self, value: i32) {
        let players = self.config.players;
        let mut target = self.active_player;
        let mut drawn = 0;
        for _ in 0..value {
            if self.all_hands_full() {
                self.reward += f64::from(drawn) / 20.0;
                return;
            }
            while self.hands[target].is_full() {
                target = (target + 1) % players;
            }
            self.hands[target].draw_one(&mut self.draw);
            target = (target + 1) % players;
            drawn += 1;
        }
    }

    /// Spade: shield the enemy's attack by up to `value`, floored at 0.
    /// Credit proportional to the attack actually shielded.
    fn spade_effect(&mut self, value: i32) {
        let enemy = self
            .enemies
            .current_mut()
            .expect("enemy present outside terminal phases");
        let shielded = enemy.attack().min(value);
        enemy.reduce_attack(value);
        self.reward += f64::from(shielded) / 20.0;
    }

    /// Club: double the damage this resolution deals. Credit relative to the
    /// enemy's remaining health.
    fn club_effect(&mut self, value: i32) -> i32 {
        let health = self
            .enemies
            .current()
            .expect("enemy present outside terminal phases")
            .health();
        self.reward += f64::from((health - value).min(value)) / 20.0;
        value * 2
    }

    /// Combat: deal `damage` to the current enemy and resolve the outcome.
    ///
    /// Health below 0 is an ordinary kill (card to the discard pile);
    /// exactly 0 is a perfect kill (card to the front of the draw pile, plus
    /// the tier bonus). Surviving enemies with attack left counterattack by
    /// forcing the Discard phase.
    fn attack_enemy(&mut self, damage: i32) {
        let (health, attack) = {
            let enemy = self
                .enemies
                .current_mut()
                .expect("enemy present outside terminal phases");
            enemy.reduce_health(damage);
            (enemy.health(), enemy.attack())
        };

        if health <= 0 {
            if let Some(enemy) = self.enemies.deal_from_front() {
                self.enemy_alive[enemy.encoding_index()] = 0;
                self.reward += 1.0;
                if health == 0 {
                    self.reward += f64::from(enemy.base_attack()) / 100.0;
                    self.draw.insert_at_front(enemy.into_card());
                } else {
                    self.discard.place_at_back(enemy.into_card());
                }
            }
            if self.enemies.is_empty() {
                self.phase = Phase::Win;
                self.reward = 12.0;
            }
        } else if attack != 0 {
            self.phase = Phase::Discard;
            self.pending_damage = attack;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::moves::MoveGenerator;

    /// A single-player state with an emptied hand and a rigged current
    /// enemy, for effect-level tests.
    fn rigged(enemy_color: Color) -> GameState {
        let mut state = GameState::new(GameConfig::default()).unwrap();
        rotate_enemy(&mut state, enemy_color);
        clear_hand(&mut state);
        state
    }

    fn rotate_enemy(state: &mut GameState, color: Color) {
        for _ in 0..NUM_COLORS {
            if state.current_enemy().unwrap().color() == color {
                return;
            }
            let enemy = state.enemy_deck_mut().deal_from_front().unwrap();
            state.enemy_deck_mut().place_at_back(enemy);
        }
        panic!("tier has all four colors");
    }

    fn clear_hand(state: &mut GameState) {
        while let Some(card) = state.hand(0).cards().first().copied() {
            let taken = state
                .hand_mut(0)
                .take_if_present(card.color(), card.rank())
                .unwrap();
            state.discard_deck_mut().place_at_back(taken);
        }
    }

    fn give(state: &mut GameState, color: Color, rank: u8) {
        state.hand_mut(0).add_card(Card::new(color, rank));
    }

    fn play_id(state: &GameState, color: Color, rank: u8) -> usize {
        state
            .generator()
            .encode(&Move::Play { color, rank })
            .unwrap()
    }

    #[test]
    fn test_play_deals_face_value() {
        let mut state = rigged(Color::Club);
        give(&mut state, Color::Diamond, 6);

        state
            .apply_move(play_id(&state, Color::Diamond, 6))
            .unwrap();

        assert_eq!(state.current_enemy_health(), Some(20 - 7));
        assert_eq!(state.phase(), Phase::Discard);
        assert_eq!(state.pending_damage(), 10);
    }

    #[test]
    fn test_enemy_suit_deals_damage_without_effect() {
        let mut state = rigged(Color::Spade);
        give(&mut state, Color::Spade, 6);
        give(&mut state, Color::Heart, 0); // keep the hand non-empty

        state.apply_move(play_id(&state, Color::Spade, 6)).unwrap();

        // No shielding happened, only the matching-suit penalty and damage.
        assert_eq!(state.current_enemy_health(), Some(20 - 7));
        assert_eq!(state.current_enemy_attack(), Some(10));
        assert!((state.reward() - (-7.0 / 20.0)).abs() < 1e-9);
    }

    #[test]
    fn test_spade_shields_attack() {
        let mut state = rigged(Color::Club);
        give(&mut state, Color::Spade, 3);
        give(&mut state, Color::Heart, 0);

        state.apply_move(play_id(&state, Color::Spade, 3)).unwrap();

        assert_eq!(state.current_enemy_attack(), Some(10 - 4));
        assert_eq!(state.current_enemy_health(), Some(20 - 4));
        // Shield credit 4/20, then the counterattack forces a discard of 6.
        assert!((state.reward() - 0.2).abs() < 1e-9);
        assert_eq!(state.phase(), Phase::Discard);
        assert_eq!(state.pending_damage(), 6);
    }

    #[test]
    fn test_spade_shield_to_zero_skips_counterattack() {
        let mut state = rigged(Color::Club);
        give(&mut state, Color::Spade, 9);
        give(&mut state, Color::Heart, 0);

        state.apply_move(play_id(&state, Color::Spade, 9)).unwrap();

        assert_eq!(state.current_enemy_attack(), Some(0));
        assert_eq!(state.phase(), Phase::Play);
        assert_eq!(state.pending_damage(), 0);
    }

    #[test]
    fn test_club_doubles_damage() {
        let mut state = rigged(Color::Heart);
        give(&mut state, Color::Club, 4);
        give(&mut state, Color::Heart, 0);

        state.apply_move(play_id(&state, Color::Club, 4)).unwrap();

        assert_eq!(state.current_enemy_health(), Some(20 - 10));
    }

    #[test]
    fn test_heart_recycles_discard_into_draw() {
        let mut state = rigged(Color::Club);
        // clear_hand left 8 cards in the discard pile.
        assert_eq!(state.discard_deck_size(), 8);
        give(&mut state, Color::Heart, 4);
        give(&mut state, Color::Diamond, 0);
        let draw_before = state.draw_deck_size();

        state.apply_move(play_id(&state, Color::Heart, 4)).unwrap();

        // Value 5: five cards move back to the draw pile.
        assert_eq!(state.draw_deck_size(), draw_before + 5);
        assert_eq!(state.discard_deck_size(), 8 - 5 + 1);
    }

    #[test]
    fn test_heart_stops_when_discard_empties() {
        let mut state = rigged(Color::Club);
        // Leave exactly two cards in the discard pile.
        let mut rng = crate::core::GameRng::new(0);
        while state.discard_deck_size() > 2 {
            let card = state.discard_deck_mut().remove_random(&mut rng).unwrap();
            state.draw_deck_mut().place_at_back(card);
        }
        give(&mut state, Color::Heart, 8);
        give(&mut state, Color::Diamond, 0);
        let draw_before = state.draw_deck_size();

        state.apply_move(play_id(&state, Color::Heart, 8)).unwrap();

        assert_eq!(state.draw_deck_size(), draw_before + 2);
        // Early-stop credit for the two recycled cards, then combat outcome.
        assert_eq!(state.phase(), Phase::Discard);
        assert!((state.reward() - 2.0 / 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_diamond_refills_hand() {
        let mut state = rigged(Color::Club);
        give(&mut state, Color::Diamond, 4);
        give(&mut state, Color::Heart, 0);
        let draw_before = state.draw_deck_size();

        state
            .apply_move(play_id(&state, Color::Diamond, 4))
            .unwrap();

        // One card in hand after playing; value 5 draws five replacements.
        assert_eq!(state.hand_size(0), 6);
        assert_eq!(state.draw_deck_size(), draw_before - 5);
    }

    #[test]
    fn test_diamond_stops_at_capacity() {
        let mut state = rigged(Color::Club);
        give(&mut state, Color::Diamond, 8);
        for rank in 0..6 {
            give(&mut state, Color::Heart, rank);
        }

        state
            .apply_move(play_id(&state, Color::Diamond, 8))
            .unwrap();

        assert_eq!(state.hand_size(0), 8);
        assert!(state.hand(0).is_full());
    }

    #[test]
    fn test_ordinary_kill_to_discard() {
        let mut state = rigged(Color::Heart);
        give(&mut state, Color::Club, 9); // value 10, doubled to 20
        give(&mut state, Color::Diamond, 0);
        state.enemy_deck_mut().current_mut().unwrap().reduce_health(1); // 19 left

        let enemy = *state.current_enemy().unwrap();
        state.apply_move(play_id(&state, Color::Club, 9)).unwrap();

        // 20 damage vs 19 health: overkill, card lands in the discard pile.
        assert_eq!(state.enemy_deck_size(), 11);
        assert_eq!(state.enemy_alive()[enemy.encoding_index()], 0);
        assert!(state.discard_deck().iter().any(|c| *c == enemy.into_card()));
        // Club credit min(19-10, 10)/20, kill bonus 1, no tier bonus.
        assert!((state.reward() - (9.0 / 20.0 + 1.0)).abs() < 1e-9);
        assert_eq!(state.phase(), Phase::Play);
    }

    #[test]
    fn test_discard_phase_flow() {
        let mut state = rigged(Color::Club);
        give(&mut state, Color::Diamond, 6);
        give(&mut state, Color::Heart, 5);
        give(&mut state, Color::Heart, 7);

        state
            .apply_move(play_id(&state, Color::Diamond, 6))
            .unwrap();
        assert_eq!(state.phase(), Phase::Discard);
        assert_eq!(state.pending_damage(), 10);

        // Play moves are illegal while damage is pending.
        assert!(!state.move_is_legal(&Move::Play {
            color: Color::Heart,
            rank: 5
        }));

        let discard_id = state
            .generator()
            .encode(&Move::Discard {
                color: Color::Heart,
                rank: 5,
            })
            .unwrap();
        state.apply_move(discard_id).unwrap();
        assert_eq!(state.phase(), Phase::Discard);
        assert_eq!(state.pending_damage(), 4);

        let discard_id = state
            .generator()
            .encode(&Move::Discard {
                color: Color::Heart,
                rank: 7,
            })
            .unwrap();
        state.apply_move(discard_id).unwrap();
        assert_eq!(state.phase(), Phase::Play);
        assert_eq!(state.pending_damage(), 0);
    }

    #[test]
    fn test_ace_combines_suits() {
        let mut state = rigged(Color::Club);
        give(&mut state, Color::Spade, 0);
        give(&mut state, Color::Diamond, 8);
        give(&mut state, Color::Heart, 2);

        let ace_id = state
            .generator()
            .encode(&Move::Ace {
                ace_color: Color::Spade,
                color: Color::Diamond,
                rank: 8,
            })
            .unwrap();
        state.apply_move(ace_id).unwrap();

        // Value 1 + 9 = 10: spade shields 10, diamond refills the hand.
        assert_eq!(state.current_enemy_health(), Some(10));
        assert_eq!(state.current_enemy_attack(), Some(0));
        assert_eq!(state.hand_size(0), 8);
        assert_eq!(state.phase(), Phase::Play);
    }

    #[test]
    fn test_ace_needs_distinct_cards() {
        let mut state = rigged(Color::Club);
        give(&mut state, Color::Heart, 0);

        let self_pair = Move::Ace {
            ace_color: Color::Heart,
            color: Color::Heart,
            rank: 0,
        };
        assert!(!state.move_is_legal(&self_pair));

        give(&mut state, Color::Diamond, 0);
        let two_aces = Move::Ace {
            ace_color: Color::Heart,
            color: Color::Diamond,
            rank: 0,
        };
        assert!(state.move_is_legal(&two_aces));
    }

    #[test]
    fn test_combo_plays_all_cards() {
        let mut state = rigged(Color::Club);
        give(&mut state, Color::Heart, 2);
        give(&mut state, Color::Diamond, 2);
        give(&mut state, Color::Spade, 2);
        give(&mut state, Color::Heart, 1);

        let gen = MoveGenerator::new(state.config());
        let combo = Move::Combo {
            cards: SmallVec::from_slice(&[
                (Color::Heart, 2),
                (Color::Diamond, 2),
                (Color::Spade, 2),
            ]),
        };
        let id = gen.encode(&combo).unwrap();
        state.apply_move(id).unwrap();

        // Three threes: value 9, heart + diamond + spade effects all fire.
        assert_eq!(state.current_enemy_health(), Some(20 - 9));
        assert_eq!(state.current_enemy_attack(), Some(1));
        assert_eq!(state.hand_size(0), 8);
        assert_eq!(state.phase(), Phase::Discard);
        assert_eq!(state.pending_damage(), 1);
    }

    #[test]
    fn test_apply_rejects_illegal_and_leaves_state_unchanged() {
        let mut state = GameState::new(GameConfig::default()).unwrap();
        let hand_before: Vec<_> = state.hand(0).cards().to_vec();

        // Discards are illegal in the Play phase.
        let card = hand_before[0];
        let discard_id = state
            .generator()
            .encode(&Move::Discard {
                color: card.color(),
                rank: card.rank(),
            })
            .unwrap();
        assert_eq!(state.apply_move(discard_id), Err(InvalidMove { id: discard_id }));

        // Out-of-range ids are rejected too.
        let out_of_range = state.max_moves();
        assert_eq!(
            state.apply_move(out_of_range),
            Err(InvalidMove { id: out_of_range })
        );

        assert_eq!(state.hand(0).cards(), hand_before.as_slice());
        assert_eq!(state.phase(), Phase::Play);
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_legal_ids_match_predicate() {
        let state = GameState::new(GameConfig::default()).unwrap();
        let ids = state.legal_move_ids();

        assert!(!ids.is_empty());
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        for id in 0..state.max_moves() {
            let legal = state.move_is_legal(state.get_move(id).unwrap());
            assert_eq!(legal, ids.contains(&id));
        }
    }

    #[test]
    fn test_history_records_moves() {
        let mut state = GameState::new(GameConfig::default()).unwrap();

        let id = state.legal_move_ids()[0];
        state.apply_move(id).unwrap();

        let record = state.history().last().unwrap();
        assert_eq!(
            record,
            &MoveRecord {
                player: 0,
                move_id: id,
                sequence: 0
            }
        );
    }
}
