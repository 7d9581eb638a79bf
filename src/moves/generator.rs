//! The move-id bijection.
//!
//! Every move has a stable integer id in `[0, max_moves)`, laid out in four
//! contiguous ranges over `C = 4 colors * 13 ranks = 52`:
//!
//! - `[0, C)`       Play: `color = id / 13`, `rank = id % 13`
//! - `[C, 2C)`      Discard: same grid shifted by `C`
//! - `[2C, 6C)`     Ace: four sub-ranges keyed by the ace's color;
//!                  `ace_color = id / C - 2`, paired card from `id % C`
//! - `[6C, 6C+K)`   Combo: index into the generated combo table
//!
//! The Play/Discard/Ace ranges cover the full 52-identity grid even though
//! only 40 cards start in the draw pile: recycled enemies (ranks 10..13) are
//! playable once drawn.
//!
//! ## Combo table
//!
//! The table is derived, not transcribed: for each card value `v = 2, 3, ...`
//! while `2v` fits the ceiling, and each count `n` in `2..=4` with
//! `v * n` within the ceiling, emit every lexicographic combination of `n`
//! of the four colors at rank `v - 1`. Groups are ordered by ascending
//! value, then count, then colors. For the default ceiling of 10 this yields
//! 33 entries and `max_moves = 345`.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{Color, GameConfig, NUM_CARDS, NUM_COLORS, NUM_RANKS};

use super::{CardSet, Move};

/// Stateless bijection between flat ids and typed moves.
#[derive(Clone, Debug)]
pub struct MoveGenerator {
    combos: Vec<CardSet>,
    combo_index: FxHashMap<CardSet, usize>,
}

impl MoveGenerator {
    /// Build the generator for a configuration. The combo table depends only
    /// on `maximum_combo`, so `max_moves` is stable per config.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let combos = build_combo_table(config.maximum_combo);
        let combo_index = combos
            .iter()
            .enumerate()
            .map(|(i, cards)| (cards.clone(), i))
            .collect();
        Self {
            combos,
            combo_index,
        }
    }

    /// Total number of move ids.
    #[must_use]
    pub fn max_moves(&self) -> usize {
        NUM_CARDS * 6 + self.combos.len()
    }

    /// Number of combo-table entries.
    #[must_use]
    pub fn num_combos(&self) -> usize {
        self.combos.len()
    }

    /// The combo-table entry at `index`.
    #[must_use]
    pub fn combo(&self, index: usize) -> Option<&CardSet> {
        self.combos.get(index)
    }

    /// Decode a flat id. Total over `[0, max_moves)`; `None` out of range.
    #[must_use]
    pub fn generate(&self, id: usize) -> Option<Move> {
        let color_of = |id: usize| Color::from_index((id % NUM_CARDS) / NUM_RANKS);
        let rank_of = |id: usize| (id % NUM_RANKS) as u8;

        if id < NUM_CARDS {
            Some(Move::Play {
                color: color_of(id),
                rank: rank_of(id),
            })
        } else if id < NUM_CARDS * 2 {
            Some(Move::Discard {
                color: color_of(id),
                rank: rank_of(id),
            })
        } else if id < NUM_CARDS * 6 {
            Some(Move::Ace {
                ace_color: Color::from_index(id / NUM_CARDS - 2),
                color: color_of(id),
                rank: rank_of(id),
            })
        } else {
            let combo = self.combos.get(id - NUM_CARDS * 6)?;
            Some(Move::Combo {
                cards: combo.clone(),
            })
        }
    }

    /// Re-encode a move to its flat id.
    ///
    /// `None` only for a combo whose card set is not a table entry; ids
    /// produced by [`MoveGenerator::generate`] always round-trip.
    #[must_use]
    pub fn encode(&self, mov: &Move) -> Option<usize> {
        let grid = |color: Color, rank: u8| color.index() * NUM_RANKS + rank as usize;
        match mov {
            Move::Play { color, rank } => Some(grid(*color, *rank)),
            Move::Discard { color, rank } => Some(NUM_CARDS + grid(*color, *rank)),
            Move::Ace {
                ace_color,
                color,
                rank,
            } => Some(NUM_CARDS * (2 + ace_color.index()) + grid(*color, *rank)),
            Move::Combo { cards } => self.combo_index.get(cards).map(|i| NUM_CARDS * 6 + i),
        }
    }
}

/// Derive the combo table for a ceiling on summed combo value.
fn build_combo_table(maximum_combo: i32) -> Vec<CardSet> {
    let mut table = Vec::new();
    let mut value = 2;
    while value * 2 <= maximum_combo {
        let rank = (value - 1) as u8;
        for count in 2..=NUM_COLORS {
            if value * count as i32 > maximum_combo {
                continue;
            }
            for colors in color_combinations(count) {
                table.push(colors.iter().map(|&c| (c, rank)).collect());
            }
        }
        value += 1;
    }
    table
}

/// All size-`count` combinations of the four colors, lexicographic.
fn color_combinations(count: usize) -> Vec<SmallVec<[Color; 4]>> {
    let mut out = Vec::new();
    let mut current: SmallVec<[Color; 4]> = SmallVec::new();
    fn recurse(
        start: usize,
        count: usize,
        current: &mut SmallVec<[Color; 4]>,
        out: &mut Vec<SmallVec<[Color; 4]>>,
    ) {
        if current.len() == count {
            out.push(current.clone());
            return;
        }
        for i in start..NUM_COLORS {
            current.push(Color::from_index(i));
            recurse(i + 1, count, current, out);
            current.pop();
        }
    }
    recurse(0, count, &mut current, &mut out);
    out
}
