//! Move scoring
//!
//! Bonus squares only count for tiles placed this turn. Letter bonuses
//! multiply the tile they sit under; the single highest word bonus among
//! a word's new tiles multiplies the whole word once.

use super::board::PlacedTile;
use super::layout::bonus_at;
use super::tiles::RACK_SIZE;
use super::words::Word;

/// Bonus for playing a full rack in one move
pub const BINGO_BONUS: u32 = 50;

/// Score a single word.
pub fn score_word(word: &Word) -> u32 {
    let mut letters = 0;
    let mut word_multiplier = 1;
    for cell in &word.cells {
        let mut value = cell.tile.score();
        if cell.is_new {
            if let Some(bonus) = bonus_at(cell.coord) {
                value *= bonus.letter_multiplier();
                word_multiplier = word_multiplier.max(bonus.word_multiplier());
            }
        }
        letters += value;
    }
    letters * word_multiplier
}

/// Score a whole move: every formed word plus the bingo bonus when all
/// seven rack tiles were placed.
pub fn score_move(words: &[Word], pending: &[PlacedTile]) -> u32 {
    let total: u32 = words.iter().map(score_word).sum();
    if is_bingo(pending) {
        total + BINGO_BONUS
    } else {
        total
    }
}

pub fn is_bingo(pending: &[PlacedTile]) -> bool {
    pending.len() == RACK_SIZE
}
