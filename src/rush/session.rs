//! Rush round bookkeeping
//!
//! The session owns the puzzle for one round and decides what each
//! submission is worth. A top move is credited the first time it is
//! found and never again. Hints always point at the first top move the
//! player has not found yet, and every find clears them.

use super::{Puzzle, TopMove};
use crate::game::board::{move_key, Coord, PlacedTile};
use crate::game::dictionary::Lexicon;
use crate::game::scoring::score_move;
use crate::game::validation::{validate, PlacementError};
use crate::game::words::{find_new_words, Word};
use std::collections::HashSet;

/// Result of submitting a move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Placement broke one or more rules
    Invalid(Vec<PlacementError>),
    /// Placement is legal but spells nothing
    NoWords,
    /// Some formed words are not in the dictionary
    UnknownWords(Vec<String>),
    /// A real move, just not one of the top moves
    NotTopMove { words: Vec<String>, score: u32 },
    /// Top move found earlier
    AlreadyFound { index: usize },
    /// Top move credited
    Found {
        index: usize,
        words: Vec<String>,
        score: u32,
    },
    /// The round is over
    RoundOver,
}

impl SubmitOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SubmitOutcome::Found { .. })
    }

    /// Returns a user-friendly feedback line
    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::Invalid(errors) => errors
                .first()
                .map(PlacementError::message)
                .unwrap_or_else(|| "Invalid move".to_string()),
            SubmitOutcome::NoWords => "No word formed".to_string(),
            SubmitOutcome::UnknownWords(words) => format!("NOPE: {}", words.join(", ")),
            SubmitOutcome::NotTopMove { words, score } => {
                format!("{} scores {}, not a top move", words.join(", "), score)
            }
            SubmitOutcome::AlreadyFound { index } => format!("Already found move #{}", index + 1),
            SubmitOutcome::Found { index, words, score } => {
                format!("OK +{} ({}) move #{}", score, words.join(", "), index + 1)
            }
            SubmitOutcome::RoundOver => "Round has ended".to_string(),
        }
    }
}

/// Hint tiers revealed for the current target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hints {
    pub anchor: bool,
    pub length: bool,
    pub letters: bool,
}

/// One Rush round over a puzzle
pub struct RushSession {
    puzzle: Puzzle,
    /// Keys of top moves already credited
    found: HashSet<String>,
    total_score: u32,
    hints: Hints,
    active: bool,
}

impl RushSession {
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            puzzle,
            found: HashSet::new(),
            total_score: 0,
            hints: Hints::default(),
            active: true,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    pub fn is_found(&self, index: usize) -> bool {
        self.puzzle
            .top_moves
            .get(index)
            .is_some_and(|m| self.found.contains(&m.key()))
    }

    /// Every top move has been found.
    pub fn is_complete(&self) -> bool {
        !self.puzzle.top_moves.is_empty() && self.found_count() == self.puzzle.top_moves.len()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// End the round (no more submissions accepted)
    pub fn end(&mut self) {
        self.active = false;
    }

    /// The first top move not yet found.
    pub fn current_target(&self) -> Option<(usize, &TopMove)> {
        self.puzzle
            .top_moves
            .iter()
            .enumerate()
            .find(|(_, m)| !self.found.contains(&m.key()))
    }

    /// Judge a submission and credit it if it is an unfound top move.
    pub fn submit<L>(&mut self, tiles: &[PlacedTile], lexicon: &L) -> SubmitOutcome
    where
        L: Lexicon + ?Sized,
    {
        if !self.active {
            return SubmitOutcome::RoundOver;
        }

        let validation = validate(&self.puzzle.board, tiles);
        if !validation.is_valid() {
            return SubmitOutcome::Invalid(validation.errors);
        }

        let key = move_key(tiles);
        let matched = self
            .puzzle
            .top_moves
            .iter()
            .position(|m| m.key() == key);
        if let Some(index) = matched {
            return self.credit(index, key);
        }

        let words = find_new_words(&self.puzzle.board, tiles);
        if words.is_empty() {
            return SubmitOutcome::NoWords;
        }
        let texts: Vec<String> = words.iter().map(Word::text).collect();
        let unknown: Vec<String> = texts
            .iter()
            .filter(|w| !lexicon.is_valid_word(w))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return SubmitOutcome::UnknownWords(unknown);
        }
        SubmitOutcome::NotTopMove {
            score: score_move(&words, tiles),
            words: texts,
        }
    }

    fn credit(&mut self, index: usize, key: String) -> SubmitOutcome {
        if !self.found.insert(key) {
            return SubmitOutcome::AlreadyFound { index };
        }
        let m = &self.puzzle.top_moves[index];
        self.total_score += m.score;
        log::debug!("found top move #{} {} for {}", index + 1, m.words.join(","), m.score);

        let outcome = SubmitOutcome::Found {
            index,
            words: m.words.clone(),
            score: m.score,
        };
        self.hints = Hints::default();
        if self.is_complete() {
            log::info!("all {} top moves found, {} points", self.found_count(), self.total_score);
        }
        outcome
    }

    pub fn hints(&self) -> Hints {
        self.hints
    }

    /// Reveal where the current target starts.
    pub fn reveal_anchor(&mut self) -> Option<Coord> {
        let (_, target) = self.current_target()?;
        let anchor = target.anchor_cell;
        self.hints.anchor = true;
        Some(anchor)
    }

    /// Reveal how long the current target's longest word is.
    pub fn reveal_length(&mut self) -> Option<usize> {
        let (_, target) = self.current_target()?;
        let len = target.main_word_len;
        self.hints.length = true;
        Some(len)
    }

    /// Reveal which letters the current target uses.
    pub fn reveal_letters(&mut self) -> Option<Vec<char>> {
        let (_, target) = self.current_target()?;
        let letters = target.letters_used.clone();
        self.hints.letters = true;
        Some(letters)
    }
}
