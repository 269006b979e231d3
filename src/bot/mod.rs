//! Computer opponent: move search, ranking and difficulty-tuned selection
//!
//! A turn runs in three steps:
//! - [`movegen::generate_moves`] enumerates legal, dictionary-valid moves
//! - [`ranker::rank_moves`] attaches the composite score
//! - [`ranker::select_move`] draws one of the best moves for the difficulty

pub mod movegen;
pub mod ranker;

pub use movegen::{generate_moves, MAX_PERMUTATIONS};
pub use ranker::{rank_moves, select_move, select_with_temperature};

use crate::game::board::{move_key, Axis, Coord, PlacedTile};
use crate::game::dictionary::Lexicon;
use crate::game::tiles::Rack;
use crate::game::Board;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A legal move found by the search, with its scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotMove {
    pub tiles: Vec<PlacedTile>,
    pub words: Vec<String>,
    /// Points the move scores on the board
    pub score: u32,
    pub quality_score: f64,
    pub strategic_score: f64,
    /// Weighted blend used for selection
    pub total_score: f64,
}

impl BotMove {
    /// A scored but not yet ranked move.
    pub fn new(tiles: Vec<PlacedTile>, words: Vec<String>, score: u32) -> Self {
        Self {
            tiles,
            words,
            score,
            quality_score: 0.0,
            strategic_score: 0.0,
            total_score: 0.0,
        }
    }

    /// Canonical identity, see [`move_key`].
    pub fn key(&self) -> String {
        move_key(&self.tiles)
    }

    /// The first placed tile along the move's line.
    pub fn anchor_cell(&self) -> Option<Coord> {
        let axis = Axis::of(&self.tiles)?;
        self.tiles
            .iter()
            .map(|t| t.coord)
            .min_by_key(|c| c.along(axis))
    }

    /// Length of the longest word formed.
    pub fn main_word_len(&self) -> usize {
        self.words.iter().map(|w| w.chars().count()).max().unwrap_or(0)
    }

    /// Letters placed, sorted.
    pub fn letters_used(&self) -> Vec<char> {
        let mut letters: Vec<char> = self.tiles.iter().map(PlacedTile::letter).collect();
        letters.sort_unstable();
        letters
    }
}

/// How strong the computer opponent plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Share of ranked moves kept for the draw, and the floor on that count.
    fn top_k_share(self) -> (f64, usize) {
        match self {
            Difficulty::Easy => (0.6, 3),
            Difficulty::Medium => (0.3, 2),
            Difficulty::Hard => (0.1, 1),
        }
    }

    /// How many of `total` ranked moves take part in the draw.
    pub fn top_k(self, total: usize) -> usize {
        let (share, floor) = self.top_k_share();
        ((total as f64 * share).floor() as usize).max(floor).min(total)
    }

    /// Softmax temperature. Higher plays looser.
    pub fn temperature(self) -> f64 {
        match self {
            Difficulty::Easy => 50.0,
            Difficulty::Medium => 20.0,
            Difficulty::Hard => 5.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty {0:?}, expected easy, medium or hard")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// A computer player at a fixed difficulty.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bot {
    difficulty: Difficulty,
}

impl Bot {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Search, rank and pick a move. `None` means the bot passes.
    pub fn choose_move<L, R>(
        &self,
        board: &Board,
        rack: &Rack,
        lexicon: &L,
        rng: &mut R,
    ) -> Option<BotMove>
    where
        L: Lexicon + ?Sized,
        R: Rng + ?Sized,
    {
        let moves = generate_moves(board, rack, lexicon, rng);
        let ranked = rank_moves(moves, rack);
        let chosen = select_move(&ranked, self.difficulty, rng);
        match &chosen {
            Some(m) => log::debug!(
                "{} bot plays {} for {} ({} candidates)",
                self.difficulty,
                m.words.join(","),
                m.score,
                ranked.len()
            ),
            None => log::debug!("{} bot passes, no legal move", self.difficulty),
        }
        chosen
    }
}
