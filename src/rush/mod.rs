//! Rush mode: a timed puzzle where the player hunts for the best moves on a
//! prepared mid-game board
//!
//! - [`generator`] builds the board, rack and top-move set
//! - [`session`] matches submissions against the top moves and tracks hints

pub mod generator;
pub mod session;

pub use generator::generate_puzzle;
pub use session::{Hints, RushSession, SubmitOutcome};

use crate::bot::BotMove;
use crate::game::board::{move_key, Board, Coord, PlacedTile, CENTER};
use crate::game::tiles::Rack;
use serde::{Deserialize, Serialize};

/// One of the moves the player is asked to find.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopMove {
    pub tiles: Vec<PlacedTile>,
    pub words: Vec<String>,
    pub score: u32,
    /// First placed tile along the move's line
    pub anchor_cell: Coord,
    /// Length of the longest word formed
    pub main_word_len: usize,
    /// Placed letters in alphabetical order
    pub letters_used: Vec<char>,
}

impl TopMove {
    pub fn key(&self) -> String {
        move_key(&self.tiles)
    }
}

impl From<&BotMove> for TopMove {
    fn from(m: &BotMove) -> Self {
        Self {
            tiles: m.tiles.clone(),
            words: m.words.clone(),
            score: m.score,
            anchor_cell: m.anchor_cell().unwrap_or(CENTER),
            main_word_len: m.main_word_len(),
            letters_used: m.letters_used(),
        }
    }
}

/// A prepared board and rack with the best moves already found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: String,
    pub board: Board,
    pub rack: Rack,
    /// Best first, at most five
    pub top_moves: Vec<TopMove>,
    /// Set when no attempt cleared the quality bar
    #[serde(default)]
    pub fallback: bool,
}

impl Puzzle {
    /// Score of the best known move, 0 when there is none.
    pub fn best_score(&self) -> u32 {
        self.top_moves.first().map_or(0, |m| m.score)
    }

    /// Points available if every top move is found.
    pub fn max_score(&self) -> u32 {
        self.top_moves.iter().map(|m| m.score).sum()
    }
}
