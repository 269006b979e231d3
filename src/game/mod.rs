//! Game rules: board, tiles, placement validation, word finding, scoring

pub mod board;
pub mod dictionary;
pub mod layout;
pub mod scoring;
pub mod tiles;
pub mod validation;
pub mod words;

pub use board::{move_key, Axis, Board, BoardError, Coord, PlacedTile, BOARD_SIZE, CENTER};
pub use dictionary::{Dictionary, DictionaryError, Lexicon, WordGate};
pub use layout::{bonus_at, Bonus};
pub use scoring::{score_move, score_word, BINGO_BONUS};
pub use tiles::{can_end_game, end_game_penalty, Rack, Tile, TileBag, RACK_SIZE};
pub use validation::{validate, PlacementError, Validation};
pub use words::{find_new_words, Word};
