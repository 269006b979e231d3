//! wordboard: crossword-board move engine and Rush puzzles
//!
//! - [`game`]: board, tiles, placement rules, word finding and scoring
//! - [`bot`]: move generation, ranking and difficulty-tuned selection
//! - [`rush`]: puzzle generation and round bookkeeping
//! - [`app`] and [`tui`]: the terminal Rush game

pub mod app;
pub mod bot;
pub mod config;
pub mod game;
pub mod rush;
pub mod tui;
