//! Round state and input handling

pub mod state;

pub use state::{App, HintReveal, RoundSummary, DEFAULT_ROUND_DURATION};
