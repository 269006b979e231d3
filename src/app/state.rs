//! Application state for a Rush round
//!
//! Holds the board cursor, the tiles the player has laid but not yet
//! submitted, and the round clock. All scoring decisions go through the
//! [`RushSession`].

use crate::game::board::{Axis, Coord, PlacedTile, CENTER};
use crate::game::dictionary::Lexicon;
use crate::game::tiles::Tile;
use crate::rush::{Puzzle, RushSession, SubmitOutcome, TopMove};

/// Default round duration in seconds
pub const DEFAULT_ROUND_DURATION: u32 = 90;

/// A hint that has been revealed for the current target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintReveal {
    Anchor(Coord),
    Length(usize),
    Letters(Vec<char>),
}

impl HintReveal {
    pub fn label(&self) -> String {
        match self {
            HintReveal::Anchor(coord) => format!("Starts at {}", coord),
            HintReveal::Length(len) => format!("Longest word has {} letters", len),
            HintReveal::Letters(letters) => {
                let letters: String = letters.iter().collect();
                format!("Uses {}", letters)
            }
        }
    }
}

/// End-of-round summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundSummary {
    pub total_score: u32,
    pub max_score: u32,
    /// Top moves the player found
    pub found: Vec<TopMove>,
    /// Top moves the player missed
    pub missed: Vec<TopMove>,
    pub submissions: usize,
}

/// Main application state
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,
    session: RushSession,
    lexicon: Box<dyn Lexicon>,
    /// Square the next tile goes on
    pub cursor: Coord,
    /// Direction the cursor advances after placing a tile
    pub direction: Axis,
    /// Tiles laid this attempt, in placement order
    pending: Vec<PlacedTile>,
    /// Rack tiles not yet laid
    rack: Vec<Tile>,
    /// Feedback message from last action
    pub feedback: String,
    /// Time remaining in seconds
    pub time_remaining: u32,
    /// Whether the round has ended
    pub round_ended: bool,
    hints: Vec<HintReveal>,
    submissions: usize,
}

impl App {
    /// Start a round on `puzzle`.
    pub fn new(puzzle: Puzzle, lexicon: Box<dyn Lexicon>, duration: u32) -> Self {
        let rack = puzzle.rack.tiles().to_vec();
        let feedback = if puzzle.top_moves.is_empty() {
            "No top moves for this puzzle".to_string()
        } else {
            String::new()
        };
        Self {
            should_quit: false,
            session: RushSession::new(puzzle),
            lexicon,
            cursor: CENTER,
            direction: Axis::Horizontal,
            pending: Vec::new(),
            rack,
            feedback,
            time_remaining: duration,
            round_ended: false,
            hints: Vec::new(),
            submissions: 0,
        }
    }

    /// Signal the application to quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn session(&self) -> &RushSession {
        &self.session
    }

    pub fn puzzle(&self) -> &Puzzle {
        self.session.puzzle()
    }

    pub fn pending(&self) -> &[PlacedTile] {
        &self.pending
    }

    pub fn rack(&self) -> &[Tile] {
        &self.rack
    }

    pub fn hints(&self) -> &[HintReveal] {
        &self.hints
    }

    pub fn score(&self) -> u32 {
        self.session.total_score()
    }

    /// Pending tile on a square, if any
    pub fn pending_at(&self, coord: Coord) -> Option<&PlacedTile> {
        self.pending.iter().find(|t| t.coord == coord)
    }

    fn is_free(&self, coord: Coord) -> bool {
        !self.puzzle().board.is_occupied(coord) && self.pending_at(coord).is_none()
    }

    /// Move the cursor one square, staying on the board
    pub fn move_cursor(&mut self, axis: Axis, delta: isize) {
        if let Some(next) = self.cursor.step(axis, delta) {
            self.cursor = next;
        }
    }

    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.perpendicular();
    }

    /// Lay a rack tile showing `letter` at the cursor. A blank stands in
    /// when no lettered tile matches.
    pub fn on_char(&mut self, letter: char) {
        if self.round_ended {
            return;
        }
        let letter = letter.to_ascii_uppercase();
        if !letter.is_ascii_alphabetic() {
            return;
        }

        let Some(square) = self.next_free_square(self.cursor) else {
            self.feedback = "No room in that direction".to_string();
            return;
        };
        let index = self
            .rack
            .iter()
            .position(|t| !t.is_blank && t.letter == Some(letter))
            .or_else(|| self.rack.iter().position(|t| t.is_blank));
        let Some(index) = index else {
            self.feedback = format!("No {} on your rack", letter);
            return;
        };

        let tile = self.rack.remove(index).assign(letter);
        self.pending.push(tile.place(square));
        self.feedback.clear();
        self.cursor = square;
        if let Some(next) = square.step(self.direction, 1) {
            self.cursor = self.next_free_square(next).unwrap_or(next);
        }
    }

    /// First free square from `from` onwards in the cursor direction
    fn next_free_square(&self, from: Coord) -> Option<Coord> {
        let mut cursor = Some(from);
        while let Some(coord) = cursor {
            if self.is_free(coord) {
                return Some(coord);
            }
            cursor = coord.step(self.direction, 1);
        }
        None
    }

    /// Take back the last laid tile
    pub fn on_backspace(&mut self) {
        if self.round_ended {
            return;
        }
        if let Some(placed) = self.pending.pop() {
            self.cursor = placed.coord;
            self.rack.push(unassigned(placed.tile));
            self.feedback.clear();
        }
    }

    /// Take back every laid tile
    pub fn recall(&mut self) {
        if let Some(first) = self.pending.first() {
            self.cursor = first.coord;
        }
        for placed in self.pending.drain(..) {
            self.rack.push(unassigned(placed.tile));
        }
    }

    /// Submit the laid tiles
    pub fn on_submit(&mut self) {
        if self.round_ended || self.pending.is_empty() {
            return;
        }
        self.submissions += 1;
        let outcome = self.session.submit(&self.pending, self.lexicon.as_ref());
        self.feedback = outcome.message();

        match outcome {
            SubmitOutcome::Found { .. } => {
                self.recall();
                self.hints.clear();
                if self.session.is_complete() {
                    self.end_round("ALL FOUND!");
                }
            }
            SubmitOutcome::AlreadyFound { .. } | SubmitOutcome::NotTopMove { .. } => self.recall(),
            SubmitOutcome::Invalid(_)
            | SubmitOutcome::NoWords
            | SubmitOutcome::UnknownWords(_)
            | SubmitOutcome::RoundOver => {}
        }
    }

    /// Reveal the next hint tier (1 anchor, 2 length, 3 letters)
    pub fn on_hint(&mut self, tier: u8) {
        if self.round_ended {
            return;
        }
        let reveal = match tier {
            1 => self.session.reveal_anchor().map(HintReveal::Anchor),
            2 => self.session.reveal_length().map(HintReveal::Length),
            3 => self.session.reveal_letters().map(HintReveal::Letters),
            _ => None,
        };
        match reveal {
            Some(hint) => {
                let same_tier = |h: &HintReveal| {
                    std::mem::discriminant(h) == std::mem::discriminant(&hint)
                };
                if !self.hints.iter().any(same_tier) {
                    self.hints.push(hint);
                }
            }
            None => self.feedback = "No hint available".to_string(),
        }
    }

    /// Update the timer and trigger end-of-round when it hits zero
    pub fn tick(&mut self) {
        if self.time_remaining > 0 {
            self.time_remaining -= 1;
            if self.time_remaining == 0 {
                self.end_round("TIME'S UP!");
            }
        }
    }

    /// Check if the round is over
    pub fn is_round_over(&self) -> bool {
        self.round_ended
    }

    fn end_round(&mut self, message: &str) {
        self.recall();
        self.round_ended = true;
        self.session.end();
        self.feedback = message.to_string();
    }

    /// Generate end-of-round summary
    pub fn round_summary(&self) -> RoundSummary {
        let puzzle = self.puzzle();
        let (found, missed) = puzzle
            .top_moves
            .iter()
            .enumerate()
            .partition::<Vec<_>, _>(|(i, _)| self.session.is_found(*i));
        RoundSummary {
            total_score: self.score(),
            max_score: puzzle.max_score(),
            found: found.into_iter().map(|(_, m)| m.clone()).collect(),
            missed: missed.into_iter().map(|(_, m)| m.clone()).collect(),
            submissions: self.submissions,
        }
    }
}

/// A blank goes back to the rack without its letter.
fn unassigned(tile: Tile) -> Tile {
    if tile.is_blank {
        Tile::blank()
    } else {
        tile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::BotMove;
    use crate::game::board::tests::{lay, placements};
    use crate::game::board::Board;
    use crate::game::scoring::score_move;
    use crate::game::tiles::Rack;
    use crate::game::words::{find_new_words, Word};

    fn top(board: &Board, word: &str, start: Coord, axis: Axis) -> TopMove {
        let tiles = placements(word, start, axis);
        let formed = find_new_words(board, &tiles);
        let score = score_move(&formed, &tiles);
        let texts = formed.iter().map(Word::text).collect();
        TopMove::from(&BotMove::new(tiles, texts, score))
    }

    /// Board with CAT across the centre; rack S A T O and a blank
    fn app(duration: u32) -> App {
        let mut board = Board::new();
        lay(&mut board, "CAT", Coord::new(7, 6), Axis::Horizontal);
        let top_moves = vec![
            top(&board, "S", Coord::new(7, 9), Axis::Horizontal),
            top(&board, "AT", Coord::new(8, 6), Axis::Horizontal),
        ];
        let puzzle = Puzzle {
            id: "rush-00000000000000aa".to_string(),
            board,
            rack: Rack::from_letters("SATO?"),
            top_moves,
            fallback: false,
        };
        let words = ["CAT", "CATS", "AT", "CA", "SCAT", "TO"];
        let lexicon = move |w: &str| words.iter().any(|x| *x == w);
        App::new(puzzle, Box::new(lexicon), duration)
    }

    #[test]
    fn test_default_round_duration() {
        assert_eq!(DEFAULT_ROUND_DURATION, 90);
        let a = app(DEFAULT_ROUND_DURATION);
        assert_eq!(a.time_remaining, 90);
        assert_eq!(a.cursor, CENTER);
    }

    #[test]
    fn test_timer_countdown() {
        let mut a = app(3);
        a.tick();
        a.tick();
        assert_eq!(a.time_remaining, 1);
        assert!(!a.is_round_over());

        a.tick();
        assert_eq!(a.time_remaining, 0);
        assert!(a.is_round_over());
        assert_eq!(a.feedback, "TIME'S UP!");

        a.tick();
        assert_eq!(a.time_remaining, 0);
    }

    #[test]
    fn test_typing_skips_occupied_squares() {
        let mut a = app(60);
        // Cursor on the A of CAT: the S lands after the T
        a.cursor = Coord::new(7, 7);
        a.on_char('s');
        assert_eq!(a.pending().len(), 1);
        assert_eq!(a.pending()[0].coord, Coord::new(7, 9));
        assert_eq!(a.cursor, Coord::new(7, 10));
        assert_eq!(a.rack().len(), 4);
    }

    #[test]
    fn test_find_top_move_scores_and_recalls() {
        let mut a = app(60);
        a.cursor = Coord::new(7, 9);
        a.on_char('S');
        a.on_submit();

        assert_eq!(a.score(), 6);
        assert!(a.feedback.starts_with("OK"));
        assert!(a.pending().is_empty());
        assert_eq!(a.rack().len(), 5);
    }

    #[test]
    fn test_resubmit_does_not_double_score() {
        let mut a = app(60);
        for _ in 0..2 {
            a.cursor = Coord::new(7, 9);
            a.on_char('S');
            a.on_submit();
        }
        assert_eq!(a.score(), 6);
        assert!(a.feedback.starts_with("Already found"));
    }

    #[test]
    fn test_invalid_move_keeps_tiles() {
        let mut a = app(60);
        a.cursor = Coord::new(0, 0);
        a.on_char('T');
        a.on_submit();
        assert_eq!(a.pending().len(), 1);
        assert_eq!(a.feedback, "Tiles must touch a tile already on the board");
    }

    #[test]
    fn test_blank_used_when_letter_missing() {
        let mut a = app(60);
        a.cursor = Coord::new(7, 9);
        a.on_char('Z');
        let placed = a.pending()[0];
        assert!(placed.tile.is_blank);
        assert_eq!(placed.letter(), 'Z');

        a.on_backspace();
        assert!(a.pending().is_empty());
        assert!(a.rack().iter().any(|t| t.is_blank && t.letter.is_none()));
        assert_eq!(a.cursor, Coord::new(7, 9));
    }

    #[test]
    fn test_no_tile_for_letter() {
        let mut a = app(60);
        a.on_char('?');
        a.cursor = Coord::new(7, 9);
        a.on_char('Z');
        a.on_char('Q');
        assert_eq!(a.pending().len(), 1);
        assert_eq!(a.feedback, "No Q on your rack");
    }

    #[test]
    fn test_vertical_direction() {
        let mut a = app(60);
        a.toggle_direction();
        a.cursor = Coord::new(8, 6);
        a.on_char('A');
        assert_eq!(a.cursor, Coord::new(9, 6));
    }

    #[test]
    fn test_recall_returns_everything() {
        let mut a = app(60);
        a.cursor = Coord::new(8, 6);
        a.on_char('A');
        a.on_char('T');
        a.recall();
        assert!(a.pending().is_empty());
        assert_eq!(a.rack().len(), 5);
        assert_eq!(a.cursor, Coord::new(8, 6));
    }

    #[test]
    fn test_input_locked_when_round_over() {
        let mut a = app(1);
        a.cursor = Coord::new(7, 9);
        a.on_char('S');
        a.tick();
        assert!(a.is_round_over());
        // Round end recalls unsubmitted tiles
        assert!(a.pending().is_empty());

        a.on_char('S');
        assert!(a.pending().is_empty());
        a.on_hint(1);
        assert!(a.hints().is_empty());
    }

    #[test]
    fn test_hints_revealed_once_per_tier() {
        let mut a = app(60);
        a.on_hint(1);
        a.on_hint(1);
        a.on_hint(3);
        assert_eq!(
            a.hints(),
            &[
                HintReveal::Anchor(Coord::new(7, 9)),
                HintReveal::Letters(vec!['S'])
            ]
        );
        assert_eq!(a.hints()[0].label(), "Starts at 7,9");
    }

    #[test]
    fn test_any_find_clears_hints_in_app_and_session() {
        let mut a = app(60);
        a.on_hint(1);
        a.on_hint(2);
        assert_eq!(a.hints().len(), 2);

        // AT is not the hint target (S is)
        a.cursor = Coord::new(8, 6);
        a.on_char('A');
        a.on_char('T');
        a.on_submit();

        assert!(a.feedback.starts_with("OK"));
        assert!(a.hints().is_empty());
        assert_eq!(a.session().hints(), crate::rush::Hints::default());
    }

    #[test]
    fn test_finding_everything_ends_round() {
        let mut a = app(60);
        a.cursor = Coord::new(7, 9);
        a.on_char('S');
        a.on_submit();
        a.cursor = Coord::new(8, 6);
        a.on_char('A');
        a.on_char('T');
        a.on_submit();

        assert!(a.is_round_over());
        assert_eq!(a.feedback, "ALL FOUND!");
        let summary = a.round_summary();
        assert_eq!(summary.found.len(), 2);
        assert!(summary.missed.is_empty());
        assert_eq!(summary.total_score, summary.max_score);
        assert_eq!(summary.submissions, 2);
    }

    #[test]
    fn test_quit() {
        let mut a = app(60);
        a.quit();
        assert!(a.should_quit);
    }
}
