//! Words formed by a move
//!
//! Only words that contain at least one newly placed tile are reported.
//! Words already on the board that the move does not touch are never
//! returned, so they are never scored twice.

use super::board::{Axis, Board, Coord, PlacedTile};
use super::tiles::Tile;
use std::collections::HashMap;

/// One square of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCell {
    pub coord: Coord,
    pub tile: Tile,
    /// Placed by the move being evaluated
    pub is_new: bool,
}

/// A run of two or more letters in one row or column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub axis: Axis,
    pub cells: Vec<WordCell>,
}

impl Word {
    /// The letters of the word.
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.tile.glyph()).collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Option<Coord> {
        self.cells.first().map(|c| c.coord)
    }

    pub fn new_tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_new).count()
    }
}

/// Every word the pending tiles form on `board`.
///
/// The main word (along the move's own line) comes first, followed by one
/// cross word per pending tile where one exists. A single tile is treated
/// as a horizontal move, so both of its words are still found. Tiles that
/// do not share a row or column form no words.
pub fn find_new_words(board: &Board, pending: &[PlacedTile]) -> Vec<Word> {
    let Some(axis) = Axis::of(pending) else {
        return Vec::new();
    };
    let overlay: HashMap<Coord, Tile> = pending.iter().map(|t| (t.coord, t.tile)).collect();

    let mut words = Vec::new();
    if let Some(main) = word_through(board, &overlay, pending[0].coord, axis) {
        words.push(main);
    }
    let cross_axis = axis.perpendicular();
    for t in pending {
        if let Some(cross) = word_through(board, &overlay, t.coord, cross_axis) {
            words.push(cross);
        }
    }
    words
}

/// The maximal run through `origin` along `axis`, if it is at least two
/// letters long.
fn word_through(
    board: &Board,
    overlay: &HashMap<Coord, Tile>,
    origin: Coord,
    axis: Axis,
) -> Option<Word> {
    let cell = |coord: Coord| -> Option<WordCell> {
        if let Some(tile) = overlay.get(&coord) {
            Some(WordCell {
                coord,
                tile: *tile,
                is_new: true,
            })
        } else {
            board.get(coord).map(|placed| WordCell {
                coord,
                tile: placed.tile,
                is_new: false,
            })
        }
    };

    let mut start = origin;
    while let Some(prev) = start.step(axis, -1) {
        if cell(prev).is_none() {
            break;
        }
        start = prev;
    }

    let mut cells = Vec::new();
    let mut cursor = Some(start);
    while let Some(coord) = cursor {
        match cell(coord) {
            Some(c) => cells.push(c),
            None => break,
        }
        cursor = coord.step(axis, 1);
    }

    if cells.len() < 2 || !cells.iter().any(|c| c.is_new) {
        return None;
    }
    Some(Word { axis, cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::tests::{lay, placements};
    use crate::game::board::CENTER;

    fn tile(c: char, row: usize, col: usize) -> PlacedTile {
        Tile::for_letter(c).place(Coord::new(row, col))
    }

    fn texts(words: &[Word]) -> Vec<String> {
        words.iter().map(Word::text).collect()
    }

    #[test]
    fn test_opening_word() {
        let tiles = placements("CAT", Coord::new(7, 6), Axis::Horizontal);
        let words = find_new_words(&Board::new(), &tiles);
        assert_eq!(texts(&words), vec!["CAT"]);
        assert_eq!(words[0].new_tile_count(), 3);
    }

    #[test]
    fn test_extension_reports_whole_word_not_original() {
        let mut board = Board::new();
        lay(&mut board, "CAT", Coord::new(7, 6), Axis::Horizontal);

        let words = find_new_words(&board, &[tile('S', 7, 9)]);
        assert_eq!(texts(&words), vec!["CATS"]);
        assert_eq!(words[0].len(), 4);
        assert_eq!(words[0].new_tile_count(), 1);
    }

    #[test]
    fn test_untouched_words_not_reported() {
        let mut board = Board::new();
        lay(&mut board, "CAT", Coord::new(7, 6), Axis::Horizontal);
        lay(&mut board, "DOG", Coord::new(3, 3), Axis::Horizontal);

        let words = find_new_words(&board, &[tile('S', 7, 9)]);
        assert_eq!(texts(&words), vec!["CATS"]);
    }

    #[test]
    fn test_cross_words() {
        let mut board = Board::new();
        lay(&mut board, "CAT", Coord::new(7, 6), Axis::Horizontal);

        // "AT" laid under "CA" forms AT plus CA and AT downwards
        let tiles = placements("AT", Coord::new(8, 6), Axis::Horizontal);
        let words = find_new_words(&board, &tiles);
        assert_eq!(texts(&words), vec!["AT", "CA", "AT"]);
        for word in &words {
            assert!(word.cells.iter().any(|c| c.is_new));
        }
        assert_eq!(words[1].axis, Axis::Vertical);
    }

    #[test]
    fn test_single_tile_finds_both_directions() {
        let mut board = Board::new();
        lay(&mut board, "CAT", Coord::new(7, 6), Axis::Horizontal);
        lay(&mut board, "OX", Coord::new(8, 10), Axis::Horizontal);

        // S at (7,9): CATS across; nothing above, so no word down
        let words = find_new_words(&board, &[tile('S', 7, 9)]);
        assert_eq!(texts(&words), vec!["CATS"]);

        // T and O stacked above the O of OX read TOO downwards
        let words = find_new_words(&board, &[tile('T', 6, 10), tile('O', 7, 10)]);
        assert_eq!(texts(&words), vec!["TOO"]);
    }

    #[test]
    fn test_single_isolated_tile_forms_no_word() {
        let words = find_new_words(&Board::new(), &[tile('A', CENTER.row, CENTER.col)]);
        assert!(words.is_empty());
    }

    #[test]
    fn test_non_collinear_input_forms_no_words() {
        let tiles = vec![tile('A', 7, 7), tile('B', 8, 8)];
        assert!(find_new_words(&Board::new(), &tiles).is_empty());
    }

    #[test]
    fn test_blank_shows_assigned_letter() {
        let tiles = vec![
            tile('C', 7, 6),
            Tile::blank().assign('A').place(Coord::new(7, 7)),
            tile('T', 7, 8),
        ];
        let words = find_new_words(&Board::new(), &tiles);
        assert_eq!(texts(&words), vec!["CAT"]);
        assert!(words[0].cells[1].tile.is_blank);
    }
}
