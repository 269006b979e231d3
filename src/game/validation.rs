//! Placement validation
//!
//! Checks a candidate move against the board:
//! - At least one tile
//! - All tiles in one row or one column
//! - No empty gap along that line
//! - Opening move covers the centre
//! - Later moves touch an existing tile
//!
//! Every rule is evaluated so that all violations can be shown at once.
//! Dictionary lookups are not part of placement validation.

use super::board::{Axis, Board, Coord, PlacedTile, CENTER};
use std::collections::HashSet;

/// A rule a candidate move broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// No tiles were placed
    EmptyMove,
    /// Tiles span more than one row and more than one column
    NotInLine,
    /// The line of tiles has an empty square in it
    Gap,
    /// Opening move does not cover the centre square
    MissingCenter,
    /// Move does not touch any tile already on the board
    NotConnected,
    /// A tile lies off the board
    OutOfBounds { coord: Coord },
    /// A tile was placed on an occupied square
    Occupied { coord: Coord },
    /// Two tiles were placed on the same square
    DuplicateCell { coord: Coord },
    /// A blank was placed without choosing its letter
    UnassignedBlank { coord: Coord },
}

impl PlacementError {
    /// Stable identifier for the rule.
    pub fn code(&self) -> &'static str {
        match self {
            PlacementError::EmptyMove => "empty_move",
            PlacementError::NotInLine => "not_in_line",
            PlacementError::Gap => "gap",
            PlacementError::MissingCenter => "missing_center",
            PlacementError::NotConnected => "not_connected",
            PlacementError::OutOfBounds { .. } => "out_of_bounds",
            PlacementError::Occupied { .. } => "occupied",
            PlacementError::DuplicateCell { .. } => "duplicate_cell",
            PlacementError::UnassignedBlank { .. } => "unassigned_blank",
        }
    }

    /// Returns a user-friendly error message
    pub fn message(&self) -> String {
        match self {
            PlacementError::EmptyMove => "Place at least one tile".to_string(),
            PlacementError::NotInLine => "Tiles must be in a single row or column".to_string(),
            PlacementError::Gap => "Tiles must form one unbroken line".to_string(),
            PlacementError::MissingCenter => "First move must cover the centre square".to_string(),
            PlacementError::NotConnected => "Tiles must touch a tile already on the board".to_string(),
            PlacementError::OutOfBounds { coord } => format!("Square {} is off the board", coord),
            PlacementError::Occupied { coord } => format!("Square {} is already taken", coord),
            PlacementError::DuplicateCell { coord } => format!("Two tiles on square {}", coord),
            PlacementError::UnassignedBlank { coord } => {
                format!("Blank on square {} has no letter", coord)
            }
        }
    }
}

/// Outcome of validating a candidate move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub errors: Vec<PlacementError>,
}

impl Validation {
    /// Returns true if no rule was broken
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code() == code)
    }

    /// Message for the first broken rule, if any
    pub fn first_message(&self) -> Option<String> {
        self.errors.first().map(PlacementError::message)
    }
}

/// Validate a candidate move against the current board.
pub fn validate(board: &Board, tiles: &[PlacedTile]) -> Validation {
    let mut errors = Vec::new();

    if tiles.is_empty() {
        errors.push(PlacementError::EmptyMove);
        return Validation { errors };
    }

    let mut seen = HashSet::new();
    for t in tiles {
        if !t.coord.in_bounds() {
            errors.push(PlacementError::OutOfBounds { coord: t.coord });
        } else if board.is_occupied(t.coord) {
            errors.push(PlacementError::Occupied { coord: t.coord });
        }
        if !seen.insert(t.coord) {
            errors.push(PlacementError::DuplicateCell { coord: t.coord });
        }
        if t.tile.letter.is_none() {
            errors.push(PlacementError::UnassignedBlank { coord: t.coord });
        }
    }

    let axis = Axis::of(tiles);
    let mut bridges_existing = false;
    match axis {
        None => errors.push(PlacementError::NotInLine),
        Some(axis) => match run_is_contiguous(board, tiles, axis, &seen) {
            Some(touched) => bridges_existing = touched,
            None => errors.push(PlacementError::Gap),
        },
    }

    if board.is_empty() {
        if !seen.contains(&CENTER) {
            errors.push(PlacementError::MissingCenter);
        }
    } else {
        let adjacent = tiles
            .iter()
            .any(|t| t.coord.neighbors().any(|n| board.is_occupied(n)));
        if !adjacent && !bridges_existing {
            errors.push(PlacementError::NotConnected);
        }
    }

    Validation { errors }
}

/// Walk from the first to the last tile along `axis`. `None` if an empty
/// square interrupts the run, otherwise whether the run passed over
/// existing board tiles.
fn run_is_contiguous(
    board: &Board,
    tiles: &[PlacedTile],
    axis: Axis,
    pending: &HashSet<Coord>,
) -> Option<bool> {
    let first = tiles.iter().map(|t| t.coord).min_by_key(|c| c.along(axis))?;
    let last = tiles.iter().map(|t| t.coord).max_by_key(|c| c.along(axis))?;
    let span = last.along(axis) - first.along(axis);

    let mut touched = false;
    for i in 0..=span {
        let Some(coord) = first.step(axis, i as isize) else {
            return None;
        };
        if pending.contains(&coord) {
            continue;
        }
        if board.is_occupied(coord) {
            touched = true;
        } else {
            return None;
        }
    }
    Some(touched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::tests::{lay, placements};
    use crate::game::tiles::Tile;

    fn tile(c: char, row: usize, col: usize) -> PlacedTile {
        Tile::for_letter(c).place(Coord::new(row, col))
    }

    #[test]
    fn test_opening_move_through_center_is_valid() {
        let board = Board::new();
        let tiles = placements("CAT", Coord::new(7, 6), Axis::Horizontal);
        assert!(validate(&board, &tiles).is_valid());

        let down = placements("CAT", Coord::new(5, 7), Axis::Vertical);
        assert!(validate(&board, &down).is_valid());
    }

    #[test]
    fn test_opening_move_off_center_fails() {
        let board = Board::new();
        let tiles = placements("CAT", Coord::new(3, 3), Axis::Horizontal);
        let result = validate(&board, &tiles);
        assert!(!result.is_valid());
        assert_eq!(result.errors, vec![PlacementError::MissingCenter]);
    }

    #[test]
    fn test_empty_move() {
        let result = validate(&Board::new(), &[]);
        assert_eq!(result.errors, vec![PlacementError::EmptyMove]);
    }

    #[test]
    fn test_single_tile_is_in_line() {
        let result = validate(&Board::new(), &[tile('A', 7, 7)]);
        assert!(result.is_valid());
    }

    #[test]
    fn test_diagonal_tiles_not_in_line() {
        let board = Board::new();
        let tiles = vec![tile('A', 7, 7), tile('B', 8, 8)];
        let result = validate(&board, &tiles);
        assert!(result.has("not_in_line"));
        assert!(!result.has("gap"));
    }

    #[test]
    fn test_all_violations_reported_together() {
        let mut board = Board::new();
        lay(&mut board, "CAT", Coord::new(7, 6), Axis::Horizontal);

        let tiles = vec![tile('A', 0, 0), tile('B', 2, 2)];
        let result = validate(&board, &tiles);
        assert!(result.has("not_in_line"));
        assert!(result.has("not_connected"));
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_gap_in_line() {
        let board = Board::new();
        let tiles = vec![tile('C', 7, 6), tile('A', 7, 7), tile('T', 7, 9)];
        let result = validate(&board, &tiles);
        assert_eq!(result.errors, vec![PlacementError::Gap]);
    }

    #[test]
    fn test_gap_filled_by_existing_tile() {
        let mut board = Board::new();
        lay(&mut board, "CAT", Coord::new(7, 6), Axis::Horizontal);

        // S_ _ on row 7: A at (7,5) and S at (7,9) bridge CAT
        let tiles = vec![tile('S', 7, 5), tile('S', 7, 9)];
        assert!(validate(&board, &tiles).is_valid());
    }

    #[test]
    fn test_disconnected_move() {
        let mut board = Board::new();
        lay(&mut board, "CAT", Coord::new(7, 6), Axis::Horizontal);

        let tiles = placements("DOG", Coord::new(1, 1), Axis::Horizontal);
        let result = validate(&board, &tiles);
        assert_eq!(result.errors, vec![PlacementError::NotConnected]);
    }

    #[test]
    fn test_adjacent_move_is_valid() {
        let mut board = Board::new();
        lay(&mut board, "CAT", Coord::new(7, 6), Axis::Horizontal);

        assert!(validate(&board, &[tile('S', 7, 9)]).is_valid());
        let under = placements("AT", Coord::new(8, 6), Axis::Horizontal);
        assert!(validate(&board, &under).is_valid());
    }

    #[test]
    fn test_occupied_and_duplicate_squares() {
        let mut board = Board::new();
        lay(&mut board, "CAT", Coord::new(7, 6), Axis::Horizontal);

        let result = validate(&board, &[tile('S', 7, 8)]);
        assert!(result.has("occupied"));

        let twice = vec![tile('S', 7, 9), tile('A', 7, 9)];
        assert!(validate(&board, &twice).has("duplicate_cell"));
    }

    #[test]
    fn test_unassigned_blank() {
        let tiles = vec![tile('C', 7, 6), Tile::blank().place(Coord::new(7, 7))];
        let result = validate(&Board::new(), &tiles);
        assert_eq!(
            result.errors,
            vec![PlacementError::UnassignedBlank {
                coord: Coord::new(7, 7)
            }]
        );
    }

    #[test]
    fn test_validate_does_not_mutate_board() {
        let mut board = Board::new();
        lay(&mut board, "CAT", Coord::new(7, 6), Axis::Horizontal);
        let before = board.clone();
        let _ = validate(&board, &[tile('S', 7, 9)]);
        assert_eq!(board, before);
    }

    #[test]
    fn test_message_format() {
        assert_eq!(
            PlacementError::MissingCenter.message(),
            "First move must cover the centre square"
        );
        assert_eq!(
            PlacementError::Occupied {
                coord: Coord::new(7, 8)
            }
            .message(),
            "Square 7,8 is already taken"
        );
    }
}
