//! Board model: a sparse coordinate→tile map over a 15x15 grid
//!
//! Tiles are kept in a `BTreeMap` so that iteration (and therefore anchor
//! order during move search) is stable for a given board.

use super::layout::{bonus_at, Bonus};
use super::tiles::Tile;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Width and height of the board
pub const BOARD_SIZE: usize = 15;

/// The centre square every opening move must cover
pub const CENTER: Coord = Coord { row: 7, col: 7 };

/// A square on the board, 0-indexed. Ordered by row, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Move `delta` squares along `axis`. `None` when that leaves the board.
    pub fn step(&self, axis: Axis, delta: isize) -> Option<Coord> {
        let (row, col) = match axis {
            Axis::Horizontal => (self.row as isize, self.col as isize + delta),
            Axis::Vertical => (self.row as isize + delta, self.col as isize),
        };
        if row < 0 || col < 0 {
            return None;
        }
        let next = Coord::new(row as usize, col as usize);
        next.in_bounds().then_some(next)
    }

    /// Position along an axis (column for horizontal, row for vertical).
    pub fn along(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.col,
            Axis::Vertical => self.row,
        }
    }

    /// In-bounds orthogonal neighbours.
    pub fn neighbors(&self) -> impl Iterator<Item = Coord> + '_ {
        [
            (Axis::Vertical, -1),
            (Axis::Vertical, 1),
            (Axis::Horizontal, -1),
            (Axis::Horizontal, 1),
        ]
        .into_iter()
        .filter_map(move |(axis, delta)| self.step(axis, delta))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Direction a move is laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// The axis shared by every tile, or `None` if the tiles span more than
    /// one row and more than one column. A single tile reads as horizontal.
    pub fn of(tiles: &[PlacedTile]) -> Option<Axis> {
        let first = tiles.first()?;
        if tiles.iter().all(|t| t.coord.row == first.coord.row) {
            Some(Axis::Horizontal)
        } else if tiles.iter().all(|t| t.coord.col == first.coord.col) {
            Some(Axis::Vertical)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::Horizontal => "across",
            Axis::Vertical => "down",
        }
    }
}

/// A tile sitting on (or proposed for) a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedTile {
    #[serde(flatten)]
    pub tile: Tile,
    #[serde(flatten)]
    pub coord: Coord,
}

impl PlacedTile {
    pub fn letter(&self) -> char {
        self.tile.glyph()
    }
}

/// Errors when committing tiles to a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("square {0} is off the board")]
    OutOfBounds(Coord),
    #[error("square {0} is already occupied")]
    Occupied(Coord),
}

/// Canonical identity of a set of placements: tiles sorted by (row, col)
/// and joined as `row,col,letter` with `|`. A blank shows its letter in
/// lower case, so a blank move never shares a key with the real-tile one.
pub fn move_key(tiles: &[PlacedTile]) -> String {
    let mut sorted: Vec<&PlacedTile> = tiles.iter().collect();
    sorted.sort_by_key(|t| t.coord);
    sorted
        .iter()
        .map(|t| {
            let letter = if t.tile.is_blank {
                t.letter().to_ascii_lowercase()
            } else {
                t.letter()
            };
            format!("{},{},{}", t.coord.row, t.coord.col, letter)
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Committed tiles, keyed by square.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PlacedTile>", into = "Vec<PlacedTile>")]
pub struct Board {
    tiles: BTreeMap<Coord, PlacedTile>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn get(&self, coord: Coord) -> Option<&PlacedTile> {
        self.tiles.get(&coord)
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.tiles.contains_key(&coord)
    }

    /// Letter on a square, if any.
    pub fn letter_at(&self, coord: Coord) -> Option<char> {
        self.get(coord).map(PlacedTile::letter)
    }

    /// Committed tiles in (row, col) order.
    pub fn tiles(&self) -> impl Iterator<Item = &PlacedTile> {
        self.tiles.values()
    }

    /// Bonus printed on a square.
    pub fn bonus(&self, coord: Coord) -> Option<Bonus> {
        bonus_at(coord)
    }

    /// Commit tiles. Either every tile lands or none does.
    pub fn commit(&mut self, tiles: &[PlacedTile]) -> Result<(), BoardError> {
        let mut incoming = BTreeSet::new();
        for t in tiles {
            if !t.coord.in_bounds() {
                return Err(BoardError::OutOfBounds(t.coord));
            }
            if self.is_occupied(t.coord) || !incoming.insert(t.coord) {
                return Err(BoardError::Occupied(t.coord));
            }
        }
        for t in tiles {
            self.tiles.insert(t.coord, *t);
        }
        Ok(())
    }

    /// Empty squares orthogonally adjacent to an occupied square.
    pub fn anchors(&self) -> Vec<Coord> {
        let mut anchors = BTreeSet::new();
        for coord in self.tiles.keys() {
            for n in coord.neighbors() {
                if !self.is_occupied(n) {
                    anchors.insert(n);
                }
            }
        }
        anchors.into_iter().collect()
    }
}

impl From<Vec<PlacedTile>> for Board {
    fn from(tiles: Vec<PlacedTile>) -> Self {
        Self {
            tiles: tiles.into_iter().map(|t| (t.coord, t)).collect(),
        }
    }
}

impl From<Board> for Vec<PlacedTile> {
    fn from(board: Board) -> Self {
        board.tiles.into_values().collect()
    }
}
