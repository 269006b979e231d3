//! Tiles, the letter bag, and player racks
//!
//! The bag holds the standard 100-tile English distribution (98 lettered
//! tiles plus 2 blanks). Shuffling always goes through a caller-supplied
//! RNG so that games and puzzles can be replayed from a seed.

use super::board::{Coord, PlacedTile};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Nominal rack capacity
pub const RACK_SIZE: usize = 7;

/// Standard tile distribution: (letter, count, points).
const DISTRIBUTION: [(char, usize, u32); 26] = [
    ('A', 9, 1),
    ('B', 2, 3),
    ('C', 2, 3),
    ('D', 4, 2),
    ('E', 12, 1),
    ('F', 2, 4),
    ('G', 3, 2),
    ('H', 2, 4),
    ('I', 9, 1),
    ('J', 1, 8),
    ('K', 1, 5),
    ('L', 4, 1),
    ('M', 2, 3),
    ('N', 6, 1),
    ('O', 8, 1),
    ('P', 2, 3),
    ('Q', 1, 10),
    ('R', 6, 1),
    ('S', 4, 1),
    ('T', 6, 1),
    ('U', 4, 1),
    ('V', 2, 4),
    ('W', 2, 4),
    ('X', 1, 8),
    ('Y', 2, 4),
    ('Z', 1, 10),
];

const BLANK_COUNT: usize = 2;

/// Face value of a letter in the standard distribution (0 for anything else).
pub fn letter_points(letter: char) -> u32 {
    let upper = letter.to_ascii_uppercase();
    DISTRIBUTION
        .iter()
        .find(|(c, _, _)| *c == upper)
        .map(|(_, _, points)| *points)
        .unwrap_or(0)
}

/// A single tile. Blanks carry no letter until they are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub letter: Option<char>,
    pub points: u32,
    #[serde(default)]
    pub is_blank: bool,
}

impl Tile {
    /// A lettered tile with an explicit point value.
    pub fn new(letter: char, points: u32) -> Self {
        Self {
            letter: Some(letter.to_ascii_uppercase()),
            points,
            is_blank: false,
        }
    }

    /// A lettered tile worth its standard face value.
    pub fn for_letter(letter: char) -> Self {
        Self::new(letter, letter_points(letter))
    }

    /// An unassigned blank.
    pub fn blank() -> Self {
        Self {
            letter: None,
            points: 0,
            is_blank: true,
        }
    }

    /// Assign a letter to a blank. Lettered tiles are returned unchanged.
    pub fn assign(self, letter: char) -> Self {
        if self.is_blank {
            Self {
                letter: Some(letter.to_ascii_uppercase()),
                ..self
            }
        } else {
            self
        }
    }

    /// Points this tile contributes to a word. Blanks are always worth 0.
    pub fn score(&self) -> u32 {
        if self.is_blank {
            0
        } else {
            self.points
        }
    }

    /// Put the tile on a square.
    pub fn place(self, coord: Coord) -> PlacedTile {
        PlacedTile { tile: self, coord }
    }

    /// Whether this rack tile can be the source of a placed tile.
    pub fn matches_placed(&self, placed: &Tile) -> bool {
        if placed.is_blank {
            self.is_blank
        } else {
            !self.is_blank && self.letter == placed.letter
        }
    }

    /// Display glyph: the letter, or `?` for an unassigned blank.
    pub fn glyph(&self) -> char {
        self.letter.unwrap_or('?')
    }
}

/// The tiles of `rack` left over once `placed` has been taken from it.
///
/// Placed blanks consume a blank from the rack whatever letter they were
/// assigned; lettered tiles consume the first rack tile with that letter.
pub fn remaining_after(rack: &[Tile], placed: &[PlacedTile]) -> Vec<Tile> {
    let mut remaining = rack.to_vec();
    for p in placed {
        if let Some(pos) = remaining.iter().position(|t| t.matches_placed(&p.tile)) {
            remaining.remove(pos);
        }
    }
    remaining
}

/// The bag tiles are drawn from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileBag {
    tiles: Vec<Tile>,
}

impl TileBag {
    /// The full 100-tile distribution in letter order.
    pub fn standard() -> Self {
        let mut tiles = Vec::with_capacity(100);
        for (letter, count, points) in DISTRIBUTION {
            tiles.extend(std::iter::repeat(Tile::new(letter, points)).take(count));
        }
        tiles.extend(std::iter::repeat(Tile::blank()).take(BLANK_COUNT));
        Self { tiles }
    }

    /// A freshly shuffled full bag.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bag = Self::standard();
        bag.shuffle(rng);
        bag
    }

    /// Build a bag from explicit tiles (drawn front first).
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles.shuffle(rng);
    }

    /// Draw up to `count` tiles from the front of the bag.
    pub fn draw(&mut self, count: usize) -> Vec<Tile> {
        let count = count.min(self.tiles.len());
        self.tiles.drain(..count).collect()
    }

    /// Remove the first non-blank tile showing `letter`.
    pub fn take_letter(&mut self, letter: char) -> Option<Tile> {
        let upper = letter.to_ascii_uppercase();
        let pos = self
            .tiles
            .iter()
            .position(|t| !t.is_blank && t.letter == Some(upper))?;
        Some(self.tiles.remove(pos))
    }

    /// Remove a blank, if any remain.
    pub fn take_blank(&mut self) -> Option<Tile> {
        let pos = self.tiles.iter().position(|t| t.is_blank)?;
        Some(self.tiles.remove(pos))
    }

    /// Whether every letter of `letters` can be taken, using blanks for
    /// letters that have run out.
    pub fn can_supply(&self, letters: &[char]) -> bool {
        let mut available = self.tiles.clone();
        letters.iter().all(|&c| {
            let upper = c.to_ascii_uppercase();
            let pos = available
                .iter()
                .position(|t| !t.is_blank && t.letter == Some(upper))
                .or_else(|| available.iter().position(|t| t.is_blank));
            match pos {
                Some(pos) => {
                    available.remove(pos);
                    true
                }
                None => false,
            }
        })
    }

    /// Put tiles back at the front of the bag, so they are drawn next.
    pub fn return_tiles(&mut self, tiles: Vec<Tile>) {
        self.tiles.splice(0..0, tiles);
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

/// A player's rack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    tiles: Vec<Tile>,
}

impl Rack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Build a rack from a letter string; `?` or `_` stands for a blank.
    pub fn from_letters(letters: &str) -> Self {
        let tiles = letters
            .chars()
            .filter_map(|c| match c {
                '?' | '_' => Some(Tile::blank()),
                c if c.is_ascii_alphabetic() => Some(Tile::for_letter(c)),
                _ => None,
            })
            .collect();
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tiles.len() >= RACK_SIZE
    }

    /// Top the rack up to capacity. Returns how many tiles were drawn.
    pub fn refill_from(&mut self, bag: &mut TileBag) -> usize {
        let needed = RACK_SIZE.saturating_sub(self.tiles.len());
        let drawn = bag.draw(needed);
        let count = drawn.len();
        self.tiles.extend(drawn);
        count
    }

    /// Remove the tiles a committed move used.
    pub fn remove_placed(&mut self, placed: &[PlacedTile]) {
        self.tiles = remaining_after(&self.tiles, placed);
    }

    /// Tiles left if `placed` were played, without touching the rack.
    pub fn remaining_after(&self, placed: &[PlacedTile]) -> Vec<Tile> {
        remaining_after(&self.tiles, placed)
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles.shuffle(rng);
    }

    /// Display the rack as a string, blanks shown as `?`.
    pub fn as_string(&self) -> String {
        self.tiles.iter().map(Tile::glyph).collect()
    }
}

/// The game can end once the bag is empty and some player has emptied
/// their rack.
pub fn can_end_game(racks: &[Rack], bag: &TileBag) -> bool {
    bag.is_empty() && racks.iter().any(Rack::is_empty)
}

/// Points deducted for tiles left on a rack at the end of the game.
pub fn end_game_penalty(rack: &Rack) -> u32 {
    rack.tiles().iter().map(|t| t.points).sum()
}
