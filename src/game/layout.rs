//! Bonus-square layout for the standard 15x15 board
//!
//! Built once on first use and shared read-only by the board and the
//! scorer. Each square carries at most one bonus.

use super::board::{Coord, CENTER};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Premium printed on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bonus {
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
    /// The centre star. Scores as a double word.
    Center,
}

impl Bonus {
    pub fn letter_multiplier(self) -> u32 {
        match self {
            Bonus::DoubleLetter => 2,
            Bonus::TripleLetter => 3,
            _ => 1,
        }
    }

    pub fn word_multiplier(self) -> u32 {
        match self {
            Bonus::DoubleWord | Bonus::Center => 2,
            Bonus::TripleWord => 3,
            _ => 1,
        }
    }

    /// Short label for rendering an empty square.
    pub fn label(self) -> &'static str {
        match self {
            Bonus::DoubleLetter => "2L",
            Bonus::TripleLetter => "3L",
            Bonus::DoubleWord => "2W",
            Bonus::TripleWord => "3W",
            Bonus::Center => "★",
        }
    }
}

const TRIPLE_WORD: [(usize, usize); 8] = [
    (0, 0),
    (0, 7),
    (0, 14),
    (7, 0),
    (7, 14),
    (14, 0),
    (14, 7),
    (14, 14),
];

const DOUBLE_WORD: [(usize, usize); 16] = [
    (1, 1),
    (1, 13),
    (2, 2),
    (2, 12),
    (3, 3),
    (3, 11),
    (4, 4),
    (4, 10),
    (10, 4),
    (10, 10),
    (11, 3),
    (11, 11),
    (12, 2),
    (12, 12),
    (13, 1),
    (13, 13),
];

const TRIPLE_LETTER: [(usize, usize); 12] = [
    (1, 5),
    (1, 9),
    (5, 1),
    (5, 5),
    (5, 9),
    (5, 13),
    (9, 1),
    (9, 5),
    (9, 9),
    (9, 13),
    (13, 5),
    (13, 9),
];

const DOUBLE_LETTER: [(usize, usize); 24] = [
    (0, 3),
    (0, 11),
    (2, 6),
    (2, 8),
    (3, 0),
    (3, 7),
    (3, 14),
    (6, 2),
    (6, 6),
    (6, 8),
    (6, 12),
    (7, 3),
    (7, 11),
    (8, 2),
    (8, 6),
    (8, 8),
    (8, 12),
    (11, 0),
    (11, 7),
    (11, 14),
    (12, 6),
    (12, 8),
    (14, 3),
    (14, 11),
];

static BONUS_SQUARES: Lazy<HashMap<Coord, Bonus>> = Lazy::new(|| {
    let groups: [(&[(usize, usize)], Bonus); 4] = [
        (&TRIPLE_WORD, Bonus::TripleWord),
        (&DOUBLE_WORD, Bonus::DoubleWord),
        (&TRIPLE_LETTER, Bonus::TripleLetter),
        (&DOUBLE_LETTER, Bonus::DoubleLetter),
    ];
    let mut squares = HashMap::with_capacity(61);
    for (cells, bonus) in groups {
        for &(row, col) in cells {
            squares.insert(Coord::new(row, col), bonus);
        }
    }
    squares.insert(CENTER, Bonus::Center);
    squares
});

/// Bonus on a square, if it has one.
pub fn bonus_at(coord: Coord) -> Option<Bonus> {
    BONUS_SQUARES.get(&coord).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::BOARD_SIZE;

    #[test]
    fn test_bonus_counts() {
        let count = |wanted: Bonus| BONUS_SQUARES.values().filter(|b| **b == wanted).count();
        assert_eq!(count(Bonus::TripleWord), 8);
        assert_eq!(count(Bonus::DoubleWord), 16);
        assert_eq!(count(Bonus::TripleLetter), 12);
        assert_eq!(count(Bonus::DoubleLetter), 24);
        assert_eq!(count(Bonus::Center), 1);
    }

    #[test]
    fn test_layout_is_symmetric() {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let here = bonus_at(Coord::new(row, col));
                assert_eq!(here, bonus_at(Coord::new(col, row)), "transpose at {row},{col}");
                assert_eq!(
                    here,
                    bonus_at(Coord::new(BOARD_SIZE - 1 - row, col)),
                    "mirror at {row},{col}"
                );
            }
        }
    }

    #[test]
    fn test_center_scores_as_double_word() {
        let center = bonus_at(CENTER).expect("centre has a bonus");
        assert_eq!(center.word_multiplier(), 2);
        assert_eq!(center.letter_multiplier(), 1);
    }

    #[test]
    fn test_plain_square() {
        assert_eq!(bonus_at(Coord::new(7, 6)), None);
    }
}
