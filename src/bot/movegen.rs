//! Bounded move search
//!
//! Every anchor square is tried along both axes with every run length the
//! rack allows. For each run the rack is laid out in at most
//! [`MAX_PERMUTATIONS`] orderings, so the search is a heuristic and can
//! miss the best move on a crowded rack. Blanks are expanded into letters
//! and each expansion counts against the cap.

use super::BotMove;
use crate::game::board::{move_key, Axis, Board, Coord, PlacedTile, CENTER};
use crate::game::dictionary::Lexicon;
use crate::game::scoring::score_move;
use crate::game::tiles::{Rack, Tile, RACK_SIZE};
use crate::game::validation::validate;
use crate::game::words::{find_new_words, Word};
use rand::seq::index;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Orderings tried per (anchor, axis, length). Racks whose orderings fit
/// under the cap are searched exhaustively, larger ones are sampled.
pub const MAX_PERMUTATIONS: usize = 48;

const ALPHABET: usize = 26;

#[derive(Debug, Default)]
struct SearchStats {
    anchors: usize,
    placements: usize,
    kept: usize,
}

/// All legal, dictionary-valid moves found for `rack` on `board`,
/// deduplicated by [`BotMove::key`]. Empty when the lexicon is not ready
/// or the rack is empty.
pub fn generate_moves<L, R>(board: &Board, rack: &Rack, lexicon: &L, rng: &mut R) -> Vec<BotMove>
where
    L: Lexicon + ?Sized,
    R: Rng + ?Sized,
{
    if !lexicon.is_ready() || rack.is_empty() {
        return Vec::new();
    }

    let anchors = if board.is_empty() {
        vec![CENTER]
    } else {
        board.anchors()
    };
    let max_len = rack.len().min(RACK_SIZE);

    let mut stats = SearchStats {
        anchors: anchors.len(),
        ..SearchStats::default()
    };
    let mut tried = HashSet::new();
    let mut moves = Vec::new();

    for &anchor in &anchors {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            for len in 1..=max_len {
                let orderings = rack_orderings(rack.tiles(), len, rng);
                for offset in 0..len {
                    let Some(cells) = run_cells(board, anchor, axis, len, offset) else {
                        continue;
                    };
                    for ordering in &orderings {
                        let tiles: Vec<PlacedTile> = ordering
                            .iter()
                            .zip(&cells)
                            .map(|(tile, coord)| tile.place(*coord))
                            .collect();
                        if !tried.insert(move_key(&tiles)) {
                            continue;
                        }
                        stats.placements += 1;
                        if let Some(m) = evaluate(board, tiles, lexicon) {
                            moves.push(m);
                        }
                    }
                }
            }
        }
    }

    stats.kept = moves.len();
    log::debug!(
        "move search: {} anchors, {} placements, {} moves kept",
        stats.anchors,
        stats.placements,
        stats.kept
    );
    moves
}

/// Score a placement if it is legal and every word it forms is known.
fn evaluate<L>(board: &Board, tiles: Vec<PlacedTile>, lexicon: &L) -> Option<BotMove>
where
    L: Lexicon + ?Sized,
{
    if !validate(board, &tiles).is_valid() {
        return None;
    }
    let words = find_new_words(board, &tiles);
    if words.is_empty() {
        return None;
    }
    let texts: Vec<String> = words.iter().map(Word::text).collect();
    if !texts.iter().all(|w| lexicon.is_valid_word(w)) {
        return None;
    }
    let score = score_move(&words, &tiles);
    Some(BotMove::new(tiles, texts, score))
}

/// The `len` empty squares along `axis` that put `anchor` at position
/// `offset` of the run. Occupied squares are stepped over. `None` if the
/// run would leave the board.
fn run_cells(board: &Board, anchor: Coord, axis: Axis, len: usize, offset: usize) -> Option<Vec<Coord>> {
    let mut start = anchor;
    let mut skipped = 0;
    while skipped < offset {
        start = start.step(axis, -1)?;
        if !board.is_occupied(start) {
            skipped += 1;
        }
    }

    let mut cells = Vec::with_capacity(len);
    let mut cursor = Some(start);
    while cells.len() < len {
        let coord = cursor?;
        if !board.is_occupied(coord) {
            cells.push(coord);
        }
        cursor = coord.step(axis, 1);
    }
    Some(cells)
}

/// Upper bound on the distinct orderings of `len` tiles from `rack`.
fn ordering_bound(rack: &[Tile], len: usize) -> usize {
    let n = rack.len();
    let blanks = rack.iter().filter(|t| t.is_blank).count().min(len);
    let arrangements = (n - len + 1..=n).fold(1usize, |acc, k| acc.saturating_mul(k));
    (0..blanks).fold(arrangements, |acc, _| acc.saturating_mul(ALPHABET))
}

/// Up to [`MAX_PERMUTATIONS`] distinct orderings of `len` rack tiles, with
/// blanks assigned letters. When sampling, every blank-free ordering is
/// kept if there are few enough of them.
fn rack_orderings<R: Rng + ?Sized>(rack: &[Tile], len: usize, rng: &mut R) -> Vec<Vec<Tile>> {
    if len == 0 || len > rack.len() {
        return Vec::new();
    }
    if ordering_bound(rack, len) <= MAX_PERMUTATIONS {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut used = vec![false; rack.len()];
        let mut current = Vec::with_capacity(len);
        enumerate(rack, len, &mut used, &mut current, &mut seen, &mut out);
        return out;
    }

    let mut out = Vec::with_capacity(MAX_PERMUTATIONS);
    let mut seen = HashSet::new();

    // Lettered tiles outscore blanks, so their orderings go in first
    // whenever they fit under the cap.
    let lettered: Vec<Tile> = rack.iter().filter(|t| !t.is_blank).copied().collect();
    if len <= lettered.len() && ordering_bound(&lettered, len) <= MAX_PERMUTATIONS {
        let mut used = vec![false; lettered.len()];
        let mut current = Vec::with_capacity(len);
        enumerate(&lettered, len, &mut used, &mut current, &mut seen, &mut out);
    }

    for _ in 0..MAX_PERMUTATIONS * 4 {
        if out.len() == MAX_PERMUTATIONS {
            break;
        }
        let mut picks = index::sample(rng, rack.len(), len).into_vec();
        picks.shuffle(rng);
        let ordering: Vec<Tile> = picks
            .into_iter()
            .map(|i| {
                let tile = rack[i];
                if tile.is_blank {
                    tile.assign(random_letter(rng))
                } else {
                    tile
                }
            })
            .collect();
        if seen.insert(ordering.clone()) {
            out.push(ordering);
        }
    }
    out
}

fn enumerate(
    rack: &[Tile],
    len: usize,
    used: &mut [bool],
    current: &mut Vec<Tile>,
    seen: &mut HashSet<Vec<Tile>>,
    out: &mut Vec<Vec<Tile>>,
) {
    if current.len() == len {
        if seen.insert(current.clone()) {
            out.push(current.clone());
        }
        return;
    }
    for i in 0..rack.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        if rack[i].is_blank {
            for letter in 'A'..='Z' {
                current.push(rack[i].assign(letter));
                enumerate(rack, len, used, current, seen, out);
                current.pop();
            }
        } else {
            current.push(rack[i]);
            enumerate(rack, len, used, current, seen, out);
            current.pop();
        }
        used[i] = false;
    }
}

fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    char::from(b'A' + rng.random_range(0..ALPHABET as u8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::tests::lay;
    use crate::game::dictionary::{Dictionary, WordGate};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lexicon() -> Dictionary {
        Dictionary::from_words(["CAT", "CATS", "AT", "TA", "ACT", "SAT", "AS", "TO", "SO"])
    }

    #[test]
    fn test_empty_rack_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let moves = generate_moves(&Board::new(), &Rack::new(), &lexicon(), &mut rng);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_unready_lexicon_yields_nothing() {
        let gate = WordGate::new(|_: &str| true, false);
        let mut rng = StdRng::seed_from_u64(1);
        let moves = generate_moves(&Board::new(), &Rack::from_letters("CAT"), &gate, &mut rng);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_opening_finds_cat_through_center() {
        let mut rng = StdRng::seed_from_u64(2);
        let moves = generate_moves(&Board::new(), &Rack::from_letters("CAT"), &lexicon(), &mut rng);

        let cat = moves
            .iter()
            .find(|m| m.key() == "7,6,C|7,7,A|7,8,T")
            .expect("CAT across the centre");
        assert_eq!(cat.score, 10);
        assert_eq!(cat.words, vec!["CAT"]);
        for m in &moves {
            assert!(m.tiles.iter().any(|t| t.coord == CENTER));
        }
    }

    #[test]
    fn test_extension_and_no_overlap() {
        let mut board = Board::new();
        lay(&mut board, "CAT", Coord::new(7, 6), Axis::Horizontal);
        let mut rng = StdRng::seed_from_u64(3);

        let moves = generate_moves(&board, &Rack::from_letters("S"), &lexicon(), &mut rng);
        assert!(moves.iter().any(|m| m.words == vec!["CATS"]));
        for m in &moves {
            assert!(m.tiles.iter().all(|t| !board.is_occupied(t.coord)));
            assert!(validate(&board, &m.tiles).is_valid());
        }
    }

    #[test]
    fn test_moves_are_unique() {
        let mut rng = StdRng::seed_from_u64(4);
        let moves = generate_moves(&Board::new(), &Rack::from_letters("CATS"), &lexicon(), &mut rng);
        let keys: HashSet<String> = moves.iter().map(BotMove::key).collect();
        assert_eq!(keys.len(), moves.len());
    }

    #[test]
    fn test_same_seed_same_moves() {
        let rack = Rack::from_letters("CATSEOR");
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            generate_moves(&Board::new(), &rack, &lexicon(), &mut rng)
                .iter()
                .map(BotMove::key)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn test_blank_is_played_as_a_letter() {
        let mut rng = StdRng::seed_from_u64(5);
        let moves = generate_moves(&Board::new(), &Rack::from_letters("A?"), &lexicon(), &mut rng);
        // ?A as TA, A? as AT or AS
        assert!(!moves.is_empty());
        for m in &moves {
            let blank = m.tiles.iter().find(|t| t.tile.is_blank).expect("blank used");
            assert!(blank.tile.letter.is_some());
            assert_eq!(blank.tile.score(), 0);
        }
    }

    #[test]
    fn test_blank_does_not_hide_real_tiles() {
        let dict = Dictionary::from_words(["CAT"]);
        let real = "7,6,C|7,7,A|7,8,T";
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let moves = generate_moves(&Board::new(), &Rack::from_letters("CAT?"), &dict, &mut rng);
            let cat = moves.iter().find(|m| m.key() == real).expect("real-tile CAT");
            assert_eq!(cat.score, 10, "seed {}", seed);
            assert!(cat.tiles.iter().all(|t| !t.tile.is_blank));

            let keys: HashSet<String> = moves.iter().map(BotMove::key).collect();
            assert_eq!(keys.len(), moves.len());
            for m in &moves {
                if m.tiles.iter().any(|t| t.tile.is_blank) {
                    assert!(m.score < 10);
                } else {
                    assert_eq!(m.score, 10);
                }
            }
        }
    }

    #[test]
    fn test_sampled_orderings_include_lettered_tiles() {
        let mut rng = StdRng::seed_from_u64(7);
        let rack = Rack::from_letters("CAT?");
        let orderings = rack_orderings(rack.tiles(), 3, &mut rng);
        assert!(orderings.len() <= MAX_PERMUTATIONS);
        let lettered = orderings
            .iter()
            .filter(|o| o.iter().all(|t| !t.is_blank))
            .count();
        assert_eq!(lettered, 6);
    }

    #[test]
    fn test_orderings_respect_cap() {
        let mut rng = StdRng::seed_from_u64(6);
        let rack = Rack::from_letters("ABCDEFG");
        assert_eq!(rack_orderings(rack.tiles(), 2, &mut rng).len(), 42);
        let sampled = rack_orderings(rack.tiles(), 5, &mut rng);
        assert!(!sampled.is_empty());
        assert!(sampled.len() <= MAX_PERMUTATIONS);
        assert!(sampled.iter().all(|o| o.len() == 5));
    }

    #[test]
    fn test_duplicate_letters_collapse() {
        let mut rng = StdRng::seed_from_u64(0);
        let rack = Rack::from_letters("EE");
        assert_eq!(rack_orderings(rack.tiles(), 2, &mut rng).len(), 1);
    }

    #[test]
    fn test_run_cells_skips_occupied() {
        let mut board = Board::new();
        lay(&mut board, "CAT", Coord::new(7, 6), Axis::Horizontal);

        // anchor (7,5), offset 0, three cells: (7,5) then past CAT to (7,9), (7,10)
        let cells = run_cells(&board, Coord::new(7, 5), Axis::Horizontal, 3, 0).expect("fits");
        assert_eq!(
            cells,
            vec![Coord::new(7, 5), Coord::new(7, 9), Coord::new(7, 10)]
        );
        assert_eq!(run_cells(&board, Coord::new(0, 0), Axis::Vertical, 2, 1), None);
    }
}
