//! Rush puzzle generation
//!
//! Each attempt builds a fresh board from a shuffled bag:
//! - a seed word across the centre
//! - two or three crossing words that form nothing but themselves
//! - one or two simulated turns played by the move search
//! - a fresh rack and its five best moves
//!
//! An attempt is accepted once it offers enough strong moves. Otherwise the
//! best attempt is returned, marked as a fallback.

use super::{Puzzle, TopMove};
use crate::bot::{generate_moves, BotMove};
use crate::game::board::{Axis, Board, Coord, PlacedTile, CENTER};
use crate::game::dictionary::Lexicon;
use crate::game::tiles::{Rack, Tile, TileBag, RACK_SIZE};
use crate::game::validation::validate;
use crate::game::words::find_new_words;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

/// Words laid across the centre to start the board
pub const SEED_WORDS: [&str; 6] = ["GAME", "PLAY", "WORD", "QUIZ", "STAR", "TEAM"];

/// Short words tried as crossings
const CROSS_WORDS: [&str; 12] = [
    "CAT", "DOG", "TOP", "SUN", "RUN", "ART", "OAT", "TEN", "ROSE", "MATE", "EAST", "ROAD",
];

/// Moves kept per puzzle
pub const TOP_MOVE_COUNT: usize = 5;
/// An accepted puzzle has at least this many moves...
pub const MIN_TOP_MOVES: usize = 3;
/// ...and a best move worth at least this much
pub const MIN_BEST_SCORE: u32 = 30;
pub const MAX_ATTEMPTS: usize = 5;

const SIMULATED_MIN_SCORE: u32 = 15;
const SIMULATED_MIN_TILES: usize = 2;
const SIMULATED_POOL: usize = 3;
/// Fewer tiles than this left in the bag stops the simulation
const SIMULATED_MIN_RACK: usize = 3;

/// Build a puzzle. Never fails: when no attempt is good enough the best
/// one is returned with `fallback` set.
pub fn generate_puzzle<L, R>(lexicon: &L, rng: &mut R) -> Puzzle
where
    L: Lexicon + ?Sized,
    R: Rng + ?Sized,
{
    let mut best: Option<Puzzle> = None;
    for attempt in 1..=MAX_ATTEMPTS {
        let puzzle = build_attempt(lexicon, rng);
        if is_acceptable(&puzzle) {
            log::info!(
                "puzzle {} accepted on attempt {}: {} moves, best {}",
                puzzle.id,
                attempt,
                puzzle.top_moves.len(),
                puzzle.best_score()
            );
            return puzzle;
        }
        log::debug!(
            "puzzle attempt {} rejected: {} moves, best {}",
            attempt,
            puzzle.top_moves.len(),
            puzzle.best_score()
        );
        let better = best.as_ref().map_or(true, |b| rank(&puzzle) > rank(b));
        if better {
            best = Some(puzzle);
        }
    }

    let mut puzzle = match best {
        Some(p) => p,
        None => build_attempt(lexicon, rng),
    };
    puzzle.fallback = true;
    log::info!(
        "no puzzle cleared {} points in {} attempts, using {} (best {})",
        MIN_BEST_SCORE,
        MAX_ATTEMPTS,
        puzzle.id,
        puzzle.best_score()
    );
    puzzle
}

fn is_acceptable(puzzle: &Puzzle) -> bool {
    puzzle.top_moves.len() >= MIN_TOP_MOVES && puzzle.best_score() >= MIN_BEST_SCORE
}

fn rank(puzzle: &Puzzle) -> (u32, usize) {
    (puzzle.best_score(), puzzle.top_moves.len())
}

fn build_attempt<L, R>(lexicon: &L, rng: &mut R) -> Puzzle
where
    L: Lexicon + ?Sized,
    R: Rng + ?Sized,
{
    let mut bag = TileBag::shuffled(rng);
    let mut board = Board::new();

    lay_seed_word(&mut board, &mut bag, rng);
    lay_crossings(&mut board, &mut bag, rng);
    simulate_turns(&mut board, &mut bag, lexicon, rng);

    let mut rack = Rack::new();
    rack.refill_from(&mut bag);
    let top_moves = top_moves(&board, &rack, lexicon, rng);

    Puzzle {
        id: puzzle_id(rng),
        board,
        rack,
        top_moves,
        fallback: false,
    }
}

/// `rush-` followed by 16 hex digits from the rng.
fn puzzle_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("rush-{:016x}", rng.random::<u64>())
}

/// The best moves for `rack`, highest score first.
pub fn top_moves<L, R>(board: &Board, rack: &Rack, lexicon: &L, rng: &mut R) -> Vec<TopMove>
where
    L: Lexicon + ?Sized,
    R: Rng + ?Sized,
{
    let mut moves = generate_moves(board, rack, lexicon, rng);
    moves.sort_by(|a, b| b.score.cmp(&a.score));
    moves.iter().take(TOP_MOVE_COUNT).map(TopMove::from).collect()
}

/// Take tiles spelling `letters` out of the bag, standing in blanks for
/// letters that have run out. Nothing is taken unless every letter can be.
fn take_word(bag: &mut TileBag, letters: &[char]) -> Option<Vec<Tile>> {
    if !bag.can_supply(letters) {
        return None;
    }
    letters
        .iter()
        .map(|&c| {
            bag.take_letter(c)
                .or_else(|| bag.take_blank().map(|blank| blank.assign(c)))
        })
        .collect()
}

fn lay_seed_word<R: Rng + ?Sized>(board: &mut Board, bag: &mut TileBag, rng: &mut R) {
    let word = SEED_WORDS.choose(rng).copied().unwrap_or(SEED_WORDS[0]);
    let letters: Vec<char> = word.chars().collect();
    let start = Coord::new(CENTER.row, CENTER.col - letters.len() / 2);

    let Some(tiles) = take_word(bag, &letters) else {
        log::warn!("bag cannot spell seed word {}", word);
        return;
    };
    let placed: Vec<PlacedTile> = tiles
        .into_iter()
        .enumerate()
        .filter_map(|(i, tile)| start.step(Axis::Horizontal, i as isize).map(|c| tile.place(c)))
        .collect();
    commit_or_return(board, bag, placed);
}

/// Where `word` could cross the board: tiles to add for each legal spot.
fn crossing_spots(board: &Board, word: &str) -> Vec<Vec<PlacedTile>> {
    let letters: Vec<char> = word.chars().collect();
    let mut spots = Vec::new();

    for existing in board.tiles() {
        for (i, &letter) in letters.iter().enumerate() {
            if existing.letter() != letter {
                continue;
            }
            for axis in [Axis::Horizontal, Axis::Vertical] {
                if let Some(tiles) = fit_word(board, &letters, existing.coord, i, axis) {
                    spots.push(tiles);
                }
            }
        }
    }
    spots
}

/// Lay `letters` along `axis` so that index `at` lands on `through`.
/// Rejected unless every occupied square agrees, at least one tile is new,
/// the placement is legal, and the only word formed is the word itself.
fn fit_word(
    board: &Board,
    letters: &[char],
    through: Coord,
    at: usize,
    axis: Axis,
) -> Option<Vec<PlacedTile>> {
    let start = through.step(axis, -(at as isize))?;
    let mut new_tiles = Vec::new();
    for (i, &letter) in letters.iter().enumerate() {
        let coord = start.step(axis, i as isize)?;
        match board.letter_at(coord) {
            Some(existing) if existing != letter => return None,
            Some(_) => {}
            None => new_tiles.push(Tile::for_letter(letter).place(coord)),
        }
    }
    if new_tiles.is_empty() || !validate(board, &new_tiles).is_valid() {
        return None;
    }

    let word: String = letters.iter().collect();
    let words = find_new_words(board, &new_tiles);
    (words.len() == 1 && words[0].text() == word).then_some(new_tiles)
}

fn lay_crossings<R: Rng + ?Sized>(board: &mut Board, bag: &mut TileBag, rng: &mut R) {
    let wanted = rng.random_range(2..=3);
    let mut candidates = CROSS_WORDS.to_vec();
    candidates.shuffle(rng);

    let mut placed = 0;
    for word in candidates {
        if placed == wanted {
            break;
        }
        let spots = crossing_spots(board, word);
        let Some(spot) = spots.choose(rng) else {
            continue;
        };
        let letters: Vec<char> = spot.iter().map(PlacedTile::letter).collect();
        let Some(tiles) = take_word(bag, &letters) else {
            continue;
        };
        let tiles: Vec<PlacedTile> = tiles
            .into_iter()
            .zip(spot)
            .map(|(tile, target)| tile.place(target.coord))
            .collect();
        if commit_or_return(board, bag, tiles) {
            placed += 1;
        }
    }
    log::debug!("laid {} of {} crossing words", placed, wanted);
}

/// Play one or two turns with the move search so the board looks like a
/// game in progress. Unused tiles go back to the front of the bag.
fn simulate_turns<L, R>(board: &mut Board, bag: &mut TileBag, lexicon: &L, rng: &mut R)
where
    L: Lexicon + ?Sized,
    R: Rng + ?Sized,
{
    let turns = rng.random_range(1..=2);
    for _ in 0..turns {
        let drawn = bag.draw(RACK_SIZE);
        if drawn.len() < SIMULATED_MIN_RACK {
            bag.return_tiles(drawn);
            break;
        }
        let mut rack = Rack::from_tiles(drawn);

        let mut pool: Vec<BotMove> = generate_moves(board, &rack, lexicon, rng)
            .into_iter()
            .filter(|m| m.score >= SIMULATED_MIN_SCORE && m.tiles.len() >= SIMULATED_MIN_TILES)
            .collect();
        pool.sort_by(|a, b| b.score.cmp(&a.score));
        pool.truncate(SIMULATED_POOL);

        if let Some(m) = pool.choose(rng) {
            if board.commit(&m.tiles).is_ok() {
                log::debug!("simulated turn {} for {}", m.words.join(","), m.score);
                rack.remove_placed(&m.tiles);
            }
        }
        bag.return_tiles(rack.tiles().to_vec());
    }
}

/// Commit `tiles`, or put them back in the bag if they do not fit.
fn commit_or_return(board: &mut Board, bag: &mut TileBag, tiles: Vec<PlacedTile>) -> bool {
    match board.commit(&tiles) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("discarding placement: {}", e);
            bag.return_tiles(tiles.into_iter().map(|t| unassigned(t.tile)).collect());
            false
        }
    }
}

/// A placed blank goes back to the bag without its letter.
fn unassigned(tile: Tile) -> Tile {
    if tile.is_blank {
        Tile::blank()
    } else {
        tile
    }
}
