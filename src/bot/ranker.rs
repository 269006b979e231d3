//! Composite move ranking and softmax selection
//!
//! total = 0.7 * board score + 0.2 * leave quality + 0.1 * strategic value

use super::{BotMove, Difficulty};
use crate::game::tiles::{Rack, Tile, RACK_SIZE};
use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;

const RAW_WEIGHT: f64 = 0.7;
const QUALITY_WEIGHT: f64 = 0.2;
const STRATEGIC_WEIGHT: f64 = 0.1;

/// Letters that are easy to play off a rack
const COMMON_LETTERS: [char; 10] = ['A', 'E', 'I', 'O', 'U', 'N', 'R', 'T', 'L', 'S'];

const FULL_RACK_BONUS: f64 = 50.0;
const HIGH_VALUE_TILE: u32 = 8;

/// How playable the tiles left on the rack are. A blank has no letter and
/// no points, so it rates as a cheap tile rather than a common one.
pub fn rack_quality(leave: &[Tile]) -> f64 {
    leave
        .iter()
        .map(|tile| {
            let common = !tile.is_blank && tile.letter.is_some_and(|c| COMMON_LETTERS.contains(&c));
            if common {
                3.0
            } else if tile.points <= 3 {
                2.0
            } else if tile.points <= 6 {
                1.0
            } else {
                0.0
            }
        })
        .sum()
}

/// Bonus for a full-rack play, long words and heavy tiles.
pub fn strategic_score(m: &BotMove) -> f64 {
    let mut strategic = 0.0;
    if m.tiles.len() == RACK_SIZE {
        strategic += FULL_RACK_BONUS;
    }
    for word in &m.words {
        let len = word.chars().count() as f64;
        if len >= 6.0 {
            strategic += 2.0 * len;
        } else if len >= 4.0 {
            strategic += len;
        }
    }
    for t in &m.tiles {
        if !t.tile.is_blank && t.tile.points >= HIGH_VALUE_TILE {
            strategic += f64::from(t.tile.points);
        }
    }
    strategic
}

/// Attach composite scores and sort best first.
pub fn rank_moves(moves: Vec<BotMove>, rack: &Rack) -> Vec<BotMove> {
    let mut ranked: Vec<BotMove> = moves
        .into_iter()
        .map(|mut m| {
            m.quality_score = rack_quality(&rack.remaining_after(&m.tiles));
            m.strategic_score = strategic_score(&m);
            m.total_score = RAW_WEIGHT * f64::from(m.score)
                + QUALITY_WEIGHT * m.quality_score
                + STRATEGIC_WEIGHT * m.strategic_score;
            m
        })
        .collect();
    sort_by_total(&mut ranked);
    ranked
}

fn sort_by_total(moves: &mut [BotMove]) {
    moves.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
}

/// Pick a move the way a player of `difficulty` would.
pub fn select_move<R: Rng + ?Sized>(
    candidates: &[BotMove],
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<BotMove> {
    let k = difficulty.top_k(candidates.len());
    select_with_temperature(candidates, k, difficulty.temperature(), rng)
}

/// Softmax draw over the `top_k` best candidates by total score.
///
/// Weights are `exp((total - best) / temperature)`. A temperature of zero
/// or less always returns the best candidate.
pub fn select_with_temperature<R: Rng + ?Sized>(
    candidates: &[BotMove],
    top_k: usize,
    temperature: f64,
    rng: &mut R,
) -> Option<BotMove> {
    if candidates.is_empty() {
        return None;
    }
    let mut sorted = candidates.to_vec();
    sort_by_total(&mut sorted);
    sorted.truncate(top_k.clamp(1, sorted.len()));

    if sorted.len() == 1 || temperature <= 0.0 {
        return sorted.into_iter().next();
    }

    let best = sorted[0].total_score;
    let weights: Vec<f64> = sorted
        .iter()
        .map(|m| ((m.total_score - best) / temperature).exp())
        .collect();
    let index = match WeightedIndex::new(&weights) {
        Ok(dist) => dist.sample(rng),
        Err(_) => 0,
    };
    sorted.into_iter().nth(index)
}
