use serde::{Deserialize, Serialize};

use crate::config::{ShoeConfig, CARDS_PER_DECK};
use crate::rank::{counting_weight, Rank};

/// Fewest decks the true count is ever divided by.
pub const MIN_DECKS_REMAINING: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CountingSystem {
    #[default]
    #[serde(rename = "Hi-Lo")]
    HiLo,
    #[serde(rename = "Hi-Opt I")]
    HiOptI,
    #[serde(rename = "Hi-Opt II")]
    HiOptII,
    #[serde(rename = "Omega II")]
    OmegaII,
    #[serde(rename = "KO (Knockout)")]
    Knockout,
    #[serde(rename = "Ace-Five")]
    AceFive,
}

impl CountingSystem {
    pub fn weight(&self, rank: Rank) -> i32 {
        use crate::rank::Rank::*;
        match self {
            CountingSystem::HiLo => counting_weight(rank),
            CountingSystem::HiOptI => match rank {
                Three | Four | Five | Six => 1,
                Ten | Jack | Queen | King => -1,
                _ => 0,
            },
            CountingSystem::HiOptII => match rank {
                Two | Three | Six | Seven => 1,
                Four | Five => 2,
                Ten | Jack | Queen | King => -2,
                _ => 0,
            },
            CountingSystem::OmegaII => match rank {
                Two | Three | Seven => 1,
                Four | Five | Six => 2,
                Nine => -1,
                Ten | Jack | Queen | King => -2,
                _ => 0,
            },
            CountingSystem::Knockout => match rank {
                Two | Three | Four | Five | Six | Seven => 1,
                Eight | Nine => 0,
                _ => -1,
            },
            CountingSystem::AceFive => match rank {
                Five => 1,
                Ace => -1,
                _ => 0,
            },
        }
    }

    pub fn running_count(&self, seen: &[Rank]) -> i32 {
        seen.iter().map(|&rank| self.weight(rank)).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountState {
    pub running_count: i32,
    pub decks_remaining: f64,
    pub true_count: i32,
    pub cards_seen: usize,
    pub cards_remaining: usize,
}

pub fn compute_count(seen: &[Rank], shoe: ShoeConfig) -> CountState {
    compute_count_with(CountingSystem::HiLo, seen, shoe)
}

pub fn compute_count_with(system: CountingSystem, seen: &[Rank], shoe: ShoeConfig) -> CountState {
    let running_count = system.running_count(seen);
    let decks_remaining = decks_remaining(seen.len(), shoe);
    CountState {
        running_count,
        decks_remaining,
        true_count: true_count(running_count, decks_remaining),
        cards_seen: seen.len(),
        cards_remaining: shoe.total_cards().saturating_sub(seen.len()),
    }
}

pub fn decks_remaining(cards_seen: usize, shoe: ShoeConfig) -> f64 {
    let unseen = shoe.total_cards() as f64 - cards_seen as f64;
    (unseen / CARDS_PER_DECK as f64).clamp(MIN_DECKS_REMAINING, shoe.decks() as f64)
}

/// Truncates toward zero, never rounds.
pub fn true_count(running_count: i32, decks_remaining: f64) -> i32 {
    let decks = decks_remaining.max(MIN_DECKS_REMAINING);
    (running_count as f64 / decks).trunc() as i32
}
