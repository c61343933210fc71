use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::config::{ShoeConfig, TableConfig};
use crate::counter::{compute_count_with, CountState, CountingSystem};
use crate::deviation::{insurance_advice, resolve_deviation, InsuranceAdvice};
use crate::error::{AdvisorError, Result};
use crate::hand::{evaluate, hand_label, is_blackjack, is_bust, is_pair, HandValue};
use crate::rank::Rank;
use crate::strategy::{resolve_baseline, Action, CapabilityFlags};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub baseline_action: Action,
    pub final_action: Action,
    pub deviation_notes: Vec<String>,
    pub insurance_advice: InsuranceAdvice,
}

pub fn recommend(
    hand: &[Rank],
    dealer_up: Rank,
    true_count: i32,
    flags: CapabilityFlags,
) -> Recommendation {
    let baseline_action = resolve_baseline(hand, dealer_up, flags);
    let deviation = resolve_deviation(baseline_action, hand, dealer_up, true_count, flags);
    Recommendation {
        baseline_action,
        final_action: deviation.action,
        deviation_notes: deviation.notes,
        insurance_advice: insurance_advice(dealer_up, true_count),
    }
}

/// Everything the presentation layer tracks for one seat. It is the only
/// writer of the seen-card sequence; the resolvers only ever read it.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    config: TableConfig,
    shoe: ShoeConfig,
    seen: Vec<Rank>,
    hand: Vec<Rank>,
    dealer_up: Option<Rank>,
    /// Position of the upcard in `seen`, so a corrected upcard replaces it.
    dealer_up_slot: Option<usize>,
}

impl TableState {
    pub fn new(config: TableConfig) -> Result<Self> {
        config.validate()?;
        let shoe = config.shoe()?;
        Ok(TableState {
            config,
            shoe,
            seen: Vec::with_capacity(shoe.total_cards()),
            hand: Vec::new(),
            dealer_up: None,
            dealer_up_slot: None,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn seen_cards(&self) -> &[Rank] {
        &self.seen
    }

    pub fn hand(&self) -> &[Rank] {
        &self.hand
    }

    pub fn dealer_up(&self) -> Option<Rank> {
        self.dealer_up
    }

    fn observe(&mut self, rank: Rank) -> Result<()> {
        let total = self.shoe.total_cards();
        if self.seen.len() >= total {
            warn!("rejected {rank}: all {total} cards already seen");
            return Err(AdvisorError::ShoeExhausted { total });
        }
        self.seen.push(rank);
        Ok(())
    }

    /// A card dealt to anyone but this player.
    pub fn add_observed_card(&mut self, rank: Rank) -> Result<()> {
        self.observe(rank)?;
        trace!("observed {rank}, {} seen", self.seen.len());
        Ok(())
    }

    /// The player's cards come out of the same shoe, so they count too.
    pub fn add_own_card(&mut self, rank: Rank) -> Result<()> {
        self.observe(rank)?;
        self.hand.push(rank);
        trace!("own card {rank}, hand {}", hand_label(&self.hand));
        Ok(())
    }

    /// Records the upcard and counts it as seen. Setting it again within
    /// a round swaps the earlier upcard out of the count.
    pub fn set_dealer_up(&mut self, rank: Rank) -> Result<()> {
        match self.dealer_up_slot.and_then(|slot| self.seen.get_mut(slot)) {
            Some(previous) => {
                trace!("dealer upcard corrected from {previous} to {rank}");
                *previous = rank;
            }
            None => {
                self.observe(rank)?;
                self.dealer_up_slot = Some(self.seen.len() - 1);
                trace!("dealer shows {rank}");
            }
        }
        self.dealer_up = Some(rank);
        Ok(())
    }

    /// Clears the hand and upcard; the shoe carries over.
    pub fn new_round(&mut self) {
        self.hand.clear();
        self.dealer_up = None;
        self.dealer_up_slot = None;
    }

    pub fn new_shoe(&mut self) {
        self.new_round();
        self.seen.clear();
        trace!("new shoe of {} decks", self.shoe.decks());
    }

    pub fn count(&self) -> CountState {
        compute_count_with(self.config.counting_system, &self.seen, self.shoe)
    }

    pub fn recommend(&self) -> Result<Recommendation> {
        let dealer_up = self.dealer_up.ok_or(AdvisorError::MissingDealerUpcard)?;
        let flags = CapabilityFlags::for_hand(&self.hand);
        Ok(recommend(&self.hand, dealer_up, self.count().true_count, flags))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountRequest {
    pub seen_cards: Vec<String>,
    pub decks: u8,
    #[serde(default)]
    pub counting_system: CountingSystem,
}

pub fn count_from_request(request: &CountRequest) -> Result<CountState> {
    let seen = Rank::parse_all(&request.seen_cards)?;
    let shoe = ShoeConfig::new(request.decks)?;
    Ok(compute_count_with(request.counting_system, &seen, shoe))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandRequest {
    pub hand: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandSummary {
    #[serde(flatten)]
    pub value: HandValue,
    pub is_pair: bool,
    pub is_bust: bool,
    pub is_blackjack: bool,
    pub label: String,
}

pub fn summarize_hand(hand: &[Rank]) -> HandSummary {
    HandSummary {
        value: evaluate(hand),
        is_pair: is_pair(hand),
        is_bust: is_bust(hand),
        is_blackjack: is_blackjack(hand),
        label: hand_label(hand),
    }
}

pub fn hand_from_request(request: &HandRequest) -> Result<HandSummary> {
    let hand = Rank::parse_all(&request.hand)?;
    Ok(summarize_hand(&hand))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    pub hand: Vec<String>,
    pub dealer_up: String,
    pub true_count: i32,
    /// Derived from the hand when absent.
    #[serde(default)]
    pub flags: Option<CapabilityFlags>,
}

pub fn recommend_from_request(request: &RecommendRequest) -> Result<Recommendation> {
    let hand = Rank::parse_all(&request.hand)?;
    let dealer_up: Rank = request.dealer_up.parse()?;
    let flags = request
        .flags
        .unwrap_or_else(|| CapabilityFlags::for_hand(&hand));
    Ok(recommend(&hand, dealer_up, request.true_count, flags))
}

/// A full snapshot of the table as the presentation layer sees it. The
/// player's own cards and the dealer upcard must already be in
/// `seen_cards`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    #[serde(default)]
    pub config: TableConfig,
    pub seen_cards: Vec<String>,
    pub hand: Vec<String>,
    #[serde(default)]
    pub dealer_up: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Advice {
    pub count: CountState,
    pub hand: HandSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
    pub players: u8,
}

pub fn advise(request: &AdviceRequest) -> Result<Advice> {
    request.config.validate()?;
    let shoe = request.config.shoe()?;
    let seen = Rank::parse_all(&request.seen_cards)?;
    if seen.len() > shoe.total_cards() {
        return Err(AdvisorError::ShoeExhausted {
            total: shoe.total_cards(),
        });
    }
    let hand = Rank::parse_all(&request.hand)?;
    let dealer_up = request
        .dealer_up
        .as_deref()
        .map(str::parse::<Rank>)
        .transpose()?;

    let count = compute_count_with(request.config.counting_system, &seen, shoe);
    let recommendation = match dealer_up {
        Some(up) if !hand.is_empty() => Some(recommend(
            &hand,
            up,
            count.true_count,
            CapabilityFlags::for_hand(&hand),
        )),
        _ => None,
    };

    Ok(Advice {
        count,
        hand: summarize_hand(&hand),
        recommendation,
        players: request.config.players,
    })
}
