use std::fmt;

use log::debug;
use serde::Serialize;

use crate::hand::{evaluate, is_pair};
use crate::rank::{dealer_upcard_value, Rank};
use crate::strategy::{Action, CapabilityFlags};

/// True count at which insurance becomes a profitable side bet.
pub const INSURANCE_THRESHOLD: i32 = 3;

/// A count-triggered override of the baseline play for one hard total
/// against one dealer upcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexPlay {
    pub hard_total: u8,
    pub dealer: u8,
    pub threshold: i32,
    pub action: Action,
}

impl IndexPlay {
    const fn new(hard_total: u8, dealer: u8, threshold: i32, action: Action) -> Self {
        IndexPlay {
            hard_total,
            dealer,
            threshold,
            action,
        }
    }

    fn matches(
        &self,
        baseline: Action,
        total: u8,
        dealer: u8,
        true_count: i32,
        flags: CapabilityFlags,
    ) -> bool {
        if self.hard_total != total || self.dealer != dealer {
            return false;
        }
        if self.action == Action::Double && !flags.can_double {
            return false;
        }
        baseline != self.action && true_count >= self.threshold
    }

    pub fn note(&self) -> String {
        format!("Deviation: {self}")
    }
}

impl fmt::Display for IndexPlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dealer = if self.dealer == 11 {
            "A".to_string()
        } else {
            self.dealer.to_string()
        };
        let threshold = if self.threshold > 0 {
            format!("+{}", self.threshold)
        } else {
            self.threshold.to_string()
        };
        write!(
            f,
            "{} vs {} → {:?} at TC ≥ {}",
            self.hard_total, dealer, self.action, threshold
        )
    }
}

/// Checked in order; the first play that fires wins.
pub const INDEX_PLAYS: [IndexPlay; 9] = [
    IndexPlay::new(16, 10, 0, Action::Stand),
    IndexPlay::new(15, 10, 4, Action::Stand),
    IndexPlay::new(16, 9, 5, Action::Stand),
    IndexPlay::new(16, 11, 3, Action::Stand),
    IndexPlay::new(12, 3, 1, Action::Stand),
    IndexPlay::new(12, 2, 3, Action::Stand),
    IndexPlay::new(10, 10, 4, Action::Double),
    IndexPlay::new(10, 11, 3, Action::Double),
    IndexPlay::new(11, 11, 0, Action::Double),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deviation {
    pub action: Action,
    pub notes: Vec<String>,
}

pub fn resolve_deviation(
    baseline: Action,
    hand: &[Rank],
    dealer_up: Rank,
    true_count: i32,
    flags: CapabilityFlags,
) -> Deviation {
    let value = evaluate(hand);
    // Soft hands and splittable pairs keep their baseline play.
    if value.is_soft || (flags.can_split && is_pair(hand)) {
        return Deviation {
            action: baseline,
            notes: Vec::new(),
        };
    }

    let dealer = dealer_upcard_value(dealer_up);
    if let Some(play) = INDEX_PLAYS
        .iter()
        .find(|play| play.matches(baseline, value.total, dealer, true_count, flags))
    {
        debug!("index play fired at TC {true_count}: {play}");
        return Deviation {
            action: play.action,
            notes: vec![play.note()],
        };
    }

    Deviation {
        action: baseline,
        notes: Vec::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InsuranceAdvice {
    #[serde(rename = "buy")]
    Buy,
    #[serde(rename = "do not buy")]
    DoNotBuy,
    #[serde(rename = "not applicable")]
    NotApplicable,
}

pub fn insurance_advice(dealer_up: Rank, true_count: i32) -> InsuranceAdvice {
    if dealer_up != Rank::Ace {
        InsuranceAdvice::NotApplicable
    } else if true_count >= INSURANCE_THRESHOLD {
        InsuranceAdvice::Buy
    } else {
        InsuranceAdvice::DoNotBuy
    }
}
