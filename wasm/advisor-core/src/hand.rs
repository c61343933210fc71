use serde::Serialize;

use crate::rank::{card_value, is_ten_valued, Rank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandValue {
    pub total: u8,
    pub is_soft: bool,
}

/// Best total for the hand, demoting aces from 11 to 1 only while the
/// total is over 21. Bust totals are returned unchanged.
pub fn evaluate(hand: &[Rank]) -> HandValue {
    let mut total: u32 = 0;
    let mut aces = 0;

    for &rank in hand {
        total += u32::from(card_value(rank));
        if rank == Rank::Ace {
            aces += 1;
        }
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    HandValue {
        total: u8::try_from(total).unwrap_or(u8::MAX),
        is_soft: aces > 0 && total <= 21,
    }
}

/// Two cards of the same rank, or any two ten-valued cards.
pub fn is_pair(hand: &[Rank]) -> bool {
    match hand {
        [a, b] => a == b || (is_ten_valued(*a) && is_ten_valued(*b)),
        _ => false,
    }
}

pub fn pair_rank_key(hand: &[Rank]) -> Option<&'static str> {
    if !is_pair(hand) {
        return None;
    }
    if is_ten_valued(hand[0]) {
        Some("10")
    } else {
        Some(hand[0].symbol())
    }
}

pub fn is_bust(hand: &[Rank]) -> bool {
    evaluate(hand).total > 21
}

pub fn is_blackjack(hand: &[Rank]) -> bool {
    hand.len() == 2 && evaluate(hand).total == 21
}

/// Row label in the strategy chart: "8,8" for pairs, "S18" for soft
/// totals, "16" for hard totals.
pub fn hand_label(hand: &[Rank]) -> String {
    if let Some(key) = pair_rank_key(hand) {
        return format!("{key},{key}");
    }
    let value = evaluate(hand);
    if value.is_soft {
        format!("S{}", value.total)
    } else {
        value.total.to_string()
    }
}
