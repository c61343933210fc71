use serde::{Deserialize, Serialize};

use crate::hand::{evaluate, is_pair, pair_rank_key, HandValue};
use crate::rank::{dealer_upcard_value, Rank};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    Hit,
    Stand,
    Double,
    Split,
    Surrender,
}

/// What the player is allowed to do with the hand right now.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityFlags {
    pub can_split: bool,
    pub can_double: bool,
    pub can_surrender: bool,
}

impl CapabilityFlags {
    pub const ALL: CapabilityFlags = CapabilityFlags {
        can_split: true,
        can_double: true,
        can_surrender: true,
    };

    pub const NONE: CapabilityFlags = CapabilityFlags {
        can_split: false,
        can_double: false,
        can_surrender: false,
    };

    /// Doubling and surrender need exactly two cards; splitting is always
    /// offered on a pair.
    pub fn for_hand(hand: &[Rank]) -> Self {
        let two_cards = hand.len() == 2;
        CapabilityFlags {
            can_split: is_pair(hand),
            can_double: two_cards,
            can_surrender: two_cards,
        }
    }
}

/// Inputs every baseline rule looks at.
#[derive(Debug, Clone, Copy)]
pub struct Situation<'a> {
    pub hand: &'a [Rank],
    pub value: HandValue,
    pub dealer: u8,
    pub flags: CapabilityFlags,
}

impl<'a> Situation<'a> {
    pub fn new(hand: &'a [Rank], dealer_up: Rank, flags: CapabilityFlags) -> Self {
        Situation {
            hand,
            value: evaluate(hand),
            dealer: dealer_upcard_value(dealer_up),
            flags,
        }
    }

    fn double_or(&self, fallback: Action) -> Action {
        if self.flags.can_double {
            Action::Double
        } else {
            fallback
        }
    }
}

/// Baseline rules in precedence order. The first rule that produces an
/// action decides the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineRule {
    Surrender,
    Pair,
    Soft,
    Hard,
}

impl BaselineRule {
    pub const ORDER: [BaselineRule; 4] = [
        BaselineRule::Surrender,
        BaselineRule::Pair,
        BaselineRule::Soft,
        BaselineRule::Hard,
    ];

    pub fn apply(&self, s: &Situation) -> Option<Action> {
        match self {
            BaselineRule::Surrender => surrender_rule(s),
            BaselineRule::Pair => pair_rule(s),
            BaselineRule::Soft => soft_rule(s),
            BaselineRule::Hard => Some(hard_rule(s)),
        }
    }
}

pub fn resolve_baseline(hand: &[Rank], dealer_up: Rank, flags: CapabilityFlags) -> Action {
    let situation = Situation::new(hand, dealer_up, flags);
    BaselineRule::ORDER
        .iter()
        .find_map(|rule| rule.apply(&situation))
        .unwrap_or(Action::Hit)
}

fn surrender_rule(s: &Situation) -> Option<Action> {
    if !s.flags.can_surrender || s.hand.len() != 2 || s.value.is_soft {
        return None;
    }
    match (s.value.total, s.dealer) {
        (16, 9..=11) | (15, 10) => Some(Action::Surrender),
        _ => None,
    }
}

fn pair_rule(s: &Situation) -> Option<Action> {
    if !s.flags.can_split {
        return None;
    }
    let key = pair_rank_key(s.hand)?;
    let d = s.dealer;
    let action = match key {
        "A" | "8" => Action::Split,
        "10" => Action::Stand,
        "9" => match d {
            2..=6 | 8 | 9 => Action::Split,
            _ => Action::Stand,
        },
        "7" | "3" | "2" => split_if(d, 2..=7),
        "6" => split_if(d, 2..=6),
        "5" => match d {
            2..=9 => s.double_or(Action::Hit),
            _ => Action::Hit,
        },
        "4" => split_if(d, 5..=6),
        _ => return None,
    };
    Some(action)
}

fn split_if(dealer: u8, range: std::ops::RangeInclusive<u8>) -> Action {
    if range.contains(&dealer) {
        Action::Split
    } else {
        Action::Hit
    }
}

fn soft_rule(s: &Situation) -> Option<Action> {
    if !s.value.is_soft {
        return None;
    }
    let d = s.dealer;
    let action = match s.value.total {
        20.. => Action::Stand,
        19 => match d {
            6 => s.double_or(Action::Stand),
            _ => Action::Stand,
        },
        18 => match d {
            3..=6 if s.flags.can_double => Action::Double,
            2 | 7 | 8 => Action::Stand,
            _ => Action::Hit,
        },
        17 => double_if(s, 3..=6),
        15 | 16 => double_if(s, 4..=6),
        13 | 14 => double_if(s, 5..=6),
        _ => Action::Hit,
    };
    Some(action)
}

fn hard_rule(s: &Situation) -> Action {
    let d = s.dealer;
    match s.value.total {
        17.. => Action::Stand,
        0..=8 => Action::Hit,
        9 => double_if(s, 3..=6),
        10 => double_if(s, 2..=9),
        11 => match d {
            11 => Action::Hit,
            _ => s.double_or(Action::Hit),
        },
        12 => stand_if(d, 4..=6),
        _ => stand_if(d, 2..=6),
    }
}

fn double_if(s: &Situation, range: std::ops::RangeInclusive<u8>) -> Action {
    if range.contains(&s.dealer) {
        s.double_or(Action::Hit)
    } else {
        Action::Hit
    }
}

fn stand_if(dealer: u8, range: std::ops::RangeInclusive<u8>) -> Action {
    if range.contains(&dealer) {
        Action::Stand
    } else {
        Action::Hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::Rank::*;

    fn baseline(hand: &[Rank], dealer: Rank) -> Action {
        resolve_baseline(hand, dealer, CapabilityFlags::ALL)
    }

    fn no_double(hand: &[Rank], dealer: Rank) -> Action {
        let flags = CapabilityFlags {
            can_double: false,
            ..CapabilityFlags::ALL
        };
        resolve_baseline(hand, dealer, flags)
    }

    #[test]
    fn test_flags_for_hand() {
        assert_eq!(CapabilityFlags::for_hand(&[Eight, Eight]), CapabilityFlags::ALL);
        assert_eq!(
            CapabilityFlags::for_hand(&[Ten, Six]),
            CapabilityFlags {
                can_split: false,
                can_double: true,
                can_surrender: true,
            }
        );
        assert_eq!(CapabilityFlags::for_hand(&[Five, Five, Two]), CapabilityFlags::NONE);
    }

    #[test]
    fn test_surrender_hard_16() {
        assert_eq!(baseline(&[Ten, Six], Nine), Action::Surrender);
        assert_eq!(baseline(&[Ten, Six], King), Action::Surrender);
        assert_eq!(baseline(&[Ten, Six], Ace), Action::Surrender);
        assert_eq!(baseline(&[Ten, Six], Eight), Action::Hit);
    }

    #[test]
    fn test_surrender_hard_15_only_vs_ten() {
        assert_eq!(baseline(&[Ten, Five], Queen), Action::Surrender);
        assert_eq!(baseline(&[Ten, Five], Ace), Action::Hit);
        assert_eq!(baseline(&[Ten, Five], Nine), Action::Hit);
    }

    #[test]
    fn test_surrender_needs_flag_and_two_hard_cards() {
        assert_eq!(resolve_baseline(&[Ten, Six], Ten, CapabilityFlags::NONE), Action::Hit);
        assert_eq!(baseline(&[Ten, Four, Two], Ten), Action::Hit);
        // Soft 16 never surrenders.
        assert_eq!(baseline(&[Ace, Five], Ten), Action::Hit);
    }

    #[test]
    fn test_surrender_precedes_pair_rule() {
        assert_eq!(baseline(&[Eight, Eight], Ten), Action::Surrender);
        let flags = CapabilityFlags {
            can_surrender: false,
            ..CapabilityFlags::ALL
        };
        assert_eq!(resolve_baseline(&[Eight, Eight], Ten, flags), Action::Split);
    }

    #[test]
    fn test_pair_aces_and_eights() {
        assert_eq!(baseline(&[Ace, Ace], Ace), Action::Split);
        assert_eq!(baseline(&[Eight, Eight], Six), Action::Split);
        assert_eq!(baseline(&[Eight, Eight], Seven), Action::Split);
    }

    #[test]
    fn test_pair_tens_stand() {
        assert_eq!(baseline(&[King, Queen], Six), Action::Stand);
        assert_eq!(baseline(&[Ten, Ten], Five), Action::Stand);
    }

    #[test]
    fn test_pair_nines() {
        assert_eq!(baseline(&[Nine, Nine], Two), Action::Split);
        assert_eq!(baseline(&[Nine, Nine], Six), Action::Split);
        assert_eq!(baseline(&[Nine, Nine], Seven), Action::Stand);
        assert_eq!(baseline(&[Nine, Nine], Eight), Action::Split);
        assert_eq!(baseline(&[Nine, Nine], Nine), Action::Split);
        assert_eq!(baseline(&[Nine, Nine], Ten), Action::Stand);
        assert_eq!(baseline(&[Nine, Nine], Ace), Action::Stand);
    }

    #[test]
    fn test_pair_sevens_and_sixes() {
        assert_eq!(baseline(&[Seven, Seven], Seven), Action::Split);
        assert_eq!(baseline(&[Seven, Seven], Eight), Action::Hit);
        assert_eq!(baseline(&[Six, Six], Six), Action::Split);
        assert_eq!(baseline(&[Six, Six], Seven), Action::Hit);
    }

    #[test]
    fn test_pair_fives_never_split() {
        assert_eq!(baseline(&[Five, Five], Nine), Action::Double);
        assert_eq!(baseline(&[Five, Five], Ten), Action::Hit);
        assert_eq!(no_double(&[Five, Five], Six), Action::Hit);
    }

    #[test]
    fn test_pair_low_cards() {
        assert_eq!(baseline(&[Four, Four], Five), Action::Split);
        assert_eq!(baseline(&[Four, Four], Four), Action::Hit);
        assert_eq!(baseline(&[Three, Three], Two), Action::Split);
        assert_eq!(baseline(&[Two, Two], Seven), Action::Split);
        assert_eq!(baseline(&[Two, Two], Eight), Action::Hit);
    }

    #[test]
    fn test_pair_without_split_flag_uses_totals() {
        let flags = CapabilityFlags {
            can_split: false,
            ..CapabilityFlags::ALL
        };
        assert_eq!(resolve_baseline(&[Eight, Eight], Six, flags), Action::Stand);
        assert_eq!(resolve_baseline(&[Ace, Ace], Six, flags), Action::Hit);
    }

    #[test]
    fn test_soft_totals() {
        assert_eq!(baseline(&[Ace, Nine], Six), Action::Stand);
        assert_eq!(baseline(&[Ace, Eight], Six), Action::Double);
        assert_eq!(baseline(&[Ace, Eight], Five), Action::Stand);
        assert_eq!(baseline(&[Ace, Seven], Three), Action::Double);
        assert_eq!(baseline(&[Ace, Seven], Two), Action::Stand);
        assert_eq!(baseline(&[Ace, Seven], Eight), Action::Stand);
        assert_eq!(baseline(&[Ace, Seven], Nine), Action::Hit);
        assert_eq!(baseline(&[Ace, Six], Three), Action::Double);
        assert_eq!(baseline(&[Ace, Six], Two), Action::Hit);
        assert_eq!(baseline(&[Ace, Five], Four), Action::Double);
        assert_eq!(baseline(&[Ace, Four], Three), Action::Hit);
        assert_eq!(baseline(&[Ace, Three], Five), Action::Double);
        assert_eq!(baseline(&[Ace, Two], Four), Action::Hit);
    }

    #[test]
    fn test_soft_totals_without_double() {
        assert_eq!(no_double(&[Ace, Eight], Six), Action::Stand);
        assert_eq!(no_double(&[Ace, Seven], Four), Action::Hit);
        assert_eq!(no_double(&[Ace, Six], Five), Action::Hit);
        assert_eq!(baseline(&[Ace, Two, Four], Five), Action::Double);
    }

    #[test]
    fn test_hard_totals() {
        assert_eq!(baseline(&[Ten, Seven], Ace), Action::Stand);
        assert_eq!(baseline(&[Five, Three], Six), Action::Hit);
        assert_eq!(baseline(&[Five, Four], Three), Action::Double);
        assert_eq!(baseline(&[Five, Four], Two), Action::Hit);
        assert_eq!(baseline(&[Six, Four], Nine), Action::Double);
        assert_eq!(baseline(&[Six, Four], Ten), Action::Hit);
        assert_eq!(baseline(&[Six, Five], Ten), Action::Double);
        assert_eq!(baseline(&[Six, Five], Ace), Action::Hit);
        assert_eq!(baseline(&[Ten, Two], Four), Action::Stand);
        assert_eq!(baseline(&[Ten, Two], Three), Action::Hit);
        assert_eq!(baseline(&[Ten, Three], Two), Action::Stand);
        assert_eq!(baseline(&[Ten, Six], Seven), Action::Hit);
    }

    #[test]
    fn test_hard_totals_without_double() {
        assert_eq!(no_double(&[Six, Five], Six), Action::Hit);
        assert_eq!(no_double(&[Six, Four], Two), Action::Hit);
        assert_eq!(no_double(&[Five, Four], Four), Action::Hit);
    }

    #[test]
    fn test_soft_hand_turned_hard() {
        // A,6,9 is hard 16: no surrender with three cards.
        assert_eq!(baseline(&[Ace, Six, Nine], Ten), Action::Hit);
        assert_eq!(baseline(&[Ace, Six, Nine], Five), Action::Stand);
    }

    #[test]
    fn test_rules_in_isolation() {
        let s = Situation::new(&[Eight, Eight], Ten, CapabilityFlags::ALL);
        assert_eq!(BaselineRule::Surrender.apply(&s), Some(Action::Surrender));
        assert_eq!(BaselineRule::Pair.apply(&s), Some(Action::Split));
        assert_eq!(BaselineRule::Soft.apply(&s), None);
        assert_eq!(BaselineRule::Hard.apply(&s), Some(Action::Hit));
    }
}
