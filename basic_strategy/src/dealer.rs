use crate::table::TotalStateArray;
use crate::{HandTotal, PeekPolicy, Rule};

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// The classes a finished dealer hand can land in. The dealer never stands
/// below 17, so everything past that is a single Bust class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum FinalTotal {
    Seventeen,
    Eighteen,
    Nineteen,
    Twenty,
    TwentyOne,
    Bust,
}

impl FinalTotal {
    /// Bust reports as 22, one past the best standing total.
    pub fn score(self) -> u8 {
        match self {
            FinalTotal::Seventeen => 17,
            FinalTotal::Eighteen => 18,
            FinalTotal::Nineteen => 19,
            FinalTotal::Twenty => 20,
            FinalTotal::TwentyOne => 21,
            FinalTotal::Bust => 22,
        }
    }

    fn from_standing_total(total: HandTotal) -> FinalTotal {
        match total.score() {
            17 => FinalTotal::Seventeen,
            18 => FinalTotal::Eighteen,
            19 => FinalTotal::Nineteen,
            20 => FinalTotal::Twenty,
            21 => FinalTotal::TwentyOne,
            s if s > 21 => FinalTotal::Bust,
            _ => panic!("Impossible to reach"),
        }
    }

    fn index(self) -> usize {
        (self.score() - 17) as usize
    }
}

/// Exact probabilities of each final dealer total. For a fixed dealer start
/// the probabilities sum to 1.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FinalTotalDistribution {
    probabilities: [f64; 6],
}

impl FinalTotalDistribution {
    fn degenerate(total: FinalTotal) -> FinalTotalDistribution {
        let mut distribution = FinalTotalDistribution::default();
        distribution.probabilities[total.index()] = 1.0;
        distribution
    }

    pub fn probability(&self, total: FinalTotal) -> f64 {
        self.probabilities[total.index()]
    }

    pub fn p_bust(&self) -> f64 {
        self.probability(FinalTotal::Bust)
    }

    pub fn total_probability(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Net expectation of standing on `player_score` against this dealer
    /// start, in units of the original bet. A busted player has already
    /// lost, whatever the dealer does afterwards.
    pub fn expected_payoff(&self, player_score: u8) -> f64 {
        if player_score > 21 {
            return -1.0;
        }
        let mut expected_payoff = 0.0;
        for total in FinalTotal::iter() {
            if total == FinalTotal::Bust || player_score > total.score() {
                expected_payoff += self.probability(total);
            } else if total.score() > player_score {
                expected_payoff -= self.probability(total);
            }
        }
        expected_payoff
    }

    fn add_assign_with_p(&mut self, rhs: &FinalTotalDistribution, p: f64) {
        for i in 0..self.probabilities.len() {
            self.probabilities[i] += rhs.probabilities[i] * p;
        }
    }
}

/// Returns the exact distribution over final dealer totals for a given
/// (possibly partial) dealer hand. A single-card hand is the visible start
/// of a round, so the peek rule restricts its second card; deeper hands
/// draw from all 13 ranks.
pub fn evaluate_dealer_hand(rule: &Rule, hand_cards: &[u8]) -> FinalTotalDistribution {
    let total = HandTotal::from_cards(hand_cards);
    let mut odds = TotalStateArray::new();
    if hand_cards.len() == 1 {
        return up_card_final_totals(rule, hand_cards[0].min(10), &mut odds);
    }
    memoization_dealer_final_totals(rule, total, &mut odds);
    odds[total]
}

/// The degenerate outcome of a hand the dealer no longer draws to, or None
/// while the dealer must keep hitting.
fn standing_outcome(rule: &Rule, total: HandTotal) -> Option<FinalTotalDistribution> {
    let stands = total.score() > 17
        || (total.score() == 17 && !(rule.dealer_hit_on_soft17 && total.is_soft()));
    if stands {
        Some(FinalTotalDistribution::degenerate(
            FinalTotal::from_standing_total(total),
        ))
    } else {
        None
    }
}

/// Distribution for a bare up card. The first draw is special: when the
/// peek rule applies, the ranks completing a two-card 21 are excluded and
/// the remaining ranks are re-weighted uniformly.
fn up_card_final_totals(
    // Input parameters
    rule: &Rule,
    up_card_value: u8,

    // Output parameters
    odds: &mut TotalStateArray<FinalTotalDistribution>,
) -> FinalTotalDistribution {
    let start = HandTotal::EMPTY.add_rank(up_card_value);

    let possible_next_ranks = match rule.peek_policy {
        PeekPolicy::UpAceOrTen => match up_card_value {
            1 => 1..=9,
            10 => 2..=13,
            _ => 1..=13,
        },
        PeekPolicy::NoPeek => 1..=13,
    };

    let p = 1.0 / possible_next_ranks.clone().count() as f64;
    let mut merged = FinalTotalDistribution::default();
    for rank in possible_next_ranks {
        let next_total = start.add_rank(rank);
        memoization_dealer_final_totals(rule, next_total, odds);
        merged.add_assign_with_p(&odds[next_total], p);
    }
    merged
}

/// Memoized recursion over hand-total classes. Sub-distributions only
/// depend on (score, softness), so the memo is shared across all up cards.
fn memoization_dealer_final_totals(
    // Input parameters
    rule: &Rule,

    // Parameters to maintain current state
    current_total: HandTotal,

    // Output parameters
    odds: &mut TotalStateArray<FinalTotalDistribution>,
) {
    if odds.contains_state(current_total) {
        return;
    }

    // Case 1: Dealer busts or must stand.
    if let Some(outcome) = standing_outcome(rule, current_total) {
        odds[current_total] = outcome;
        return;
    }

    // Case 2: Dealer must hit. Merge the 13 equally likely sub-distributions.
    let mut merged = FinalTotalDistribution::default();
    for rank in 1..=13 {
        let next_total = current_total.add_rank(rank);
        memoization_dealer_final_totals(rule, next_total, odds);
        merged.add_assign_with_p(&odds[next_total], 1.0 / 13.0);
    }
    odds[current_total] = merged;
}

/// Owns the outcome distribution of every dealer up card. All ten are
/// computed eagerly at construction and never recomputed.
#[derive(Debug, Clone)]
pub struct DealerOutcomes {
    outcomes: [FinalTotalDistribution; 10],
}

impl DealerOutcomes {
    pub fn new(rule: &Rule) -> DealerOutcomes {
        let mut odds = TotalStateArray::new();
        let mut outcomes = [FinalTotalDistribution::default(); 10];
        for up_card in 1..=10u8 {
            outcomes[(up_card - 1) as usize] = up_card_final_totals(rule, up_card, &mut odds);
        }
        DealerOutcomes { outcomes }
    }

    /// Up cards above 10 collapse to 10 (face cards).
    pub fn outcome_for(&self, up_card: u8) -> &FinalTotalDistribution {
        if up_card == 0 || up_card > 13 {
            panic!("Invalid dealer up card {}! It must be in [1, 13]", up_card);
        }
        &self.outcomes[(up_card.min(10) - 1) as usize]
    }

    pub fn expected_payoff(&self, up_card: u8, player_score: u8) -> f64 {
        self.outcome_for(up_card).expected_payoff(player_score)
    }
}
