use crate::dealer::DealerOutcomes;
use crate::table::{ExpectationTable, HandKey, PairKey, SplitTable};
use crate::{HandTotal, Rule};

/// Expectations of the three always-available actions for one hand, in
/// units of the original bet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionExpectation {
    pub hit: f64,
    pub stand: f64,
    pub double: f64,
}

/// Owns the four expectation tables and the pair base-hand map. Everything
/// is computed once at construction, in dependency order, and only read
/// afterwards.
///
/// The build works backward: a hit from score S only ever reaches scores
/// above S, so filling high scores first turns every lookahead into a
/// plain table read. Per up card the order is hard 21 down to 11, soft 21
/// down to 11 (soft hands re-score into hard totals of at least 12), hard
/// 10 down to 1, soft 10 down to 1, and finally the pairs, which need the
/// finished column.
pub struct PlayerDecisions {
    rule: Rule,
    dealer: DealerOutcomes,
    ex_hit: ExpectationTable,
    ex_stand: ExpectationTable,
    ex_double: ExpectationTable,
    ex_split: SplitTable,
    pair_base_hands: [HandTotal; 10],
}

impl PlayerDecisions {
    pub fn new(rule: &Rule, dealer: DealerOutcomes) -> PlayerDecisions {
        let mut ex_hit = ExpectationTable::new();
        let mut ex_stand = ExpectationTable::new();
        let mut ex_double = ExpectationTable::new();
        let mut ex_split = SplitTable::new();

        // The up-card columns are independent of each other.
        for up_card in 1..=10 {
            // Hard 21 down to 11, working backward.
            for score in (11..=21).rev() {
                set_expectations(
                    rule, &dealer, &mut ex_hit, &mut ex_stand, &mut ex_double, score, false,
                    up_card,
                );
            }
            // Soft 21 down to 11; these only re-score into hard totals that
            // are already recorded.
            for score in (11..=21).rev() {
                set_expectations(
                    rule, &dealer, &mut ex_hit, &mut ex_stand, &mut ex_double, score, true,
                    up_card,
                );
            }
            // Hard, then soft, 10 down to 1; these rely on the 11..=21 rows.
            for score in (1..=10).rev() {
                set_expectations(
                    rule, &dealer, &mut ex_hit, &mut ex_stand, &mut ex_double, score, false,
                    up_card,
                );
            }
            for score in (1..=10).rev() {
                set_expectations(
                    rule, &dealer, &mut ex_hit, &mut ex_stand, &mut ex_double, score, true,
                    up_card,
                );
            }

            // Pairs need the finished column.
            for pair_rank in 1..=10 {
                let one_card_hand = evaluate_hand_in(
                    rule,
                    &dealer,
                    &ex_hit,
                    &ex_stand,
                    &ex_double,
                    pair_rank,
                    pair_rank == 1,
                    up_card,
                    true,
                );
                // Two identically distributed hands, each starting from one
                // pair card and hitting optimally. Resplitting is excluded.
                ex_split.set(PairKey::new(pair_rank, up_card), 2.0 * one_card_hand.hit);
            }
        }

        let mut pair_base_hands = [HandTotal::EMPTY; 10];
        for pair_rank in 1..=10u8 {
            pair_base_hands[(pair_rank - 1) as usize] =
                HandTotal::EMPTY.add_rank(pair_rank).add_rank(pair_rank);
        }

        PlayerDecisions {
            rule: *rule,
            dealer,
            ex_hit,
            ex_stand,
            ex_double,
            ex_split,
            pair_base_hands,
        }
    }

    /// Expectations of hitting, standing and doubling on the given hand.
    /// With `first_card_only` the score is a single dealt card, as after a
    /// split; a lone Ace then scores as soft 11.
    pub fn evaluate_hand(
        &self,
        score: u8,
        soft: bool,
        up_card: u8,
        first_card_only: bool,
    ) -> ActionExpectation {
        evaluate_hand_in(
            &self.rule,
            &self.dealer,
            &self.ex_hit,
            &self.ex_stand,
            &self.ex_double,
            score,
            soft,
            up_card,
            first_card_only,
        )
    }

    /// Expectation of playing the given hand optimally from here on.
    /// Scores past 21 are a finished loss.
    pub fn best_expectation(&self, score: u8, soft: bool, up_card: u8, double_allowed: bool) -> f64 {
        best_expectation_in(
            &self.ex_hit,
            &self.ex_stand,
            &self.ex_double,
            HandTotal::new(score, soft),
            up_card,
            double_allowed,
        )
    }

    pub fn expectation_if_hit(&self, score: u8, soft: bool, up_card: u8) -> f64 {
        self.ex_hit.get(HandKey::new(score, soft, up_card))
    }

    pub fn expectation_if_stand(&self, score: u8, soft: bool, up_card: u8) -> f64 {
        self.ex_stand.get(HandKey::new(score, soft, up_card))
    }

    pub fn expectation_if_double(&self, score: u8, soft: bool, up_card: u8) -> f64 {
        self.ex_double.get(HandKey::new(score, soft, up_card))
    }

    pub fn expectation_of_splitting(&self, pair_rank: u8, up_card: u8) -> f64 {
        self.ex_split.get(PairKey::new(pair_rank, up_card))
    }

    /// The hand a pair scores as when kept together: soft 12 for Aces,
    /// hard 2k otherwise.
    pub fn pair_base_hand(&self, pair_rank: u8) -> HandTotal {
        if pair_rank == 0 || pair_rank > 10 {
            panic!("Invalid pair rank {}! It must be in [1, 10]", pair_rank);
        }
        self.pair_base_hands[(pair_rank - 1) as usize]
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn dealer(&self) -> &DealerOutcomes {
        &self.dealer
    }
}

/// Evaluates one hand against partially or fully built tables and records
/// the three expectations under its key.
fn set_expectations(
    rule: &Rule,
    dealer: &DealerOutcomes,
    ex_hit: &mut ExpectationTable,
    ex_stand: &mut ExpectationTable,
    ex_double: &mut ExpectationTable,
    score: u8,
    soft: bool,
    up_card: u8,
) {
    let choices = evaluate_hand_in(
        rule, dealer, ex_hit, ex_stand, ex_double, score, soft, up_card, false,
    );
    let key = HandKey::new(score, soft, up_card);
    ex_hit.set(key, choices.hit);
    ex_stand.set(key, choices.stand);
    ex_double.set(key, choices.double);
}

fn evaluate_hand_in(
    rule: &Rule,
    dealer: &DealerOutcomes,
    ex_hit: &ExpectationTable,
    ex_stand: &ExpectationTable,
    ex_double: &ExpectationTable,
    mut score: u8,
    mut soft: bool,
    up_card: u8,
    first_card_only: bool,
) -> ActionExpectation {
    // A lone Ace scores as soft 11.
    if first_card_only && score == 1 {
        score = 11;
        soft = true;
    }
    // A busted soft score re-scores as hard.
    if score > 21 && soft {
        score -= 10;
        soft = false;
    }
    if score > 21 {
        return ActionExpectation {
            hit: -1.0,
            stand: -1.0,
            double: -1.0,
        };
    }

    let stand = dealer.expected_payoff(up_card, score);

    // Doubling after a split is only open when the rule allows it.
    let double_allowed_next = first_card_only && rule.allow_das;
    let total = HandTotal::new(score, soft);
    let mut hit = 0.0;
    let mut double = 0.0;
    for rank in 1..=13 {
        let next_total = total.add_rank(rank);
        // One-ply lookahead into the already-built tables.
        hit += best_expectation_in(
            ex_hit,
            ex_stand,
            ex_double,
            next_total,
            up_card,
            double_allowed_next,
        ) / 13.0;
        // Doubling stands on exactly one more card, at twice the stake.
        double += 2.0 * dealer.expected_payoff(up_card, next_total.score()) / 13.0;
    }

    ActionExpectation { hit, stand, double }
}

fn best_expectation_in(
    ex_hit: &ExpectationTable,
    ex_stand: &ExpectationTable,
    ex_double: &ExpectationTable,
    total: HandTotal,
    up_card: u8,
    double_allowed: bool,
) -> f64 {
    if total.score() > 21 {
        return -1.0;
    }
    let key = HandKey::new(total.score(), total.is_soft(), up_card);
    let mut best = ex_stand.get(key).max(ex_hit.get(key));
    if double_allowed {
        best = best.max(ex_double.get(key));
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PeekPolicy;

    fn get_typical_rule() -> Rule {
        Rule {
            dealer_hit_on_soft17: true,
            peek_policy: PeekPolicy::UpAceOrTen,
            allow_das: true,
        }
    }

    fn build_player(rule: &Rule) -> PlayerDecisions {
        PlayerDecisions::new(rule, DealerOutcomes::new(rule))
    }

    #[test]
    fn every_cell_is_populated() {
        let player = build_player(&get_typical_rule());
        for up_card in 1..=10 {
            for score in 1..=21 {
                for soft in [false, true] {
                    // Panics on an unpopulated cell.
                    let _ = player.expectation_if_hit(score, soft, up_card);
                    let _ = player.expectation_if_stand(score, soft, up_card);
                    let _ = player.expectation_if_double(score, soft, up_card);
                }
            }
            for pair_rank in 1..=10 {
                let _ = player.expectation_of_splitting(pair_rank, up_card);
            }
        }
    }

    #[test]
    fn busted_hands_are_a_finished_loss() {
        let player = build_player(&get_typical_rule());
        let choices = player.evaluate_hand(22, false, 5, false);
        assert_eq!(choices.hit, -1.0);
        assert_eq!(choices.stand, -1.0);
        assert_eq!(choices.double, -1.0);
        assert_eq!(player.best_expectation(25, false, 5, true), -1.0);
    }

    #[test]
    fn busted_soft_scores_rescore_as_hard() {
        let player = build_player(&get_typical_rule());
        let rescored = player.evaluate_hand(25, true, 5, false);
        let hard = player.evaluate_hand(15, false, 5, false);
        assert_eq!(rescored, hard);
    }

    #[test]
    fn standing_on_seventeen_or_more_beats_hitting() {
        let player = build_player(&get_typical_rule());
        for up_card in 1..=10 {
            for score in 17..=21 {
                assert!(
                    player.expectation_if_stand(score, false, up_card)
                        >= player.expectation_if_hit(score, false, up_card),
                    "hard {} vs up card {}",
                    score,
                    up_card
                );
            }
        }
    }

    #[test]
    fn hitting_hard_eleven_against_a_ten_is_favored() {
        let player = build_player(&get_typical_rule());
        assert!(player.expectation_if_hit(11, false, 10) > 0.0);
        assert!(
            player.expectation_if_hit(11, false, 10) > player.expectation_if_stand(11, false, 10)
        );
    }

    #[test]
    fn twenty_one_dominates_hard_twelve() {
        let player = build_player(&get_typical_rule());
        for up_card in 1..=10 {
            assert!(
                player.best_expectation(21, false, up_card, false)
                    > player.best_expectation(12, false, up_card, false)
            );
        }
    }

    #[test]
    fn splitting_aces_doubles_the_one_card_hit_expectation() {
        let player = build_player(&get_typical_rule());
        for up_card in 1..=10 {
            let one_card_hit = player.evaluate_hand(1, true, up_card, true).hit;
            assert_eq!(
                player.expectation_of_splitting(1, up_card),
                2.0 * one_card_hit
            );
        }
    }

    #[test]
    fn aces_and_eights_always_split() {
        let player = build_player(&get_typical_rule());
        for up_card in 1..=10 {
            let aces_kept = player.best_expectation(12, true, up_card, true);
            assert!(
                player.expectation_of_splitting(1, up_card) > aces_kept,
                "pair of Aces vs up card {}",
                up_card
            );
            let eights_kept = player.best_expectation(16, false, up_card, true);
            assert!(
                player.expectation_of_splitting(8, up_card) > eights_kept,
                "pair of 8s vs up card {}",
                up_card
            );
        }
    }

    #[test]
    fn pair_base_hands_match_their_cards() {
        let player = build_player(&get_typical_rule());
        assert_eq!(player.pair_base_hand(1), HandTotal::new(12, true));
        assert_eq!(player.pair_base_hand(8), HandTotal::new(16, false));
        assert_eq!(player.pair_base_hand(10), HandTotal::new(20, false));
    }

    #[test]
    fn rebuilding_reproduces_identical_tables() {
        let rule = get_typical_rule();
        let first = build_player(&rule);
        let second = build_player(&rule);
        for up_card in 1..=10 {
            for score in 1..=21 {
                for soft in [false, true] {
                    assert_eq!(
                        first.expectation_if_hit(score, soft, up_card),
                        second.expectation_if_hit(score, soft, up_card)
                    );
                    assert_eq!(
                        first.expectation_if_stand(score, soft, up_card),
                        second.expectation_if_stand(score, soft, up_card)
                    );
                    assert_eq!(
                        first.expectation_if_double(score, soft, up_card),
                        second.expectation_if_double(score, soft, up_card)
                    );
                }
            }
            for pair_rank in 1..=10 {
                assert_eq!(
                    first.expectation_of_splitting(pair_rank, up_card),
                    second.expectation_of_splitting(pair_rank, up_card)
                );
            }
        }
    }

    #[test]
    fn double_after_split_rule_changes_the_split_expectation() {
        let with_das = build_player(&get_typical_rule());
        let without_das = build_player(&Rule {
            allow_das: false,
            ..get_typical_rule()
        });
        // Doubling the fresh hand is only ever extra value; 5,5 against a
        // weak dealer card is a canonical double spot.
        assert!(
            with_das.expectation_of_splitting(5, 6) > without_das.expectation_of_splitting(5, 6)
        );
    }
}
