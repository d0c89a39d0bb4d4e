pub mod dealer;
pub mod player;
pub mod strategy;

mod hand;
mod table;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};

pub use dealer::{evaluate_dealer_hand, DealerOutcomes, FinalTotal, FinalTotalDistribution};
pub use hand::HandTotal;
pub use player::{ActionExpectation, PlayerDecisions};
pub use strategy::{ChartCell, StrategyChart, UP_CARD_COLUMNS};
pub use table::{ExpectationTable, HandKey, PairKey, SplitTable, TotalStateArray};

/// The rule toggles the solver depends on. Everything else about the game
/// (infinite shoe, no resplits, no surrender, no insurance) is fixed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rule {
    pub dealer_hit_on_soft17: bool,
    pub peek_policy: PeekPolicy,
    pub allow_das: bool,
}

impl Default for Rule {
    fn default() -> Self {
        Rule {
            dealer_hit_on_soft17: true,
            peek_policy: PeekPolicy::UpAceOrTen,
            allow_das: true,
        }
    }
}

/// Whether the dealer checks the hole card for a two-card 21 before play
/// continues. Under `UpAceOrTen`, a dealt dealer Blackjack ends the round
/// before any player decision, so the outcome distributions used for
/// strategy are conditioned on the hole card not completing one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize_enum_str, Deserialize_enum_str)]
pub enum PeekPolicy {
    UpAceOrTen,
    NoPeek,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Decision {
    PlaceHolder,
    Hit,
    Stand,
    Double,
    Split,
}

impl Default for Decision {
    fn default() -> Self {
        Decision::PlaceHolder
    }
}
