/// A hand reduced to the only state that matters under an infinite shoe:
/// the score and whether an Ace is currently counted as 11.
///
/// Convention: a hand is scored soft whenever the Ace can count as 11
/// without busting, and only one Ace per hand ever counts as 11. A hand
/// built from cards therefore satisfies `soft ==> score >= 11`. The
/// expectation tables also hold cells for soft scores below 11 to keep
/// their domain rectangular; the addition rule is well-defined there too.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandTotal {
    score: u8,
    soft: bool,
}

impl HandTotal {
    pub const EMPTY: HandTotal = HandTotal {
        score: 0,
        soft: false,
    };

    pub fn new(score: u8, soft: bool) -> HandTotal {
        HandTotal { score, soft }
    }

    /// Scores a sequence of card ranks. Ranks run 1 to 13; ranks above 10
    /// are worth 10. Panics on a rank outside [1, 13].
    pub fn from_cards(ranks: &[u8]) -> HandTotal {
        let mut total = HandTotal::EMPTY;
        for &rank in ranks {
            if rank == 0 || rank > 13 {
                panic!("Invalid card rank {}! It must be in [1, 13]", rank);
            }
            total = total.add_rank(rank);
        }
        total
    }

    /// The total after drawing one more card of the given rank. An Ace adds
    /// 11 to a hard hand and 1 otherwise; a soft total that exceeds 21 is
    /// re-scored hard by counting the Ace as 1 again.
    ///
    /// Note that this method won't check that the rank is valid.
    pub fn add_rank(self, rank: u8) -> HandTotal {
        let mut score = self.score;
        let mut soft = self.soft;
        if rank == 1 && !soft {
            score += 11;
            soft = true;
        } else {
            score += rank.min(10);
        }
        if score > 21 && soft {
            score -= 10;
            soft = false;
        }
        HandTotal { score, soft }
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn is_soft(&self) -> bool {
        self.soft
    }

    pub fn bust(&self) -> bool {
        self.score > 21
    }
}
