use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use crate::HandTotal;

/// Composite key of the per-hand expectation tables: player score, softness
/// and dealer up card. Construction validates the domain, so a mis-keyed
/// lookup fails here instead of silently reading a wrong cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandKey {
    score: u8,
    soft: bool,
    up_card: u8,
}

impl HandKey {
    pub fn new(score: u8, soft: bool, up_card: u8) -> HandKey {
        if score == 0 || score > 21 {
            panic!("Invalid player score {}! It must be in [1, 21]", score);
        }
        if up_card == 0 || up_card > 10 {
            panic!("Invalid dealer up card {}! It must be in [1, 10]", up_card);
        }
        HandKey {
            score,
            soft,
            up_card,
        }
    }
}

/// Key of the split-expectation table: the rank both pair cards share and
/// the dealer up card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairKey {
    pair_rank: u8,
    up_card: u8,
}

impl PairKey {
    pub fn new(pair_rank: u8, up_card: u8) -> PairKey {
        if pair_rank == 0 || pair_rank > 10 {
            panic!("Invalid pair rank {}! It must be in [1, 10]", pair_rank);
        }
        if up_card == 0 || up_card > 10 {
            panic!("Invalid dealer up card {}! It must be in [1, 10]", up_card);
        }
        PairKey { pair_rank, up_card }
    }
}

/// Expectation cells for every (score, softness, up card) combination.
/// Cells start unset. Reading an unset cell, or setting a cell twice,
/// breaks the construction order and panics with the offending key.
#[derive(Clone, Debug)]
pub struct ExpectationTable {
    cells: [[[Option<f64>; 10]; 2]; 21],
}

impl ExpectationTable {
    pub fn new() -> ExpectationTable {
        ExpectationTable {
            cells: [[[None; 10]; 2]; 21],
        }
    }

    pub fn contains(&self, key: HandKey) -> bool {
        self.cell(key).is_some()
    }

    pub fn get(&self, key: HandKey) -> f64 {
        match self.cell(key) {
            Some(value) => value,
            None => panic!("No expectation recorded for {:?}", key),
        }
    }

    pub fn set(&mut self, key: HandKey, value: f64) {
        let cell =
            &mut self.cells[(key.score - 1) as usize][key.soft as usize][(key.up_card - 1) as usize];
        if cell.is_some() {
            panic!("Expectation for {:?} recorded twice", key);
        }
        *cell = Some(value);
    }

    fn cell(&self, key: HandKey) -> Option<f64> {
        self.cells[(key.score - 1) as usize][key.soft as usize][(key.up_card - 1) as usize]
    }
}

impl Default for ExpectationTable {
    fn default() -> Self {
        ExpectationTable::new()
    }
}

/// Split expectations for every (pair rank, up card) combination. Same
/// unset-cell contract as [`ExpectationTable`].
#[derive(Clone, Debug)]
pub struct SplitTable {
    cells: [[Option<f64>; 10]; 10],
}

impl SplitTable {
    pub fn new() -> SplitTable {
        SplitTable {
            cells: [[None; 10]; 10],
        }
    }

    pub fn get(&self, key: PairKey) -> f64 {
        match self.cells[(key.pair_rank - 1) as usize][(key.up_card - 1) as usize] {
            Some(value) => value,
            None => panic!("No expectation recorded for {:?}", key),
        }
    }

    pub fn set(&mut self, key: PairKey, value: f64) {
        let cell = &mut self.cells[(key.pair_rank - 1) as usize][(key.up_card - 1) as usize];
        if cell.is_some() {
            panic!("Expectation for {:?} recorded twice", key);
        }
        *cell = Some(value);
    }
}

impl Default for SplitTable {
    fn default() -> Self {
        SplitTable::new()
    }
}

/// This struct provides a convenient way to use a HandTotal as the index of
/// an array. The dealer recursion memoizes its sub-distributions here.
#[derive(Debug, Default, Clone)]
pub struct TotalStateArray<T: Default> {
    data: HashMap<HandTotal, T>,
}

impl<T: Default> TotalStateArray<T> {
    pub fn new() -> TotalStateArray<T> {
        TotalStateArray {
            data: HashMap::new(),
        }
    }

    pub fn contains_state(&self, index: HandTotal) -> bool {
        self.data.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: Default> Index<HandTotal> for TotalStateArray<T> {
    type Output = T;
    fn index(&self, index: HandTotal) -> &Self::Output {
        match self.data.get(&index) {
            Some(value) => value,
            None => panic!("No state recorded for {:?}", index),
        }
    }
}

impl<T: Default> IndexMut<HandTotal> for TotalStateArray<T> {
    fn index_mut(&mut self, index: HandTotal) -> &mut Self::Output {
        self.data.entry(index).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn expectation_table_stores_and_returns_cells() {
        let mut table = ExpectationTable::new();
        let mut rng = rand::thread_rng();
        for _turn in 0..100 {
            let score = rng.gen_range(1..=21);
            let up_card = rng.gen_range(1..=10);
            let soft = rng.gen_bool(0.5);
            let key = HandKey::new(score, soft, up_card);
            if table.contains(key) {
                continue;
            }
            let value = (score as f64) * 100.0 + (up_card as f64) + (soft as u8 as f64) * 0.5;
            table.set(key, value);
            assert_eq!(table.get(key), value);
        }
    }

    #[test]
    fn soft_and_hard_cells_are_distinct() {
        let mut table = ExpectationTable::new();
        table.set(HandKey::new(16, false, 10), -0.5);
        table.set(HandKey::new(16, true, 10), -0.3);
        assert_eq!(table.get(HandKey::new(16, false, 10)), -0.5);
        assert_eq!(table.get(HandKey::new(16, true, 10)), -0.3);
    }

    #[test]
    #[should_panic]
    fn out_of_domain_score_should_panic() {
        HandKey::new(22, false, 5);
    }

    #[test]
    #[should_panic]
    fn out_of_domain_up_card_should_panic() {
        HandKey::new(16, false, 11);
    }

    #[test]
    #[should_panic]
    fn unset_cell_should_panic() {
        let table = ExpectationTable::new();
        table.get(HandKey::new(12, false, 4));
    }

    #[test]
    #[should_panic]
    fn double_set_should_panic() {
        let mut table = ExpectationTable::new();
        table.set(HandKey::new(12, false, 4), 0.1);
        table.set(HandKey::new(12, false, 4), 0.2);
    }

    #[test]
    fn split_table_stores_and_returns_cells() {
        let mut table = SplitTable::new();
        for pair_rank in 1..=10u32 {
            for up_card in 1..=10u32 {
                table.set(
                    PairKey::new(pair_rank as u8, up_card as u8),
                    (pair_rank * 100 + up_card) as f64,
                );
            }
        }
        assert_eq!(table.get(PairKey::new(8, 10)), 810.0);
    }

    #[test]
    #[should_panic]
    fn invalid_pair_rank_should_panic() {
        PairKey::new(11, 5);
    }

    #[test]
    fn total_state_array_indexes_by_hand_total() {
        let mut array: TotalStateArray<i32> = TotalStateArray::new();
        array[HandTotal::new(16, false)] = 666;
        array[HandTotal::new(16, true)] = 111;
        assert_eq!(array[HandTotal::new(16, false)], 666);
        assert_eq!(array[HandTotal::new(16, true)], 111);
        assert_eq!(array.len(), 2);
        assert!(array.contains_state(HandTotal::new(16, true)));
        assert!(!array.contains_state(HandTotal::new(17, false)));
    }

    #[test]
    #[should_panic]
    fn missing_state_should_panic() {
        let array: TotalStateArray<i32> = TotalStateArray::new();
        let _ = array[HandTotal::new(12, false)];
    }
}
