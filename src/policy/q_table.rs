use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use std::hash::Hash;

use crate::utils::{argmax, max};

/// Sparse table of action values. Rows are created lazily, zero initialised,
/// and never removed while the table lives.
#[derive(Debug, Clone)]
pub struct QTable<T: Hash + PartialEq + Eq + Clone, const COUNT: usize> {
    default: [f64; COUNT],
    values: IndexMap<T, [f64; COUNT], FxBuildHasher>,
}

impl<T: Hash + PartialEq + Eq + Clone, const COUNT: usize> Default for QTable<T, COUNT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + PartialEq + Eq + Clone, const COUNT: usize> QTable<T, COUNT> {
    pub fn new() -> Self {
        Self {
            default: [0.0; COUNT],
            values: IndexMap::default(),
        }
    }

    pub fn ensure_row(&mut self, obs: &T) -> &mut [f64; COUNT] {
        self.values.entry(obs.clone()).or_insert(self.default)
    }

    pub fn get(&self, obs: &T) -> Option<&[f64; COUNT]> {
        self.values.get(obs)
    }

    pub fn contains(&self, obs: &T) -> bool {
        self.values.contains_key(obs)
    }

    /// Position of the row in creation order.
    pub fn row_index(&self, obs: &T) -> Option<usize> {
        self.values.get_index_of(obs)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, &[f64; COUNT])> {
        self.values.iter()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn greedy_action(&mut self, obs: &T) -> usize {
        argmax(self.ensure_row(obs))
    }

    /// One-step Q-learning update, returns the temporal difference.
    pub fn update(
        &mut self,
        curr_obs: &T,
        next_obs: &T,
        curr_action: usize,
        reward: f64,
        learning_rate: f64,
        discount_factor: f64,
    ) -> f64 {
        assert!(
            curr_action < COUNT,
            "action index {} is outside the table width {}",
            curr_action,
            COUNT
        );
        let future_q_value: f64 = max(self.ensure_row(next_obs));
        let curr_q_values: &mut [f64; COUNT] = self.ensure_row(curr_obs);
        let temporal_difference: f64 =
            reward + discount_factor * future_q_value - curr_q_values[curr_action];
        curr_q_values[curr_action] += learning_rate * temporal_difference;
        temporal_difference
    }
}
