use std::hash::Hash;

use super::ActionSelection;
use crate::policy::QTable;

/// Always exploits, used when evaluating a trained table.
#[derive(Debug, Clone, Default)]
pub struct Greedy<const COUNT: usize>;

impl<const COUNT: usize> ActionSelection<COUNT> for Greedy<COUNT> {
    fn get_action<T: Hash + PartialEq + Eq + Clone>(
        &mut self,
        table: &mut QTable<T, COUNT>,
        obs: &T,
        _step: u64,
    ) -> usize {
        table.greedy_action(obs)
    }

    fn exploration_rate(&self, _step: u64) -> f64 {
        0.0
    }
}
