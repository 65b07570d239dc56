mod epsilon_greedy;
mod greedy;

use enum_dispatch::enum_dispatch;
use std::hash::Hash;

use crate::policy::QTable;

pub use epsilon_greedy::{EpsilonGreedy, ExponentialDecay};
pub use greedy::Greedy;

#[enum_dispatch]
pub trait ActionSelection<const COUNT: usize> {
    fn get_action<T: Hash + PartialEq + Eq + Clone>(
        &mut self,
        table: &mut QTable<T, COUNT>,
        obs: &T,
        step: u64,
    ) -> usize;
    fn exploration_rate(&self, step: u64) -> f64;
}

#[derive(Debug, Clone)]
#[enum_dispatch(ActionSelection<COUNT>)]
pub enum EnumActionSelection<const COUNT: usize> {
    EpsilonGreedy(EpsilonGreedy<COUNT>),
    Greedy(Greedy<COUNT>),
}
