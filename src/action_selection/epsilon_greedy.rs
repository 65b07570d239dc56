use rand::rngs::StdRng;
use rand::{distributions::Uniform, prelude::Distribution, SeedableRng};
use std::hash::Hash;

use super::ActionSelection;
use crate::policy::QTable;

/// `end + (start - end) * exp(-step / decay_steps)`. Built through
/// [`ExponentialDecay::new`] so `decay_steps` is always positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecay {
    start: f64,
    end: f64,
    decay_steps: f64,
}

impl Default for ExponentialDecay {
    fn default() -> Self {
        Self {
            start: 0.9,
            end: 0.025,
            decay_steps: 10_000.0,
        }
    }
}

impl ExponentialDecay {
    pub fn new(start: f64, end: f64, decay_steps: f64) -> Self {
        assert!(decay_steps > 0.0, "decay_steps must be positive");
        Self {
            start,
            end,
            decay_steps,
        }
    }

    /// Decay constant taken as a fraction of the whole run length.
    pub fn over_run(
        start: f64,
        end: f64,
        exploration_time: f64,
        n_episodes: u128,
        max_steps: u128,
    ) -> Self {
        let total_steps: f64 = (n_episodes * max_steps) as f64;
        Self::new(start, end, (exploration_time * total_steps).max(1.0))
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn decay_steps(&self) -> f64 {
        self.decay_steps
    }

    pub fn rate(&self, step: u64) -> f64 {
        self.end + (self.start - self.end) * (-(step as f64) / self.decay_steps).exp()
    }
}

#[derive(Debug, Clone)]
pub struct EpsilonGreedy<const COUNT: usize> {
    exploration_decider: Uniform<f64>,
    rand_action_selecter: Uniform<usize>,
    schedule: ExponentialDecay,
    rng: StdRng,
}

impl<const COUNT: usize> EpsilonGreedy<COUNT> {
    pub fn new(schedule: ExponentialDecay, seed: u64) -> Self {
        Self {
            exploration_decider: Uniform::from(0.0..1.0),
            rand_action_selecter: Uniform::from(0..COUNT),
            schedule,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn schedule(&self) -> &ExponentialDecay {
        &self.schedule
    }

    fn should_explore(&mut self, step: u64) -> bool {
        self.exploration_decider.sample(&mut self.rng) < self.schedule.rate(step)
    }
}

impl<const COUNT: usize> ActionSelection<COUNT> for EpsilonGreedy<COUNT> {
    fn get_action<T: Hash + PartialEq + Eq + Clone>(
        &mut self,
        table: &mut QTable<T, COUNT>,
        obs: &T,
        step: u64,
    ) -> usize {
        if self.should_explore(step) {
            self.rand_action_selecter.sample(&mut self.rng)
        } else {
            table.greedy_action(obs)
        }
    }

    fn exploration_rate(&self, step: u64) -> f64 {
        self.schedule.rate(step)
    }
}
