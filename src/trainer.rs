use std::io::Write;

use kdam::{tqdm, Bar, BarExt};
use thiserror::Error;
use tracing::{debug, info};

use crate::agent::{Agent, Decision, QAgent};
use crate::env::{Env, EnvError, Observation};
use crate::state::{extract_state, StateDescriptor};

/// Per-episode rewards, per-episode lengths and every temporal difference
/// observed during training.
pub type TrainResults = (Vec<f64>, Vec<u128>, Vec<f64>);

#[derive(Debug, Error)]
pub enum TrainError {
    #[error(transparent)]
    Env(#[from] EnvError),
    #[error("could not write the episode log: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct TrainerConfig {
    pub n_episodes: u128,
    pub max_steps: u128,
    pub learning_rate: f64,
    pub discount_factor: f64,
    pub show_progress: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            n_episodes: 35,
            max_steps: 400,
            learning_rate: 0.01,
            discount_factor: 0.9,
            show_progress: true,
        }
    }
}

pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    fn progress_bar(&self, total: u128, description: &str) -> Option<Bar> {
        if !self.config.show_progress {
            return None;
        }
        let mut pb = tqdm!(total = total as usize);
        pb.set_description(description.to_string());
        Some(pb)
    }

    /// Runs the episodes, learning from every transition, and appends one
    /// line per episode to `log`: episode, reward, exploration rate and the
    /// last temporal difference, tab separated.
    pub fn train(
        &self,
        env: &mut dyn Env,
        agent: &mut QAgent,
        log: &mut dyn Write,
    ) -> Result<TrainResults, TrainError> {
        let mut training_reward: Vec<f64> = vec![];
        let mut training_length: Vec<u128> = vec![];
        let mut training_error: Vec<f64> = vec![];

        let mut pb: Option<Bar> = self.progress_bar(self.config.n_episodes, "train");

        for episode in 0..self.config.n_episodes {
            let mut action_counter: u128 = 0;
            let mut epi_reward: f64 = 0.0;
            let mut last_error: f64 = 0.0;
            let mut curr_obs: Observation = env.reset();

            while action_counter < self.config.max_steps {
                action_counter += 1;
                let decision: Decision = agent.step(&curr_obs);
                let (next_obs, reward, terminated) = env.step(&decision.command)?;
                let next_state: StateDescriptor = extract_state(&next_obs);
                last_error = agent.table_mut().update(
                    &decision.state,
                    &next_state,
                    decision.action,
                    reward,
                    self.config.learning_rate,
                    self.config.discount_factor,
                );
                debug!(
                    step = agent.steps(),
                    action = decision.action,
                    command = ?decision.command,
                    reward,
                    "transition"
                );
                training_error.push(last_error);
                epi_reward += reward;
                curr_obs = next_obs;
                if terminated {
                    break;
                }
            }

            let epsilon: f64 = agent.exploration_rate();
            writeln!(
                log,
                "{}\t{:?}\t{:.4}\t{:.6}",
                episode, epi_reward, epsilon, last_error
            )?;
            info!(
                episode = %episode,
                reward = epi_reward,
                epsilon,
                td_error = last_error,
                states = agent.table().len(),
                "episode finished"
            );

            if let Some(pb) = pb.as_mut() {
                pb.set_postfix(format!("reward={}, eps={:.3}", epi_reward, epsilon));
                pb.update(1);
            }
            training_reward.push(epi_reward);
            training_length.push(action_counter);
        }
        log.flush()?;
        Ok((training_reward, training_length, training_error))
    }

    /// Plays episodes without learning from them.
    pub fn evaluate(
        &self,
        env: &mut dyn Env,
        agent: &mut dyn Agent,
        n_episodes: u128,
    ) -> Result<(Vec<f64>, Vec<u128>), TrainError> {
        let mut reward_history: Vec<f64> = vec![];
        let mut episode_length: Vec<u128> = vec![];
        let mut pb: Option<Bar> = self.progress_bar(n_episodes, "evaluate");
        for _episode in 0..n_episodes {
            let mut action_counter: u128 = 0;
            let mut epi_reward: f64 = 0.0;
            let mut obs: Observation = env.reset();
            while action_counter < self.config.max_steps {
                action_counter += 1;
                let decision: Decision = agent.step(&obs);
                let (next_obs, reward, terminated) = env.step(&decision.command)?;
                epi_reward += reward;
                obs = next_obs;
                if terminated {
                    break;
                }
            }
            if let Some(pb) = pb.as_mut() {
                pb.update(1);
            }
            reward_history.push(epi_reward);
            episode_length.push(action_counter);
        }
        Ok((reward_history, episode_length))
    }
}
