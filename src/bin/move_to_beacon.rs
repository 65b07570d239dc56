use std::fs::OpenOptions;
use std::time::Instant;

use plotters::style::{BLUE, GREEN};
use tracing::info;
use tracing_subscriber::EnvFilter;

use beacon_qlearning::action_selection::{EnumActionSelection, EpsilonGreedy, ExponentialDecay, Greedy};
use beacon_qlearning::env::{Env, MoveToBeaconConfig, MoveToBeaconEnv};
use beacon_qlearning::utils::{moving_average, plot_moving_average};
use beacon_qlearning::{QAgent, ScriptedAgent, Trainer, TrainerConfig};

extern crate structopt;

use structopt::StructOpt;

/// Train a tabular Q-learning agent on the MoveToBeacon grid world
#[derive(StructOpt, Debug)]
#[structopt(name = "RLRust - MoveToBeacon")]
struct Cli {
    /// Agent to run: "q" learns, "scripted" plays the hand-written baseline
    #[structopt(long = "agent", default_value = "q", possible_values = &["q", "scripted"])]
    agent: String,

    /// Number of episodes for the training
    #[structopt(long = "n_episodes", short = "n", default_value = "35")]
    n_episodes: u128,

    /// Maximum number of steps per episode
    #[structopt(long = "max_steps", default_value = "400")]
    max_steps: u128,

    /// Learning rate of the RL agent
    #[structopt(long = "learning_rate", default_value = "0.01")]
    learning_rate: f64,

    /// Discont factor to be used on the temporal difference calculation
    #[structopt(long = "discount_factor", default_value = "0.9")]
    discount_factor: f64,

    /// Initial value for the exploration ratio
    #[structopt(long = "initial_epsilon", default_value = "0.9")]
    initial_epsilon: f64,

    /// Final value for the exploration ratio
    #[structopt(long = "final_epsilon", default_value = "0.025")]
    final_epsilon: f64,

    /// Fraction of the total training steps used as the exploration decay constant
    #[structopt(long = "exploration_time", default_value = "0.714")]
    exploration_time: f64,

    /// Number of greedy episodes played after training
    #[structopt(long = "eval_episodes", default_value = "5")]
    eval_episodes: u128,

    /// Seed for the environment and the agent
    #[structopt(long = "seed", default_value = "42")]
    seed: u64,

    /// File receiving one line per training episode
    #[structopt(long = "log_file", default_value = "episode_rewards.log")]
    log_file: String,

    /// Plot the moving average of the episode rewards
    #[structopt(long = "plot")]
    plot: bool,

    /// Moving average window to be used on the visualization of results
    #[structopt(long = "moving_average_window", default_value = "5")]
    moving_average_window: usize,

    /// Show the map at the end of the run
    #[structopt(long = "show_example")]
    show_example: bool,

    /// Tracing filter used when RUST_LOG is not set
    #[structopt(long = "log_level", default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli: Cli = Cli::from_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut env = MoveToBeaconEnv::new(MoveToBeaconConfig {
        max_steps: cli.max_steps,
        seed: cli.seed,
        ..MoveToBeaconConfig::default()
    });

    let trainer = Trainer::new(TrainerConfig {
        n_episodes: cli.n_episodes,
        max_steps: cli.max_steps,
        learning_rate: cli.learning_rate,
        discount_factor: cli.discount_factor,
        show_progress: true,
    });

    if cli.agent == "scripted" {
        let mut agent = ScriptedAgent::new(cli.seed);
        let (rewards, _) = trainer.evaluate(&mut env, &mut agent, cli.n_episodes)?;
        let mean: f64 = rewards.iter().sum::<f64>() / rewards.len().max(1) as f64;
        info!(episodes = rewards.len(), mean_reward = mean, "scripted agent done");
        if cli.show_example {
            println!("{}", env.render());
        }
        return Ok(());
    }

    let schedule = ExponentialDecay::over_run(
        cli.initial_epsilon,
        cli.final_epsilon,
        cli.exploration_time,
        cli.n_episodes,
        cli.max_steps,
    );
    let mut agent = QAgent::new(
        EnumActionSelection::from(EpsilonGreedy::new(schedule, cli.seed)),
        cli.seed,
    );

    let mut log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.log_file)?;

    let now: Instant = Instant::now();
    let (train_rewards, _train_lengths, training_error) = trainer.train(&mut env, &mut agent, &mut log)?;
    info!(
        elapsed = ?now.elapsed(),
        states = agent.table().len(),
        "training done"
    );
    for (state, values) in agent.table().iter() {
        info!(?state, ?values, "learned values");
    }

    agent.set_action_selector(EnumActionSelection::from(Greedy::default()));
    let (eval_rewards, _) = trainer.evaluate(&mut env, &mut agent, cli.eval_episodes)?;
    let mean: f64 = eval_rewards.iter().sum::<f64>() / eval_rewards.len().max(1) as f64;
    info!(episodes = eval_rewards.len(), mean_reward = mean, "greedy evaluation done");

    if cli.show_example {
        println!("{}", env.render());
    }

    if cli.plot {
        let window: usize = cli.moving_average_window;
        plot_moving_average(
            &[moving_average(window, &train_rewards)],
            &[&BLUE],
            &["ε-Greedy One-Step Qlearning"],
            "Train Rewards",
        )?;
        plot_moving_average(
            &[moving_average(training_error.len() / 100 + 1, &training_error)],
            &[&GREEN],
            &["ε-Greedy One-Step Qlearning"],
            "Training Error",
        )?;
    }
    Ok(())
}
