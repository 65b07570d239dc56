use ndarray::Array2;

use beacon_qlearning::action_selection::{EnumActionSelection, EpsilonGreedy, ExponentialDecay, Greedy};
use beacon_qlearning::env::{
    Command, CommandKind, Env, EnvError, MoveToBeaconConfig, MoveToBeaconEnv, Observation,
    PlayerRelative,
};
use beacon_qlearning::state::StateDescriptor;
use beacon_qlearning::{QAgent, ScriptedAgent, Trainer, TrainerConfig};

/// Alternates between "selected" and "not selected" every step and always
/// pays a reward of 1.
struct CyclingEnv {
    selected: bool,
    commands: Vec<Command>,
}

impl CyclingEnv {
    fn new() -> Self {
        Self {
            selected: false,
            commands: vec![],
        }
    }

    fn observe(&self) -> Observation {
        let mut player_relative: Array2<u8> = Array2::zeros((4, 4));
        let mut selected: Array2<u8> = Array2::zeros((4, 4));
        player_relative[[0, 0]] = PlayerRelative::SelfUnit as u8;
        if self.selected {
            selected[[0, 0]] = 1;
        }
        Observation::new(
            player_relative,
            selected,
            vec![
                CommandKind::NoOp,
                CommandKind::SelectAll,
                CommandKind::SelectPoint,
                CommandKind::Move,
            ],
        )
    }
}

impl Env for CyclingEnv {
    fn reset(&mut self) -> Observation {
        self.selected = false;
        self.observe()
    }

    fn step(&mut self, command: &Command) -> Result<(Observation, f64, bool), EnvError> {
        self.commands.push(*command);
        self.selected = !self.selected;
        Ok((self.observe(), 1.0, false))
    }

    fn render(&self) -> String {
        format!("selected={}", self.selected)
    }
}

fn quiet_trainer(n_episodes: u128, max_steps: u128) -> Trainer {
    Trainer::new(TrainerConfig {
        n_episodes,
        max_steps,
        learning_rate: 0.1,
        discount_factor: 0.9,
        show_progress: false,
    })
}

fn exploring_agent(seed: u64) -> QAgent {
    QAgent::new(
        EnumActionSelection::from(EpsilonGreedy::new(
            ExponentialDecay::new(0.9, 0.025, 50.0),
            seed,
        )),
        seed,
    )
}

#[test]
fn two_short_episodes_write_two_log_lines() {
    let mut env = CyclingEnv::new();
    let mut agent = exploring_agent(1);
    let mut log: Vec<u8> = vec![];

    let (rewards, lengths, errors) = quiet_trainer(2, 5)
        .train(&mut env, &mut agent, &mut log)
        .unwrap();

    let text = String::from_utf8(log).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert!(line.contains("5.0"), "line {:?} lacks the episode reward", line);
    }
    assert!(lines[0].starts_with("0\t"));
    assert!(lines[1].starts_with("1\t"));
    assert_eq!(rewards, vec![5.0, 5.0]);
    assert_eq!(lengths, vec![5, 5]);
    assert_eq!(errors.len(), 10);
    assert_eq!(agent.steps(), 10);
    assert_eq!(env.commands.len(), 10);
}

#[test]
fn cycle_only_ever_sees_two_states() {
    let mut env = CyclingEnv::new();
    let mut agent = exploring_agent(2);
    quiet_trainer(3, 20)
        .train(&mut env, &mut agent, &mut std::io::sink())
        .unwrap();
    assert_eq!(agent.table().len(), 2);
    assert!(agent.table().contains(&StateDescriptor::new(false, false)));
    assert!(agent.table().contains(&StateDescriptor::new(true, false)));
    for (_, values) in agent.table().iter() {
        assert!(values.iter().all(|v| *v >= 0.0));
    }
}

#[test]
fn step_counter_survives_episode_boundaries() {
    let mut env = CyclingEnv::new();
    let mut agent = exploring_agent(3);
    let trainer = quiet_trainer(4, 3);
    trainer.train(&mut env, &mut agent, &mut std::io::sink()).unwrap();
    assert_eq!(agent.steps(), 12);
    let rate = agent.exploration_rate();
    assert!(rate < 0.9);
    assert!(rate > 0.025);
}

#[test]
fn scripted_agent_reaches_the_beacon() {
    let mut env = MoveToBeaconEnv::new(MoveToBeaconConfig {
        max_steps: 200,
        seed: 11,
        ..MoveToBeaconConfig::default()
    });
    let mut agent = ScriptedAgent::new(11);
    let (rewards, lengths) = quiet_trainer(2, 200)
        .evaluate(&mut env, &mut agent, 2)
        .unwrap();
    assert_eq!(lengths, vec![200, 200]);
    assert!(rewards.iter().all(|r| *r >= 1.0));
}

#[test]
fn q_agent_trains_and_evaluates_on_the_beacon_map() {
    let mut env = MoveToBeaconEnv::new(MoveToBeaconConfig {
        max_steps: 50,
        seed: 5,
        ..MoveToBeaconConfig::default()
    });
    let mut agent = exploring_agent(5);
    let mut log: Vec<u8> = vec![];
    let trainer = quiet_trainer(3, 50);
    let (rewards, _, _) = trainer.train(&mut env, &mut agent, &mut log).unwrap();
    assert_eq!(rewards.len(), 3);
    assert_eq!(String::from_utf8(log).unwrap().lines().count(), 3);
    // the beacon respawns on the step it is reached, so no observation
    // shows the unit standing on it
    assert!(agent.table().len() <= 2);
    assert!(agent.table().iter().all(|(state, _)| !state.on_target));

    agent.set_action_selector(EnumActionSelection::from(Greedy::default()));
    let steps_before = agent.steps();
    let (eval_rewards, _) = trainer.evaluate(&mut env, &mut agent, 2).unwrap();
    assert_eq!(eval_rewards.len(), 2);
    assert_eq!(agent.exploration_rate(), 0.0);
    assert_eq!(agent.steps(), steps_before + 100);
}

#[test]
fn q_agent_trains_on_a_small_map() {
    let mut env = MoveToBeaconEnv::new(MoveToBeaconConfig {
        size: 16,
        max_steps: 100,
        seed: 9,
        ..MoveToBeaconConfig::default()
    });
    let mut agent = QAgent::new(
        EnumActionSelection::from(EpsilonGreedy::new(ExponentialDecay::new(1.0, 1.0, 1.0), 9)),
        9,
    );
    let trainer = Trainer::new(TrainerConfig {
        n_episodes: 4,
        max_steps: 100,
        learning_rate: 0.1,
        discount_factor: 0.9,
        show_progress: true,
    });
    let (rewards, lengths, _) = trainer
        .train(&mut env, &mut agent, &mut std::io::sink())
        .unwrap();
    assert_eq!(rewards.len(), 4);
    assert_eq!(lengths, vec![100; 4]);

    agent.set_action_selector(EnumActionSelection::from(Greedy::default()));
    let (eval_rewards, _) = trainer.evaluate(&mut env, &mut agent, 2).unwrap();
    assert_eq!(eval_rewards.len(), 2);
}

#[test]
fn env_errors_reach_the_caller() {
    struct BrokenEnv;
    impl Env for BrokenEnv {
        fn reset(&mut self) -> Observation {
            Observation::new(Array2::zeros((2, 2)), Array2::zeros((2, 2)), vec![])
        }
        fn step(&mut self, _command: &Command) -> Result<(Observation, f64, bool), EnvError> {
            Err(EnvError::NotReady)
        }
        fn render(&self) -> String {
            String::new()
        }
    }
    let mut agent = exploring_agent(0);
    let result = quiet_trainer(1, 5).train(&mut BrokenEnv, &mut agent, &mut std::io::sink());
    assert!(matches!(
        result,
        Err(beacon_qlearning::trainer::TrainError::Env(EnvError::NotReady))
    ));
}
