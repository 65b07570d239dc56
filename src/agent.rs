mod q_agent;
mod scripted_agent;

pub use q_agent::{BeaconQTable, QAgent};
pub use scripted_agent::ScriptedAgent;

use crate::env::{Command, Observation};
use crate::state::StateDescriptor;

/// Everything the training loop needs to learn from one step once the
/// environment has answered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub state: StateDescriptor,
    pub action: usize,
    pub command: Command,
}

pub trait Agent {
    fn step(&mut self, obs: &Observation) -> Decision;

    fn reset(&mut self);
}
