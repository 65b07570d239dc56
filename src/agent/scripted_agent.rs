use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{Agent, Decision};
use crate::action::{resolve, Action};
use crate::env::{CellSet, CommandKind, Observation};
use crate::state::{extract_state, target_cells, StateDescriptor};

/// Hand-written baseline: select the unit until moving is possible, then
/// walk straight to the beacon.
#[derive(Debug, Clone)]
pub struct ScriptedAgent {
    rng: StdRng,
}

impl ScriptedAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for ScriptedAgent {
    fn step(&mut self, obs: &Observation) -> Decision {
        let state: StateDescriptor = extract_state(obs);
        let target: CellSet = target_cells(obs);
        let action: Action = if !obs.is_available(CommandKind::Move) {
            Action::SelectUnit
        } else if target.is_empty() {
            Action::NoOp
        } else {
            Action::MoveToTarget
        };
        let command = resolve(action.into(), &state, obs, &target, &mut self.rng);
        Decision {
            state,
            action: action.into(),
            command,
        }
    }

    fn reset(&mut self) {}
}
