use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{Agent, Decision};
use crate::action::{resolve, Action};
use crate::action_selection::{ActionSelection, EnumActionSelection};
use crate::env::{CellSet, Command, Observation};
use crate::policy::QTable;
use crate::state::{extract_state, target_cells, StateDescriptor};

pub type BeaconQTable = QTable<StateDescriptor, { Action::COUNT }>;

/// Tabular Q-learning agent. It only decides; learning happens when the
/// driver feeds the observed transition into [`QAgent::table_mut`].
#[derive(Debug, Clone)]
pub struct QAgent {
    table: BeaconQTable,
    action_selection: EnumActionSelection<{ Action::COUNT }>,
    steps: u64,
    rng: StdRng,
}

impl QAgent {
    pub fn new(action_selection: EnumActionSelection<{ Action::COUNT }>, seed: u64) -> Self {
        Self {
            table: QTable::new(),
            action_selection,
            steps: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn set_action_selector(&mut self, action_selection: EnumActionSelection<{ Action::COUNT }>) {
        self.action_selection = action_selection;
    }

    pub fn table(&self) -> &BeaconQTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut BeaconQTable {
        &mut self.table
    }

    /// Environment steps taken over the whole run.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn exploration_rate(&self) -> f64 {
        self.action_selection.exploration_rate(self.steps)
    }
}

impl Agent for QAgent {
    fn step(&mut self, obs: &Observation) -> Decision {
        self.steps += 1;
        let state: StateDescriptor = extract_state(obs);
        let target: CellSet = target_cells(obs);
        let action: usize = self
            .action_selection
            .get_action(&mut self.table, &state, self.steps);
        let command: Command = resolve(action, &state, obs, &target, &mut self.rng);
        Decision {
            state,
            action,
            command,
        }
    }

    fn reset(&mut self) {
        self.table.clear();
        self.steps = 0;
    }
}
