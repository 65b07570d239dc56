pub mod action;
pub mod action_selection;
pub mod agent;
pub mod env;
pub mod policy;
pub mod state;
pub mod trainer;
pub mod utils;

pub use agent::{Agent, QAgent, ScriptedAgent};
pub use trainer::{Trainer, TrainerConfig};
