use ndarray::Array2;

use super::{CellSet, CommandKind};

/// Category of a screen cell relative to the controlled player.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PlayerRelative {
    Background = 0,
    SelfUnit = 1,
    Ally = 2,
    Neutral = 3,
    Hostile = 4,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    player_relative: Array2<u8>,
    selected: Array2<u8>,
    available_commands: Vec<CommandKind>,
}

impl Observation {
    pub fn new(
        player_relative: Array2<u8>,
        selected: Array2<u8>,
        available_commands: Vec<CommandKind>,
    ) -> Self {
        assert_eq!(
            player_relative.dim(),
            selected.dim(),
            "occupancy and selection maps must share a shape"
        );
        Self {
            player_relative,
            selected,
            available_commands,
        }
    }

    pub fn player_relative(&self) -> &Array2<u8> {
        &self.player_relative
    }

    pub fn selected(&self) -> &Array2<u8> {
        &self.selected
    }

    pub fn available_commands(&self) -> &[CommandKind] {
        &self.available_commands
    }

    pub fn is_available(&self, kind: CommandKind) -> bool {
        self.available_commands.contains(&kind)
    }

    /// `(rows, cols)` of the maps.
    pub fn shape(&self) -> (usize, usize) {
        self.player_relative.dim()
    }

    pub fn cells_of(&self, category: PlayerRelative) -> CellSet {
        CellSet::matching(&self.player_relative, |v| v == category as u8)
    }

    pub fn selected_cells(&self) -> CellSet {
        CellSet::matching(&self.selected, |v| v != 0)
    }
}
