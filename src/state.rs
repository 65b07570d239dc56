use crate::env::{CellSet, Observation, PlayerRelative};

/// Discretised view of an observation, used as the Q-table key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct StateDescriptor {
    pub selected: bool,
    pub on_target: bool,
}

impl StateDescriptor {
    pub fn new(selected: bool, on_target: bool) -> Self {
        Self {
            selected,
            on_target,
        }
    }
}

pub fn target_cells(obs: &Observation) -> CellSet {
    obs.cells_of(PlayerRelative::Neutral)
}

/// A hidden unit or a missing target counts as "not on target".
pub fn extract_state(obs: &Observation) -> StateDescriptor {
    let selected: bool = obs.selected().iter().any(|v| *v != 0);
    let target: CellSet = target_cells(obs);
    let on_target: bool = match obs.cells_of(PlayerRelative::SelfUnit).mean() {
        Some((row, col)) => target.box_contains(row, col),
        None => false,
    };
    StateDescriptor::new(selected, on_target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::CommandKind;
    use ndarray::Array2;

    fn observation(unit: &[(usize, usize)], target: &[(usize, usize)], selected: bool) -> Observation {
        let mut player_relative: Array2<u8> = Array2::zeros((8, 8));
        let mut selection: Array2<u8> = Array2::zeros((8, 8));
        for &(r, c) in target {
            player_relative[[r, c]] = PlayerRelative::Neutral as u8;
        }
        for &(r, c) in unit {
            player_relative[[r, c]] = PlayerRelative::SelfUnit as u8;
            if selected {
                selection[[r, c]] = 1;
            }
        }
        Observation::new(player_relative, selection, vec![CommandKind::NoOp])
    }

    #[test]
    fn unit_inside_target_box() {
        let obs = observation(&[(3, 3)], &[(2, 2), (4, 4)], true);
        assert_eq!(extract_state(&obs), StateDescriptor::new(true, true));
    }

    #[test]
    fn unit_outside_target_box() {
        let obs = observation(&[(6, 6), (6, 7)], &[(1, 1), (2, 2)], false);
        assert_eq!(extract_state(&obs), StateDescriptor::new(false, false));
    }

    #[test]
    fn mean_position_decides() {
        // cells straddle the box edge, the mean (2, 3) is inside
        let obs = observation(&[(2, 1), (2, 5)], &[(1, 2), (3, 4)], false);
        assert!(extract_state(&obs).on_target);
    }

    #[test]
    fn hidden_unit_is_not_on_target() {
        let obs = observation(&[], &[(1, 1)], false);
        assert_eq!(extract_state(&obs), StateDescriptor::default());
    }

    #[test]
    fn missing_target_is_not_on_target() {
        let obs = observation(&[(1, 1)], &[], true);
        assert_eq!(extract_state(&obs), StateDescriptor::new(true, false));
    }
}
