use std::collections::HashMap;

use crate::api::Operator;
use crate::menu::MenuState;

/// Which operator each player on the team has picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignments {
    picks: HashMap<String, String>,
}

impl Assignments {
    /// An empty team: nobody has picked yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `player` an operator, returning whatever they had before.
    pub fn assign(&mut self, player: impl Into<String>, operator: impl Into<String>) -> Option<String> {
        self.picks.insert(player.into(), operator.into())
    }

    /// Drop `player`'s pick, returning it if there was one.
    pub fn unassign(&mut self, player: &str) -> Option<String> {
        self.picks.remove(player)
    }

    /// Operator currently picked by `player`.
    pub fn operator_for(&self, player: &str) -> Option<&str> {
        self.picks.get(player).map(String::as_str)
    }

    /// True once at least one player has an operator.
    pub fn has_assignments(&self) -> bool {
        !self.picks.is_empty()
    }

    /// Number of players with a pick.
    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn clear(&mut self) {
        self.picks.clear();
    }
}

/// Everything the picker holds while it runs.
#[derive(Debug, Clone)]
pub struct AppState {
    pub operators: Vec<Operator>,
    pub menu: MenuState,
    pub assignments: Assignments,
}

impl AppState {
    /// Start a session with the loaded catalogue and nobody assigned.
    pub fn new(operators: Vec<Operator>, menu: MenuState) -> Self {
        AppState {
            operators,
            menu,
            assignments: Assignments::new(),
        }
    }

    /// Forget all picks and return the menu to its starting position.
    pub fn reset(&mut self) {
        self.assignments.clear();
        self.menu.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Side;

    fn op(name: &str, side: Side) -> Operator {
        Operator {
            name: name.into(),
            icon_url: format!("https://example.invalid/{name}.png"),
            side,
        }
    }

    #[test]
    fn presence_check_tracks_size() {
        let mut picks = Assignments::new();
        assert!(!picks.has_assignments());
        assert_eq!(picks.assign("alice", "Ash"), None);
        assert!(picks.has_assignments());
        assert_eq!(picks.assign("alice", "Thermite"), Some("Ash".to_string()));
        assert_eq!(picks.len(), 1);
        assert_eq!(picks.operator_for("alice"), Some("Thermite"));
        assert_eq!(picks.unassign("alice"), Some("Thermite".to_string()));
        assert!(!picks.has_assignments());
    }

    #[test]
    fn reset_clears_picks_cursor_and_side() {
        let mut state = AppState::new(vec![op("Ash", Side::Attacker)], MenuState::default());
        state.assignments.assign("bob", "Ash");
        state.menu.select_next();
        state.menu.set_side(Side::Defender);

        state.reset();
        assert!(state.assignments.is_empty());
        assert_eq!(state.menu.cursor(), 0);
        assert_eq!(state.menu.side(), Side::Attacker);
        assert_eq!(state.operators.len(), 1);
    }
}
