//! World - Live game state read at save time and mutated at load time

use crate::{game_data::Position, NEW_SAVE_MISSION};

/// The parts of the running game a save slot touches
pub trait GameWorld {
    /// Current player position, `None` when no player is spawned
    fn player_position(&self) -> Option<Position>;

    /// Move the player; returns false when there is no player to move
    fn move_player(&mut self, position: Position) -> bool;

    /// Label describing the mission in progress
    fn current_mission(&self) -> String;
}

/// Plain in-memory world
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub player: Option<Position>,
    pub mission: String,
}

impl Default for World {
    fn default() -> Self {
        Self {
            player: Some(Position::ORIGIN),
            mission: NEW_SAVE_MISSION.to_string(),
        }
    }
}

impl World {
    pub fn new(player: Option<Position>, mission: impl Into<String>) -> Self {
        Self {
            player,
            mission: mission.into(),
        }
    }
}

impl GameWorld for World {
    fn player_position(&self) -> Option<Position> {
        self.player
    }

    fn move_player(&mut self, position: Position) -> bool {
        match self.player.as_mut() {
            Some(player) => {
                *player = position;
                true
            }
            None => false,
        }
    }

    fn current_mission(&self) -> String {
        self.mission.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_requires_a_player() {
        let mut world = World::new(None, "m");
        assert!(!world.move_player(Position::new(1.0, 1.0, 1.0)));
        assert_eq!(world.player_position(), None);

        let mut world = World::default();
        assert!(world.move_player(Position::new(1.0, 1.0, 1.0)));
        assert_eq!(world.player_position(), Some(Position::new(1.0, 1.0, 1.0)));
    }
}
