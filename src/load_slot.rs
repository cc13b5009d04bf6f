//! LoadSlot - Read-only view of a save slot that restores it into the world

use crate::{
    confirmation::{ConfirmationKind, ConfirmationPanel},
    game_data::Position,
    save_slot::SaveSlot,
    screenshot::Screenshot,
    world::GameWorld,
};
use tracing::{error, info, warn};

/// Result of loading a slot into the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadOutcome {
    /// The player was moved to the stored position
    Restored(Position),
    /// The record holds no position; the world was left alone
    NoPosition,
    /// The slot had nothing to load
    NoData,
}

/// What the load card shows
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub date: String,
    pub mission: String,
    pub screenshot: Option<Screenshot>,
}

#[derive(Debug)]
pub struct LoadSlot {
    index: u32,
    view: Option<SlotView>,
}

impl LoadSlot {
    /// Create the load card paired with save slot `index`
    pub fn new(index: u32) -> Self {
        Self { index, view: None }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn is_populated(&self) -> bool {
        self.view.is_some()
    }

    pub fn view(&self) -> Option<&SlotView> {
        self.view.as_ref()
    }

    /// Mirror the save slot's current record
    pub fn refresh(&mut self, save_slot: &SaveSlot) {
        if save_slot.index() != self.index {
            error!(
                load_slot = self.index,
                save_slot = save_slot.index(),
                "Load slot refreshed from a different save slot"
            );
            return;
        }

        self.view = save_slot.get_save_data().map(|data| {
            if data.screenshot.is_none() {
                warn!(slot = self.index, "Save record has no screenshot");
            }
            SlotView {
                date: data.date,
                mission: data.mission,
                screenshot: data.screenshot,
            }
        });
    }

    /// Click on the load card: open this slot's load prompt if there is anything to load
    ///
    /// Any other open prompt is closed.
    pub fn on_click(&self, panel: &mut ConfirmationPanel) -> bool {
        if !self.is_populated() {
            return false;
        }
        panel.open(self.index, ConfirmationKind::Load);
        true
    }

    pub fn cancel(&self, panel: &mut ConfirmationPanel) -> bool {
        panel.cancel(self.index, ConfirmationKind::Load)
    }

    /// Apply the save slot's record to the world and close the load prompt
    pub fn load_game_data(
        &self,
        save_slot: &SaveSlot,
        world: &mut dyn GameWorld,
        panel: &mut ConfirmationPanel,
    ) -> LoadOutcome {
        let outcome = self.apply(save_slot, world);
        panel.cancel(self.index, ConfirmationKind::Load);
        outcome
    }

    fn apply(&self, save_slot: &SaveSlot, world: &mut dyn GameWorld) -> LoadOutcome {
        if save_slot.index() != self.index {
            error!(
                load_slot = self.index,
                save_slot = save_slot.index(),
                "Associated save slot does not match"
            );
            return LoadOutcome::NoData;
        }

        let Some(data) = save_slot.get_save_data() else {
            error!(slot = self.index, "Failed to load game data from the associated save slot");
            return LoadOutcome::NoData;
        };

        let outcome = match data.player_position {
            Some(position) => {
                if !world.move_player(position) {
                    error!(slot = self.index, "Player not found; position not restored");
                }
                LoadOutcome::Restored(position)
            }
            None => {
                warn!(slot = self.index, "Player position data is missing in the loaded game data");
                LoadOutcome::NoPosition
            }
        };

        info!(slot = self.index, "Game data loaded successfully");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{game_data::GameData, world::World};
    use tempfile::TempDir;

    fn saved_slot(dir: &TempDir, index: u32, position: Option<Position>) -> SaveSlot {
        let mut slot = SaveSlot::open(index, dir.path()).unwrap();
        let data = GameData::new("2024/01/01 3:00 PM".into(), "Mission".into(), None, position);
        slot.save_game_data(data).unwrap();
        slot
    }

    #[test]
    fn empty_save_slot_gives_nothing_to_click() {
        let dir = TempDir::new().unwrap();
        let save = SaveSlot::open(1, dir.path()).unwrap();
        let mut load = LoadSlot::new(1);
        let mut panel = ConfirmationPanel::new();

        load.refresh(&save);
        assert!(!load.is_populated());
        assert!(!load.on_click(&mut panel));
        assert!(panel.current().is_none());
    }

    #[test]
    fn refresh_mirrors_record() {
        let dir = TempDir::new().unwrap();
        let save = saved_slot(&dir, 2, None);
        let mut load = LoadSlot::new(2);

        load.refresh(&save);
        let view = load.view().unwrap();
        assert_eq!(view.date, "2024/01/01 3:00 PM");
        assert_eq!(view.mission, "Mission");
        assert!(view.screenshot.is_none());
    }

    #[test]
    fn loading_restores_position_and_closes_prompt() {
        let dir = TempDir::new().unwrap();
        let save = saved_slot(&dir, 1, Some(Position::new(1.0, 2.0, 3.0)));
        let mut load = LoadSlot::new(1);
        let mut panel = ConfirmationPanel::new();
        let mut world = World::default();

        load.refresh(&save);
        assert!(load.on_click(&mut panel));
        assert!(panel.is_open(1, ConfirmationKind::Load));

        let outcome = load.load_game_data(&save, &mut world, &mut panel);
        assert_eq!(outcome, LoadOutcome::Restored(Position::new(1.0, 2.0, 3.0)));
        assert_eq!(world.player, Some(Position::new(1.0, 2.0, 3.0)));
        assert!(panel.current().is_none());
    }

    #[test]
    fn origin_is_restored_like_any_other_position() {
        let dir = TempDir::new().unwrap();
        let save = saved_slot(&dir, 1, Some(Position::ORIGIN));
        let mut world = World::new(Some(Position::new(9.0, 9.0, 9.0)), "m");

        let outcome = LoadSlot::new(1).load_game_data(&save, &mut world, &mut ConfirmationPanel::new());
        assert_eq!(outcome, LoadOutcome::Restored(Position::ORIGIN));
        assert_eq!(world.player, Some(Position::ORIGIN));
    }

    #[test]
    fn record_without_position_leaves_world_alone() {
        let dir = TempDir::new().unwrap();
        let save = saved_slot(&dir, 1, None);
        let mut world = World::new(Some(Position::new(9.0, 9.0, 9.0)), "m");

        let outcome = LoadSlot::new(1).load_game_data(&save, &mut world, &mut ConfirmationPanel::new());
        assert_eq!(outcome, LoadOutcome::NoPosition);
        assert_eq!(world.player, Some(Position::new(9.0, 9.0, 9.0)));
    }

    #[test]
    fn opening_one_load_prompt_closes_another() {
        let dir = TempDir::new().unwrap();
        let first = saved_slot(&dir, 1, None);
        let second = saved_slot(&dir, 2, None);
        let mut load_one = LoadSlot::new(1);
        let mut load_two = LoadSlot::new(2);
        let mut panel = ConfirmationPanel::new();
        load_one.refresh(&first);
        load_two.refresh(&second);

        load_one.on_click(&mut panel);
        load_two.on_click(&mut panel);

        assert!(!panel.is_open(1, ConfirmationKind::Load));
        assert!(panel.is_open(2, ConfirmationKind::Load));
        assert!(!load_one.cancel(&mut panel));
    }

    #[test]
    fn mismatched_save_slot_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let save = saved_slot(&dir, 3, Some(Position::new(1.0, 1.0, 1.0)));
        let mut world = World::default();

        let outcome = LoadSlot::new(1).load_game_data(&save, &mut world, &mut ConfirmationPanel::new());
        assert_eq!(outcome, LoadOutcome::NoData);
        assert_eq!(world.player, Some(Position::ORIGIN));
    }
}
