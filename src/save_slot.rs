//! SaveSlot - One numbered slot: its file, its record and its prompts

use crate::{
    confirmation::{ConfirmationKind, ConfirmationPanel},
    game_data::GameData,
    savefile::SlotFile,
    screenshot::Screenshot,
    world::GameWorld,
    Error, Result,
};
use chrono::NaiveDateTime;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// What clicking a slot card did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotClick {
    /// The slot was empty and has been saved into
    Saved,
    /// The slot was populated; an overwrite prompt is now open
    OverwritePrompted,
}

/// A save slot
///
/// Populated state mirrors the file as it was at [`SaveSlot::open`] and after
/// this slot's own writes and deletes. External changes to the file are not
/// picked up.
#[derive(Debug)]
pub struct SaveSlot {
    file: SlotFile,
    data: Option<GameData>,
    pending_screenshot: Option<Screenshot>,
}

impl SaveSlot {
    /// Open slot `index` in `save_dir`, loading any existing record
    pub fn open(index: u32, save_dir: impl Into<PathBuf>) -> Result<Self> {
        let file = SlotFile::new(index, save_dir)?;
        let data = Self::read_logged(&file);

        Ok(Self {
            file,
            data,
            pending_screenshot: None,
        })
    }

    pub fn index(&self) -> u32 {
        self.file.index
    }

    pub fn file(&self) -> &SlotFile {
        &self.file
    }

    pub fn is_populated(&self) -> bool {
        self.data.is_some()
    }

    /// The record as last saved or loaded by this slot
    pub fn data(&self) -> Option<&GameData> {
        self.data.as_ref()
    }

    /// Write a record, replacing whatever the slot held
    ///
    /// Failures are logged here and returned; menus drop them.
    pub fn save_game_data(&mut self, data: GameData) -> Result<()> {
        match self.file.write(&data) {
            Ok(()) => {
                self.data = Some(data);
                Ok(())
            }
            Err(e) => {
                error!(slot = self.index(), "Failed to save game data: {}", e);
                Err(e)
            }
        }
    }

    /// Read the record from disk
    ///
    /// Absent and malformed files both come back as `None`.
    pub fn load_game_data(&self) -> Option<GameData> {
        Self::read_logged(&self.file)
    }

    /// Read the record from disk if this slot believes it is populated
    pub fn get_save_data(&self) -> Option<GameData> {
        if self.is_populated() {
            self.load_game_data()
        } else {
            None
        }
    }

    /// Store the screenshot the next save will embed
    pub fn update_screenshot(&mut self, screenshot: Screenshot) {
        self.pending_screenshot = Some(screenshot);
    }

    pub fn pending_screenshot(&self) -> Option<&Screenshot> {
        self.pending_screenshot.as_ref()
    }

    /// First step of a delete: open the confirmation prompt only
    pub fn clear_save_data(&self, panel: &mut ConfirmationPanel) {
        panel.open(self.index(), ConfirmationKind::Delete);
    }

    /// Second step of a delete: reset the slot and remove its file
    ///
    /// Does nothing unless this slot's delete prompt is the open one. Once
    /// committed the slot is Empty in memory even if removing the file fails.
    pub fn confirm_delete(&mut self, panel: &mut ConfirmationPanel) -> Result<()> {
        self.commit(panel, ConfirmationKind::Delete)?;

        self.data = None;
        match self.file.delete() {
            Ok(_) => Ok(()),
            Err(e) => {
                error!(slot = self.index(), "Failed to delete save file: {}", e);
                Err(e)
            }
        }
    }

    pub fn cancel_delete(&self, panel: &mut ConfirmationPanel) -> bool {
        panel.cancel(self.index(), ConfirmationKind::Delete)
    }

    /// Click on the slot card
    ///
    /// An empty slot saves straight away. A populated slot only asks for an
    /// overwrite confirmation.
    pub fn on_card_clicked(
        &mut self,
        world: &dyn GameWorld,
        panel: &mut ConfirmationPanel,
        now: NaiveDateTime,
    ) -> Result<SlotClick> {
        if self.is_populated() {
            panel.open(self.index(), ConfirmationKind::Overwrite);
            return Ok(SlotClick::OverwritePrompted);
        }

        self.save_snapshot(world, now)?;
        Ok(SlotClick::Saved)
    }

    /// Replace the slot's record with a fresh snapshot of the world
    ///
    /// Does nothing unless this slot's overwrite prompt is the open one.
    pub fn confirm_overwrite(
        &mut self,
        world: &dyn GameWorld,
        panel: &mut ConfirmationPanel,
        now: NaiveDateTime,
    ) -> Result<()> {
        self.commit(panel, ConfirmationKind::Overwrite)?;
        self.save_snapshot(world, now)?;
        info!(
            slot = self.index(),
            "Overwrite confirmed: game data updated at {}",
            crate::game_data::format_date(now)
        );
        Ok(())
    }

    pub fn cancel_overwrite(&self, panel: &mut ConfirmationPanel) -> bool {
        panel.cancel(self.index(), ConfirmationKind::Overwrite)
    }

    fn save_snapshot(&mut self, world: &dyn GameWorld, now: NaiveDateTime) -> Result<()> {
        let screenshot = self.pending_screenshot.clone();
        if screenshot.is_none() {
            warn!(slot = self.index(), "Saving without a screenshot");
        }

        let position = world.player_position();
        if position.is_none() {
            warn!(slot = self.index(), "No player in the world; saving without a position");
        }

        let data = GameData::stamped(now, world.current_mission(), screenshot, position);
        self.save_game_data(data)
    }

    fn commit(&self, panel: &mut ConfirmationPanel, kind: ConfirmationKind) -> Result<()> {
        panel
            .take(self.index(), kind)
            .map(|_| ())
            .ok_or(Error::NoPendingConfirmation {
                slot: self.index(),
                action: kind,
            })
    }

    fn read_logged(file: &SlotFile) -> Option<GameData> {
        match file.read() {
            Ok(data) => data,
            Err(e) => {
                error!(slot = file.index, "Failed to load game data: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{game_data::Position, world::World};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn new_slot_in_empty_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let slot = SaveSlot::open(1, dir.path()).unwrap();

        assert!(!slot.is_populated());
        assert!(slot.load_game_data().is_none());
        assert!(slot.get_save_data().is_none());
    }

    #[test]
    fn clicking_empty_slot_saves_world_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut slot = SaveSlot::open(1, dir.path()).unwrap();
        let mut panel = ConfirmationPanel::new();
        let world = World::new(Some(Position::new(4.0, 5.0, 6.0)), "Find the key");

        let click = slot.on_card_clicked(&world, &mut panel, noon()).unwrap();

        assert_eq!(click, SlotClick::Saved);
        assert!(panel.current().is_none());
        let data = slot.get_save_data().unwrap();
        assert_eq!(data.date, "2024/01/01 12:00 PM");
        assert_eq!(data.mission, "Find the key");
        assert_eq!(data.player_position, Some(Position::new(4.0, 5.0, 6.0)));
    }

    #[test]
    fn clicking_populated_slot_only_prompts() {
        let dir = TempDir::new().unwrap();
        let mut slot = SaveSlot::open(2, dir.path()).unwrap();
        let mut panel = ConfirmationPanel::new();
        let mut world = World::new(Some(Position::new(1.0, 1.0, 1.0)), "first");
        slot.on_card_clicked(&world, &mut panel, noon()).unwrap();

        world.mission = "second".into();
        let click = slot.on_card_clicked(&world, &mut panel, noon()).unwrap();

        assert_eq!(click, SlotClick::OverwritePrompted);
        assert!(panel.is_open(2, ConfirmationKind::Overwrite));
        assert_eq!(slot.load_game_data().unwrap().mission, "first");

        assert!(slot.cancel_overwrite(&mut panel));
        assert_eq!(slot.load_game_data().unwrap().mission, "first");
    }

    #[test]
    fn overwrite_without_prompt_is_refused() {
        let dir = TempDir::new().unwrap();
        let mut slot = SaveSlot::open(1, dir.path()).unwrap();
        let mut panel = ConfirmationPanel::new();
        let world = World::default();

        let err = slot.confirm_overwrite(&world, &mut panel, noon()).unwrap_err();
        assert!(matches!(
            err,
            Error::NoPendingConfirmation {
                slot: 1,
                action: ConfirmationKind::Overwrite
            }
        ));
        assert!(!slot.file().exists());
    }

    #[test]
    fn delete_prompt_for_another_slot_does_not_commit() {
        let dir = TempDir::new().unwrap();
        let mut one = SaveSlot::open(1, dir.path()).unwrap();
        let two = SaveSlot::open(2, dir.path()).unwrap();
        let mut panel = ConfirmationPanel::new();
        one.on_card_clicked(&World::default(), &mut panel, noon()).unwrap();

        two.clear_save_data(&mut panel);
        assert!(one.confirm_delete(&mut panel).is_err());
        assert!(one.is_populated());
        assert!(one.file().exists());
    }

    #[test]
    fn pending_screenshot_is_embedded_in_next_save() {
        let dir = TempDir::new().unwrap();
        let mut slot = SaveSlot::open(1, dir.path()).unwrap();
        let mut panel = ConfirmationPanel::new();
        let shot = Screenshot::from_png_bytes(vec![0x89, b'P', b'N', b'G']);

        slot.update_screenshot(shot.clone());
        slot.on_card_clicked(&World::default(), &mut panel, noon()).unwrap();

        assert_eq!(slot.load_game_data().unwrap().screenshot, Some(shot));
    }

    #[test]
    fn infinite_position_is_refused_and_slot_stays_empty() {
        let dir = TempDir::new().unwrap();
        let mut slot = SaveSlot::open(1, dir.path()).unwrap();
        let data = GameData::new(
            "d".into(),
            "m".into(),
            None,
            Some(Position::new(f32::INFINITY, 1.0, 2.0)),
        );

        assert!(matches!(
            slot.save_game_data(data),
            Err(Error::InvalidPosition(_))
        ));
        assert!(!slot.is_populated());
        assert!(!slot.file().exists());
        assert!(!SaveSlot::open(1, dir.path()).unwrap().is_populated());
    }

    #[test]
    fn refused_overwrite_keeps_previous_record() {
        let dir = TempDir::new().unwrap();
        let mut slot = SaveSlot::open(1, dir.path()).unwrap();
        let mut panel = ConfirmationPanel::new();
        let mut world = World::new(Some(Position::new(1.0, 2.0, 3.0)), "first");
        slot.on_card_clicked(&world, &mut panel, noon()).unwrap();

        world.player = Some(Position::new(f32::NAN, 0.0, 0.0));
        world.mission = "second".into();
        slot.on_card_clicked(&world, &mut panel, noon()).unwrap();
        assert!(slot.confirm_overwrite(&world, &mut panel, noon()).is_err());

        let data = slot.load_game_data().unwrap();
        assert_eq!(data.mission, "first");
        assert_eq!(data.player_position, Some(Position::new(1.0, 2.0, 3.0)));
        assert!(slot.is_populated());
    }

    #[test]
    fn delete_io_failure_still_empties_slot_in_memory() {
        let dir = TempDir::new().unwrap();
        let mut slot = SaveSlot::open(1, dir.path()).unwrap();
        let mut panel = ConfirmationPanel::new();
        slot.on_card_clicked(&World::default(), &mut panel, noon()).unwrap();

        // A directory at the slot path makes removal fail with something
        // other than NotFound
        std::fs::remove_file(slot.file().path()).unwrap();
        std::fs::create_dir(slot.file().path()).unwrap();

        slot.clear_save_data(&mut panel);
        assert!(matches!(slot.confirm_delete(&mut panel), Err(Error::Io(_))));
        assert!(!slot.is_populated());
        assert!(slot.file().path().exists());
        assert!(panel.current().is_none());
    }

    #[test]
    fn write_failure_leaves_slot_empty() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "file in the way").unwrap();
        let mut slot = SaveSlot::open(1, &blocker).unwrap();

        let data = GameData::new("d".into(), "m".into(), None, None);
        assert!(slot.save_game_data(data).is_err());
        assert!(!slot.is_populated());
    }
}
