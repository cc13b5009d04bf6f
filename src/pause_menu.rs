//! PauseMenu - Pause toggle, menu selection and screenshot distribution

use crate::{
    capture::{FrameSource, ScreenshotCapture},
    config::Config,
    save_slot::SaveSlot,
    screenshot::Screenshot,
    Error, Result,
};
use tracing::{debug, info};

/// Cards of the pause menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    MainMenu,
    SaveMenu,
    Inventory,
    CaseFiles,
    ConclusionBoard,
    CloseMenu,
}

impl MenuItem {
    pub const ALL: [MenuItem; 6] = [
        MenuItem::MainMenu,
        MenuItem::SaveMenu,
        MenuItem::Inventory,
        MenuItem::CaseFiles,
        MenuItem::ConclusionBoard,
        MenuItem::CloseMenu,
    ];
}

impl std::fmt::Display for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuItem::MainMenu => write!(f, "Main Menu"),
            MenuItem::SaveMenu => write!(f, "Save Menu"),
            MenuItem::Inventory => write!(f, "Inventory"),
            MenuItem::CaseFiles => write!(f, "Case Files"),
            MenuItem::ConclusionBoard => write!(f, "Conclusion Board"),
            MenuItem::CloseMenu => write!(f, "Close Menu"),
        }
    }
}

/// The in-game pause menu and the save slots it feeds
#[derive(Debug, Default)]
pub struct PauseMenu {
    slots: Vec<SaveSlot>,
    capture: ScreenshotCapture,
    paused: bool,
    selected: usize,
}

impl PauseMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open every configured slot
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut menu = Self::new();
        for &index in &config.slot_indices {
            menu.register_slot(SaveSlot::open(index, &config.save_dir)?);
        }
        Ok(menu)
    }

    /// Add a slot, replacing any slot already registered under its index
    pub fn register_slot(&mut self, slot: SaveSlot) {
        match self.slots.iter().position(|s| s.index() == slot.index()) {
            Some(i) => self.slots[i] = slot,
            None => {
                self.slots.push(slot);
                self.slots.sort_by_key(SaveSlot::index);
            }
        }
    }

    pub fn slots(&self) -> &[SaveSlot] {
        &self.slots
    }

    pub fn slot(&self, index: u32) -> Result<&SaveSlot> {
        self.slots
            .iter()
            .find(|s| s.index() == index)
            .ok_or(Error::SlotNotFound(index))
    }

    pub fn slot_mut(&mut self, index: u32) -> Result<&mut SaveSlot> {
        self.slots
            .iter_mut()
            .find(|s| s.index() == index)
            .ok_or(Error::SlotNotFound(index))
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause key pressed; returns the new paused state
    ///
    /// Pausing requests a screenshot of the frame being left.
    pub fn on_pause_pressed(&mut self) -> bool {
        self.paused = !self.paused;
        if self.paused {
            self.capture.request();
        }
        info!(paused = self.paused, "Pause menu toggled");
        self.paused
    }

    /// Frame boundary: fulfil a pending capture and hand it to every slot
    ///
    /// Returns the number of slots that received a screenshot.
    pub fn end_frame(&mut self, source: &mut dyn FrameSource) -> usize {
        self.capture.end_of_frame(source);

        let Some(screenshot) = self.capture.take_ready() else {
            return 0;
        };

        for slot in &mut self.slots {
            slot.update_screenshot(screenshot.clone());
        }
        debug!(slots = self.slots.len(), "Screenshot distributed to save slots");
        self.slots.len()
    }

    /// The last completed capture
    pub fn captured_screenshot(&self) -> Option<&Screenshot> {
        self.capture.latest()
    }

    pub fn capture(&self) -> &ScreenshotCapture {
        &self.capture
    }

    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }

    /// Move the highlighted card, wrapping at both ends
    pub fn move_selection(&mut self, delta: i32) -> MenuItem {
        let len = MenuItem::ALL.len();
        let step = delta.rem_euclid(len as i32) as usize;
        self.selected = (self.selected + step) % len;
        self.selected()
    }

    pub fn select(&mut self, item: MenuItem) {
        if let Some(i) = MenuItem::ALL.iter().position(|m| *m == item) {
            self.selected = i;
        }
    }

    /// Activate the highlighted card; closing the menu unpauses
    pub fn activate(&mut self) -> MenuItem {
        let item = self.selected();
        if item == MenuItem::CloseMenu {
            self.paused = false;
        }
        debug!(item = %item, "Menu item activated");
        item
    }
}
