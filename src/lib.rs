//! SaveSlots - Numbered save slots for a single-player game
//!
//! Each slot persists exactly one flat [`GameData`] record as JSON under
//! `saveData_{index}.json`, with an optional PNG screenshot embedded. Deleting
//! or overwriting a populated slot is a two-step confirm/commit driven through
//! a single [`ConfirmationPanel`].

use lazy_static::lazy_static;
use regex::Regex;
use std::path::PathBuf;

pub mod capture;
pub mod config;
pub mod confirmation;
pub mod formatters;
pub mod game_data;
pub mod load_slot;
pub mod pause_menu;
pub mod save_slot;
pub mod savefile;
pub mod screenshot;
pub mod world;

pub use capture::{CaptureState, FrameSource, ScreenshotCapture};
pub use config::Config;
pub use confirmation::{ConfirmationKind, ConfirmationPanel, PendingConfirmation};
pub use formatters::{Formatters, SlotSummary};
pub use game_data::{GameData, Position};
pub use load_slot::{LoadOutcome, LoadSlot, SlotView};
pub use pause_menu::{MenuItem, PauseMenu};
pub use save_slot::{SaveSlot, SlotClick};
pub use savefile::SlotFile;
pub use screenshot::Screenshot;
pub use world::{GameWorld, World};

/// Default save directory relative to the working directory
pub const DEFAULT_SAVE_DIR: &str = "saves";

/// Environment variable overriding the save directory
pub const SAVE_DIR_ENV: &str = "SAVESLOTS_DIR";

/// Number of slots shown by the save and load menus
pub const DEFAULT_SLOT_COUNT: u32 = 3;

/// Prefix of every slot file name
pub const SAVE_FILE_PREFIX: &str = "saveData_";

/// Locale-invariant display format of the save date, e.g. `2024/01/01 3:00 PM`
pub const DATE_FORMAT: &str = "%Y/%m/%d %-I:%M %p";

/// Mission label of a fresh world
pub const NEW_SAVE_MISSION: &str = "Test Mission";

lazy_static! {
    /// Matches slot file names and captures the slot index
    pub static ref SLOT_FILE_REGEX: Regex =
        Regex::new(r"^saveData_([0-9]+)\.json$").unwrap();
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid slot index: {0} (slots start at 1)")]
    InvalidSlot(u32),

    #[error("Cannot save non-finite player position {0}")]
    InvalidPosition(game_data::Position),

    #[error("Slot not found: {0}")]
    SlotNotFound(u32),

    #[error("No pending {action} confirmation for slot {slot}")]
    NoPendingConfirmation {
        slot: u32,
        action: confirmation::ConfirmationKind,
    },

    #[error("Malformed save file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
