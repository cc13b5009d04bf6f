//! Config - Where slots live and which slots exist

use crate::DEFAULT_SLOT_COUNT;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub save_dir: PathBuf,
    /// Slot indices shown by the menus, each paired with its own file
    pub slot_indices: Vec<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from(crate::DEFAULT_SAVE_DIR),
            slot_indices: (1..=DEFAULT_SLOT_COUNT).collect(),
        }
    }
}

impl Config {
    /// Default slots in the given directory
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
            ..Self::default()
        }
    }

    /// Slots `1..=count`
    pub fn with_slot_count(self, count: u32) -> Self {
        self.with_slot_indices((1..=count).collect())
    }

    /// Explicit slot indices; zero and duplicates are dropped
    pub fn with_slot_indices(mut self, mut indices: Vec<u32>) -> Self {
        indices.retain(|i| *i > 0);
        indices.sort_unstable();
        indices.dedup();
        self.slot_indices = indices;
        self
    }

    /// Check if a slot index is one of the configured slots
    pub fn has_slot(&self, index: u32) -> bool {
        self.slot_indices.contains(&index)
    }
}
