//! Savefile - The JSON file backing one save slot

use crate::{game_data::GameData, Error, Result, SAVE_FILE_PREFIX, SLOT_FILE_REGEX};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The on-disk file of one slot index
#[derive(Debug, Clone)]
pub struct SlotFile {
    pub index: u32,
    pub save_dir: PathBuf,
}

impl SlotFile {
    /// Create a new SlotFile; slot indices start at 1
    pub fn new(index: u32, save_dir: impl Into<PathBuf>) -> Result<Self> {
        if index == 0 {
            return Err(Error::InvalidSlot(index));
        }

        Ok(Self {
            index,
            save_dir: save_dir.into(),
        })
    }

    /// Get the filename for this slot
    pub fn filename(&self) -> String {
        format!("{}{}.json", SAVE_FILE_PREFIX, self.index)
    }

    /// Get the full path for this slot
    pub fn path(&self) -> PathBuf {
        self.save_dir.join(self.filename())
    }

    /// Check if the save file exists
    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Write the record, replacing any previous content
    ///
    /// A position with an infinite or NaN coordinate is refused before
    /// anything touches the disk.
    pub fn write(&self, data: &GameData) -> Result<()> {
        if let Some(position) = data.player_position.filter(|p| !p.is_finite()) {
            return Err(Error::InvalidPosition(position));
        }

        let json = data.to_json()?;
        std::fs::create_dir_all(&self.save_dir)?;

        let path = self.path();
        std::fs::write(&path, json)?;
        info!("Saved game data to: {}", path.display());
        Ok(())
    }

    /// Read the record
    ///
    /// A missing file is `Ok(None)`. Content that is not a record is
    /// `Error::Malformed`.
    pub fn read(&self) -> Result<Option<GameData>> {
        let path = self.path();
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No save file found at: {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| Error::Malformed { path, source })
    }

    /// Delete the save file; returns whether a file was removed
    pub fn delete(&self) -> Result<bool> {
        let path = self.path();
        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!("Deleted save file: {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No save file found to delete at: {}", path.display());
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find every slot file in a directory, sorted by index
    pub fn discover(save_dir: &Path) -> Result<Vec<SlotFile>> {
        let entries = match std::fs::read_dir(save_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let index = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| SLOT_FILE_REGEX.captures(n))
                .and_then(|caps| caps[1].parse::<u32>().ok());

            if let Some(index) = index.filter(|i| *i > 0) {
                files.push(SlotFile::new(index, save_dir)?);
            }
        }

        files.sort_by_key(|f| f.index);
        Ok(files)
    }
}
