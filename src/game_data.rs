//! GameData - The flat record stored in one save slot

use crate::{screenshot::Screenshot, DATE_FORMAT};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Player position in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Position = Position::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Check if every coordinate is zero
    pub fn is_origin(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Check if every coordinate is a finite number
    ///
    /// JSON has no infinity or NaN, so only finite positions can be stored.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl std::str::FromStr for Position {
    type Err = String;

    /// Parse `X,Y,Z`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("expected X,Y,Z but got '{}'", s));
        }

        let mut coords = [0f32; 3];
        for (coord, part) in coords.iter_mut().zip(&parts) {
            *coord = part
                .parse()
                .map_err(|e| format!("invalid coordinate '{}': {}", part, e))?;
        }

        let position = Self::new(coords[0], coords[1], coords[2]);
        if !position.is_finite() {
            return Err(format!("coordinates must be finite but got '{}'", s));
        }
        Ok(position)
    }
}

/// One save record
///
/// Serialized through [`RawGameData`], which keeps the flat legacy field names
/// on disk while the in-memory record carries explicit presence for both the
/// screenshot and the player position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGameData", into = "RawGameData")]
pub struct GameData {
    pub date: String,
    pub mission: String,
    pub screenshot: Option<Screenshot>,
    pub player_position: Option<Position>,
}

impl GameData {
    /// Create a new GameData
    pub fn new(
        date: String,
        mission: String,
        screenshot: Option<Screenshot>,
        player_position: Option<Position>,
    ) -> Self {
        Self {
            date,
            mission,
            screenshot,
            player_position,
        }
    }

    /// Create a record stamped with `now` in the display date format
    pub fn stamped(
        now: NaiveDateTime,
        mission: impl Into<String>,
        screenshot: Option<Screenshot>,
        player_position: Option<Position>,
    ) -> Self {
        Self::new(format_date(now), mission.into(), screenshot, player_position)
    }

    /// Check if a screenshot is embedded
    pub fn has_screenshot(&self) -> bool {
        self.screenshot.is_some()
    }

    /// Serialize to the on-disk JSON document
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from the on-disk JSON document
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Format a timestamp the way save dates are displayed
pub fn format_date(now: NaiveDateTime) -> String {
    now.format(DATE_FORMAT).to_string()
}

/// On-disk layout of a [`GameData`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawGameData {
    date: String,
    mission: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    screenshot_data: Option<Vec<u8>>,
    player_position_x: f32,
    player_position_y: f32,
    player_position_z: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    has_player_position: Option<bool>,
}

impl From<RawGameData> for GameData {
    fn from(raw: RawGameData) -> Self {
        let position = Position::new(
            raw.player_position_x,
            raw.player_position_y,
            raw.player_position_z,
        );

        // Records written before the presence flag existed treat origin as unset
        let has_position = raw
            .has_player_position
            .unwrap_or_else(|| !position.is_origin());

        Self {
            date: raw.date,
            mission: raw.mission,
            screenshot: raw
                .screenshot_data
                .filter(|bytes| !bytes.is_empty())
                .map(Screenshot::from_png_bytes),
            player_position: has_position.then_some(position),
        }
    }
}

impl From<GameData> for RawGameData {
    fn from(data: GameData) -> Self {
        let position = data.player_position.unwrap_or_default();

        Self {
            date: data.date,
            mission: data.mission,
            screenshot_data: data.screenshot.map(Screenshot::into_bytes),
            player_position_x: position.x,
            player_position_y: position.y,
            player_position_z: position.z,
            has_player_position: Some(data.player_position.is_some()),
        }
    }
}
