//! Formatters - Different output formatters for slot summaries

use crate::{
    config::Config, game_data::Position, pause_menu::PauseMenu, save_slot::SaveSlot,
    savefile::SlotFile, Result,
};
use serde::Serialize;
use std::io::Write;

/// What a listing shows about one slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotSummary {
    pub slot: u32,
    pub populated: bool,
    /// False for slot files found on disk outside the configured slots
    pub configured: bool,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_size: Option<(u32, u32)>,
}

impl SlotSummary {
    /// Summarize a slot from its record on disk
    pub fn from_slot(slot: &SaveSlot) -> Self {
        let data = slot.get_save_data();
        let screenshot = data.as_ref().and_then(|d| d.screenshot.as_ref());

        Self {
            slot: slot.index(),
            populated: data.is_some(),
            configured: true,
            path: slot.file().path().display().to_string(),
            date: data.as_ref().map(|d| d.date.clone()),
            mission: data.as_ref().map(|d| d.mission.clone()),
            position: data.as_ref().and_then(|d| d.player_position),
            screenshot_bytes: screenshot.map(|s| s.len()),
            screenshot_size: screenshot.and_then(|s| s.dimensions().ok()),
        }
    }

    /// Summarize every configured slot, then any other slot files in the
    /// save directory
    pub fn for_config(config: &Config) -> Result<Vec<SlotSummary>> {
        let menu = PauseMenu::from_config(config)?;
        let mut summaries: Vec<SlotSummary> = menu.slots().iter().map(Self::from_slot).collect();

        for file in SlotFile::discover(&config.save_dir)? {
            if config.has_slot(file.index) {
                continue;
            }
            let slot = SaveSlot::open(file.index, file.save_dir)?;
            summaries.push(Self {
                configured: false,
                ..Self::from_slot(&slot)
            });
        }

        Ok(summaries)
    }
}

/// Formatter trait
pub trait Formatter {
    fn format(&self, summaries: &[SlotSummary]) -> String;
    fn write_to(&self, summaries: &[SlotSummary], writer: &mut dyn Write) -> std::io::Result<()> {
        write!(writer, "{}", self.format(summaries))
    }
}

/// Shell formatter - colored markers for populated and empty slots
pub struct ShellFormatter;

impl Formatter for ShellFormatter {
    fn format(&self, summaries: &[SlotSummary]) -> String {
        summaries
            .iter()
            .map(|s| {
                let marker = if s.populated {
                    "\x1b[32m●\x1b[0m"
                } else {
                    "\x1b[90m○\x1b[0m"
                };
                format!("{} {}\n", marker, describe(s))
            })
            .collect()
    }
}

/// Text formatter - plain text, one block per slot
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format(&self, summaries: &[SlotSummary]) -> String {
        summaries.iter().map(|s| format!("{}\n", describe(s))).collect()
    }
}

/// JSON formatter - returns a JSON array of summaries
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, summaries: &[SlotSummary]) -> String {
        let mut json = serde_json::to_string_pretty(summaries).unwrap_or_else(|_| "[]".to_string());
        json.push('\n');
        json
    }
}

fn describe(summary: &SlotSummary) -> String {
    if !summary.populated {
        let stray = if summary.configured {
            ""
        } else {
            " (unreadable, outside the configured slots)"
        };
        return format!("Slot {}: empty{}", summary.slot, stray);
    }

    let mut lines = vec![format!(
        "Slot {}: {} - {}",
        summary.slot,
        summary.date.as_deref().unwrap_or(""),
        summary.mission.as_deref().unwrap_or("")
    )];

    match summary.position {
        Some(position) => lines.push(format!("  position: {}", position)),
        None => lines.push("  position: none".to_string()),
    }

    match (summary.screenshot_bytes, summary.screenshot_size) {
        (Some(bytes), Some((w, h))) => lines.push(format!("  screenshot: {}x{} ({} bytes)", w, h, bytes)),
        (Some(bytes), None) => lines.push(format!("  screenshot: unreadable ({} bytes)", bytes)),
        _ => lines.push("  screenshot: none".to_string()),
    }

    lines.push(format!("  file: {}", summary.path));
    if !summary.configured {
        lines.push("  outside the configured slots".to_string());
    }
    lines.join("\n")
}

/// Formatters module - factory for creating formatters
pub struct Formatters;

impl Formatters {
    pub fn by_name(name: &str) -> Box<dyn Formatter> {
        match name.to_lowercase().as_str() {
            "shell" => Box::new(ShellFormatter),
            "text" => Box::new(TextFormatter),
            "json" => Box::new(JsonFormatter),
            _ => Box::new(ShellFormatter),
        }
    }
}
