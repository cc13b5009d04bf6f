//! SaveSlots CLI - Inspect and manage save slots from the command line

use clap::{Parser, Subcommand};
use saveslots::{
    Config, ConfirmationPanel, Formatters, LoadOutcome, LoadSlot, PauseMenu, Position, SlotClick,
    SlotSummary, World, DEFAULT_SLOT_COUNT, SAVE_DIR_ENV,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "saveslots")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the slot files
    #[arg(long, global = true, env = SAVE_DIR_ENV, default_value = saveslots::DEFAULT_SAVE_DIR)]
    save_dir: PathBuf,

    /// Number of slots (indices 1..=N)
    #[arg(long, global = true, default_value_t = DEFAULT_SLOT_COUNT)]
    slots: u32,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every slot, plus slot files outside the configured range
    List {
        /// Output formatter (shell, text, json)
        #[arg(short, long, default_value = "shell")]
        format: String,
    },

    /// Show one slot
    Show {
        slot: u32,

        /// Output formatter (shell, text, json)
        #[arg(short, long, default_value = "shell")]
        format: String,

        /// Write the embedded screenshot to this PNG file
        #[arg(long)]
        export_screenshot: Option<PathBuf>,
    },

    /// Save into a slot
    Save {
        slot: u32,

        /// Mission label
        #[arg(short, long)]
        mission: String,

        /// Player position as X,Y,Z
        #[arg(short, long, allow_hyphen_values = true)]
        position: Option<Position>,

        /// PNG to embed as the screenshot
        #[arg(short, long)]
        screenshot: Option<PathBuf>,

        /// Overwrite a populated slot
        #[arg(long)]
        force: bool,
    },

    /// Load a slot and report the position it restores
    Load { slot: u32 },

    /// Delete a slot
    Delete {
        slot: u32,

        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::new(&cli.save_dir).with_slot_count(cli.slots);

    if let Err(e) = run(cli.command, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &Config) -> saveslots::Result<()> {
    let mut stdout = io::stdout();

    match command {
        Commands::List { format } => {
            let summaries = SlotSummary::for_config(config)?;
            Formatters::by_name(&format).write_to(&summaries, &mut stdout)?;
        }
        Commands::Show {
            slot,
            format,
            export_screenshot,
        } => {
            let menu = PauseMenu::from_config(config)?;
            let save_slot = menu.slot(slot)?;
            Formatters::by_name(&format)
                .write_to(&[SlotSummary::from_slot(save_slot)], &mut stdout)?;

            if let Some(path) = export_screenshot {
                match save_slot.get_save_data().and_then(|d| d.screenshot) {
                    Some(screenshot) => {
                        screenshot.write_to(&path)?;
                        writeln!(stdout, "Screenshot written to {}", path.display())?;
                    }
                    None => writeln!(stdout, "Slot {} has no screenshot", slot)?,
                }
            }
        }
        Commands::Save {
            slot,
            mission,
            position,
            screenshot,
            force,
        } => save(config, slot, mission, position, screenshot.as_deref(), force)?,
        Commands::Load { slot } => {
            let menu = PauseMenu::from_config(config)?;
            let save_slot = menu.slot(slot)?;
            let mut load_slot = LoadSlot::new(slot);
            let mut panel = ConfirmationPanel::new();
            let mut world = World::new(Some(Position::ORIGIN), String::new());

            load_slot.refresh(save_slot);
            if !load_slot.on_click(&mut panel) {
                writeln!(stdout, "Slot {} is empty", slot)?;
                return Ok(());
            }

            match load_slot.load_game_data(save_slot, &mut world, &mut panel) {
                LoadOutcome::Restored(position) => {
                    writeln!(stdout, "Slot {} restores player to {}", slot, position)?
                }
                LoadOutcome::NoPosition => {
                    writeln!(stdout, "Slot {} has no player position", slot)?
                }
                LoadOutcome::NoData => writeln!(stdout, "Slot {} could not be read", slot)?,
            }
        }
        Commands::Delete { slot, yes } => {
            let mut menu = PauseMenu::from_config(config)?;
            let save_slot = menu.slot_mut(slot)?;
            let mut panel = ConfirmationPanel::new();

            if !save_slot.is_populated() {
                writeln!(stdout, "Slot {} is already empty", slot)?;
                return Ok(());
            }

            save_slot.clear_save_data(&mut panel);
            if yes {
                save_slot.confirm_delete(&mut panel)?;
                writeln!(stdout, "Slot {} deleted", slot)?;
            } else {
                save_slot.cancel_delete(&mut panel);
                writeln!(
                    stdout,
                    "Would delete {}; re-run with --yes to confirm",
                    save_slot.file().path().display()
                )?;
            }
        }
    }

    stdout.flush()?;
    Ok(())
}

fn save(
    config: &Config,
    slot: u32,
    mission: String,
    position: Option<Position>,
    screenshot: Option<&Path>,
    force: bool,
) -> saveslots::Result<()> {
    let mut menu = PauseMenu::from_config(config)?;
    let mut stdout = io::stdout();

    if let Some(path) = screenshot {
        let mut source = || match image::open(path) {
            Ok(frame) => Some(frame.to_rgba8()),
            Err(e) => {
                tracing::error!("Failed to read screenshot {}: {}", path.display(), e);
                None
            }
        };
        menu.on_pause_pressed();
        if menu.end_frame(&mut source) == 0 {
            writeln!(stdout, "Saving without a screenshot")?;
        }
    }

    let world = World::new(position, mission);
    let mut panel = ConfirmationPanel::new();
    let now = chrono::Local::now().naive_local();
    let save_slot = menu.slot_mut(slot)?;

    match save_slot.on_card_clicked(&world, &mut panel, now)? {
        SlotClick::Saved => writeln!(stdout, "Slot {} saved", slot)?,
        SlotClick::OverwritePrompted if force => {
            save_slot.confirm_overwrite(&world, &mut panel, now)?;
            writeln!(stdout, "Slot {} overwritten", slot)?;
        }
        SlotClick::OverwritePrompted => {
            save_slot.cancel_overwrite(&mut panel);
            writeln!(
                stdout,
                "Slot {} already holds a save; re-run with --force to overwrite",
                slot
            )?;
        }
    }

    Ok(())
}
