//! Radar Console
//!
//! A command-line front end that drives a simulated radar through the same
//! property interface host gauges use, persisting the radar between runs as
//! a binary snapshot.

mod console;
mod settings;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::Console;
use settings::Settings;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "radar-console")]
#[command(author, version, about = "Drive a simulated radar through its gauge properties", long_about = None)]
struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Snapshot file to restore from and save to
    #[arg(long)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every property with its id and units
    List,
    /// Read one property
    Get {
        /// Property name, case-insensitive
        name: String,
    },
    /// Write one property
    Set {
        /// Property name, case-insensitive
        name: String,
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
    /// Clear the radar image
    Clear,
    /// Advance the radar sweep
    Sweep {
        /// Simulated time in seconds
        seconds: f64,
    },
    /// Print the radar state as JSON
    Dump,
    /// Delete the saved snapshot
    Reset,
    /// Write the current settings to the settings file
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "radar_console=info,radar_gauge=info,radar_protocol=info,radar_sim=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::load(),
    };
    let snapshot_path = cli
        .snapshot
        .clone()
        .or_else(|| settings.snapshot_file())
        .context("could not determine snapshot path")?;

    match cli.command {
        Command::Reset => return reset(&snapshot_path),
        Command::Config => return write_settings(&settings, cli.config.as_deref()),
        _ => {}
    }

    let mut console = Console::new(&settings)?;
    restore(&mut console, &snapshot_path);

    match cli.command {
        Command::List => {
            for line in console.list() {
                println!("{}", line);
            }
        }
        Command::Get { name } => println!("{}", console.get(&name)?),
        Command::Set { name, value } => {
            console.set(&name, value)?;
            if console.is_readable(&name) {
                println!("{} = {}", name, console.get(&name)?);
            } else {
                println!("{} written", name);
            }
        }
        Command::Clear => {
            console.clear()?;
            println!("Radar image cleared");
        }
        Command::Sweep { seconds } => {
            let offset = console.sweep(seconds);
            println!("{} (beam {:+.1}°)", console.summary(), offset);
        }
        Command::Dump => println!("{}", console.dump()?),
        // Handled before the radar is created
        Command::Reset | Command::Config => {}
    }

    save(&console, &snapshot_path)
}

/// Restore the snapshot file, starting fresh if it is missing or damaged
fn restore(console: &mut Console, path: &Path) {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
        Err(e) => {
            warn!("Cannot read {}, starting fresh: {}", path.display(), e);
            return;
        }
    };

    match console.restore(&bytes) {
        Ok(outcome) => info!("Restored {}: {:?}", path.display(), outcome),
        Err(e) => warn!("Ignoring snapshot {}: {:#}", path.display(), e),
    }
}

fn write_settings(settings: &Settings, path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => {
            settings.save_to(path)?;
            path.to_path_buf()
        }
        None => {
            settings.save()?;
            Settings::settings_path().context("could not determine settings path")?
        }
    };
    println!("Settings written to {}", path.display());
    Ok(())
}

fn save(console: &Console, path: &Path) -> Result<()> {
    let Some(bytes) = console.save() else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, &bytes).with_context(|| format!("failed to write {}", path.display()))?;
    info!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn reset(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            info!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("No snapshot at {}", path.display());
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("failed to remove {}", path.display())),
    }
}
