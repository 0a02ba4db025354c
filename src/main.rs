#![forbid(unsafe_code)]
#![cfg_attr(not(debug_assertions), deny(warnings))] // Forbid warnings in release builds
#![warn(clippy::all, rust_2018_idioms)]

use anyhow::anyhow;
use clap::Parser;
use log::{info, warn};

use flip_clock::cli::Cli;
use flip_clock::prefs::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
use flip_clock::settings::Settings;
use flip_clock::{host, FlipClockApp};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let settings = cli.apply(Settings::load_or_default(cli.config.as_deref()));
    let prefs = open_preferences();
    if cli.dev {
        host::spawn_memory_monitor();
    }

    let native_options = host::native_options(&settings);
    eframe::run_native(
        "flip clock",
        native_options,
        Box::new(move |cc| Box::new(FlipClockApp::new(cc, &settings, prefs))),
    )
    .map_err(|e| anyhow!("clock window failed: {e}"))?;

    info!("Clock closed");
    Ok(())
}

/// The preference file, or an in-memory store when there is nowhere to keep it.
fn open_preferences() -> Box<dyn PreferenceStore> {
    match FilePreferenceStore::open_default() {
        Ok(store) => {
            info!("Remembering mode in {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            warn!("{}; the selected mode will not survive a restart", e);
            Box::<MemoryPreferenceStore>::default()
        }
    }
}
