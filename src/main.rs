#![windows_subsystem = "windows"]

use anyhow::Result;
use druid::{AppLauncher, Data, Lens};
use log::info;

mod brightness;
mod config;
mod mask;
mod overlay;
mod prompt;
mod selection_logic;
mod settings;

use brightness::BrightnessLevel;

/// Data shared by every window of the app. druid hands the same value to the
/// settings window and both overlays, so the slider and Ctrl+wheel write to
/// one place.
#[derive(Clone, Data, Lens, Default)]
pub struct AppState {
    pub brightness: BrightnessLevel,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("rsmask starting");

    AppLauncher::with_window(settings::settings_window()).launch(AppState::default())?;

    info!("rsmask shutting down");
    Ok(())
}
