// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
// Only the Win32 backend drives the application logic outside of tests.
#![cfg_attr(not(windows), allow(dead_code))]

mod app_logic;
mod core;
mod platform_layer;

use crate::app_logic::STARTUP_FAILURE_EXIT_CODE;
use crate::core::{AppSettings, ConfigManagerOperations, CoreConfigManager, path_utils};

use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::File;
use std::path::Path;

const APP_NAME: &str = "ArtilleryShells";
const LOG_FILE_NAME: &str = "artillery_shells.log";

/*
 * Loads the stored settings, seeding the settings file with the defaults on
 * first run. Logging is not up yet, so anything worth reporting is returned
 * alongside the settings and logged by the caller.
 */
fn load_settings() -> (AppSettings, Vec<String>) {
    let config_manager = CoreConfigManager::new();
    let mut notes = Vec::new();

    let settings = match config_manager.load_settings(APP_NAME) {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            let defaults = AppSettings::default();
            if let Err(e) = config_manager.save_settings(APP_NAME, &defaults) {
                notes.push(format!("Could not write default settings: {e}"));
            }
            defaults
        }
        Err(e) => {
            notes.push(format!("Could not load settings, using defaults: {e}"));
            AppSettings::default()
        }
    };
    (settings, notes)
}

/*
 * Installs the global logger: a terminal logger (stderr) plus a file logger in
 * the application's configuration directory when that file can be created.
 * Failure to install is not fatal; the application simply runs unlogged.
 */
fn initialize_logging(level: LevelFilter, log_dir: Option<&Path>) {
    let config = ConfigBuilder::new()
        .set_thread_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Debug)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    let mut file_error = None;
    if let Some(dir) = log_dir {
        match File::create(dir.join(LOG_FILE_NAME)) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(e) => file_error = Some(e),
        }
    }

    if CombinedLogger::init(loggers).is_ok() {
        if let Some(e) = file_error {
            log::warn!("Log file could not be created: {e}");
        }
    }
}

#[cfg(windows)]
fn run_platform() -> i32 {
    use crate::app_logic::{NullRenderer, run_application};
    use crate::platform_layer::Win32Platform;

    let launch = Win32Platform::launch_context();
    let mut platform = match Win32Platform::new() {
        Ok(platform) => platform,
        Err(e) => {
            log::error!("Failed to initialize the Win32 platform layer: {e}");
            return STARTUP_FAILURE_EXIT_CODE;
        }
    };
    let mut renderer = NullRenderer::new();
    let exit_code = run_application(&mut platform, &launch, &mut renderer);
    log::debug!("Main: Presented {} idle frames.", renderer.frames());
    exit_code
}

#[cfg(not(windows))]
fn run_platform() -> i32 {
    log::error!("No native windowing backend is available on this platform.");
    STARTUP_FAILURE_EXIT_CODE
}

fn main() {
    let (settings, notes) = load_settings();
    let log_dir = path_utils::get_base_app_config_local_dir(APP_NAME);
    initialize_logging(settings.log_level_filter(), log_dir.as_deref());
    for note in notes {
        log::warn!("{note}");
    }

    log::info!(
        "Artillery Shells {} starting with {:?}.",
        env!("CARGO_PKG_VERSION"),
        settings
    );
    let exit_code = run_platform();
    log::info!("Exiting with code {exit_code}.");
    log::logger().flush();
    std::process::exit(exit_code);
}
