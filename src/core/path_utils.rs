/*
 * This module locates the per-user directory the application keeps its
 * settings file and log file in, creating it on first use.
 */
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/*
 * Retrieves the application's local (non-roaming) configuration directory,
 * creating it if necessary. No organization qualifier is used, so the
 * directory sits directly under the user's local application data root
 * (e.g. AppData/Local on Windows, ~/.config on Linux).
 *
 * Returns `None` if the platform has no such location (no home directory) or
 * if the directory could not be created.
 */
pub fn get_base_app_config_local_dir(app_name: &str) -> Option<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", app_name)?;
    let config_path = proj_dirs.config_local_dir();
    if !config_path.exists() {
        if let Err(e) = fs::create_dir_all(config_path) {
            log::error!("PathUtils: Failed to create config directory {config_path:?}: {e}");
            return None;
        }
        log::debug!("PathUtils: Created config directory {config_path:?}");
    }
    Some(config_path.to_path_buf())
}
