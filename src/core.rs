/*
 * This module consolidates the platform-agnostic support code of the
 * application: loading and persisting user settings, and locating the per-user
 * directory those settings and the log file live in.
 */
pub mod config;
pub mod path_utils;

// Re-export config related items
pub use config::{AppSettings, ConfigManagerOperations, CoreConfigManager};
