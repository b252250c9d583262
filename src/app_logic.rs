/*
 * This module provides the application logic layer: the main window's
 * procedure, the idle-processing message loop, the startup sequence that ties
 * registration, creation and the loop together, and the renderer used for
 * idle frames. It talks to the OS only through the traits in `platform_layer`.
 * Unit tests for the startup sequence are in `startup_tests.rs`.
 */
pub mod event_loop;
pub mod renderer;
pub mod startup;
pub mod window_procedure;

#[cfg(test)]
mod mock_platform;

pub use startup::STARTUP_FAILURE_EXIT_CODE;
#[cfg(windows)]
pub use renderer::NullRenderer;
#[cfg(windows)]
pub use startup::run_application;
