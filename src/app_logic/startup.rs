/*
 * The application's startup sequence: register the main window class, create
 * the main window, show it, and run the message loop until quit. Both
 * registration and creation failures are fatal and turn into
 * `STARTUP_FAILURE_EXIT_CODE` without any retry. Unit tests live in
 * `startup_tests.rs`.
 */
use super::event_loop;
use super::window_procedure::handle_window_message;
use crate::platform_layer::{
    BackgroundBrush, CursorSource, FrameRenderer, IconSource, LaunchContext,
    WindowClassDescriptor, WindowConfig, WindowPosition, WindowStyle, WindowingPlatform,
};

/// Exit status reported when the window class or the window cannot be created.
pub const STARTUP_FAILURE_EXIT_CODE: i32 = -1;

pub const WINDOW_CLASS_NAME: &str = "Game Window Class";
pub const WINDOW_TITLE: &str = "Artillery Shells";
pub const WINDOW_WIDTH: i32 = 800;
pub const WINDOW_HEIGHT: i32 = 600;

pub fn main_window_class() -> WindowClassDescriptor {
    WindowClassDescriptor {
        style: 0,
        procedure: handle_window_message,
        icon: IconSource::Application,
        cursor: CursorSource::Arrow,
        background: BackgroundBrush::Black,
        menu_name: None,
        class_name: WINDOW_CLASS_NAME.to_string(),
        small_icon: None,
    }
}

pub fn main_window_config() -> WindowConfig {
    WindowConfig {
        class_name: WINDOW_CLASS_NAME.to_string(),
        title: WINDOW_TITLE.to_string(),
        style: WindowStyle::OverlappedWindow,
        position: WindowPosition::Default,
        width: WINDOW_WIDTH,
        height: WINDOW_HEIGHT,
    }
}

/// Runs the application on `platform` and returns the process exit status.
pub fn run_application<P, R>(
    platform: &mut P,
    launch: &LaunchContext,
    renderer: &mut R,
) -> i32
where
    P: WindowingPlatform + ?Sized,
    R: FrameRenderer + ?Sized,
{
    log::debug!(
        "Startup: Launched with {:?} and arguments {:?}.",
        launch.show_command,
        launch.command_line
    );

    let class = main_window_class();
    if let Err(e) = platform.register_class(&class) {
        log::error!("Startup: Could not register window class '{}': {e}", class.class_name);
        return STARTUP_FAILURE_EXIT_CODE;
    }

    let config = main_window_config();
    let window = match platform.create_window(&config) {
        Ok(window) => window,
        Err(e) => {
            log::error!("Startup: Could not create main window '{}': {e}", config.title);
            return STARTUP_FAILURE_EXIT_CODE;
        }
    };
    log::info!(
        "Startup: Main window {:?} created ({}x{}).",
        window,
        config.width,
        config.height
    );

    platform.show_window(window, launch.show_command);

    let outcome = event_loop::run_message_loop(platform, renderer);
    log::info!("Startup: Message loop finished with exit code {}.", outcome.exit_code);
    outcome.exit_code
}
