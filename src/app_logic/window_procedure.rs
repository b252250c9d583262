use crate::platform_layer::{
    DefaultMessageHandler, MessageCode, MessageRecord, QuitSignal, WindowHandle,
};

/// Exit code carried by the quit request posted when the main window goes away.
pub const QUIT_EXIT_CODE: i32 = 0;

/*
 * The main window's procedure.
 *
 * A destroy notification posts a quit request and then still falls through to
 * the default handler for the same message. Every other message is forwarded
 * unmodified and the default handler's result is returned.
 */
pub fn handle_window_message(
    window: WindowHandle,
    message: MessageRecord,
    default_handler: &dyn DefaultMessageHandler,
    quit_signal: &dyn QuitSignal,
) -> isize {
    if message.code == MessageCode::DESTROY {
        log::debug!("WindowProcedure: Destroy for {window:?}, requesting quit.");
        quit_signal.post_quit(QUIT_EXIT_CODE);
    }

    default_handler.default_window_message(window, message.code, message.wparam, message.lparam)
}
