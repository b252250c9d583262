use super::error::{PlatformError, Result as PlatformResult};
use super::types::{
    ClassAtom, LaunchContext, MessageQueue, MessageRecord, ShowCommand, WindowClassDescriptor,
    WindowConfig, WindowHandle, WindowProcedure, WindowingPlatform,
};
use super::window_common;

use windows::{
    Win32::{
        Foundation::HINSTANCE,
        Graphics::Gdi::UpdateWindow,
        System::{
            LibraryLoader::GetModuleHandleW,
            Threading::{GetStartupInfoW, STARTF_USESHOWWINDOW, STARTUPINFOW},
        },
        UI::WindowsAndMessaging::{
            DispatchMessageW, MSG, PM_NOREMOVE, PM_REMOVE, PeekMessageW, SHOW_WINDOW_CMD,
            ShowWindow, TranslateMessage,
        },
    },
    core::PCWSTR,
};

use std::collections::HashMap;

/// The Win32 windowing backend.
///
/// Owns the module instance handle and remembers, per registered class name,
/// the atom and window procedure so that windows created from the class can be
/// wired to the right procedure. All calls must happen on the thread that owns
/// the message queue.
pub struct Win32Platform {
    h_instance: HINSTANCE,
    registered_classes: HashMap<String, (ClassAtom, WindowProcedure)>,
}

impl Win32Platform {
    pub fn new() -> PlatformResult<Self> {
        let h_module = unsafe { GetModuleHandleW(PCWSTR::null()) }.map_err(|e| {
            PlatformError::InitializationFailed(format!("GetModuleHandleW failed: {e}"))
        })?;
        log::debug!("Platform: Module instance handle is {:?}.", h_module);
        Ok(Win32Platform {
            h_instance: HINSTANCE(h_module.0),
            registered_classes: HashMap::new(),
        })
    }

    /// Collects what the process was started with.
    ///
    /// The show-state flag comes from the startup information when the parent
    /// process supplied one, which is what the C runtime hands to `WinMain`.
    pub fn launch_context() -> LaunchContext {
        let mut startup_info = STARTUPINFOW {
            cb: std::mem::size_of::<STARTUPINFOW>() as u32,
            ..Default::default()
        };
        unsafe { GetStartupInfoW(&mut startup_info) };

        let show_command = if startup_info.dwFlags.0 & STARTF_USESHOWWINDOW.0 != 0 {
            ShowCommand(i32::from(startup_info.wShowWindow))
        } else {
            ShowCommand::SHOW_DEFAULT
        };

        LaunchContext {
            show_command,
            command_line: std::env::args().collect(),
        }
    }

    fn peek_with(&self, remove: bool) -> Option<MessageRecord> {
        let mut msg = MSG::default();
        let flags = if remove { PM_REMOVE } else { PM_NOREMOVE };
        let got_message = unsafe { PeekMessageW(&mut msg, None, 0, 0, flags) }.as_bool();
        got_message.then(|| window_common::record_from_native(&msg))
    }
}

impl MessageQueue for Win32Platform {
    fn peek(&mut self) -> Option<MessageRecord> {
        self.peek_with(false)
    }

    fn poll(&mut self) -> Option<MessageRecord> {
        self.peek_with(true)
    }

    fn translate(&mut self, message: &MessageRecord) {
        let msg = window_common::native_from_record(message);
        let _ = unsafe { TranslateMessage(&msg) };
    }

    fn dispatch(&mut self, message: &MessageRecord) -> isize {
        let msg = window_common::native_from_record(message);
        unsafe { DispatchMessageW(&msg) }.0
    }
}

impl WindowingPlatform for Win32Platform {
    fn register_class(&mut self, descriptor: &WindowClassDescriptor) -> PlatformResult<ClassAtom> {
        let atom = window_common::register_window_class(self.h_instance, descriptor)?;
        log::debug!(
            "Platform: Registered window class '{}' as atom {:?}.",
            descriptor.class_name,
            atom
        );
        self.registered_classes.insert(
            descriptor.class_name.clone(),
            (atom, descriptor.procedure),
        );
        Ok(atom)
    }

    fn create_window(&mut self, config: &WindowConfig) -> PlatformResult<WindowHandle> {
        let Some(&(_, procedure)) = self.registered_classes.get(&config.class_name) else {
            return Err(PlatformError::WindowCreationFailed(format!(
                "Window class '{}' has not been registered",
                config.class_name
            )));
        };

        let hwnd = window_common::create_native_window(self.h_instance, config, procedure)?;
        log::debug!(
            "Platform: Native window created with HWND {:?} for class '{}'.",
            hwnd,
            config.class_name
        );
        Ok(window_common::handle_from_hwnd(hwnd))
    }

    fn show_window(&mut self, window: WindowHandle, command: ShowCommand) {
        let hwnd = window_common::hwnd_from_handle(window);
        unsafe {
            let _ = ShowWindow(hwnd, SHOW_WINDOW_CMD(command.0));
            let _ = UpdateWindow(hwnd);
        }
    }
}
