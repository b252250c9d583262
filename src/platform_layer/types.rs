/*
 * This module defines the data types and capability traits shared between the
 * application logic and the platform layer. It includes opaque identifiers for
 * window classes and windows, the message record delivered by the OS queue,
 * the descriptors used to register a class and create a window, and the traits
 * (`DefaultMessageHandler`, `QuitSignal`, `MessageQueue`, `WindowingPlatform`,
 * `FrameRenderer`) that a native backend or a test double must implement.
 * Nothing in here depends on a particular operating system.
 */

use super::error::Result as PlatformResult;

/// An opaque identifier for a registered window class.
///
/// Wraps the atom returned by the OS on registration. Zero is never a valid atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassAtom(pub u16);

/// An opaque, non-owning reference to a native window.
///
/// The OS owns the window; the application only uses this value to address it.
/// The underlying identifier is never dereferenced by platform-agnostic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowHandle(pub(crate) usize);

impl WindowHandle {
    pub const NONE: WindowHandle = WindowHandle(0);

    pub fn from_raw(raw: usize) -> Self {
        WindowHandle(raw)
    }

    pub fn as_raw(self) -> usize {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// A numeric message code as delivered by the OS queue.
///
/// Only the codes the application reacts to are named; every other value is an
/// opaque pass-through. The numbers match the Win32 `WM_*` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageCode(pub u32);

impl MessageCode {
    pub const NULL: MessageCode = MessageCode(0x0000);
    pub const DESTROY: MessageCode = MessageCode(0x0002);
    pub const QUIT: MessageCode = MessageCode(0x0012);
}

/// One queued event: target window, code, two generic parameters, and the
/// timestamp/cursor position the OS attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRecord {
    pub window: WindowHandle,
    pub code: MessageCode,
    pub wparam: usize,
    pub lparam: isize,
    pub time: u32,
    pub point: (i32, i32),
}

impl MessageRecord {
    /// The neutral "no message" record the event loop starts from. It is
    /// never a quit, so a loop seeded with it always runs at least once.
    pub fn null() -> Self {
        Self::new(WindowHandle::NONE, MessageCode::NULL, 0, 0)
    }

    pub fn new(window: WindowHandle, code: MessageCode, wparam: usize, lparam: isize) -> Self {
        MessageRecord {
            window,
            code,
            wparam,
            lparam,
            time: 0,
            point: (0, 0),
        }
    }

    pub fn is_quit(&self) -> bool {
        self.code == MessageCode::QUIT
    }
}

/// The platform's default window-message handler.
///
/// Every message the window procedure does not consume is forwarded here
/// unmodified. On Win32 this is `DefWindowProcW`.
pub trait DefaultMessageHandler {
    fn default_window_message(
        &self,
        window: WindowHandle,
        code: MessageCode,
        wparam: usize,
        lparam: isize,
    ) -> isize;
}

/// Posts a quit request carrying `exit_code` to the calling thread's queue.
pub trait QuitSignal {
    fn post_quit(&self, exit_code: i32);
}

/// The signature every window procedure has. The procedure is stored in the
/// class descriptor and invoked synchronously for each dispatched message,
/// receiving the platform capabilities it may delegate to.
pub type WindowProcedure =
    fn(WindowHandle, MessageRecord, &dyn DefaultMessageHandler, &dyn QuitSignal) -> isize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSource {
    /// The system's default application icon.
    Application,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorSource {
    /// The standard arrow cursor.
    Arrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundBrush {
    /// The opaque black stock brush.
    Black,
}

/// Configuration record submitted once to register a window class.
///
/// The structure-size tag and the module instance are filled in by the native
/// backend, since they have no meaning outside of it.
#[derive(Debug, Clone)]
pub struct WindowClassDescriptor {
    pub style: u32,
    pub procedure: WindowProcedure,
    pub icon: IconSource,
    pub cursor: CursorSource,
    pub background: BackgroundBrush,
    pub menu_name: Option<String>,
    pub class_name: String,
    pub small_icon: Option<IconSource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStyle {
    /// Bordered, titled, resizable top-level window with a system menu.
    OverlappedWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPosition {
    /// Let the system choose.
    Default,
}

/// Configuration for creating a new top-level window of a registered class.
///
/// There is never a parent, a menu, or extra creation data for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub class_name: String,
    pub title: String,
    pub style: WindowStyle,
    pub position: WindowPosition,
    pub width: i32,
    pub height: i32,
}

/// The window-show-state flag handed to the process at entry. Values are the
/// Win32 `SW_*` numbers; the platform passes them through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowCommand(pub i32);

impl ShowCommand {
    pub const SHOW_NORMAL: ShowCommand = ShowCommand(1);
    pub const SHOW_DEFAULT: ShowCommand = ShowCommand(10);
}

impl Default for ShowCommand {
    fn default() -> Self {
        ShowCommand::SHOW_DEFAULT
    }
}

/// What the process was started with.
#[derive(Debug, Clone, Default)]
pub struct LaunchContext {
    pub show_command: ShowCommand,
    pub command_line: Vec<String>,
}

/// Access to the calling thread's message queue.
///
/// `peek` inspects without removing; `poll` removes. Neither blocks. `dispatch`
/// synchronously runs the target window's procedure and returns its result.
pub trait MessageQueue {
    fn peek(&mut self) -> Option<MessageRecord>;
    fn poll(&mut self) -> Option<MessageRecord>;
    fn translate(&mut self, message: &MessageRecord);
    fn dispatch(&mut self, message: &MessageRecord) -> isize;
}

/// The native windowing backend used by the startup sequence.
///
/// A backend owns the thread's message queue, so it is also a `MessageQueue`.
pub trait WindowingPlatform: MessageQueue {
    fn register_class(&mut self, descriptor: &WindowClassDescriptor) -> PlatformResult<ClassAtom>;
    fn create_window(&mut self, config: &WindowConfig) -> PlatformResult<WindowHandle>;
    fn show_window(&mut self, window: WindowHandle, command: ShowCommand);
}

/// Per-frame work performed in the event loop's idle branch. This is the seam
/// where a rendering subsystem plugs in; the loop calls the three steps in
/// order and only when no message is pending.
pub trait FrameRenderer {
    fn update(&mut self);
    fn render(&mut self);
    fn present(&mut self);
}
