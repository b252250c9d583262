/*
 * The platform layer: the boundary between the application logic and the
 * native windowing API. `types` and `error` are platform-agnostic and shared
 * with the application logic and its tests. `app` and `window_common` hold the
 * Win32 backend and are compiled only on Windows.
 */
#[cfg(windows)]
pub mod app;
pub mod error;
pub mod types;
#[cfg(windows)]
pub(crate) mod window_common;

#[cfg(windows)]
pub use app::Win32Platform;
pub use error::{PlatformError, Result as PlatformResult};
pub use types::{
    BackgroundBrush, ClassAtom, CursorSource, DefaultMessageHandler, FrameRenderer, IconSource,
    LaunchContext, MessageCode, MessageQueue, MessageRecord, QuitSignal, ShowCommand,
    WindowClassDescriptor, WindowConfig, WindowHandle, WindowPosition, WindowProcedure,
    WindowStyle, WindowingPlatform,
};
