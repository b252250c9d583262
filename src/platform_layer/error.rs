#[cfg(windows)]
use windows::core::Error as WinError;

// Represents errors that can occur within the platform abstraction layer.
//
// Both startup failures are fatal to the application; the startup sequence
// logs them and turns them into a failure exit status.
#[derive(Debug, Clone)]
pub enum PlatformError {
    /// An error originating from the Windows API.
    #[cfg(windows)]
    Win32(WinError),
    /// The platform layer itself could not be set up.
    InitializationFailed(String),
    /// The OS rejected the window-class configuration.
    ClassRegistrationFailed(String),
    /// The OS could not allocate a window for the registered class.
    WindowCreationFailed(String),
}

#[cfg(windows)]
impl From<WinError> for PlatformError {
    fn from(err: WinError) -> Self {
        PlatformError::Win32(err)
    }
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(windows)]
            PlatformError::Win32(e) => write!(f, "Win32 Error: {e}"),
            PlatformError::InitializationFailed(s) => write!(f, "Initialization Failed: {s}"),
            PlatformError::ClassRegistrationFailed(s) => {
                write!(f, "Window Class Registration Failed: {s}")
            }
            PlatformError::WindowCreationFailed(s) => write!(f, "Window Creation Failed: {s}"),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(windows)]
            PlatformError::Win32(e) => Some(e),
            _ => None,
        }
    }
}

/// A specialized `Result` type for platform layer operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
