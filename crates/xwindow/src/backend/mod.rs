//! Backend-agnostic window system trait
//!
//! This module defines the trait every platform backend implements. The
//! [`Window`](crate::Window) facade only ever talks to a `Box<dyn WindowBackend>`,
//! so platform types never leak into the public API or into callbacks.
//!
//! # Backends
//! - [`HeadlessBackend`]: in-memory window system without a display server,
//!   used by the tests and by tools that only need the facade's bookkeeping
//! - `GlfwBackend` (feature `glfw-backend`): real windows through GLFW

pub mod headless;

#[cfg(feature = "glfw-backend")]
pub mod glfw;

pub use headless::HeadlessBackend;

#[cfg(feature = "glfw-backend")]
pub use self::glfw::GlfwBackend;

use crate::events::BackendEvent;
use crate::input::{CursorMode, ErrorCode};
use crate::types::{Size, WindowId};
use thiserror::Error;

/// Errors raised by a backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The platform layer could not be initialized
    #[error("platform initialization failed: {0}")]
    InitializationFailed(String),

    /// A window could not be created
    #[error("window creation failed: {0}")]
    CreationFailed(String),

    /// The backend has not been initialized
    #[error("backend not initialized")]
    NotInitialized,

    /// The id does not name a live window of this backend
    #[error("unknown window: {0}")]
    UnknownWindow(WindowId),

    /// The backend cannot perform the operation
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// Error reported by the platform itself
    #[error("platform error ({code}): {description}")]
    Platform {
        /// Error class
        code: ErrorCode,
        /// Platform supplied description
        description: String,
    },
}

impl BackendError {
    /// Error code reported to the error callback for this failure
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotInitialized => ErrorCode::NotInitialized,
            Self::UnknownWindow(_) => ErrorCode::InvalidValue,
            Self::Unsupported(_) => ErrorCode::ApiUnavailable,
            Self::Platform { code, .. } => *code,
            Self::InitializationFailed(_) | Self::CreationFailed(_) => ErrorCode::PlatformError,
        }
    }
}

/// Result alias for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Whether a window covers a monitor or sits on the desktop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    /// Decorated window of the given client size
    Windowed(Size),
    /// Exclusive fullscreen at the given resolution
    Fullscreen {
        /// Resolution
        size: Size,
        /// Index into the connected monitors; out of range means the primary one
        monitor: usize,
    },
}

impl WindowMode {
    /// Requested size for either mode
    pub const fn size(&self) -> Size {
        match self {
            Self::Windowed(size) | Self::Fullscreen { size, .. } => *size,
        }
    }

    /// True for [`WindowMode::Fullscreen`]
    pub const fn is_fullscreen(&self) -> bool {
        matches!(self, Self::Fullscreen { .. })
    }

    /// Same mode with a different size
    #[must_use]
    pub const fn with_size(self, size: Size) -> Self {
        match self {
            Self::Windowed(_) => Self::Windowed(size),
            Self::Fullscreen { monitor, .. } => Self::Fullscreen { size, monitor },
        }
    }
}

/// Pick the fullscreen monitor from the connected ones, primary first
///
/// An index past the end falls back to the primary monitor with a warning.
/// Returns `None` only when no monitor is connected.
pub fn select_monitor<T>(monitors: &[T], index: usize) -> Option<&T> {
    monitors.get(index).or_else(|| {
        log::warn!(
            "Fullscreen monitor {} not connected ({} available), using the primary monitor",
            index,
            monitors.len()
        );
        monitors.first()
    })
}

/// Everything a backend needs to create a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDescriptor {
    /// Title bar text
    pub title: String,
    /// Initial mode and size
    pub mode: WindowMode,
    /// Whether the user may resize the window
    pub resizable: bool,
    /// Whether the window is shown right away
    pub visible: bool,
}

/// Trait for window system backends
///
/// Covers the platform lifecycle (`init`/`terminate`), window creation and
/// manipulation, and event collection. All methods take the [`WindowId`]
/// returned by `create_window`; an id the backend does not know yields
/// [`BackendError::UnknownWindow`].
///
/// # Thread Safety
/// Not `Send`: window systems generally require their calls on the main
/// thread, and the GLFW handle enforces that.
pub trait WindowBackend {
    /// Short backend name for logging
    fn name(&self) -> &'static str;

    /// Initialize the platform layer
    ///
    /// Must succeed before any window can be created.
    fn init(&mut self) -> BackendResult<()>;

    /// Release every window and the platform layer
    ///
    /// Safe to call when not initialized.
    fn terminate(&mut self);

    /// Whether `init` succeeded and `terminate` has not run since
    fn is_initialized(&self) -> bool;

    /// Create a window
    fn create_window(&mut self, descriptor: &WindowDescriptor) -> BackendResult<WindowId>;

    /// Destroy a window and drop its pending events
    fn destroy_window(&mut self, window: WindowId) -> BackendResult<()>;

    /// Resize the client area
    fn set_window_size(&mut self, window: WindowId, size: Size) -> BackendResult<()>;

    /// Change the title bar text
    fn set_window_title(&mut self, window: WindowId, title: &str) -> BackendResult<()>;

    /// Switch between windowed and fullscreen mode
    fn set_window_mode(&mut self, window: WindowId, mode: WindowMode) -> BackendResult<()>;

    /// Make the window visible
    fn show_window(&mut self, window: WindowId) -> BackendResult<()>;

    /// Hide the window
    fn hide_window(&mut self, window: WindowId) -> BackendResult<()>;

    /// Minimize (iconify) the window
    fn iconify_window(&mut self, window: WindowId) -> BackendResult<()>;

    /// Restore the window from the minimized state
    fn restore_window(&mut self, window: WindowId) -> BackendResult<()>;

    /// Whether the user or the application asked the window to close
    fn window_should_close(&self, window: WindowId) -> BackendResult<bool>;

    /// Set or clear the close request
    fn set_window_should_close(&mut self, window: WindowId, should_close: bool) -> BackendResult<()>;

    /// Change how the cursor behaves over the window
    fn set_cursor_mode(&mut self, window: WindowId, mode: CursorMode) -> BackendResult<()>;

    /// Move the cursor, relative to the client area
    fn set_cursor_pos(&mut self, window: WindowId, x: f64, y: f64) -> BackendResult<()>;

    /// Process pending platform events and return them in arrival order
    fn poll_events(&mut self) -> Vec<BackendEvent>;

    /// Seconds on the backend clock
    fn get_time(&self) -> f64;

    /// Reset the backend clock
    fn set_time(&mut self, time: f64);

    /// Access to the concrete type for downcasting
    fn as_any(&self) -> &dyn std::any::Any;

    /// Mutable access to the concrete type for downcasting
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
