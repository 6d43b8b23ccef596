//! # xwindow
//!
//! A window facade: one [`Window`] object with property accessors, a callback
//! slot per window system event, and an explicit lifecycle, on top of a
//! pluggable platform backend.
//!
//! ## Features
//!
//! - **Properties**: windowed size, fullscreen resolution, title, fullscreen state
//! - **Callback slots**: error, monitor, close, position, refresh, size, focus,
//!   key, mouse button, minimize, cursor position, cursor enter and scroll,
//!   each with a getter and a setter, or all at once through [`WindowListener`]
//! - **Lifecycle**: `init` → `load` → `destroy`, with a NeedsLoad hook
//! - **Backends**: [`HeadlessBackend`] everywhere, `GlfwBackend` with the
//!   `glfw-backend` feature
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use xwindow::prelude::*;
//!
//! fn main() -> Result<(), WindowError> {
//!     let mut window = Window::headless(WindowConfig::new("Demo"))?;
//!     window.set_key_fun(Some(Rc::new(|_, key, _, action, _| {
//!         log::info!("key {} {:?}", key, action);
//!     })));
//!
//!     window.init()?;
//!     window.load()?;
//!     window.run(|window, _delta| window.set_should_close(true))?;
//!     window.destroy();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod backend;
pub mod callbacks;
pub mod config;
pub mod events;
pub mod foundation;
pub mod input;
pub mod types;

mod window;

#[cfg(test)]
mod tests;

pub use backend::{BackendError, BackendResult, HeadlessBackend, WindowBackend, WindowDescriptor, WindowMode};
pub use callbacks::{Callbacks, WindowListener};
pub use config::{Config, ConfigError, WindowConfig};
pub use events::{BackendEvent, WindowEvent};
pub use input::{keys, ConnectionState, CursorMode, ErrorCode, KeyAction, KeyModifiers, MouseButton};
pub use types::{MonitorId, Size, Unicode, WindowId};
pub use window::{Window, WindowError, WindowResult};

#[cfg(feature = "glfw-backend")]
pub use backend::GlfwBackend;

/// Common imports for users of the facade
pub mod prelude {
    pub use crate::{
        callbacks::{
            CursorEnterFun, CursorPosFun, ErrorFun, Event, KeyFun, MonitorFun, MouseButtonFun, ScrollFun,
            WindowCloseFun, WindowFocusFun, WindowMinimizeFun, WindowPosFun, WindowRefreshFun, WindowSizeFun,
        },
        keys, Config, ConnectionState, CursorMode, ErrorCode, HeadlessBackend, KeyAction, KeyModifiers, MonitorId,
        MouseButton, Size, Unicode, Window, WindowBackend, WindowConfig, WindowError, WindowId, WindowListener,
        WindowResult,
    };

    #[cfg(feature = "glfw-backend")]
    pub use crate::GlfwBackend;
}
