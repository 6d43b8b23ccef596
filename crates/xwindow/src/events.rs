//! Backend-agnostic window system events
//!
//! Backends translate whatever their platform produces into these types, so
//! nothing platform specific reaches the facade or the callbacks.

use crate::input::{ConnectionState, ErrorCode, KeyAction, KeyModifiers, MouseButton};
use crate::types::{MonitorId, Unicode, WindowId};

/// Event concerning a single window
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    /// The user asked to close the window
    Close,
    /// The window moved; new top-left position
    Pos(i32, i32),
    /// The window contents need redrawing
    Refresh,
    /// The window was resized; new client area size
    Size(i32, i32),
    /// Input focus gained (`true`) or lost (`false`)
    Focus(bool),
    /// A key was pressed, released or repeated
    Key {
        /// Character the key types, or a [`keys`](crate::input::keys) value for named keys
        key: Unicode,
        /// Platform scancode
        scancode: i32,
        /// What happened to the key
        action: KeyAction,
        /// Modifiers held at the time
        mods: KeyModifiers,
    },
    /// A mouse button changed state
    MouseButton(MouseButton, KeyAction),
    /// The window was minimized (`true`) or restored (`false`)
    Minimize(bool),
    /// The cursor moved; position relative to the client area
    CursorPos(f64, f64),
    /// The cursor entered (`true`) or left (`false`) the client area
    CursorEnter(bool),
    /// Scroll offsets
    Scroll(f64, f64),
}

/// Everything a backend can report from `poll_events`
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// Event for one window
    Window(WindowId, WindowEvent),
    /// A monitor was connected or disconnected
    Monitor(MonitorId, ConnectionState),
    /// The platform reported an error
    Error(ErrorCode, String),
}

impl BackendEvent {
    /// Window the event targets, if any
    pub const fn window_id(&self) -> Option<WindowId> {
        match self {
            Self::Window(id, _) => Some(*id),
            Self::Monitor(..) | Self::Error(..) => None,
        }
    }
}
