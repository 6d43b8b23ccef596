//! Symbolic constants for errors, monitor connections and input

use bitflags::bitflags;
use std::fmt;

/// Error codes reported through the error callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No error has occurred
    NoError,
    /// The platform layer has not been initialized
    NotInitialized,
    /// No context is current on the calling thread
    NoCurrentContext,
    /// An enum argument was not recognised
    InvalidEnum,
    /// An argument had an invalid value
    InvalidValue,
    /// A memory allocation failed
    OutOfMemory,
    /// The requested client API is not available
    ApiUnavailable,
    /// The requested API version is not available
    VersionUnavailable,
    /// A platform-specific error occurred
    PlatformError,
    /// The requested pixel format is not available
    FormatUnavailable,
}

impl ErrorCode {
    /// Short human readable description
    pub const fn description(self) -> &'static str {
        match self {
            Self::NoError => "no error",
            Self::NotInitialized => "not initialized",
            Self::NoCurrentContext => "no current context",
            Self::InvalidEnum => "invalid enum",
            Self::InvalidValue => "invalid value",
            Self::OutOfMemory => "out of memory",
            Self::ApiUnavailable => "API unavailable",
            Self::VersionUnavailable => "version unavailable",
            Self::PlatformError => "platform error",
            Self::FormatUnavailable => "format unavailable",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Connection state of a monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// The monitor was connected
    Connected,
    /// The monitor was disconnected
    Disconnected,
}

/// Action on a key or mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Released
    Release,
    /// Pressed
    Press,
    /// Held down long enough to repeat
    Repeat,
}

bitflags! {
    /// Modifier keys held during a key event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        /// Either shift key
        const SHIFT = 1 << 0;
        /// Either control key
        const CONTROL = 1 << 1;
        /// Either alt key
        const ALT = 1 << 2;
        /// Either super (logo) key
        const SUPER = 1 << 3;
        /// Caps lock is on
        const CAPS_LOCK = 1 << 4;
    }
}

/// Key values for keys that do not produce a character
///
/// Key events carry a [`Unicode`] value. Printable keys report the character
/// they type; every other key reports one of these constants, which all lie
/// outside the Unicode range so they never collide with a real code point.
/// Named keys sit at [`keys::NON_CHARACTER_BASE`] plus their GLFW key number.
pub mod keys {
    use crate::types::Unicode;

    /// Largest valid Unicode scalar value
    pub const UNICODE_MAX: Unicode = 0x0010_FFFF;
    /// Start of the non-character key space
    pub const NON_CHARACTER_BASE: Unicode = UNICODE_MAX + 1;
    /// Key the platform could not identify
    pub const UNKNOWN: Unicode = -1;

    /// Escape
    pub const ESCAPE: Unicode = NON_CHARACTER_BASE + 256;
    /// Enter
    pub const ENTER: Unicode = NON_CHARACTER_BASE + 257;
    /// Tab
    pub const TAB: Unicode = NON_CHARACTER_BASE + 258;
    /// Backspace
    pub const BACKSPACE: Unicode = NON_CHARACTER_BASE + 259;
    /// Insert
    pub const INSERT: Unicode = NON_CHARACTER_BASE + 260;
    /// Delete
    pub const DELETE: Unicode = NON_CHARACTER_BASE + 261;
    /// Right arrow
    pub const RIGHT: Unicode = NON_CHARACTER_BASE + 262;
    /// Left arrow
    pub const LEFT: Unicode = NON_CHARACTER_BASE + 263;
    /// Down arrow
    pub const DOWN: Unicode = NON_CHARACTER_BASE + 264;
    /// Up arrow
    pub const UP: Unicode = NON_CHARACTER_BASE + 265;
    /// Page up
    pub const PAGE_UP: Unicode = NON_CHARACTER_BASE + 266;
    /// Page down
    pub const PAGE_DOWN: Unicode = NON_CHARACTER_BASE + 267;
    /// Home
    pub const HOME: Unicode = NON_CHARACTER_BASE + 268;
    /// End
    pub const END: Unicode = NON_CHARACTER_BASE + 269;
    /// F1
    pub const F1: Unicode = NON_CHARACTER_BASE + 290;
    /// F11
    pub const F11: Unicode = NON_CHARACTER_BASE + 300;
    /// F12
    pub const F12: Unicode = NON_CHARACTER_BASE + 301;
    /// Left shift
    pub const LEFT_SHIFT: Unicode = NON_CHARACTER_BASE + 340;
    /// Left control
    pub const LEFT_CONTROL: Unicode = NON_CHARACTER_BASE + 341;
    /// Left alt
    pub const LEFT_ALT: Unicode = NON_CHARACTER_BASE + 342;

    /// Value of a named key from its GLFW key number
    pub const fn named(code: i32) -> Unicode {
        NON_CHARACTER_BASE + code
    }

    /// Function key `F<n>`, for `n` in `1..=25`
    pub const fn function(n: i32) -> Unicode {
        F1 + n - 1
    }

    /// Whether the value is a character rather than a named key
    pub const fn is_character(key: Unicode) -> bool {
        key >= 0 && key <= UNICODE_MAX
    }

    /// The character a key value stands for, if it is one
    pub fn to_char(key: Unicode) -> Option<char> {
        if !is_character(key) {
            return None;
        }
        u32::try_from(key).ok().and_then(char::from_u32)
    }
}

/// Mouse buttons, numbered the way the platform numbers them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Button 1 (left)
    Button1 = 0,
    /// Button 2 (right)
    Button2,
    /// Button 3 (middle)
    Button3,
    /// Button 4
    Button4,
    /// Button 5
    Button5,
    /// Button 6
    Button6,
    /// Button 7
    Button7,
    /// Button 8
    Button8,
}

impl MouseButton {
    /// Left button
    pub const LEFT: Self = Self::Button1;
    /// Right button
    pub const RIGHT: Self = Self::Button2;
    /// Middle button
    pub const MIDDLE: Self = Self::Button3;

    /// Look up a button by its zero-based platform index
    pub const fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Self::Button1),
            1 => Some(Self::Button2),
            2 => Some(Self::Button3),
            3 => Some(Self::Button4),
            4 => Some(Self::Button5),
            5 => Some(Self::Button6),
            6 => Some(Self::Button7),
            7 => Some(Self::Button8),
            _ => None,
        }
    }

    /// Zero-based platform index
    pub const fn index(self) -> i32 {
        self as i32
    }
}

/// How the cursor behaves while over the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorMode {
    /// Visible and free to leave the window
    #[default]
    Normal,
    /// Invisible while over the window
    Hidden,
    /// Hidden and locked to the window
    Captured,
}
