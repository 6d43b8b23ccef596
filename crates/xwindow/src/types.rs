//! Plain value types shared by the facade and the backends

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decoded character code carried by key events
pub type Unicode = i32;

/// Width/height pair used for both the windowed size and the fullscreen resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in screen coordinates
    pub x: i32,
    /// Height in screen coordinates
    pub y: i32,
}

impl Size {
    /// Create a new size
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Both components are strictly positive
    pub const fn is_valid(&self) -> bool {
        self.x > 0 && self.y > 0
    }
}

impl From<(i32, i32)> for Size {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Size> for (i32, i32) {
    fn from(size: Size) -> Self {
        (size.x, size.y)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Opaque identifier of a platform window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub i32);

/// Opaque identifier of a physical display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonitorId(pub i32);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "monitor#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_validity() {
        assert!(Size::new(800, 600).is_valid());
        assert!(!Size::new(0, 600).is_valid());
        assert!(!Size::new(800, -1).is_valid());
        assert!(!Size::default().is_valid());
    }

    #[test]
    fn test_size_tuple_conversion() {
        let size: Size = (1920, 1080).into();
        assert_eq!(size, Size::new(1920, 1080));
        let (w, h): (i32, i32) = size.into();
        assert_eq!((w, h), (1920, 1080));
        assert_eq!(size.to_string(), "1920x1080");
    }
}
