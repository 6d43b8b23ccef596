//! Configuration system
//!
//! Window settings can be kept in TOML or RON files; the format is picked
//! from the file extension.

pub use serde::{Deserialize, Serialize};

use crate::types::Size;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is out of range
    #[error("Invalid value: {0}")]
    Invalid(String),
}

/// Initial properties of a [`Window`](crate::Window)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title bar text
    pub title: String,
    /// Client size in windowed mode
    pub windowed_size: Size,
    /// Resolution in fullscreen mode
    pub fullscreen_size: Size,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Index of the monitor used for fullscreen; 0 is the primary monitor
    pub fullscreen_monitor: usize,
    /// Whether the user may resize the window
    pub resizable: bool,
    /// Show the window as soon as it is loaded
    pub visible: bool,
    /// Minimum frame duration used by `Window::run`, in milliseconds
    pub frame_interval_ms: u64,
}

impl WindowConfig {
    /// Create a configuration with the given title and defaults otherwise
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the windowed size
    #[must_use]
    pub fn with_windowed_size(mut self, size: Size) -> Self {
        self.windowed_size = size;
        self
    }

    /// Set the fullscreen resolution
    #[must_use]
    pub fn with_fullscreen_size(mut self, size: Size) -> Self {
        self.fullscreen_size = size;
        self
    }

    /// Start in fullscreen mode
    #[must_use]
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Pick the fullscreen monitor by index
    #[must_use]
    pub fn with_fullscreen_monitor(mut self, monitor: usize) -> Self {
        self.fullscreen_monitor = monitor;
        self
    }

    /// Allow or forbid user resizing
    #[must_use]
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Show or hide the window on load
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set the frame pacing interval
    #[must_use]
    pub fn with_frame_interval_ms(mut self, interval: u64) -> Self {
        self.frame_interval_ms = interval;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.windowed_size.is_valid() {
            return Err(ConfigError::Invalid(format!("windowed size {} must be positive", self.windowed_size)));
        }
        if !self.fullscreen_size.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "fullscreen size {} must be positive",
                self.fullscreen_size
            )));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "xwindow".to_string(),
            windowed_size: Size::new(1280, 720),
            fullscreen_size: Size::new(1920, 1080),
            fullscreen: false,
            fullscreen_monitor: 0,
            resizable: true,
            visible: true,
            frame_interval_ms: 17,
        }
    }
}

impl Config for WindowConfig {}
