//! The window facade
//!
//! [`Window`] is the single object applications talk to. It stores the
//! window's properties (sizes, title, fullscreen state), owns the callback
//! slots, drives the lifecycle (`init` → `load` → `destroy`) and forwards
//! everything platform related to a [`WindowBackend`].
//!
//! Property setters work before the platform window exists; the stored
//! values are used when `load` creates it. Once loaded, setters apply to the
//! platform window immediately:
//!
//! - the windowed size only reaches the platform while in windowed mode
//! - the fullscreen resolution only reaches the platform while fullscreen
//! - switching fullscreen on a loaded window changes its mode in place
//!
//! # Error policy
//! Every failing operation logs the error, passes its [`ErrorCode`] to the
//! error callback and returns it as `Err`. Errors reported asynchronously by
//! the platform reach the error callback during [`Window::poll_events`].

use crate::backend::{BackendError, HeadlessBackend, WindowBackend, WindowDescriptor, WindowMode};
use crate::callbacks::{
    Callbacks, CursorEnterFun, CursorPosFun, ErrorFun, Event, KeyFun, MonitorFun, MouseButtonFun, ScrollFun,
    WindowCloseFun, WindowFocusFun, WindowListener, WindowMinimizeFun, WindowPosFun, WindowRefreshFun,
    WindowSizeFun,
};
use crate::config::{Config, ConfigError, WindowConfig};
use crate::events::{BackendEvent, WindowEvent};
use crate::foundation::time::FramePacer;
use crate::input::{CursorMode, ErrorCode};
use crate::types::{Size, WindowId};
use std::rc::Rc;
use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The backend could not be initialized
    #[error("window system initialization failed: {0}")]
    InitializationFailed(#[source] BackendError),

    /// The platform window could not be created
    #[error("window creation failed: {0}")]
    CreationFailed(#[source] BackendError),

    /// `init` has not run
    #[error("window system not initialized")]
    NotInitialized,

    /// `load` has not run, so there is no platform window
    #[error("window not loaded")]
    NotLoaded,

    /// Sizes must be strictly positive
    #[error("invalid window size {0}")]
    InvalidSize(Size),

    /// Any other backend failure
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// Bad or unreadable configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl WindowError {
    /// Code passed to the error callback for this error
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InitializationFailed(e) | Self::CreationFailed(e) | Self::Backend(e) => e.code(),
            Self::NotInitialized | Self::NotLoaded => ErrorCode::NotInitialized,
            Self::InvalidSize(_) | Self::Config(_) => ErrorCode::InvalidValue,
        }
    }
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;

macro_rules! callback_accessors {
    ($($ty:ident => $get:ident, $set:ident;)*) => {
        $(
            #[doc = concat!("Currently installed [`", stringify!($ty), "`]")]
            pub fn $get(&self) -> Option<$ty> {
                self.callbacks.$get()
            }

            #[doc = concat!("Install or clear the [`", stringify!($ty), "`], returning the previous one")]
            pub fn $set(&mut self, fun: Option<$ty>) -> Option<$ty> {
                self.callbacks.$set(fun)
            }
        )*
    };
}

/// A platform window with its properties, lifecycle and callback slots
pub struct Window {
    backend: Box<dyn WindowBackend>,
    callbacks: Callbacks,
    needs_load: Option<Event>,

    windowed_size: Size,
    fullscreen_size: Size,
    title: String,
    fullscreen: bool,
    fullscreen_monitor: usize,
    resizable: bool,
    start_visible: bool,
    frame_interval_ms: u64,

    handle: Option<WindowId>,
    initialized: bool,
    loaded: bool,
    visible: bool,
    minimized: bool,
    focused: bool,
    cursor_mode: CursorMode,
}

impl Window {
    /// Create a window facade; no platform resources are touched yet
    pub fn new(config: WindowConfig, backend: impl WindowBackend + 'static) -> WindowResult<Self> {
        if let Err(e) = config.validate() {
            log::error!("Rejected window configuration: {}", e);
            return Err(e.into());
        }

        Ok(Self {
            backend: Box::new(backend),
            callbacks: Callbacks::new(),
            needs_load: None,
            windowed_size: config.windowed_size,
            fullscreen_size: config.fullscreen_size,
            title: config.title,
            fullscreen: config.fullscreen,
            fullscreen_monitor: config.fullscreen_monitor,
            resizable: config.resizable,
            start_visible: config.visible,
            frame_interval_ms: config.frame_interval_ms,
            handle: None,
            initialized: false,
            loaded: false,
            visible: false,
            minimized: false,
            focused: false,
            cursor_mode: CursorMode::Normal,
        })
    }

    /// Create a window facade on a fresh [`HeadlessBackend`]
    pub fn headless(config: WindowConfig) -> WindowResult<Self> {
        Self::new(config, HeadlessBackend::new())
    }

    /// Create a window facade from a TOML or RON configuration file
    pub fn from_config_file(path: &str, backend: impl WindowBackend + 'static) -> WindowResult<Self> {
        let config = WindowConfig::load_from_file(path)?;
        Self::new(config, backend)
    }

    // ---------------------------------------------------------------------
    // Properties
    // ---------------------------------------------------------------------

    /// Size of the window in windowed mode
    pub const fn get_windowed_size(&self) -> Size {
        self.windowed_size
    }

    /// Set the size of the window in windowed mode
    ///
    /// Applied to the platform window right away if it is loaded and windowed.
    pub fn set_windowed_size(&mut self, size: Size) -> WindowResult<()> {
        if !size.is_valid() {
            return self.fail(WindowError::InvalidSize(size));
        }
        self.windowed_size = size;
        if let (Some(id), false) = (self.handle, self.fullscreen) {
            let result = self.backend.set_window_size(id, size);
            self.check(result)?;
        }
        Ok(())
    }

    /// Resolution in fullscreen mode
    pub const fn get_fullscreen_size(&self) -> Size {
        self.fullscreen_size
    }

    /// Set the resolution in fullscreen mode
    ///
    /// Applied to the platform window right away if it is loaded and fullscreen.
    pub fn set_fullscreen_size(&mut self, size: Size) -> WindowResult<()> {
        if !size.is_valid() {
            return self.fail(WindowError::InvalidSize(size));
        }
        self.fullscreen_size = size;
        if let (Some(id), true) = (self.handle, self.fullscreen) {
            let result = self.backend.set_window_size(id, size);
            self.check(result)?;
        }
        Ok(())
    }

    /// Title bar text
    pub fn get_title(&self) -> &str {
        &self.title
    }

    /// Set the title bar text
    pub fn set_title(&mut self, title: impl Into<String>) -> WindowResult<()> {
        self.title = title.into();
        if let Some(id) = self.handle {
            let result = self.backend.set_window_title(id, &self.title);
            self.check(result)?;
        }
        Ok(())
    }

    /// Whether the window is in fullscreen mode
    pub const fn get_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Switch between windowed and fullscreen mode
    ///
    /// On a loaded window the platform mode changes in place; if the backend
    /// refuses, the previous mode is kept. Events still pending from the old
    /// mode are processed first, so their sizes land in the old mode's size.
    pub fn set_fullscreen(&mut self, fullscreen: bool) -> WindowResult<()> {
        if self.fullscreen == fullscreen {
            return Ok(());
        }
        if self.handle.is_some() {
            self.poll_events();
        }
        self.fullscreen = fullscreen;
        if let Some(id) = self.handle {
            let mode = self.current_mode();
            if let Err(e) = self.backend.set_window_mode(id, mode) {
                self.fullscreen = !fullscreen;
                return self.fail(e.into());
            }
            log::info!("{} switched to {}", id, if fullscreen { "fullscreen" } else { "windowed" });
        }
        Ok(())
    }

    /// Index of the monitor used for fullscreen
    pub const fn get_fullscreen_monitor(&self) -> usize {
        self.fullscreen_monitor
    }

    /// Choose the fullscreen monitor by index; 0 is the primary monitor
    ///
    /// A loaded fullscreen window moves to the new monitor right away. An index
    /// past the connected monitors falls back to the primary one.
    pub fn set_fullscreen_monitor(&mut self, monitor: usize) -> WindowResult<()> {
        self.fullscreen_monitor = monitor;
        if let (Some(id), true) = (self.handle, self.fullscreen) {
            let mode = self.current_mode();
            let result = self.backend.set_window_mode(id, mode);
            self.check(result)?;
        }
        Ok(())
    }

    /// Toggle between windowed and fullscreen mode
    pub fn toggle_fullscreen(&mut self) -> WindowResult<()> {
        self.set_fullscreen(!self.fullscreen)
    }

    // ---------------------------------------------------------------------
    // Callback slots
    // ---------------------------------------------------------------------

    callback_accessors! {
        ErrorFun => get_error_fun, set_error_fun;
        MonitorFun => get_monitor_fun, set_monitor_fun;
        WindowCloseFun => get_window_close_fun, set_window_close_fun;
        WindowPosFun => get_window_pos_fun, set_window_pos_fun;
        WindowRefreshFun => get_window_refresh_fun, set_window_refresh_fun;
        WindowSizeFun => get_window_size_fun, set_window_size_fun;
        WindowFocusFun => get_window_focus_fun, set_window_focus_fun;
        KeyFun => get_key_fun, set_key_fun;
        MouseButtonFun => get_mouse_button_fun, set_mouse_button_fun;
        WindowMinimizeFun => get_window_minimize_fun, set_window_minimize_fun;
        CursorPosFun => get_cursor_pos_fun, set_cursor_pos_fun;
        CursorEnterFun => get_cursor_enter_fun, set_cursor_enter_fun;
        ScrollFun => get_scroll_fun, set_scroll_fun;
    }

    /// Install every callback slot from one listener
    pub fn subscribe<L: WindowListener + 'static>(&mut self, listener: Rc<L>) {
        self.callbacks.subscribe(listener);
    }

    /// All callback slots
    pub const fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    /// All callback slots, mutably
    pub fn callbacks_mut(&mut self) -> &mut Callbacks {
        &mut self.callbacks
    }

    // ---------------------------------------------------------------------
    // Visibility
    // ---------------------------------------------------------------------

    /// Show the window
    pub fn show(&mut self) -> WindowResult<()> {
        let id = self.require_handle()?;
        let result = self.backend.show_window(id);
        self.check(result)?;
        self.visible = true;
        Ok(())
    }

    /// Hide the window
    pub fn hide(&mut self) -> WindowResult<()> {
        let id = self.require_handle()?;
        let result = self.backend.hide_window(id);
        self.check(result)?;
        self.visible = false;
        Ok(())
    }

    /// Minimize the window
    pub fn minimize(&mut self) -> WindowResult<()> {
        let id = self.require_handle()?;
        let result = self.backend.iconify_window(id);
        self.check(result)?;
        self.minimized = true;
        Ok(())
    }

    /// Restore the window if it is minimized
    pub fn restore(&mut self) -> WindowResult<()> {
        let id = self.require_handle()?;
        let result = self.backend.restore_window(id);
        self.check(result)?;
        self.minimized = false;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Initialize the window system
    ///
    /// On failure the backend is terminated again. A second call on an
    /// initialized window does nothing. Fires the NeedsLoad event on success.
    pub fn init(&mut self) -> WindowResult<()> {
        if self.initialized {
            log::warn!("Window system already initialized");
            return Ok(());
        }
        if let Err(e) = self.backend.init() {
            self.backend.terminate();
            return self.fail(WindowError::InitializationFailed(e));
        }
        self.initialized = true;
        log::info!("Initialized {} window system", self.backend.name());
        self.request_load();
        Ok(())
    }

    /// Create the platform window from the stored properties
    ///
    /// Loading a loaded window recreates it. If creation fails the whole
    /// window system is torn down with [`Window::destroy`].
    pub fn load(&mut self) -> WindowResult<()> {
        if !self.initialized {
            return self.fail(WindowError::NotInitialized);
        }
        if let Some(old) = self.handle.take() {
            log::debug!("Recreating {}", old);
            if let Err(e) = self.backend.destroy_window(old) {
                log::warn!("Failed to destroy {} before reload: {}", old, e);
            }
            self.loaded = false;
        }

        let descriptor = WindowDescriptor {
            title: self.title.clone(),
            mode: self.current_mode(),
            resizable: self.resizable,
            visible: self.start_visible,
        };
        match self.backend.create_window(&descriptor) {
            Ok(id) => {
                self.handle = Some(id);
                self.loaded = true;
                self.visible = descriptor.visible;
                self.minimized = false;
                self.cursor_mode = CursorMode::Normal;
                self.backend.set_time(0.0);
                log::info!("Loaded {} '{}' ({})", id, self.title, descriptor.mode.size());
                Ok(())
            }
            Err(e) => {
                self.destroy();
                self.fail(WindowError::CreationFailed(e))
            }
        }
    }

    /// Close the platform window and shut the window system down
    ///
    /// Properties and callbacks survive, so `init` + `load` bring the window back.
    pub fn destroy(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Err(e) = self.backend.destroy_window(id) {
                log::warn!("Failed to destroy {}: {}", id, e);
            }
        }
        if self.initialized || self.backend.is_initialized() {
            self.backend.terminate();
            log::info!("Terminated {} window system", self.backend.name());
        }
        self.initialized = false;
        self.loaded = false;
        self.visible = false;
        self.minimized = false;
        self.focused = false;
    }

    /// Whether the window is loaded
    pub const fn get_loaded(&self) -> bool {
        self.loaded
    }

    /// Override the loaded flag
    ///
    /// Only the flag changes; the platform window is left alone.
    pub fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
    }

    /// Install the NeedsLoad event, returning the previous one
    pub fn set_needs_load(&mut self, event: Option<Event>) -> Option<Event> {
        std::mem::replace(&mut self.needs_load, event)
    }

    /// Currently installed NeedsLoad event
    pub fn get_needs_load(&self) -> Option<Event> {
        self.needs_load.clone()
    }

    /// Fire the NeedsLoad event; returns whether one was installed
    pub fn request_load(&self) -> bool {
        self.needs_load.as_ref().map(|event| event()).is_some()
    }

    // ---------------------------------------------------------------------
    // Event loop
    // ---------------------------------------------------------------------

    /// Whether the platform window was asked to close
    ///
    /// False while no platform window exists.
    pub fn should_close(&self) -> bool {
        self.handle.is_some_and(|id| match self.backend.window_should_close(id) {
            Ok(should_close) => should_close,
            Err(e) => {
                log::warn!("Could not query close state of {}: {}", id, e);
                false
            }
        })
    }

    /// Set or clear the close request
    pub fn set_should_close(&mut self, should_close: bool) -> WindowResult<()> {
        let id = self.require_handle()?;
        let result = self.backend.set_window_should_close(id, should_close);
        self.check(result)
    }

    /// Process pending platform events and invoke the callbacks
    ///
    /// Returns the number of events handled. Events for windows other than
    /// this one are skipped.
    pub fn poll_events(&mut self) -> usize {
        let events = self.backend.poll_events();
        let mut handled = 0;
        for event in events {
            match event {
                BackendEvent::Error(code, description) => {
                    log::error!("{} error ({}): {}", self.backend.name(), code, description);
                    self.callbacks.report_error(code);
                }
                BackendEvent::Monitor(monitor, state) => {
                    log::info!("{} {:?}", monitor, state);
                    self.callbacks.report_monitor(monitor, state);
                }
                BackendEvent::Window(id, event) => {
                    if self.handle != Some(id) {
                        log::trace!("Skipping event for foreign {}: {:?}", id, event);
                        continue;
                    }
                    self.mirror(id, &event);
                    self.callbacks.dispatch(id, &event);
                }
            }
            handled += 1;
        }
        handled
    }

    /// Seconds since the previous call (or since `load`), resetting the clock
    pub fn get_delta_time(&mut self) -> f64 {
        let delta = self.backend.get_time();
        self.backend.set_time(0.0);
        delta
    }

    /// Run a frame loop until the window is asked to close
    ///
    /// Each iteration polls events, measures the delta time, calls `frame`
    /// and sleeps out the rest of the configured frame interval. An error
    /// from `frame` ends the loop and is returned.
    pub fn run<F>(&mut self, mut frame: F) -> WindowResult<()>
    where
        F: FnMut(&mut Self, f64) -> WindowResult<()>,
    {
        self.require_handle()?;
        let mut pacer = FramePacer::from_millis(self.frame_interval_ms);
        log::info!("Entering frame loop");

        while !self.should_close() {
            pacer.begin_frame();
            self.poll_events();
            let delta = self.get_delta_time();
            frame(self, delta)?;
            pacer.wait();
        }

        log::info!("Frame loop finished after {} frames", pacer.frame_count());
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Cursor
    // ---------------------------------------------------------------------

    /// Hide the cursor and lock it to the window
    pub fn capture_mouse(&mut self) -> WindowResult<()> {
        self.set_cursor_mode(CursorMode::Captured)
    }

    /// Give the cursor back
    pub fn release_mouse(&mut self) -> WindowResult<()> {
        self.set_cursor_mode(CursorMode::Normal)
    }

    /// Whether the cursor is captured
    pub fn is_mouse_captured(&self) -> bool {
        self.cursor_mode == CursorMode::Captured
    }

    /// Move the cursor, relative to the client area
    pub fn set_mouse_position(&mut self, x: f64, y: f64) -> WindowResult<()> {
        let id = self.require_handle()?;
        let result = self.backend.set_cursor_pos(id, x, y);
        self.check(result)
    }

    /// Change how the cursor behaves over the window
    pub fn set_cursor_mode(&mut self, mode: CursorMode) -> WindowResult<()> {
        let id = self.require_handle()?;
        let result = self.backend.set_cursor_mode(id, mode);
        self.check(result)?;
        self.cursor_mode = mode;
        Ok(())
    }

    /// Current cursor behaviour
    pub const fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    // ---------------------------------------------------------------------
    // State
    // ---------------------------------------------------------------------

    /// Id of the platform window while loaded
    pub const fn window_id(&self) -> Option<WindowId> {
        self.handle
    }

    /// Whether `init` succeeded and `destroy` has not run since
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the platform window is shown
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the platform window is minimized
    pub const fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Whether the platform window has input focus
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// The backend in use
    pub fn backend(&self) -> &dyn WindowBackend {
        self.backend.as_ref()
    }

    /// Downcast the backend to its concrete type
    pub fn backend_as<T: WindowBackend + 'static>(&self) -> Option<&T> {
        self.backend.as_any().downcast_ref::<T>()
    }

    /// Downcast the backend to its concrete type, mutably
    pub fn backend_as_mut<T: WindowBackend + 'static>(&mut self) -> Option<&mut T> {
        self.backend.as_any_mut().downcast_mut::<T>()
    }

    fn current_mode(&self) -> WindowMode {
        if self.fullscreen {
            WindowMode::Fullscreen {
                size: self.fullscreen_size,
                monitor: self.fullscreen_monitor,
            }
        } else {
            WindowMode::Windowed(self.windowed_size)
        }
    }

    fn require_handle(&self) -> WindowResult<WindowId> {
        if !self.initialized {
            return self.fail(WindowError::NotInitialized);
        }
        match self.handle {
            Some(id) => Ok(id),
            None => self.fail(WindowError::NotLoaded),
        }
    }

    fn check<T>(&self, result: Result<T, BackendError>) -> WindowResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(e) => self.fail(e.into()),
        }
    }

    fn fail<T>(&self, error: WindowError) -> WindowResult<T> {
        log::error!("{}", error);
        self.callbacks.report_error(error.code());
        Err(error)
    }

    /// Keep the stored state in line with what the platform reports
    ///
    /// Size events go to the size of the current mode. `set_fullscreen`
    /// drains the queue before switching, so events from the old mode never
    /// reach the new mode's size.
    fn mirror(&mut self, id: WindowId, event: &WindowEvent) {
        match *event {
            WindowEvent::Size(width, height) => {
                let size = Size::new(width, height);
                // minimized windows report 0x0 on some platforms
                if size.is_valid() {
                    if self.fullscreen {
                        self.fullscreen_size = size;
                    } else {
                        self.windowed_size = size;
                    }
                }
            }
            WindowEvent::Minimize(minimized) => self.minimized = minimized,
            WindowEvent::Focus(focused) => self.focused = focused,
            WindowEvent::Close => {
                if let Err(e) = self.backend.set_window_should_close(id, true) {
                    log::warn!("Could not flag {} for closing: {}", id, e);
                }
            }
            _ => {}
        }
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if self.initialized || self.handle.is_some() {
            self.destroy();
        }
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("backend", &self.backend.name())
            .field("title", &self.title)
            .field("windowed_size", &self.windowed_size)
            .field("fullscreen_size", &self.fullscreen_size)
            .field("fullscreen", &self.fullscreen)
            .field("handle", &self.handle)
            .field("initialized", &self.initialized)
            .field("loaded", &self.loaded)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn config() -> WindowConfig {
        WindowConfig::new("Test")
            .with_windowed_size(Size::new(800, 600))
            .with_fullscreen_size(Size::new(1920, 1080))
    }

    fn error_log(window: &mut Window) -> Rc<RefCell<Vec<ErrorCode>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        window.set_error_fun(Some(Rc::new(move |code| sink.borrow_mut().push(code))));
        log
    }

    fn loaded() -> Window {
        let mut window = Window::headless(config()).unwrap();
        window.init().unwrap();
        window.load().unwrap();
        window
    }

    fn platform_size(window: &Window) -> Size {
        let id = window.window_id().unwrap();
        window
            .backend_as::<HeadlessBackend>()
            .unwrap()
            .window(id)
            .unwrap()
            .mode
            .size()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = Window::headless(config().with_windowed_size(Size::new(-1, 10)));
        assert!(matches!(result, Err(WindowError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn test_properties_before_load() {
        let mut window = Window::headless(config()).unwrap();
        window.set_windowed_size(Size::new(640, 480)).unwrap();
        window.set_fullscreen_size(Size::new(1280, 1024)).unwrap();
        window.set_title("Renamed").unwrap();
        window.set_fullscreen(true).unwrap();

        assert_eq!(window.get_windowed_size(), Size::new(640, 480));
        assert_eq!(window.get_fullscreen_size(), Size::new(1280, 1024));
        assert_eq!(window.get_title(), "Renamed");
        assert!(window.get_fullscreen());
        assert!(!window.get_loaded());
    }

    #[test]
    fn test_invalid_size_is_reported() {
        let mut window = Window::headless(config()).unwrap();
        let errors = error_log(&mut window);

        let result = window.set_windowed_size(Size::new(0, 0));
        assert!(matches!(result, Err(WindowError::InvalidSize(_))));
        let result = window.set_fullscreen_size(Size::new(100, -100));
        assert!(matches!(result, Err(WindowError::InvalidSize(_))));

        assert_eq!(window.get_windowed_size(), Size::new(800, 600));
        assert_eq!(errors.borrow().as_slice(), &[ErrorCode::InvalidValue, ErrorCode::InvalidValue]);
    }

    #[test]
    fn test_windowed_size_applies_only_in_windowed_mode() {
        let mut window = loaded();
        window.set_windowed_size(Size::new(1024, 768)).unwrap();
        assert_eq!(platform_size(&window), Size::new(1024, 768));

        window.set_fullscreen(true).unwrap();
        assert_eq!(platform_size(&window), Size::new(1920, 1080));

        window.set_windowed_size(Size::new(300, 200)).unwrap();
        assert_eq!(platform_size(&window), Size::new(1920, 1080));
        assert_eq!(window.get_windowed_size(), Size::new(300, 200));
    }

    #[test]
    fn test_fullscreen_size_applies_only_in_fullscreen_mode() {
        let mut window = loaded();
        window.set_fullscreen_size(Size::new(2560, 1440)).unwrap();
        assert_eq!(platform_size(&window), Size::new(800, 600));

        window.toggle_fullscreen().unwrap();
        assert_eq!(platform_size(&window), Size::new(2560, 1440));
        window.set_fullscreen_size(Size::new(1600, 900)).unwrap();
        assert_eq!(platform_size(&window), Size::new(1600, 900));
    }

    #[test]
    fn test_toggle_twice_restores_mode() {
        let mut window = loaded();
        let id = window.window_id().unwrap();
        window.toggle_fullscreen().unwrap();
        window.toggle_fullscreen().unwrap();

        assert!(!window.get_fullscreen());
        let state = window.backend_as::<HeadlessBackend>().unwrap().window(id).unwrap();
        assert_eq!(state.mode, WindowMode::Windowed(Size::new(800, 600)));
    }

    #[test]
    fn test_failed_mode_switch_keeps_previous_mode() {
        let mut window = loaded();
        let errors = error_log(&mut window);
        window
            .backend_as_mut::<HeadlessBackend>()
            .unwrap()
            .disconnect_monitor(crate::types::MonitorId(0));

        assert!(window.set_fullscreen(true).is_err());
        assert!(!window.get_fullscreen());
        assert_eq!(errors.borrow().as_slice(), &[ErrorCode::PlatformError]);
    }

    #[test]
    fn test_title_reaches_platform_window() {
        let mut window = loaded();
        let id = window.window_id().unwrap();
        window.set_title("Freezing Archer").unwrap();
        let state = window.backend_as::<HeadlessBackend>().unwrap().window(id).unwrap();
        assert_eq!(state.title, "Freezing Archer");
    }

    #[test]
    fn test_visibility_operations() {
        let mut window = loaded();
        let id = window.window_id().unwrap();

        window.hide().unwrap();
        assert!(!window.is_visible());
        window.show().unwrap();
        assert!(window.is_visible());

        window.minimize().unwrap();
        assert!(window.is_minimized());
        assert!(window.backend_as::<HeadlessBackend>().unwrap().window(id).unwrap().iconified);
        window.restore().unwrap();
        assert!(!window.is_minimized());
    }

    #[test]
    fn test_visibility_requires_loaded_window() {
        let mut window = Window::headless(config()).unwrap();
        let errors = error_log(&mut window);

        assert!(matches!(window.show(), Err(WindowError::NotInitialized)));
        window.init().unwrap();
        assert!(matches!(window.minimize(), Err(WindowError::NotLoaded)));
        assert_eq!(errors.borrow().as_slice(), &[ErrorCode::NotInitialized, ErrorCode::NotInitialized]);
    }

    #[test]
    fn test_cursor_capture() {
        let mut window = loaded();
        let id = window.window_id().unwrap();

        window.capture_mouse().unwrap();
        assert!(window.is_mouse_captured());
        window.set_mouse_position(12.5, 40.0).unwrap();

        let state = window.backend_as::<HeadlessBackend>().unwrap().window(id).unwrap().clone();
        assert_eq!(state.cursor_mode, CursorMode::Captured);
        assert_eq!(state.cursor_pos, (12.5, 40.0));

        window.release_mouse().unwrap();
        assert!(!window.is_mouse_captured());
    }

    #[test]
    fn test_delta_time_resets_clock() {
        let mut window = loaded();
        window.backend_as_mut::<HeadlessBackend>().unwrap().advance_time(0.25);
        approx::assert_relative_eq!(window.get_delta_time(), 0.25);
        approx::assert_relative_eq!(window.get_delta_time(), 0.0);
    }
}
