//! In-memory window system
//!
//! Keeps the state a real window system would keep and emits the events a
//! real one would emit for state changes (resizes, minimize/restore). Input
//! and monitor events are fed in with the `inject_*` helpers. There is no
//! display involved, so the backend works in CI and in unit tests.

use super::{select_monitor, BackendError, BackendResult, WindowBackend, WindowDescriptor, WindowMode};
use crate::events::{BackendEvent, WindowEvent};
use crate::input::{ConnectionState, CursorMode, ErrorCode};
use crate::types::{MonitorId, Size, WindowId};
use std::collections::{BTreeMap, VecDeque};

/// State of one headless window
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWindow {
    /// Title bar text
    pub title: String,
    /// Current mode and size
    pub mode: WindowMode,
    /// Monitor covered while fullscreen
    pub monitor: Option<MonitorId>,
    /// Whether the user may resize it
    pub resizable: bool,
    /// Shown or hidden
    pub visible: bool,
    /// Minimized
    pub iconified: bool,
    /// Close requested
    pub should_close: bool,
    /// Cursor behaviour
    pub cursor_mode: CursorMode,
    /// Last cursor position set through the backend
    pub cursor_pos: (f64, f64),
}

/// Window system that lives entirely in memory
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    initialized: bool,
    windows: BTreeMap<WindowId, HeadlessWindow>,
    next_window: i32,
    monitors: BTreeMap<MonitorId, String>,
    next_monitor: i32,
    queue: VecDeque<BackendEvent>,
    time: f64,
    fail_init: bool,
    fail_create: bool,
    init_calls: u32,
    terminate_calls: u32,
}

impl HeadlessBackend {
    /// Create an uninitialized backend with one connected monitor
    pub fn new() -> Self {
        let mut backend = Self {
            next_window: 1,
            ..Self::default()
        };
        backend.monitors.insert(MonitorId(0), "Headless-0".to_string());
        backend.next_monitor = 1;
        backend
    }

    /// Make every following `init` fail
    pub fn set_fail_init(&mut self, fail: bool) {
        self.fail_init = fail;
    }

    /// Make every following `create_window` fail
    pub fn set_fail_create(&mut self, fail: bool) {
        self.fail_create = fail;
    }

    /// Number of `init` calls so far, successful or not
    pub const fn init_calls(&self) -> u32 {
        self.init_calls
    }

    /// Number of `terminate` calls so far
    pub const fn terminate_calls(&self) -> u32 {
        self.terminate_calls
    }

    /// State of a live window
    pub fn window(&self, window: WindowId) -> Option<&HeadlessWindow> {
        self.windows.get(&window)
    }

    /// Number of live windows
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Number of events waiting for the next `poll_events`
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Queue an event for a window as if the platform produced it
    pub fn inject_event(&mut self, window: WindowId, event: WindowEvent) {
        self.queue.push_back(BackendEvent::Window(window, event));
    }

    /// Simulate the user clicking the close button
    pub fn request_close(&mut self, window: WindowId) -> BackendResult<()> {
        self.get_mut(window)?.should_close = true;
        self.queue.push_back(BackendEvent::Window(window, WindowEvent::Close));
        Ok(())
    }

    /// Queue a platform error
    pub fn inject_error(&mut self, code: ErrorCode, description: impl Into<String>) {
        self.queue.push_back(BackendEvent::Error(code, description.into()));
    }

    /// Plug in a monitor and queue the connection event
    pub fn connect_monitor(&mut self, name: impl Into<String>) -> MonitorId {
        let id = MonitorId(self.next_monitor);
        self.next_monitor += 1;
        self.monitors.insert(id, name.into());
        self.queue.push_back(BackendEvent::Monitor(id, ConnectionState::Connected));
        id
    }

    /// Unplug a monitor and queue the disconnection event
    ///
    /// Returns false if the monitor was not connected.
    pub fn disconnect_monitor(&mut self, monitor: MonitorId) -> bool {
        if self.monitors.remove(&monitor).is_none() {
            return false;
        }
        self.queue.push_back(BackendEvent::Monitor(monitor, ConnectionState::Disconnected));
        true
    }

    /// Connected monitors in id order
    pub fn monitors(&self) -> impl Iterator<Item = (MonitorId, &str)> {
        self.monitors.iter().map(|(id, name)| (*id, name.as_str()))
    }

    /// Move the backend clock forward
    pub fn advance_time(&mut self, seconds: f64) {
        self.time += seconds;
    }

    fn get_mut(&mut self, window: WindowId) -> BackendResult<&mut HeadlessWindow> {
        if !self.initialized {
            return Err(BackendError::NotInitialized);
        }
        self.windows.get_mut(&window).ok_or(BackendError::UnknownWindow(window))
    }

    fn get(&self, window: WindowId) -> BackendResult<&HeadlessWindow> {
        if !self.initialized {
            return Err(BackendError::NotInitialized);
        }
        self.windows.get(&window).ok_or(BackendError::UnknownWindow(window))
    }

    /// Monitor a fullscreen mode lands on, in id order
    fn fullscreen_monitor(&self, mode: WindowMode) -> Option<MonitorId> {
        match mode {
            WindowMode::Windowed(_) => None,
            WindowMode::Fullscreen { monitor, .. } => {
                let connected: Vec<MonitorId> = self.monitors.keys().copied().collect();
                select_monitor(&connected, monitor).copied()
            }
        }
    }

    fn resize(&mut self, window: WindowId, mode: WindowMode) -> BackendResult<()> {
        let monitor = self.fullscreen_monitor(mode);
        let state = self.get_mut(window)?;
        let old = state.mode.size();
        state.mode = mode;
        state.monitor = monitor;
        let new = mode.size();
        if old != new {
            self.queue.push_back(BackendEvent::Window(window, WindowEvent::Size(new.x, new.y)));
        }
        Ok(())
    }
}

impl WindowBackend for HeadlessBackend {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn init(&mut self) -> BackendResult<()> {
        self.init_calls += 1;
        if self.fail_init {
            return Err(BackendError::InitializationFailed("headless init disabled".to_string()));
        }
        self.initialized = true;
        Ok(())
    }

    fn terminate(&mut self) {
        self.terminate_calls += 1;
        self.initialized = false;
        self.windows.clear();
        self.queue.clear();
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn create_window(&mut self, descriptor: &WindowDescriptor) -> BackendResult<WindowId> {
        if !self.initialized {
            return Err(BackendError::NotInitialized);
        }
        if self.fail_create {
            return Err(BackendError::CreationFailed("headless creation disabled".to_string()));
        }
        if descriptor.mode.is_fullscreen() && self.monitors.is_empty() {
            return Err(BackendError::CreationFailed("no monitor for fullscreen".to_string()));
        }

        let monitor = self.fullscreen_monitor(descriptor.mode);
        let id = WindowId(self.next_window);
        self.next_window += 1;
        self.windows.insert(
            id,
            HeadlessWindow {
                title: descriptor.title.clone(),
                mode: descriptor.mode,
                monitor,
                resizable: descriptor.resizable,
                visible: descriptor.visible,
                iconified: false,
                should_close: false,
                cursor_mode: CursorMode::Normal,
                cursor_pos: (0.0, 0.0),
            },
        );
        log::debug!("headless: created {} ({})", id, descriptor.mode.size());
        Ok(id)
    }

    fn destroy_window(&mut self, window: WindowId) -> BackendResult<()> {
        self.get(window)?;
        self.windows.remove(&window);
        self.queue.retain(|event| event.window_id() != Some(window));
        Ok(())
    }

    fn set_window_size(&mut self, window: WindowId, size: Size) -> BackendResult<()> {
        let mode = self.get(window)?.mode.with_size(size);
        self.resize(window, mode)
    }

    fn set_window_title(&mut self, window: WindowId, title: &str) -> BackendResult<()> {
        self.get_mut(window)?.title = title.to_string();
        Ok(())
    }

    fn set_window_mode(&mut self, window: WindowId, mode: WindowMode) -> BackendResult<()> {
        if mode.is_fullscreen() && self.monitors.is_empty() {
            return Err(BackendError::Platform {
                code: ErrorCode::PlatformError,
                description: "no monitor for fullscreen".to_string(),
            });
        }
        self.resize(window, mode)
    }

    fn show_window(&mut self, window: WindowId) -> BackendResult<()> {
        self.get_mut(window)?.visible = true;
        Ok(())
    }

    fn hide_window(&mut self, window: WindowId) -> BackendResult<()> {
        self.get_mut(window)?.visible = false;
        Ok(())
    }

    fn iconify_window(&mut self, window: WindowId) -> BackendResult<()> {
        let state = self.get_mut(window)?;
        if !state.iconified {
            state.iconified = true;
            self.queue.push_back(BackendEvent::Window(window, WindowEvent::Minimize(true)));
        }
        Ok(())
    }

    fn restore_window(&mut self, window: WindowId) -> BackendResult<()> {
        let state = self.get_mut(window)?;
        if state.iconified {
            state.iconified = false;
            self.queue.push_back(BackendEvent::Window(window, WindowEvent::Minimize(false)));
        }
        Ok(())
    }

    fn window_should_close(&self, window: WindowId) -> BackendResult<bool> {
        Ok(self.get(window)?.should_close)
    }

    fn set_window_should_close(&mut self, window: WindowId, should_close: bool) -> BackendResult<()> {
        self.get_mut(window)?.should_close = should_close;
        Ok(())
    }

    fn set_cursor_mode(&mut self, window: WindowId, mode: CursorMode) -> BackendResult<()> {
        self.get_mut(window)?.cursor_mode = mode;
        Ok(())
    }

    fn set_cursor_pos(&mut self, window: WindowId, x: f64, y: f64) -> BackendResult<()> {
        self.get_mut(window)?.cursor_pos = (x, y);
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<BackendEvent> {
        self.queue.drain(..).collect()
    }

    fn get_time(&self) -> f64 {
        self.time
    }

    fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(mode: WindowMode) -> WindowDescriptor {
        WindowDescriptor {
            title: "test".to_string(),
            mode,
            resizable: true,
            visible: true,
        }
    }

    fn initialized() -> HeadlessBackend {
        let mut backend = HeadlessBackend::new();
        backend.init().unwrap();
        backend
    }

    #[test]
    fn test_create_requires_init() {
        let mut backend = HeadlessBackend::new();
        let result = backend.create_window(&descriptor(WindowMode::Windowed(Size::new(10, 10))));
        assert_eq!(result, Err(BackendError::NotInitialized));
    }

    #[test]
    fn test_window_ids_are_not_reused() {
        let mut backend = initialized();
        let desc = descriptor(WindowMode::Windowed(Size::new(10, 10)));
        let first = backend.create_window(&desc).unwrap();
        backend.destroy_window(first).unwrap();
        let second = backend.create_window(&desc).unwrap();
        assert_ne!(first, second);
        assert_eq!(backend.window_count(), 1);
    }

    #[test]
    fn test_resize_emits_size_event_once() {
        let mut backend = initialized();
        let id = backend
            .create_window(&descriptor(WindowMode::Windowed(Size::new(800, 600))))
            .unwrap();
        backend.set_window_size(id, Size::new(1024, 768)).unwrap();
        backend.set_window_size(id, Size::new(1024, 768)).unwrap();

        let events = backend.poll_events();
        assert_eq!(events, vec![BackendEvent::Window(id, WindowEvent::Size(1024, 768))]);
        assert!(backend.poll_events().is_empty());
    }

    #[test]
    fn test_iconify_restore_events() {
        let mut backend = initialized();
        let id = backend
            .create_window(&descriptor(WindowMode::Windowed(Size::new(800, 600))))
            .unwrap();
        backend.iconify_window(id).unwrap();
        backend.iconify_window(id).unwrap();
        backend.restore_window(id).unwrap();

        assert_eq!(
            backend.poll_events(),
            vec![
                BackendEvent::Window(id, WindowEvent::Minimize(true)),
                BackendEvent::Window(id, WindowEvent::Minimize(false)),
            ]
        );
    }

    #[test]
    fn test_destroy_drops_pending_events() {
        let mut backend = initialized();
        let id = backend
            .create_window(&descriptor(WindowMode::Windowed(Size::new(800, 600))))
            .unwrap();
        backend.inject_event(id, WindowEvent::Refresh);
        backend.inject_error(ErrorCode::PlatformError, "lost display");
        backend.destroy_window(id).unwrap();

        assert_eq!(
            backend.poll_events(),
            vec![BackendEvent::Error(ErrorCode::PlatformError, "lost display".to_string())]
        );
        assert_eq!(backend.destroy_window(id), Err(BackendError::UnknownWindow(id)));
    }

    #[test]
    fn test_fullscreen_needs_a_monitor() {
        let mut backend = initialized();
        assert!(backend.disconnect_monitor(MonitorId(0)));
        assert!(!backend.disconnect_monitor(MonitorId(0)));
        let result = backend.create_window(&descriptor(WindowMode::Fullscreen {
            size: Size::new(1920, 1080),
            monitor: 0,
        }));
        assert!(matches!(result, Err(BackendError::CreationFailed(_))));
    }

    #[test]
    fn test_fullscreen_monitor_by_index() {
        let mut backend = initialized();
        let side = backend.connect_monitor("Side");
        let fullscreen = |monitor| WindowMode::Fullscreen {
            size: Size::new(1920, 1080),
            monitor,
        };

        let id = backend.create_window(&descriptor(fullscreen(1))).unwrap();
        assert_eq!(backend.window(id).unwrap().monitor, Some(side));

        // out of range falls back to the primary monitor
        backend.set_window_mode(id, fullscreen(4)).unwrap();
        assert_eq!(backend.window(id).unwrap().monitor, Some(MonitorId(0)));

        backend
            .set_window_mode(id, WindowMode::Windowed(Size::new(800, 600)))
            .unwrap();
        assert_eq!(backend.window(id).unwrap().monitor, None);
    }

    #[test]
    fn test_monitor_events() {
        let mut backend = HeadlessBackend::new();
        let id = backend.connect_monitor("External");
        assert_eq!(backend.monitors().count(), 2);
        backend.disconnect_monitor(id);
        assert_eq!(
            backend.poll_events(),
            vec![
                BackendEvent::Monitor(id, ConnectionState::Connected),
                BackendEvent::Monitor(id, ConnectionState::Disconnected),
            ]
        );
    }

    #[test]
    fn test_terminate_clears_windows() {
        let mut backend = initialized();
        backend
            .create_window(&descriptor(WindowMode::Windowed(Size::new(800, 600))))
            .unwrap();
        backend.terminate();
        assert!(!backend.is_initialized());
        assert_eq!(backend.window_count(), 0);
        assert_eq!(backend.terminate_calls(), 1);
    }
}
