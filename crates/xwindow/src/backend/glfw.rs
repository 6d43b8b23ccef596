//! GLFW-based window system
//!
//! Wraps the `glfw` crate behind [`WindowBackend`]. Windows are created with
//! every event kind polled; the queued GLFW events are translated into
//! [`BackendEvent`]s on `poll_events`. GLFW errors are captured by the error
//! callback installed at init and surface as [`BackendEvent::Error`].
//!
//! Monitor hot-plug is detected by comparing the connected monitor names on
//! each poll, so monitor ids stay stable for as long as a monitor is plugged in.
//! Identical panels share a name, so names are matched one occurrence at a time.

use super::{select_monitor, BackendError, BackendResult, WindowBackend, WindowDescriptor, WindowMode};
use crate::events::{BackendEvent, WindowEvent};
use crate::input::{keys, ConnectionState, CursorMode, ErrorCode, KeyAction, KeyModifiers, MouseButton};
use crate::types::{MonitorId, Size, Unicode, WindowId};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

struct GlfwWindow {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

/// Window system backed by GLFW
pub struct GlfwBackend {
    glfw: Option<glfw::Glfw>,
    windows: BTreeMap<WindowId, GlfwWindow>,
    next_window: i32,
    monitors: Vec<(MonitorId, String)>,
    next_monitor: i32,
    errors: Rc<RefCell<Vec<(ErrorCode, String)>>>,
}

impl GlfwBackend {
    /// Create an uninitialized backend
    pub fn new() -> Self {
        Self {
            glfw: None,
            windows: BTreeMap::new(),
            next_window: 1,
            monitors: Vec::new(),
            next_monitor: 0,
            errors: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn glfw_mut(&mut self) -> BackendResult<&mut glfw::Glfw> {
        self.glfw.as_mut().ok_or(BackendError::NotInitialized)
    }

    fn window_mut(&mut self, window: WindowId) -> BackendResult<&mut glfw::PWindow> {
        if self.glfw.is_none() {
            return Err(BackendError::NotInitialized);
        }
        self.windows
            .get_mut(&window)
            .map(|entry| &mut entry.window)
            .ok_or(BackendError::UnknownWindow(window))
    }

    fn connected_monitor_names(glfw: &mut glfw::Glfw) -> Vec<String> {
        glfw.with_connected_monitors(|_, monitors| {
            monitors
                .iter()
                .enumerate()
                .map(|(index, monitor)| monitor.get_name().unwrap_or_else(|| format!("monitor-{index}")))
                .collect()
        })
    }

    /// Diff the connected monitors against the known ones
    fn refresh_monitors(&mut self) -> Vec<BackendEvent> {
        let Some(glfw) = self.glfw.as_mut() else {
            return Vec::new();
        };
        let current = Self::connected_monitor_names(glfw);
        diff_monitors(&mut self.monitors, current, &mut self.next_monitor)
    }
}

/// Match connected monitor names against the known monitors
///
/// Each known entry consumes one occurrence of its name, so two monitors with
/// the same name are tracked separately. Unmatched known entries are
/// disconnected and unmatched names become new monitors.
fn diff_monitors(known: &mut Vec<(MonitorId, String)>, current: Vec<String>, next_id: &mut i32) -> Vec<BackendEvent> {
    let mut unmatched = current;
    let mut events = Vec::new();

    known.retain(|(id, name)| match unmatched.iter().position(|candidate| candidate == name) {
        Some(index) => {
            unmatched.remove(index);
            true
        }
        None => {
            events.push(BackendEvent::Monitor(*id, ConnectionState::Disconnected));
            false
        }
    });

    for name in unmatched {
        let id = MonitorId(*next_id);
        *next_id += 1;
        known.push((id, name));
        events.push(BackendEvent::Monitor(id, ConnectionState::Connected));
    }
    events
}

impl Default for GlfwBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn error_code(error: glfw::Error) -> ErrorCode {
    match error {
        glfw::Error::NotInitialized => ErrorCode::NotInitialized,
        glfw::Error::NoCurrentContext => ErrorCode::NoCurrentContext,
        glfw::Error::InvalidEnum => ErrorCode::InvalidEnum,
        glfw::Error::InvalidValue => ErrorCode::InvalidValue,
        glfw::Error::OutOfMemory => ErrorCode::OutOfMemory,
        glfw::Error::ApiUnavailable => ErrorCode::ApiUnavailable,
        glfw::Error::VersionUnavailable => ErrorCode::VersionUnavailable,
        glfw::Error::FormatUnavailable => ErrorCode::FormatUnavailable,
        _ => ErrorCode::PlatformError,
    }
}

const fn key_action(action: glfw::Action) -> KeyAction {
    match action {
        glfw::Action::Release => KeyAction::Release,
        glfw::Action::Press => KeyAction::Press,
        glfw::Action::Repeat => KeyAction::Repeat,
    }
}

fn key_modifiers(mods: glfw::Modifiers) -> KeyModifiers {
    let mut result = KeyModifiers::empty();
    if mods.contains(glfw::Modifiers::Shift) {
        result |= KeyModifiers::SHIFT;
    }
    if mods.contains(glfw::Modifiers::Control) {
        result |= KeyModifiers::CONTROL;
    }
    if mods.contains(glfw::Modifiers::Alt) {
        result |= KeyModifiers::ALT;
    }
    if mods.contains(glfw::Modifiers::Super) {
        result |= KeyModifiers::SUPER;
    }
    if mods.contains(glfw::Modifiers::CapsLock) {
        result |= KeyModifiers::CAPS_LOCK;
    }
    result
}

/// Character a key types on a US layout, or its named key value
///
/// Letters follow shift and caps lock; other printable keys report their
/// unshifted character since the shifted one depends on the layout.
fn key_value(key: glfw::Key, mods: KeyModifiers) -> Unicode {
    let code = key as i32;
    match code {
        -1 => keys::UNKNOWN,
        0x41..=0x5A => {
            let upper = mods.contains(KeyModifiers::SHIFT) != mods.contains(KeyModifiers::CAPS_LOCK);
            if upper {
                code
            } else {
                code + 0x20
            }
        }
        0x20..=0x60 => code,
        _ => keys::named(code),
    }
}

/// Translate a GLFW event; kinds without a callback slot are dropped
fn translate(event: glfw::WindowEvent) -> Option<WindowEvent> {
    Some(match event {
        glfw::WindowEvent::Close => WindowEvent::Close,
        glfw::WindowEvent::Pos(x, y) => WindowEvent::Pos(x, y),
        glfw::WindowEvent::Refresh => WindowEvent::Refresh,
        glfw::WindowEvent::Size(w, h) => WindowEvent::Size(w, h),
        glfw::WindowEvent::Focus(focused) => WindowEvent::Focus(focused),
        glfw::WindowEvent::Key(key, scancode, action, mods) => {
            let mods = key_modifiers(mods);
            WindowEvent::Key {
                key: key_value(key, mods),
                scancode,
                action: key_action(action),
                mods,
            }
        }
        glfw::WindowEvent::MouseButton(button, action, _) => {
            WindowEvent::MouseButton(MouseButton::from_index(button as i32)?, key_action(action))
        }
        glfw::WindowEvent::Iconify(iconified) => WindowEvent::Minimize(iconified),
        glfw::WindowEvent::CursorPos(x, y) => WindowEvent::CursorPos(x, y),
        glfw::WindowEvent::CursorEnter(entered) => WindowEvent::CursorEnter(entered),
        glfw::WindowEvent::Scroll(x, y) => WindowEvent::Scroll(x, y),
        _ => return None,
    })
}

#[allow(clippy::cast_sign_loss)]
const fn dimensions(size: Size) -> (u32, u32) {
    (size.x as u32, size.y as u32)
}

impl WindowBackend for GlfwBackend {
    fn name(&self) -> &'static str {
        "glfw"
    }

    fn init(&mut self) -> BackendResult<()> {
        if self.glfw.is_some() {
            return Ok(());
        }
        let errors = Rc::clone(&self.errors);
        let glfw = glfw::init(move |error: glfw::Error, description: String| {
            log::error!("GLFW error {:?}: {}", error, description);
            errors.borrow_mut().push((error_code(error), description));
        })
        .map_err(|e| BackendError::InitializationFailed(format!("{e:?}")))?;

        self.glfw = Some(glfw);
        // Seed the monitor list so already connected monitors don't show up as hot-plugged
        let _ = self.refresh_monitors();
        Ok(())
    }

    fn terminate(&mut self) {
        self.windows.clear();
        self.monitors.clear();
        self.glfw = None;
    }

    fn is_initialized(&self) -> bool {
        self.glfw.is_some()
    }

    fn create_window(&mut self, descriptor: &WindowDescriptor) -> BackendResult<WindowId> {
        let glfw = self.glfw_mut()?;
        glfw.window_hint(glfw::WindowHint::Resizable(descriptor.resizable));
        glfw.window_hint(glfw::WindowHint::Visible(descriptor.visible));

        let (width, height) = dimensions(descriptor.mode.size());
        let title = descriptor.title.as_str();
        let created = match descriptor.mode {
            WindowMode::Windowed(_) => glfw.create_window(width, height, title, glfw::WindowMode::Windowed),
            WindowMode::Fullscreen { monitor, .. } => glfw.with_connected_monitors(|glfw, monitors| {
                match select_monitor(monitors, monitor) {
                    Some(m) => glfw.create_window(width, height, title, glfw::WindowMode::FullScreen(m)),
                    None => {
                        log::warn!("glfw: no monitor connected, creating a windowed window");
                        glfw.create_window(width, height, title, glfw::WindowMode::Windowed)
                    }
                }
            }),
        };
        let (mut window, events) =
            created.ok_or_else(|| BackendError::CreationFailed(format!("{width}x{height} '{title}'")))?;
        window.set_all_polling(true);

        let id = WindowId(self.next_window);
        self.next_window += 1;
        self.windows.insert(id, GlfwWindow { window, events });
        log::debug!("glfw: created {} ({}x{})", id, width, height);
        Ok(id)
    }

    fn destroy_window(&mut self, window: WindowId) -> BackendResult<()> {
        self.window_mut(window)?;
        // Dropping the PWindow destroys the native window
        self.windows.remove(&window);
        Ok(())
    }

    fn set_window_size(&mut self, window: WindowId, size: Size) -> BackendResult<()> {
        self.window_mut(window)?.set_size(size.x, size.y);
        Ok(())
    }

    fn set_window_title(&mut self, window: WindowId, title: &str) -> BackendResult<()> {
        self.window_mut(window)?.set_title(title);
        Ok(())
    }

    fn set_window_mode(&mut self, window: WindowId, mode: WindowMode) -> BackendResult<()> {
        self.window_mut(window)?;
        let glfw = self.glfw.as_mut().ok_or(BackendError::NotInitialized)?;
        let entry = self.windows.get_mut(&window).ok_or(BackendError::UnknownWindow(window))?;
        let (width, height) = dimensions(mode.size());

        match mode {
            WindowMode::Windowed(_) => {
                let (x, y) = entry.window.get_pos();
                entry.window.set_monitor(glfw::WindowMode::Windowed, x, y, width, height, None);
                Ok(())
            }
            WindowMode::Fullscreen { monitor, .. } => glfw.with_connected_monitors(|_, monitors| {
                match select_monitor(monitors, monitor) {
                    Some(m) => {
                        entry
                            .window
                            .set_monitor(glfw::WindowMode::FullScreen(m), 0, 0, width, height, None);
                        Ok(())
                    }
                    None => Err(BackendError::Platform {
                        code: ErrorCode::PlatformError,
                        description: "no monitor connected".to_string(),
                    }),
                }
            }),
        }
    }

    fn show_window(&mut self, window: WindowId) -> BackendResult<()> {
        self.window_mut(window)?.show();
        Ok(())
    }

    fn hide_window(&mut self, window: WindowId) -> BackendResult<()> {
        self.window_mut(window)?.hide();
        Ok(())
    }

    fn iconify_window(&mut self, window: WindowId) -> BackendResult<()> {
        self.window_mut(window)?.iconify();
        Ok(())
    }

    fn restore_window(&mut self, window: WindowId) -> BackendResult<()> {
        self.window_mut(window)?.restore();
        Ok(())
    }

    fn window_should_close(&self, window: WindowId) -> BackendResult<bool> {
        if self.glfw.is_none() {
            return Err(BackendError::NotInitialized);
        }
        self.windows
            .get(&window)
            .map(|entry| entry.window.should_close())
            .ok_or(BackendError::UnknownWindow(window))
    }

    fn set_window_should_close(&mut self, window: WindowId, should_close: bool) -> BackendResult<()> {
        self.window_mut(window)?.set_should_close(should_close);
        Ok(())
    }

    fn set_cursor_mode(&mut self, window: WindowId, mode: CursorMode) -> BackendResult<()> {
        let mode = match mode {
            CursorMode::Normal => glfw::CursorMode::Normal,
            CursorMode::Hidden => glfw::CursorMode::Hidden,
            CursorMode::Captured => glfw::CursorMode::Disabled,
        };
        self.window_mut(window)?.set_cursor_mode(mode);
        Ok(())
    }

    fn set_cursor_pos(&mut self, window: WindowId, x: f64, y: f64) -> BackendResult<()> {
        self.window_mut(window)?.set_cursor_pos(x, y);
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<BackendEvent> {
        let Some(glfw) = self.glfw.as_mut() else {
            return Vec::new();
        };
        glfw.poll_events();

        let mut events = self.refresh_monitors();
        events.extend(
            self.errors
                .borrow_mut()
                .drain(..)
                .map(|(code, description)| BackendEvent::Error(code, description)),
        );
        for (id, entry) in &self.windows {
            for (_, event) in glfw::flush_messages(&entry.events) {
                if let Some(event) = translate(event) {
                    events.push(BackendEvent::Window(*id, event));
                }
            }
        }
        events
    }

    fn get_time(&self) -> f64 {
        self.glfw.as_ref().map_or(0.0, glfw::Glfw::get_time)
    }

    fn set_time(&mut self, time: f64) {
        if let Some(glfw) = self.glfw.as_mut() {
            glfw.set_time(time);
        }
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

    fn key_event(key: glfw::Key, mods: glfw::Modifiers) -> Option<WindowEvent> {
        translate(glfw::WindowEvent::Key(key, 9, glfw::Action::Press, mods))
    }

    fn key_of(event: Option<WindowEvent>) -> Unicode {
        match event {
            Some(WindowEvent::Key { key, .. }) => key,
            other => panic!("expected a key event, got {other:?}"),
        }
    }

    #[test]
    fn test_error_codes() {
        let cases = [
            (glfw::Error::NotInitialized, ErrorCode::NotInitialized),
            (glfw::Error::NoCurrentContext, ErrorCode::NoCurrentContext),
            (glfw::Error::InvalidEnum, ErrorCode::InvalidEnum),
            (glfw::Error::InvalidValue, ErrorCode::InvalidValue),
            (glfw::Error::OutOfMemory, ErrorCode::OutOfMemory),
            (glfw::Error::ApiUnavailable, ErrorCode::ApiUnavailable),
            (glfw::Error::VersionUnavailable, ErrorCode::VersionUnavailable),
            (glfw::Error::FormatUnavailable, ErrorCode::FormatUnavailable),
            (glfw::Error::PlatformError, ErrorCode::PlatformError),
        ];
        for (error, expected) in cases {
            assert_eq!(error_code(error), expected);
        }
    }

    #[test]
    fn test_combined_modifiers() {
        let mods = key_modifiers(glfw::Modifiers::Shift | glfw::Modifiers::Control);
        assert_eq!(mods, KeyModifiers::SHIFT | KeyModifiers::CONTROL);
        assert_eq!(key_modifiers(glfw::Modifiers::empty()), KeyModifiers::empty());
        assert_eq!(
            key_modifiers(glfw::Modifiers::Alt | glfw::Modifiers::Super),
            KeyModifiers::ALT | KeyModifiers::SUPER
        );
    }

    #[test]
    fn test_letter_keys_follow_shift_and_caps_lock() {
        assert_eq!(key_of(key_event(glfw::Key::A, glfw::Modifiers::empty())), 'a' as Unicode);
        assert_eq!(key_of(key_event(glfw::Key::A, glfw::Modifiers::Shift)), 'A' as Unicode);
        assert_eq!(key_of(key_event(glfw::Key::Z, glfw::Modifiers::CapsLock)), 'Z' as Unicode);
        assert_eq!(
            key_of(key_event(glfw::Key::Z, glfw::Modifiers::CapsLock | glfw::Modifiers::Shift)),
            'z' as Unicode
        );
        assert_eq!(key_of(key_event(glfw::Key::Num1, glfw::Modifiers::Shift)), '1' as Unicode);
        assert_eq!(key_of(key_event(glfw::Key::Space, glfw::Modifiers::empty())), ' ' as Unicode);
    }

    #[test]
    fn test_named_keys_are_not_characters() {
        assert_eq!(key_of(key_event(glfw::Key::Escape, glfw::Modifiers::empty())), keys::ESCAPE);
        assert_eq!(key_of(key_event(glfw::Key::F11, glfw::Modifiers::empty())), keys::F11);
        assert_eq!(key_of(key_event(glfw::Key::Enter, glfw::Modifiers::empty())), keys::ENTER);
        assert_eq!(key_of(key_event(glfw::Key::Unknown, glfw::Modifiers::empty())), keys::UNKNOWN);
        assert!(!keys::is_character(keys::ESCAPE));
    }

    #[test]
    fn test_key_event_fields() {
        let event = translate(glfw::WindowEvent::Key(
            glfw::Key::W,
            17,
            glfw::Action::Repeat,
            glfw::Modifiers::Control,
        ));
        assert_eq!(
            event,
            Some(WindowEvent::Key {
                key: 'w' as Unicode,
                scancode: 17,
                action: KeyAction::Repeat,
                mods: KeyModifiers::CONTROL,
            })
        );
    }

    #[test]
    fn test_window_events_translate() {
        assert_eq!(translate(glfw::WindowEvent::Iconify(true)), Some(WindowEvent::Minimize(true)));
        assert_eq!(translate(glfw::WindowEvent::Size(640, 480)), Some(WindowEvent::Size(640, 480)));
        assert_eq!(translate(glfw::WindowEvent::Close), Some(WindowEvent::Close));
        assert_eq!(translate(glfw::WindowEvent::Scroll(0.0, -2.0)), Some(WindowEvent::Scroll(0.0, -2.0)));
        assert_eq!(translate(glfw::WindowEvent::FramebufferSize(1280, 960)), None);
    }

    #[test]
    fn test_mouse_buttons_translate() {
        let cases = [
            (glfw::MouseButton::Button1, MouseButton::LEFT),
            (glfw::MouseButton::Button2, MouseButton::RIGHT),
            (glfw::MouseButton::Button3, MouseButton::MIDDLE),
            (glfw::MouseButton::Button8, MouseButton::Button8),
        ];
        for (button, expected) in cases {
            let event = translate(glfw::WindowEvent::MouseButton(
                button,
                glfw::Action::Release,
                glfw::Modifiers::empty(),
            ));
            assert_eq!(event, Some(WindowEvent::MouseButton(expected, KeyAction::Release)));
        }
    }

    #[test]
    fn test_identical_monitors_are_tracked_separately() {
        let mut known = Vec::new();
        let mut next_id = 0;
        let panel = || "DELL U2719D".to_string();

        let events = diff_monitors(&mut known, vec![panel(), panel()], &mut next_id);
        assert_eq!(
            events,
            vec![
                BackendEvent::Monitor(MonitorId(0), ConnectionState::Connected),
                BackendEvent::Monitor(MonitorId(1), ConnectionState::Connected),
            ]
        );

        let events = diff_monitors(&mut known, vec![panel()], &mut next_id);
        assert_eq!(events, vec![BackendEvent::Monitor(MonitorId(1), ConnectionState::Disconnected)]);
        assert_eq!(known.len(), 1);

        assert!(diff_monitors(&mut known, vec![panel()], &mut next_id).is_empty());
    }
}
