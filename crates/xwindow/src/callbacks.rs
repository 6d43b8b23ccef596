//! Callback slots and their dispatch
//!
//! Each event kind has exactly one slot. A slot holds a reference-counted
//! closure so the getter can hand out the installed callback while the slot
//! keeps it. Setters return the callback they replaced.
//!
//! Callbacks never receive the [`Window`](crate::Window) itself, only ids and
//! values, so dispatch cannot re-enter the facade.

use crate::events::WindowEvent;
use crate::input::{ConnectionState, ErrorCode, KeyAction, KeyModifiers, MouseButton};
use crate::types::{MonitorId, Unicode, WindowId};
use std::fmt;
use std::rc::Rc;

/// Called when an error occurs
pub type ErrorFun = Rc<dyn Fn(ErrorCode)>;
/// Called when a monitor is connected or disconnected
pub type MonitorFun = Rc<dyn Fn(MonitorId, ConnectionState)>;
/// Called when the user asks to close the window
pub type WindowCloseFun = Rc<dyn Fn(WindowId)>;
/// Called when the window moves
pub type WindowPosFun = Rc<dyn Fn(WindowId, i32, i32)>;
/// Called when the window manager asks for a redraw
pub type WindowRefreshFun = Rc<dyn Fn(WindowId)>;
/// Called when the window is resized
pub type WindowSizeFun = Rc<dyn Fn(WindowId, i32, i32)>;
/// Called when the window gains or loses focus
pub type WindowFocusFun = Rc<dyn Fn(WindowId, bool)>;
/// Called when a key is pressed, released or repeated
///
/// The key is the character it types, or a [`keys`](crate::input::keys) value
/// such as [`keys::ESCAPE`](crate::input::keys::ESCAPE) for keys without one.
pub type KeyFun = Rc<dyn Fn(WindowId, Unicode, i32, KeyAction, KeyModifiers)>;
/// Called when a mouse button changes state
pub type MouseButtonFun = Rc<dyn Fn(WindowId, MouseButton, KeyAction)>;
/// Called when the window is minimized or restored
pub type WindowMinimizeFun = Rc<dyn Fn(WindowId, bool)>;
/// Called when the cursor moves
pub type CursorPosFun = Rc<dyn Fn(WindowId, f64, f64)>;
/// Called when the cursor enters or leaves the window
pub type CursorEnterFun = Rc<dyn Fn(WindowId, bool)>;
/// Called when the user scrolls
pub type ScrollFun = Rc<dyn Fn(WindowId, f64, f64)>;
/// Called when an object needs its `load` to run again
pub type Event = Rc<dyn Fn()>;

/// Trait-based alternative to filling the slots one by one
///
/// Every method has an empty default, so a listener only implements the
/// events it cares about. Install one with [`Callbacks::subscribe`].
#[allow(unused_variables)]
pub trait WindowListener {
    /// See [`ErrorFun`]
    fn on_error(&self, code: ErrorCode) {}
    /// See [`MonitorFun`]
    fn on_monitor(&self, monitor: MonitorId, state: ConnectionState) {}
    /// See [`WindowCloseFun`]
    fn on_close(&self, window: WindowId) {}
    /// See [`WindowPosFun`]
    fn on_move(&self, window: WindowId, x: i32, y: i32) {}
    /// See [`WindowRefreshFun`]
    fn on_refresh(&self, window: WindowId) {}
    /// See [`WindowSizeFun`]
    fn on_resize(&self, window: WindowId, width: i32, height: i32) {}
    /// See [`WindowFocusFun`]
    fn on_focus(&self, window: WindowId, focused: bool) {}
    /// See [`KeyFun`]
    fn on_key(&self, window: WindowId, key: Unicode, scancode: i32, action: KeyAction, mods: KeyModifiers) {}
    /// See [`MouseButtonFun`]
    fn on_mouse_button(&self, window: WindowId, button: MouseButton, action: KeyAction) {}
    /// See [`WindowMinimizeFun`]
    fn on_minimize(&self, window: WindowId, minimized: bool) {}
    /// See [`CursorPosFun`]
    fn on_cursor_pos(&self, window: WindowId, x: f64, y: f64) {}
    /// See [`CursorEnterFun`]
    fn on_cursor_enter(&self, window: WindowId, entered: bool) {}
    /// See [`ScrollFun`]
    fn on_scroll(&self, window: WindowId, x_offset: f64, y_offset: f64) {}
}

macro_rules! callback_slots {
    ($($field:ident: $ty:ident => $get:ident, $set:ident;)*) => {
        /// One optional callback per event kind
        #[derive(Default, Clone)]
        pub struct Callbacks {
            $($field: Option<$ty>,)*
        }

        impl Callbacks {
            $(
                #[doc = concat!("Currently installed [`", stringify!($ty), "`]")]
                pub fn $get(&self) -> Option<$ty> {
                    self.$field.clone()
                }

                #[doc = concat!("Install or clear the [`", stringify!($ty), "`], returning the previous one")]
                pub fn $set(&mut self, fun: Option<$ty>) -> Option<$ty> {
                    std::mem::replace(&mut self.$field, fun)
                }
            )*

            /// Number of slots that currently hold a callback
            pub fn installed_count(&self) -> usize {
                [$(self.$field.is_some(),)*].iter().filter(|installed| **installed).count()
            }
        }

        impl fmt::Debug for Callbacks {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct("Callbacks")
                    $(.field(stringify!($field), &self.$field.is_some()))*
                    .finish()
            }
        }
    };
}

callback_slots! {
    error: ErrorFun => get_error_fun, set_error_fun;
    monitor: MonitorFun => get_monitor_fun, set_monitor_fun;
    window_close: WindowCloseFun => get_window_close_fun, set_window_close_fun;
    window_pos: WindowPosFun => get_window_pos_fun, set_window_pos_fun;
    window_refresh: WindowRefreshFun => get_window_refresh_fun, set_window_refresh_fun;
    window_size: WindowSizeFun => get_window_size_fun, set_window_size_fun;
    window_focus: WindowFocusFun => get_window_focus_fun, set_window_focus_fun;
    key: KeyFun => get_key_fun, set_key_fun;
    mouse_button: MouseButtonFun => get_mouse_button_fun, set_mouse_button_fun;
    window_minimize: WindowMinimizeFun => get_window_minimize_fun, set_window_minimize_fun;
    cursor_pos: CursorPosFun => get_cursor_pos_fun, set_cursor_pos_fun;
    cursor_enter: CursorEnterFun => get_cursor_enter_fun, set_cursor_enter_fun;
    scroll: ScrollFun => get_scroll_fun, set_scroll_fun;
}

impl Callbacks {
    /// Create an empty set of slots
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke the slot matching `event`
    ///
    /// Returns whether a callback was installed for it.
    pub fn dispatch(&self, window: WindowId, event: &WindowEvent) -> bool {
        match *event {
            WindowEvent::Close => self.window_close.as_ref().map(|f| f(window)).is_some(),
            WindowEvent::Pos(x, y) => self.window_pos.as_ref().map(|f| f(window, x, y)).is_some(),
            WindowEvent::Refresh => self.window_refresh.as_ref().map(|f| f(window)).is_some(),
            WindowEvent::Size(w, h) => self.window_size.as_ref().map(|f| f(window, w, h)).is_some(),
            WindowEvent::Focus(focused) => self.window_focus.as_ref().map(|f| f(window, focused)).is_some(),
            WindowEvent::Key { key, scancode, action, mods } => {
                self.key.as_ref().map(|f| f(window, key, scancode, action, mods)).is_some()
            }
            WindowEvent::MouseButton(button, action) => {
                self.mouse_button.as_ref().map(|f| f(window, button, action)).is_some()
            }
            WindowEvent::Minimize(minimized) => {
                self.window_minimize.as_ref().map(|f| f(window, minimized)).is_some()
            }
            WindowEvent::CursorPos(x, y) => self.cursor_pos.as_ref().map(|f| f(window, x, y)).is_some(),
            WindowEvent::CursorEnter(entered) => {
                self.cursor_enter.as_ref().map(|f| f(window, entered)).is_some()
            }
            WindowEvent::Scroll(x, y) => self.scroll.as_ref().map(|f| f(window, x, y)).is_some(),
        }
    }

    /// Invoke the error slot
    pub fn report_error(&self, code: ErrorCode) -> bool {
        self.error.as_ref().map(|f| f(code)).is_some()
    }

    /// Invoke the monitor slot
    pub fn report_monitor(&self, monitor: MonitorId, state: ConnectionState) -> bool {
        self.monitor.as_ref().map(|f| f(monitor, state)).is_some()
    }

    /// Fill every slot from a single listener, replacing what was installed
    pub fn subscribe<L: WindowListener + 'static>(&mut self, listener: Rc<L>) {
        let l = Rc::clone(&listener);
        self.error = Some(Rc::new(move |code| l.on_error(code)));
        let l = Rc::clone(&listener);
        self.monitor = Some(Rc::new(move |monitor, state| l.on_monitor(monitor, state)));
        let l = Rc::clone(&listener);
        self.window_close = Some(Rc::new(move |window| l.on_close(window)));
        let l = Rc::clone(&listener);
        self.window_pos = Some(Rc::new(move |window, x, y| l.on_move(window, x, y)));
        let l = Rc::clone(&listener);
        self.window_refresh = Some(Rc::new(move |window| l.on_refresh(window)));
        let l = Rc::clone(&listener);
        self.window_size = Some(Rc::new(move |window, w, h| l.on_resize(window, w, h)));
        let l = Rc::clone(&listener);
        self.window_focus = Some(Rc::new(move |window, focused| l.on_focus(window, focused)));
        let l = Rc::clone(&listener);
        self.key = Some(Rc::new(move |window, key, scancode, action, mods| {
            l.on_key(window, key, scancode, action, mods);
        }));
        let l = Rc::clone(&listener);
        self.mouse_button = Some(Rc::new(move |window, button, action| {
            l.on_mouse_button(window, button, action);
        }));
        let l = Rc::clone(&listener);
        self.window_minimize = Some(Rc::new(move |window, minimized| l.on_minimize(window, minimized)));
        let l = Rc::clone(&listener);
        self.cursor_pos = Some(Rc::new(move |window, x, y| l.on_cursor_pos(window, x, y)));
        let l = Rc::clone(&listener);
        self.cursor_enter = Some(Rc::new(move |window, entered| l.on_cursor_enter(window, entered)));
        let l = listener;
        self.scroll = Some(Rc::new(move |window, x, y| l.on_scroll(window, x, y)));
    }

    /// Empty every slot
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
