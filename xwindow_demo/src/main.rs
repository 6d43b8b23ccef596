//! xwindow demo application
//!
//! Opens a GLFW window, logs every callback and reacts to a couple of keys:
//! `F` toggles fullscreen, `Escape` closes the window.
//!
//! Usage: `xwindow_demo [config.toml|config.ron]`

use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;
use xwindow::foundation::logging;
use xwindow::prelude::*;

#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Window(#[from] WindowError),
}

/// Key requests collected by the callbacks and handled once per frame
#[derive(Default)]
struct Requests {
    toggle_fullscreen: Cell<bool>,
    close: Cell<bool>,
}

struct LoggingListener {
    requests: Rc<Requests>,
}

impl WindowListener for LoggingListener {
    fn on_error(&self, code: ErrorCode) {
        log::error!("error callback: {}", code);
    }

    fn on_monitor(&self, monitor: MonitorId, state: ConnectionState) {
        log::info!("{} {:?}", monitor, state);
    }

    fn on_close(&self, window: WindowId) {
        log::info!("{} close requested", window);
    }

    fn on_move(&self, window: WindowId, x: i32, y: i32) {
        log::debug!("{} moved to {},{}", window, x, y);
    }

    fn on_resize(&self, window: WindowId, width: i32, height: i32) {
        log::info!("{} resized to {}x{}", window, width, height);
    }

    fn on_focus(&self, window: WindowId, focused: bool) {
        log::debug!("{} focus {}", window, focused);
    }

    fn on_key(&self, window: WindowId, key: Unicode, scancode: i32, action: KeyAction, mods: KeyModifiers) {
        log::debug!("{} key {} (scancode {}) {:?} {:?}", window, key, scancode, action, mods);
        if action != KeyAction::Press {
            return;
        }
        match keys::to_char(key) {
            Some('f' | 'F') => self.requests.toggle_fullscreen.set(true),
            None if key == keys::ESCAPE => self.requests.close.set(true),
            _ => {}
        }
    }

    fn on_mouse_button(&self, window: WindowId, button: MouseButton, action: KeyAction) {
        log::debug!("{} {:?} {:?}", window, button, action);
    }

    fn on_minimize(&self, window: WindowId, minimized: bool) {
        log::info!("{} minimized {}", window, minimized);
    }

    fn on_cursor_enter(&self, window: WindowId, entered: bool) {
        log::trace!("{} cursor entered {}", window, entered);
    }

    fn on_scroll(&self, window: WindowId, x_offset: f64, y_offset: f64) {
        log::debug!("{} scroll {} {}", window, x_offset, y_offset);
    }
}

fn run(config_path: Option<String>) -> Result<(), DemoError> {
    let mut window = match config_path {
        Some(path) => {
            log::info!("Loading window configuration from {}", path);
            Window::from_config_file(&path, GlfwBackend::new())?
        }
        None => Window::new(WindowConfig::new("xwindow demo"), GlfwBackend::new())?,
    };

    let requests = Rc::new(Requests::default());
    window.subscribe(Rc::new(LoggingListener {
        requests: Rc::clone(&requests),
    }));
    window.set_needs_load(Some(Rc::new(|| log::info!("Window system ready, loading window"))));

    window.init()?;
    window.load()?;

    let mut elapsed = 0.0;
    window.run(|window, delta| {
        elapsed += delta;
        if requests.toggle_fullscreen.replace(false) {
            window.toggle_fullscreen()?;
        }
        if requests.close.replace(false) {
            window.set_should_close(true)?;
        }
        Ok(())
    })?;

    log::info!("Ran for {:.2}s", elapsed);
    window.destroy();
    Ok(())
}

fn main() {
    logging::init_with_filter("info");

    log::info!("Starting xwindow demo");
    let config_path = std::env::args().nth(1);

    if let Err(e) = run(config_path) {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
    log::info!("xwindow demo finished");
}
