//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize logging from `RUST_LOG`
///
/// Calling it again after a logger is installed is a no-op.
pub fn init() {
    if env_logger::try_init().is_err() {
        log::debug!("logger already initialized");
    }
}

/// Initialize logging with an explicit filter such as `"info"` or `"xwindow=debug"`
///
/// `RUST_LOG`, when set, still wins over the given filter.
pub fn init_with_filter(filter: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);
    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&env_filter);
    }
    if builder.try_init().is_err() {
        log::debug!("logger already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init_with_filter("xwindow=debug");
        init();
        init_with_filter("warn");
        info!("logging initialized");
    }
}
