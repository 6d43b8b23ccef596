//! Foundation module - small utilities shared by the facade and the demo
//!
//! - Logging setup
//! - Frame pacing

pub mod logging;
pub mod time;
