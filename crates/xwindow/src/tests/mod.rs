//! Cross-module tests driving the facade through the headless backend
