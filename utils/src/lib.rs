//! Shared utilities for Aerial binaries.

pub mod logging;

pub use logging::{init_logging, LogFormat, UnknownLogFormat};
