//! Shared utilities for the STELS wallet tooling.

pub mod logging;

pub use logging::{init_logging, redact, LogFormat, LoggingError};
