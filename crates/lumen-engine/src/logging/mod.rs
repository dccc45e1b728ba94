//! Logging utilities.
//!
//! Centralizes logger initialization. Everything else in the engine talks to
//! the `log` facade only.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
