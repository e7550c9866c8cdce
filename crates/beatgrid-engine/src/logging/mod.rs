//! Logging utilities.
//!
//! Centralizes logger initialization for binaries driving the engine.
//! The engine itself only talks to the `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};
