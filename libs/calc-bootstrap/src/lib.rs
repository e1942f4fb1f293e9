//! Host process bootstrap
//!
//! Logging initialization and shutdown signal handling shared by service binaries.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod logging;
pub mod signals;

pub use logging::{LoggingConfig, init_logging};
pub use signals::{ShutdownSignal, spawn_shutdown_watcher, wait_for_shutdown};
