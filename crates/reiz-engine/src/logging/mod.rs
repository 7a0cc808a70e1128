//! Logger setup for engine binaries and demos.

mod init;

pub use init::{LoggingConfig, init_logging};
