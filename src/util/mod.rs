//! Utility modules for liberty-detect

pub mod logging;

pub use logging::{init_from_env, init_logging, LoggingConfig};
