//! `scaffold_logging` - configuration-driven logging built on top of `tracing`.
//!
//! Events are converted into [`LogEvent`]s, filtered per logger name or target
//! prefix, rendered through a log4j-style pattern and written as one line each,
//! by default to stderr:
//!
//! ```text
//! 14:02:11 app-main INFO Database version retrieved: 8.0.36
//! ```
//!
//! Libraries that log through the `log` crate are bridged into the same pipeline
//! by [`init`].

pub mod config;
pub mod encoders;
pub mod error;
pub mod filter;
mod init;
mod logger;
pub mod model;
pub mod subscriber;

pub use config::{find_config_file, LoggingConfig};
pub use error::{Error, Result};
pub use filter::TargetFilter;
pub use init::{init, init_from_file, stderr_layer};
pub use logger::Logger;
pub use model::{LogEvent, LogValue};
pub use subscriber::PatternLayer;
