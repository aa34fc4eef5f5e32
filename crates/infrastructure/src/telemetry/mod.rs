//! Logging infrastructure
//!
//! Installs the `tracing` subscriber used by the binaries.

mod logging;

pub use logging::{LogFormat, LoggingConfig, TelemetryError, init_logging};
