//! Shared plumbing for the `generator` and `loader` binaries.

pub mod config;
pub mod error;
pub mod logging;
pub mod stats;

pub use config::{
    DEFAULT_CONFIG_FILE, GeneratorSection, LoaderSection, LoggingSection, NeteventsConfig,
    load_config, parse_config,
};
pub use error::{CliError, CliResult};
pub use logging::{LogFormat, init_logging};
pub use stats::ExecutionStatistic;
