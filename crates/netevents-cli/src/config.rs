use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use netevents_generate::{EventProfile, GenerateOptions};
use netevents_load::{LoadMode, LoadOptions};

use crate::error::{CliError, CliResult};
use crate::logging::LogFormat;

/// Picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "netevents.toml";

/// Optional settings shared by both binaries.
///
/// Every field may be omitted. Command-line flags take precedence over the
/// file, which takes precedence over built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NeteventsConfig {
    pub generator: GeneratorSection,
    pub loader: LoaderSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSection {
    pub seed: Option<u64>,
    pub workers: Option<usize>,
    pub block_size: Option<usize>,
    /// Append an execution statistic here after each run.
    pub stats_file: Option<PathBuf>,
    pub profile: EventProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderSection {
    pub batch_size: Option<usize>,
    pub mode: Option<LoadMode>,
    pub connect_timeout_secs: Option<u64>,
    pub table: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub format: Option<LogFormat>,
    pub file: Option<PathBuf>,
}

impl GeneratorSection {
    pub fn resolve(
        &self,
        seed: Option<u64>,
        workers: Option<usize>,
        block_size: Option<usize>,
    ) -> GenerateOptions {
        let defaults = GenerateOptions::default();
        GenerateOptions {
            seed: seed.or(self.seed),
            workers: workers.or(self.workers).unwrap_or(defaults.workers),
            block_size: block_size.or(self.block_size).unwrap_or(defaults.block_size),
            profile: self.profile.clone(),
        }
    }
}

impl LoaderSection {
    /// `stream` is a switch, so it can only turn streaming on.
    pub fn resolve(
        &self,
        batch_size: Option<usize>,
        stream: bool,
        connect_timeout_secs: Option<u64>,
        table: Option<String>,
    ) -> LoadOptions {
        let defaults = LoadOptions::default();
        let mode = if stream {
            LoadMode::Streaming
        } else {
            self.mode.unwrap_or(defaults.mode)
        };
        LoadOptions {
            batch_size: batch_size.or(self.batch_size).unwrap_or(defaults.batch_size),
            connect_timeout: connect_timeout_secs
                .or(self.connect_timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            mode,
            table: table
                .or_else(|| self.table.clone())
                .unwrap_or(defaults.table),
            channel_capacity: defaults.channel_capacity,
        }
    }
}

pub fn parse_config(content: &str) -> CliResult<NeteventsConfig> {
    Ok(toml::from_str(content)?)
}

/// Load `explicit`, or `netevents.toml` from the working directory if present.
///
/// An explicit path that does not exist is an error; a missing default file
/// yields the defaults.
pub fn load_config(explicit: Option<&Path>) -> CliResult<NeteventsConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(CliError::InvalidConfig(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.is_file() {
                return Ok(NeteventsConfig::default());
            }
            fallback
        }
    };

    let content = std::fs::read_to_string(&path)?;
    parse_config(&content)
}
