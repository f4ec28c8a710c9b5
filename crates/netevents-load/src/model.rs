use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::postgres::MAX_BATCH_SIZE;

/// Default number of rows per multi-row insert.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// How the artifact is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    /// Decode the whole artifact before connecting.
    #[default]
    Buffered,
    /// Decode incrementally while inserting; decode errors roll back.
    Streaming,
}

/// Options that control how a load behaves.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub batch_size: usize,
    pub connect_timeout: Duration,
    pub mode: LoadMode,
    /// Destination table, optionally schema-qualified.
    pub table: String,
    /// Events buffered between the streaming decoder and the inserter.
    pub channel_capacity: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            connect_timeout: Duration::from_secs(10),
            mode: LoadMode::Buffered,
            table: "event".to_string(),
            channel_capacity: 4 * DEFAULT_BATCH_SIZE,
        }
    }
}

impl LoadOptions {
    pub fn validate(&self) -> Result<(), LoadError> {
        if !(1..=MAX_BATCH_SIZE).contains(&self.batch_size) {
            return Err(LoadError::InvalidOptions(format!(
                "batch_size must be within 1..={MAX_BATCH_SIZE}, got {}",
                self.batch_size
            )));
        }
        if self.channel_capacity == 0 {
            return Err(LoadError::InvalidOptions(
                "channel_capacity must be at least 1".to_string(),
            ));
        }
        if !is_valid_table_name(&self.table) {
            return Err(LoadError::InvalidOptions(format!(
                "invalid table name '{}'",
                self.table
            )));
        }
        Ok(())
    }
}

/// Summary of a committed load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    pub events_loaded: u64,
    pub batches: u64,
    pub duration_ms: u64,
    pub throughput_events_per_sec: f64,
}

/// `name` or `schema.name`, each part a plain SQL identifier.
fn is_valid_table_name(table: &str) -> bool {
    let parts: Vec<&str> = table.split('.').collect();
    parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_qualified_tables() {
        assert!(is_valid_table_name("event"));
        assert!(is_valid_table_name("public.event"));
        assert!(is_valid_table_name("_staging.event_2020"));
    }

    #[test]
    fn rejects_injection_and_empty_parts() {
        for table in ["", "event; drop table event", "a.b.c", "public.", "1event", "ev-ent"] {
            assert!(!is_valid_table_name(table), "{table}");
        }
    }

    #[test]
    fn batch_size_is_bounded_by_bind_limit() {
        let options = LoadOptions {
            batch_size: MAX_BATCH_SIZE + 1,
            ..LoadOptions::default()
        };
        assert!(matches!(options.validate(), Err(LoadError::InvalidOptions(_))));
        LoadOptions::default().validate().expect("defaults are valid");
    }
}
