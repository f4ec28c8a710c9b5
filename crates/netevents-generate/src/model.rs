use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Default number of events synthesized per block.
pub const DEFAULT_BLOCK_SIZE: usize = 8192;

/// Value bounds used when synthesizing events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventProfile {
    /// Exclusive upper bound for source and phone numbers.
    pub max_number: i64,
    /// Exclusive upper bound for call duration in seconds.
    pub max_duration_seconds: i32,
    /// Exclusive upper bound for the day of month.
    pub max_day_of_month: u32,
    /// Inclusive maximum length of `location` and `attr_*` tokens.
    pub max_text_len: usize,
}

impl Default for EventProfile {
    fn default() -> Self {
        Self {
            max_number: 88_005_553_535,
            max_duration_seconds: 100,
            max_day_of_month: 28,
            max_text_len: 40,
        }
    }
}

impl EventProfile {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.max_number <= 0 {
            return Err(GenerationError::InvalidOptions(
                "max_number must be positive".to_string(),
            ));
        }
        if self.max_duration_seconds <= 0 {
            return Err(GenerationError::InvalidOptions(
                "max_duration_seconds must be positive".to_string(),
            ));
        }
        if !(2..=29).contains(&self.max_day_of_month) {
            return Err(GenerationError::InvalidOptions(format!(
                "max_day_of_month must be within 2..=29, got {}",
                self.max_day_of_month
            )));
        }
        if self.max_text_len == 0 {
            return Err(GenerationError::InvalidOptions(
                "max_text_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Seed for reproducible output. Drawn from OS entropy when absent.
    pub seed: Option<u64>,
    /// Number of blocks synthesized concurrently.
    pub workers: usize,
    /// Events per block.
    pub block_size: usize,
    pub profile: EventProfile,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            workers: std::thread::available_parallelism()
                .map(|count| count.get())
                .unwrap_or(1),
            block_size: DEFAULT_BLOCK_SIZE,
            profile: EventProfile::default(),
        }
    }
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub events_requested: u64,
    pub events_written: u64,
    pub blocks: u64,
    pub workers: usize,
    /// Event count per type code.
    pub type_counts: BTreeMap<String, u64>,
    /// Pearson statistic of `type_counts` against the fixed distribution.
    pub chi_square: f64,
    pub bytes_written: u64,
    pub duration_ms: u64,
    pub throughput_events_per_sec: f64,
}
