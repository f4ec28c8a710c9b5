//! Execution history for generator runs.
//!
//! Each run appends one JSON line to a statistics file. Later runs with the
//! same event count are compared against the first and the most recent of
//! them.

use std::fs::OpenOptions;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::CliResult;

const RULE: &str = "================================================================";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStatistic {
    pub execution_start: DateTime<Utc>,
    pub duration_ms: u64,
    pub number_of_events: u64,
}

impl ExecutionStatistic {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Earlier runs with the same event count as the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    pub first: Option<ExecutionStatistic>,
    /// Most recent earlier run, absent when it is the first one.
    pub last: Option<ExecutionStatistic>,
}

impl Comparison {
    pub fn against(history: &[ExecutionStatistic], current: &ExecutionStatistic) -> Self {
        let mut same_count = history
            .iter()
            .filter(|stat| stat.number_of_events == current.number_of_events);
        let first = same_count.next().cloned();
        let last = same_count.last().cloned();
        Self { first, last }
    }
}

/// Append `stat` to the file at `path` as one JSON line.
pub fn save(stat: &ExecutionStatistic, path: &Path) -> CliResult<()> {
    let mut line = serde_json::to_vec(stat)?;
    line.push(b'\n');
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(&line)?;
    Ok(())
}

/// Read every statistic in the file, skipping blank and malformed lines.
pub fn read_all(path: &Path) -> CliResult<Vec<ExecutionStatistic>> {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut statistics = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(stat) => statistics.push(stat),
            Err(err) => debug!(error = %err, "skipping malformed statistics line"),
        }
    }
    Ok(statistics)
}

/// Record `stat` and report how it compares with earlier runs.
pub fn save_and_report(stat: &ExecutionStatistic, path: &Path) -> CliResult<Comparison> {
    let history = read_all(path)?;
    save(stat, path)?;

    let comparison = Comparison::against(&history, stat);
    info!(
        events = stat.number_of_events,
        duration_ms = stat.duration_ms,
        first_run_ms = comparison.first.as_ref().map(|s| s.duration_ms),
        last_run_ms = comparison.last.as_ref().map(|s| s.duration_ms),
        stats_file = %path.display(),
        "execution statistic recorded"
    );
    println!("{}", render_report(stat, &comparison, true));
    Ok(comparison)
}

pub fn render_report(stat: &ExecutionStatistic, comparison: &Comparison, color: bool) -> String {
    let mut lines = vec![
        RULE.to_string(),
        format!(
            "Current run: {} events in {:?}",
            format_count(stat.number_of_events),
            stat.duration()
        ),
    ];

    match (&comparison.first, &comparison.last) {
        (None, _) => {
            lines.push("First run for this event count, nothing to compare".to_string());
        }
        (Some(first), last) => {
            lines.push(format!(
                "Compared with first run: {:?} ({} improvement)",
                first.duration(),
                format_improvement(first.duration_ms, stat.duration_ms, color)
            ));
            if let Some(last) = last {
                lines.push(format!(
                    "Compared with last run:  {:?} ({} improvement)",
                    last.duration(),
                    format_improvement(last.duration_ms, stat.duration_ms, color)
                ));
            }
        }
    }

    lines.push(RULE.to_string());
    lines.join("\n")
}

/// `((old - new) / old) * 100`; positive means the new run was faster.
pub fn improvement_percent(old_ms: u64, new_ms: u64) -> Option<f64> {
    if old_ms == 0 {
        return None;
    }
    Some((old_ms as f64 - new_ms as f64) / old_ms as f64 * 100.0)
}

fn format_improvement(old_ms: u64, new_ms: u64, color: bool) -> String {
    let Some(percent) = improvement_percent(old_ms, new_ms) else {
        return "N/A".to_string();
    };
    if percent == 0.0 {
        return "0%".to_string();
    }
    let text = format!("{percent:+.0}%");
    if !color {
        return text;
    }
    let code = if percent > 0.0 { 32 } else { 31 };
    format!("\x1b[{code}m{text}\x1b[0m")
}

/// `1234567` becomes `1,234,567`.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}
