use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::EventType;

/// First year of the historical occurrence window.
pub const EARLIEST_YEAR: i32 = 2010;
/// Last year (inclusive) of the historical occurrence window.
pub const LATEST_YEAR: i32 = 2020;

/// Destination column names, in artifact and insert order.
pub const EVENT_COLUMNS: [&str; 16] = [
    "event_source",
    "event_ref",
    "event_type",
    "event_date",
    "calling_number",
    "called_number",
    "location",
    "duration_seconds",
    "attr_1",
    "attr_2",
    "attr_3",
    "attr_4",
    "attr_5",
    "attr_6",
    "attr_7",
    "attr_8",
];

/// One synthetic network event (call, SMS or data session).
///
/// Every field is required when decoding; a missing key is a corrupt record,
/// not an unset value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// Originating client. Not unique on its own.
    pub event_source: i64,
    /// Globally unique event identifier.
    pub event_ref: String,
    pub event_type: EventType,
    pub event_date: DateTime<Utc>,
    pub calling_number: i64,
    pub called_number: i64,
    pub location: String,
    pub duration_seconds: i32,
    pub attr_1: String,
    pub attr_2: String,
    pub attr_3: String,
    pub attr_4: String,
    pub attr_5: String,
    pub attr_6: String,
    pub attr_7: String,
    pub attr_8: String,
}

impl Event {
    pub fn attrs(&self) -> [&str; 8] {
        [
            self.attr_1.as_str(),
            self.attr_2.as_str(),
            self.attr_3.as_str(),
            self.attr_4.as_str(),
            self.attr_5.as_str(),
            self.attr_6.as_str(),
            self.attr_7.as_str(),
            self.attr_8.as_str(),
        ]
    }

    /// Seconds since the Unix epoch, used by the loader so the database
    /// derives the stored date itself.
    pub fn occurred_at_unix(&self) -> i64 {
        self.event_date.timestamp()
    }

    /// Check the invariants every generated event satisfies.
    pub fn validate(&self) -> Result<()> {
        if self.event_ref.is_empty() {
            return Err(self.invalid("event_ref is empty"));
        }
        if self.location.is_empty() {
            return Err(self.invalid("location is empty"));
        }
        if self.duration_seconds < 0 {
            return Err(self.invalid(format!(
                "duration_seconds is negative ({})",
                self.duration_seconds
            )));
        }
        for (name, value) in [
            ("event_source", self.event_source),
            ("calling_number", self.calling_number),
            ("called_number", self.called_number),
        ] {
            if value < 0 {
                return Err(self.invalid(format!("{name} is negative ({value})")));
            }
        }

        let (start, end) = occurrence_window();
        if self.event_date < start || self.event_date >= end {
            return Err(self.invalid(format!(
                "event_date {} is outside {EARLIEST_YEAR}..={LATEST_YEAR}",
                self.event_date.to_rfc3339()
            )));
        }

        Ok(())
    }

    fn invalid(&self, reason: impl Into<String>) -> Error {
        Error::InvalidEvent {
            event_ref: self.event_ref.clone(),
            reason: reason.into(),
        }
    }
}

/// Half-open `[start, end)` window every event timestamp must fall in.
pub fn occurrence_window() -> (DateTime<Utc>, DateTime<Utc>) {
    (year_start(EARLIEST_YEAR), year_start(LATEST_YEAR + 1))
}

fn year_start(year: i32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
        .and_utc()
}
