//! Core contracts shared by the netevents generator and loader.
//!
//! This crate defines the `Event` record that travels through the artifact,
//! the fixed event type distribution, domain validation, and connection
//! target handling used by the loader.

pub mod connection;
pub mod error;
pub mod event;
pub mod types;

pub use connection::{ConnectionTarget, RedactedConnection, redact_connection_string};
pub use error::{Error, Result};
pub use event::{EARLIEST_YEAR, EVENT_COLUMNS, Event, LATEST_YEAR, occurrence_window};
pub use types::{EventType, TYPE_DISTRIBUTION, TYPE_ROLL_RANGE, type_for_roll};
