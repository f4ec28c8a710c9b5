//! Transactional bulk loading of event artifacts.
//!
//! A load either commits every event of the artifact in one transaction or
//! leaves the destination untouched.

pub mod destination;
pub mod error;
pub mod loader;
pub mod model;
pub mod postgres;
pub mod reader;

pub use destination::{Destination, LoadSession};
pub use error::LoadError;
pub use loader::BulkLoader;
pub use model::{DEFAULT_BATCH_SIZE, LoadMode, LoadOptions, LoadReport};
pub use postgres::{MAX_BATCH_SIZE, PostgresDestination};
pub use reader::{read_events, stream_events};

pub use netevents_core::{ConnectionTarget, Event};
