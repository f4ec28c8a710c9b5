use async_trait::async_trait;

use netevents_core::Event;

use crate::error::LoadError;

/// A store that can receive a batch of events inside one transaction.
#[async_trait]
pub trait Destination: Send + Sync {
    /// Returns the engine identifier (e.g. `postgres`).
    fn engine(&self) -> &'static str;

    /// Open the single transaction a load runs in.
    async fn begin(&self) -> Result<Box<dyn LoadSession>, LoadError>;
}

/// An open transaction on a destination.
///
/// Nothing inserted through a session is visible to others until `commit`.
#[async_trait]
pub trait LoadSession: Send {
    /// Insert events, returning the number of rows written.
    async fn insert_batch(&mut self, events: &[Event]) -> Result<u64, LoadError>;

    async fn commit(self: Box<Self>) -> Result<(), LoadError>;

    async fn rollback(self: Box<Self>) -> Result<(), LoadError>;
}
