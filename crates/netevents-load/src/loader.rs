use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use netevents_core::{ConnectionTarget, Event};

use crate::destination::{Destination, LoadSession};
use crate::error::LoadError;
use crate::model::{LoadMode, LoadOptions, LoadReport};
use crate::postgres::PostgresDestination;
use crate::reader::{read_events, stream_events};

/// Loads an artifact into a destination with all-or-nothing semantics.
#[derive(Debug, Clone)]
pub struct BulkLoader {
    options: LoadOptions,
}

impl BulkLoader {
    pub fn new(options: LoadOptions) -> Result<Self, LoadError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Load the artifact at `path` into the Postgres database at `target`.
    ///
    /// In buffered mode the artifact is decoded before a connection is
    /// opened, so a corrupt file never touches the database.
    pub async fn load_file(
        &self,
        target: &ConnectionTarget,
        path: &Path,
    ) -> Result<LoadReport, LoadError> {
        info!(
            input = %path.display(),
            target = %target,
            mode = ?self.options.mode,
            batch_size = self.options.batch_size,
            "load started"
        );

        match self.options.mode {
            LoadMode::Buffered => {
                let events = read_events(path)?;
                info!(events = events.len(), "artifact decoded");
                let destination = PostgresDestination::connect(target, &self.options).await?;
                self.load_events(&destination, &events).await
            }
            LoadMode::Streaming => {
                let destination = PostgresDestination::connect(target, &self.options).await?;
                self.load_stream(&destination, path).await
            }
        }
    }

    /// Insert an in-memory batch in one transaction.
    pub async fn load_events(
        &self,
        destination: &dyn Destination,
        events: &[Event],
    ) -> Result<LoadReport, LoadError> {
        let mut batch = TransactionalBatch::begin(destination).await?;
        for chunk in events.chunks(self.options.batch_size) {
            batch = batch.insert(chunk).await?;
        }
        batch.commit().await
    }

    /// Decode the artifact while inserting, all inside one transaction.
    ///
    /// An undecodable record aborts the transaction.
    pub async fn load_stream(
        &self,
        destination: &dyn Destination,
        path: &Path,
    ) -> Result<LoadReport, LoadError> {
        let (mut events, decoder) = stream_events(path, self.options.channel_capacity)?;
        let mut batch = TransactionalBatch::begin(destination).await?;
        let mut pending = Vec::with_capacity(self.options.batch_size);

        while let Some(event) = events.recv().await {
            pending.push(event);
            if pending.len() == self.options.batch_size {
                batch = batch.insert(&pending).await?;
                pending.clear();
            }
        }

        match decoder.await {
            Ok(Ok(decoded)) => debug!(decoded, "artifact stream finished"),
            Ok(Err(err)) => return Err(batch.abort(err).await),
            Err(_) => return Err(batch.abort(LoadError::DecoderPanicked).await),
        }

        batch.insert(&pending).await?.commit().await
    }
}

/// One open transaction plus the counters reported on commit.
struct TransactionalBatch {
    session: Box<dyn LoadSession>,
    started: Instant,
    loaded: u64,
    batches: u64,
}

impl TransactionalBatch {
    async fn begin(destination: &dyn Destination) -> Result<Self, LoadError> {
        let session = destination.begin().await?;
        debug!(engine = destination.engine(), "transaction started");
        Ok(Self {
            session,
            started: Instant::now(),
            loaded: 0,
            batches: 0,
        })
    }

    /// Insert `events`. On failure the transaction is rolled back and
    /// consumed.
    async fn insert(mut self, events: &[Event]) -> Result<Self, LoadError> {
        if events.is_empty() {
            return Ok(self);
        }
        let outcome = self.session.insert_batch(events).await;
        match outcome {
            Ok(_) => {
                self.loaded += events.len() as u64;
                self.batches += 1;
                debug!(batches = self.batches, events = self.loaded, "batch inserted");
                Ok(self)
            }
            Err(err) => {
                let events_attempted = self.loaded + events.len() as u64;
                Err(self
                    .abort(LoadError::BatchFailed {
                        events_attempted,
                        source: Box::new(err),
                    })
                    .await)
            }
        }
    }

    async fn abort(self, err: LoadError) -> LoadError {
        let loaded = self.loaded;
        if let Err(rollback_err) = self.session.rollback().await {
            warn!(error = %rollback_err, "rollback failed, transaction is discarded with the connection");
        }
        warn!(events = loaded, error = %err, "load aborted and rolled back");
        err
    }

    async fn commit(self) -> Result<LoadReport, LoadError> {
        self.session.commit().await?;
        let elapsed = self.started.elapsed();
        let report = LoadReport {
            events_loaded: self.loaded,
            batches: self.batches,
            duration_ms: elapsed.as_millis() as u64,
            throughput_events_per_sec: if elapsed.as_secs_f64() > 0.0 {
                self.loaded as f64 / elapsed.as_secs_f64()
            } else {
                0.0
            },
        };
        info!(
            events = report.events_loaded,
            batches = report.batches,
            duration_ms = report.duration_ms,
            "load committed"
        );
        Ok(report)
    }
}
