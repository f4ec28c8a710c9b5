use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};

use netevents_core::{ConnectionTarget, Event};

use crate::destination::{Destination, LoadSession};
use crate::error::LoadError;
use crate::model::LoadOptions;

mod insert;

pub use insert::{MAX_BATCH_SIZE, MAX_BIND_PARAMS, build_insert, insert_batch};

/// Destination for PostgreSQL databases.
#[derive(Debug, Clone)]
pub struct PostgresDestination {
    pool: PgPool,
    table: String,
}

impl PostgresDestination {
    /// Create a destination using a pre-configured pool.
    pub fn new(pool: PgPool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    /// Open a single-connection pool to `target`.
    pub async fn connect(
        target: &ConnectionTarget,
        options: &LoadOptions,
    ) -> Result<Self, LoadError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(options.connect_timeout)
            .connect(target.url())
            .await
            .map_err(LoadError::Connect)?;
        Ok(Self::new(pool, options.table.clone()))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Destination for PostgresDestination {
    fn engine(&self) -> &'static str {
        "postgres"
    }

    async fn begin(&self) -> Result<Box<dyn LoadSession>, LoadError> {
        let tx = self.pool.begin().await.map_err(LoadError::Begin)?;
        Ok(Box::new(PostgresSession {
            tx,
            table: self.table.clone(),
        }))
    }
}

struct PostgresSession {
    tx: Transaction<'static, Postgres>,
    table: String,
}

#[async_trait]
impl LoadSession for PostgresSession {
    async fn insert_batch(&mut self, events: &[Event]) -> Result<u64, LoadError> {
        insert_batch(&mut self.tx, &self.table, events)
            .await
            .map_err(LoadError::Insert)
    }

    async fn commit(self: Box<Self>) -> Result<(), LoadError> {
        self.tx.commit().await.map_err(LoadError::Commit)
    }

    async fn rollback(self: Box<Self>) -> Result<(), LoadError> {
        self.tx.rollback().await.map_err(LoadError::Rollback)
    }
}
