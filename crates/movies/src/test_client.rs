//! A client stub for unit tests that must prove no statement was sent.

use crate::client::GenericClient;
use crate::error::{DbError, DbResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Counts calls and fails every one of them.
#[derive(Debug, Default)]
pub(crate) struct CountingClient {
    calls: AtomicUsize,
}

impl CountingClient {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> DbResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DbError::Connection("no database in unit tests".into()))
    }
}

impl GenericClient for CountingClient {
    async fn query(&self, _: &str, _: &[&(dyn ToSql + Sync)]) -> DbResult<Vec<Row>> {
        self.fail()
    }

    async fn query_one(&self, _: &str, _: &[&(dyn ToSql + Sync)]) -> DbResult<Row> {
        self.fail()
    }

    async fn query_opt(&self, _: &str, _: &[&(dyn ToSql + Sync)]) -> DbResult<Option<Row>> {
        self.fail()
    }

    async fn execute(&self, _: &str, _: &[&(dyn ToSql + Sync)]) -> DbResult<u64> {
        self.fail()
    }
}
