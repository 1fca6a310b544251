//! Movie persistence with soft delete.
//!
//! Rows are never removed: `delete` stamps `deleted_at`, and every statement
//! here filters on `deleted_at IS NULL`, so a deleted movie behaves exactly
//! like a missing one.

use crate::client::GenericClient;
use crate::clock::{Clock, SystemClock};
use crate::config::DEFAULT_TABLE;
use crate::error::{DbResult, StoreError, StoreResult};
use crate::model::{MOVIE_COLUMNS, Movie, MoviePatch};
use crate::row::{FromRow, RowExt};
use crate::sql::numbered_placeholders;
use crate::update::{ACTIVE_ROW_BY_ID, build_update_at};
use crate::validate::validate_table;
use crate::value::{SqlValue, as_params};
use std::future::Future;
use tokio_postgres::Row;

/// Entity name used in not-found errors.
pub const ENTITY: &str = "movie";

/// CRUD over active movies.
///
/// `get_all` returns an empty list when nothing is stored; only single-row
/// operations report [`StoreError::NotFound`].
pub trait MovieRepository: Send + Sync {
    /// Active movie by id.
    fn get_by_id(&self, id: i64) -> impl Future<Output = StoreResult<Movie>> + Send;

    /// All active movies, ordered by id.
    fn get_all(&self) -> impl Future<Output = StoreResult<Vec<Movie>>> + Send;

    /// Insert a movie and return it as stored.
    fn create(&self, movie: &MoviePatch) -> impl Future<Output = StoreResult<Movie>> + Send;

    /// Apply the set fields of `patch` and return the updated movie.
    fn update(
        &self,
        id: i64,
        patch: &MoviePatch,
    ) -> impl Future<Output = StoreResult<Movie>> + Send;

    /// Soft-delete an active movie.
    fn delete(&self, id: i64) -> impl Future<Output = StoreResult<()>> + Send;
}

/// PostgreSQL-backed [`MovieRepository`].
///
/// `C` is any [`GenericClient`]: a `tokio_postgres::Client`, a pooled
/// `deadpool_postgres::Client`, a transaction, or a reference to one.
///
/// # Example
///
/// ```ignore
/// let client = pool.get().await?;
/// let store = MovieStore::new(&client);
/// let movie = store.create(&MoviePatch::new().name("Heat").genre("Crime")).await?;
/// store.delete(movie.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct MovieStore<C, K = SystemClock> {
    conn: C,
    clock: K,
    table: String,
}

impl<C: GenericClient> MovieStore<C> {
    /// Store over the default `movies` table using the wall clock.
    pub fn new(conn: C) -> Self {
        Self::with_clock(conn, SystemClock)
    }
}

impl<C: GenericClient, K: Clock> MovieStore<C, K> {
    /// Store taking its timestamps from `clock`.
    pub fn with_clock(conn: C, clock: K) -> Self {
        Self {
            conn,
            clock,
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Use another table. The name is spliced into SQL text, so anything but
    /// a plain identifier is rejected as invalid input.
    pub fn with_table(mut self, table: impl Into<String>) -> StoreResult<Self> {
        let table = table.into();
        validate_table(&table)?;
        self.table = table;
        Ok(self)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn client(&self) -> &C {
        &self.conn
    }

    pub fn into_client(self) -> C {
        self.conn
    }

    fn select_active_sql(&self) -> String {
        format!(
            "SELECT {} FROM {} WHERE deleted_at IS NULL",
            MOVIE_COLUMNS, self.table
        )
    }

    async fn query(&self, sql: &str, values: &[SqlValue]) -> DbResult<Vec<Row>> {
        tracing::debug!(target: "movies.sql", sql, param_count = values.len(), "query");
        self.conn.query(sql, &as_params(values)).await
    }

    async fn query_one(&self, sql: &str, values: &[SqlValue]) -> DbResult<Row> {
        tracing::debug!(target: "movies.sql", sql, param_count = values.len(), "query_one");
        self.conn.query_one(sql, &as_params(values)).await
    }

    async fn query_opt(&self, sql: &str, values: &[SqlValue]) -> DbResult<Option<Row>> {
        tracing::debug!(target: "movies.sql", sql, param_count = values.len(), "query_opt");
        self.conn.query_opt(sql, &as_params(values)).await
    }

    async fn execute(&self, sql: &str, values: &[SqlValue]) -> DbResult<u64> {
        tracing::debug!(target: "movies.sql", sql, param_count = values.len(), "execute");
        self.conn.execute(sql, &as_params(values)).await
    }

    async fn fetch_active(&self, id: i64) -> DbResult<Option<Movie>> {
        let sql = numbered_placeholders(&format!(
            "SELECT {} FROM {} WHERE {}",
            MOVIE_COLUMNS, self.table, ACTIVE_ROW_BY_ID
        ));
        let row = self.query_opt(&sql, &[SqlValue::Int(id)]).await?;
        row.as_ref().map(Movie::from_row).transpose()
    }
}

impl<C: GenericClient, K: Clock> MovieRepository for MovieStore<C, K> {
    async fn get_by_id(&self, id: i64) -> StoreResult<Movie> {
        match self.fetch_active(id).await {
            Ok(Some(movie)) => Ok(movie),
            Ok(None) => {
                tracing::debug!(table = %self.table, id, "movie not found");
                Err(StoreError::not_found(ENTITY, id))
            }
            Err(e) => {
                tracing::warn!(table = %self.table, id, error = %e, "get_by_id failed");
                Err(e.into())
            }
        }
    }

    async fn get_all(&self) -> StoreResult<Vec<Movie>> {
        let sql = format!("{} ORDER BY id", self.select_active_sql());
        let rows = self.query(&sql, &[]).await.inspect_err(|e| {
            tracing::warn!(table = %self.table, error = %e, "get_all failed");
        })?;
        let movies = rows.iter().map(Movie::from_row).collect::<DbResult<Vec<_>>>()?;
        Ok(movies)
    }

    async fn create(&self, movie: &MoviePatch) -> StoreResult<Movie> {
        let now = self.clock.now();
        let sql = numbered_placeholders(&format!(
            "INSERT INTO {} (name, genre, rating, release_date, plot, released, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
            self.table
        ));
        let values = [
            SqlValue::from(movie.name.as_ref().into_option().cloned()),
            SqlValue::from(movie.genre.as_ref().into_option().cloned()),
            SqlValue::from(movie.rating.as_ref().into_option().copied()),
            SqlValue::from(movie.release_date.as_ref().into_option().cloned()),
            SqlValue::from(movie.plot.as_ref().into_option().cloned()),
            SqlValue::Bool(movie.released.as_ref().into_option().copied().unwrap_or(false)),
            SqlValue::Timestamp(now),
            SqlValue::Timestamp(now),
        ];

        let row = self.query_one(&sql, &values).await.inspect_err(|e| {
            tracing::warn!(table = %self.table, error = %e, "create failed");
        })?;
        let id: i64 = row.try_get_column("id")?;
        tracing::debug!(table = %self.table, id, "movie created");

        self.get_by_id(id).await
    }

    async fn update(&self, id: i64, patch: &MoviePatch) -> StoreResult<Movie> {
        let clause = build_update_at(id, patch, self.clock.now())?;
        let sql = clause.to_statement(&self.table);

        let affected = self.execute(&sql, clause.values()).await.inspect_err(|e| {
            tracing::warn!(table = %self.table, id, error = %e, "update failed");
        })?;
        if affected == 0 {
            tracing::debug!(table = %self.table, id, "update matched no active row");
            return Err(StoreError::not_found(ENTITY, id));
        }

        self.get_by_id(id).await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let sql = numbered_placeholders(&format!(
            "UPDATE {} SET deleted_at = ? WHERE {}",
            self.table, ACTIVE_ROW_BY_ID
        ));
        let values = [SqlValue::Timestamp(self.clock.now()), SqlValue::Int(id)];

        let affected = self.execute(&sql, &values).await.inspect_err(|e| {
            tracing::warn!(table = %self.table, id, error = %e, "delete failed");
        })?;
        if affected == 0 {
            tracing::debug!(table = %self.table, id, "delete matched no active row");
            return Err(StoreError::not_found(ENTITY, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_client::CountingClient;

    #[test]
    fn with_table_rejects_non_identifiers() {
        let client = CountingClient::default();
        let store = MovieStore::new(&client).with_table("films").unwrap();
        assert_eq!(store.table(), "films");

        for bad in ["films; DROP TABLE films", "films WHERE 1=1", ""] {
            let err = MovieStore::new(&client).with_table(bad).unwrap_err();
            assert!(err.is_invalid_input(), "table {bad:?}");
        }
    }

    #[tokio::test]
    async fn lookups_surface_client_failures_as_storage_errors() {
        let client = CountingClient::default();
        let store = MovieStore::new(&client);

        assert!(store.get_by_id(1).await.unwrap_err().is_storage());
        let heat = MoviePatch::new().name("Heat").genre("Crime");
        assert!(store.create(&heat).await.unwrap_err().is_storage());
        assert_eq!(client.calls(), 2);
    }
}
