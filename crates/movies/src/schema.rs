//! Table definition.

use crate::client::GenericClient;
use crate::error::StoreResult;
use crate::validate::validate_table;

/// DDL for the movie table; `{table}` is replaced with the table name.
pub const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS {table} (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    genre TEXT NOT NULL,
    rating DOUBLE PRECISION CHECK (rating >= 0 AND rating <= 5),
    release_date TEXT,
    plot TEXT,
    released BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    deleted_at TIMESTAMPTZ
)";

/// Render [`CREATE_TABLE_SQL`] for `table`.
pub fn create_table_sql(table: &str) -> String {
    CREATE_TABLE_SQL.replace("{table}", table)
}

/// Create the table if it does not exist yet.
pub async fn ensure_schema(conn: &impl GenericClient, table: &str) -> StoreResult<()> {
    validate_table(table)?;
    let sql = create_table_sql(table);
    tracing::debug!(target: "movies.sql", sql = %sql, "ensure schema");
    conn.execute(&sql, &[]).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_client::CountingClient;

    #[tokio::test]
    async fn bad_table_name_never_reaches_the_database() {
        let client = CountingClient::default();
        let err = ensure_schema(&client, "movies; DROP TABLE movies").await.unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(client.calls(), 0);

        let err = ensure_schema(&client, "movies").await.unwrap_err();
        assert!(err.is_storage());
        assert_eq!(client.calls(), 1);
    }

    #[test]
    fn renders_table_name() {
        let sql = create_table_sql("films");
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS films ("));
        assert!(sql.contains("deleted_at TIMESTAMPTZ\n"));
        assert!(!sql.contains("{table}"));
    }
}
