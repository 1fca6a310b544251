//! Partial-update statement builder.
//!
//! Turns a [`MoviePatch`] into the minimal `SET` clause for the fields it
//! sets, followed by the `updated_at` refresh and the active-row predicate:
//!
//! ```text
//! rating = ?, plot = ?, updated_at = NOW() WHERE id = ? AND deleted_at IS NULL
//! ```
//!
//! Column order is fixed (`name, genre, rating, release_date, plot, released`)
//! so the same set of fields always yields the same text. The id is always
//! the last bound value. Building does no I/O.

use crate::error::{StoreError, StoreResult};
use crate::model::MoviePatch;
use crate::patch::Patch;
use crate::sql::numbered_placeholders;
use crate::value::SqlValue;
use chrono::{DateTime, Utc};

/// Predicate every write and read applies: id match on an active row.
pub const ACTIVE_ROW_BY_ID: &str = "id = ? AND deleted_at IS NULL";

/// A built `SET ... WHERE ...` fragment and its bound values, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateClause {
    clause: String,
    values: Vec<SqlValue>,
}

impl UpdateClause {
    /// The fragment with `?` placeholders.
    pub fn clause(&self) -> &str {
        &self.clause
    }

    /// Values for each `?`, in placeholder order.
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Full PostgreSQL statement against `table`, with `$n` placeholders.
    pub fn to_statement(&self, table: &str) -> String {
        numbered_placeholders(&format!("UPDATE {} SET {}", table, self.clause))
    }
}

#[derive(Debug, Clone, Copy)]
enum UpdatedAt {
    Now,
    At(DateTime<Utc>),
}

/// Build the clause with a server-side `updated_at = NOW()`.
///
/// Returns [`StoreError::NoFieldsToUpdate`] when the patch sets nothing.
pub fn build_update(id: i64, patch: &MoviePatch) -> StoreResult<UpdateClause> {
    build(id, patch, UpdatedAt::Now)
}

/// Build the clause with `updated_at` bound to `now` instead of `NOW()`.
///
/// The timestamp is bound right before the id:
/// `name = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL`.
pub fn build_update_at(
    id: i64,
    patch: &MoviePatch,
    now: DateTime<Utc>,
) -> StoreResult<UpdateClause> {
    build(id, patch, UpdatedAt::At(now))
}

fn build(id: i64, patch: &MoviePatch, updated_at: UpdatedAt) -> StoreResult<UpdateClause> {
    let assignments = [
        assignment("name", &patch.name),
        assignment("genre", &patch.genre),
        assignment("rating", &patch.rating),
        assignment("release_date", &patch.release_date),
        assignment("plot", &patch.plot),
        assignment("released", &patch.released),
    ];

    let mut set_parts = Vec::with_capacity(assignments.len() + 1);
    let mut values = Vec::with_capacity(assignments.len() + 2);
    for (column, value) in assignments.into_iter().flatten() {
        set_parts.push(format!("{} = ?", column));
        values.push(value);
    }

    if values.is_empty() {
        return Err(StoreError::NoFieldsToUpdate);
    }

    match updated_at {
        UpdatedAt::Now => set_parts.push("updated_at = NOW()".to_string()),
        UpdatedAt::At(now) => {
            set_parts.push("updated_at = ?".to_string());
            values.push(SqlValue::Timestamp(now));
        }
    }
    values.push(SqlValue::Int(id));

    Ok(UpdateClause {
        clause: format!("{} WHERE {}", set_parts.join(", "), ACTIVE_ROW_BY_ID),
        values,
    })
}

fn assignment<T>(column: &'static str, field: &Patch<T>) -> Option<(&'static str, SqlValue)>
where
    T: Clone + Into<SqlValue>,
{
    match field {
        Patch::Unset => None,
        Patch::Null => Some((column, SqlValue::Null)),
        Patch::Value(v) => Some((column, v.clone().into())),
    }
}
