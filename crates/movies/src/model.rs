//! Movie record types.

use crate::error::DbResult;
use crate::patch::Patch;
use crate::row::{FromRow, RowExt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// Columns read back for every movie, in `SELECT` order.
pub const MOVIE_COLUMNS: &str =
    "id, name, genre, rating, release_date, plot, released, created_at, updated_at, deleted_at";

/// A stored movie row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub name: String,
    pub genre: String,
    pub rating: Option<f64>,
    pub release_date: Option<String>,
    pub plot: Option<String>,
    pub released: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Movie {
    /// Still visible to reads and writes.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

impl FromRow for Movie {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            name: row.try_get_column("name")?,
            genre: row.try_get_column("genre")?,
            rating: row.try_get_column("rating")?,
            release_date: row.try_get_column("release_date")?,
            plot: row.try_get_column("plot")?,
            released: row.try_get_column("released")?,
            created_at: row.try_get_column("created_at")?,
            updated_at: row.try_get_column("updated_at")?,
            deleted_at: row.try_get_column("deleted_at")?,
        })
    }
}

/// Input for creating or changing a movie.
///
/// Only fields that are set take part in an update; see
/// [`build_update`](crate::update::build_update).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePatch {
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub genre: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub rating: Patch<f64>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub release_date: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub plot: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub released: Patch<bool>,
}

impl MoviePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Patch::Value(name.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Patch::Value(genre.into());
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Patch::Value(rating);
        self
    }

    pub fn release_date(mut self, release_date: impl Into<String>) -> Self {
        self.release_date = Patch::Value(release_date.into());
        self
    }

    pub fn plot(mut self, plot: impl Into<String>) -> Self {
        self.plot = Patch::Value(plot.into());
        self
    }

    pub fn released(mut self, released: bool) -> Self {
        self.released = Patch::Value(released);
        self
    }

    /// No field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_unset()
            && self.genre.is_unset()
            && self.rating.is_unset()
            && self.release_date.is_unset()
            && self.plot.is_unset()
            && self.released.is_unset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_reads_camel_case_json() {
        let patch: MoviePatch = serde_json::from_str(
            r#"{"name": "Arrival", "releaseDate": "2016-11-11", "plot": null, "rating": 4.5}"#,
        )
        .unwrap();

        assert_eq!(patch.name, Patch::Value("Arrival".into()));
        assert_eq!(patch.release_date, Patch::Value("2016-11-11".into()));
        assert_eq!(patch.plot, Patch::Null);
        assert_eq!(patch.rating, Patch::Value(4.5));
        assert!(patch.genre.is_unset());
        assert!(patch.released.is_unset());
        assert!(!patch.is_empty());
    }

    #[test]
    fn empty_object_is_empty_patch() {
        let patch: MoviePatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
        assert_eq!(patch, MoviePatch::new());
    }

    #[test]
    fn movie_serializes_without_deleted_at_when_active() {
        let at = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let movie = Movie {
            id: 1,
            name: "Heat".into(),
            genre: "Crime".into(),
            rating: Some(4.0),
            release_date: None,
            plot: None,
            released: true,
            created_at: at,
            updated_at: at,
            deleted_at: None,
        };
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["releaseDate"], serde_json::Value::Null);
        assert_eq!(json["createdAt"], "2024-01-02T03:04:05Z");
        assert!(json.get("deletedAt").is_none());
        assert!(movie.is_active());
    }
}
