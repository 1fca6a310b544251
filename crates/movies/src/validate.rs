//! Field validation for movie input.
//!
//! Every rule is checked and all failures are reported together, so a caller
//! can show the whole list at once.

use crate::config::is_plain_identifier;
use crate::model::MoviePatch;
use crate::patch::Patch;
use serde::Serialize;
use std::fmt;

/// Inclusive bounds for `rating`.
pub const RATING_RANGE: std::ops::RangeInclusive<f64> = 0.0..=5.0;

/// A machine-friendly validation code.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationCode {
    Required,
    Empty,
    Range,
    Format,
}

impl ValidationCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Empty => "empty",
            Self::Range => "range",
            Self::Format => "format",
        }
    }
}

impl Serialize for ValidationCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub code: ValidationCode,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }
}

/// A collection of validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub items: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn push(&mut self, err: ValidationError) {
        self.items.push(err);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.items.iter()
    }

    /// Returns `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self { items: vec![err] }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{} ({}): {}", err.field, err.code.as_str(), err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Identifiers are server-assigned and always positive.
pub fn validate_id(id: i64) -> Result<(), ValidationErrors> {
    if id <= 0 {
        return Err(ValidationError::new("id", ValidationCode::Range, "must be a positive integer").into());
    }
    Ok(())
}

/// Parse a textual identifier, e.g. a path parameter.
pub fn parse_id(raw: &str) -> Result<i64, ValidationErrors> {
    let id = raw.trim().parse::<i64>().map_err(|_| {
        ValidationErrors::from(ValidationError::new(
            "id",
            ValidationCode::Format,
            format!("'{raw}' is not an integer"),
        ))
    })?;
    validate_id(id)?;
    Ok(id)
}

/// Table names are spliced into SQL text and must be plain identifiers.
pub fn validate_table(table: &str) -> Result<(), ValidationErrors> {
    if !is_plain_identifier(table) {
        return Err(ValidationError::new(
            "table",
            ValidationCode::Format,
            format!("'{table}' is not a plain SQL identifier"),
        )
        .into());
    }
    Ok(())
}

/// Rules for a patch applied to an existing movie.
pub fn validate_patch(patch: &MoviePatch) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::default();
    check_fields(patch, &mut errs);
    errs.into_result()
}

/// Rules for a new movie: the patch rules plus the NOT NULL text columns
/// must be present.
pub fn validate_new(patch: &MoviePatch) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::default();
    for (field, value) in [("name", &patch.name), ("genre", &patch.genre)] {
        if value.is_unset() {
            errs.push(ValidationError::new(field, ValidationCode::Required, "is required"));
        }
    }
    check_fields(patch, &mut errs);
    errs.into_result()
}

fn check_fields(patch: &MoviePatch, errs: &mut ValidationErrors) {
    for (field, value) in [("name", &patch.name), ("genre", &patch.genre)] {
        if value.is_null() {
            errs.push(ValidationError::new(field, ValidationCode::Required, "cannot be null"));
        }
    }
    if patch.released.is_null() {
        errs.push(ValidationError::new("released", ValidationCode::Required, "cannot be null"));
    }

    for (field, value) in [("name", &patch.name), ("genre", &patch.genre), ("plot", &patch.plot)] {
        if let Patch::Value(s) = value {
            if s.trim().is_empty() {
                errs.push(ValidationError::new(field, ValidationCode::Empty, "cannot be empty"));
            }
        }
    }

    if let Patch::Value(rating) = patch.rating {
        if !rating.is_finite() || !RATING_RANGE.contains(&rating) {
            errs.push(ValidationError::new(
                "rating",
                ValidationCode::Range,
                format!(
                    "must be between {} and {}",
                    RATING_RANGE.start(),
                    RATING_RANGE.end()
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(errs: &ValidationErrors) -> Vec<(&str, &str)> {
        errs.iter().map(|e| (e.field.as_str(), e.code.as_str())).collect()
    }

    #[test]
    fn parse_id_rejects_non_numeric_and_non_positive() {
        assert_eq!(parse_id("7").unwrap(), 7);
        assert_eq!(parse_id(" 12 ").unwrap(), 12);

        let errs = parse_id("abc").unwrap_err();
        assert_eq!(fields(&errs), vec![("id", "format")]);

        let errs = parse_id("0").unwrap_err();
        assert_eq!(fields(&errs), vec![("id", "range")]);

        assert!(parse_id("-3").is_err());
    }

    #[test]
    fn table_names_must_be_plain_identifiers() {
        assert!(validate_table("films_2024").is_ok());
        for bad in ["", "films; DROP TABLE films", "public.films", "\"films\""] {
            let errs = validate_table(bad).unwrap_err();
            assert_eq!(fields(&errs), vec![("table", "format")], "table {bad:?}");
        }
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        for ok in [0.0, 2.5, 5.0] {
            let patch = MoviePatch { rating: Patch::Value(ok), ..Default::default() };
            assert!(validate_patch(&patch).is_ok(), "rating {ok} should pass");
        }
        for bad in [-0.1, 5.01, f64::NAN, f64::INFINITY] {
            let patch = MoviePatch { rating: Patch::Value(bad), ..Default::default() };
            let errs = validate_patch(&patch).unwrap_err();
            assert_eq!(fields(&errs), vec![("rating", "range")]);
        }
    }

    #[test]
    fn empty_text_is_rejected_but_unset_is_not() {
        let patch = MoviePatch {
            name: Patch::Value(String::new()),
            plot: Patch::Value("  ".into()),
            ..Default::default()
        };
        let errs = validate_patch(&patch).unwrap_err();
        assert_eq!(fields(&errs), vec![("name", "empty"), ("plot", "empty")]);

        assert!(validate_patch(&MoviePatch::default()).is_ok());
    }

    #[test]
    fn not_null_columns_cannot_be_nulled() {
        let patch = MoviePatch {
            genre: Patch::Null,
            released: Patch::Null,
            plot: Patch::Null,
            ..Default::default()
        };
        let errs = validate_patch(&patch).unwrap_err();
        assert_eq!(fields(&errs), vec![("genre", "required"), ("released", "required")]);
    }

    #[test]
    fn new_movie_requires_name_and_genre() {
        let errs = validate_new(&MoviePatch::default()).unwrap_err();
        assert_eq!(fields(&errs), vec![("name", "required"), ("genre", "required")]);

        let patch = MoviePatch {
            name: Patch::Value("Heat".into()),
            genre: Patch::Value("Crime".into()),
            ..Default::default()
        };
        assert!(validate_new(&patch).is_ok());
    }

    #[test]
    fn errors_render_as_one_line() {
        let patch = MoviePatch {
            name: Patch::Value(String::new()),
            rating: Patch::Value(9.0),
            ..Default::default()
        };
        let errs = validate_patch(&patch).unwrap_err();
        assert_eq!(
            errs.to_string(),
            "name (empty): cannot be empty; rating (range): must be between 0 and 5"
        );
    }
}
