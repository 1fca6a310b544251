//! Bound parameter values.
//!
//! Builders collect `SqlValue`s instead of `Box<dyn ToSql>` so the bound list
//! can be compared and printed in tests while still going straight to
//! tokio-postgres at execution time.

use bytes::BytesMut;
use chrono::{DateTime, Utc};
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type};

/// A single bound parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    /// Borrow as a tokio-postgres parameter.
    pub fn as_param(&self) -> &(dyn ToSql + Sync) {
        self
    }
}

/// Collect parameter references for `GenericClient` calls.
pub fn as_params(values: &[SqlValue]) -> Vec<&(dyn ToSql + Sync)> {
    values.iter().map(SqlValue::as_param).collect()
}

impl ToSql for SqlValue {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        // each arm goes through the checked path so a variant bound to the
        // wrong column type fails instead of writing foreign bytes
        match self {
            Self::Null => Ok(IsNull::Yes),
            Self::Bool(v) => v.to_sql_checked(ty, out),
            Self::Int(v) => v.to_sql_checked(ty, out),
            Self::Float(v) => v.to_sql_checked(ty, out),
            Self::Text(v) => v.to_sql_checked(ty, out),
            Self::Timestamp(v) => v.to_sql_checked(ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        <bool as ToSql>::accepts(ty)
            || <i64 as ToSql>::accepts(ty)
            || <f64 as ToSql>::accepts(ty)
            || <String as ToSql>::accepts(ty)
            || <DateTime<Utc> as ToSql>::accepts(ty)
    }

    tokio_postgres::types::to_sql_checked!();
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_column_type_of_the_table() {
        for ty in [Type::BOOL, Type::INT8, Type::FLOAT8, Type::TEXT, Type::TIMESTAMPTZ] {
            assert!(<SqlValue as ToSql>::accepts(&ty), "{ty} should be accepted");
        }
        assert!(!<SqlValue as ToSql>::accepts(&Type::BYTEA));
    }

    #[test]
    fn encodes_through_the_inner_type() {
        let mut buf = BytesMut::new();
        let is_null = SqlValue::Int(7).to_sql_checked(&Type::INT8, &mut buf).unwrap();
        assert!(matches!(is_null, IsNull::No));
        assert_eq!(&buf[..], &7i64.to_be_bytes()[..]);

        let mut buf = BytesMut::new();
        let is_null = SqlValue::Null.to_sql_checked(&Type::TEXT, &mut buf).unwrap();
        assert!(matches!(is_null, IsNull::Yes));
        assert!(buf.is_empty());
    }

    #[test]
    fn variant_bound_to_wrong_type_is_rejected() {
        let mut buf = BytesMut::new();
        assert!(SqlValue::Text("x".into()).to_sql_checked(&Type::FLOAT8, &mut buf).is_err());
    }

    #[test]
    fn option_maps_none_to_null() {
        assert_eq!(SqlValue::from(None::<f64>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some("x")), SqlValue::Text("x".into()));
    }
}
