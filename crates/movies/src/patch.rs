//! Tri-state field values for partial updates.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A patch field: not mentioned, explicitly null, or set to a value.
///
/// `Value(String::new())` is a real assignment and is never confused with
/// `Unset`.
///
/// With serde, put `#[serde(default, skip_serializing_if = "Patch::is_unset")]`
/// on the field so that a missing key maps to `Unset`:
///
/// | JSON            | `Patch`      |
/// |-----------------|--------------|
/// | key absent      | `Unset`      |
/// | `null`          | `Null`       |
/// | any other value | `Value(..)`  |
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Patch<T> {
    #[default]
    Unset,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// `true` for `Null` and `Value`.
    pub fn is_set(&self) -> bool {
        !self.is_unset()
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Self::Unset => Patch::Unset,
            Self::Null => Patch::Null,
            Self::Value(v) => Patch::Value(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Unset => Patch::Unset,
            Self::Null => Patch::Null,
            Self::Value(v) => Patch::Value(f(v)),
        }
    }

    /// `None` becomes `Null`, never `Unset`.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Null,
        }
    }

    /// The value a nullable column receives: `Unset` and `Null` both give `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset | Self::Null => None,
        }
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from_option)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Value(v) => serializer.serialize_some(v),
            Self::Unset | Self::Null => serializer.serialize_none(),
        }
    }
}
