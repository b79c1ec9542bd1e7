//! Dynamic values accumulated by builders and the type constraints checked against them.

use crate::error::BuilderError;
use std::fmt;

/// A value held by a builder property.
///
/// [`Value::Null`] is the explicit null marker. It is distinct from a property that was
/// never set, which simply has no value at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
}

/// Type constraint for a property ("is an instance of").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Integer,
    Float,
    /// Either [`Kind::Integer`] or [`Kind::Float`].
    Number,
    String,
    List,
}

impl Kind {
    /// Returns `true` if `value` satisfies this constraint. `Null` satisfies none.
    #[must_use]
    pub const fn admits(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Bool, Value::Bool(_))
                | (Self::Integer | Self::Number, Value::Integer(_))
                | (Self::Float | Self::Number, Value::Float(_))
                | (Self::String, Value::String(_))
                | (Self::List, Value::List(_))
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "Bool",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Number => "Number",
            Self::String => "String",
            Self::List => "List",
        };
        f.write_str(name)
    }
}

impl Value {
    /// The kind of this value, or `None` for [`Value::Null`].
    #[must_use]
    pub const fn kind(&self) -> Option<Kind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(Kind::Bool),
            Self::Integer(_) => Some(Kind::Integer),
            Self::Float(_) => Some(Kind::Float),
            Self::String(_) => Some(Kind::String),
            Self::List(_) => Some(Kind::List),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the value; integers are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
        }
    }
}

// --- Conversions ---

macro_rules! integer_conversions {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Self::Integer(i64::from(value))
            }
        }

        impl PropertyValue for $ty {
            const KIND: Option<Kind> = Some(Kind::Integer);

            fn from_value(value: &Value) -> Option<Self> {
                value.as_i64().and_then(|i| <$ty>::try_from(i).ok())
            }
        }
    )*};
}

integer_conversions!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A Rust type that can be stored in a property and read back out of a [`Value`].
pub trait PropertyValue: Sized + Into<Value> {
    /// Type constraint implied by the Rust type; `None` accepts any value.
    const KIND: Option<Kind>;

    /// Converts a stored value back, or `None` if it has the wrong shape.
    fn from_value(value: &Value) -> Option<Self>;

    /// Like [`PropertyValue::from_value`], reporting a type error for `property`.
    ///
    /// # Errors
    /// Returns [`BuilderError::Type`] when the value cannot be converted.
    fn extract(property: &str, value: &Value) -> Result<Self, BuilderError> {
        Self::from_value(value).ok_or_else(|| match Self::KIND {
            Some(kind) => BuilderError::type_mismatch(property, kind),
            None => BuilderError::type_mismatch(property, "value"),
        })
    }
}

impl PropertyValue for Value {
    const KIND: Option<Kind> = None;

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl PropertyValue for bool {
    const KIND: Option<Kind> = Some(Kind::Bool);

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl PropertyValue for f64 {
    const KIND: Option<Kind> = Some(Kind::Number);

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl PropertyValue for String {
    const KIND: Option<Kind> = Some(Kind::String);

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl<T: PropertyValue> PropertyValue for Vec<T> {
    const KIND: Option<Kind> = Some(Kind::List);

    fn from_value(value: &Value) -> Option<Self> {
        value.as_list()?.iter().map(T::from_value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_satisfies_no_kind() {
        for kind in [Kind::Bool, Kind::Integer, Kind::Float, Kind::Number, Kind::String, Kind::List]
        {
            assert!(!kind.admits(&Value::Null), "{kind} must reject null");
        }
    }

    #[test]
    fn number_admits_integers_and_floats() {
        assert!(Kind::Number.admits(&Value::from(21)));
        assert!(Kind::Number.admits(&Value::from(1.5)));
        assert!(!Kind::Integer.admits(&Value::from(1.5)));
        assert!(!Kind::Integer.admits(&Value::from("21")));
    }

    #[test]
    fn option_none_becomes_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("pepe")), Value::String("pepe".to_owned()));
    }

    #[test]
    fn narrow_integers_reject_out_of_range() {
        assert_eq!(u8::from_value(&Value::Integer(300)), None);
        assert_eq!(i32::from_value(&Value::Integer(21)), Some(21));
    }

    #[test]
    fn lists_convert_elementwise() {
        let value = Value::from(vec!["a", "b"]);
        assert_eq!(value.to_string(), "[a, b]");
        assert_eq!(
            Vec::<String>::from_value(&value),
            Some(vec!["a".to_owned(), "b".to_owned()])
        );
        assert_eq!(Vec::<i64>::from_value(&value), None);
    }
}
