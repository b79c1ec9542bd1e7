use crate::error::BuilderError;
use crate::value::Value;

/// A type a builder can materialize.
///
/// The engine only needs to create an empty instance and assign copied fields to it;
/// models expose their own read accessors.
pub trait Model: Sized + 'static {
    /// A fresh instance with no fields set.
    fn empty() -> Self;

    /// Stores `value` under `name`.
    ///
    /// # Errors
    /// Implementations return [`BuilderError::UnknownProperty`] for names they do not
    /// carry and [`BuilderError::Type`] for values they cannot hold.
    fn assign(&mut self, name: &str, value: Value) -> Result<(), BuilderError>;
}

/// A general-purpose model: an ordered set of named values.
///
/// Only fields present in the builder at build time appear in a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Value of `name`, or `None` if the field was not set at build time.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(field, _)| field == name).map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in assignment order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Model for Record {
    fn empty() -> Self {
        Self::default()
    }

    fn assign(&mut self, name: &str, value: Value) -> Result<(), BuilderError> {
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_owned(), value)),
        }
        Ok(())
    }
}
