use crate::error::BuilderError;
use crate::value::{Kind, PropertyValue, Value};
use std::fmt;
use std::sync::Arc;

/// A caller-supplied check run against every candidate value.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Whether a value converts into the Rust type a property was declared with.
type Conversion = fn(&Value) -> bool;

fn converts_to<T: PropertyValue>(value: &Value) -> bool {
    T::from_value(value).is_some()
}

/// Validation rules for one property, collected before declaration.
///
/// Mirrors the recognized option keys: `type`, `one_of`, `validates` and `required`.
#[derive(Clone, Default)]
pub struct PropertyOptions {
    kind: Option<Kind>,
    converts: Option<Conversion>,
    one_of: Option<Vec<Value>>,
    validates: Option<Predicate>,
    required: bool,
}

impl PropertyOptions {
    /// Options with no constraints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options constrained to the Rust type `T`: the value must have the kind implied
    /// by `T` and convert into it, so an out-of-range `u8` or a list with elements of
    /// the wrong type fails the type check.
    #[must_use]
    pub fn for_type<T: PropertyValue>() -> Self {
        Self { kind: T::KIND, converts: Some(converts_to::<T> as Conversion), ..Self::default() }
    }

    /// Sets the type constraint.
    #[must_use]
    pub const fn kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restricts the property to a discrete set of values.
    #[must_use]
    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.one_of = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a predicate over the raw [`Value`].
    #[must_use]
    pub fn validates(mut self, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.validates = Some(Arc::new(predicate));
        self
    }

    /// Adds a predicate over the converted value. Values that do not convert to `T`
    /// fail the predicate.
    #[must_use]
    pub fn validates_as<T: PropertyValue>(
        self,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.validates(move |value| T::from_value(value).is_some_and(|v| predicate(&v)))
    }

    /// Marks the property as required at declaration time.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

impl fmt::Debug for PropertyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyOptions")
            .field("kind", &self.kind)
            .field("converts", &self.converts.is_some())
            .field("one_of", &self.one_of)
            .field("validates", &self.validates.is_some())
            .field("required", &self.required)
            .finish()
    }
}

/// A declared property: its name and the rules every assigned value must satisfy.
#[derive(Clone)]
pub struct PropertyDefinition {
    name: String,
    kind: Option<Kind>,
    converts: Option<Conversion>,
    one_of: Option<Vec<Value>>,
    validates: Option<Predicate>,
    required: bool,
}

impl PropertyDefinition {
    pub(crate) fn new(name: String, options: PropertyOptions) -> Self {
        let PropertyOptions { kind, converts, one_of, validates, required } = options;
        Self { name, kind, converts, one_of, validates, required }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> Option<Kind> {
        self.kind
    }

    #[must_use]
    pub fn allowed_values(&self) -> Option<&[Value]> {
        self.one_of.as_deref()
    }

    #[must_use]
    pub const fn has_predicate(&self) -> bool {
        self.validates.is_some()
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    pub(crate) const fn mark_required(&mut self) {
        self.required = true;
    }

    /// Checks `value` against the declared rules: type, then allowed values, then
    /// predicate. Stops at the first failure.
    ///
    /// # Errors
    /// Returns [`BuilderError::Type`], [`BuilderError::Option`] or
    /// [`BuilderError::Validation`] for the first violated rule.
    pub fn validate(&self, value: &Value) -> Result<(), BuilderError> {
        if let Some(kind) = self.kind
            && !kind.admits(value)
        {
            return Err(BuilderError::type_mismatch(&self.name, kind));
        }
        if let Some(converts) = self.converts
            && !converts(value)
        {
            return Err(match self.kind {
                Some(kind) => BuilderError::type_mismatch(&self.name, kind),
                None => BuilderError::type_mismatch(&self.name, "value"),
            });
        }
        if let Some(allowed) = &self.one_of
            && !allowed.contains(value)
        {
            return Err(BuilderError::not_one_of(&self.name, allowed.as_slice()));
        }
        if let Some(predicate) = &self.validates
            && !predicate(value)
        {
            return Err(BuilderError::rejected(&self.name));
        }
        Ok(())
    }
}

impl fmt::Debug for PropertyDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDefinition")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("converts", &self.converts.is_some())
            .field("one_of", &self.one_of)
            .field("validates", &self.validates.is_some())
            .field("required", &self.required)
            .finish()
    }
}
