use crate::config::EngineConfig;
use crate::error::BuilderError;
use crate::model::Model;
use crate::schema::{BuilderType, Schema};
use crate::value::Value;
use fxhash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// Where a builder instance stands relative to its required properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// No property holds a value yet.
    Declared,
    /// Some values are set, but at least one required property is missing or null.
    PartiallyFilled,
    /// Every required property holds a non-null value; `build` can succeed.
    RequiredSatisfied,
}

/// One mutable accumulation of property values, validated on every write.
///
/// Cloning a builder clones its values; the schema stays shared.
#[derive(Debug, Clone)]
pub struct Builder {
    schema: Arc<Schema>,
    values: FxHashMap<String, Value>,
}

impl Builder {
    /// An empty builder instance for `schema`.
    #[must_use]
    pub fn new(schema: Arc<Schema>) -> Self {
        Self { schema, values: FxHashMap::default() }
    }

    /// Declares `B` with the default configuration and returns an empty instance.
    ///
    /// Use a [`crate::Registry`] to declare each builder type once and share it.
    ///
    /// # Errors
    /// Returns the declaration error of `B`.
    pub fn of<B: BuilderType>() -> Result<B, BuilderError> {
        let schema = Schema::of::<B>(&EngineConfig::default())?;
        Ok(B::from_builder(Self::new(Arc::new(schema))))
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Current value of `name`; `None` if it was never set or has been cleared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Validates `value` and stores it under `name`.
    ///
    /// Checks run in a fixed order: required-null, type, allowed values, predicate.
    /// On failure the previous value is left untouched.
    ///
    /// # Errors
    /// * [`BuilderError::UnknownProperty`] if `name` was never declared.
    /// * [`BuilderError::RequiredField`] if `name` is required and `value` is null.
    /// * [`BuilderError::Type`], [`BuilderError::Option`], [`BuilderError::Validation`]
    ///   for the first violated rule.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), BuilderError> {
        let value = value.into();
        let property =
            self.schema.property(name).ok_or_else(|| BuilderError::unknown_property(name))?;

        let checked = if property.is_required() && value.is_null() {
            Err(BuilderError::required(name))
        } else {
            property.validate(&value)
        };
        if let Err(err) = checked {
            debug!(builder = self.schema.name(), property = name, %err, "Assignment rejected");
            return Err(err);
        }

        trace!(builder = self.schema.name(), property = name, %value, "Property assigned");
        self.values.insert(name.to_owned(), value);
        Ok(())
    }

    /// Forgets the value of `name`, returning it to "never set".
    ///
    /// # Errors
    /// * [`BuilderError::UnknownProperty`] if `name` was never declared.
    /// * [`BuilderError::RequiredField`] if `name` is required.
    pub fn clear(&mut self, name: &str) -> Result<(), BuilderError> {
        let property =
            self.schema.property(name).ok_or_else(|| BuilderError::unknown_property(name))?;
        if property.is_required() {
            return Err(BuilderError::required(name));
        }
        self.values.remove(name);
        Ok(())
    }

    /// Every property currently holding a value, in declaration order.
    pub fn current_values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .property_names()
            .filter_map(|name| self.values.get(name).map(|value| (name, value)))
    }

    /// Required properties that are unset or null, in declaration order.
    pub fn missing_required(&self) -> impl Iterator<Item = &str> {
        self.schema
            .required()
            .filter(|name| self.values.get(*name).is_none_or(Value::is_null))
    }

    #[must_use]
    pub fn state(&self) -> BuilderState {
        if self.missing_required().next().is_none() {
            BuilderState::RequiredSatisfied
        } else if self.values.is_empty() {
            BuilderState::Declared
        } else {
            BuilderState::PartiallyFilled
        }
    }

    /// Materializes a new `M` from a copy of the current values.
    ///
    /// The builder is left unchanged, so later mutations never reach instances that
    /// were already built.
    ///
    /// # Errors
    /// * [`BuilderError::RequiredField`] naming the first missing required property.
    /// * [`BuilderError::ModelNotBound`] or [`BuilderError::ModelMismatch`] when `M` is
    ///   not the model bound by the builder type.
    /// * Any error raised by [`Model::assign`].
    #[instrument(level = "debug", skip(self), fields(builder = self.schema.name()))]
    pub fn build<M: Model>(&self) -> Result<M, BuilderError> {
        if let Some(missing) = self.missing_required().next() {
            return Err(BuilderError::required(missing));
        }

        let Some(bound) = self.schema.model() else {
            return Err(BuilderError::ModelNotBound {
                message: format!("{} has no model", self.schema.name()).into(),
                context: None,
            });
        };
        if !bound.is::<M>() {
            return Err(BuilderError::ModelMismatch {
                message: format!("expected {}, got {}", bound.name(), std::any::type_name::<M>())
                    .into(),
                context: Some(self.schema.name().into()),
            });
        }

        let mut model = M::empty();
        for (name, value) in self.current_values() {
            model.assign(name, value.clone())?;
        }

        debug!(model = bound.name(), fields = self.values.len(), "Model built");
        Ok(model)
    }
}
