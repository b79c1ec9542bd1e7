use crate::builder::Builder;
use crate::config::{EngineConfig, RebindPolicy};
use crate::error::BuilderError;
use crate::model::Model;
use crate::property::{PropertyDefinition, PropertyOptions};
use fxhash::FxHashMap;
use std::any::{TypeId, type_name};
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// A concrete builder type: its property declarations and how to wrap an instance.
pub trait BuilderType: Sized + 'static {
    /// Registers the model, properties and required names of this builder type.
    ///
    /// # Errors
    /// Returns the first declaration fault, e.g. a rejected model rebinding.
    fn declare(declaration: &mut Declaration) -> Result<(), BuilderError>;

    /// Wraps a fresh engine instance bound to this type's schema.
    fn from_builder(builder: Builder) -> Self;
}

/// The model type bound to a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelBinding {
    id: TypeId,
    name: &'static str,
}

impl ModelBinding {
    #[must_use]
    pub fn of<M: Model>() -> Self {
        Self { id: TypeId::of::<M>(), name: type_name::<M>() }
    }

    #[must_use]
    pub fn is<M: Model>(&self) -> bool {
        self.id == TypeId::of::<M>()
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Mutable declaration state for one builder type, sealed into a [`Schema`].
#[derive(Debug)]
pub struct Declaration {
    name: &'static str,
    policy: RebindPolicy,
    model: Option<ModelBinding>,
    properties: Vec<PropertyDefinition>,
    index: FxHashMap<String, usize>,
    /// Names marked through [`Declaration::required`], independent of property options.
    required: Vec<String>,
}

impl Declaration {
    fn new(name: &'static str, config: &EngineConfig) -> Self {
        Self {
            name,
            policy: config.model_rebind,
            model: None,
            properties: Vec::new(),
            index: FxHashMap::default(),
            required: Vec::new(),
        }
    }

    /// Binds the model type this builder type produces.
    ///
    /// The first binding wins; binding the same type again is a no-op.
    ///
    /// # Errors
    /// Returns [`BuilderError::ModelRebind`] when a different type is bound and the
    /// policy is [`RebindPolicy::Reject`].
    pub fn model<M: Model>(&mut self) -> Result<&mut Self, BuilderError> {
        let binding = ModelBinding::of::<M>();
        match self.model {
            None => self.model = Some(binding),
            Some(bound) if bound == binding => {},
            Some(bound) => match self.policy {
                RebindPolicy::Reject => {
                    return Err(BuilderError::ModelRebind {
                        message: format!("{} is already bound to {}", self.name, bound.name())
                            .into(),
                        context: Some(binding.name().into()),
                    });
                },
                RebindPolicy::Ignore => {
                    warn!(
                        builder = self.name,
                        bound = bound.name(),
                        ignored = binding.name(),
                        "Model already bound, ignoring rebinding"
                    );
                },
            },
        }
        Ok(self)
    }

    /// Declares (or re-declares) a property. A re-declared name keeps its position and
    /// takes the new rules, including `PropertyOptions::required`. Names passed to
    /// [`Declaration::required`] stay required across re-declarations.
    pub fn property(&mut self, name: impl Into<String>, options: PropertyOptions) -> &mut Self {
        let name = name.into();
        let definition = PropertyDefinition::new(name.clone(), options);
        match self.index.get(&name) {
            Some(&position) => self.properties[position] = definition,
            None => {
                self.index.insert(name, self.properties.len());
                self.properties.push(definition);
            },
        }
        self
    }

    /// Marks properties as required. Names may be declared before or after this call.
    pub fn required<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if !self.required.iter().any(|r| r == name) {
                self.required.push(name.to_owned());
            }
        }
        self
    }

    /// Seals the declaration.
    ///
    /// # Errors
    /// Returns [`BuilderError::UndeclaredRequired`] for the first required name that
    /// is not a declared property.
    pub fn finish(mut self) -> Result<Schema, BuilderError> {
        for name in &self.required {
            let Some(&position) = self.index.get(name) else {
                return Err(BuilderError::undeclared_required(name));
            };
            self.properties[position].mark_required();
        }

        // Required names are checked in declaration order at build time.
        let required = self
            .properties
            .iter()
            .filter(|p| p.is_required())
            .map(|p| p.name().to_owned())
            .collect::<Vec<_>>();

        debug!(
            builder = self.name,
            properties = self.properties.len(),
            required = required.len(),
            "Builder schema sealed"
        );

        Ok(Schema {
            name: self.name,
            model: self.model,
            properties: self.properties,
            index: self.index,
            required,
        })
    }
}

/// The sealed declarations of one builder type, shared by all its instances.
#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    model: Option<ModelBinding>,
    properties: Vec<PropertyDefinition>,
    index: FxHashMap<String, usize>,
    required: Vec<String>,
}

impl Schema {
    /// Declares and seals the schema of `B` without a registry.
    ///
    /// # Errors
    /// Returns the declaration error of `B`.
    pub fn of<B: BuilderType>(config: &EngineConfig) -> Result<Self, BuilderError> {
        Self::declare(type_name::<B>(), config, B::declare)
    }

    /// Declares and seals a schema from a closure.
    ///
    /// # Errors
    /// Returns the first error raised by `declare` or by sealing.
    pub fn declare(
        name: &'static str,
        config: &EngineConfig,
        declare: impl FnOnce(&mut Declaration) -> Result<(), BuilderError>,
    ) -> Result<Self, BuilderError> {
        let mut declaration = Declaration::new(name, config);
        declare(&mut declaration)?;
        declaration.finish()
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn model(&self) -> Option<ModelBinding> {
        self.model
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.index.get(name).map(|&position| &self.properties[position])
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyDefinition> {
        self.properties.iter()
    }

    /// Declared property names, in declaration order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(PropertyDefinition::name)
    }

    /// Required property names, in declaration order.
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }

    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.property(name).is_some_and(PropertyDefinition::is_required)
    }
}

/// A lazily declared schema for a single builder type, meant for a `static`.
///
/// The first call declares the type with the default [`EngineConfig`]; every later call
/// shares the same schema, or the same declaration error.
#[derive(Debug, Default)]
pub struct SchemaCell(OnceLock<Result<Arc<Schema>, BuilderError>>);

impl SchemaCell {
    #[must_use]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// A fresh, empty builder instance of `B` backed by the cached schema.
    ///
    /// A cell must only ever be used with one builder type.
    ///
    /// # Errors
    /// Returns the declaration error of `B`.
    pub fn builder<B: BuilderType>(&self) -> Result<B, BuilderError> {
        let schema = self
            .0
            .get_or_init(|| Schema::of::<B>(&EngineConfig::default()).map(Arc::new))
            .clone()?;
        Ok(B::from_builder(Builder::new(schema)))
    }
}

/// Schemas of every builder type declared so far, keyed by builder type.
#[derive(Debug, Default)]
pub struct Registry {
    config: EngineConfig,
    schemas: FxHashMap<TypeId, Arc<Schema>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config, schemas: FxHashMap::default() }
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The schema of `B`, declared on first use and cached afterwards.
    ///
    /// # Errors
    /// Returns the declaration error of `B`; nothing is cached in that case.
    pub fn schema<B: BuilderType>(&mut self) -> Result<Arc<Schema>, BuilderError> {
        let id = TypeId::of::<B>();
        if let Some(schema) = self.schemas.get(&id) {
            return Ok(Arc::clone(schema));
        }
        let schema = Arc::new(Schema::of::<B>(&self.config)?);
        self.schemas.insert(id, Arc::clone(&schema));
        Ok(schema)
    }

    /// A fresh, empty builder instance of `B`.
    ///
    /// # Errors
    /// Returns the declaration error of `B`.
    pub fn builder<B: BuilderType>(&mut self) -> Result<B, BuilderError> {
        let schema = self.schema::<B>()?;
        Ok(B::from_builder(Builder::new(schema)))
    }

    /// Declared property names of `B`, in declaration order.
    ///
    /// # Errors
    /// Returns the declaration error of `B`.
    pub fn property_names<B: BuilderType>(&mut self) -> Result<Vec<String>, BuilderError> {
        Ok(self.schema::<B>()?.property_names().map(str::to_owned).collect())
    }

    #[must_use]
    pub fn contains<B: BuilderType>(&self) -> bool {
        self.schemas.contains_key(&TypeId::of::<B>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
