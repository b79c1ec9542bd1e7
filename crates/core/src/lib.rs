//! # Builder Engine
//!
//! A reusable engine for declaring builder types (named properties with validation
//! rules) and accumulating values into builder instances until a model can be built.
//!
//! ## Architecture
//!
//! 1.  **Registry ([`Schema`], [`Registry`]):** property metadata per builder type,
//!     declared once through a [`Declaration`] and shared by all instances.
//! 2.  **Engine ([`Builder`]):** validates every write (required-null, type, allowed
//!     values, predicate, in that order) and copies the accumulated values into a fresh
//!     [`Model`] on `build`.
//!
//! Typed builders are usually generated with `#[metabuilder::model]`; this crate is the
//! dynamic layer underneath.
//!
//! ## Example
//!
//! ```rust
//! use metabuilder_core::{Builder, BuilderError, Declaration, Kind, PropertyOptions, Record};
//! use metabuilder_core::{BuilderType, Registry};
//!
//! #[derive(Debug)]
//! struct PersonBuilder(Builder);
//!
//! impl BuilderType for PersonBuilder {
//!     fn declare(d: &mut Declaration) -> Result<(), BuilderError> {
//!         d.model::<Record>()?
//!             .property("name", PropertyOptions::new())
//!             .property("age", PropertyOptions::new().kind(Kind::Integer))
//!             .required(["name"]);
//!         Ok(())
//!     }
//!
//!     fn from_builder(builder: Builder) -> Self {
//!         Self(builder)
//!     }
//! }
//!
//! # fn main() -> Result<(), BuilderError> {
//! let mut registry = Registry::new();
//! let PersonBuilder(mut builder) = registry.builder::<PersonBuilder>()?;
//!
//! builder.set("name", "pepe")?;
//! assert!(builder.set("age", "fail").is_err());
//! builder.set("age", 21)?;
//!
//! let person: Record = builder.build()?;
//! assert_eq!(person.get("age").and_then(|v| v.as_i64()), Some(21));
//! # Ok(())
//! # }
//! ```

mod builder;
pub mod config;
mod error;
mod model;
mod property;
mod schema;
mod value;

pub use builder::{Builder, BuilderState};
pub use config::{EngineConfig, RebindPolicy, load_config};
pub use error::{BuilderError, BuilderErrorExt, Result};
pub use model::{Model, Record};
pub use property::{Predicate, PropertyDefinition, PropertyOptions};
pub use schema::{BuilderType, Declaration, ModelBinding, Registry, Schema, SchemaCell};
pub use value::{Kind, PropertyValue, Value};
