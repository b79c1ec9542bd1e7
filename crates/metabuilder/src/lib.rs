//! Facade crate for validated object builders.
//! Re-exports the builder engine and the code generation macros.
//! Keep this crate thin: generated code refers to `::metabuilder::*`, so everything it
//! needs must be reachable from the crate root.
//!
//! ## Usage
//! - Annotate a struct with [`model`] to get a typed model and its validating builder.
//! - Use [`Registry`] to declare each builder type once and hand out instances.
//! - Drop down to [`Builder`] for property names only known at runtime.
//!
//! ```rust
//! use metabuilder::prelude::*;
//!
//! #[model]
//! #[derive(Clone)]
//! pub struct Person {
//!     #[property(required)]
//!     name: String,
//!     age: i64,
//!     #[property(one_of = ["doctor", "musician"])]
//!     job: String,
//! }
//!
//! # fn main() -> metabuilder::Result<()> {
//! let mut builder = Person::builder()?;
//! builder.set_name("pepe")?;
//! builder.set_age(21)?;
//! assert!(builder.set_job("verdulero").is_err());
//!
//! let person = builder.build()?;
//! assert_eq!(person.name().map(String::as_str), Some("pepe"));
//! assert_eq!(person.job(), None);
//! # Ok(())
//! # }
//! ```

pub use metabuilder_core::config;
pub use metabuilder_core::{
    Builder, BuilderError, BuilderErrorExt, BuilderState, BuilderType, Declaration,
    EngineConfig, Kind, Model, ModelBinding, Predicate, PropertyDefinition, PropertyOptions,
    PropertyValue, RebindPolicy, Record, Registry, Result, Schema, SchemaCell, Value,
    load_config,
};
pub use metabuilder_derive::{builder_error, model};

/// Everything needed to declare and use builders.
pub mod prelude {
    pub use crate::{
        Builder, BuilderError, BuilderErrorExt, BuilderType, Kind, Model, PropertyOptions,
        Record, Registry, Value, model,
    };
}
