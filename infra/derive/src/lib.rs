#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the builder engine.
//! This crate turns plain struct and enum declarations into validated builders and
//! builder-aware error types.
//!
//! ## Usage
//! Consumers normally reach these through the `metabuilder` facade:
//! ```toml
//! [dependencies]
//! metabuilder = { path = "../crates/metabuilder" }
//! ```
//!
//! Generated code refers to `::metabuilder` paths, so the facade must be a dependency
//! of any crate using [`macro@model`]. Examples are `ignore`d here for that reason.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Attribute macro that declares a model together with its validating builder.
///
/// Every named field becomes a declared property, in field order. The field type
/// supplies the type constraint; `#[property(...)]` adds the rest.
///
/// # Field options
///
/// * `required` (or `required = true`) - the property must hold a non-null value
///   before `build` succeeds and may never be cleared.
/// * `one_of = [..]` - the value must equal one of the listed values.
/// * `validates = expr` - a predicate `Fn(&FieldType) -> bool`.
///
/// # Arguments
///
/// * `builder = Name` - overrides the generated builder name (default `{Struct}Builder`).
///
/// # Generated Items
///
/// * The struct itself, with every field stored as an `Option` and a read accessor
///   `fn field(&self) -> Option<&T>`.
/// * `impl metabuilder::Model` and a `Struct::builder()` shortcut.
/// * The builder struct with `new()`, `field()`, `set_field(..)`, `clear_field()`,
///   `build()`, and `Deref<Target = metabuilder::Builder>` for the dynamic API.
///
/// # Errors
/// Emits a compile-time error for generic structs, tuple structs, unknown options,
/// and fields named `new`, `build` or `builder`.
///
/// # Example
///
/// ```rust,ignore
/// use metabuilder::prelude::*;
///
/// #[model]
/// #[derive(Clone, PartialEq)]
/// pub struct Person {
///     #[property(required)]
///     name: String,
///     age: i64,
///     #[property(one_of = ["doctor", "musician"])]
///     job: String,
/// }
///
/// let mut builder = Person::builder()?;
/// builder.set_name("pepe")?;
/// builder.set_age(21)?;
/// let person = builder.build()?;
/// assert_eq!(person.name().map(String::as_str), Some("pepe"));
/// ```
#[proc_macro_attribute]
pub fn model(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::model::expand_model(args.into(), input).into()
}

/// A high-level attribute macro for defining builder error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Type Aliasing**: Creates a `Result<T>` alias for the enum in the same module.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Property Lookup**: Generates `fn property(&self) -> Option<&str>` when any
///   variant carries a `property` field.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a source field.
/// * **Internal Fallback**: `From<&str>` and `From<String>` when an `Internal` variant exists.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. `context` fields must be `Option<Cow<'static, str>>`.
/// 3. Variants wrapping a source error must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use metabuilder_derive::builder_error;
/// use std::borrow::Cow;
///
/// #[builder_error]
/// pub enum SchemaError {
///     #[error("Type error on `{property}`{}: {message}", format_context(.context))]
///     Type {
///         property: Cow<'static, str>,
///         message: Cow<'static, str>,
///         context: Option<Cow<'static, str>>,
///     },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn builder_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
