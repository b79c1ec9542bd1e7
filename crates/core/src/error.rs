//! # Builder Errors
//!
//! This module defines the [`BuilderError`] enum and [`Result`] type used throughout
//! the engine for reporting declaration, validation and build failures.

use std::borrow::Cow;
use std::fmt::Display;

/// Every failure the engine reports to callers.
///
/// The four validation kinds (`Type`, `Option`, `Validation`, `RequiredField`) carry the
/// offending property name, available through [`BuilderError::property`].
#[metabuilder_derive::builder_error]
#[derive(Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// The value does not satisfy the declared type constraint.
    #[error("Type error on `{property}`{}: {message}", format_context(.context))]
    Type {
        property: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The value is not in the declared set of allowed values.
    #[error("Option error on `{property}`{}: {message}", format_context(.context))]
    Option {
        property: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The value was rejected by the declared predicate.
    #[error("Validation error on `{property}`{}: {message}", format_context(.context))]
    Validation {
        property: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// A required property is null, cleared, or missing at build time.
    #[error("Required field `{property}`{}: {message}", format_context(.context))]
    RequiredField {
        property: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The property was never declared on this builder type.
    #[error("Unknown property `{property}`{}", format_context(.context))]
    UnknownProperty { property: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A name was marked required without being declared as a property.
    #[error("Required property `{property}` is not declared{}", format_context(.context))]
    UndeclaredRequired { property: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The builder type tried to bind a second, different model type.
    #[error("Model rebinding{}: {message}", format_context(.context))]
    ModelRebind { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// `build` was called on a builder type that never bound a model.
    #[error("Model not bound{}: {message}", format_context(.context))]
    ModelNotBound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// `build` asked for a model type other than the bound one.
    #[error("Model mismatch{}: {message}", format_context(.context))]
    ModelMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal builder error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl BuilderError {
    #[must_use]
    pub fn type_mismatch(property: &str, expected: impl Display) -> Self {
        Self::Type {
            property: owned(property),
            message: format!("Should be a {expected}").into(),
            context: None,
        }
    }

    #[must_use]
    pub fn not_one_of(property: &str, allowed: &[impl Display]) -> Self {
        let allowed = allowed.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        Self::Option {
            property: owned(property),
            message: format!("Should be one of {allowed}").into(),
            context: None,
        }
    }

    #[must_use]
    pub fn rejected(property: &str) -> Self {
        Self::Validation {
            property: owned(property),
            message: "The value did not pass the validations".into(),
            context: None,
        }
    }

    #[must_use]
    pub fn required(property: &str) -> Self {
        Self::RequiredField {
            property: owned(property),
            message: "This field is required".into(),
            context: None,
        }
    }

    #[must_use]
    pub fn unknown_property(property: &str) -> Self {
        Self::UnknownProperty { property: owned(property), context: None }
    }

    #[must_use]
    pub fn undeclared_required(property: &str) -> Self {
        Self::UndeclaredRequired { property: owned(property), context: None }
    }

    /// `true` for the four kinds raised while validating values.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Type { .. }
                | Self::Option { .. }
                | Self::Validation { .. }
                | Self::RequiredField { .. }
        )
    }
}

fn owned(property: &str) -> Cow<'static, str> {
    Cow::Owned(property.to_owned())
}
