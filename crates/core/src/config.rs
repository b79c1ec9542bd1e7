//! Engine configuration and its layered loader.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Environment prefix for overrides, e.g. `METABUILDER__MODEL_REBIND=ignore`.
const ENV_PREFIX: &str = "METABUILDER";

/// Custom error type for config loading.
#[metabuilder_derive::builder_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// What a builder type does when its declaration binds a second, different model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebindPolicy {
    /// Fail the declaration with [`crate::BuilderError::ModelRebind`].
    #[default]
    Reject,
    /// Keep the first binding and log a warning.
    Ignore,
}

/// Knobs shared by every schema declared through a [`crate::Registry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub model_rebind: RebindPolicy,
}

/// Loads [`EngineConfig`] from an optional file, then overlays `METABUILDER__*`
/// environment variables.
///
/// Without a path, only defaults and the environment are used.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or malformed, or a value
/// does not match the expected shape.
pub fn load_config(path: Option<impl AsRef<Path>>) -> Result<EngineConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        let path = path.as_ref();
        info!("Loading builder config from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<EngineConfig>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
