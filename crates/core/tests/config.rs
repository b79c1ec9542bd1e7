use metabuilder_core::config::ConfigError;
use metabuilder_core::{EngineConfig, RebindPolicy, load_config};
use std::io::Write;

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn defaults_reject_rebinding() {
    assert_eq!(EngineConfig::default().model_rebind, RebindPolicy::Reject);
}

#[test]
fn policy_deserializes_from_snake_case() {
    let config: EngineConfig =
        serde_json::from_str(r#"{ "model_rebind": "ignore" }"#).expect("valid config");
    assert_eq!(config.model_rebind, RebindPolicy::Ignore);

    let empty: EngineConfig = serde_json::from_str("{}").expect("all fields default");
    assert_eq!(empty, EngineConfig::default());

    assert!(serde_json::from_str::<EngineConfig>(r#"{ "model_rebind": "panic" }"#).is_err());
}

#[test]
fn loads_policy_from_toml_file() {
    init_logging();
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("temp file");
    writeln!(file, "model_rebind = \"ignore\"").expect("write config");

    let config = load_config(Some(file.path())).expect("config loads");

    assert_eq!(config.model_rebind, RebindPolicy::Ignore);
}

#[test]
fn missing_file_is_an_error() {
    init_logging();
    let dir = tempfile::tempdir().expect("temp dir");

    let err = load_config(Some(dir.path().join("metabuilder.toml"))).unwrap_err();

    assert!(matches!(err, ConfigError::Config { .. }));
    assert!(err.to_string().starts_with("Config error (Failed to build config)"), "{err}");
}

#[test]
fn malformed_policy_is_an_error() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("temp file");
    writeln!(file, "model_rebind = \"sometimes\"").expect("write config");

    let err = load_config(Some(file.path())).unwrap_err();

    assert!(err.to_string().contains("Failed to deserialize config"), "{err}");
}
