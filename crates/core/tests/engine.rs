pub mod fixtures;

use fixtures::person_builder;
use metabuilder_core::{
    Builder, BuilderError, BuilderState, EngineConfig, PropertyOptions, Record, Schema, Value,
};
use std::sync::Arc;

#[test]
fn type_constraint_rejects_other_types() {
    let mut builder = person_builder();
    builder.set_name("pepe").expect("name accepts anything");
    builder.set_age(21).expect("21 is an integer");
    assert_eq!(builder.age(), Some(&Value::Integer(21)));

    let err = builder.set_age("fail").unwrap_err();

    assert!(matches!(err, BuilderError::Type { .. }), "unexpected error: {err}");
    assert_eq!(err.property(), Some("age"));
    assert_eq!(builder.age(), Some(&Value::Integer(21)), "previous value must survive");
}

#[test]
fn allowed_values_reject_outsiders() {
    let mut builder = person_builder();
    builder.set_job("doctor").expect("doctor is allowed");
    assert_eq!(builder.job(), Some(&Value::from("doctor")));

    let err = builder.set_job("verdulero").unwrap_err();

    assert!(matches!(err, BuilderError::Option { .. }), "unexpected error: {err}");
    assert_eq!(builder.job(), Some(&Value::from("doctor")));
}

#[test]
fn custom_predicate_is_applied() {
    let mut builder = person_builder();
    builder.set_height("6\"1'").expect("six feet one is valid");
    assert_eq!(builder.height(), Some(&Value::from("6\"1'")));

    let err = builder.set_height("6\"13'").unwrap_err();

    assert!(matches!(err, BuilderError::Validation { .. }), "unexpected error: {err}");
    assert_eq!(err.to_string(), "Validation error on `height`: The value did not pass the validations");
}

#[test]
fn build_fails_without_required_property() {
    let builder = person_builder();
    assert_eq!(builder.name(), None);

    let err = builder.build().unwrap_err();

    assert!(matches!(err, BuilderError::RequiredField { .. }));
    assert_eq!(err.property(), Some("name"));
}

#[test]
fn required_property_cannot_be_nulled() {
    let mut builder = person_builder();
    builder.set_name("pepe").expect("name accepts anything");
    assert_eq!(builder.name(), Some(&Value::from("pepe")));

    let err = builder.set_name(Value::Null).unwrap_err();

    assert!(matches!(err, BuilderError::RequiredField { .. }));
    assert_eq!(builder.name(), Some(&Value::from("pepe")));
}

#[test]
fn required_property_is_guarded_before_first_build() {
    let mut builder = person_builder();

    assert!(matches!(builder.set_name(None::<String>), Err(BuilderError::RequiredField { .. })));
    assert_eq!(builder.engine().state(), BuilderState::Declared);
}

#[test]
fn build_returns_record_with_all_values() {
    let mut builder = person_builder();
    builder.set_name("pepe").expect("name");
    builder.set_age(21).expect("age");
    builder.set_job("musician").expect("job");

    let person = builder.build().expect("all required values are present");

    assert_eq!(person.get("name"), Some(&Value::from("pepe")));
    assert_eq!(person.get("age"), Some(&Value::from(21)));
    assert_eq!(person.get("job"), Some(&Value::from("musician")));
    assert!(!person.contains("height"), "unset optional fields are omitted");
    assert_eq!(person.names().collect::<Vec<_>>(), ["name", "age", "job"]);
}

#[test]
fn builds_are_independent() {
    let mut builder = person_builder();
    builder.set_name("pepe").expect("name");
    builder.set_age(21).expect("age");
    builder.set_job("musician").expect("job");

    let first = builder.build().expect("first build");

    builder.set_name("juan").expect("name");
    builder.set_age(25).expect("age");

    let second = builder.build().expect("second build");

    assert_eq!(first.get("name"), Some(&Value::from("pepe")));
    assert_eq!(first.get("age"), Some(&Value::from(21)));
    assert_eq!(first.get("job"), Some(&Value::from("musician")));

    assert_eq!(second.get("name"), Some(&Value::from("juan")));
    assert_eq!(second.get("age"), Some(&Value::from(25)));
    assert_eq!(second.get("job"), Some(&Value::from("musician")));
}

#[test]
fn null_fails_declared_constraints() {
    let mut builder = person_builder();
    builder.set_name("pepe").expect("name");

    // `job` has no type constraint, but null is not one of its allowed values.
    assert!(matches!(builder.set_job(Value::Null), Err(BuilderError::Option { .. })));
    // `age` is typed, so null fails the type check.
    assert!(matches!(builder.set_age(Value::Null), Err(BuilderError::Type { .. })));

    let person: Record = builder.build().expect("build");
    assert_eq!(person.len(), 1);
}

#[test]
fn explicit_null_differs_from_unset() {
    let schema = Schema::declare("profile", &EngineConfig::default(), |d| {
        d.model::<Record>()?
            .property("nickname", PropertyOptions::new())
            .property("bio", PropertyOptions::new());
        Ok(())
    })
    .expect("profile schema");
    let mut builder = Builder::new(Arc::new(schema));

    builder.set("nickname", Value::Null).expect("untyped optional accepts null");
    let profile: Record = builder.build().expect("nothing is required");

    assert_eq!(profile.get("nickname"), Some(&Value::Null));
    assert!(!profile.contains("bio"));
}

#[test]
fn unknown_property_is_rejected() {
    let mut builder = person_builder();
    let mut engine = builder.engine().clone();

    let err = engine.set("nickname", "pepito").unwrap_err();

    assert!(matches!(err, BuilderError::UnknownProperty { .. }));
    assert!(builder.set_name("pepe").is_ok());
}

#[test]
fn build_rejects_other_model_types() {
    #[derive(Debug, Default)]
    struct Other;

    impl metabuilder_core::Model for Other {
        fn empty() -> Self {
            Self
        }

        fn assign(&mut self, name: &str, _value: Value) -> Result<(), BuilderError> {
            Err(BuilderError::unknown_property(name))
        }
    }

    let mut builder = person_builder();
    builder.set_name("pepe").expect("name");

    let err = builder.engine().build::<Other>().unwrap_err();

    assert!(matches!(err, BuilderError::ModelMismatch { .. }));
}
