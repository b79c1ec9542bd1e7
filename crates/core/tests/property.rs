pub mod fixtures;

use fixtures::person_builder;
use metabuilder_core::{BuilderError, Record, Value};
use proptest::prelude::*;

proptest! {
    #[test]
    fn rejected_ages_leave_previous_value(age in any::<i64>(), text in "[a-z]{1,12}") {
        let mut builder = person_builder();
        builder.set_age(age).unwrap();

        let rejected = builder.set_age(text.as_str());

        prop_assert!(matches!(rejected, Err(BuilderError::Type { .. })), "expected BuilderError::Type");
        prop_assert_eq!(builder.age(), Some(&Value::Integer(age)));
    }

    #[test]
    fn height_accepts_only_valid_inches(feet in 0i64..9, inches in 0i64..30) {
        let mut builder = person_builder();

        let result = builder.set_height(format!("{feet}\"{inches}'"));

        prop_assert_eq!(result.is_ok(), inches <= 12);
    }

    #[test]
    fn built_records_ignore_later_writes(first in "[a-z]{1,8}", second in "[a-z]{1,8}", age in 0i64..120) {
        let mut builder = person_builder();
        builder.set_name(first.as_str()).unwrap();
        builder.set_age(age).unwrap();

        let before: Record = builder.build().unwrap();
        builder.set_name(second.as_str()).unwrap();
        builder.set_age(age + 1).unwrap();
        let after: Record = builder.build().unwrap();

        prop_assert_eq!(before.get("name"), Some(&Value::from(first)));
        prop_assert_eq!(before.get("age"), Some(&Value::Integer(age)));
        prop_assert_eq!(after.get("name"), Some(&Value::from(second)));
        prop_assert_eq!(after.get("age"), Some(&Value::Integer(age + 1)));
    }
}
