use metabuilder_core::{
    Builder, BuilderError, BuilderType, Declaration, Kind, PropertyOptions, Record, Value,
};

/// Height written as feet and inches, e.g. `6"1'`, inches within `0..=12`.
#[must_use]
pub fn valid_height(value: &Value) -> bool {
    let Some(raw) = value.as_str() else {
        return false;
    };
    let (Some(feet), Some(inches)) = (raw.split('"').next(), raw.split('"').next_back()) else {
        return false;
    };
    let feet = feet.parse::<i64>().unwrap_or(0);
    let inches = inches.replace('\'', "").parse::<i64>().unwrap_or(0);

    feet >= 0 && (0..=12).contains(&inches)
}

/// A hand-written builder type with its getter/setter pairs spelled out.
#[derive(Debug)]
pub struct PersonBuilder {
    inner: Builder,
}

impl BuilderType for PersonBuilder {
    fn declare(d: &mut Declaration) -> Result<(), BuilderError> {
        d.model::<Record>()?
            .property("name", PropertyOptions::new())
            .property("age", PropertyOptions::new().kind(Kind::Integer))
            .property("job", PropertyOptions::new().one_of(["doctor", "musician"]))
            .property("height", PropertyOptions::new().validates(valid_height))
            .required(["name"]);
        Ok(())
    }

    fn from_builder(inner: Builder) -> Self {
        Self { inner }
    }
}

#[allow(dead_code)]
impl PersonBuilder {
    pub fn name(&self) -> Option<&Value> {
        self.inner.get("name")
    }

    pub fn set_name(&mut self, value: impl Into<Value>) -> Result<(), BuilderError> {
        self.inner.set("name", value)
    }

    pub fn age(&self) -> Option<&Value> {
        self.inner.get("age")
    }

    pub fn set_age(&mut self, value: impl Into<Value>) -> Result<(), BuilderError> {
        self.inner.set("age", value)
    }

    pub fn job(&self) -> Option<&Value> {
        self.inner.get("job")
    }

    pub fn set_job(&mut self, value: impl Into<Value>) -> Result<(), BuilderError> {
        self.inner.set("job", value)
    }

    pub fn height(&self) -> Option<&Value> {
        self.inner.get("height")
    }

    pub fn set_height(&mut self, value: impl Into<Value>) -> Result<(), BuilderError> {
        self.inner.set("height", value)
    }

    pub fn build(&self) -> Result<Record, BuilderError> {
        self.inner.build()
    }

    pub const fn engine(&self) -> &Builder {
        &self.inner
    }
}

/// Initializes a fresh person builder outside any registry.
/// # Panics
/// * If the person declaration is rejected.
#[must_use]
pub fn person_builder() -> PersonBuilder {
    Builder::of::<PersonBuilder>().expect("person builder declaration")
}
