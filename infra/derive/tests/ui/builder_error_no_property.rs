use metabuilder_derive::builder_error;
use std::borrow::Cow;

#[builder_error]
#[derive(Debug)]
pub enum PlainError {
    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err: PlainError = "boom".into();
    assert_eq!(err.to_string(), "Internal error: boom");
}
