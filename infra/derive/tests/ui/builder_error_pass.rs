use metabuilder_derive::builder_error;
use std::borrow::Cow;

#[builder_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Bad value for `{property}`{}", format_context(.context))]
    BadValue { property: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<()> {
    Err::<(), _>(std::io::Error::other("disk")).context("reading")?;
    Ok(())
}

fn main() {
    let err = read().unwrap_err();
    assert!(err.property().is_none());
}
