use metabuilder::prelude::*;

#[model(builder = AccountDraft)]
#[derive(Clone)]
pub struct Account {
    #[property(required)]
    /// Login handle.
    handle: String,
    #[property(one_of = [1, 2, 3])]
    tier: u8,
    #[property(validates = |email: &String| email.contains('@'))]
    email: String,
    score: f64,
    metadata: Value,
}

fn main() -> metabuilder::Result<()> {
    let mut draft = AccountDraft::new()?;
    draft.set_handle("pepe")?;
    draft.set_tier(2u8)?;
    draft.set_email("pepe@example.com")?;
    draft.set_metadata(vec![Value::from(1), Value::from("two")])?;
    draft.clear_email()?;

    let account: Account = draft.build()?;
    assert_eq!(account.handle().map(String::as_str), Some("pepe"));
    assert_eq!(account.tier(), Some(&2));
    assert_eq!(account.email(), None);
    assert_eq!(account.score(), None);
    assert!(account.metadata().is_some_and(|m| m.as_list().is_some()));

    let record_like: &Builder = &draft;
    assert_eq!(record_like.current_values().count(), 3);
    Ok(())
}
