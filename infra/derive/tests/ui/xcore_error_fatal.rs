use std::borrow::Cow;
use xcore_derive::xcore_error;

#[xcore_error]
pub enum SlotError {
    #[fatal]
    #[error("Already published{}: {message}", format_context(.context))]
    AlreadyPublished { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Skipped{}: {message}", format_context(.context))]
    Skipped { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let fatal = SlotError::AlreadyPublished { message: "config-base".into(), context: None };
    assert!(fatal.is_fatal());

    let recoverable: Result<(), SlotError> =
        Err(SlotError::Skipped { message: "cache".into(), context: None });
    let err = recoverable.context("reload").unwrap_err();
    assert!(!err.is_fatal());
    assert_eq!(err.to_string(), "Skipped (reload): cache");
}
