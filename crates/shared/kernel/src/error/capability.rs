use std::borrow::Cow;
use xcore_domain::capability::CapabilityKind;

/// Misuse of a write-once capability slot. Both cases abort the caller.
#[xcore_derive::xcore_error]
pub enum CapabilityError {
    #[fatal]
    #[error("Capability '{kind}' is already published{}", format_context(.context))]
    AlreadyPublished { kind: CapabilityKind, context: Option<Cow<'static, str>> },

    #[fatal]
    #[error("Capability '{kind}' was read before it was published{}", format_context(.context))]
    NotPublished { kind: CapabilityKind, context: Option<Cow<'static, str>> },
}
