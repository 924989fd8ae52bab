use std::borrow::Cow;

/// A declared class that cannot take part in a registry. The class is skipped and
/// discovery continues with its siblings.
#[xcore_derive::xcore_error]
#[derive(Clone)]
pub enum DiscoveryError {
    #[error("'{class}' has no no-argument constructor{}", format_context(.context))]
    MissingConstructor { class: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("'{class}' carries malformed metadata: {reason}{}", format_context(.context))]
    MalformedMetadata {
        class: Cow<'static, str>,
        reason: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("'{class}' is declared more than once{}", format_context(.context))]
    Duplicate { class: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("'{class}' resolves to '{path}' which is already used by '{existing}'{}", format_context(.context))]
    PathCollision {
        class: Cow<'static, str>,
        path: Cow<'static, str>,
        existing: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Alias '{alias}' of '{class}' is already taken by '{existing}'{}", format_context(.context))]
    AliasCollision {
        class: Cow<'static, str>,
        alias: Cow<'static, str>,
        existing: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },
}

impl DiscoveryError {
    /// Name of the class the error was reported for.
    #[must_use]
    pub fn class(&self) -> &str {
        match self {
            Self::MissingConstructor { class, .. }
            | Self::MalformedMetadata { class, .. }
            | Self::Duplicate { class, .. }
            | Self::PathCollision { class, .. }
            | Self::AliasCollision { class, .. } => class,
        }
    }
}
