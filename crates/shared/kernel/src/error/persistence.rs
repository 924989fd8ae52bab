use std::borrow::Cow;

/// Failure to read or write a backing document. Recoverable per config instance.
#[xcore_derive::xcore_error]
pub enum PersistenceError {
    #[error("Document I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Document parse error{}: {source}", format_context(.context))]
    Parse { source: toml_edit::TomlError, context: Option<Cow<'static, str>> },
}
