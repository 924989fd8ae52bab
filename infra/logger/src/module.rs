use std::error::Error;
use std::sync::Arc;
use tracing::{Span, debug, error, info, info_span, warn};

/// Logger handle owned by a single module for its whole lifetime.
///
/// Cloning is cheap; clones share the same span.
#[derive(Debug, Clone)]
pub struct ModuleLogger {
    module: Arc<str>,
    span: Span,
}

impl ModuleLogger {
    pub fn new(module: impl Into<Arc<str>>) -> Self {
        let module = module.into();
        let span = info_span!("module", id = %module);
        Self { module, span }
    }

    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    #[must_use]
    pub const fn span(&self) -> &Span {
        &self.span
    }

    /// Runs `f` with the module span entered, attributing nested events to the module.
    pub fn in_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        self.span.in_scope(f)
    }

    pub fn debug(&self, message: &str) {
        self.in_scope(|| debug!(module = %self.module, "{message}"));
    }

    pub fn info(&self, message: &str) {
        self.in_scope(|| info!(module = %self.module, "{message}"));
    }

    pub fn warn(&self, message: &str) {
        self.in_scope(|| warn!(module = %self.module, "{message}"));
    }

    /// Logs an error together with its full source chain.
    pub fn error(&self, message: &str, cause: &dyn Error) {
        let mut chain = cause.to_string();
        let mut source = cause.source();
        while let Some(inner) = source {
            chain.push_str(": ");
            chain.push_str(&inner.to_string());
            source = inner.source();
        }
        self.in_scope(|| error!(module = %self.module, cause = %chain, "{message}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("save failed")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn clones_share_module_identity() {
        let logger = ModuleLogger::new("economy");
        let clone = logger.clone();
        assert_eq!(clone.module(), "economy");
        assert_eq!(logger.in_scope(|| 7), 7);
    }

    #[test]
    fn error_accepts_nested_sources() {
        let logger = ModuleLogger::new("economy");
        logger.error("Could not persist", &Outer(std::io::Error::other("disk full")));
        logger.warn("still running");
    }
}
