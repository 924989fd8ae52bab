use std::borrow::Cow;
use xcore_domain::module::ModuleId;
use xcore_kernel::error::CapabilityError;

/// Errors surfaced by the host lifecycle.
#[xcore_derive::xcore_error]
pub enum CoreError {
    /// Capability publication or lookup failed; startup cannot continue.
    #[fatal]
    #[error("Capability failure{}: {source}", format_context(.context))]
    Capability { source: CapabilityError, context: Option<Cow<'static, str>> },

    /// A lifecycle step was invoked out of order.
    #[fatal]
    #[error("Lifecycle violation{}: {message}", format_context(.context))]
    Lifecycle { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Module '{module}' is already registered{}", format_context(.context))]
    DuplicateModule { module: ModuleId, context: Option<Cow<'static, str>> },

    #[error("Module '{module}' is not registered{}", format_context(.context))]
    UnknownModule { module: ModuleId, context: Option<Cow<'static, str>> },
}
