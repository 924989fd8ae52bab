mod base;
mod registry;

pub use base::CommandBase;
pub use registry::{CommandNode, CommandRegistry, Walk};

use std::any::Any;
use std::fmt::Debug;
use xcore_domain::command::CommandDescriptor;

/// A live command object. Execution bodies belong to the host adapter, so any
/// thread-safe type qualifies.
pub trait Command: Any + Debug + Send + Sync {}

impl<T: Any + Debug + Send + Sync> Command for T {}

/// Compile-time registration metadata, implemented by `#[xcore_derive::command]`.
pub trait CommandType: Command + Sized {
    fn descriptor() -> CommandDescriptor;
}
