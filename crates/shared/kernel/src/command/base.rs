use std::fmt::Debug;
use xcore_domain::command::{CommandDescriptor, CommandKind};

/// Capability shared by every command of one [`CommandKind`].
pub trait CommandBase: Debug + Send + Sync {
    fn kind(&self) -> CommandKind;

    /// Whether a sender for which `granted` answers permission queries may run the command.
    fn permits(&self, descriptor: &CommandDescriptor, granted: &dyn Fn(&str) -> bool) -> bool {
        !descriptor.requires_permission() || granted(&descriptor.permission)
    }

    /// Help line for the command reached through `path` (canonical aliases, root first).
    fn usage(&self, path: &[&str], descriptor: &CommandDescriptor) -> String {
        format!("/{} - {}", path.join(" "), descriptor.description)
    }
}
