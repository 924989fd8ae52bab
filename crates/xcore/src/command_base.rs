use xcore_domain::command::{CommandDescriptor, CommandKind};
use xcore_kernel::command::CommandBase;

/// Stock command base published for both command kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCommandBase {
    kind: CommandKind,
}

impl HostCommandBase {
    #[must_use]
    pub const fn new(kind: CommandKind) -> Self {
        Self { kind }
    }
}

impl CommandBase for HostCommandBase {
    fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Lite commands skip permission checks.
    fn permits(&self, descriptor: &CommandDescriptor, granted: &dyn Fn(&str) -> bool) -> bool {
        match self.kind {
            CommandKind::Lite => true,
            CommandKind::Standard => !descriptor.requires_permission() || granted(&descriptor.permission),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use xcore_domain::command::{CommandKey, ParentRef};

    fn guarded() -> CommandDescriptor {
        CommandDescriptor {
            key: CommandKey::of::<()>(),
            kind: CommandKind::Standard,
            aliases: vec![Cow::Borrowed("vault")],
            permission: Cow::Borrowed("economy.vault"),
            description: Cow::Borrowed("Open the vault"),
            parent: ParentRef::NoParent,
        }
    }

    #[test]
    fn standard_base_checks_permissions() {
        let base = HostCommandBase::new(CommandKind::Standard);
        assert!(!base.permits(&guarded(), &|_| false));
        assert!(base.permits(&guarded(), &|node| node == "economy.vault"));
        assert_eq!(base.usage(&["bank", "vault"], &guarded()), "/bank vault - Open the vault");
    }

    #[test]
    fn lite_base_allows_everyone() {
        let base = HostCommandBase::new(CommandKind::Lite);
        assert!(base.permits(&guarded(), &|_| false));
    }
}
