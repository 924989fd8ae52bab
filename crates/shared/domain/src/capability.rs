use std::fmt;

/// Swappable implementation surfaces published once at host startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapabilityKind {
    CommandBase,
    LiteCommandBase,
    ConfigBase,
    CoreRegistry,
}

impl CapabilityKind {
    pub const ALL: [Self; 4] =
        [Self::CommandBase, Self::LiteCommandBase, Self::ConfigBase, Self::CoreRegistry];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CommandBase => "command-base",
            Self::LiteCommandBase => "lite-command-base",
            Self::ConfigBase => "config-base",
            Self::CoreRegistry => "core-registry",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
