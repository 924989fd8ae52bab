use std::any::{TypeId, type_name};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a command type within the process.
#[derive(Clone, Copy, Eq)]
pub struct CommandKey {
    id: TypeId,
    name: &'static str,
}

impl CommandKey {
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self { id: TypeId::of::<T>(), name: type_name::<T>() }
    }

    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for CommandKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for CommandKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for CommandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Declared parent of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParentRef {
    #[default]
    NoParent,
    ParentIs(CommandKey),
}

impl ParentRef {
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::ParentIs(CommandKey::of::<T>())
    }
}

/// Flavour of a command, mirrors the two command capability kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CommandKind {
    #[default]
    Standard,
    Lite,
}

/// Declared metadata of a command type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub key: CommandKey,
    pub kind: CommandKind,
    /// Ordered aliases; the first one is canonical.
    pub aliases: Vec<Cow<'static, str>>,
    /// Permission node; empty means no permission is required.
    pub permission: Cow<'static, str>,
    pub description: Cow<'static, str>,
    pub parent: ParentRef,
}

impl CommandDescriptor {
    /// Canonical alias, or an empty string for malformed descriptors.
    #[must_use]
    pub fn canonical_alias(&self) -> &str {
        self.aliases.first().map_or("", AsRef::as_ref)
    }

    #[must_use]
    pub fn requires_permission(&self) -> bool {
        !self.permission.is_empty()
    }

    /// Case-insensitive match against any alias.
    #[must_use]
    pub fn matches(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a.eq_ignore_ascii_case(alias))
    }
}
