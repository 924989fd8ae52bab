use crate::command::{Command, CommandType};
use crate::config::{Config, ConfigType};
use std::any::{TypeId, type_name};
use std::borrow::Cow;
use xcore_domain::command::CommandDescriptor;
use xcore_domain::config::ConfigDescriptor;

/// No-argument construction path of a config type.
pub type ConfigFactory = fn() -> Box<dyn Config>;
/// No-argument construction path of a command type.
pub type CommandFactory = fn() -> Box<dyn Command>;

/// Marker carried by a declared type.
#[derive(Debug, Clone)]
pub enum Declaration {
    Config { descriptor: ConfigDescriptor, factory: Option<ConfigFactory> },
    Command { descriptor: CommandDescriptor, factory: Option<CommandFactory> },
    Unmarked,
}

/// One type declared by a module.
#[derive(Debug, Clone)]
pub struct ClassEntry {
    name: Cow<'static, str>,
    type_id: TypeId,
    declaration: Declaration,
}

impl ClassEntry {
    pub fn new(name: impl Into<Cow<'static, str>>, type_id: TypeId, declaration: Declaration) -> Self {
        Self { name: name.into(), type_id, declaration }
    }

    #[must_use]
    pub fn config<T: ConfigType + Default>() -> Self {
        Self::new(
            type_name::<T>(),
            TypeId::of::<T>(),
            Declaration::Config { descriptor: T::descriptor(), factory: Some(make_config::<T>) },
        )
    }

    #[must_use]
    pub fn command<T: CommandType + Default>() -> Self {
        Self::new(
            type_name::<T>(),
            TypeId::of::<T>(),
            Declaration::Command { descriptor: T::descriptor(), factory: Some(make_command::<T>) },
        )
    }

    #[must_use]
    pub fn unmarked<T: ?Sized + 'static>() -> Self {
        Self::new(type_name::<T>(), TypeId::of::<T>(), Declaration::Unmarked)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub(crate) fn class(&self) -> Cow<'static, str> {
        self.name.clone()
    }

    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[must_use]
    pub const fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    #[must_use]
    pub const fn is_marked(&self) -> bool {
        !matches!(self.declaration, Declaration::Unmarked)
    }
}

fn make_config<T: Config + Default>() -> Box<dyn Config> {
    Box::new(T::default())
}

fn make_command<T: Command + Default>() -> Box<dyn Command> {
    Box::new(T::default())
}

/// Types a module offers for discovery, in declaration order.
///
/// ```rust
/// # use xcore_kernel::manifest::ModuleManifest;
/// #[derive(Debug, Default)]
/// struct Helper;
///
/// let manifest = ModuleManifest::new().unmarked::<Helper>();
/// assert_eq!(manifest.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModuleManifest {
    entries: Vec<ClassEntry>,
}

impl ModuleManifest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config<T: ConfigType + Default>(self) -> Self {
        self.class(ClassEntry::config::<T>())
    }

    #[must_use]
    pub fn command<T: CommandType + Default>(self) -> Self {
        self.class(ClassEntry::command::<T>())
    }

    #[must_use]
    pub fn unmarked<T: ?Sized + 'static>(self) -> Self {
        self.class(ClassEntry::unmarked::<T>())
    }

    #[must_use]
    pub fn class(mut self, entry: ClassEntry) -> Self {
        self.entries.push(entry);
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[ClassEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
