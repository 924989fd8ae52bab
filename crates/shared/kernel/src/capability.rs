use crate::command::CommandBase;
use crate::config::{ConfigBase, ReloadSummary};
use crate::error::CapabilityError;
use crate::module::ModuleEntry;
use std::fmt;
use std::sync::{Arc, OnceLock};
use xcore_domain::capability::CapabilityKind;
use xcore_domain::command::CommandKind;
use xcore_domain::module::ModuleId;

/// Host-side view over every registered module.
pub trait CoreRegistry: fmt::Debug + Send + Sync {
    fn module(&self, id: &ModuleId) -> Option<Arc<ModuleEntry>>;

    /// Ids in registration order.
    fn module_ids(&self) -> Vec<ModuleId>;

    /// Re-loads every reloadable config of every module.
    fn reload_all(&self) -> ReloadSummary;
}

/// Write-once cell holding one capability implementation.
///
/// Readers observe either nothing or a fully published value.
pub struct CapabilitySlot<T: ?Sized> {
    kind: CapabilityKind,
    cell: OnceLock<Arc<T>>,
}

impl<T: ?Sized> CapabilitySlot<T> {
    #[must_use]
    pub const fn new(kind: CapabilityKind) -> Self {
        Self { kind, cell: OnceLock::new() }
    }

    #[must_use]
    pub const fn kind(&self) -> CapabilityKind {
        self.kind
    }

    /// # Errors
    /// Returns [`CapabilityError::AlreadyPublished`] if the slot already holds a value;
    /// the published value is left untouched.
    pub fn publish(&self, value: Arc<T>) -> Result<(), CapabilityError> {
        self.cell
            .set(value)
            .map_err(|_| CapabilityError::AlreadyPublished { kind: self.kind, context: None })?;
        tracing::debug!(capability = %self.kind, "Capability published");
        Ok(())
    }

    /// # Errors
    /// Returns [`CapabilityError::NotPublished`] when read before publication.
    pub fn get(&self) -> Result<Arc<T>, CapabilityError> {
        self.try_get().ok_or_else(|| CapabilityError::NotPublished { kind: self.kind, context: None })
    }

    #[must_use]
    pub fn try_get(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }

    #[must_use]
    pub fn is_published(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: ?Sized> fmt::Debug for CapabilitySlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilitySlot")
            .field("kind", &self.kind)
            .field("published", &self.is_published())
            .finish()
    }
}

/// One slot per [`CapabilityKind`].
///
/// The host publishes into [`Capabilities::global`] at startup; tests and embedded
/// hosts may build their own set and pass it around instead.
#[derive(Debug)]
pub struct Capabilities {
    pub command_base: CapabilitySlot<dyn CommandBase>,
    pub lite_command_base: CapabilitySlot<dyn CommandBase>,
    pub config_base: CapabilitySlot<dyn ConfigBase>,
    pub core_registry: CapabilitySlot<dyn CoreRegistry>,
}

static GLOBAL: Capabilities = Capabilities::new();

impl Capabilities {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            command_base: CapabilitySlot::new(CapabilityKind::CommandBase),
            lite_command_base: CapabilitySlot::new(CapabilityKind::LiteCommandBase),
            config_base: CapabilitySlot::new(CapabilityKind::ConfigBase),
            core_registry: CapabilitySlot::new(CapabilityKind::CoreRegistry),
        }
    }

    /// Process-wide set.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    #[must_use]
    pub fn is_published(&self, kind: CapabilityKind) -> bool {
        match kind {
            CapabilityKind::CommandBase => self.command_base.is_published(),
            CapabilityKind::LiteCommandBase => self.lite_command_base.is_published(),
            CapabilityKind::ConfigBase => self.config_base.is_published(),
            CapabilityKind::CoreRegistry => self.core_registry.is_published(),
        }
    }

    #[must_use]
    pub fn published(&self) -> Vec<CapabilityKind> {
        CapabilityKind::ALL.into_iter().filter(|kind| self.is_published(*kind)).collect()
    }

    /// Command base serving commands of the given kind.
    ///
    /// # Errors
    /// Returns [`CapabilityError::NotPublished`] when the matching slot is empty.
    pub fn command_base_for(&self, kind: CommandKind) -> Result<Arc<dyn CommandBase>, CapabilityError> {
        match kind {
            CommandKind::Standard => self.command_base.get(),
            CommandKind::Lite => self.lite_command_base.get(),
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::new()
    }
}
