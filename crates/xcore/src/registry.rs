use crate::error::CoreError;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;
use xcore_domain::module::ModuleId;
use xcore_kernel::capability::CoreRegistry;
use xcore_kernel::config::ReloadSummary;
use xcore_kernel::module::ModuleEntry;

/// Registered modules in registration order.
///
/// Clones share the same list, so the copy published as the core registry capability
/// sees every module the host registers later.
#[derive(Debug, Clone, Default)]
pub struct RegistryView {
    modules: Arc<RwLock<Vec<Arc<ModuleEntry>>>>,
}

impl RegistryView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &ModuleId) -> bool {
        self.modules.read().iter().any(|entry| entry.id() == id)
    }

    /// # Errors
    /// Returns [`CoreError::DuplicateModule`] if a module with the same id exists.
    pub fn insert(&self, entry: Arc<ModuleEntry>) -> Result<(), CoreError> {
        let mut modules = self.modules.write();
        if modules.iter().any(|existing| existing.id() == entry.id()) {
            return Err(CoreError::DuplicateModule { module: entry.id().clone(), context: None });
        }
        modules.push(entry);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.read().is_empty()
    }

    /// Snapshot of the registered modules.
    #[must_use]
    pub fn entries(&self) -> Vec<Arc<ModuleEntry>> {
        self.modules.read().clone()
    }
}

impl CoreRegistry for RegistryView {
    fn module(&self, id: &ModuleId) -> Option<Arc<ModuleEntry>> {
        self.modules.read().iter().find(|entry| entry.id() == id).cloned()
    }

    fn module_ids(&self) -> Vec<ModuleId> {
        self.modules.read().iter().map(|entry| entry.id().clone()).collect()
    }

    fn reload_all(&self) -> ReloadSummary {
        let summary: ReloadSummary = self.entries().iter().map(|entry| entry.reload()).sum();
        info!(
            reloaded = summary.reloaded,
            skipped = summary.skipped,
            failed = summary.failed,
            "Configuration reload complete"
        );
        summary
    }
}
