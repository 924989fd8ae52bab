use crate::store::{DocumentStore, FileStore};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use xcore_domain::config::{ConfigDescriptor, HostSettings};
use xcore_domain::constants::{DEFAULT_CONFIG_EXTENSION, DEFAULT_CONFIG_ROOT};
use xcore_domain::module::ModuleId;

/// Capability used by config instances to locate and persist their documents.
pub trait ConfigBase: Debug + Send + Sync {
    fn layout(&self) -> &ConfigLayout;

    fn store(&self) -> Arc<dyn DocumentStore>;
}

/// Maps config descriptors to backing document paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayout {
    root: PathBuf,
    extension: String,
}

impl ConfigLayout {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        let extension = extension.trim_start_matches('.').to_owned();
        Self { root: root.into(), extension }
    }

    #[must_use]
    pub fn from_settings(settings: &HostSettings) -> Self {
        Self::new(&settings.config_root, &settings.config_extension)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `<name>.<ext>`
    #[must_use]
    pub fn file_name(&self, descriptor: &ConfigDescriptor) -> String {
        format!("{}.{}", descriptor.name(), self.extension)
    }

    /// Directory holding the document: the shared root, or the module subdirectory.
    #[must_use]
    pub fn directory(&self, module: &ModuleId, descriptor: &ConfigDescriptor) -> PathBuf {
        if descriptor.shared_root() { self.root.clone() } else { self.root.join(module.as_str()) }
    }

    #[must_use]
    pub fn resolve(&self, module: &ModuleId, descriptor: &ConfigDescriptor) -> PathBuf {
        self.directory(module, descriptor).join(self.file_name(descriptor))
    }
}

impl Default for ConfigLayout {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_ROOT, DEFAULT_CONFIG_EXTENSION)
    }
}

/// Layout plus a document store; the stock [`ConfigBase`].
#[derive(Debug)]
pub struct StandardConfigBase {
    layout: ConfigLayout,
    store: Arc<dyn DocumentStore>,
}

impl StandardConfigBase {
    #[must_use]
    pub fn new(layout: ConfigLayout, store: Arc<dyn DocumentStore>) -> Self {
        Self { layout, store }
    }

    /// Filesystem-backed base rooted at `layout`.
    #[must_use]
    pub fn on_disk(layout: ConfigLayout) -> Self {
        Self::new(layout, Arc::new(FileStore::new()))
    }
}

impl ConfigBase for StandardConfigBase {
    fn layout(&self) -> &ConfigLayout {
        &self.layout
    }

    fn store(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.store)
    }
}
