use crate::VERSION;
use crate::command_base::HostCommandBase;
use crate::error::{CoreError, CoreErrorExt};
use crate::help::{HelpEntry, HelpListing};
use crate::internal::{self, DEFAULT_PADDING, DEFAULT_TITLE, XCoreConfig};
use crate::registry::RegistryView;
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use xcore_domain::command::CommandKind;
use xcore_domain::config::HostSettings;
use xcore_domain::constants::CORE_MODULE;
use xcore_domain::module::ModuleId;
use xcore_kernel::capability::{Capabilities, CoreRegistry};
use xcore_kernel::config::{ConfigLayout, ReloadSummary, StandardConfigBase};
use xcore_kernel::error::CapabilityError;
use xcore_kernel::manifest::ModuleManifest;
use xcore_kernel::module::ModuleEntry;
use xcore_kernel::store::{DocumentStore, FileStore};

/// Host lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Constructed,
    /// Capabilities are published; modules may register.
    PreInitialized,
    Initialized,
}

#[derive(Debug, Clone)]
enum CapabilitySet {
    Global,
    Owned(Arc<Capabilities>),
}

impl Deref for CapabilitySet {
    type Target = Capabilities;

    fn deref(&self) -> &Capabilities {
        match self {
            Self::Global => Capabilities::global(),
            Self::Owned(capabilities) => capabilities.as_ref(),
        }
    }
}

/// A fluent builder for configuring the [`Core`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug)]
pub struct CoreBuilder {
    settings: HostSettings,
    store: Option<Arc<dyn DocumentStore>>,
    capabilities: CapabilitySet,
}

impl CoreBuilder {
    pub fn settings(mut self, settings: HostSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn config_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.settings.config_root = root.into();
        self
    }

    /// Document store handed to config instances; the local filesystem by default.
    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Publishes into `capabilities` instead of the process-wide set.
    pub fn capabilities(mut self, capabilities: Arc<Capabilities>) -> Self {
        self.capabilities = CapabilitySet::Owned(capabilities);
        self
    }

    pub fn build(self) -> Core {
        let layout = ConfigLayout::from_settings(&self.settings);
        Core {
            store: self.store.unwrap_or_else(|| Arc::new(FileStore::new())),
            settings: self.settings,
            layout,
            capabilities: self.capabilities,
            registry: RegistryView::new(),
            phase: Phase::Constructed,
        }
    }
}

/// The host side of the framework: publishes capabilities, registers modules and
/// routes reload requests.
#[derive(Debug)]
pub struct Core {
    settings: HostSettings,
    layout: ConfigLayout,
    store: Arc<dyn DocumentStore>,
    capabilities: CapabilitySet,
    registry: RegistryView,
    phase: Phase,
}

impl Core {
    /// Returns a new [`CoreBuilder`] using default settings and the global capability set.
    pub fn builder() -> CoreBuilder {
        CoreBuilder {
            settings: HostSettings::default(),
            store: None,
            capabilities: CapabilitySet::Global,
        }
    }

    /// Logs the banner and publishes all four capabilities.
    ///
    /// # Errors
    /// Returns [`CoreError::Lifecycle`] when called twice and [`CoreError::Capability`]
    /// when any capability was already published into the same set; the set is left
    /// untouched in that case. Both are fatal.
    pub fn pre_init(&mut self) -> Result<(), CoreError> {
        self.expect_phase(Phase::Constructed, "pre_init")?;

        info!("======================================================");
        info!("Initializing XCore version {VERSION}");

        let capabilities = &*self.capabilities;
        if let Some(kind) = capabilities.published().first() {
            return Err(CoreError::Capability {
                source: CapabilityError::AlreadyPublished { kind: *kind, context: None },
                context: Some("publishing capabilities".into()),
            });
        }

        capabilities
            .command_base
            .publish(Arc::new(HostCommandBase::new(CommandKind::Standard)))
            .context("publishing command base")?;
        capabilities
            .lite_command_base
            .publish(Arc::new(HostCommandBase::new(CommandKind::Lite)))
            .context("publishing lite command base")?;
        capabilities
            .config_base
            .publish(Arc::new(StandardConfigBase::new(self.layout.clone(), Arc::clone(&self.store))))
            .context("publishing config base")?;
        capabilities
            .core_registry
            .publish(Arc::new(self.registry.clone()))
            .context("publishing core registry")?;

        self.phase = Phase::PreInitialized;
        Ok(())
    }

    /// Registers a module: scans its manifest and builds its registries.
    ///
    /// # Errors
    /// Returns [`CoreError::Capability`] when called before [`Self::pre_init`] and
    /// [`CoreError::DuplicateModule`] when the id is taken.
    pub fn register_module(
        &self,
        id: ModuleId,
        manifest: &ModuleManifest,
    ) -> Result<Arc<ModuleEntry>, CoreError> {
        if self.registry.contains(&id) {
            return Err(CoreError::DuplicateModule { module: id, context: None });
        }

        let entry = Arc::new(
            ModuleEntry::register(id, manifest, &self.capabilities)
                .context("registering module")?,
        );
        self.registry.insert(Arc::clone(&entry))?;
        Ok(entry)
    }

    /// Registers the internal module and completes startup.
    ///
    /// # Errors
    /// Returns [`CoreError::Lifecycle`] unless called once after [`Self::pre_init`].
    pub fn init(&mut self) -> Result<(), CoreError> {
        self.expect_phase(Phase::PreInitialized, "init")?;

        let id = ModuleId::try_from(CORE_MODULE).map_err(|err| CoreError::Lifecycle {
            message: err.to_string().into(),
            context: Some("internal module id".into()),
        })?;
        self.register_module(id, &internal::manifest())?;

        self.phase = Phase::Initialized;
        info!(modules = self.registry.len(), "XCore initialized");
        Ok(())
    }

    /// Re-loads the configs of every module, skipping reload-exempt ones.
    pub fn on_reload(&self) -> ReloadSummary {
        self.registry.reload_all()
    }

    /// Help content for the commands of `module`.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownModule`] for unregistered ids and
    /// [`CoreError::Capability`] when the command bases are not published.
    pub fn help(&self, module: &ModuleId) -> Result<HelpListing, CoreError> {
        let entry = self
            .registry
            .module(module)
            .ok_or_else(|| CoreError::UnknownModule { module: module.clone(), context: None })?;

        let commands = entry.commands();
        let mut entries = Vec::with_capacity(commands.len());
        for node in commands.walk() {
            let path = commands.path(node.key()).unwrap_or_default();
            let base = self.capabilities.command_base_for(node.kind()).context("rendering help")?;
            entries.push(HelpEntry {
                command: node.key(),
                line: base.usage(&path, node.descriptor()),
                path: path.iter().map(|alias| (*alias).to_owned()).collect(),
            });
        }

        let (title, padding) = self.help_style();
        Ok(HelpListing::new(title, padding, entries))
    }

    fn help_style(&self) -> (String, String) {
        let defaults = || (DEFAULT_TITLE.to_owned(), DEFAULT_PADDING.to_owned());
        let Some(core) = ModuleId::try_from(CORE_MODULE).ok().and_then(|id| self.registry.module(&id))
        else {
            return defaults();
        };
        core.configs()
            .get_config::<XCoreConfig>()
            .and_then(|instance| {
                instance
                    .get::<XCoreConfig>()
                    .map(|config| (config.help_title().to_owned(), config.help_padding().to_owned()))
            })
            .unwrap_or_else(defaults)
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn settings(&self) -> &HostSettings {
        &self.settings
    }

    #[must_use]
    pub const fn layout(&self) -> &ConfigLayout {
        &self.layout
    }

    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[must_use]
    pub fn module(&self, id: &ModuleId) -> Option<Arc<ModuleEntry>> {
        self.registry.module(id)
    }

    #[must_use]
    pub fn module_ids(&self) -> Vec<ModuleId> {
        self.registry.module_ids()
    }

    fn expect_phase(&self, expected: Phase, step: &'static str) -> Result<(), CoreError> {
        if self.phase == expected {
            return Ok(());
        }
        Err(CoreError::Lifecycle {
            message: format!("{step} requires phase {expected:?}, current phase is {:?}", self.phase)
                .into(),
            context: None,
        })
    }
}
