use crate::config::{Config, ConfigBase, Lifecycle, ReloadSummary};
use crate::document::ConfigDocument;
use crate::error::{DiscoveryError, PersistenceError};
use crate::scanner::DiscoveredConfig;
use crate::store::DocumentStore;
use parking_lot::{MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use xcore_domain::config::ConfigDescriptor;
use xcore_domain::module::ModuleId;
use xcore_logger::ModuleLogger;

#[derive(Debug)]
struct ConfigState {
    object: Box<dyn Config>,
    root: ConfigDocument,
    phase: Lifecycle,
}

/// A registered config: its descriptor, backing path, typed object and in-memory root.
#[derive(Debug)]
pub struct ConfigInstance {
    class: Cow<'static, str>,
    type_id: TypeId,
    descriptor: ConfigDescriptor,
    path: PathBuf,
    store: Arc<dyn DocumentStore>,
    logger: ModuleLogger,
    state: RwLock<ConfigState>,
}

impl ConfigInstance {
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    #[must_use]
    pub const fn descriptor(&self) -> &ConfigDescriptor {
        &self.descriptor
    }

    /// Resolved backing document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn phase(&self) -> Lifecycle {
        self.state.read().phase
    }

    #[must_use]
    pub const fn reload_exempt(&self) -> bool {
        self.descriptor.reload_exempt()
    }

    #[must_use]
    pub fn is<T: Config>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Read access to the in-memory root.
    pub fn read(&self) -> MappedRwLockReadGuard<'_, ConfigDocument> {
        RwLockReadGuard::map(self.state.read(), |state| &state.root)
    }

    /// Write access to the in-memory root. Changes stay in memory until [`Self::save`].
    pub fn write(&self) -> MappedRwLockWriteGuard<'_, ConfigDocument> {
        RwLockWriteGuard::map(self.state.write(), |state| &mut state.root)
    }

    /// The typed config object, if it is a `T`.
    pub fn get<T: Config>(&self) -> Option<MappedRwLockReadGuard<'_, T>> {
        RwLockReadGuard::try_map(self.state.read(), |state| {
            let object: &dyn Any = &*state.object;
            object.downcast_ref::<T>()
        })
        .ok()
    }

    /// Persists the in-memory root.
    ///
    /// # Errors
    /// Returns the store failure; the in-memory root is unaffected either way.
    pub fn save(&self) -> Result<(), PersistenceError> {
        let state = self.state.read();
        self.store.save(&self.path, &state.root).inspect_err(|err| {
            self.logger.error(&format!("Could not save {}", self.path.display()), err);
        })
    }

    /// Replaces the in-memory root with the backing document.
    ///
    /// # Errors
    /// Returns the store failure and keeps the previous root.
    pub fn load(&self) -> Result<(), PersistenceError> {
        let document = self.store.load(&self.path).inspect_err(|err| {
            self.logger.error(&format!("Could not load {}", self.path.display()), err);
        })?;

        let mut state = self.state.write();
        state.object.loaded(&document);
        state.root = document;
        if state.phase != Lifecycle::Active {
            state.phase = Lifecycle::Loaded;
        }
        Ok(())
    }

    fn activate(&self) {
        let mut state = self.state.write();
        if state.phase == Lifecycle::Loaded {
            state.phase = Lifecycle::Active;
        }
    }

    /// First-run creation and initial load.
    fn initialize(&self, file_name: &str) {
        self.logger.info(&format!("Initializing configuration for '{file_name}'"));

        if let Some(dir) = self.path.parent()
            && let Err(err) = self.store.ensure_dir(dir)
        {
            self.logger.error(&format!("Could not create {}", dir.display()), &err);
        }

        if !self.store.exists(&self.path) {
            self.logger.info("Configuration currently does not exist. Creating...");
            {
                let mut state = self.state.write();
                let mut root = ConfigDocument::new();
                state.object.populate(&mut root);
                state.object.loaded(&root);
                state.root = root;
                state.phase = Lifecycle::Populated;
            }
            // Failures are logged by save; the populated defaults stay in memory.
            let _ = self.save();
        }

        let _ = self.load();
    }
}

/// Per-module registry of config instances, in declaration order.
#[derive(Debug)]
pub struct ConfigRegistry {
    module: ModuleId,
    instances: Vec<ConfigInstance>,
    rejected: Vec<DiscoveryError>,
}

impl ConfigRegistry {
    /// Builds, creates and loads every discovered config of `module`.
    ///
    /// Per-instance persistence failures are logged and leave the instance registered
    /// with its last known root. Configs resolving to an already used path are
    /// rejected.
    #[must_use]
    pub fn create(
        module: &ModuleId,
        logger: &ModuleLogger,
        discovered: Vec<DiscoveredConfig>,
        base: &dyn ConfigBase,
    ) -> Self {
        let layout = base.layout();
        let store = base.store();
        let mut instances: Vec<ConfigInstance> = Vec::with_capacity(discovered.len());
        let mut rejected = Vec::new();

        for config in discovered {
            let path = layout.resolve(module, &config.descriptor);
            if let Some(existing) = instances.iter().find(|i| i.path == path) {
                let err = DiscoveryError::PathCollision {
                    class: config.class.clone(),
                    path: path.display().to_string().into(),
                    existing: existing.class.clone(),
                    context: None,
                };
                logger.error("Skipping config", &err);
                rejected.push(err);
                continue;
            }

            let instance = ConfigInstance {
                class: config.class,
                type_id: config.type_id,
                descriptor: config.descriptor,
                path,
                store: Arc::clone(&store),
                logger: logger.clone(),
                state: RwLock::new(ConfigState {
                    object: (config.factory)(),
                    root: ConfigDocument::new(),
                    phase: Lifecycle::Discovered,
                }),
            };
            instance.initialize(&layout.file_name(&instance.descriptor));
            instances.push(instance);
        }

        for instance in &instances {
            instance.activate();
        }

        Self { module: module.clone(), instances, rejected }
    }

    #[must_use]
    pub const fn module(&self) -> &ModuleId {
        &self.module
    }

    /// Instance of config type `T`, if registered.
    #[must_use]
    pub fn get_config<T: Config>(&self) -> Option<&ConfigInstance> {
        self.instances.iter().find(|instance| instance.is::<T>())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigInstance> {
        self.instances.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Configs rejected while building the registry.
    #[must_use]
    pub fn rejected(&self) -> &[DiscoveryError] {
        &self.rejected
    }

    /// Re-loads every instance not marked reload-exempt, discarding in-memory changes.
    pub fn reload_all(&self) -> ReloadSummary {
        let mut summary = ReloadSummary::default();
        for instance in &self.instances {
            if instance.reload_exempt() {
                summary.skipped += 1;
                continue;
            }
            match instance.load() {
                Ok(()) => {
                    instance.activate();
                    summary.reloaded += 1;
                },
                Err(_) => summary.failed += 1,
            }
        }
        tracing::debug!(
            module = %self.module,
            reloaded = summary.reloaded,
            skipped = summary.skipped,
            failed = summary.failed,
            "Configuration reload finished"
        );
        summary
    }
}
