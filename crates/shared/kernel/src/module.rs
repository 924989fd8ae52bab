use crate::capability::Capabilities;
use crate::command::CommandRegistry;
use crate::config::{ConfigRegistry, ReloadSummary};
use crate::error::{CapabilityError, CapabilityErrorExt, DiscoveryError};
use crate::manifest::ModuleManifest;
use crate::scanner::AnnotationScanner;
use xcore_domain::module::ModuleId;
use xcore_logger::ModuleLogger;

/// A registered module with its logger and registries.
#[derive(Debug)]
pub struct ModuleEntry {
    id: ModuleId,
    logger: ModuleLogger,
    configs: ConfigRegistry,
    commands: CommandRegistry,
    errors: Vec<DiscoveryError>,
}

impl ModuleEntry {
    /// Scans `manifest` and builds the module's config and command registries.
    ///
    /// Faulty classes are logged and skipped; they are listed in [`Self::errors`].
    ///
    /// # Errors
    /// Returns [`CapabilityError::NotPublished`] when the config base capability has
    /// not been published yet.
    pub fn register(
        id: ModuleId,
        manifest: &ModuleManifest,
        capabilities: &Capabilities,
    ) -> Result<Self, CapabilityError> {
        let base =
            capabilities.config_base.get().context(format!("registering module '{id}'"))?;
        let logger = ModuleLogger::new(id.as_str());

        let entry = logger.in_scope(|| {
            let outcome = AnnotationScanner::scan(manifest);
            let configs = ConfigRegistry::create(&id, &logger, outcome.configs, base.as_ref());
            let commands = CommandRegistry::build(&logger, outcome.commands);

            let mut errors = outcome.errors;
            errors.extend(configs.rejected().iter().cloned());
            errors.extend(commands.rejected().iter().cloned());

            Self { id: id.clone(), logger: logger.clone(), configs, commands, errors }
        });

        entry.logger.info(&format!(
            "Registered {} configs and {} commands ({} skipped)",
            entry.configs.len(),
            entry.commands.len(),
            entry.errors.len()
        ));
        Ok(entry)
    }

    #[must_use]
    pub const fn id(&self) -> &ModuleId {
        &self.id
    }

    #[must_use]
    pub const fn logger(&self) -> &ModuleLogger {
        &self.logger
    }

    #[must_use]
    pub const fn configs(&self) -> &ConfigRegistry {
        &self.configs
    }

    #[must_use]
    pub const fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    /// Classes skipped during registration.
    #[must_use]
    pub fn errors(&self) -> &[DiscoveryError] {
        &self.errors
    }

    pub fn reload(&self) -> ReloadSummary {
        self.logger.in_scope(|| self.configs.reload_all())
    }
}
