use crate::error::DiscoveryError;
use crate::manifest::{ClassEntry, CommandFactory, ConfigFactory, Declaration, ModuleManifest};
use std::any::TypeId;
use std::borrow::Cow;
use std::collections::HashSet;
use tracing::warn;
use xcore_domain::command::CommandDescriptor;
use xcore_domain::config::ConfigDescriptor;

/// A config type that passed discovery.
#[derive(Debug, Clone)]
pub struct DiscoveredConfig {
    pub class: Cow<'static, str>,
    pub type_id: TypeId,
    pub descriptor: ConfigDescriptor,
    pub factory: ConfigFactory,
}

/// A command type that passed discovery.
#[derive(Debug, Clone)]
pub struct DiscoveredCommand {
    pub class: Cow<'static, str>,
    pub descriptor: CommandDescriptor,
    pub factory: CommandFactory,
}

#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub configs: Vec<DiscoveredConfig>,
    pub commands: Vec<DiscoveredCommand>,
    pub errors: Vec<DiscoveryError>,
}

/// Classifies the declared types of a module by their registration marker.
///
/// Entries are visited in declaration order. Faulty entries are reported and skipped;
/// nothing is instantiated.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationScanner;

impl AnnotationScanner {
    #[must_use]
    pub fn scan(manifest: &ModuleManifest) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        let mut seen = HashSet::new();

        for entry in manifest.entries().iter().filter(|e| e.is_marked()) {
            if seen.contains(&entry.type_id()) {
                report(&mut outcome, DiscoveryError::Duplicate { class: entry.class(), context: None });
                continue;
            }
            // Only accepted declarations claim the type.
            match classify(entry, &mut outcome) {
                Ok(()) => {
                    seen.insert(entry.type_id());
                },
                Err(err) => report(&mut outcome, err),
            }
        }

        outcome
    }

    #[must_use]
    pub fn scan_configs(manifest: &ModuleManifest) -> Vec<DiscoveredConfig> {
        Self::scan(manifest).configs
    }

    #[must_use]
    pub fn scan_commands(manifest: &ModuleManifest) -> Vec<DiscoveredCommand> {
        Self::scan(manifest).commands
    }
}

fn report(outcome: &mut ScanOutcome, err: DiscoveryError) {
    warn!(class = err.class(), error = %err, "Skipping class");
    outcome.errors.push(err);
}

fn classify(entry: &ClassEntry, outcome: &mut ScanOutcome) -> Result<(), DiscoveryError> {
    match entry.declaration() {
        Declaration::Config { descriptor, factory } => {
            let factory = factory.ok_or_else(|| missing_constructor(entry))?;
            validate_config_name(descriptor.name())
                .map_err(|reason| malformed(entry, reason))?;
            outcome.configs.push(DiscoveredConfig {
                class: entry.class(),
                type_id: entry.type_id(),
                descriptor: descriptor.clone(),
                factory,
            });
        },
        Declaration::Command { descriptor, factory } => {
            let factory = factory.ok_or_else(|| missing_constructor(entry))?;
            validate_aliases(descriptor).map_err(|reason| malformed(entry, reason))?;
            outcome.commands.push(DiscoveredCommand {
                class: entry.class(),
                descriptor: descriptor.clone(),
                factory,
            });
        },
        Declaration::Unmarked => {},
    }
    Ok(())
}

fn missing_constructor(entry: &ClassEntry) -> DiscoveryError {
    DiscoveryError::MissingConstructor { class: entry.class(), context: None }
}

fn malformed(entry: &ClassEntry, reason: Cow<'static, str>) -> DiscoveryError {
    DiscoveryError::MalformedMetadata { class: entry.class(), reason, context: None }
}

/// Config names become file stems: ASCII alphanumerics, `-`, `_` and `.`, no leading dot.
fn validate_config_name(name: &str) -> Result<(), Cow<'static, str>> {
    if name.is_empty() {
        return Err("config name is empty".into());
    }
    if name.starts_with('.') {
        return Err(format!("config name '{name}' starts with '.'").into());
    }
    if let Some(c) = name.chars().find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))) {
        return Err(format!("config name '{name}' contains '{c}'").into());
    }
    Ok(())
}

fn validate_aliases(descriptor: &CommandDescriptor) -> Result<(), Cow<'static, str>> {
    if descriptor.aliases.is_empty() {
        return Err("command declares no aliases".into());
    }
    for alias in &descriptor.aliases {
        if alias.is_empty() {
            return Err("command declares an empty alias".into());
        }
        if alias.chars().any(char::is_whitespace) {
            return Err(format!("alias '{alias}' contains whitespace").into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_names_are_path_safe() {
        assert!(validate_config_name("general").is_ok());
        assert!(validate_config_name("module-x.v2").is_ok());
        assert!(validate_config_name("").is_err());
        assert!(validate_config_name(".hidden").is_err());
        assert!(validate_config_name("../escape").is_err());
        assert!(validate_config_name("a b").is_err());
    }
}
