use crate::error::{SettingsError, SettingsErrorExt};
use config::{Config, Environment, File, Map};
use std::path::Path;
use tracing::info;
use xcore_domain::config::HostSettings;
use xcore_domain::constants::ENV_PREFIX;

/// Loads host settings from an optional file overlaid with `XCORE__` environment
/// variables.
///
/// Nested keys use a double underscore (`XCORE__LOG__LEVEL` maps to `log.level`).
/// Missing keys fall back to [`HostSettings::default`]; a missing file is not an error.
///
/// # Errors
/// Returns [`SettingsError::Config`] when a source is malformed or a value has the
/// wrong type.
///
/// # Example
/// ```rust
/// use xcore_kernel::settings::load_settings;
///
/// let settings = load_settings(None).unwrap();
/// assert_eq!(settings.config_extension, "conf");
/// ```
pub fn load_settings(path: Option<&Path>) -> Result<HostSettings, SettingsError> {
    load(path, environment())
}

/// Same as [`load_settings`], reading variables from `vars` instead of the process
/// environment.
///
/// # Errors
/// See [`load_settings`].
pub fn load_settings_with_env(
    path: Option<&Path>,
    vars: Map<String, String>,
) -> Result<HostSettings, SettingsError> {
    load(path, environment().source(Some(vars)))
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true)
}

fn load(path: Option<&Path>, environment: Environment) -> Result<HostSettings, SettingsError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        info!("Loading settings from {}", path.display());
        builder = builder.add_source(File::from(path).required(false));
    }

    builder
        .add_source(environment)
        .build()
        .context("Failed to build settings")?
        .try_deserialize::<HostSettings>()
        .context("Failed to deserialize settings")
}
