/// Identity of the host's own internal module.
pub const CORE_MODULE: &str = "xcore";

/// Default directory holding every module's configuration documents.
pub const DEFAULT_CONFIG_ROOT: &str = "config";

/// Default file extension of configuration documents.
pub const DEFAULT_CONFIG_EXTENSION: &str = "conf";

/// Prefix for environment overrides of the host settings.
pub const ENV_PREFIX: &str = "XCORE";
