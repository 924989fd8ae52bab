use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use xcore_kernel::config::{
    Config, ConfigLayout, ConfigRegistry, Lifecycle, ReloadSummary, StandardConfigBase,
};
use xcore_kernel::document::ConfigDocument;
use xcore_kernel::domain::module::ModuleId;
use xcore_kernel::error::{DiscoveryError, PersistenceError};
use xcore_kernel::manifest::ModuleManifest;
use xcore_kernel::scanner::AnnotationScanner;
use xcore_kernel::store::DocumentStore;
use xcore_logger::ModuleLogger;

#[xcore_derive::config(name = "general", shared_root)]
#[derive(Debug, Default)]
struct General;

impl Config for General {
    fn populate(&self, root: &mut ConfigDocument) {
        root.set("greeting", "hello");
        root.comment("greeting", "Shown to every joining player");
        root.set("limits.max", 5_i64);
    }
}

#[xcore_derive::config(name = "module-x")]
#[derive(Debug, Default)]
struct Limits {
    max: i64,
}

impl Config for Limits {
    fn populate(&self, root: &mut ConfigDocument) {
        root.set("max", 10_i64);
    }

    fn loaded(&mut self, root: &ConfigDocument) {
        self.max = root.get_integer("max").unwrap_or_default();
    }
}

#[xcore_derive::config(name = "pinned", no_reload)]
#[derive(Debug, Default)]
struct Pinned;

impl Config for Pinned {
    fn populate(&self, root: &mut ConfigDocument) {
        root.set("value", "original");
    }
}

#[xcore_derive::config(name = "module-x")]
#[derive(Debug, Default)]
struct SamePath;

impl Config for SamePath {}

#[xcore_derive::config(name = "unused")]
#[derive(Debug, Default)]
struct Unused;

impl Config for Unused {}

/// Store on a read-only medium: nothing exists and every read or write fails.
#[derive(Debug)]
struct ReadOnlyStore;

impl DocumentStore for ReadOnlyStore {
    fn exists(&self, _path: &Path) -> bool {
        false
    }

    fn ensure_dir(&self, _dir: &Path) -> Result<(), PersistenceError> {
        Ok(())
    }

    fn load(&self, _path: &Path) -> Result<ConfigDocument, PersistenceError> {
        Err(io::Error::from(io::ErrorKind::NotFound).into())
    }

    fn save(&self, _path: &Path, _document: &ConfigDocument) -> Result<(), PersistenceError> {
        Err(io::Error::from(io::ErrorKind::PermissionDenied).into())
    }
}

fn module_x() -> ModuleId {
    ModuleId::try_from("x").unwrap()
}

fn build(root: &Path, manifest: &ModuleManifest) -> ConfigRegistry {
    let base = StandardConfigBase::on_disk(ConfigLayout::new(root, "conf"));
    let logger = ModuleLogger::new("x");
    ConfigRegistry::create(&module_x(), &logger, AnnotationScanner::scan_configs(manifest), &base)
}

fn sandbox() -> TempDir {
    tempfile::tempdir().unwrap()
}

#[test]
fn first_run_creates_documents_at_resolved_paths() {
    let dir = sandbox();
    let registry = build(dir.path(), &ModuleManifest::new().config::<General>().config::<Limits>());

    let general = registry.get_config::<General>().unwrap();
    assert_eq!(general.path(), dir.path().join("general.conf"));
    let limits = registry.get_config::<Limits>().unwrap();
    assert_eq!(limits.path(), dir.path().join("x").join("module-x.conf"));

    let on_disk = fs::read_to_string(general.path()).unwrap();
    assert_eq!(on_disk, general.read().to_string());
    assert!(on_disk.contains("# Shown to every joining player"));
    assert_eq!(general.read().get_integer("limits.max"), Some(5));
    assert_eq!(general.phase(), Lifecycle::Active);
}

#[test]
fn existing_document_is_loaded_without_defaults() {
    let dir = sandbox();
    let text = "# hand edited\ngreeting = \"custom\"\n";
    fs::write(dir.path().join("general.conf"), text).unwrap();

    let registry = build(dir.path(), &ModuleManifest::new().config::<General>());
    let general = registry.get_config::<General>().unwrap();

    assert_eq!(general.read().to_string(), text);
    assert!(!general.read().contains("limits.max"));
    assert_eq!(fs::read_to_string(general.path()).unwrap(), text);
}

#[test]
fn typed_access_sees_loaded_values() {
    let dir = sandbox();
    let registry = build(dir.path(), &ModuleManifest::new().config::<Limits>());
    let instance = registry.get_config::<Limits>().unwrap();

    assert_eq!(instance.get::<Limits>().unwrap().max, 10);
    assert!(instance.get::<General>().is_none());
    assert!(registry.get_config::<Unused>().is_none());

    fs::write(instance.path(), "max = 42\n").unwrap();
    registry.reload_all();
    assert_eq!(instance.get::<Limits>().unwrap().max, 42);
}

#[test]
fn reload_discards_memory_and_is_idempotent() {
    let dir = sandbox();
    let registry = build(dir.path(), &ModuleManifest::new().config::<General>());
    let general = registry.get_config::<General>().unwrap();

    general.write().set("greeting", "changed in memory");
    let summary = registry.reload_all();
    assert_eq!(summary, ReloadSummary { reloaded: 1, skipped: 0, failed: 0 });
    assert_eq!(general.read().get_str("greeting"), Some("hello"));

    let first = general.read().to_string();
    registry.reload_all();
    assert_eq!(general.read().to_string(), first);
}

#[test]
fn reload_exempt_instance_keeps_state() {
    let dir = sandbox();
    let registry = build(dir.path(), &ModuleManifest::new().config::<Pinned>().config::<Limits>());
    let pinned = registry.get_config::<Pinned>().unwrap();

    fs::write(pinned.path(), "value = \"edited\"\n").unwrap();
    let summary = registry.reload_all();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.reloaded, 1);
    assert_eq!(pinned.read().get_str("value"), Some("original"));
}

#[test]
fn failed_reload_keeps_last_known_good_root() {
    let dir = sandbox();
    let registry = build(dir.path(), &ModuleManifest::new().config::<General>().config::<Limits>());
    let general = registry.get_config::<General>().unwrap();
    let before = general.read().to_string();

    fs::write(general.path(), "greeting = = broken").unwrap();
    let summary = registry.reload_all();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.reloaded, 1);
    assert!(!summary.is_clean());
    assert_eq!(general.read().to_string(), before);
    assert_eq!(general.phase(), Lifecycle::Active);
}

#[test]
fn unreadable_document_leaves_instance_registered() {
    let dir = sandbox();
    fs::write(dir.path().join("general.conf"), "not toml at all [").unwrap();

    let registry = build(dir.path(), &ModuleManifest::new().config::<General>());
    let general = registry.get_config::<General>().unwrap();

    assert_eq!(general.phase(), Lifecycle::Discovered);
    assert!(general.read().is_empty());
}

#[test]
fn save_persists_in_memory_changes() {
    let dir = sandbox();
    let registry = build(dir.path(), &ModuleManifest::new().config::<Limits>());
    let limits = registry.get_config::<Limits>().unwrap();

    limits.write().set("max", 99_i64);
    limits.save().unwrap();
    registry.reload_all();

    assert_eq!(limits.read().get_integer("max"), Some(99));
    assert!(fs::read_to_string(limits.path()).unwrap().contains("99"));
}

#[test]
fn colliding_paths_reject_later_config() {
    let dir = sandbox();
    let registry =
        build(dir.path(), &ModuleManifest::new().config::<Limits>().config::<SamePath>());

    assert_eq!(registry.len(), 1);
    assert!(registry.get_config::<SamePath>().is_none());
    assert!(matches!(registry.rejected(), [DiscoveryError::PathCollision { .. }]));
}

#[test]
fn directory_creation_is_idempotent() {
    let dir = sandbox();
    fs::create_dir_all(dir.path().join("x")).unwrap();
    let registry = build(dir.path(), &ModuleManifest::new().config::<Limits>());
    assert!(registry.get_config::<Limits>().unwrap().path().is_file());
}

#[test]
fn failed_first_save_keeps_defaults_in_memory() {
    let dir = sandbox();
    let base = StandardConfigBase::new(ConfigLayout::new(dir.path(), "conf"), Arc::new(ReadOnlyStore));
    let registry = ConfigRegistry::create(
        &module_x(),
        &ModuleLogger::new("x"),
        AnnotationScanner::scan_configs(&ModuleManifest::new().config::<Limits>()),
        &base,
    );

    let limits = registry.get_config::<Limits>().unwrap();
    assert_eq!(limits.phase(), Lifecycle::Populated);
    assert_eq!(limits.read().get_integer("max"), Some(10));
    assert_eq!(limits.get::<Limits>().unwrap().max, 10);
    assert!(limits.save().is_err());
    assert!(!limits.path().exists());
}
