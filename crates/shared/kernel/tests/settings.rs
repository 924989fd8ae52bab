use std::fs;
use std::path::PathBuf;
use xcore_kernel::config::ConfigLayout;
use xcore_kernel::settings::load_settings_with_env;

#[test]
fn defaults_apply_without_sources() {
    let settings = load_settings_with_env(None, config::Map::new()).unwrap();

    assert_eq!(settings.config_root, PathBuf::from("config"));
    assert_eq!(settings.config_extension, "conf");
    assert_eq!(settings.log.level, "info");
    assert!(settings.log.console);
    assert!(settings.log.directory.is_none());
}

#[test]
fn file_and_environment_are_layered() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("xcore.toml");
    fs::write(&path, "config_root = \"data\"\n\n[log]\nlevel = \"debug\"\nconsole = true\n").unwrap();

    let mut vars = config::Map::new();
    vars.insert("XCORE__LOG__CONSOLE".to_owned(), "false".to_owned());
    vars.insert("XCORE__CONFIG_EXTENSION".to_owned(), "toml".to_owned());
    let settings = load_settings_with_env(Some(&path), vars).unwrap();

    assert_eq!(settings.config_root, PathBuf::from("data"));
    assert_eq!(settings.log.level, "debug");
    assert!(!settings.log.console);
    assert_eq!(ConfigLayout::from_settings(&settings).extension(), "toml");
}

#[test]
fn missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let settings =
        load_settings_with_env(Some(&dir.path().join("absent.toml")), config::Map::new()).unwrap();
    assert_eq!(settings.config_extension, "conf");
}

#[test]
fn wrong_types_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("xcore.toml");
    fs::write(&path, "[log]\nconsole = \"sometimes\"\n").unwrap();

    let err = load_settings_with_env(Some(&path), config::Map::new()).unwrap_err();
    assert!(err.to_string().contains("deserialize"));
}
