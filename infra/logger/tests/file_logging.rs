use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use xcore_domain::config::LogSettings;
use xcore_logger::{Logger, ModuleLogger};

#[test]
fn fresh_file_logging_records_module_events() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");
    fs::create_dir_all(&log_dir)?;
    fs::write(log_dir.join("integration-host.log"), "previous run\n")?;

    let settings = LogSettings {
        directory: Some(log_dir.clone()),
        level: "info".to_owned(),
        console: false,
        fresh: true,
    };
    let logger = Logger::from_settings("integration-host", &settings)?;

    ModuleLogger::new("economy").info("Initializing configuration for 'bank.conf'");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let content = fs::read_to_string(log_dir.join("integration-host.log"))?;
    assert!(!content.contains("previous run"), "fresh logging should truncate the old file");
    assert!(content.contains("bank.conf"));
    assert!(content.contains("economy"));

    Ok(())
}
