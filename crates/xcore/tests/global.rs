use serial_test::serial;
use xcore::Core;
use xcore::kernel::capability::Capabilities;
use xcore_domain::capability::CapabilityKind;

#[test]
#[serial]
fn default_core_publishes_into_the_process_wide_set() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = Core::builder().config_root(dir.path()).build();

    assert!(!Capabilities::global().is_published(CapabilityKind::ConfigBase));
    core.pre_init().unwrap();
    core.init().unwrap();

    assert_eq!(Capabilities::global().published(), CapabilityKind::ALL);
    assert!(dir.path().join("xcore.conf").is_file());
}
