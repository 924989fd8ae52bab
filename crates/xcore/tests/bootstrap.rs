use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use xcore::kernel::capability::Capabilities;
use xcore::kernel::config::{Config, ConfigLayout, StandardConfigBase};
use xcore::kernel::document::ConfigDocument;
use xcore::kernel::manifest::ModuleManifest;
use xcore::{Core, CoreError, Phase, XCoreConfig};
use xcore_domain::capability::CapabilityKind;
use xcore_domain::module::ModuleId;

#[xcore_derive::config(name = "bank")]
#[derive(Debug, Default)]
struct BankConfig;

impl Config for BankConfig {
    fn populate(&self, root: &mut ConfigDocument) {
        root.set("interest", 0.5);
    }
}

#[xcore_derive::command(aliases("bank"), description = "Bank tools")]
#[derive(Debug, Default)]
struct Bank;

#[xcore_derive::command(aliases("deposit", "dep"), parent = Bank, description = "Deposit coins")]
#[derive(Debug, Default)]
struct Deposit;

#[xcore_derive::command(aliases("pay"), permission = "economy.pay", description = "Pay a player", lite)]
#[derive(Debug, Default)]
struct Pay;

fn economy() -> ModuleManifest {
    ModuleManifest::new().config::<BankConfig>().command::<Bank>().command::<Deposit>().command::<Pay>()
}

fn id(value: &str) -> ModuleId {
    ModuleId::try_from(value).unwrap()
}

fn core(dir: &TempDir, capabilities: &Arc<Capabilities>) -> Core {
    Core::builder().config_root(dir.path()).capabilities(Arc::clone(capabilities)).build()
}

#[test]
fn registering_before_pre_init_fails_fatally() {
    let dir = tempfile::tempdir().unwrap();
    let core = core(&dir, &Arc::new(Capabilities::new()));

    let err = core.register_module(id("economy"), &economy()).unwrap_err();

    assert!(matches!(err, CoreError::Capability { .. }));
    assert!(err.is_fatal());
    assert!(!dir.path().join("economy").exists());
}

#[test]
fn full_lifecycle_registers_modules_and_internal_config() {
    let dir = tempfile::tempdir().unwrap();
    let capabilities = Arc::new(Capabilities::new());
    let mut core = core(&dir, &capabilities);
    assert_eq!(core.phase(), Phase::Constructed);

    core.pre_init().unwrap();
    assert_eq!(capabilities.published().len(), 4);

    let economy_entry = core.register_module(id("economy"), &economy()).unwrap();
    assert_eq!(economy_entry.commands().len(), 3);
    assert!(dir.path().join("economy").join("bank.conf").is_file());

    core.init().unwrap();
    assert_eq!(core.phase(), Phase::Initialized);
    assert_eq!(core.module_ids(), [id("economy"), id("xcore")]);

    let internal = fs::read_to_string(dir.path().join("xcore.conf")).unwrap();
    assert!(internal.contains("title = \"Command List\""));
    assert!(internal.contains("padding = \"-=\""));

    let registry = capabilities.core_registry.get().unwrap();
    assert_eq!(registry.module_ids().len(), 2);
    assert!(registry.module(&id("economy")).is_some());
}

#[test]
fn lifecycle_steps_must_run_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(&dir, &Arc::new(Capabilities::new()));

    let err = core.init().unwrap_err();
    assert!(matches!(err, CoreError::Lifecycle { .. }));
    assert!(err.is_fatal());

    core.pre_init().unwrap();
    assert!(matches!(core.pre_init(), Err(CoreError::Lifecycle { .. })));
}

#[test]
fn shared_capability_set_cannot_be_published_twice() {
    let dir = tempfile::tempdir().unwrap();
    let capabilities = Arc::new(Capabilities::new());
    core(&dir, &capabilities).pre_init().unwrap();

    let err = core(&dir, &capabilities).pre_init().unwrap_err();

    assert!(matches!(err, CoreError::Capability { .. }));
    assert!(err.is_fatal());
    assert!(err.to_string().contains("already published"));
}

#[test]
fn partially_published_set_is_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let capabilities = Arc::new(Capabilities::new());
    capabilities
        .config_base
        .publish(Arc::new(StandardConfigBase::on_disk(ConfigLayout::new(dir.path(), "conf"))))
        .unwrap();
    let mut core = core(&dir, &capabilities);

    let err = core.pre_init().unwrap_err();

    assert!(matches!(err, CoreError::Capability { .. }));
    assert!(err.is_fatal());
    assert_eq!(core.phase(), Phase::Constructed);
    assert_eq!(capabilities.published(), [CapabilityKind::ConfigBase]);
}

#[test]
fn duplicate_module_ids_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(&dir, &Arc::new(Capabilities::new()));
    core.pre_init().unwrap();
    core.register_module(id("economy"), &economy()).unwrap();

    let err = core.register_module(id("Economy"), &ModuleManifest::new()).unwrap_err();

    assert!(matches!(err, CoreError::DuplicateModule { .. }));
    assert!(!err.is_fatal());
}

#[test]
fn help_lists_alias_paths_with_configured_style() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(&dir, &Arc::new(Capabilities::new()));
    core.pre_init().unwrap();
    core.register_module(id("economy"), &economy()).unwrap();
    core.init().unwrap();

    let help = core.help(&id("economy")).unwrap();
    assert_eq!(help.title(), "Command List");
    assert_eq!(help.padding(), "-=");
    assert_eq!(
        help.lines().collect::<Vec<_>>(),
        ["/bank - Bank tools", "/bank deposit - Deposit coins", "/pay - Pay a player"]
    );
    assert!(help.to_string().starts_with("-= Command List -=\n"));

    let internal = core.help(&id("xcore")).unwrap();
    assert!(internal.lines().any(|line| line == "/xcore version - Shows the running XCore version"));

    assert!(matches!(core.help(&id("missing")), Err(CoreError::UnknownModule { .. })));
}

#[test]
fn reload_picks_up_edited_documents() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(&dir, &Arc::new(Capabilities::new()));
    core.pre_init().unwrap();
    core.register_module(id("economy"), &economy()).unwrap();
    core.init().unwrap();

    fs::write(dir.path().join("xcore.conf"), "[help]\ntitle = \"Economy Help\"\npadding = \"~\"\n")
        .unwrap();
    let summary = core.on_reload();

    assert_eq!(summary.reloaded, 2);
    assert!(summary.is_clean());
    let help = core.help(&id("economy")).unwrap();
    assert_eq!(help.title(), "Economy Help");
    assert_eq!(help.padding(), "~");

    let xcore = core.module(&id("xcore")).unwrap();
    let config = xcore.configs().get_config::<XCoreConfig>().unwrap();
    assert_eq!(config.get::<XCoreConfig>().unwrap().help_title(), "Economy Help");
}
