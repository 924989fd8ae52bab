use std::any::TypeId;
use std::borrow::Cow;
use xcore_kernel::config::Config;
use xcore_kernel::domain::command::{CommandDescriptor, CommandKey, CommandKind, ParentRef};
use xcore_kernel::domain::config::ConfigDescriptor;
use xcore_kernel::error::DiscoveryError;
use xcore_kernel::manifest::{ClassEntry, Declaration, ModuleManifest};
use xcore_kernel::scanner::AnnotationScanner;

#[xcore_derive::config(name = "general", shared_root)]
#[derive(Debug, Default)]
struct General;

impl Config for General {}

#[xcore_derive::command(aliases("pay"))]
#[derive(Debug, Default)]
struct Pay;

#[derive(Debug, Default)]
struct Helper;

#[derive(Debug)]
struct NoDefault;

fn make_general() -> Box<dyn Config> {
    Box::new(General)
}

fn unit_command() -> Box<dyn xcore_kernel::command::Command> {
    Box::new(())
}

fn raw_command(name: &'static str, aliases: &[&'static str]) -> ClassEntry {
    struct Marker;
    let descriptor = CommandDescriptor {
        key: CommandKey::of::<Marker>(),
        kind: CommandKind::Standard,
        aliases: aliases.iter().map(|a| Cow::Borrowed(*a)).collect(),
        permission: Cow::Borrowed(""),
        description: Cow::Borrowed(""),
        parent: ParentRef::NoParent,
    };
    ClassEntry::new(
        name,
        TypeId::of::<(Marker, &'static str)>(),
        Declaration::Command { descriptor, factory: Some(unit_command) },
    )
}

#[test]
fn scan_classifies_marked_entries_in_order() {
    let manifest =
        ModuleManifest::new().unmarked::<Helper>().command::<Pay>().config::<General>();

    let outcome = AnnotationScanner::scan(&manifest);

    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.configs.len(), 1);
    assert_eq!(outcome.configs[0].descriptor.name(), "general");
    assert_eq!(outcome.commands.len(), 1);
    assert_eq!(outcome.commands[0].descriptor.canonical_alias(), "pay");
}

#[test]
fn missing_constructor_skips_only_that_class() {
    let manifest = ModuleManifest::new()
        .class(ClassEntry::new(
            "NoDefault",
            TypeId::of::<NoDefault>(),
            Declaration::Config { descriptor: ConfigDescriptor::new("nodefault"), factory: None },
        ))
        .config::<General>();

    let outcome = AnnotationScanner::scan(&manifest);

    assert_eq!(outcome.configs.len(), 1);
    assert_eq!(outcome.errors.len(), 1);
    assert!(matches!(
        &outcome.errors[0],
        DiscoveryError::MissingConstructor { class, .. } if class == "NoDefault"
    ));
}

#[test]
fn faulty_declaration_does_not_claim_the_type() {
    let manifest = ModuleManifest::new()
        .class(ClassEntry::new(
            "General",
            TypeId::of::<General>(),
            Declaration::Config { descriptor: ConfigDescriptor::new("general"), factory: None },
        ))
        .config::<General>();

    let outcome = AnnotationScanner::scan(&manifest);

    assert_eq!(outcome.configs.len(), 1);
    assert_eq!(outcome.configs[0].type_id, TypeId::of::<General>());
    assert!(matches!(outcome.errors.as_slice(), [DiscoveryError::MissingConstructor { .. }]));
}

#[test]
fn malformed_metadata_is_reported() {
    let manifest = ModuleManifest::new()
        .class(ClassEntry::new(
            "Escaping",
            TypeId::of::<NoDefault>(),
            Declaration::Config {
                descriptor: ConfigDescriptor::new("../escape"),
                factory: Some(make_general),
            },
        ))
        .class(raw_command("NoAliases", &[]))
        .command::<Pay>();

    let outcome = AnnotationScanner::scan(&manifest);

    assert!(outcome.configs.is_empty());
    assert_eq!(outcome.commands.len(), 1);
    assert_eq!(outcome.errors.len(), 2);
    assert!(
        outcome
            .errors
            .iter()
            .all(|err| matches!(err, DiscoveryError::MalformedMetadata { .. }) && !err.is_fatal())
    );
}

#[test]
fn whitespace_alias_is_malformed() {
    let manifest = ModuleManifest::new().class(raw_command("Spaced", &["two words"]));
    let outcome = AnnotationScanner::scan(&manifest);
    assert!(outcome.commands.is_empty());
    assert_eq!(outcome.errors[0].class(), "Spaced");
}

#[test]
fn duplicate_declaration_reports_later_entry() {
    let manifest = ModuleManifest::new().command::<Pay>().command::<Pay>();

    let outcome = AnnotationScanner::scan(&manifest);

    assert_eq!(outcome.commands.len(), 1);
    assert!(matches!(outcome.errors.as_slice(), [DiscoveryError::Duplicate { .. }]));
}

#[test]
fn kind_specific_scans() {
    let manifest = ModuleManifest::new().command::<Pay>().config::<General>();
    assert_eq!(AnnotationScanner::scan_configs(&manifest).len(), 1);
    assert_eq!(AnnotationScanner::scan_commands(&manifest).len(), 1);
}
