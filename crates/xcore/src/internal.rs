use xcore_kernel::config::Config;
use xcore_kernel::document::ConfigDocument;
use xcore_kernel::manifest::ModuleManifest;

const TITLE_KEY: &str = "help.title";
const PADDING_KEY: &str = "help.padding";
pub(crate) const DEFAULT_TITLE: &str = "Command List";
pub(crate) const DEFAULT_PADDING: &str = "-=";

/// Shared-root configuration of the internal `xcore` module.
#[xcore_derive::config(name = "xcore", shared_root)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XCoreConfig {
    help_title: String,
    help_padding: String,
}

impl XCoreConfig {
    #[must_use]
    pub fn help_title(&self) -> &str {
        &self.help_title
    }

    #[must_use]
    pub fn help_padding(&self) -> &str {
        &self.help_padding
    }
}

impl Default for XCoreConfig {
    fn default() -> Self {
        Self { help_title: DEFAULT_TITLE.to_owned(), help_padding: DEFAULT_PADDING.to_owned() }
    }
}

impl Config for XCoreConfig {
    fn populate(&self, root: &mut ConfigDocument) {
        root.set(TITLE_KEY, self.help_title.as_str());
        root.set(PADDING_KEY, self.help_padding.as_str());
        root.comment("help", "Help listing shown for every module");
    }

    fn loaded(&mut self, root: &ConfigDocument) {
        self.help_title = root.get_str(TITLE_KEY).unwrap_or(DEFAULT_TITLE).to_owned();
        self.help_padding = root.get_str(PADDING_KEY).unwrap_or(DEFAULT_PADDING).to_owned();
    }
}

#[xcore_derive::command(aliases("xcore", "xc"), permission = "xcore.info", description = "XCore information")]
#[derive(Debug, Default)]
pub(crate) struct XCoreCommand;

#[xcore_derive::command(aliases("version", "ver"), parent = XCoreCommand, description = "Shows the running XCore version")]
#[derive(Debug, Default)]
pub(crate) struct VersionCommand;

#[xcore_derive::command(aliases("help"), parent = XCoreCommand, description = "Lists the commands of a module", lite)]
#[derive(Debug, Default)]
pub(crate) struct HelpCommand;

#[xcore_derive::command(aliases("reload"), parent = XCoreCommand, permission = "xcore.reload", description = "Reloads every reloadable configuration")]
#[derive(Debug, Default)]
pub(crate) struct ReloadCommand;

/// Declared types of the internal module.
pub(crate) fn manifest() -> ModuleManifest {
    ModuleManifest::new()
        .config::<XCoreConfig>()
        .command::<XCoreCommand>()
        .command::<VersionCommand>()
        .command::<HelpCommand>()
        .command::<ReloadCommand>()
}
