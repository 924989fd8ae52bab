use clap::Parser;
use std::path::PathBuf;
use xcore::domain::module::ModuleId;

/// Boots an XCore host with the bundled sample module.
#[derive(Debug, Parser)]
#[command(name = "xcore-host")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub(crate) struct Cli {
    /// Host settings file (TOML); `XCORE__*` environment variables override it
    #[arg(short, long)]
    pub(crate) settings: Option<PathBuf>,

    /// Directory holding configuration documents
    #[arg(short, long)]
    pub(crate) config_root: Option<PathBuf>,

    /// Run a reload sweep after startup
    #[arg(short, long)]
    pub(crate) reload: bool,

    /// Print command help for this module only; repeatable
    #[arg(short, long = "module", value_parser = parse_module)]
    pub(crate) modules: Vec<ModuleId>,
}

fn parse_module(value: &str) -> Result<ModuleId, String> {
    ModuleId::try_from(value).map_err(|err| err.to_string())
}
