mod cli;
mod economy;

use crate::cli::Cli;
use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use xcore::Core;
use xcore::domain::module::ModuleId;
use xcore::kernel::settings::load_settings;
use xcore_logger::Logger;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings =
        load_settings(cli.settings.as_deref()).context("Critical: Settings are malformed")?;
    if let Some(root) = cli.config_root {
        settings.config_root = root;
    }

    let _log = Logger::from_settings(env!("CARGO_PKG_NAME"), &settings.log)?;

    let mut core = Core::builder().settings(settings).build();
    core.pre_init()?;

    let economy = ModuleId::try_from(economy::MODULE)?;
    let entry = core.register_module(economy.clone(), &economy::manifest())?;
    for err in entry.errors() {
        warn!(module = %economy, error = %err, "Module declared a faulty type");
    }

    core.init()?;

    if let Some(bank) = entry.configs().get_config::<economy::BankConfig>()
        && let Some(config) = bank.get::<economy::BankConfig>()
    {
        info!(starting_balance = config.starting_balance(), "Economy module ready");
    }

    if cli.reload {
        let summary = core.on_reload();
        info!(reloaded = summary.reloaded, failed = summary.failed, "Reload requested from CLI");
    }

    let modules = if cli.modules.is_empty() { core.module_ids() } else { cli.modules };
    for module in &modules {
        let listing = core.help(module)?;
        for line in listing.to_string().lines() {
            info!(module = %module, "{line}");
        }
    }

    Ok(())
}
