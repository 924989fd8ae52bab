//! A small sample module: a bank account config and a nested command tree.

use xcore_kernel::config::Config;
use xcore_kernel::document::ConfigDocument;
use xcore_kernel::manifest::ModuleManifest;

pub(crate) const MODULE: &str = "economy";

#[xcore_derive::config(name = "bank")]
#[derive(Debug, Default)]
pub(crate) struct BankConfig {
    starting_balance: i64,
}

impl BankConfig {
    pub(crate) const fn starting_balance(&self) -> i64 {
        self.starting_balance
    }
}

impl Config for BankConfig {
    fn populate(&self, root: &mut ConfigDocument) {
        root.set("account.starting-balance", 100_i64);
        root.comment("account.starting-balance", "Balance of newly opened accounts");
        root.set("account.currency", "coins");
    }

    fn loaded(&mut self, root: &ConfigDocument) {
        self.starting_balance = root.get_integer("account.starting-balance").unwrap_or(100);
    }
}

#[xcore_derive::config(name = "economy", shared_root, no_reload)]
#[derive(Debug, Default)]
pub(crate) struct EconomyToggle;

impl Config for EconomyToggle {
    fn populate(&self, root: &mut ConfigDocument) {
        root.set("enabled", true);
    }
}

#[xcore_derive::command(aliases("bank", "b"), permission = "economy.bank", description = "Bank account tools")]
#[derive(Debug, Default)]
pub(crate) struct BankCommand;

#[xcore_derive::command(aliases("deposit", "dep"), parent = BankCommand, permission = "economy.bank.deposit", description = "Deposit coins")]
#[derive(Debug, Default)]
pub(crate) struct DepositCommand;

#[xcore_derive::command(aliases("withdraw"), parent = BankCommand, permission = "economy.bank.withdraw", description = "Withdraw coins")]
#[derive(Debug, Default)]
pub(crate) struct WithdrawCommand;

#[xcore_derive::command(aliases("balance", "bal"), description = "Shows your balance", lite)]
#[derive(Debug, Default)]
pub(crate) struct BalanceCommand;

pub(crate) fn manifest() -> ModuleManifest {
    ModuleManifest::new()
        .config::<BankConfig>()
        .config::<EconomyToggle>()
        .command::<BankCommand>()
        .command::<DepositCommand>()
        .command::<WithdrawCommand>()
        .command::<BalanceCommand>()
}
