//! Facade crate for hosts embedding `XCore`.
//! Re-exports domain/kernel primitives and drives the host lifecycle.
//! Keep this crate thin: registries live in `xcore-kernel`, this crate wires them together.
//!
//! ## Usage
//! - Build a [`Core`], call [`Core::pre_init`] to publish the capabilities.
//! - Register modules with [`Core::register_module`], then call [`Core::init`].
//! - Forward host reload events to [`Core::on_reload`].

mod command_base;
mod error;
mod help;
mod host;
mod internal;
mod registry;

pub use crate::command_base::HostCommandBase;
pub use crate::error::{CoreError, CoreErrorExt};
pub use crate::help::{HelpEntry, HelpListing};
pub use crate::host::{Core, CoreBuilder, Phase};
pub use crate::internal::XCoreConfig;
pub use crate::registry::RegistryView;
pub use xcore_domain as domain;
pub use xcore_kernel as kernel;

/// Version reported in the startup banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
