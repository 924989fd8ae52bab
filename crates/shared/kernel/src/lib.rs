//! Discovery and registry core shared by the host and the modules it loads.
//!
//! A module lists its types in a [`manifest::ModuleManifest`]; registration scans the
//! manifest, builds the module's [`config::ConfigRegistry`] and
//! [`command::CommandRegistry`] and keeps both in a [`module::ModuleEntry`].
//! Host-provided implementations reach modules through write-once
//! [`capability::Capabilities`] slots.
//!
//! ```rust
//! use std::sync::Arc;
//! use xcore_kernel::capability::Capabilities;
//! use xcore_kernel::config::{ConfigLayout, StandardConfigBase};
//! use xcore_kernel::manifest::ModuleManifest;
//! use xcore_kernel::module::ModuleEntry;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let capabilities = Capabilities::new();
//! capabilities
//!     .config_base
//!     .publish(Arc::new(StandardConfigBase::on_disk(ConfigLayout::new(dir.path(), "conf"))))
//!     .unwrap();
//!
//! let id = "economy".try_into().unwrap();
//! let entry = ModuleEntry::register(id, &ModuleManifest::new(), &capabilities).unwrap();
//! assert!(entry.commands().is_empty());
//! ```

pub mod capability;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod manifest;
pub mod module;
pub mod scanner;
pub mod settings;
pub mod store;

pub use xcore_domain as domain;
