//! Typed configuration objects backed by persistent documents.
//!
//! A module declares a config type with `#[xcore_derive::config(name = "...")]` and an
//! [`Config`] impl. On registration the [`ConfigRegistry`] resolves its backing path,
//! creates the document with defaults on first run and loads it into memory.

mod base;
mod registry;

pub use base::{ConfigBase, ConfigLayout, StandardConfigBase};
pub use registry::{ConfigInstance, ConfigRegistry};

use crate::document::ConfigDocument;
use std::any::Any;
use std::fmt::Debug;
use std::ops::{Add, AddAssign};
use xcore_domain::config::ConfigDescriptor;

/// A module's configuration object.
pub trait Config: Any + Debug + Send + Sync {
    /// Writes defaults into a freshly created, empty document.
    fn populate(&self, _root: &mut ConfigDocument) {}

    /// Called after every successful load or reload with the new root.
    fn loaded(&mut self, _root: &ConfigDocument) {}
}

/// Compile-time registration metadata, implemented by `#[xcore_derive::config]`.
pub trait ConfigType: Config + Sized {
    fn descriptor() -> ConfigDescriptor;
}

/// Phase of a config instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Discovered,
    /// Defaults written into a new document.
    Populated,
    Loaded,
    Active,
}

/// Outcome of a reload sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReloadSummary {
    pub reloaded: usize,
    /// Reload-exempt instances.
    pub skipped: usize,
    pub failed: usize,
}

impl ReloadSummary {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.reloaded + self.skipped + self.failed
    }

    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

impl Add for ReloadSummary {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            reloaded: self.reloaded + rhs.reloaded,
            skipped: self.skipped + rhs.skipped,
            failed: self.failed + rhs.failed,
        }
    }
}

impl AddAssign for ReloadSummary {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for ReloadSummary {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
