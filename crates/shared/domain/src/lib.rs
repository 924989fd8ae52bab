//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `bitflags`).
//! Keep it lean: no I/O or registry logic, just descriptors, identities and settings.

pub mod capability;
pub mod command;
pub mod config;
pub mod constants;
pub mod module;
