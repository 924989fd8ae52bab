#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the module registry.
//! Registration metadata that other plugin systems discover by runtime reflection is
//! declared here as attributes and expanded into trait impls at compile time, so a
//! module manifest only has to list its types.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! xcore-derive = { path = "../infra/derive" }
//! xcore-kernel = { path = "../crates/shared/kernel" }
//! ```
//!
//! The generated code refers to `::xcore_kernel`, so consumers must depend on it directly.
//! Examples are `ignore`d to avoid compiling in this crate.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Attribute macro declaring a configuration type.
///
/// Implements `xcore_kernel::config::ConfigType` for the struct. The struct still has to
/// implement `xcore_kernel::config::Config` (its default-population routine).
///
/// # Arguments
///
/// * `name = "..."` - File stem of the backing document (required).
/// * `shared_root` - Store the document directly under the shared config root.
/// * `no_reload` - Exclude the instance from the bulk reload sweep.
///
/// # Example
///
/// ```rust,ignore
/// #[xcore_derive::config(name = "general", shared_root)]
/// #[derive(Debug, Default)]
/// pub struct GeneralConfig;
///
/// impl xcore_kernel::config::Config for GeneralConfig {
///     fn populate(&self, root: &mut xcore_kernel::document::ConfigDocument) {
///         root.set("motd", "Welcome!");
///         root.comment("motd", "Shown on join");
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn config(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::config::expand_config(args.into(), input).into()
}

/// Attribute macro declaring a command type.
///
/// Implements `xcore_kernel::command::CommandType` for the struct.
///
/// # Arguments
///
/// * `aliases("first", "second")` - Ordered aliases, the first is canonical (required).
/// * `permission = "..."` - Permission node; omitted means no permission is required.
/// * `description = "..."` - Help text.
/// * `parent = Path` - Parent command type.
/// * `lite` - Register as a lite command.
///
/// # Example
///
/// ```rust,ignore
/// #[xcore_derive::command(aliases("home", "h"), permission = "home.use", description = "Go home")]
/// #[derive(Debug, Default)]
/// pub struct HomeCommand;
///
/// #[xcore_derive::command(aliases("set"), description = "Set home", parent = HomeCommand)]
/// #[derive(Debug, Default)]
/// pub struct SetHomeCommand;
/// ```
#[proc_macro_attribute]
pub fn command(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::command::expand_command(args.into(), input).into()
}

/// A high-level attribute macro for defining error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a source field,
///   enabling the use of the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides `From<&'static str>` and `From<String>` if an
///   `Internal` variant is present.
/// * **Severity**: Variants marked `#[fatal]` make `is_fatal()` return `true`; every other
///   variant is recoverable.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`), plus a context field.
/// 4. Tuple or unit variants are rejected.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[xcore_derive::xcore_error]
/// pub enum StoreError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[fatal]
///     #[error("Corrupted state{}: {message}", format_context(.context))]
///     Corrupted { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn xcore_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_error(input).into()
}
