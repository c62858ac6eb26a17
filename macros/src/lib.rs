//! Proc macros for kacaw-docs.
//!
//! # Config derive macro
//!
//! Generates field path accessors and a commented TOML template.
//!
//! ```ignore
//! #[derive(Config)]
//! #[config(section = "docus.header")]
//! /// Header display options.
//! pub struct HeaderConfig {
//!     /// Show the site logo.
//!     #[config(default = "true")]
//!     pub logo: bool,
//!
//!     /// Show an icon next to external links.
//!     #[config(name = "showLinkIcon", default = "true")]
//!     pub show_link_icon: bool,
//! }
//!
//! // Generates:
//! // - HeaderConfig::FIELDS.show_link_icon -> FieldPath("docus.header.showLinkIcon")
//! // - HeaderConfig::template() -> TOML string with comments
//! // - HeaderConfig::template_with_header() -> with [docus.header] header
//! ```
//!
//! # Attributes
//!
//! Struct-level:
//! - `#[config(section = "path")]` - TOML section path
//!
//! Field-level:
//! - `#[config(skip)]` - Skip from FIELDS and template
//! - `#[config(hidden)]` - Keep in FIELDS, hide from template
//! - `#[config(name = "x")]` - Custom TOML key
//! - `#[config(default = "x")]` - Default value shown in template
//! - `#[config(inline_doc)]` - Single-line doc as trailing comment
//! - `#[config(sub)]` - Nested section, rendered as a pointer
//!
//! # Section inference
//!
//! Without `section` attribute, inferred from struct name:
//! - `AsideConfig` → `aside`
//! - `DocusSectionConfig` → `docus`

mod config;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro that generates FIELDS and template().
#[proc_macro_derive(Config, attributes(config))]
pub fn derive_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    config::derive(&input).into()
}
