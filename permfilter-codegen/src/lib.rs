//! Code generation for `permfilter`.
//!
//! Turns a language-neutral model of messages and their annotated fields into
//! `FilterFields` implementations. Two front ends drive it:
//! - the `protoc-gen-permfilter` plugin, which reads descriptors and the
//!   `(permfilter.permission)` field option (the `plugin` feature)
//! - `#[derive(FilterFields)]` in `permfilter-derive`, which reads Rust struct
//!   definitions
//!
//! Pipeline:
//! 1. [`schema`]: the message model
//! 2. [`classify`]: which zero value an annotated field is reset to
//! 3. [`naming`]: `prost`-compatible identifiers
//! 4. [`emit`]: token generation
//!
//! The generated code only names items of the runtime crate, so this crate
//! has no dependency on it.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod classify;
pub mod emit;
pub mod naming;
pub mod schema;

#[cfg(feature = "plugin")]
pub mod descriptor;
#[cfg(feature = "plugin")]
mod error;
#[cfg(feature = "plugin")]
pub mod options;
#[cfg(feature = "plugin")]
pub mod plugin;
#[cfg(feature = "plugin")]
pub mod resolve;

pub use classify::{classify, FieldRedaction, ZeroValue};
pub use emit::{emit_file, emit_file_items, emit_message, FieldFilter, FieldTarget, MessageFilter};
#[cfg(feature = "plugin")]
pub use error::GenerateError;
#[cfg(feature = "plugin")]
pub use options::{GeneratorOptions, PathMode};
pub use schema::{FieldCategory, FieldDef, FieldShape, FileDef, MessageDef, Presence, ScalarKind};
