//! Permission-masked field filtering for generated messages.
//!
//! This crate is the runtime half of `permfilter`:
//! - **Registry**: assigns every permission identifier a stable, dense index
//!   for the life of the process.
//! - **Mask**: a [`BitSet`] of the indices an authorization context holds.
//! - **Filtering**: generated [`FilterFields`] implementations clear each
//!   annotated field whose permission the mask does not hold.
//!
//! Filters are generated either by `protoc-gen-permfilter` from
//! `(permfilter.permission)` field options, or by `#[derive(FilterFields)]`
//! with `#[filter(permission = "...")]` on struct fields.
//!
//! Key rules:
//! - Unannotated fields are never touched.
//! - Cleared values depend on the field: empty strings, `0`, `false`, empty
//!   collections, and `None` for optional, message and oneof fields.
//! - Nested messages are cleared as a whole, not walked.
//!
//! What this crate does not do:
//! - decide who holds which permission, or authenticate anyone
//! - validate permission identifiers
//! - persist the registry across runs
//!
//! ## Example
//! ```rust
//! use permfilter::{FilterFields, Filterable, Registry};
//!
//! #[derive(FilterFields)]
//! struct Profile {
//!     name: String,
//!     #[filter(permission = "profile.email")]
//!     email: String,
//!     #[filter(permission = "profile.age")]
//!     age: Option<u32>,
//! }
//!
//! let profile = Profile {
//!     name: "ada".into(),
//!     email: "ada@example.com".into(),
//!     age: Some(36),
//! };
//! let mask = Registry::global().mask(["profile.email"]);
//! let profile = profile.filtered(&mask);
//! assert_eq!(profile.email, "ada@example.com");
//! assert_eq!(profile.age, None);
//! ```

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
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[cfg(feature = "derive")]
pub use permfilter_derive::FilterFields;

#[allow(unused_extern_crates)]
extern crate self as permfilter;

mod filter;
mod mask;
mod registry;
#[cfg(feature = "slog")]
pub mod slog;

pub use filter::{filter_all, FilterFields, Filterable};
pub use mask::{BitSet, Iter};
pub use registry::Registry;
#[doc(hidden)]
pub use mask::PermissionSlot;
