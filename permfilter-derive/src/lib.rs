//! Derive macro for `permfilter`.
//!
//! This crate generates `FilterFields` implementations for plain Rust structs.
//! It:
//! - reads `#[filter(permission = "...")]` field attributes
//! - classifies each guarded field's zero value from its Rust type
//! - hands the result to the same emitter `protoc-gen-permfilter` uses
//!
//! It does **not** hold the registry or masks. Those live in the main
//! `permfilter` crate and are used at runtime.

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
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use permfilter_codegen::{emit_message, MessageFilter};
use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_struct;
mod generics;
mod strategy;
mod types;
use container::{parse_container_options, ContainerOptions};
use derive_struct::{derive_struct, StructDeriveOutput};
use generics::add_default_bounds;

/// Derives `permfilter::FilterFields` for structs with named fields.
///
/// # Container Attributes
///
/// - `#[filter(crate = "path")]` - Path of the `permfilter` crate, for when it
///   is only reachable through a re-export.
///
/// # Field Attributes
///
/// - **No annotation**: the field is never touched.
/// - `#[filter(permission = "id")]`: the field is cleared unless the mask
///   holds `id`. At most one permission per field.
///
/// # Cleared Values
///
/// | Type | Cleared to |
/// |------|------------|
/// | `Option<_>` | `None` |
/// | `String` | `String::new()` |
/// | integers | `0` |
/// | `f32`, `f64` | `0.0` |
/// | `bool` | `false` |
/// | anything else | `Default::default()` |
///
/// Types are matched by name, so a type alias for `String` is cleared through
/// `Default`, which gives the same result.
///
/// Enums, unions, tuple structs and unit structs are rejected at compile time.
#[proc_macro_derive(FilterFields, attributes(filter))]
pub fn derive_filter_fields(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the path of the permfilter crate root.
///
/// Handles crate renaming (e.g., `authz = { package = "permfilter", ... }`).
/// Inside permfilter itself the crate refers to itself as `::permfilter`
/// through `extern crate self as permfilter`, which also covers its
/// integration tests and doctests.
fn crate_root() -> syn::Path {
    match crate_name("permfilter") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            syn::parse_quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => syn::parse_quote! { ::permfilter },
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { crate_path } = parse_container_options(&attrs)?;
    let runtime = crate_path.unwrap_or_else(crate_root);

    let StructDeriveOutput {
        fields,
        defaulted_types,
    } = match &data {
        Data::Struct(data) => derive_struct(&ident, data)?,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span(),
                "`FilterFields` cannot be derived for enums; derive it on the structs they hold",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span(),
                "`FilterFields` cannot be derived for unions",
            ));
        }
    };

    let generics = add_default_bounds(generics, &defaulted_types);

    let Some(filter) = MessageFilter::new(quote! { #ident }, fields) else {
        // Nothing guarded: the impl exists so the type can still be used
        // wherever `FilterFields` is expected.
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
        return Ok(quote! {
            #[automatically_derived]
            impl #impl_generics #runtime::FilterFields for #ident #ty_generics #where_clause {
                fn register_permissions() {}

                fn filter_fields(&mut self, _mask: &#runtime::BitSet) {}
            }
        });
    };

    Ok(emit_message(&filter.with_generics(generics), &runtime))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_str(tokens: TokenStream) -> String {
        let input: DeriveInput = syn::parse2(tokens).expect("should parse as DeriveInput");
        expand(input).unwrap().to_string()
    }

    fn squash(tokens: &TokenStream) -> String {
        tokens.to_string().split_whitespace().collect()
    }

    fn contains(haystack: &str, needle: &TokenStream) -> bool {
        let haystack: String = haystack.split_whitespace().collect();
        haystack.contains(&squash(needle))
    }

    #[test]
    fn guarded_fields_are_cleared() {
        let out = expand_str(quote! {
            #[filter(crate = "::permfilter")]
            struct TestMessage {
                public_field: String,
                #[filter(permission = "test.private")]
                private_field: String,
                #[filter(permission = "test.private")]
                secret_number: i32,
            }
        });
        assert!(contains(&out, &quote! { impl ::permfilter::FilterFields for TestMessage }));
        assert!(contains(
            &out,
            &quote! { self.private_field = ::std::string::String::new(); }
        ));
        assert!(contains(&out, &quote! { self.secret_number = 0; }));
        assert!(!out.contains("public_field"));
        assert_eq!(out.matches("\"test.private\"").count(), 1);
    }

    #[test]
    fn crate_option_overrides_the_runtime_path() {
        let out = expand_str(quote! {
            #[filter(crate = "::my_app::authz")]
            struct Account {
                #[filter(permission = "account.balance")]
                balance: i64,
            }
        });
        assert!(contains(
            &out,
            &quote! { impl ::my_app::authz::FilterFields for Account }
        ));
        assert!(!out.contains("permfilter"));
    }

    #[test]
    fn generic_defaulted_fields_get_default_bounds() {
        let out = expand_str(quote! {
            #[filter(crate = "::permfilter")]
            struct Page<T> {
                #[filter(permission = "page.items")]
                items: Vec<T>,
                #[filter(permission = "page.cursor")]
                cursor: Option<T>,
            }
        });
        assert!(contains(
            &out,
            &quote! { impl<T> ::permfilter::FilterFields for Page<T> where Vec<T>: ::core::default::Default }
        ));
    }

    #[test]
    fn unguarded_struct_gets_an_empty_impl() {
        let out = expand_str(quote! {
            #[filter(crate = "::permfilter")]
            struct Plain {
                name: String,
            }
        });
        assert!(contains(&out, &quote! { fn register_permissions() {} }));
        assert!(!out.contains("PermissionSlot"));
    }

    #[test]
    fn enums_and_unions_are_rejected() {
        let err = expand(syn::parse_quote! {
            enum Choice { A, B }
        })
        .unwrap_err();
        assert!(err.to_string().contains("enums"));

        let err = expand(syn::parse_quote! {
            union Bits { a: u32, b: f32 }
        })
        .unwrap_err();
        assert!(err.to_string().contains("unions"));
    }
}
