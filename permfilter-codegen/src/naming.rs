//! Rust names for schema items, matching what `prost-build` generates.
//!
//! Generated filters are compiled next to `prost` output, so every type, module
//! and field name here has to agree with it exactly.

use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

use crate::schema::MessageDef;

/// Keywords that can be written as raw identifiers.
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
    "else", "enum", "false", "final", "fn", "for", "if", "impl", "in", "let", "loop", "macro",
    "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return", "static", "struct",
    "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use", "virtual", "where",
    "while", "yield",
];

/// Keywords that cannot be raw identifiers and get a trailing underscore.
const SUFFIXED_KEYWORDS: &[&str] = &["crate", "extern", "self", "super"];

/// Snake-case identifier for a field or module.
pub fn snake_ident(name: &str) -> Ident {
    let snake = name.to_snake_case();
    if RAW_KEYWORDS.contains(&snake.as_str()) {
        Ident::new_raw(&snake, Span::call_site())
    } else if SUFFIXED_KEYWORDS.contains(&snake.as_str()) {
        Ident::new(&format!("{snake}_"), Span::call_site())
    } else {
        Ident::new(&snake, Span::call_site())
    }
}

/// Upper-camel-case identifier for a type or enum variant.
pub fn camel_ident(name: &str) -> Ident {
    let mut camel = name.to_upper_camel_case();
    if camel == "Self" {
        camel.push('_');
    }
    Ident::new(&camel, Span::call_site())
}

/// Path of the module `prost` creates for a message's nested items.
pub fn message_module(message: &MessageDef) -> TokenStream {
    let modules = message
        .parents
        .iter()
        .chain(std::iter::once(&message.name))
        .map(|name| snake_ident(name));
    quote! { #(#modules)::* }
}

/// Path of a message's Rust type, relative to the package module.
pub fn message_type(message: &MessageDef) -> TokenStream {
    let modules = message.parents.iter().map(|name| snake_ident(name));
    let ty = camel_ident(&message.name);
    quote! { #(#modules::)* #ty }
}

/// Name of the static slot holding the index for `field` of `message`.
pub fn slot_ident(message: &MessageDef, field: &str) -> Ident {
    slot_ident_for(
        message
            .parents
            .iter()
            .chain(std::iter::once(&message.name))
            .map(String::as_str),
        field,
    )
}

/// Name of a slot from the owning type's path segments and a field name.
pub fn slot_ident_for<'a>(type_path: impl IntoIterator<Item = &'a str>, field: &str) -> Ident {
    let mut name = String::from("PERM_IDX");
    for segment in type_path {
        name.push('_');
        name.push_str(&segment.to_shouty_snake_case());
    }
    name.push('_');
    name.push_str(&field.to_shouty_snake_case());
    Ident::new(&name, Span::call_site())
}

/// Name of a slot for the field at `position` in a Rust struct.
///
/// Field names are case-folded, so the position keeps `user_id` and `userId`
/// apart.
pub fn indexed_slot_ident(type_name: &str, position: usize, field: &str) -> Ident {
    Ident::new(
        &format!(
            "PERM_IDX_{}_{position}_{}",
            type_name.to_shouty_snake_case(),
            field.to_shouty_snake_case()
        ),
        Span::call_site(),
    )
}

/// Name of a file's initialization function, e.g. `init_test_filters`.
pub fn init_fn_ident(file_stem: &str) -> Ident {
    Ident::new(
        &format!("init_{}_filters", file_stem.to_snake_case()),
        Span::call_site(),
    )
}
