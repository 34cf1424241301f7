//! Token generation for message filters.
//!
//! For every message with at least one annotated field this module emits one
//! unit, wrapped in an anonymous `const` block so several units can share a
//! module:
//!
//! 1. a `static` `PermissionSlot` per annotated field,
//! 2. `FilterFields::register_permissions`, which registers each distinct
//!    permission of the message once and binds the slots,
//! 3. `FilterFields::filter_fields`, which clears each annotated field, in
//!    declaration order, when the mask lacks its slot's index.
//!
//! Messages without annotations produce no tokens at all.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};

use crate::{
    classify::{FieldRedaction, ZeroValue},
    naming,
    schema::{FileDef, MessageDef},
};

/// Where a cleared value is written.
#[derive(Clone, Debug)]
pub enum FieldTarget {
    /// A plain struct field.
    Field(Ident),
    /// One member of a oneof. `field` holds the `Option` of the oneof enum and
    /// `variant` is the full path of this member's variant.
    OneofMember { field: Ident, variant: TokenStream },
}

/// One annotated field, ready for emission.
#[derive(Clone, Debug)]
pub struct FieldFilter {
    pub slot: Ident,
    pub permission: String,
    pub target: FieldTarget,
    pub zero: ZeroValue,
}

/// Everything needed to emit the unit for one message.
#[derive(Clone, Debug)]
pub struct MessageFilter {
    /// The type the `FilterFields` impl is for, without generics.
    pub self_ty: TokenStream,
    pub generics: syn::Generics,
    pub fields: Vec<FieldFilter>,
}

impl MessageFilter {
    /// Returns `None` when `fields` is empty: no annotations, no unit.
    pub fn new(self_ty: TokenStream, fields: Vec<FieldFilter>) -> Option<Self> {
        if fields.is_empty() {
            return None;
        }
        Some(Self {
            self_ty,
            generics: syn::Generics::default(),
            fields,
        })
    }

    #[must_use]
    pub fn with_generics(mut self, generics: syn::Generics) -> Self {
        self.generics = generics;
        self
    }

    /// Builds the filter for a schema message using `prost` naming.
    pub fn from_message(message: &MessageDef) -> Option<Self> {
        let fields = message
            .fields
            .iter()
            .filter_map(FieldRedaction::for_field)
            .map(|redaction| {
                let field = redaction.field;
                let target = match &field.oneof {
                    Some(oneof) => {
                        let module = naming::message_module(message);
                        let oneof_ty = naming::camel_ident(oneof);
                        let variant = naming::camel_ident(&field.name);
                        FieldTarget::OneofMember {
                            field: naming::snake_ident(oneof),
                            variant: quote! { #module::#oneof_ty::#variant },
                        }
                    }
                    None => FieldTarget::Field(naming::snake_ident(&field.name)),
                };
                FieldFilter {
                    slot: naming::slot_ident(message, &field.name),
                    permission: redaction.permission.to_owned(),
                    target,
                    zero: redaction.zero,
                }
            })
            .collect();
        Self::new(naming::message_type(message), fields)
    }
}

/// Rust expression for a zero value.
pub fn zero_tokens(zero: ZeroValue) -> TokenStream {
    match zero {
        ZeroValue::EmptyString => quote! { ::std::string::String::new() },
        ZeroValue::Zero => quote! { 0 },
        ZeroValue::ZeroFloat => quote! { 0.0 },
        ZeroValue::False => quote! { false },
        ZeroValue::Empty => quote! { ::core::default::Default::default() },
        ZeroValue::Absent => quote! { ::core::option::Option::None },
    }
}

/// Statement that clears `target` on `self`.
pub fn clear_statement(target: &FieldTarget, zero: ZeroValue) -> TokenStream {
    match target {
        FieldTarget::Field(field) => {
            let value = zero_tokens(zero);
            quote! { self.#field = #value; }
        }
        // Only reset the oneof when this member is the one that is set.
        FieldTarget::OneofMember { field, variant } => quote! {
            if ::core::matches!(self.#field, ::core::option::Option::Some(#variant(_))) {
                self.#field = ::core::option::Option::None;
            }
        },
    }
}

/// Emits the unit for one message.
pub fn emit_message(filter: &MessageFilter, runtime: &syn::Path) -> TokenStream {
    let MessageFilter {
        self_ty,
        generics,
        fields,
    } = filter;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let slots: Vec<&Ident> = fields.iter().map(|field| &field.slot).collect();

    // One registration per distinct permission, in first-use order.
    let mut permissions: Vec<&str> = Vec::new();
    let mut slot_locals = Vec::with_capacity(fields.len());
    for field in fields {
        let position = match permissions.iter().position(|p| *p == field.permission) {
            Some(position) => position,
            None => {
                permissions.push(&field.permission);
                permissions.len() - 1
            }
        };
        slot_locals.push(format_ident!("perm_{}", position));
    }
    let perm_locals = (0..permissions.len()).map(|position| format_ident!("perm_{}", position));

    let checks = fields.iter().map(|field| {
        let slot = &field.slot;
        let clear = clear_statement(&field.target, field.zero);
        quote! {
            if !mask.has_slot(&#slot) {
                #clear
            }
        }
    });

    quote! {
        const _: () = {
            #(
                static #slots: #runtime::PermissionSlot = #runtime::PermissionSlot::new();
            )*

            #[automatically_derived]
            impl #impl_generics #runtime::FilterFields for #self_ty #ty_generics #where_clause {
                fn register_permissions() {
                    static REGISTERED: ::std::sync::Once = ::std::sync::Once::new();
                    REGISTERED.call_once(|| {
                        let registry = #runtime::Registry::global();
                        #(
                            let #perm_locals = registry.register(#permissions);
                        )*
                        #(
                            #slots.bind(#slot_locals);
                        )*
                    });
                }

                fn filter_fields(&mut self, mask: &#runtime::BitSet) {
                    <Self as #runtime::FilterFields>::register_permissions();
                    #(#checks)*
                }
            }
        };
    }
}

/// Emits every message unit of `file` plus its initialization function.
///
/// Returns `None` when no message in the file has an annotated field.
pub fn emit_file(file: &FileDef, runtime: &syn::Path, init: &Ident) -> Option<TokenStream> {
    let items = emit_file_items(file, runtime, init)?;
    Some(quote! { #(#items)* })
}

/// Like [`emit_file`], but keeps each top-level item separate: one unit per
/// filtered message, then the initialization function.
pub fn emit_file_items(file: &FileDef, runtime: &syn::Path, init: &Ident) -> Option<Vec<TokenStream>> {
    let filters: Vec<MessageFilter> = file
        .messages
        .iter()
        .filter_map(MessageFilter::from_message)
        .collect();
    if filters.is_empty() {
        return None;
    }

    let types = filters.iter().map(|filter| &filter.self_ty);
    let doc = format!(
        " Registers every permission checked by the filters generated from `{}`.",
        file.name
    );
    let init_doc = " Call once at startup, before the first redaction, to fix index order.";
    let init_fn = quote! {
        #[doc = #doc]
        #[doc = ""]
        #[doc = #init_doc]
        pub fn #init() {
            #(
                <#types as #runtime::FilterFields>::register_permissions();
            )*
        }
    };

    let mut items: Vec<TokenStream> = filters
        .iter()
        .map(|filter| emit_message(filter, runtime))
        .collect();
    items.push(init_fn);
    Some(items)
}

/// Parses a runtime crate path such as `::permfilter`.
pub fn runtime_path(path: &str) -> syn::Result<syn::Path> {
    syn::parse_str::<syn::Path>(path)
        .map_err(|err| syn::Error::new(Span::call_site(), format!("invalid path `{path}`: {err}")))
}
