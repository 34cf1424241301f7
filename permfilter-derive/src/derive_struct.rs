//! Struct-specific `FilterFields` derivation.
//!
//! Collects the guarded fields of a struct with named fields, in declaration
//! order, along with the types that will be cleared through `Default`.

use permfilter_codegen::{classify, naming, FieldFilter, FieldTarget, ZeroValue};
use proc_macro2::Ident;
use syn::{ext::IdentExt, DataStruct, Fields, Result};

use crate::{
    strategy::{parse_field_strategy, Strategy},
    types::field_shape,
};

pub(crate) struct StructDeriveOutput {
    pub(crate) fields: Vec<FieldFilter>,
    /// Types of guarded fields cleared with `Default::default()`.
    pub(crate) defaulted_types: Vec<syn::Type>,
}

pub(crate) fn derive_struct(name: &Ident, data: &DataStruct) -> Result<StructDeriveOutput> {
    let named = match &data.fields {
        Fields::Named(named) => named,
        Fields::Unnamed(fields) => {
            return Err(syn::Error::new(
                fields.paren_token.span.open(),
                "`FilterFields` requires named fields; tuple structs are not supported",
            ))
        }
        Fields::Unit => {
            return Err(syn::Error::new(
                name.span(),
                "`FilterFields` requires named fields; unit structs have nothing to filter",
            ))
        }
    };

    let type_name = name.unraw().to_string();
    let mut output = StructDeriveOutput {
        fields: Vec::new(),
        defaulted_types: Vec::new(),
    };

    for (position, field) in named.named.iter().enumerate() {
        let Strategy::Guard(permission) = parse_field_strategy(&field.attrs)? else {
            continue;
        };
        let Some(ident) = &field.ident else {
            continue;
        };

        let zero = classify(field_shape(&field.ty));
        if zero == ZeroValue::Empty {
            output.defaulted_types.push(field.ty.clone());
        }
        output.fields.push(FieldFilter {
            slot: naming::indexed_slot_ident(&type_name, position, &ident.unraw().to_string()),
            permission: permission.value(),
            target: FieldTarget::Field(ident.clone()),
            zero,
        });
    }

    Ok(output)
}
