//! Generic type parameter handling and trait bound management.
//!
//! Fields cleared with `Default::default()` need their type to implement
//! `Default`. A bound is added only for such fields whose type mentions a type
//! parameter; concrete types are checked by the compiler directly.
//!
//! `PhantomData<T>` is skipped when collecting: `PhantomData<T>` is `Default`
//! for every `T`.

use syn::{parse_quote, Ident};

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match ty {
        syn::Type::Path(path) => {
            if let Some(qself) = &path.qself {
                collect_generics_from_type(&qself.ty, generics, result);
            }
            for segment in &path.path.segments {
                if segment.ident == "PhantomData" {
                    return;
                }

                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    for arg in &args.args {
                        if let syn::GenericArgument::Type(inner_ty) = arg {
                            collect_generics_from_type(inner_ty, generics, result);
                        }
                    }
                }

                for param in generics.type_params() {
                    if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                        result.push(param.ident.clone());
                    }
                }
            }
        }
        syn::Type::Array(array) => collect_generics_from_type(&array.elem, generics, result),
        syn::Type::Slice(slice) => collect_generics_from_type(&slice.elem, generics, result),
        syn::Type::Group(group) => collect_generics_from_type(&group.elem, generics, result),
        syn::Type::Paren(paren) => collect_generics_from_type(&paren.elem, generics, result),
        syn::Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                collect_generics_from_type(elem, generics, result);
            }
        }
        _ => {}
    }
}

/// Adds `Ty: Default` to the where clause for every type in `defaulted` that
/// mentions a type parameter.
pub(crate) fn add_default_bounds(
    mut generics: syn::Generics,
    defaulted: &[syn::Type],
) -> syn::Generics {
    let mut bounded: Vec<syn::WherePredicate> = Vec::new();
    for ty in defaulted {
        let mut used = Vec::new();
        collect_generics_from_type(ty, &generics, &mut used);
        if !used.is_empty() {
            bounded.push(parse_quote!(#ty: ::core::default::Default));
        }
    }
    if !bounded.is_empty() {
        generics.make_where_clause().predicates.extend(bounded);
    }
    generics
}

#[cfg(test)]
mod tests {
    use quote::{quote, ToTokens};

    use super::*;

    fn generics(tokens: proc_macro2::TokenStream) -> syn::Generics {
        syn::parse2(tokens).expect("should parse as Generics")
    }

    fn ty(tokens: proc_macro2::TokenStream) -> syn::Type {
        syn::parse2(tokens).expect("should parse as Type")
    }

    fn used_in(ty_tokens: proc_macro2::TokenStream) -> Vec<String> {
        let generics = generics(quote! { <T, U> });
        let mut used = Vec::new();
        collect_generics_from_type(&ty(ty_tokens), &generics, &mut used);
        used.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn finds_parameters_in_nested_arguments() {
        assert_eq!(used_in(quote! { T }), ["T"]);
        assert_eq!(used_in(quote! { Vec<HashMap<U, T>> }), ["U", "T"]);
        assert_eq!(used_in(quote! { (T, [U; 2]) }), ["T", "U"]);
        assert!(used_in(quote! { Vec<String> }).is_empty());
    }

    #[test]
    fn phantom_data_is_skipped() {
        assert!(used_in(quote! { PhantomData<T> }).is_empty());
        assert!(used_in(quote! { ::core::marker::PhantomData<T> }).is_empty());
    }

    #[test]
    fn bounds_only_generic_types() {
        let bounded = add_default_bounds(
            generics(quote! { <T> }),
            &[ty(quote! { Vec<String> }), ty(quote! { T })],
        );
        let where_clause = bounded.where_clause.unwrap();
        assert_eq!(where_clause.predicates.len(), 1);
        assert_eq!(
            where_clause.predicates.to_token_stream().to_string(),
            "T : :: core :: default :: Default"
        );
    }

    #[test]
    fn no_generic_types_leave_generics_untouched() {
        let bounded = add_default_bounds(generics(quote! { <T> }), &[ty(quote! { Vec<u8> })]);
        assert!(bounded.where_clause.is_none());
    }
}
