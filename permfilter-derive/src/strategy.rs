//! Parsing of `#[filter(...)]` field attributes.
//!
//! A field either carries exactly one `permission = "..."` or is left alone.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, Expr, ExprLit, Lit, LitStr, Meta, Result};

/// What the derive does with a field.
///
/// | Attribute | Strategy |
/// |-----------|----------|
/// | None | `PassThrough` |
/// | `#[filter(permission = "x")]` | `Guard("x")` |
#[derive(Clone, Debug)]
pub(crate) enum Strategy {
    /// Never touched by the filter.
    PassThrough,
    /// Cleared unless the mask holds the permission.
    Guard(LitStr),
}

fn set_permission(target: &mut Option<LitStr>, next: LitStr, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple permissions specified on the same field; a field is guarded by exactly one permission",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<Strategy> {
    let mut permission: Option<LitStr> = None;
    for attr in attrs {
        if !attr.path().is_ident("filter") {
            continue;
        }

        match &attr.meta {
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("permission") {
                        let lit = match meta.value()?.parse::<Expr>()? {
                            Expr::Lit(ExprLit {
                                lit: Lit::Str(lit), ..
                            }) => lit,
                            other => {
                                return Err(syn::Error::new_spanned(
                                    other,
                                    "expected a string literal, e.g. `permission = \"user.email\"`",
                                ))
                            }
                        };
                        set_permission(&mut permission, lit, meta.path.span())
                    } else {
                        Err(meta.error(format!(
                            "unknown field option `{}`; expected `permission`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::Path(_) | Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected `#[filter(permission = \"...\")]`",
                ));
            }
        }
    }

    Ok(permission.map_or(Strategy::PassThrough, Strategy::Guard))
}
