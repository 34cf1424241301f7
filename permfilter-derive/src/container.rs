//! Container-level attribute parsing for `#[derive(FilterFields)]`.
//!
//! This module handles attributes on the struct itself, not on fields.

use syn::{Attribute, LitStr, Meta, Result};

/// Options parsed from container-level `#[filter(...)]` attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// Path of the runtime crate, overriding the one found in `Cargo.toml`.
    pub(crate) crate_path: Option<syn::Path>,
}

/// Parses container-level `#[filter(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("filter") {
            continue;
        }

        let Meta::List(list) = &attr.meta else {
            return Err(syn::Error::new_spanned(
                attr,
                "expected `#[filter(crate = \"...\")]` on the container",
            ));
        };
        list.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                if options.crate_path.is_some() {
                    return Err(meta.error("duplicate `crate` option"));
                }
                options.crate_path = Some(lit.parse()?);
                Ok(())
            } else {
                Err(meta.error(format!(
                    "unknown container option `{}`; expected `crate`",
                    meta.path
                        .get_ident()
                        .map_or_else(|| "?".to_string(), ToString::to_string)
                )))
            }
        })?;
    }

    Ok(options)
}
