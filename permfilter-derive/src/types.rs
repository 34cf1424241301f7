//! Type utilities for the derive macro.

use permfilter_codegen::{FieldCategory, FieldShape, ScalarKind};

/// Maps a Rust field type to the shape the classifier works from.
///
/// Types are recognized by the last path segment, so `String` and
/// `std::string::String` are treated alike. Anything unrecognized is
/// `Opaque` and cleared to its `Default`.
pub(crate) fn field_shape(ty: &syn::Type) -> FieldShape {
    let syn::Type::Path(path) = ty else {
        return FieldShape::new(FieldCategory::Opaque);
    };
    let Some(segment) = path.path.segments.last() else {
        return FieldShape::new(FieldCategory::Opaque);
    };

    let category = match segment.ident.to_string().as_str() {
        "Option" => {
            let inner = first_type_argument(&segment.arguments)
                .map_or(FieldShape::new(FieldCategory::Opaque), field_shape);
            return inner.explicit();
        }
        "String" => FieldCategory::Scalar(ScalarKind::String),
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
        | "u128" | "usize" => FieldCategory::Scalar(ScalarKind::Integer),
        "f32" | "f64" => FieldCategory::Scalar(ScalarKind::Float),
        "bool" => FieldCategory::Scalar(ScalarKind::Bool),
        "Bytes" => FieldCategory::Scalar(ScalarKind::Bytes),
        "Vec" | "VecDeque" => FieldCategory::List,
        "HashMap" | "BTreeMap" => FieldCategory::Map,
        _ => FieldCategory::Opaque,
    };
    FieldShape::new(category)
}

fn first_type_argument(arguments: &syn::PathArguments) -> Option<&syn::Type> {
    let syn::PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}
