//! Zero-value classification for annotated fields.
//!
//! ## Zero-Value Mapping
//!
//! | Field | Zero value | Rust |
//! |-------|------------|------|
//! | oneof member | absent | the oneof is reset to `None` |
//! | repeated / map | empty | `Default::default()` |
//! | explicit-optional | absent | `None` |
//! | `string` | empty string | `String::new()` |
//! | integer / enum | zero | `0` |
//! | `float` / `double` | zero | `0.0` |
//! | `bool` | `false` | `false` |
//! | `bytes` | empty | `Default::default()` |
//! | message | absent | `None` |
//! | opaque | default | `Default::default()` |
//!
//! Rows are checked top to bottom: oneof membership and explicit presence
//! override the scalar kind, and repeated/map fields never look at their
//! element kind.

use crate::schema::{FieldCategory, FieldDef, FieldShape, Presence, ScalarKind};

/// The value a redacted field is set to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ZeroValue {
    EmptyString,
    Zero,
    ZeroFloat,
    False,
    /// Empty collection or type default.
    Empty,
    /// No value at all.
    Absent,
}

/// Maps a field shape to its zero value. Total over every shape.
pub fn classify(shape: FieldShape) -> ZeroValue {
    if shape.in_oneof {
        return ZeroValue::Absent;
    }
    match shape.category {
        FieldCategory::List | FieldCategory::Map => ZeroValue::Empty,
        _ if shape.presence == Presence::Explicit => ZeroValue::Absent,
        FieldCategory::Scalar(kind) => match kind {
            ScalarKind::String => ZeroValue::EmptyString,
            ScalarKind::Integer | ScalarKind::Enum => ZeroValue::Zero,
            ScalarKind::Float => ZeroValue::ZeroFloat,
            ScalarKind::Bool => ZeroValue::False,
            ScalarKind::Bytes => ZeroValue::Empty,
        },
        FieldCategory::Message => ZeroValue::Absent,
        FieldCategory::Opaque => ZeroValue::Empty,
    }
}

/// What the generator does for one annotated field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldRedaction<'a> {
    pub field: &'a FieldDef,
    pub permission: &'a str,
    pub zero: ZeroValue,
}

impl<'a> FieldRedaction<'a> {
    /// Returns the redaction for `field`, or `None` if it is not annotated.
    pub fn for_field(field: &'a FieldDef) -> Option<Self> {
        let permission = field.permission.as_deref()?;
        Some(Self {
            field,
            permission,
            zero: classify(field.shape),
        })
    }
}
