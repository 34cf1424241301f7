//! The redaction surface implemented by generated code.
//!
//! `protoc-gen-permfilter` emits an implementation of [`FilterFields`] for
//! every message that has at least one annotated field; messages without
//! annotations get none. `#[derive(FilterFields)]` always emits one, empty
//! when no field is guarded.

use crate::{mask::BitSet, registry::Registry};

/// A message whose annotated fields can be cleared against a permission mask.
///
/// Implementations are generated; writing one by hand is possible but rarely
/// useful.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `FilterFields`",
    label = "this type has no permission-annotated fields",
    note = "annotate at least one field with `#[filter(permission = \"...\")]` and derive `FilterFields`",
    note = "or generate the type's filter with `protoc-gen-permfilter`"
)]
pub trait FilterFields {
    /// Registers every permission this message checks with [`Registry::global`]
    /// and binds the message's slots.
    ///
    /// Runs at most once per process; later calls return immediately.
    /// [`FilterFields::filter_fields`] calls it first, so calling it explicitly is
    /// only needed to fix the order in which indices are assigned.
    fn register_permissions()
    where
        Self: Sized;

    /// Clears every annotated field whose permission `mask` does not hold.
    ///
    /// Fields are visited in declaration order. Unannotated fields are never
    /// touched, and nested messages are cleared as a whole rather than walked.
    fn filter_fields(&mut self, mask: &BitSet);
}

/// By-value convenience over [`FilterFields`].
///
/// Only types with a filter get it:
///
/// ```compile_fail
/// use permfilter::{BitSet, Filterable};
///
/// struct User {
///     email: String,
/// }
///
/// let user = User { email: "a@example.com".into() }.filtered(&BitSet::new());
/// ```
pub trait Filterable: FilterFields + Sized {
    /// Filters `self` against `mask` and returns it.
    #[must_use]
    fn filtered(mut self, mask: &BitSet) -> Self {
        self.filter_fields(mask);
        self
    }

    /// Filters `self` against the identifiers in `permissions`.
    ///
    /// The mask is assembled through [`Registry::global`], which registers any
    /// identifier it has not seen yet. Registered identifiers are never
    /// dropped, so pass identifiers from a closed set known to the
    /// application, not strings taken from a request.
    #[must_use]
    fn filtered_for<I, S>(self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mask = Registry::global().mask(permissions);
        self.filtered(&mask)
    }
}

impl<T> Filterable for T where T: FilterFields {}

/// Filters every message in `messages` against the same mask.
pub fn filter_all<T: FilterFields>(messages: &mut [T], mask: &BitSet) {
    for message in messages {
        message.filter_fields(mask);
    }
}
