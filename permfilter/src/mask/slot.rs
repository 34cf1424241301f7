//! Index holders declared by generated filters.

use std::sync::OnceLock;

/// Holds the permission index for one annotated field.
///
/// Generated code declares one `static` slot per annotated field and binds it
/// from the message's registration routine. The first bind wins; later binds
/// are ignored, so an index never changes once observed.
#[derive(Debug, Default)]
pub struct PermissionSlot {
    index: OnceLock<usize>,
}

impl PermissionSlot {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            index: OnceLock::new(),
        }
    }

    /// Binds the slot to `index` unless it is already bound.
    pub fn bind(&self, index: usize) {
        let _ = self.index.set(index);
    }

    /// Returns the bound index, or `None` before registration has run.
    pub fn index(&self) -> Option<usize> {
        self.index.get().copied()
    }
}
