//! Permission masks and the slots generated code reads them through.
//!
//! - **`bitset`**: the mask itself (`BitSet`), one bit per permission index
//! - **`slot`**: a lazily bound index holder (`PermissionSlot`) that generated
//!   filters declare once per annotated field

mod bitset;
mod slot;

pub use bitset::{BitSet, Iter};
pub use slot::PermissionSlot;
