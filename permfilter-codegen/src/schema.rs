//! Resolved message and field descriptions the generator works from.
//!
//! These types are the generator's whole view of a schema. They are produced by
//! descriptor resolution (for `protoc` input) and are assumed valid: every
//! annotation names an existing field and every category is known.

/// The scalar kinds a field can hold.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScalarKind {
    String,
    Bytes,
    Bool,
    /// Any integer encoding (`int32`, `sint64`, `fixed32`, ...).
    Integer,
    /// `float` or `double`.
    Float,
    /// Protobuf enums, carried as `i32` in generated Rust.
    Enum,
}

/// What a field holds, independent of presence and oneof membership.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldCategory {
    Scalar(ScalarKind),
    /// A singular message-typed field.
    Message,
    /// A repeated field.
    List,
    /// A map field.
    Map,
    /// A Rust type the generator cannot see into.
    ///
    /// Only the derive front end produces this; protobuf input never does.
    Opaque,
}

/// Whether a field tracks presence separately from its value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Presence {
    /// The zero value and "unset" are indistinguishable.
    #[default]
    Implicit,
    /// The field is declared optional and is absent until set.
    Explicit,
}

/// Everything classification needs to know about a field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldShape {
    pub category: FieldCategory,
    pub presence: Presence,
    /// Set when the field is a member of a (non-synthetic) oneof.
    pub in_oneof: bool,
}

impl FieldShape {
    pub const fn new(category: FieldCategory) -> Self {
        Self {
            category,
            presence: Presence::Implicit,
            in_oneof: false,
        }
    }

    #[must_use]
    pub const fn explicit(mut self) -> Self {
        self.presence = Presence::Explicit;
        self
    }

    #[must_use]
    pub const fn oneof_member(mut self) -> Self {
        self.in_oneof = true;
        self
    }
}

/// A field of a message, as declared.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDef {
    /// Name as written in the schema.
    pub name: String,
    pub shape: FieldShape,
    /// Name of the oneof this field belongs to, for oneof members.
    pub oneof: Option<String>,
    /// Permission identifier from the field's annotation, if any.
    pub permission: Option<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, shape: FieldShape) -> Self {
        Self {
            name: name.into(),
            shape,
            oneof: None,
            permission: None,
        }
    }

    #[must_use]
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Marks the field as a member of `oneof`.
    #[must_use]
    pub fn in_oneof(mut self, oneof: impl Into<String>) -> Self {
        self.shape = self.shape.oneof_member();
        self.oneof = Some(oneof.into());
        self
    }
}

/// A message definition, fields in declaration order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MessageDef {
    /// Message name without package or parents.
    pub name: String,
    /// Names of enclosing messages, outermost first.
    pub parents: Vec<String>,
    pub fields: Vec<FieldDef>,
}

impl MessageDef {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            parents: Vec::new(),
            fields,
        }
    }

    #[must_use]
    pub fn nested_in(mut self, parents: Vec<String>) -> Self {
        self.parents = parents;
        self
    }

    /// Fields carrying a permission annotation, in declaration order.
    pub fn annotated_fields(&self) -> impl Iterator<Item = (&FieldDef, &str)> {
        self.fields
            .iter()
            .filter_map(|field| field.permission.as_deref().map(|perm| (field, perm)))
    }
}

/// One schema file and every message it declares, nested ones included.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileDef {
    /// Path as given to the compiler, e.g. `testdata/test.proto`.
    pub name: String,
    /// Package, possibly empty.
    pub package: String,
    pub messages: Vec<MessageDef>,
}
