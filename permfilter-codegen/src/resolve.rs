//! Conversion of decoded descriptors into the generator's schema model.

use std::collections::HashSet;

use crate::{
    descriptor::{
        field_type, label, DescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    },
    error::GenerateError,
    schema::{FieldCategory, FieldDef, FieldShape, FileDef, MessageDef, ScalarKind},
};

/// Fully-qualified names (`.pkg.Outer.Entry`) of every map-entry message in
/// a set of files.
#[derive(Debug, Default)]
pub struct MapEntries {
    names: HashSet<String>,
}

impl MapEntries {
    pub fn collect<'a>(files: impl IntoIterator<Item = &'a FileDescriptorProto>) -> Self {
        let mut entries = Self::default();
        for file in files {
            let scope = match file.package() {
                "" => String::new(),
                package => format!(".{package}"),
            };
            for message in &file.message_type {
                entries.visit(&scope, message);
            }
        }
        entries
    }

    fn visit(&mut self, scope: &str, message: &DescriptorProto) {
        let name = format!("{scope}.{}", message.name());
        for nested in &message.nested_type {
            self.visit(&name, nested);
        }
        if is_map_entry(message) {
            self.names.insert(name);
        }
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.names.contains(type_name)
    }
}

fn is_map_entry(message: &DescriptorProto) -> bool {
    message
        .options
        .and_then(|options| options.map_entry)
        .unwrap_or(false)
}

/// Resolves one file. Messages are listed depth-first, each before its nested
/// types; map-entry types are left out.
pub fn resolve_file(
    file: &FileDescriptorProto,
    map_entries: &MapEntries,
) -> Result<FileDef, GenerateError> {
    let mut resolver = FileResolver {
        file: file.name(),
        proto3: file.syntax() == "proto3",
        map_entries,
        messages: Vec::new(),
    };
    for message in &file.message_type {
        resolver.resolve_message(message, &[])?;
    }
    Ok(FileDef {
        name: file.name().to_owned(),
        package: file.package().to_owned(),
        messages: resolver.messages,
    })
}

struct FileResolver<'a> {
    file: &'a str,
    proto3: bool,
    map_entries: &'a MapEntries,
    messages: Vec<MessageDef>,
}

impl FileResolver<'_> {
    fn resolve_message(
        &mut self,
        message: &DescriptorProto,
        parents: &[String],
    ) -> Result<(), GenerateError> {
        if is_map_entry(message) {
            return Ok(());
        }

        let fields = message
            .field
            .iter()
            .map(|field| self.resolve_field(message, field))
            .collect::<Result<Vec<_>, _>>()?;
        self.messages
            .push(MessageDef::new(message.name(), fields).nested_in(parents.to_vec()));

        let mut nested_parents = parents.to_vec();
        nested_parents.push(message.name().to_owned());
        for nested in &message.nested_type {
            self.resolve_message(nested, &nested_parents)?;
        }
        Ok(())
    }

    fn resolve_field(
        &self,
        message: &DescriptorProto,
        field: &FieldDescriptorProto,
    ) -> Result<FieldDef, GenerateError> {
        let invalid = |reason: String| GenerateError::InvalidField {
            file: self.file.to_owned(),
            message: message.name().to_owned(),
            field: field.name().to_owned(),
            reason,
        };

        let Some(ty) = field.r#type else {
            return Err(invalid("field has no type".to_owned()));
        };
        let repeated = field.label() == label::REPEATED;

        let category = if repeated {
            if ty == field_type::MESSAGE && self.map_entries.contains(field.type_name()) {
                FieldCategory::Map
            } else {
                FieldCategory::List
            }
        } else {
            match ty {
                field_type::MESSAGE | field_type::GROUP => FieldCategory::Message,
                other => FieldCategory::Scalar(
                    scalar_kind(other).ok_or_else(|| invalid(format!("unknown field type {other}")))?,
                ),
            }
        };

        let mut shape = FieldShape::new(category);
        let proto3_optional = field.proto3_optional.unwrap_or(false);
        // proto2 `optional` scalars track presence; proto3 ones only with the keyword.
        let explicit = proto3_optional
            || (!self.proto3
                && field.label() == label::OPTIONAL
                && matches!(category, FieldCategory::Scalar(_)));
        if explicit {
            shape = shape.explicit();
        }

        let mut def = FieldDef::new(field.name(), shape);
        // proto3 `optional` sits in a synthetic oneof that has no Rust counterpart.
        if let (Some(index), false) = (field.oneof_index, proto3_optional) {
            let oneof = usize::try_from(index)
                .ok()
                .and_then(|index| message.oneof_decl.get(index))
                .ok_or_else(|| invalid(format!("oneof index {index} is out of range")))?;
            def = def.in_oneof(oneof.name());
        }
        if let Some(permission) = field
            .options
            .as_ref()
            .and_then(|options| options.permission.as_deref())
        {
            def = def.with_permission(permission);
        }
        Ok(def)
    }
}

fn scalar_kind(ty: i32) -> Option<ScalarKind> {
    let kind = match ty {
        field_type::STRING => ScalarKind::String,
        field_type::BYTES => ScalarKind::Bytes,
        field_type::BOOL => ScalarKind::Bool,
        field_type::DOUBLE | field_type::FLOAT => ScalarKind::Float,
        field_type::ENUM => ScalarKind::Enum,
        field_type::INT64
        | field_type::UINT64
        | field_type::INT32
        | field_type::FIXED64
        | field_type::FIXED32
        | field_type::UINT32
        | field_type::SFIXED32
        | field_type::SFIXED64
        | field_type::SINT32
        | field_type::SINT64 => ScalarKind::Integer,
        _ => return None,
    };
    Some(kind)
}
