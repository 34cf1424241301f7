//! `protoc` plugin entry points: request in, response out.
//!
//! A run is all-or-nothing. Either every requested file that has annotations
//! gets its `_filter.rs` companion, or the response carries an error and no
//! files at all.

use std::path::Path;

use prost::Message;
use tracing::{debug, info, warn};

use crate::{
    descriptor::{
        CodeGeneratorRequest, CodeGeneratorResponse, GeneratedFile, FEATURE_PROTO3_OPTIONAL,
    },
    emit::emit_file_items,
    error::GenerateError,
    naming::init_fn_ident,
    options::{GeneratorOptions, PathMode},
    resolve::{resolve_file, MapEntries},
    schema::FileDef,
};

/// Decodes a serialized request, generates, and returns the serialized
/// response. Errors are reported inside the response.
pub fn run(request: &[u8]) -> Vec<u8> {
    let response = match CodeGeneratorRequest::decode(request) {
        Ok(request) => respond(&request),
        Err(err) => error_response(&GenerateError::from(err)),
    };
    response.encode_to_vec()
}

/// Generates the response for an already decoded request.
pub fn respond(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    match generate(request) {
        Ok(file) => CodeGeneratorResponse {
            error: None,
            supported_features: Some(FEATURE_PROTO3_OPTIONAL),
            file,
        },
        Err(err) => error_response(&err),
    }
}

fn error_response(err: &GenerateError) -> CodeGeneratorResponse {
    warn!(error = %err, "generation failed");
    CodeGeneratorResponse {
        error: Some(err.to_string()),
        supported_features: Some(FEATURE_PROTO3_OPTIONAL),
        file: Vec::new(),
    }
}

/// Generates one file per requested input that has at least one annotated
/// field.
pub fn generate(request: &CodeGeneratorRequest) -> Result<Vec<GeneratedFile>, GenerateError> {
    let options = GeneratorOptions::parse(request.parameter.as_deref())?;
    let map_entries = MapEntries::collect(&request.proto_file);

    let mut generated = Vec::new();
    for name in &request.file_to_generate {
        let descriptor = request
            .proto_file
            .iter()
            .find(|file| file.name() == name)
            .ok_or_else(|| GenerateError::UnknownFile(name.clone()))?;
        let file = resolve_file(descriptor, &map_entries)?;

        match render_file(&file, &options) {
            Some(content) => {
                let output = output_name(&file, &options);
                info!(input = %file.name, output = %output, "generated filters");
                generated.push(GeneratedFile {
                    name: Some(output),
                    content: Some(content),
                });
            }
            None => debug!(input = %file.name, "no annotated fields; skipping"),
        }
    }
    Ok(generated)
}

/// Renders the generated source for `file`, or `None` if nothing in it is
/// annotated.
pub fn render_file(file: &FileDef, options: &GeneratorOptions) -> Option<String> {
    let init = init_fn_ident(&file_stem(&file.name));
    let items = emit_file_items(file, &options.runtime, &init)?;
    let body = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n");
    Some(format!(
        "// @generated by protoc-gen-permfilter. DO NOT EDIT.\n\
         // source: {}\n\
         //\n\
         // Include this file in the module holding the prost output for package `{}`.\n\
         // One item per line, unformatted; run rustfmt over it to read it.\n\n\
         {body}\n",
        file.name, file.package,
    ))
}

/// Output path for `file`: the input's stem plus the configured suffix.
pub fn output_name(file: &FileDef, options: &GeneratorOptions) -> String {
    let stem = file_stem(&file.name);
    let name = format!("{stem}{}.rs", options.suffix);
    let dir = match options.paths {
        PathMode::SourceRelative => Path::new(&file.name)
            .parent()
            .map(|dir| dir.to_string_lossy().into_owned())
            .unwrap_or_default(),
        PathMode::Import => file.package.replace('.', "/"),
    };
    if dir.is_empty() {
        name
    } else {
        format!("{dir}/{name}")
    }
}

fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_owned())
}
