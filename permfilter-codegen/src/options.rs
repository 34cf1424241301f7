//! Generator options passed through `--permfilter_opt`.
//!
//! The request parameter is a comma-separated list of `key=value` pairs:
//!
//! | Key | Values | Default |
//! |-----|--------|---------|
//! | `paths` | `source_relative`, `import` | `source_relative` |
//! | `runtime` | a Rust path | `::permfilter` |
//! | `suffix` | file-name suffix | `_filter` |

use crate::{emit::runtime_path, error::GenerateError};

/// Where generated files are placed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PathMode {
    /// Next to the input file: `a/b/c.proto` becomes `a/b/c_filter.rs`.
    #[default]
    SourceRelative,
    /// Under the package path: package `x.y` gives `x/y/c_filter.rs`.
    Import,
}

/// Parsed generator options.
#[derive(Clone, Debug)]
pub struct GeneratorOptions {
    pub paths: PathMode,
    /// Path of the runtime crate in generated code.
    pub runtime: syn::Path,
    pub suffix: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            paths: PathMode::default(),
            runtime: syn::parse_quote!(::permfilter),
            suffix: "_filter".to_owned(),
        }
    }
}

impl GeneratorOptions {
    /// Parses the request parameter. An absent or empty parameter yields the
    /// defaults.
    pub fn parse(parameter: Option<&str>) -> Result<Self, GenerateError> {
        let mut options = Self::default();
        let Some(parameter) = parameter else {
            return Ok(options);
        };

        for option in parameter.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            let Some((key, value)) = option.split_once('=') else {
                return Err(GenerateError::invalid_option(
                    option,
                    "expected `key=value`",
                ));
            };
            match key.trim() {
                "paths" => {
                    options.paths = match value.trim() {
                        "source_relative" => PathMode::SourceRelative,
                        "import" => PathMode::Import,
                        _ => {
                            return Err(GenerateError::invalid_option(
                                option,
                                "expected `source_relative` or `import`",
                            ))
                        }
                    };
                }
                "runtime" => {
                    options.runtime = runtime_path(value.trim())
                        .map_err(|err| GenerateError::invalid_option(option, err.to_string()))?;
                }
                "suffix" => {
                    let suffix = value.trim();
                    if suffix.is_empty() || suffix.contains(['/', '\\']) {
                        return Err(GenerateError::invalid_option(
                            option,
                            "suffix must be non-empty and contain no path separators",
                        ));
                    }
                    suffix.clone_into(&mut options.suffix);
                }
                other => {
                    return Err(GenerateError::invalid_option(
                        option,
                        format!("unknown option `{other}`; expected `paths`, `runtime` or `suffix`"),
                    ))
                }
            }
        }
        Ok(options)
    }
}
