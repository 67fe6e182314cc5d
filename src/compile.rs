//! End-to-end compilation.
//!
//! Wires the stages together: decode a document, validate it, materialize
//! the typed declarations, render Go source. A run with findings produces
//! no output at all.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::codegen::{self, GeneratedOutput};
use crate::document::{self, DocumentError};
use crate::error::{SchemaError, ValidationReport};
use crate::schema::Schema;
use crate::validate::validate;

/// Why a compilation produced no Go source.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The document was readable but failed validation. The report carries
    /// every finding from the stage that rejected it.
    #[error("validation failed with {} finding(s)", .0.len())]
    Validation(ValidationReport),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Compile YAML schema source into Go source.
pub fn compile_yaml_str(source: &str) -> Result<GeneratedOutput, CompileError> {
    let mapping = document::from_yaml_str(source)?;
    compile_schema(&Schema::new(mapping))
}

/// Compile JSON schema source into Go source.
pub fn compile_json_str(source: &str) -> Result<GeneratedOutput, CompileError> {
    let mapping = document::from_json_str(source)?;
    compile_schema(&Schema::new(mapping))
}

/// Compile a schema file (`.yml`/`.yaml`/`.json`) into Go source.
pub fn compile_path(path: &Path) -> Result<GeneratedOutput, CompileError> {
    let mapping = document::load_path(path)?;
    compile_schema(&Schema::new(mapping))
}

/// Validate a schema and render it when clean.
pub fn compile_schema(schema: &Schema) -> Result<GeneratedOutput, CompileError> {
    let report = validate(schema);
    if !report.is_clean() {
        return Err(CompileError::Validation(report));
    }

    let declarations = schema.to_declarations()?;
    let output = codegen::render(&declarations);
    debug!(types = output.type_count, "rendered Go source");
    Ok(output)
}
