//! Document Adapter
//!
//! Converts deserialized YAML/JSON documents into the tagged value model
//! the validation pipeline operates on. Everything downstream of this
//! module sees [`DocValue`], never a raw deserializer value — the pipeline
//! classifies shapes by matching on the tag, and the `Other` arm is what
//! stage 1 rejects.
//!
//! Scalar mapping keys (numbers, bools, null) are rendered to their display
//! strings, mirroring how loosely-typed schema documents are written in
//! practice. Container keys are refused at load time.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Reserved root-level key naming the output package.
pub const PACKAGE_KEY: &str = "_package";

// =============================================================================
// Value model
// =============================================================================

/// A decoded document value.
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
    /// A string scalar — a type expression or the package name.
    Str(String),

    /// A nested mapping — a field group at root level, illegal below it.
    Mapping(DocMapping),

    /// Anything else the document format can express (number, bool, null,
    /// list, tagged value). Stage 1 reports these as illegal values.
    Other,
}

/// The root mapping and every nested mapping. Iteration order is
/// unspecified, matching the source format's map semantics; consumers must
/// not depend on it.
pub type DocMapping = HashMap<String, DocValue>;

impl DocValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&DocMapping> {
        match self {
            DocValue::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Shape tag for log and error output.
    pub fn kind(&self) -> &'static str {
        match self {
            DocValue::Str(_) => "string",
            DocValue::Mapping(_) => "mapping",
            DocValue::Other => "other",
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Errors from loading and decoding a schema document. Distinct from
/// validation findings: these mean the document could not be interpreted as
/// a mapping at all.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document root is not a mapping")]
    NotAMapping,

    #[error("mapping key of kind {kind} is not supported")]
    UnsupportedKey { kind: &'static str },

    #[error("unrecognized schema extension: {}", .path.display())]
    UnknownExtension { path: PathBuf },
}

// =============================================================================
// YAML
// =============================================================================

/// Decode a YAML document into the value model. An empty document counts as
/// an empty mapping (the pipeline then reports the missing package name);
/// any other non-mapping root is refused.
pub fn from_yaml_str(source: &str) -> Result<DocMapping, DocumentError> {
    let value: serde_yaml::Value = serde_yaml::from_str(source)?;
    match value {
        serde_yaml::Value::Mapping(mapping) => yaml_mapping(mapping),
        serde_yaml::Value::Null => Ok(DocMapping::new()),
        _ => Err(DocumentError::NotAMapping),
    }
}

fn yaml_mapping(mapping: serde_yaml::Mapping) -> Result<DocMapping, DocumentError> {
    let mut out = DocMapping::with_capacity(mapping.len());
    for (key, value) in mapping {
        out.insert(yaml_key(&key)?, yaml_value(value)?);
    }
    Ok(out)
}

fn yaml_key(key: &serde_yaml::Value) -> Result<String, DocumentError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Sequence(_) => {
            Err(DocumentError::UnsupportedKey { kind: "sequence" })
        }
        serde_yaml::Value::Mapping(_) => {
            Err(DocumentError::UnsupportedKey { kind: "mapping" })
        }
        serde_yaml::Value::Tagged(_) => {
            Err(DocumentError::UnsupportedKey { kind: "tagged" })
        }
    }
}

fn yaml_value(value: serde_yaml::Value) -> Result<DocValue, DocumentError> {
    Ok(match value {
        serde_yaml::Value::String(s) => DocValue::Str(s),
        serde_yaml::Value::Mapping(m) => DocValue::Mapping(yaml_mapping(m)?),
        _ => DocValue::Other,
    })
}

// =============================================================================
// JSON
// =============================================================================

/// Decode a JSON document into the value model. `null` counts as an empty
/// mapping, matching the YAML adapter.
pub fn from_json_str(source: &str) -> Result<DocMapping, DocumentError> {
    let value: serde_json::Value = serde_json::from_str(source)?;
    match value {
        serde_json::Value::Object(object) => Ok(json_object(object)),
        serde_json::Value::Null => Ok(DocMapping::new()),
        _ => Err(DocumentError::NotAMapping),
    }
}

fn json_object(object: serde_json::Map<String, serde_json::Value>) -> DocMapping {
    object
        .into_iter()
        .map(|(key, value)| (key, json_value(value)))
        .collect()
}

fn json_value(value: serde_json::Value) -> DocValue {
    match value {
        serde_json::Value::String(s) => DocValue::Str(s),
        serde_json::Value::Object(o) => DocValue::Mapping(json_object(o)),
        _ => DocValue::Other,
    }
}

// =============================================================================
// Filesystem
// =============================================================================

/// Load a schema document, dispatching on the file extension
/// (`.yml`/`.yaml`/`.json`).
pub fn load_path(path: &Path) -> Result<DocMapping, DocumentError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let source = fs::read_to_string(path)?;
    let mapping = match extension {
        "yml" | "yaml" => from_yaml_str(&source)?,
        "json" => from_json_str(&source)?,
        _ => {
            return Err(DocumentError::UnknownExtension {
                path: path.to_path_buf(),
            })
        }
    };
    debug!(
        path = %path.display(),
        entries = mapping.len(),
        "loaded schema document"
    );
    Ok(mapping)
}

/// Find every schema document under a directory tree, sorted for stable
/// batch output.
pub fn discover(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter(|entry| {
            matches!(
                entry.path().extension().and_then(|e| e.to_str()),
                Some("yml") | Some("yaml") | Some("json")
            )
        })
        .map(|entry| entry.into_path())
        .collect();
    paths.sort();
    debug!(dir = %dir.display(), count = paths.len(), "discovered schema documents");
    paths
}
