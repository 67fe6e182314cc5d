//! Validation Errors
//!
//! The fixed error taxonomy for schema validation, plus the report type
//! that collects findings across pipeline stages.
//!
//! Findings are data, never panics: a malformed schema is reported back to
//! the caller with the literal(s) and enclosing declaration name needed to
//! reproduce the message. The message templates are stable — downstream
//! tooling greps for the `Err*` prefixes.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias for schema operations that can hit internal errors.
pub type Result<T> = std::result::Result<T, SchemaError>;

// =============================================================================
// Validation findings
// =============================================================================

/// A single validation finding.
///
/// Every variant corresponds to one way a schema can be malformed. The
/// `#[error]` templates are byte-stable; tests compare rendered messages.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValidationError {
    /// A declaration value with the wrong shape: empty string, list, null,
    /// number, bool, or a group nested inside a group.
    #[error("ErrIllegalValue: value assigned to key \"{key}\" in \"{parent}\" is invalid")]
    IllegalValue { key: String, parent: String },

    /// No usable `_package` entry at root level.
    #[error("ErrMissingPackageName: package name was not specified in the \"_package\" field at root level")]
    MissingPackageName,

    /// The `_package` value is not a legal identifier.
    #[error("ErrIllegalPackageName: illegal package name \"{name}\"")]
    IllegalPackageName { name: String },

    /// A declared name (root or field) fails the identifier rule.
    #[error("ErrIllegalTypeName: illegal type name \"{name}\" in \"{parent}\"")]
    IllegalTypeName { name: String, parent: String },

    /// A type-expression value fails the grammar.
    #[error("ErrInvalidValueString: value \"{value}\" assigned to \"{key}\" in \"{parent}\" is invalid")]
    InvalidValueString {
        value: String,
        key: String,
        parent: String,
    },

    /// An identifier that is neither a basic type nor a declared name.
    #[error("ErrTypeNotFound: type with name \"{name}\" in \"{parent}\" was not found")]
    TypeNotFound { name: String, parent: String },

    /// A value-containment cycle, with the rendered branch path.
    #[error("ErrRecursiveTypeUsage: illegal recursive type detected for \"{}\"", .path.join("->"))]
    RecursiveTypeUsage { path: Vec<String> },

    /// A map key that is a reference type or resolves to one.
    #[error("ErrInvalidMapKey: \"{key}\" in \"{expr}\" is not a valid map key")]
    InvalidMapKey { key: String, expr: String },
}

impl ValidationError {
    /// Stable kind tag, matching the message prefix.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::IllegalValue { .. } => "ErrIllegalValue",
            Self::MissingPackageName => "ErrMissingPackageName",
            Self::IllegalPackageName { .. } => "ErrIllegalPackageName",
            Self::IllegalTypeName { .. } => "ErrIllegalTypeName",
            Self::InvalidValueString { .. } => "ErrInvalidValueString",
            Self::TypeNotFound { .. } => "ErrTypeNotFound",
            Self::RecursiveTypeUsage { .. } => "ErrRecursiveTypeUsage",
            Self::InvalidMapKey { .. } => "ErrInvalidMapKey",
        }
    }
}

// =============================================================================
// Report
// =============================================================================

/// Findings collected by the validation pipeline.
///
/// Mapping iteration order is not guaranteed, so finding order within a
/// stage is not semantically meaningful; consumers that need determinism use
/// [`ValidationReport::sorted_messages`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    findings: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finding.
    pub fn push(&mut self, finding: ValidationError) {
        self.findings.push(finding);
    }

    /// Absorb another report.
    pub fn merge(&mut self, other: ValidationReport) {
        self.findings.extend(other.findings);
    }

    /// True when validation passed.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// All findings in insertion order.
    pub fn findings(&self) -> &[ValidationError] {
        &self.findings
    }

    pub fn into_findings(self) -> Vec<ValidationError> {
        self.findings
    }

    /// Rendered messages in insertion order.
    pub fn messages(&self) -> Vec<String> {
        self.findings.iter().map(|f| f.to_string()).collect()
    }

    /// Rendered messages sorted lexicographically, for deterministic output
    /// over the unordered underlying mapping.
    pub fn sorted_messages(&self) -> Vec<String> {
        let mut messages = self.messages();
        messages.sort();
        messages
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for message in self.sorted_messages() {
            writeln!(f, "{}", message)?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationReport {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.iter()
    }
}

impl FromIterator<ValidationError> for ValidationReport {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            findings: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Internal errors
// =============================================================================

/// Errors that indicate a bug in the adapter or a caller contract breach,
/// not a problem with user input. These are never part of a report.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A value with a shape the pipeline should have rejected reached the
    /// typed-declaration layer.
    #[error("declaration \"{key}\" has an unexpected value shape; run validation before materializing declarations")]
    UnexpectedShape { key: String },

    /// Declarations were requested from a schema with no usable `_package`
    /// entry.
    #[error("schema has no package name")]
    MissingPackage,
}
