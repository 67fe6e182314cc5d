//! Schema Model
//!
//! The in-memory schema every validation component operates on: a flat
//! mapping from names to declaration values, plus the reserved `_package`
//! entry naming the output package. Built once from the document adapter's
//! output and immutable for the rest of the run.
//!
//! The typed declaration view ([`TypeDeclarations`]) exists only on the far
//! side of a clean pipeline run — until then the schema deliberately keeps
//! the raw tagged values so the structural stage can report bad shapes
//! instead of failing to construct.

use serde::Serialize;

use crate::document::{DocMapping, DocValue, PACKAGE_KEY};
use crate::error::SchemaError;

// =============================================================================
// Schema
// =============================================================================

/// A schema under validation.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: DocMapping,
}

impl Schema {
    pub fn new(entries: DocMapping) -> Self {
        Self { entries }
    }

    /// Every root entry, the package entry included.
    pub fn entries(&self) -> &DocMapping {
        &self.entries
    }

    /// Root lookup across declarations only — the package entry is not a
    /// declaration and never resolves.
    pub fn declaration(&self, name: &str) -> Option<&DocValue> {
        if name == PACKAGE_KEY {
            return None;
        }
        self.entries.get(name)
    }

    /// Whether `name` is a declared root name.
    pub fn is_declared(&self, name: &str) -> bool {
        self.declaration(name).is_some()
    }

    /// Iterate declarations in unspecified order, package entry excluded.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &DocValue)> {
        self.entries
            .iter()
            .filter(|(name, _)| name.as_str() != PACKAGE_KEY)
            .map(|(name, value)| (name.as_str(), value))
    }

    /// The declared package name, when present as a string.
    pub fn package_name(&self) -> Option<&str> {
        self.entries.get(PACKAGE_KEY).and_then(|value| value.as_str())
    }

    /// Materialize the typed declaration list for emission, alphabetized at
    /// both levels. Only meaningful after a clean validation run; shapes the
    /// pipeline would have rejected surface as [`SchemaError`].
    pub fn to_declarations(&self) -> Result<TypeDeclarations, SchemaError> {
        let package = self
            .package_name()
            .ok_or(SchemaError::MissingPackage)?
            .to_string();

        let mut declarations = Vec::new();
        for (name, value) in self.declarations() {
            let declaration = match value {
                DocValue::Str(expr) => Declaration::Alias(expr.clone()),
                DocValue::Mapping(fields) => {
                    let mut typed = Vec::with_capacity(fields.len());
                    for (field, field_value) in fields {
                        match field_value {
                            DocValue::Str(expr) => {
                                typed.push((field.clone(), expr.clone()))
                            }
                            _ => {
                                return Err(SchemaError::UnexpectedShape {
                                    key: field.clone(),
                                })
                            }
                        }
                    }
                    typed.sort();
                    Declaration::Record(typed)
                }
                DocValue::Other => {
                    return Err(SchemaError::UnexpectedShape {
                        key: name.to_string(),
                    })
                }
            };
            declarations.push((name.to_string(), declaration));
        }
        declarations.sort();

        Ok(TypeDeclarations {
            package,
            declarations,
        })
    }
}

impl From<DocMapping> for Schema {
    fn from(entries: DocMapping) -> Self {
        Self::new(entries)
    }
}

// =============================================================================
// Typed declarations
// =============================================================================

/// A validated schema, flattened for the emitter: alphabetized
/// `(name, declaration)` pairs plus the package name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDeclarations {
    pub package: String,
    pub declarations: Vec<(String, Declaration)>,
}

/// One root declaration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Declaration {
    /// A name bound directly to a type expression.
    Alias(String),

    /// A name bound to a flat set of fields, alphabetized.
    Record(Vec<(String, String)>),
}
