//! Flat schema compiler for Go type declarations.
//!
//! Compiles a flat name-to-type document (YAML or JSON) into Go type
//! declarations. Each entry binds a name either to a Go type expression or
//! to a group of named fields; the reserved `_package` entry names the Go
//! package. Only a schema that validates cleanly is rendered.
//!
//! ## Features
//!
//! - **Staged validation**: structural shape checks, then name and value
//!   grammar, then resolution, recursion, and map-key legality
//! - **Byte-stable findings**: every finding renders through a fixed
//!   message template, so reports diff cleanly across runs
//! - **Deterministic emission**: declarations and struct fields are
//!   alphabetized before rendering
//! - **Tooling surface**: DOT export of the reference graph, fingerprinted
//!   JSON reports, fuzzy name suggestions
//!
//! ## Pipeline
//!
//! ```text
//! document (YAML/JSON)
//!   └── Schema
//!         ├── validate()        structural -> syntactical -> logical
//!         └── to_declarations() -> codegen::render() -> Go source
//! ```

pub mod checksum;
pub mod codegen;
pub mod compile;
pub mod config;
pub mod document;
pub mod error;
pub mod expr;
pub mod graph;
pub mod schema;
pub mod validate;

pub use checksum::Fingerprint;
pub use compile::{compile_json_str, compile_path, compile_schema, compile_yaml_str, CompileError};
pub use document::{DocMapping, DocValue, PACKAGE_KEY};
pub use error::{Result, SchemaError, ValidationError, ValidationReport};
pub use schema::{Declaration, Schema, TypeDeclarations};
pub use validate::validate;
