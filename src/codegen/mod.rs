//! Code generation.
//!
//! Emitters consume the typed declaration list produced by
//! `Schema::to_declarations` and never read the raw document, so every
//! ordering decision is settled before emission starts.

pub mod golang;

pub use golang::render;

/// Output from code generation.
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
    /// Generated source text.
    pub code: String,
    /// Number of type declarations emitted.
    pub type_count: usize,
}
