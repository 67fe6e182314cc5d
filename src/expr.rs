//! Type Expression Grammar
//!
//! Parses the small textual grammar used for every type reference in a
//! schema: zero or more prefix wrappers (`*` pointer-of, `[]` slice-of,
//! `map[K]` keyed-by) applied to a base identifier. The base identifier is
//! either a Go basic type or the name of another declaration.
//!
//! The grammar is the single legality oracle for type syntax — nothing in
//! the crate shells out to a language parser. Accept/reject decisions are
//! byte-level and independent of any compiler front end:
//! - identifiers match `[A-Za-z0-9_]+` and are not Go keywords
//! - no whitespace, no characters outside `[A-Za-z0-9_*\[\]]`
//! - brackets balance, and nothing trails a complete expression

use std::fmt;

use thiserror::Error;

// =============================================================================
// Go tables
// =============================================================================

/// Go basic types. A base identifier naming one of these terminates a
/// containment branch and never needs a declaration.
pub const GO_PRIMITIVES: &[&str] = &[
    "string", "bool", "int8", "uint8", "byte", "int16", "uint16", "int32",
    "rune", "uint32", "int64", "uint64", "int", "uint", "uintptr", "float32",
    "float64", "complex64", "complex128",
];

/// Go keywords. Illegal as declared names and as base identifiers.
pub const GO_KEYWORDS: &[&str] = &[
    "break", "default", "func", "interface", "select", "case", "defer", "go",
    "map", "struct", "chan", "else", "goto", "package", "switch", "const",
    "fallthrough", "if", "range", "type", "continue", "for", "import",
    "return", "var",
];

/// Whether `name` is a Go basic type.
pub fn is_primitive(name: &str) -> bool {
    GO_PRIMITIVES.contains(&name)
}

/// Whether `name` is a Go keyword.
pub fn is_keyword(name: &str) -> bool {
    GO_KEYWORDS.contains(&name)
}

// =============================================================================
// Expression tree
// =============================================================================

/// A parsed type expression.
///
/// `Ident` is a *value type*; the wrapper variants are *reference types*
/// (they indirect or aggregate without fixed inline size, so they break
/// value-containment chains).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Bare identifier: a basic type or a declaration name.
    Ident(String),

    /// `*T`
    Pointer(Box<TypeExpr>),

    /// `[]T`
    Slice(Box<TypeExpr>),

    /// `map[K]V`
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
}

impl TypeExpr {
    /// Whether the expression is a reference type (`*`, `[]`, or `map[...]`
    /// at the outermost position).
    pub fn is_reference(&self) -> bool {
        !matches!(self, TypeExpr::Ident(_))
    }

    /// Every base identifier occurrence in textual order, wrappers stripped,
    /// map keys and values included. Duplicates are preserved — each
    /// occurrence is reported separately by the completeness check.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_identifiers(&mut out);
        out
    }

    fn collect_identifiers<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeExpr::Ident(name) => out.push(name),
            TypeExpr::Pointer(inner) | TypeExpr::Slice(inner) => {
                inner.collect_identifiers(out)
            }
            TypeExpr::Map { key, value } => {
                key.collect_identifiers(out);
                value.collect_identifiers(out);
            }
        }
    }

    /// The key sub-expression of every `map` wrapper in the tree, in textual
    /// order. Maps nested inside keys contribute their own keys too.
    pub fn map_keys(&self) -> Vec<&TypeExpr> {
        let mut out = Vec::new();
        self.collect_map_keys(&mut out);
        out
    }

    fn collect_map_keys<'a>(&'a self, out: &mut Vec<&'a TypeExpr>) {
        match self {
            TypeExpr::Ident(_) => {}
            TypeExpr::Pointer(inner) | TypeExpr::Slice(inner) => {
                inner.collect_map_keys(out)
            }
            TypeExpr::Map { key, value } => {
                out.push(key);
                key.collect_map_keys(out);
                value.collect_map_keys(out);
            }
        }
    }
}

impl fmt::Display for TypeExpr {
    /// Renders the canonical textual form. The grammar has no whitespace or
    /// alternate spellings, so parsing and re-rendering is lossless.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Ident(name) => write!(f, "{name}"),
            TypeExpr::Pointer(inner) => write!(f, "*{inner}"),
            TypeExpr::Slice(inner) => write!(f, "[]{inner}"),
            TypeExpr::Map { key, value } => write!(f, "map[{key}]{value}"),
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Why a string failed to parse as a type expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("empty type expression")]
    Empty,

    #[error("expected identifier at byte {offset}")]
    ExpectedIdentifier { offset: usize },

    #[error("unexpected character {found:?} at byte {offset}")]
    UnexpectedCharacter { found: char, offset: usize },

    #[error("unterminated map key starting at byte {offset}")]
    UnterminatedKey { offset: usize },

    #[error("reserved word {word:?} used as type identifier")]
    ReservedWord { word: String },

    #[error("trailing characters at byte {offset}")]
    Trailing { offset: usize },
}

// =============================================================================
// Parser
// =============================================================================

/// Parses a complete type expression. The whole input must be consumed.
pub fn parse(input: &str) -> Result<TypeExpr, ExprError> {
    if input.is_empty() {
        return Err(ExprError::Empty);
    }
    let mut parser = Parser { input, pos: 0 };
    let expr = parser.expression()?;
    if parser.pos != input.len() {
        return Err(ExprError::Trailing { offset: parser.pos });
    }
    Ok(expr)
}

/// Checks legality without keeping the tree.
pub fn is_valid(input: &str) -> bool {
    parse(input).is_ok()
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// The character at the cursor, for error reporting. The cursor only
    /// ever advances over ASCII, so it always sits on a char boundary.
    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn expression(&mut self) -> Result<TypeExpr, ExprError> {
        match self.peek() {
            None => Err(ExprError::ExpectedIdentifier { offset: self.pos }),
            Some(b'*') => {
                self.pos += 1;
                Ok(TypeExpr::Pointer(Box::new(self.expression()?)))
            }
            Some(b'[') => {
                let open = self.pos;
                self.pos += 1;
                match self.peek() {
                    Some(b']') => {
                        self.pos += 1;
                        Ok(TypeExpr::Slice(Box::new(self.expression()?)))
                    }
                    Some(_) => Err(ExprError::UnexpectedCharacter {
                        // only "[]" opens a slice; "[x" is not a wrapper
                        found: self.peek_char().unwrap_or('['),
                        offset: self.pos,
                    }),
                    None => Err(ExprError::UnterminatedKey { offset: open }),
                }
            }
            Some(_) => self.identifier_or_map(),
        }
    }

    fn identifier_or_map(&mut self) -> Result<TypeExpr, ExprError> {
        let name = self.identifier()?;
        if name == "map" && self.peek() == Some(b'[') {
            let open = self.pos;
            self.pos += 1;
            let key = self.expression()?;
            match self.peek() {
                Some(b']') => self.pos += 1,
                Some(_) => {
                    return Err(ExprError::UnexpectedCharacter {
                        found: self.peek_char().unwrap_or(']'),
                        offset: self.pos,
                    })
                }
                None => return Err(ExprError::UnterminatedKey { offset: open }),
            }
            let value = self.expression()?;
            return Ok(TypeExpr::Map {
                key: Box::new(key),
                value: Box::new(value),
            });
        }
        if is_keyword(&name) {
            return Err(ExprError::ReservedWord { word: name });
        }
        Ok(TypeExpr::Ident(name))
    }

    fn identifier(&mut self) -> Result<String, ExprError> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return match self.peek_char() {
                Some(found) => Err(ExprError::UnexpectedCharacter {
                    found,
                    offset: start,
                }),
                None => Err(ExprError::ExpectedIdentifier { offset: start }),
            };
        }
        Ok(self.input[start..self.pos].to_string())
    }
}
