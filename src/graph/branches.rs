//! Containment-path resolution over a schema's declarations.
//!
//! Grows one branch per distinct value-containment path from each root
//! declaration down to a terminal: a primitive or otherwise unresolvable
//! literal, a reference expression, or a repeated name (a cycle). Branches
//! fork at field groups with independent segment buffers, so no two paths
//! ever share a backing store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::DocValue;
use crate::expr;
use crate::schema::Schema;

// =============================================================================
// Segments
// =============================================================================

/// Depth marker of a segment. Terminal literals appended while closing a
/// branch sit at [`LEVEL_TERMINAL`]; root declarations at [`LEVEL_ROOT`];
/// fields inside a group one deeper.
pub type FieldLevel = u8;

pub const LEVEL_TERMINAL: FieldLevel = 0;
pub const LEVEL_ROOT: FieldLevel = 1;
pub const LEVEL_FIELD: FieldLevel = 2;

/// What a segment stood for in the source mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    /// A scalar declaration value, a field value, or a closing literal.
    Value,
    /// A field group (nested mapping).
    Group,
}

/// One hop in a containment path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub name: String,
    pub kind: SegmentKind,
    pub level: FieldLevel,
}

// =============================================================================
// Branch
// =============================================================================

/// A single containment path from a root declaration to a terminal.
///
/// Once recorded by [`resolve`] a branch is never mutated again; the segment
/// sequence and the cycle flag are its only observable state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    segments: Vec<Segment>,
    contains_cycle: bool,
}

impl Branch {
    /// Appends a segment, flagging the branch as cyclic when `name` already
    /// occurred earlier in the path.
    fn push(&mut self, name: &str, kind: SegmentKind, level: FieldLevel) {
        if self.segments.iter().any(|segment| segment.name == name) {
            self.contains_cycle = true;
        }
        self.segments.push(Segment {
            name: name.to_string(),
            kind,
            level,
        });
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the path revisits a name before terminating, i.e. the
    /// declared types cannot be laid out by value.
    pub fn contains_cycle(&self) -> bool {
        self.contains_cycle
    }

    /// Renders the path for reporting. A group segment fuses with its
    /// immediately following field segment into `"group.field"`; every other
    /// segment renders as its bare name, and a trailing group renders bare.
    pub fn rendered_path(&self) -> Vec<String> {
        let mut path = Vec::new();
        let mut pending_group: Option<&str> = None;

        for segment in &self.segments {
            if segment.kind == SegmentKind::Group {
                pending_group = Some(&segment.name);
                continue;
            }
            match pending_group.take() {
                Some(group) if segment.level == LEVEL_FIELD => {
                    path.push(format!("{}.{}", group, segment.name));
                }
                _ => path.push(segment.name.clone()),
            }
        }

        if let Some(group) = pending_group {
            path.push(group.to_string());
        }

        path
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rendered_path().join("->"))
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Enumerates every containment path in `schema`.
///
/// One traversal starts per declared root name; the namespace entry is never
/// grown. Only closed branches are returned: a group segment on its own
/// records nothing, each of its fields closes a fork of its own. Branch order
/// follows mapping iteration order and carries no meaning.
pub fn resolve(schema: &Schema) -> Vec<Branch> {
    let mut resolver = Resolver {
        schema,
        branches: Vec::new(),
    };
    for (name, value) in schema.declarations() {
        resolver.grow(Branch::default(), name, value, LEVEL_ROOT);
    }
    resolver.branches
}

/// Enumerates the containment paths starting at a single root declaration.
/// Unknown names (the package entry included) resolve to no branches.
pub fn resolve_root(schema: &Schema, name: &str) -> Vec<Branch> {
    let mut resolver = Resolver {
        schema,
        branches: Vec::new(),
    };
    if let Some(value) = schema.declaration(name) {
        resolver.grow(Branch::default(), name, value, LEVEL_ROOT);
    }
    resolver.branches
}

struct Resolver<'a> {
    schema: &'a Schema,
    branches: Vec<Branch>,
}

impl<'a> Resolver<'a> {
    fn grow(&mut self, mut branch: Branch, name: &str, value: &'a DocValue, level: FieldLevel) {
        match value {
            DocValue::Str(raw) => {
                branch.push(name, SegmentKind::Value, level);
                if branch.contains_cycle() {
                    self.branches.push(branch);
                    return;
                }
                let is_reference = expr::parse(raw)
                    .map(|parsed| parsed.is_reference())
                    .unwrap_or(false);
                if is_reference {
                    // Pointers, slices and maps break value containment, so
                    // the branch ends here without chasing the referent.
                    branch.push(raw, SegmentKind::Value, LEVEL_TERMINAL);
                    self.branches.push(branch);
                    return;
                }
                match self.schema.declaration(raw) {
                    Some(next) => self.grow(branch, raw, next, LEVEL_ROOT),
                    None => {
                        // Unresolvable at root means a primitive or a stray
                        // literal; either way the path is complete.
                        branch.push(raw, SegmentKind::Value, LEVEL_TERMINAL);
                        self.branches.push(branch);
                    }
                }
            }
            DocValue::Mapping(fields) => {
                branch.push(name, SegmentKind::Group, level);
                if branch.contains_cycle() {
                    self.branches.push(branch);
                    return;
                }
                for (field, field_value) in fields {
                    // Fork: every field continues on its own copy.
                    self.grow(branch.clone(), field, field_value, level + 1);
                }
            }
            DocValue::Other => {}
        }
    }
}
