//! Map-key legality.
//!
//! A map key has to end up comparable in the generated declarations, so a
//! key sub-expression must terminate in a primitive or a plain named value
//! type. Reference expressions are rejected outright; named keys are chased
//! through the declared alias chain and rejected when the chain lands on a
//! reference expression or a field group.

use std::collections::HashSet;

use crate::document::DocValue;
use crate::expr::{self, TypeExpr};
use crate::schema::Schema;

/// One offending map key, reported against the whole value string that
/// contains the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapKeyViolation {
    pub key: String,
    pub expr: String,
}

/// Extracts every map key used anywhere in the schema's value strings,
/// nested ones included, and returns the keys that do not terminate.
pub fn check_map_keys(schema: &Schema) -> Vec<MapKeyViolation> {
    let mut violations = Vec::new();

    for (_, value) in schema.declarations() {
        match value {
            DocValue::Str(raw) => collect(schema, raw, &mut violations),
            DocValue::Mapping(fields) => {
                for field_value in fields.values() {
                    if let DocValue::Str(raw) = field_value {
                        collect(schema, raw, &mut violations);
                    }
                }
            }
            DocValue::Other => {}
        }
    }

    violations
}

fn collect(schema: &Schema, raw: &str, violations: &mut Vec<MapKeyViolation>) {
    // Unparseable values are the syntactical stage's finding, not ours.
    let Ok(parsed) = expr::parse(raw) else { return };

    for key in parsed.map_keys() {
        if !key_terminates(schema, key) {
            violations.push(MapKeyViolation {
                key: key.to_string(),
                expr: raw.to_string(),
            });
        }
    }
}

fn key_terminates(schema: &Schema, key: &TypeExpr) -> bool {
    match key {
        TypeExpr::Ident(name) => named_key_terminates(schema, name),
        // Pointer, slice and map keys never terminate.
        _ => false,
    }
}

/// Chases a named key through the alias chain until it terminates in a
/// primitive or unresolved name (legal), or lands on a reference expression
/// or group (illegal). Chains that loop are left to the recursion check.
fn named_key_terminates(schema: &Schema, start: &str) -> bool {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = start;

    while visited.insert(current) {
        match schema.declaration(current) {
            // Primitives and unresolved names alike; whether the name
            // exists at all is the type-not-found check's concern.
            None => return true,
            Some(DocValue::Mapping(_)) => return false,
            Some(DocValue::Str(next)) => match expr::parse(next) {
                Ok(parsed) if parsed.is_reference() => return false,
                Ok(_) => current = next.as_str(),
                Err(_) => return true,
            },
            Some(DocValue::Other) => return true,
        }
    }

    true
}
