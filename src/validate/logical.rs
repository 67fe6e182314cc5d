//! Logical validation (stage 3).
//!
//! Assumes structural and syntactical legality and checks what the
//! declarations mean: every used identifier must resolve, no declaration may
//! contain itself by value, and every map key must terminate. All three
//! checks run and their findings are reported together.

use crate::document::DocValue;
use crate::error::{ValidationError, ValidationReport};
use crate::expr;
use crate::graph::branches;
use crate::schema::Schema;

use super::map_keys::check_map_keys;
use super::ROOT_SCOPE;

/// Runs the logical stage: type lookup, cycle detection, map keys.
pub fn logical(schema: &Schema) -> ValidationReport {
    let mut report = ValidationReport::new();

    check_declared_types(schema, &mut report);

    for branch in branches::resolve(schema) {
        if branch.contains_cycle() {
            report.push(ValidationError::RecursiveTypeUsage {
                path: branch.rendered_path(),
            });
        }
    }

    for violation in check_map_keys(schema) {
        report.push(ValidationError::InvalidMapKey {
            key: violation.key,
            expr: violation.expr,
        });
    }

    report
}

/// Every identifier occurring in a value string must name a basic type or a
/// declared root entry. Occurrences are reported one by one, so the same
/// unknown name used twice yields two findings.
fn check_declared_types(schema: &Schema, report: &mut ValidationReport) {
    for (name, value) in schema.declarations() {
        match value {
            DocValue::Str(raw) => check_expression(schema, raw, ROOT_SCOPE, report),
            DocValue::Mapping(fields) => {
                for field_value in fields.values() {
                    if let DocValue::Str(raw) = field_value {
                        check_expression(schema, raw, name, report);
                    }
                }
            }
            DocValue::Other => {}
        }
    }
}

fn check_expression(schema: &Schema, raw: &str, parent: &str, report: &mut ValidationReport) {
    let Ok(parsed) = expr::parse(raw) else { return };

    for ident in parsed.identifiers() {
        if !expr::is_primitive(ident) && !schema.is_declared(ident) {
            report.push(ValidationError::TypeNotFound {
                name: ident.to_string(),
                parent: parent.to_string(),
            });
        }
    }
}
