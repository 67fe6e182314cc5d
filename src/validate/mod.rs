//! Staged validation pipeline.
//!
//! A schema passes through three stages in a fixed order: structural (is
//! every entry a usable shape), syntactical (do names and value strings fit
//! the grammar), logical (do the declarations resolve, terminate, and stay
//! cycle-free). Within a stage every finding is collected; across stages the
//! first stage with findings ends the run, so later stages can assume the
//! guarantees of earlier ones.

use tracing::debug;

use crate::error::ValidationReport;
use crate::schema::Schema;

mod logical;
mod map_keys;
mod structural;
mod syntactic;

pub use logical::logical;
pub use map_keys::{check_map_keys, MapKeyViolation};
pub use structural::structural;
pub use syntactic::{syntactic, NameRules};

/// Parent name reported for top-level declarations.
pub(crate) const ROOT_SCOPE: &str = "root";

/// Validates a schema stage by stage, stopping at the first stage that
/// produces findings. An empty report means the schema is ready for
/// code generation.
pub fn validate(schema: &Schema) -> ValidationReport {
    let report = structural(schema);
    if !report.is_clean() {
        debug!(findings = report.len(), "structural stage failed");
        return report;
    }

    let report = syntactic(schema);
    if !report.is_clean() {
        debug!(findings = report.len(), "syntactical stage failed");
        return report;
    }

    let report = logical(schema);
    if !report.is_clean() {
        debug!(findings = report.len(), "logical stage failed");
    }
    report
}
