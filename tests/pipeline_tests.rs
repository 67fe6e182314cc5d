//! Pipeline Tests
//!
//! End-to-end coverage of the staged validation pipeline through the public
//! API: stage ordering, per-stage collection, and finding determinism.

use godecl::document::{from_json_str, from_yaml_str};
use godecl::{validate, Schema, ValidationError, ValidationReport};

fn validate_yaml(source: &str) -> ValidationReport {
    let mapping = from_yaml_str(source).unwrap();
    validate(&Schema::new(mapping))
}

fn validate_json(source: &str) -> ValidationReport {
    let mapping = from_json_str(source).unwrap();
    validate(&Schema::new(mapping))
}

fn expected(errors: &[ValidationError]) -> Vec<String> {
    let mut messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    messages.sort();
    messages
}

// =============================================================================
// Clean schemas
// =============================================================================

#[test]
fn test_clean_schema_passes_all_stages() {
    let report = validate_yaml(
        r#"
_package: shapes
scalar: float64
point:
  x: scalar
  y: scalar
ring: "[]point"
index: map[string]ring
handle: "*point"
"#,
    );
    assert!(report.is_clean(), "unexpected findings: {:?}", report.messages());
}

#[test]
fn test_pointer_and_slice_self_references_are_legal() {
    let report = validate_yaml(
        r#"
_package: lists
node: "*node"
chain: "[]chain"
index: map[int]index
"#,
    );
    assert!(report.is_clean(), "unexpected findings: {:?}", report.messages());
}

// =============================================================================
// Structural stage
// =============================================================================

#[test]
fn test_missing_package_is_reported_alone() {
    let report = validate_yaml("foo: int\n");
    assert_eq!(
        report.sorted_messages(),
        expected(&[ValidationError::MissingPackageName])
    );
}

#[test]
fn test_structural_stage_collects_every_shape_violation() {
    let report = validate_yaml(
        r#"
foo: 3
bar: [1, 2]
baz:
  ban: null
  bam: {}
  bunt: ""
good: int
"#,
    );
    assert_eq!(
        report.sorted_messages(),
        expected(&[
            ValidationError::IllegalValue {
                key: "foo".into(),
                parent: "root".into(),
            },
            ValidationError::IllegalValue {
                key: "bar".into(),
                parent: "root".into(),
            },
            ValidationError::IllegalValue {
                key: "ban".into(),
                parent: "baz".into(),
            },
            ValidationError::IllegalValue {
                key: "bam".into(),
                parent: "baz".into(),
            },
            ValidationError::IllegalValue {
                key: "bunt".into(),
                parent: "baz".into(),
            },
            ValidationError::MissingPackageName,
        ])
    );
}

#[test]
fn test_structural_findings_suppress_name_checks() {
    // "fo$o" would fail the syntactical stage, but its empty value aborts
    // the run one stage earlier.
    let report = validate_yaml("_package: shapes\n\"fo$o\": \"\"\nbar: in+t\n");
    assert_eq!(
        report.sorted_messages(),
        expected(&[ValidationError::IllegalValue {
            key: "fo$o".into(),
            parent: "root".into(),
        }])
    );
}

// =============================================================================
// Syntactical stage
// =============================================================================

#[test]
fn test_syntactic_stage_collects_names_and_values() {
    let report = validate_yaml(
        r#"
_package: shapes
"fo o": int
bar: in+t
baz:
  "b@d": string
  bunt: "map[int"
"#,
    );
    assert_eq!(
        report.sorted_messages(),
        expected(&[
            ValidationError::IllegalTypeName {
                name: "fo o".into(),
                parent: "root".into(),
            },
            ValidationError::InvalidValueString {
                value: "in+t".into(),
                key: "bar".into(),
                parent: "root".into(),
            },
            ValidationError::IllegalTypeName {
                name: "b@d".into(),
                parent: "baz".into(),
            },
            ValidationError::InvalidValueString {
                value: "map[int".into(),
                key: "bunt".into(),
                parent: "baz".into(),
            },
        ])
    );
}

#[test]
fn test_illegal_package_names_are_rejected() {
    let report = validate_yaml("_package: package-name\nfoo: int\n");
    assert_eq!(
        report.sorted_messages(),
        expected(&[ValidationError::IllegalPackageName {
            name: "package-name".into(),
        }])
    );

    let report = validate_yaml("_package: func\nfoo: int\n");
    assert_eq!(
        report.sorted_messages(),
        expected(&[ValidationError::IllegalPackageName {
            name: "func".into(),
        }])
    );
}

#[test]
fn test_syntactic_findings_suppress_resolution() {
    // "schtring" is unknown, but the bad name ends the run first.
    let report = validate_yaml("_package: shapes\n\"fo o\": schtring\n");
    assert_eq!(
        report.sorted_messages(),
        expected(&[ValidationError::IllegalTypeName {
            name: "fo o".into(),
            parent: "root".into(),
        }])
    );
}

// =============================================================================
// Logical stage
// =============================================================================

#[test]
fn test_unknown_types_report_their_scope() {
    let report = validate_yaml(
        r#"
_package: shapes
foo: int
fof: "[]schtring"
baz:
  ban: int32
  bam: "**bar"
"#,
    );
    assert_eq!(
        report.sorted_messages(),
        expected(&[
            ValidationError::TypeNotFound {
                name: "schtring".into(),
                parent: "root".into(),
            },
            ValidationError::TypeNotFound {
                name: "bar".into(),
                parent: "baz".into(),
            },
        ])
    );
}

#[test]
fn test_recursive_paths_render_group_fields() {
    let report = validate_yaml(
        r#"
_package: shapes
bar:
  foo: baz
baz:
  ban: bar
"#,
    );
    assert_eq!(
        report.sorted_messages(),
        expected(&[
            ValidationError::RecursiveTypeUsage {
                path: vec!["bar.foo".into(), "baz.ban".into(), "bar".into()],
            },
            ValidationError::RecursiveTypeUsage {
                path: vec!["baz.ban".into(), "bar.foo".into(), "baz".into()],
            },
        ])
    );
}

#[test]
fn test_map_keys_resolve_through_aliases() {
    let report = validate_yaml(
        r#"
_package: shapes
foo: "*int"
bar: map[foo]string
"#,
    );
    assert_eq!(
        report.sorted_messages(),
        expected(&[ValidationError::InvalidMapKey {
            key: "foo".into(),
            expr: "map[foo]string".into(),
        }])
    );
}

#[test]
fn test_logical_stage_reports_all_three_checks_together() {
    let report = validate_yaml(
        r#"
_package: shapes
fof: schtring
bar: bar
bal: map[*int]string
"#,
    );
    assert_eq!(
        report.sorted_messages(),
        expected(&[
            ValidationError::TypeNotFound {
                name: "schtring".into(),
                parent: "root".into(),
            },
            ValidationError::RecursiveTypeUsage {
                path: vec!["bar".into(), "bar".into()],
            },
            ValidationError::InvalidMapKey {
                key: "*int".into(),
                expr: "map[*int]string".into(),
            },
        ])
    );
}

// =============================================================================
// Determinism and formats
// =============================================================================

#[test]
fn test_yaml_and_json_documents_agree() {
    let yaml = validate_yaml(
        r#"
_package: shapes
fof: schtring
bar: bar
"#,
    );
    let json = validate_json(r#"{"_package": "shapes", "fof": "schtring", "bar": "bar"}"#);
    assert_eq!(yaml.sorted_messages(), json.sorted_messages());
    assert!(!yaml.is_clean());
}

#[test]
fn test_repeated_runs_are_identical() {
    let source = r#"
_package: shapes
fof: schtring
baz:
  ban: bar
bar: bar
"#;
    let first = validate_yaml(source).sorted_messages();
    let second = validate_yaml(source).sorted_messages();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_findings_serialize_with_kind_tags() {
    let report = validate_yaml("_package: shapes\nfof: schtring\n");
    let value = serde_json::to_value(report.findings()).unwrap();
    assert_eq!(value[0]["kind"], "TypeNotFound");
    assert_eq!(value[0]["name"], "schtring");
    assert_eq!(value[0]["parent"], "root");

    // full report round-trips
    let encoded = serde_json::to_string(&report).unwrap();
    let decoded: ValidationReport = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded.sorted_messages(), report.sorted_messages());
}
