//! Structural validation (stage 1).
//!
//! Checks the shape of every entry before anything tries to interpret the
//! strings inside: declaration values must be non-empty strings or, at root
//! level only, field groups; and a usable `_package` entry must exist. Later
//! stages rely on these guarantees.

use crate::document::DocValue;
use crate::error::{ValidationError, ValidationReport};
use crate::schema::Schema;

use super::ROOT_SCOPE;

/// Runs the structural stage over every root entry and group field.
pub fn structural(schema: &Schema) -> ValidationReport {
    let mut report = ValidationReport::new();

    for (name, value) in schema.entries() {
        match value {
            DocValue::Str(raw) => {
                if raw.is_empty() {
                    report.push(illegal(name, ROOT_SCOPE));
                }
            }
            DocValue::Mapping(fields) => {
                if fields.is_empty() {
                    report.push(illegal(name, ROOT_SCOPE));
                }
                for (field, field_value) in fields {
                    match field_value {
                        DocValue::Str(raw) if !raw.is_empty() => {}
                        // Lists, nulls, scalars of other kinds and nested
                        // groups are all equally unusable as field types.
                        _ => report.push(illegal(field, name)),
                    }
                }
            }
            DocValue::Other => report.push(illegal(name, ROOT_SCOPE)),
        }
    }

    if !has_usable_package(schema) {
        report.push(ValidationError::MissingPackageName);
    }

    report
}

fn illegal(key: &str, parent: &str) -> ValidationError {
    ValidationError::IllegalValue {
        key: key.to_string(),
        parent: parent.to_string(),
    }
}

fn has_usable_package(schema: &Schema) -> bool {
    schema
        .package_name()
        .map(|name| !name.is_empty())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::from_yaml_str;

    fn schema(source: &str) -> Schema {
        Schema::new(from_yaml_str(source).unwrap())
    }

    fn sorted(expected: &[ValidationError]) -> Vec<String> {
        let mut messages: Vec<String> = expected.iter().map(|e| e.to_string()).collect();
        messages.sort();
        messages
    }

    #[test]
    fn test_accepts_aliases_and_groups() {
        let schema = schema(
            "_package: packageName\nfoo: int\nbar: string\nbaz:\n  ban: int32\n",
        );
        assert!(structural(&schema).is_clean());
    }

    #[test]
    fn test_rejects_numbers_at_both_levels() {
        let schema = schema("_package: packageName\nfoo: 2\nbar:\n  ban: 4.5\n");
        assert_eq!(
            structural(&schema).sorted_messages(),
            sorted(&[
                ValidationError::IllegalValue {
                    key: "foo".into(),
                    parent: "root".into(),
                },
                ValidationError::IllegalValue {
                    key: "ban".into(),
                    parent: "bar".into(),
                },
            ])
        );
    }

    #[test]
    fn test_rejects_null_values() {
        let schema = schema("_package: packageName\nfoo:\nbar:\n  ban:\n");
        assert_eq!(
            structural(&schema).sorted_messages(),
            sorted(&[
                ValidationError::IllegalValue {
                    key: "foo".into(),
                    parent: "root".into(),
                },
                ValidationError::IllegalValue {
                    key: "ban".into(),
                    parent: "bar".into(),
                },
            ])
        );
    }

    #[test]
    fn test_rejects_empty_strings() {
        let schema = schema("_package: packageName\nfoo: \"\"\nbar:\n  ban: \"\"\n");
        assert_eq!(
            structural(&schema).sorted_messages(),
            sorted(&[
                ValidationError::IllegalValue {
                    key: "foo".into(),
                    parent: "root".into(),
                },
                ValidationError::IllegalValue {
                    key: "ban".into(),
                    parent: "bar".into(),
                },
            ])
        );
    }

    #[test]
    fn test_rejects_lists_at_both_levels() {
        let schema = schema(
            "_package: packageName\nrant:\n  - c\n  - d\nbaz:\n  ban: int32\n  mant:\n    - a\n    - b\n",
        );
        assert_eq!(
            structural(&schema).sorted_messages(),
            sorted(&[
                ValidationError::IllegalValue {
                    key: "rant".into(),
                    parent: "root".into(),
                },
                ValidationError::IllegalValue {
                    key: "mant".into(),
                    parent: "baz".into(),
                },
            ])
        );
    }

    #[test]
    fn test_rejects_group_inside_group() {
        let schema = schema(
            "_package: packageName\nfoo: int\nbaz:\n  ban: int32\n  bant:\n    fant: string\n",
        );
        assert_eq!(
            structural(&schema).sorted_messages(),
            sorted(&[ValidationError::IllegalValue {
                key: "bant".into(),
                parent: "baz".into(),
            }])
        );
    }

    #[test]
    fn test_rejects_empty_group() {
        let schema = schema("_package: packageName\nbar: {}\n");
        assert_eq!(
            structural(&schema).sorted_messages(),
            sorted(&[ValidationError::IllegalValue {
                key: "bar".into(),
                parent: "root".into(),
            }])
        );
    }

    #[test]
    fn test_reports_missing_package() {
        let schema = schema("foo: int\nbaz:\n  ban: int\n");
        assert_eq!(
            structural(&schema).sorted_messages(),
            sorted(&[ValidationError::MissingPackageName])
        );
    }

    #[test]
    fn test_package_nested_in_group_does_not_count() {
        let schema = schema("foo: int\nbaz:\n  ban: int\n  _package: foo\n");
        assert_eq!(
            structural(&schema).sorted_messages(),
            sorted(&[ValidationError::MissingPackageName])
        );
    }

    #[test]
    fn test_empty_package_is_both_illegal_and_missing() {
        let schema = schema("_package: \"\"\nfoo: int\n");
        assert_eq!(
            structural(&schema).sorted_messages(),
            sorted(&[
                ValidationError::IllegalValue {
                    key: "_package".into(),
                    parent: "root".into(),
                },
                ValidationError::MissingPackageName,
            ])
        );
    }

    #[test]
    fn test_non_string_package_is_both_illegal_and_missing() {
        let schema = schema("_package: 3\nfoo: int\n");
        assert_eq!(
            structural(&schema).sorted_messages(),
            sorted(&[
                ValidationError::IllegalValue {
                    key: "_package".into(),
                    parent: "root".into(),
                },
                ValidationError::MissingPackageName,
            ])
        );
    }
}
