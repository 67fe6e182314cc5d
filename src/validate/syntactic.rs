//! Syntactical validation (stage 2).
//!
//! Assumes structurally sound input and checks the text itself: declared
//! names against the identifier rules, every value string against the
//! type-expression grammar, and the package name against the identifier
//! rules as well.

use std::collections::HashSet;

use regex::Regex;

use crate::document::{DocValue, PACKAGE_KEY};
use crate::error::{ValidationError, ValidationReport};
use crate::expr::{self, GO_KEYWORDS};
use crate::schema::Schema;

use super::ROOT_SCOPE;

/// Identifier legality rules for declared names and the package name.
///
/// Compiled once per stage run and shared across all checks. Basic type
/// names are deliberately not rejected; shadowing `int` is legal, reserved
/// words are not.
pub struct NameRules {
    identifier: Regex,
    keywords: HashSet<&'static str>,
}

impl Default for NameRules {
    fn default() -> Self {
        Self::new()
    }
}

impl NameRules {
    pub fn new() -> Self {
        Self {
            identifier: Regex::new(r"^[A-Za-z0-9_]+$").unwrap(),
            keywords: GO_KEYWORDS.iter().copied().collect(),
        }
    }

    pub fn is_legal(&self, name: &str) -> bool {
        self.identifier.is_match(name) && !self.keywords.contains(name)
    }
}

/// Runs the syntactical stage over every declared name and value string.
pub fn syntactic(schema: &Schema) -> ValidationReport {
    let rules = NameRules::new();
    let mut report = ValidationReport::new();

    for (name, value) in schema.entries() {
        if name == PACKAGE_KEY {
            // The namespace entry carries an identifier, not a type
            // expression; it gets its own check and nothing else.
            if let Some(package) = value.as_str() {
                if !rules.is_legal(package) {
                    report.push(ValidationError::IllegalPackageName {
                        name: package.to_string(),
                    });
                }
            }
            continue;
        }

        if !rules.is_legal(name) {
            report.push(illegal_name(name, ROOT_SCOPE));
        }

        match value {
            DocValue::Str(raw) => check_value(raw, name, ROOT_SCOPE, &mut report),
            DocValue::Mapping(fields) => {
                for (field, field_value) in fields {
                    if !rules.is_legal(field) {
                        report.push(illegal_name(field, name));
                    }
                    if let Some(raw) = field_value.as_str() {
                        check_value(raw, field, name, &mut report);
                    }
                }
            }
            DocValue::Other => {}
        }
    }

    report
}

fn check_value(raw: &str, key: &str, parent: &str, report: &mut ValidationReport) {
    if !expr::is_valid(raw) {
        report.push(ValidationError::InvalidValueString {
            value: raw.to_string(),
            key: key.to_string(),
            parent: parent.to_string(),
        });
    }
}

fn illegal_name(name: &str, parent: &str) -> ValidationError {
    ValidationError::IllegalTypeName {
        name: name.to_string(),
        parent: parent.to_string(),
    }
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

    fn illegal_type_name(name: &str, parent: &str) -> ValidationError {
        ValidationError::IllegalTypeName {
            name: name.into(),
            parent: parent.into(),
        }
    }

    fn invalid_value(value: &str, key: &str, parent: &str) -> ValidationError {
        ValidationError::InvalidValueString {
            value: value.into(),
            key: key.into(),
            parent: parent.into(),
        }
    }

    #[test]
    fn test_accepts_plain_declarations() {
        let schema = schema("_package: packageName\nfoo: int\nbaz:\n  ban: int\n");
        assert!(syntactic(&schema).is_clean());
    }

    #[test]
    fn test_rejects_spaces_in_names() {
        let schema = schema(
            "_package: packageName\n\"fo o\": int\nbaz:\n  oof: int\n  \"ba n\": int\n",
        );
        assert_eq!(
            syntactic(&schema).sorted_messages(),
            sorted(&[
                illegal_type_name("fo o", "root"),
                illegal_type_name("ba n", "baz"),
            ])
        );
    }

    #[test]
    fn test_rejects_reserved_words_as_names() {
        let schema = schema(
            "_package: packageName\nbreak: int\nbar: string\nbaz:\n  const: int32\n",
        );
        assert_eq!(
            syntactic(&schema).sorted_messages(),
            sorted(&[
                illegal_type_name("break", "root"),
                illegal_type_name("const", "baz"),
            ])
        );
    }

    #[test]
    fn test_rejects_special_characters_in_names() {
        let schema = schema(
            "_package: packageName\n\"*\": int\n\"<\": string\nfo$o: int\nbaz:\n  \">-\": int32\n  \"bent{\": int32\n",
        );
        assert_eq!(
            syntactic(&schema).sorted_messages(),
            sorted(&[
                illegal_type_name("*", "root"),
                illegal_type_name("<", "root"),
                illegal_type_name("fo$o", "root"),
                illegal_type_name(">-", "baz"),
                illegal_type_name("bent{", "baz"),
            ])
        );
    }

    #[test]
    fn test_digit_leading_names_are_legal() {
        let schema = schema("_package: packageName\n9foo: int\n");
        assert!(syntactic(&schema).is_clean());
    }

    #[test]
    fn test_basic_type_names_may_be_shadowed() {
        let schema = schema("_package: packageName\nint: string\n");
        assert!(syntactic(&schema).is_clean());
    }

    #[test]
    fn test_rejects_special_characters_in_values() {
        let schema = schema(
            "_package: packageName\nfoo: in+t\nbar: map[int]st&ring\nbaz:\n  ban: \"[]in@t32\"\n  fan: \"@\"\n",
        );
        assert_eq!(
            syntactic(&schema).sorted_messages(),
            sorted(&[
                invalid_value("in+t", "foo", "root"),
                invalid_value("map[int]st&ring", "bar", "root"),
                invalid_value("[]in@t32", "ban", "baz"),
                invalid_value("@", "fan", "baz"),
            ])
        );
    }

    #[test]
    fn test_rejects_spaces_in_values() {
        let schema = schema(
            "_package: packageName\nfoo: in t\nbaz:\n  ban: \"[]in t32\"\n  fan: \" \"\n",
        );
        assert_eq!(
            syntactic(&schema).sorted_messages(),
            sorted(&[
                invalid_value("in t", "foo", "root"),
                invalid_value("[]in t32", "ban", "baz"),
                invalid_value(" ", "fan", "baz"),
            ])
        );
    }

    #[test]
    fn test_rejects_misplaced_pointer_stars() {
        let schema = schema(
            "_package: packageName\na: \"*string\"\nb: map[int]*string\nfoo: int*\nbar: map[int*]string\nbaz:\n  ban: \"[*]int32\"\n  fan: \"*\"\n  c: map[int]string*\n",
        );
        assert_eq!(
            syntactic(&schema).sorted_messages(),
            sorted(&[
                invalid_value("int*", "foo", "root"),
                invalid_value("map[int*]string", "bar", "root"),
                invalid_value("[*]int32", "ban", "baz"),
                invalid_value("*", "fan", "baz"),
                invalid_value("map[int]string*", "c", "baz"),
            ])
        );
    }

    #[test]
    fn test_rejects_misplaced_brackets() {
        let schema = schema(
            "_package: packageName\na: \"[]string\"\nb: map[int]string]\nfoo: int[]\nbar: \"[]map[int]string\"\nbaz:\n  ban: \"[]in[t32\"\n  fan: \"[]\"\n  c: map[int][]string\n",
        );
        assert_eq!(
            syntactic(&schema).sorted_messages(),
            sorted(&[
                invalid_value("map[int]string]", "b", "root"),
                invalid_value("int[]", "foo", "root"),
                invalid_value("[]in[t32", "ban", "baz"),
                invalid_value("[]", "fan", "baz"),
            ])
        );
    }

    #[test]
    fn test_accepts_legal_package_name() {
        let schema = schema("_package: packagename\n");
        assert!(syntactic(&schema).is_clean());
    }

    #[test]
    fn test_rejects_illegal_package_name() {
        let schema = schema("_package: package-name\n");
        assert_eq!(
            syntactic(&schema).sorted_messages(),
            sorted(&[ValidationError::IllegalPackageName {
                name: "package-name".into(),
            }])
        );
    }

    #[test]
    fn test_rejects_reserved_word_package_name() {
        let schema = schema("_package: func\n");
        assert_eq!(
            syntactic(&schema).sorted_messages(),
            sorted(&[ValidationError::IllegalPackageName {
                name: "func".into(),
            }])
        );
    }

    #[test]
    fn test_package_value_is_not_treated_as_type_expression() {
        // "package-name" fails the value grammar too; only the package
        // check may fire for the namespace entry.
        let schema = schema("_package: package-name\nfoo: int\n");
        let report = syntactic(&schema);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].kind(), "ErrIllegalPackageName");
    }
}
