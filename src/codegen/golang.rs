//! Go source emitter.
//!
//! Renders `TypeDeclarations` as one gofmt-shaped source file: the package
//! clause first, then one declaration block per entry in alphabetical order.
//! Aliases become `type name expr`, field groups become struct declarations
//! with tab-indented fields.

use crate::schema::{Declaration, TypeDeclarations};

use super::GeneratedOutput;

// =============================================================================
// Public API
// =============================================================================

/// Render a Go source file from typed declarations.
pub fn render(declarations: &TypeDeclarations) -> GeneratedOutput {
    let mut code = String::new();
    code.push_str(&format!("package {}\n", declarations.package));

    for (name, declaration) in &declarations.declarations {
        code.push('\n');
        match declaration {
            Declaration::Alias(expr) => emit_alias(&mut code, name, expr),
            Declaration::Record(fields) => emit_record(&mut code, name, fields),
        }
    }

    GeneratedOutput {
        type_count: declarations.declarations.len(),
        code,
    }
}

// =============================================================================
// Declaration emission
// =============================================================================

fn emit_alias(output: &mut String, name: &str, expr: &str) {
    output.push_str(&format!("type {} {}\n", name, expr));
}

fn emit_record(output: &mut String, name: &str, fields: &[(String, String)]) {
    output.push_str(&format!("type {} struct {{\n", name));
    for (field, expr) in fields {
        output.push_str(&format!("\t{} {}\n", field, expr));
    }
    output.push_str("}\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::from_yaml_str;
    use crate::schema::Schema;

    fn declarations(source: &str) -> TypeDeclarations {
        Schema::new(from_yaml_str(source).unwrap())
            .to_declarations()
            .unwrap()
    }

    #[test]
    fn test_package_clause_only() {
        let output = render(&declarations("_package: empty\n"));
        assert_eq!(output.code, "package empty\n");
        assert_eq!(output.type_count, 0);
    }

    #[test]
    fn test_alias_declarations() {
        let output = render(&declarations(
            "_package: packageName\nfoo: int\nbar: \"[]string\"\n",
        ));
        assert_eq!(
            output.code,
            "package packageName\n\ntype bar []string\n\ntype foo int\n"
        );
        assert_eq!(output.type_count, 2);
    }

    #[test]
    fn test_struct_declaration_with_sorted_fields() {
        let output = render(&declarations(
            "_package: packageName\nbaz:\n  bunt: \"[]int\"\n  ban: int32\n",
        ));
        assert_eq!(
            output.code,
            "package packageName\n\ntype baz struct {\n\tban int32\n\tbunt []int\n}\n"
        );
    }

    #[test]
    fn test_mixed_declarations_are_alphabetized() {
        let output = render(&declarations(
            "_package: packageName\nfoo: int\nbaz:\n  ban: int32\n  bunt: \"[]int\"\nbar: string\n",
        ));
        let expected = "\
package packageName

type bar string

type baz struct {
\tban int32
\tbunt []int
}

type foo int
";
        assert_eq!(output.code, expected);
        assert_eq!(output.type_count, 3);
    }

    #[test]
    fn test_map_and_pointer_expressions_pass_through() {
        let output = render(&declarations(
            "_package: packageName\nlookup: map[string]int\nhandle: \"*lookup\"\n",
        ));
        assert_eq!(
            output.code,
            "package packageName\n\ntype handle *lookup\n\ntype lookup map[string]int\n"
        );
    }
}
