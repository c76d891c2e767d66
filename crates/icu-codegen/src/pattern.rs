//! Pattern code generation.
//!
//! This module turns a parsed pattern into a single TypeScript template
//! literal. Text is copied as-is, variables read from the `v` record, and
//! select expressions become a chain of `===` tests ending in the default.

use crate::helpers::property_access;
use icu_pattern::{ExpressionNode, Node};
use indexmap::IndexSet;
use smol_str::SmolStr;

/// The generated expression and the variables it reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generated {
    /// A TypeScript template literal, including the surrounding backticks.
    pub code: String,
    /// Variable names in first-occurrence order.
    pub variables: IndexSet<SmolStr>,
}

/// Generate the template literal for a node sequence.
pub fn generate(nodes: &[Node]) -> Generated {
    let mut variables = IndexSet::new();
    let code = generate_nodes(nodes, &mut variables);
    Generated { code, variables }
}

fn generate_nodes(nodes: &[Node], variables: &mut IndexSet<SmolStr>) -> String {
    let mut code = String::from("`");
    for node in nodes {
        match node {
            // Text is trusted input and is not escaped.
            Node::Text(text) => code.push_str(&text.value),
            Node::Variable(var) => {
                code.push_str("${");
                code.push_str(&property_access(&var.name, true));
                code.push_str("??\"\"}");
                variables.insert(var.name.clone());
            }
            Node::Expression(expr) => generate_expression(&mut code, expr, variables),
        }
    }
    code.push('`');
    code
}

/// Emit `${(v.x===`a`?...:v.x===`b`?...:default)}`. Cases are tested in
/// declaration order, so the first of several equal labels wins.
fn generate_expression(code: &mut String, expr: &ExpressionNode, variables: &mut IndexSet<SmolStr>) {
    variables.insert(expr.variable.clone());

    let subject = property_access(&expr.variable, false);
    code.push_str("${(");
    for case in &expr.cases {
        code.push_str(&subject);
        code.push_str("===`");
        code.push_str(&case.value);
        code.push_str("`?");
        code.push_str(&generate_nodes(&case.body, variables));
        code.push(':');
    }
    code.push_str(&generate_nodes(&expr.default_body, variables));
    code.push_str(")}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use icu_pattern::parse_pattern;
    use pretty_assertions::assert_eq;

    fn gen(source: &str) -> Generated {
        generate(&parse_pattern(source))
    }

    fn vars(generated: &Generated) -> Vec<&str> {
        generated.variables.iter().map(|v| v.as_str()).collect()
    }

    #[test]
    fn test_generate_plain_text() {
        let result = gen("Hello world");
        assert_eq!(result.code, "`Hello world`");
        assert!(result.variables.is_empty());
    }

    #[test]
    fn test_generate_empty() {
        let result = generate(&[]);
        assert_eq!(result.code, "``");
        assert!(result.variables.is_empty());
    }

    #[test]
    fn test_generate_variable() {
        let result = gen("prefix{x}suffix");
        assert_eq!(result.code, r#"`prefix${v?.x??""}suffix`"#);
        assert_eq!(vars(&result), vec!["x"]);
    }

    #[test]
    fn test_generate_numeric_variable() {
        let result = gen("{0}");
        assert_eq!(result.code, r#"`${v?.["0"]??""}`"#);
    }

    #[test]
    fn test_generate_select() {
        let result = gen("{count,select,one{1 item}other{N items}}");
        assert_eq!(result.code, "`${(v.count===`one`?`1 item`:`N items`)}`");
        assert_eq!(vars(&result), vec!["count"]);
    }

    #[test]
    fn test_generate_select_multiple_cases() {
        let result = gen("{g,select,m{he}f{she}other{they}} left");
        assert_eq!(
            result.code,
            "`${(v.g===`m`?`he`:v.g===`f`?`she`:`they`)} left`"
        );
    }

    #[test]
    fn test_generate_select_without_other() {
        let result = gen("{n,select,a{A}}");
        assert_eq!(result.code, "`${(v.n===`a`?`A`:``)}`");
    }

    #[test]
    fn test_generate_select_without_cases_still_requires_variable() {
        let result = gen("{n,select,other{x}}");
        assert_eq!(result.code, "`${(`x`)}`");
        assert_eq!(vars(&result), vec!["n"]);
    }

    #[test]
    fn test_generate_nested_select() {
        let result = gen("{a,select,x{ {b,select,y{Y}other{Z}} }other{D}}");
        assert_eq!(
            result.code,
            "`${(v.a===`x`?` ${(v.b===`y`?`Y`:`Z`)} `:`D`)}`"
        );
        assert_eq!(vars(&result), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_cases_keep_declaration_order() {
        let result = gen("{n,select,a{1}a{2}other{3}}");
        assert_eq!(result.code, "`${(v.n===`a`?`1`:v.n===`a`?`2`:`3`)}`");
    }

    #[test]
    fn test_variables_deduplicated_in_first_occurrence_order() {
        let result = gen("{b} {a} {b,select,x{{c}}other{{a} {d}}}");
        assert_eq!(vars(&result), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_unrecognized_group_is_reproduced_without_braces() {
        let result = gen("a{b c}d");
        assert_eq!(result.code, "`ab cd`");
        assert!(result.variables.is_empty());
    }
}
