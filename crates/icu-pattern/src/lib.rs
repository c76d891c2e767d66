//! ICU-style pattern parser.
//!
//! This crate parses translation patterns made of plain text, `{name}`
//! placeholders, and `{name,select,case{...}other{...}}` branches into a node
//! tree that the code generator walks. Parsing never fails; anything it
//! cannot make sense of is reported as a [`PatternDiagnostic`].

pub mod ast;
pub mod diagnostics;
pub mod parser;

pub use ast::*;
pub use diagnostics::{DiagnosticCode, PatternDiagnostic, Severity};
pub use parser::{is_select, parse, parse_expression, parse_pattern, ParsedPattern};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_pattern() {
        let parsed = parse("Hello {name}, {count,select,one{one message}other{{count} messages}}");
        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.nodes.len(), 4);
        assert!(matches!(parsed.nodes[3], Node::Expression(_)));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let source = "{a,select,x{ {b,select,y{Y}other{Z}} }other{D}}";
        assert_eq!(parse(source), parse(source));
    }
}
