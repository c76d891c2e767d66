//! AST types for translation patterns.

use smol_str::SmolStr;
use source_span::Span;

/// A node in a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// Literal text, emitted verbatim.
    Text(TextNode),
    /// A `{name}` placeholder.
    Variable(VariableNode),
    /// A `{name,select,...}` branch.
    Expression(ExpressionNode),
}

impl Node {
    /// Create a text node.
    pub fn text(value: impl Into<String>, span: Span) -> Self {
        Self::Text(TextNode {
            value: value.into(),
            span,
        })
    }

    /// Create a variable node.
    pub fn variable(name: impl Into<SmolStr>, span: Span) -> Self {
        Self::Variable(VariableNode {
            name: name.into(),
            span,
        })
    }

    /// Get the span of this node in the pattern it was parsed from.
    pub fn span(&self) -> Span {
        match self {
            Self::Text(n) => n.span,
            Self::Variable(n) => n.span,
            Self::Expression(n) => n.span,
        }
    }

    /// Check if this is a text node with no content.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(n) if n.value.is_empty())
    }
}

/// Literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextNode {
    /// The text content.
    pub value: String,
    /// Source span. For unrecognized groups this covers the braces too.
    pub span: Span,
}

/// A variable placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableNode {
    /// Trimmed variable name.
    pub name: SmolStr,
    /// Source span, including braces.
    pub span: Span,
}

/// A select expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpressionNode {
    /// The controlling variable.
    pub variable: SmolStr,
    /// Cases in declaration order. Values may repeat; the first one wins.
    pub cases: Vec<SelectCase>,
    /// Body used when no case matches (the `other` case).
    pub default_body: Vec<Node>,
    /// Source span, including braces.
    pub span: Span,
}

impl ExpressionNode {
    /// Create an expression with no cases and an empty default body.
    pub fn new(variable: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            variable: variable.into(),
            cases: Vec::new(),
            default_body: vec![Node::text("", Span::empty(span.end))],
            span,
        }
    }

    /// Find the first case matching `value`.
    pub fn find_case(&self, value: &str) -> Option<&SelectCase> {
        self.cases.iter().find(|c| c.value == value)
    }
}

/// One labelled case of a select expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectCase {
    /// The trimmed case label compared against the controlling variable.
    pub value: String,
    /// The case body.
    pub body: Vec<Node>,
    /// Span of the label and its body group.
    pub span: Span,
}

/// The label reserved for the fallback case.
pub const OTHER_CASE: &str = "other";
