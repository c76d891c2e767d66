//! Non-fatal findings reported while parsing a pattern.
//!
//! Parsing never fails: malformed input degrades to text or is dropped. Each
//! degrade is recorded here so that callers can decide whether to fail.

use source_span::Span;
use std::fmt;

/// A diagnostic message about a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternDiagnostic {
    /// The diagnostic message.
    pub message: String,
    /// The span in the pattern the diagnostic applies to.
    pub span: Span,
    /// The severity level.
    pub severity: Severity,
    /// The diagnostic code.
    pub code: DiagnosticCode,
}

impl PatternDiagnostic {
    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>, span: Span, code: DiagnosticCode) -> Self {
        Self {
            message: message.into(),
            span,
            severity: Severity::Warning,
            code,
        }
    }

    /// Create a new hint diagnostic.
    pub fn hint(message: impl Into<String>, span: Span, code: DiagnosticCode) -> Self {
        Self {
            message: message.into(),
            span,
            severity: Severity::Hint,
            code,
        }
    }

    /// Group content that matched neither a variable nor a select header.
    pub fn unrecognized_group(content: &str, span: Span) -> Self {
        Self::warning(
            format!("Unrecognized placeholder `{{{}}}` is emitted as text", content),
            span,
            DiagnosticCode::UnrecognizedGroup,
        )
    }

    /// An opening brace that is never closed.
    pub fn unterminated_brace(span: Span) -> Self {
        Self::warning(
            "Unterminated `{`; the rest of the pattern is dropped",
            span,
            DiagnosticCode::UnterminatedBrace,
        )
    }

    /// A closing brace with no matching opener.
    pub fn stray_closing_brace(offset: u32) -> Self {
        Self::warning(
            "Unmatched `}`; the text up to the next balancing `{` is emitted literally",
            Span::new(offset, offset + 1),
            DiagnosticCode::StrayClosingBrace,
        )
    }

    /// A select case whose label already appeared.
    pub fn duplicate_case(value: &str, span: Span) -> Self {
        Self::warning(
            format!("Duplicate select case `{}` is unreachable", value),
            span,
            DiagnosticCode::DuplicateCase,
        )
    }

    /// A second `other` case.
    pub fn duplicate_default(span: Span) -> Self {
        Self::warning(
            "Duplicate `other` case replaces the earlier one",
            span,
            DiagnosticCode::DuplicateDefault,
        )
    }

    /// A select with no `other` case.
    pub fn missing_other(variable: &str, span: Span) -> Self {
        Self::hint(
            format!("Select on `{}` has no `other` case; it falls back to an empty string", variable),
            span,
            DiagnosticCode::MissingOther,
        )
    }

    /// Text after the last case body of a select.
    pub fn ignored_select_text(text: &str, span: Span) -> Self {
        Self::warning(
            format!("Text `{}` after the last select case is ignored", text.trim()),
            span,
            DiagnosticCode::IgnoredSelectText,
        )
    }
}

impl fmt::Display for PatternDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Diagnostic severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Output differs from what the author most likely meant.
    Warning,
    /// A suggestion; output is well defined.
    Hint,
}

impl Severity {
    /// Get the severity as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Hint => "hint",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// Group content is neither a variable nor a select.
    UnrecognizedGroup,
    /// `{` without a matching `}`.
    UnterminatedBrace,
    /// `}` without a matching `{`.
    StrayClosingBrace,
    /// Repeated select case label.
    DuplicateCase,
    /// Repeated `other` label.
    DuplicateDefault,
    /// Select without an `other` label.
    MissingOther,
    /// Non-blank text after the last case body.
    IgnoredSelectText,
}

impl DiagnosticCode {
    /// Get the code as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnrecognizedGroup => "unrecognized-group",
            Self::UnterminatedBrace => "unterminated-brace",
            Self::StrayClosingBrace => "stray-closing-brace",
            Self::DuplicateCase => "duplicate-case",
            Self::DuplicateDefault => "duplicate-default",
            Self::MissingOther => "missing-other",
            Self::IgnoredSelectText => "ignored-select-text",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_code_and_severity() {
        let diag = PatternDiagnostic::stray_closing_brace(4);
        assert_eq!(diag.code, DiagnosticCode::StrayClosingBrace);
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.span, Span::new(4, 5));

        let diag = PatternDiagnostic::missing_other("n", Span::new(0, 10));
        assert_eq!(diag.severity, Severity::Hint);
        assert_eq!(diag.code.as_str(), "missing-other");
    }

    #[test]
    fn test_unrecognized_group_message() {
        let diag = PatternDiagnostic::unrecognized_group("a b", Span::new(0, 5));
        assert_eq!(diag.to_string(), "Unrecognized placeholder `{a b}` is emitted as text");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Warning < Severity::Hint);
    }
}
