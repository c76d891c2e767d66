//! Parser for translation patterns.
//!
//! A pattern is scanned once, left to right, tracking brace depth. A `{` opens
//! a group only when the depth was 0, and a `}` closes one only when it brings
//! the depth back to 0; anything nested inside a group is kept raw and parsed
//! again when the group itself is parsed.

use crate::ast::*;
use crate::diagnostics::PatternDiagnostic;
use once_cell::sync::Lazy;
use regex::Regex;
use source_span::Span;

/// Group content that is a bare identifier.
static VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[A-Za-z0-9_]+\s*$").expect("variable regex"));

/// Header of a select group: `name, select,`.
static SELECT_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z0-9_]+)\s*,\s*(?i:select)\s*,").expect("select header regex")
});

/// A parsed pattern together with everything the parser had to degrade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPattern {
    /// Top-level nodes.
    pub nodes: Vec<Node>,
    /// Non-fatal findings, in discovery order.
    pub diagnostics: Vec<PatternDiagnostic>,
}

/// Parse a pattern, collecting diagnostics.
pub fn parse(source: &str) -> ParsedPattern {
    let mut parser = PatternParser::default();
    let nodes = parser.parse_nodes(source, 0);
    ParsedPattern {
        nodes,
        diagnostics: parser.diagnostics,
    }
}

/// Parse a pattern into nodes.
pub fn parse_pattern(source: &str) -> Vec<Node> {
    parse(source).nodes
}

/// Parse the inside of a `{name,select,...}` group (without the outer braces).
///
/// A fragment without a select header yields an expression on the empty
/// variable name whose cases come from the whole fragment.
pub fn parse_expression(fragment: &str) -> ExpressionNode {
    let mut parser = PatternParser::default();
    parser.parse_select(fragment, 0)
}

/// Check whether group content would be parsed as a select expression.
pub fn is_select(content: &str) -> bool {
    !VARIABLE.is_match(content) && SELECT_HEADER.is_match(content)
}

/// Collects diagnostics while the recursive parse runs.
#[derive(Debug, Default)]
struct PatternParser {
    diagnostics: Vec<PatternDiagnostic>,
}

impl PatternParser {
    /// Parse `source`, which starts at byte `base` of the full pattern.
    fn parse_nodes(&mut self, source: &str, base: u32) -> Vec<Node> {
        let scan = scan(source);
        self.report_scan(&scan, base);

        let mut nodes = Vec::with_capacity(scan.segments.len());
        for segment in scan.segments {
            match segment {
                Segment::Literal { text, span } => nodes.push(Node::text(text, span.shift(base))),
                Segment::Group { content, span } => {
                    nodes.push(self.parse_group(content, span.shift(base)));
                }
            }
        }
        nodes
    }

    /// Classify one top-level `{...}` group. `span` includes the braces.
    fn parse_group(&mut self, content: &str, span: Span) -> Node {
        if VARIABLE.is_match(content) {
            return Node::variable(content.trim(), span);
        }

        if SELECT_HEADER.is_match(content) {
            let mut expr = self.parse_select(content, span.start + 1);
            expr.span = span;
            return Node::Expression(expr);
        }

        self.diagnostics
            .push(PatternDiagnostic::unrecognized_group(content, span));
        Node::text(content, span)
    }

    /// Parse select content starting at byte `base` of the full pattern.
    fn parse_select(&mut self, fragment: &str, base: u32) -> ExpressionNode {
        let (variable, header_len) = match SELECT_HEADER.captures(fragment) {
            Some(caps) => (
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(0).map_or(0, |m| m.end()),
            ),
            None => ("", 0),
        };

        let mut expr = ExpressionNode::new(variable, Span::new(base, base + fragment.len() as u32));
        let cases_base = base + header_len as u32;
        let scan = scan(&fragment[header_len..]);
        self.report_scan(&scan, cases_base);

        // Each group is a case body; the literal right before it is its label.
        let mut label: Option<(&str, Span)> = None;
        let mut has_default = false;
        for segment in scan.segments {
            match segment {
                Segment::Literal { text, span } => label = Some((text, span)),
                Segment::Group { content, span } => {
                    let (label_text, label_span) =
                        label.take().unwrap_or(("", Span::empty(span.start)));
                    let case_span = label_span.merge(span).shift(cases_base);
                    let value = label_text.trim();
                    let body = self.parse_nodes(content, cases_base + span.start + 1);

                    if value == OTHER_CASE {
                        if has_default {
                            self.diagnostics
                                .push(PatternDiagnostic::duplicate_default(case_span));
                        }
                        expr.default_body = body;
                        has_default = true;
                    } else {
                        if expr.find_case(value).is_some() {
                            self.diagnostics
                                .push(PatternDiagnostic::duplicate_case(value, case_span));
                        }
                        expr.cases.push(SelectCase {
                            value: value.to_string(),
                            body,
                            span: case_span,
                        });
                    }
                }
            }
        }

        if let Some((text, span)) = label {
            if !text.trim().is_empty() {
                self.diagnostics.push(PatternDiagnostic::ignored_select_text(
                    text,
                    span.shift(cases_base),
                ));
            }
        }

        if !has_default {
            self.diagnostics
                .push(PatternDiagnostic::missing_other(&expr.variable, expr.span));
        }

        expr
    }

    fn report_scan(&mut self, scan: &Scan<'_>, base: u32) {
        for &offset in &scan.stray_closers {
            self.diagnostics
                .push(PatternDiagnostic::stray_closing_brace(base + offset));
        }
        if let Some(span) = scan.unterminated {
            self.diagnostics
                .push(PatternDiagnostic::unterminated_brace(span.shift(base)));
        }
    }
}

/// A depth-0 piece of a scanned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    /// Text outside any group.
    Literal { text: &'a str, span: Span },
    /// A balanced group; `content` excludes the outer braces, `span` includes them.
    Group { content: &'a str, span: Span },
}

#[derive(Debug, Default)]
struct Scan<'a> {
    segments: Vec<Segment<'a>>,
    /// An opened group that never closed. It produces no segment.
    unterminated: Option<Span>,
    /// Offsets of `}` without an opener. They and everything up to the
    /// next balancing `{` stay part of the literal text.
    stray_closers: Vec<u32>,
}

/// Split `source` into literals and balanced groups. Spans are local to `source`.
///
/// Every `}` decrements the depth, so an unmatched closer leaves it negative
/// and the following braces stay literal until an opener brings it back to 0.
fn scan(source: &str) -> Scan<'_> {
    let mut scan = Scan::default();
    let mut depth = 0isize;
    let mut lowest = 0isize;
    let mut start = 0usize;

    // Braces are ASCII, so byte offsets at them are always char boundaries.
    for (i, byte) in source.bytes().enumerate() {
        match byte {
            b'{' => {
                if depth == 0 {
                    if i > start {
                        scan.segments.push(Segment::Literal {
                            text: &source[start..i],
                            span: Span::from(start..i),
                        });
                    }
                    start = i;
                }
                depth += 1;
            }
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    scan.segments.push(Segment::Group {
                        content: &source[start + 1..i],
                        span: Span::from(start..i + 1),
                    });
                    start = i + 1;
                } else if depth < lowest {
                    lowest = depth;
                    scan.stray_closers.push(i as u32);
                }
            }
            _ => {}
        }
    }

    if depth > 0 {
        scan.unterminated = Some(Span::from(start..source.len()));
    } else if start < source.len() {
        scan.segments.push(Segment::Literal {
            text: &source[start..],
            span: Span::from(start..source.len()),
        });
    }

    scan
}
