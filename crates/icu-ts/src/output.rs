//! Output formatting for diagnostics.

use crate::cli::OutputFormat;
use crate::orchestrator::RunResult;
use icu_catalog::CompiledEntry;
use icu_pattern::{PatternDiagnostic, Severity};
use source_span::{LineCol, LineIndex};
use std::path::Path;

/// Formatter for diagnostic output.
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a pattern diagnostic of one translation key.
    pub fn print_pattern_diagnostic(&self, file: &Path, entry: &CompiledEntry, diagnostic: &PatternDiagnostic) {
        let position = LineIndex::new(&entry.pattern).line_col(diagnostic.span.start);
        match self.format {
            OutputFormat::Human => self.print_pattern_human(file, entry, diagnostic, position),
            OutputFormat::Json => self.print_pattern_json(file, entry, diagnostic, position),
            OutputFormat::Machine => self.print_pattern_machine(file, entry, diagnostic, position),
        }
    }

    /// Print a key-set mismatch between a language and the reference language.
    pub fn print_key_mismatch(&self, file: &Path, reference: &str, missing: &[String], extra: &[String]) {
        match self.format {
            OutputFormat::Human => {
                if !missing.is_empty() {
                    println!(
                        "{}: \x1b[33mwarning\x1b[0m: missing {} key{} present in `{}`: {}",
                        file.display(),
                        missing.len(),
                        plural(missing.len()),
                        reference,
                        missing.join(", ")
                    );
                }
                if !extra.is_empty() {
                    println!(
                        "{}: \x1b[33mwarning\x1b[0m: {} key{} not present in `{}`: {}",
                        file.display(),
                        extra.len(),
                        plural(extra.len()),
                        reference,
                        extra.join(", ")
                    );
                }
            }
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "type": "keys",
                    "file": file.to_string_lossy(),
                    "reference": reference,
                    "missing": missing,
                    "extra": extra
                });
                println!("{}", json);
            }
            OutputFormat::Machine => {
                for key in missing {
                    println!("{}:missing-key:{}", file.display(), key.replace(':', "\\:"));
                }
                for key in extra {
                    println!("{}:extra-key:{}", file.display(), key.replace(':', "\\:"));
                }
            }
        }
    }

    /// Print the summary.
    pub fn print_summary(&self, result: &RunResult) {
        match self.format {
            OutputFormat::Human => self.print_summary_human(result),
            OutputFormat::Json => self.print_summary_json(result),
            OutputFormat::Machine => {
                // No summary for machine format
            }
        }
    }

    // Human format

    fn print_pattern_human(&self, file: &Path, entry: &CompiledEntry, diagnostic: &PatternDiagnostic, position: LineCol) {
        let severity_str = match diagnostic.severity {
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Hint => "\x1b[34mhint\x1b[0m",
        };
        let (line, col) = position.to_display();

        println!(
            "{} [{}]:{}:{}: {}[{}]: {}",
            file.display(),
            entry.key,
            line,
            col,
            severity_str,
            diagnostic.code.as_str(),
            diagnostic.message
        );
    }

    fn print_summary_human(&self, result: &RunResult) {
        println!();
        if result.warning_count == 0 {
            println!(
                "\x1b[32m✓\x1b[0m Compiled {} key{} in {} language{} ({}ms)",
                result.key_count,
                plural(result.key_count),
                result.language_count,
                plural(result.language_count),
                result.duration_ms
            );
        } else {
            println!(
                "\x1b[33m⚠\x1b[0m Found {} warning{} in {} key{} across {} language{}",
                result.warning_count,
                plural(result.warning_count),
                result.key_count,
                plural(result.key_count),
                result.language_count,
                plural(result.language_count)
            );
            println!("Time: {}ms", result.duration_ms);
        }
        if result.written_count > 0 {
            println!("Wrote {} file{}", result.written_count, plural(result.written_count));
        }
    }

    // JSON format

    fn print_pattern_json(&self, file: &Path, entry: &CompiledEntry, diagnostic: &PatternDiagnostic, position: LineCol) {
        let (line, col) = position.to_display();
        let json = serde_json::json!({
            "type": "pattern",
            "file": file.to_string_lossy(),
            "key": entry.key,
            "severity": diagnostic.severity.as_str(),
            "message": diagnostic.message,
            "code": diagnostic.code.as_str(),
            "line": line,
            "column": col,
            "span": {
                "start": diagnostic.span.start,
                "end": diagnostic.span.end
            }
        });
        println!("{}", json);
    }

    fn print_summary_json(&self, result: &RunResult) {
        let json = serde_json::json!({
            "type": "summary",
            "languages": result.language_count,
            "keys": result.key_count,
            "warnings": result.warning_count,
            "hints": result.hint_count,
            "written": result.written_count,
            "duration_ms": result.duration_ms
        });
        println!("{}", json);
    }

    // Machine format

    fn print_pattern_machine(&self, file: &Path, entry: &CompiledEntry, diagnostic: &PatternDiagnostic, position: LineCol) {
        let (line, col) = position.to_display();
        println!(
            "{}:{}:{}:{}:{}:{}:{}",
            file.display(),
            entry.key.replace(':', "\\:"),
            line,
            col,
            diagnostic.severity.as_str(),
            diagnostic.code.as_str(),
            diagnostic.message.replace(':', "\\:")
        );
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
