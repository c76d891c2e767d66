//! Pattern to TypeScript code generation.
//!
//! This crate compiles a single translation pattern into a TypeScript
//! template-literal expression plus the parameter shape a caller must supply
//! to render it. The expression is source text for a downstream module and is
//! never evaluated here.

pub mod helpers;
pub mod pattern;

use icu_pattern::PatternDiagnostic;
use indexmap::IndexSet;
use smol_str::SmolStr;

pub use pattern::{generate, Generated};

/// Result of compiling one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    /// The generated TypeScript expression.
    pub code: String,
    /// Variables read by the expression, in first-occurrence order.
    pub variables: IndexSet<SmolStr>,
    /// The parameter shape derived from `variables`.
    pub params: ParamShape,
    /// Diagnostics reported while parsing.
    pub diagnostics: Vec<PatternDiagnostic>,
}

/// The variable record a render call has to pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParamShape {
    /// The key takes no variables.
    #[default]
    Unparameterized,
    /// The key takes a record with one string field per name.
    NamedRecord(Vec<SmolStr>),
}

impl ParamShape {
    /// Derive the shape from a variable set.
    pub fn from_variables(variables: &IndexSet<SmolStr>) -> Self {
        if variables.is_empty() {
            Self::Unparameterized
        } else {
            Self::NamedRecord(variables.iter().cloned().collect())
        }
    }

    /// Field names, empty when unparameterized.
    pub fn fields(&self) -> &[SmolStr] {
        match self {
            Self::Unparameterized => &[],
            Self::NamedRecord(fields) => fields,
        }
    }

    /// Check if a variable record is required.
    pub fn is_parameterized(&self) -> bool {
        matches!(self, Self::NamedRecord(_))
    }

    /// Render the tuple element describing the record, e.g. `v:{name: string}`.
    pub fn to_typescript(&self) -> Option<String> {
        match self {
            Self::Unparameterized => None,
            Self::NamedRecord(fields) => {
                let fields = fields
                    .iter()
                    .map(|f| format!("{}: string", helpers::property_name(f)))
                    .collect::<Vec<_>>()
                    .join("; ");
                Some(format!("{}:{{{}}}", helpers::names::VARS, fields))
            }
        }
    }
}

/// Compile a pattern into a TypeScript expression and its parameter shape.
pub fn compile(pattern: &str) -> CompiledPattern {
    let parsed = icu_pattern::parse(pattern);
    let Generated { code, variables } = generate(&parsed.nodes);
    let params = ParamShape::from_variables(&variables);

    CompiledPattern {
        code,
        variables,
        params,
        diagnostics: parsed.diagnostics,
    }
}
