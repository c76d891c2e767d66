//! Error types for loading and flattening translation catalogs.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// An error raised while building a catalog.
///
/// Pattern problems are never errors; they are reported as diagnostics on
/// the compiled entries. Only the shape of the input tree can fail.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The translation file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The translation file is not valid JSON.
    #[error("failed to parse {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    /// The tree root is not an object.
    #[error("translation root must be an object, found {found}")]
    InvalidRoot { found: &'static str },
    /// A leaf is neither a string nor a number.
    #[error("unsupported {found} at `{key}`; leaves must be strings or numbers")]
    UnsupportedLeaf { key: String, found: &'static str },
}

impl CatalogError {
    /// Get a short kebab-case code for the error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::Json { .. } => "invalid-json",
            Self::InvalidRoot { .. } => "invalid-root",
            Self::UnsupportedLeaf { .. } => "unsupported-leaf",
        }
    }
}

/// Describe the JSON type of a value for error messages.
pub(crate) fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CatalogError::UnsupportedLeaf {
            key: "a.b".to_string(),
            found: "boolean",
        };
        assert_eq!(
            err.to_string(),
            "unsupported boolean at `a.b`; leaves must be strings or numbers"
        );
        assert_eq!(err.code(), "unsupported-leaf");

        let err = CatalogError::Io {
            path: PathBuf::from("i18n/en.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "failed to read i18n/en.json: missing");
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(value_kind(&serde_json::json!(null)), "null");
        assert_eq!(value_kind(&serde_json::json!([1])), "array");
        assert_eq!(value_kind(&serde_json::json!({})), "object");
    }
}
