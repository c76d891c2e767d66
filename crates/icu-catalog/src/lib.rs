//! Translation catalogs for icu-ts.
//!
//! This crate turns one language's nested translation tree into:
//! - a flattened store of compiled patterns keyed by dotted path
//! - a TypeScript dispatch module (`Props` union plus `translate`)
//! - the React provider module shared by all languages

pub mod dispatch;
pub mod error;
pub mod flatten;
pub mod provider;

pub use dispatch::emit_module;
pub use error::{CatalogError, CatalogResult};
pub use flatten::{flatten, CompiledEntry, FlattenedStore};
pub use provider::{emit_provider, props_alias, DEFAULT_IMPORT_PREFIX, PROVIDER_FILE};

use icu_pattern::PatternDiagnostic;
use rustc_hash::FxHashSet;
use serde_json::Value;
use std::path::Path;

/// The compiled translations of one language.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Language code, as given by the caller.
    pub language: String,
    /// Compiled entries in source order.
    pub entries: FlattenedStore,
}

impl Catalog {
    /// Build a catalog from an already parsed tree.
    pub fn from_value(language: impl Into<String>, tree: &Value) -> CatalogResult<Self> {
        Ok(Self {
            language: language.into(),
            entries: flatten(tree)?,
        })
    }

    /// Build a catalog from JSON text.
    pub fn from_json(language: impl Into<String>, json: &str) -> CatalogResult<Self> {
        let language = language.into();
        let tree: Value = serde_json::from_str(json).map_err(|source| CatalogError::Json {
            origin: format!("`{}` translations", language),
            source,
        })?;
        Self::from_value(language, &tree)
    }

    /// Load and compile a translation file.
    pub fn load(language: impl Into<String>, path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tree: Value = serde_json::from_str(&content).map_err(|source| CatalogError::Json {
            origin: path.display().to_string(),
            source,
        })?;
        Self::from_value(language, &tree)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over keys in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Iterate over all pattern diagnostics with the key and pattern they belong to.
    pub fn diagnostics(&self) -> impl Iterator<Item = (&CompiledEntry, &PatternDiagnostic)> {
        self.entries
            .values()
            .flat_map(|entry| entry.diagnostics.iter().map(move |d| (entry, d)))
    }

    /// Generate this language's dispatch module.
    pub fn emit_module(&self) -> String {
        emit_module(&self.entries)
    }

    /// Compare key sets with another language.
    pub fn key_diff(&self, other: &Catalog) -> KeyDiff {
        let ours: FxHashSet<&str> = self.keys().collect();
        let theirs: FxHashSet<&str> = other.keys().collect();

        KeyDiff {
            missing: other
                .keys()
                .filter(|k| !ours.contains(k))
                .map(str::to_string)
                .collect(),
            extra: self
                .keys()
                .filter(|k| !theirs.contains(k))
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Keys that differ between two catalogs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDiff {
    /// Keys the other catalog has and this one lacks.
    pub missing: Vec<String>,
    /// Keys this catalog has and the other one lacks.
    pub extra: Vec<String>,
}

impl KeyDiff {
    /// Check if both key sets are identical.
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}
