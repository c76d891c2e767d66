//! Flattening of nested translation trees into dotted keys.

use crate::error::{value_kind, CatalogError, CatalogResult};
use icu_codegen::{compile, ParamShape};
use icu_pattern::PatternDiagnostic;
use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Number, Value};
use smol_str::SmolStr;

/// One compiled translation key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledEntry {
    /// Dotted path of the key.
    pub key: String,
    /// The source pattern.
    pub pattern: String,
    /// The generated TypeScript expression.
    pub expression: String,
    /// Variables the expression reads.
    pub variables: IndexSet<SmolStr>,
    /// Record the caller has to pass for this key.
    pub params: ParamShape,
    /// Parser diagnostics for the pattern.
    pub diagnostics: Vec<PatternDiagnostic>,
}

impl CompiledEntry {
    /// Compile `pattern` under `key`.
    pub fn compile(key: impl Into<String>, pattern: &str) -> Self {
        let compiled = compile(pattern);
        Self {
            key: key.into(),
            pattern: pattern.to_string(),
            expression: compiled.code,
            variables: compiled.variables,
            params: compiled.params,
            diagnostics: compiled.diagnostics,
        }
    }
}

/// Compiled entries keyed by dotted path, in source order.
pub type FlattenedStore = IndexMap<String, CompiledEntry>;

/// Flatten and compile a translation tree.
///
/// Objects recurse with their keys joined by `.`; arrays recurse with the
/// element index as key. Strings are patterns and numbers are compiled from
/// their decimal text. The root must be an object.
pub fn flatten(tree: &Value) -> CatalogResult<FlattenedStore> {
    let Value::Object(map) = tree else {
        return Err(CatalogError::InvalidRoot {
            found: value_kind(tree),
        });
    };

    let mut store = FlattenedStore::new();
    flatten_object(map, "", &mut store)?;
    Ok(store)
}

fn flatten_object(map: &Map<String, Value>, prefix: &str, store: &mut FlattenedStore) -> CatalogResult<()> {
    for (key, value) in map {
        flatten_value(format!("{}{}", prefix, key), value, store)?;
    }
    Ok(())
}

fn flatten_value(key: String, value: &Value, store: &mut FlattenedStore) -> CatalogResult<()> {
    match value {
        Value::Object(map) => flatten_object(map, &format!("{}.", key), store),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_value(format!("{}.{}", key, index), item, store)?;
            }
            Ok(())
        }
        Value::String(pattern) => {
            insert(store, key, pattern);
            Ok(())
        }
        Value::Number(number) => {
            insert(store, key, &number_text(number));
            Ok(())
        }
        Value::Null | Value::Bool(_) => Err(CatalogError::UnsupportedLeaf {
            key,
            found: value_kind(value),
        }),
    }
}

fn insert(store: &mut FlattenedStore, key: String, pattern: &str) {
    let entry = CompiledEntry::compile(key.clone(), pattern);
    tracing::debug!(
        key = %entry.key,
        variables = entry.variables.len(),
        diagnostics = entry.diagnostics.len(),
        "compiled pattern"
    );

    // Same dotted key from two spellings ("a.b" and a > b): the later value
    // wins but the key keeps its first position.
    if let Some(previous) = store.insert(key, entry) {
        tracing::warn!(
            key = %previous.key,
            "duplicate translation key; the later value replaces the earlier one"
        );
    }
}

/// Text of a number as JavaScript's `String(n)` renders it: integral floats
/// without a fraction, exponent notation below `1e-6` and from `1e21` up.
fn number_text(number: &Number) -> String {
    let value = match number.as_f64() {
        Some(value) if number.is_f64() && value.is_finite() => value,
        _ => return number.to_string(),
    };

    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", value);
    }

    let exponent = format!("{:e}", value);
    match exponent.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exponent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn keys(store: &FlattenedStore) -> Vec<&str> {
        store.keys().map(|k| k.as_str()).collect()
    }

    #[test]
    fn test_flatten_two_levels() {
        let store = flatten(&json!({ "greeting": { "hello": "Hi {name}" } })).unwrap();
        assert_eq!(keys(&store), vec!["greeting.hello"]);

        let entry = &store["greeting.hello"];
        assert_eq!(entry.key, "greeting.hello");
        assert_eq!(entry.params, ParamShape::NamedRecord(vec!["name".into()]));
        assert_eq!(entry.expression, r#"`Hi ${v?.name??""}`"#);
    }

    #[test]
    fn test_flatten_preserves_source_order() {
        let tree: Value = serde_json::from_str(
            r#"{ "zeta": "z", "alpha": { "b": "b", "a": "a" }, "mid": "m" }"#,
        )
        .unwrap();
        let store = flatten(&tree).unwrap();
        assert_eq!(keys(&store), vec!["zeta", "alpha.b", "alpha.a", "mid"]);
    }

    #[test]
    fn test_flatten_numbers() {
        let store = flatten(&json!({ "int": 42, "float": 1.5, "whole": 3.0 })).unwrap();
        assert_eq!(store["int"].expression, "`42`");
        assert_eq!(store["float"].expression, "`1.5`");
        assert_eq!(store["whole"].expression, "`3`");
        assert_eq!(store["int"].params, ParamShape::Unparameterized);
    }

    #[test]
    fn test_flatten_numbers_follow_javascript_formatting() {
        let tree: Value = serde_json::from_str(
            r#"{ "huge": 1e21, "big": 123456789012345680000, "tiny": 1.5e-7, "small": 0.000001, "zero": -0.0 }"#,
        )
        .unwrap();
        let store = flatten(&tree).unwrap();
        assert_eq!(store["huge"].pattern, "1e+21");
        assert_eq!(store["big"].pattern, "123456789012345680000");
        assert_eq!(store["tiny"].pattern, "1.5e-7");
        assert_eq!(store["small"].pattern, "0.000001");
        assert_eq!(store["zero"].pattern, "0");
    }

    #[test]
    fn test_flatten_arrays_use_indices() {
        let store = flatten(&json!({ "steps": ["one", { "two": "2" }] })).unwrap();
        assert_eq!(keys(&store), vec!["steps.0", "steps.1.two"]);
    }

    #[test]
    fn test_flatten_empty_object_has_no_keys() {
        let store = flatten(&json!({ "empty": {} })).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_dotted_key_keeps_first_position() {
        let tree: Value =
            serde_json::from_str(r#"{ "a.b": "first", "c": "c", "a": { "b": "second" } }"#).unwrap();
        let store = flatten(&tree).unwrap();
        assert_eq!(keys(&store), vec!["a.b", "c"]);
        assert_eq!(store["a.b"].expression, "`second`");
    }

    #[test]
    fn test_unsupported_leaf() {
        let err = flatten(&json!({ "a": { "flag": true } })).unwrap_err();
        match err {
            CatalogError::UnsupportedLeaf { key, found } => {
                assert_eq!(key, "a.flag");
                assert_eq!(found, "boolean");
            }
            other => panic!("Expected unsupported leaf, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_root() {
        let err = flatten(&json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRoot { found: "array" }));
    }

    #[test]
    fn test_entry_keeps_diagnostics() {
        let store = flatten(&json!({ "broken": "Hello {name" })).unwrap();
        assert_eq!(store["broken"].diagnostics.len(), 1);
    }
}
