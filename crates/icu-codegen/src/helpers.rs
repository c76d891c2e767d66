//! Names and small TypeScript helpers used by the generators.

/// Names used in generated code.
pub mod names {
    /// Rest parameter holding `[key, variables?]`.
    pub const ARGS: &str = "p";
    /// Variable record bound inside a dispatch arm.
    pub const VARS: &str = "v";
    /// Exported dispatch function.
    pub const TRANSLATE: &str = "translate";
    /// Exported parameter-shape union.
    pub const PROPS: &str = "Props";
    /// Prefix of the string returned for unknown keys.
    pub const MISSING: &str = "MISSING";
}

/// Check if `name` can be used as a bare TypeScript property name.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Quote `value` as a TypeScript string literal.
pub fn string_literal(value: &str) -> String {
    // JSON string syntax is a subset of TypeScript string syntax.
    serde_json::Value::from(value).to_string()
}

/// Property access on the variables record, e.g. `v.name` or `v?.["0"]`.
pub fn property_access(name: &str, optional: bool) -> String {
    let object = names::VARS;
    match (is_identifier(name), optional) {
        (true, true) => format!("{}?.{}", object, name),
        (true, false) => format!("{}.{}", object, name),
        (false, true) => format!("{}?.[{}]", object, string_literal(name)),
        (false, false) => format!("{}[{}]", object, string_literal(name)),
    }
}

/// Property name in an object type, quoted when it is not an identifier.
pub fn property_name(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("name"));
        assert!(is_identifier("_count2"));
        assert!(!is_identifier("2count"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_property_access() {
        assert_eq!(property_access("name", true), "v?.name");
        assert_eq!(property_access("name", false), "v.name");
        assert_eq!(property_access("0", true), r#"v?.["0"]"#);
        assert_eq!(property_access("0", false), r#"v["0"]"#);
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal("a.b"), r#""a.b""#);
        assert_eq!(string_literal("say \"hi\""), r#""say \"hi\"""#);
    }
}
