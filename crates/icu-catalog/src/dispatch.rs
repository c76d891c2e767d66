//! Dispatch module generation.
//!
//! Each language becomes one TypeScript module exporting a `Props` union with
//! one tuple shape per key and a `translate` function switching on the key.
//! The switch always ends in a `default` arm, so unknown keys render as
//! `MISSING <key>` instead of throwing.

use crate::flatten::{CompiledEntry, FlattenedStore};
use icu_codegen::helpers::{names, string_literal};
use source_span::CodeBuilder;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Generated by icu-ts. Do not edit.";

/// Generate the module source for one language.
pub fn emit_module(entries: &FlattenedStore) -> String {
    let mut builder = CodeBuilder::new();
    builder.line(GENERATED_HEADER);
    builder.newline();
    emit_props(&mut builder, entries);
    builder.newline();
    emit_translate(&mut builder, entries);
    builder.finish()
}

/// Emit `export type Props = | [k: "a"] | [k: "b", v:{x: string}]`.
fn emit_props(builder: &mut CodeBuilder, entries: &FlattenedStore) {
    if entries.is_empty() {
        builder.line(&format!("export type {} = never", names::PROPS));
        return;
    }

    builder.line(&format!("export type {} =", names::PROPS));
    builder.indent();
    for entry in entries.values() {
        builder.line(&format!("| {}", props_shape(entry)));
    }
    builder.dedent();
}

/// The tuple type of one key.
fn props_shape(entry: &CompiledEntry) -> String {
    match entry.params.to_typescript() {
        Some(record) => format!("[k: {}, {}]", string_literal(&entry.key), record),
        None => format!("[k: {}]", string_literal(&entry.key)),
    }
}

fn emit_translate(builder: &mut CodeBuilder, entries: &FlattenedStore) {
    let args = names::ARGS;
    builder.line(&format!(
        "export const {} = (...{}: {}): string => {{",
        names::TRANSLATE,
        args,
        names::PROPS
    ));
    builder.indent();
    builder.line(&format!("switch ({}[0]) {{", args));
    builder.indent();

    for entry in entries.values() {
        let label = format!("case {}:", string_literal(&entry.key));
        if entry.params.is_parameterized() {
            builder.line(&format!("{} {{", label));
            builder.indent();
            builder.line(&format!("const {} = {}[1]", names::VARS, args));
            builder.line(&format!("return {}", entry.expression));
            builder.dedent();
            builder.line("}");
        } else {
            builder.line(&format!("{} return {}", label, entry.expression));
        }
    }

    builder.line(&format!(
        "default: return `{} ${{{}[0]}}`",
        names::MISSING,
        args
    ));
    builder.dedent();
    builder.line("}");
    builder.dedent();
    builder.line("}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_emit_module() {
        let store = flatten(&json!({
            "title": "Welcome",
            "greeting": { "hello": "Hi {name}" },
            "items": "{count,select,one{1 item}other{{count} items}}"
        }))
        .unwrap();

        insta::assert_snapshot!(emit_module(&store), @r#"
// Generated by icu-ts. Do not edit.

export type Props =
    | [k: "title"]
    | [k: "greeting.hello", v:{name: string}]
    | [k: "items", v:{count: string}]

export const translate = (...p: Props): string => {
    switch (p[0]) {
        case "title": return `Welcome`
        case "greeting.hello": {
            const v = p[1]
            return `Hi ${v?.name??""}`
        }
        case "items": {
            const v = p[1]
            return `${(v.count===`one`?`1 item`:`${v?.count??""} items`)}`
        }
        default: return `MISSING ${p[0]}`
    }
}
"#);
    }

    #[test]
    fn test_emit_empty_module_is_total() {
        let module = emit_module(&FlattenedStore::new());
        assert_eq!(
            module,
            "// Generated by icu-ts. Do not edit.\n\
             \n\
             export type Props = never\n\
             \n\
             export const translate = (...p: Props): string => {\n\
             \x20   switch (p[0]) {\n\
             \x20       default: return `MISSING ${p[0]}`\n\
             \x20   }\n\
             }\n"
        );
    }

    #[test]
    fn test_every_key_has_an_arm_and_default_is_last() {
        let store = flatten(&json!({ "a": "A", "b": { "c": "{x}" } })).unwrap();
        let module = emit_module(&store);

        assert!(module.contains(r#"case "a": return `A`"#));
        assert!(module.contains(r#"case "b.c": {"#));
        let default_at = module.find("default:").unwrap();
        assert!(module.rfind("case ").unwrap() < default_at);
    }

    #[test]
    fn test_multiline_pattern_is_not_reindented() {
        let store = flatten(&json!({ "poem": "line one\nline two" })).unwrap();
        let module = emit_module(&store);
        assert!(module.contains("case \"poem\": return `line one\nline two`\n"));
    }

    #[test]
    fn test_keys_are_quoted() {
        let store = flatten(&json!({ "say \"hi\"": "hi" })).unwrap();
        let module = emit_module(&store);
        assert!(module.contains(r#"| [k: "say \"hi\""]"#));
    }
}
