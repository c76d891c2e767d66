//! React translation-context generation.
//!
//! The provider module keeps the active language and its `translate`
//! function in a reducer. State starts with no language; switching language
//! loads the language module lazily and dispatches a `CHANGE_LANG` action that
//! produces a new state holding the new function.

use crate::dispatch::GENERATED_HEADER;
use source_span::CodeBuilder;

/// Default file name of the provider module.
pub const PROVIDER_FILE: &str = "TranslationContext.tsx";

/// Default import prefix under which the language modules are resolved.
pub const DEFAULT_IMPORT_PREFIX: &str = "@i18n";

const STATE_AND_REDUCER: &str = r#"interface IState {
    lang?: string;
    translation?: (...p: TranslationProps) => string;
}

enum ACTIONTYPE {
    CHANGE_LANG = "CHANGE_LANG",
}

type ACTION = { type: ACTIONTYPE.CHANGE_LANG; payload: { lang: string; translation: (...p: TranslationProps) => string } };

interface IContextProps {
    state: IState;
    dispatch: (action: ACTION) => void;
}

const TranslationContext = createContext<IContextProps>({} as IContextProps);

function reducer(state: IState, action: ACTION): IState {
    switch (action.type) {
        case ACTIONTYPE.CHANGE_LANG:
            return {
                ...state,
                lang: action.payload.lang,
                translation: action.payload.translation,
            };
        default:
            return state;
    }
}

export const TranslationProvider = ({ children }: { children: ReactNode }): JSX.Element => {
    const [state, dispatch] = useReducer(reducer, {});
    return <TranslationContext.Provider value={{ state, dispatch }}>{children}</TranslationContext.Provider>;
};

export const t = (...p: TranslationProps): string => {
    // eslint-disable-next-line react-hooks/rules-of-hooks
    const { state } = useContext(TranslationContext);
    return state.translation ? state.translation(...p) : ``;
};
"#;

const GET_LANGUAGE: &str = r#"export const getLanguage = (): string | undefined => {
    // eslint-disable-next-line react-hooks/rules-of-hooks
    const { state } = useContext(TranslationContext);
    return state.lang;
};
"#;

/// Generate the provider module for `languages`.
pub fn emit_provider(languages: &[String], import_prefix: &str) -> String {
    let prefix = import_prefix.trim_end_matches('/');
    let mut builder = CodeBuilder::new();
    builder.line(GENERATED_HEADER);

    for lang in languages {
        builder.line(&format!(
            "import {{ Props as {} }} from \"{}/{}\";",
            props_alias(lang),
            prefix,
            lang.to_lowercase()
        ));
    }
    builder.line(r#"import { useReducer, createContext, ReactNode, useContext } from "react";"#);
    builder.newline();

    let union = if languages.is_empty() {
        "never".to_string()
    } else {
        languages
            .iter()
            .map(|lang| props_alias(lang))
            .collect::<Vec<_>>()
            .join(" | ")
    };
    builder.line(&format!("type TranslationProps = {};", union));
    builder.newline();

    builder.push_str(STATE_AND_REDUCER);
    builder.newline();
    emit_use_set(&mut builder, languages, prefix);
    builder.newline();
    builder.push_str(GET_LANGUAGE);

    builder.finish()
}

/// Emit the `useSet` hook with one lazy import per language.
fn emit_use_set(builder: &mut CodeBuilder, languages: &[String], prefix: &str) {
    builder.line("export const useSet = () => {");
    builder.indent();
    builder.line("const { state, dispatch } = useContext(TranslationContext);");
    builder.line("return (lang: string): void => {");
    builder.indent();
    builder.line("if (state.lang === lang) return;");
    builder.line("switch (lang) {");
    builder.indent();
    for lang in languages {
        let lang = lang.to_lowercase();
        builder.line(&format!("case \"{}\":", lang));
        builder.indent();
        builder.line(&format!(
            "import(`{}/{}.ts`).then((module) => dispatch({{ type: ACTIONTYPE.CHANGE_LANG, payload: {{ lang, translation: module.translate }} }}));",
            prefix, lang
        ));
        builder.line("break;");
        builder.dedent();
    }
    builder.dedent();
    builder.line("}");
    builder.dedent();
    builder.line("};");
    builder.dedent();
    builder.line("};");
}

/// Type alias under which a language's `Props` is imported, e.g. `PropsEN_US`.
pub fn props_alias(lang: &str) -> String {
    let suffix: String = lang
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("Props{}", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn langs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_props_alias() {
        assert_eq!(props_alias("en"), "PropsEN");
        assert_eq!(props_alias("pt-br"), "PropsPT_BR");
    }

    #[test]
    fn test_emit_provider_imports_and_union() {
        let module = emit_provider(&langs(&["en", "DE"]), DEFAULT_IMPORT_PREFIX);
        assert!(module.starts_with(GENERATED_HEADER));
        assert!(module.contains("import { Props as PropsEN } from \"@i18n/en\";\n"));
        assert!(module.contains("import { Props as PropsDE } from \"@i18n/de\";\n"));
        assert!(module.contains("type TranslationProps = PropsEN | PropsDE;\n"));
    }

    #[test]
    fn test_emit_provider_language_switch() {
        let module = emit_provider(&langs(&["en"]), "@locales/");
        let expected = "\
export const useSet = () => {
    const { state, dispatch } = useContext(TranslationContext);
    return (lang: string): void => {
        if (state.lang === lang) return;
        switch (lang) {
            case \"en\":
                import(`@locales/en.ts`).then((module) => dispatch({ type: ACTIONTYPE.CHANGE_LANG, payload: { lang, translation: module.translate } }));
                break;
        }
    };
};
";
        assert!(module.contains(expected), "{}", module);
    }

    #[test]
    fn test_emit_provider_renders_empty_before_load() {
        let module = emit_provider(&langs(&["en"]), DEFAULT_IMPORT_PREFIX);
        assert!(module.contains("return state.translation ? state.translation(...p) : ``;"));
        assert!(module.contains("const [state, dispatch] = useReducer(reducer, {});"));
        assert!(module.ends_with("return state.lang;\n};\n"));
    }

    #[test]
    fn test_emit_provider_without_languages() {
        let module = emit_provider(&[], DEFAULT_IMPORT_PREFIX);
        assert!(module.contains("type TranslationProps = never;"));
    }
}
