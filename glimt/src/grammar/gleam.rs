//! Gleam grammar.
//!
//! Covers the `*.gleam` surface: `//` line comments, nestable `/* */`
//! block comments, snake_case identifiers, capitalized type names,
//! qualified calls like `list.map`, `@attribute` markers, and the
//! pipe-heavy operator set.

use super::rules::{word_pattern, Grammar, Mode, Rule};
use crate::tokens::TokenCategory as T;
use crate::tokens::{CommentKind, NumberKind, OperatorKind, StringKind};

pub const NAME: &str = "gleam";
pub const ALIASES: &[&str] = &["gleam"];
pub const EXTENSIONS: &[&str] = &["gleam"];
pub const MIME_TYPES: &[&str] = &["text/x-gleam"];

pub const KEYWORDS: &[&str] = &[
    "let", "fn", "import", "pub", "case", "of", "type", "as", "if", "else", "try", "opaque",
    "assert", "todo", "async", "await",
];

pub const BUILTIN_TYPES: &[&str] = &[
    "Int", "Float", "Bool", "String", "List", "Result", "Option", "Iterator",
];

pub const CONSTANTS: &[&str] = &["Nil", "Ok", "Error", "Stop", "Continue"];

const IDENT: &str = r"[a-z_][a-zA-Z0-9_]*";
const BLOCK_COMMENT: &str = "block_comment";

pub fn grammar() -> Grammar {
    let root = Mode {
        name: "root",
        rules: vec![
            Rule::token(r"\s+", T::Whitespace),
            Rule::token(r"//[^\n]*", T::Comment(CommentKind::Line)),
            Rule::push(r"/\*", T::Comment(CommentKind::Block), BLOCK_COMMENT),
            // Definitions before the keyword alternation, so the defined
            // name gets function styling instead of `fn` eating the match
            Rule::groups(
                format!(r"\b(fn)(\s+)({})", IDENT),
                vec![T::Keyword, T::Whitespace, T::Function],
            ),
            Rule::token(word_pattern(KEYWORDS), T::Keyword),
            Rule::token(word_pattern(BUILTIN_TYPES), T::Type),
            Rule::token(word_pattern(CONSTANTS), T::Constant),
            // Qualified calls like list.map
            Rule::groups(
                format!(r"({})(\.)([a-zA-Z_][a-zA-Z0-9_]*)", IDENT),
                vec![T::Namespace, T::Punctuation, T::Function],
            ),
            Rule::token(format!(r"\b{}\b", IDENT), T::Identifier),
            Rule::token(r"\b[A-Z][a-zA-Z0-9_]*\b", T::Type),
            Rule::token(r"\b0b[01_]+\b", T::Number(NumberKind::Binary)),
            Rule::token(r"\b0o[0-7_]+\b", T::Number(NumberKind::Octal)),
            Rule::token(r"\b0x[0-9a-fA-F_]+\b", T::Number(NumberKind::Hex)),
            Rule::token(
                r"\b\d+\.\d+(?:e[+-]?\d+)?\b",
                T::Number(NumberKind::Float),
            ),
            Rule::token(r"\b\d+\b", T::Number(NumberKind::Integer)),
            Rule::token(
                r#""(?:\\\\|\\"|[^"])*""#,
                T::StringLiteral(StringKind::Double),
            ),
            Rule::token(
                r"'(?:\\\\|\\'|[^'])*'",
                T::StringLiteral(StringKind::Single),
            ),
            Rule::token(r#"\\[nrt\\"'0]"#, T::Escape),
            Rule::token(format!("@{}", IDENT), T::Attribute),
            // Multi-character operators before the single-character class,
            // or the class consumes their first byte and |> never matches
            Rule::token(
                r"\|>|<<|>>|<-|->|==|!=|<=|>=|&&|\|\|",
                T::Operator(OperatorKind::Symbol),
            ),
            Rule::token(r"[-+/*%=!<>&|^~]", T::Operator(OperatorKind::Symbol)),
            Rule::token(r"[()\[\]{}.,:;]", T::Punctuation),
        ],
    };

    let block_comment = Mode {
        name: BLOCK_COMMENT,
        rules: vec![
            Rule::push(r"/\*", T::Comment(CommentKind::Block), BLOCK_COMMENT),
            Rule::pop(r"\*/", T::Comment(CommentKind::Block)),
            Rule::token(r"[^/*]+", T::Comment(CommentKind::Block)),
            Rule::token(r"[*/]", T::Comment(CommentKind::Block)),
        ],
    };

    Grammar {
        name: NAME,
        modes: vec![root, block_comment],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::Tokens;

    fn lex(source: &str) -> Vec<(T, String)> {
        let compiled = grammar().compile().unwrap();
        Tokens::new(&compiled, source)
            .map(|t| (t.category, t.text.to_string()))
            .collect()
    }

    fn categories(source: &str) -> Vec<T> {
        lex(source).into_iter().map(|(category, _)| category).collect()
    }

    #[test]
    fn grammar_compiles() {
        let compiled = grammar().compile().unwrap();
        assert_eq!(compiled.name, "gleam");
        assert_eq!(compiled.mode_count(), 2);
        assert!(compiled.mode_named(BLOCK_COMMENT).is_some());
    }

    #[test]
    fn fn_definition_tags_keyword_and_name() {
        assert_eq!(
            lex("fn main"),
            vec![
                (T::Keyword, "fn".to_string()),
                (T::Whitespace, " ".to_string()),
                (T::Function, "main".to_string()),
            ]
        );
    }

    #[test]
    fn keyword_prefixes_do_not_split_identifiers() {
        assert_eq!(categories("lettuce"), vec![T::Identifier]);
        assert_eq!(categories("puberty"), vec![T::Identifier]);
    }

    #[test]
    fn hex_number_is_one_token() {
        assert_eq!(
            lex("0x1A3F"),
            vec![(T::Number(NumberKind::Hex), "0x1A3F".to_string())]
        );
    }

    #[test]
    fn qualified_call_splits_into_three_tokens() {
        assert_eq!(
            lex("list.map"),
            vec![
                (T::Namespace, "list".to_string()),
                (T::Punctuation, ".".to_string()),
                (T::Function, "map".to_string()),
            ]
        );
    }

    #[test]
    fn pipe_operator_is_not_eaten_by_the_single_char_class() {
        let tokens = lex("a |> b");
        assert_eq!(
            tokens[2],
            (T::Operator(OperatorKind::Symbol), "|>".to_string())
        );
    }

    #[test]
    fn arrow_and_comparison_operators_stay_whole() {
        assert_eq!(
            categories("->"),
            vec![T::Operator(OperatorKind::Symbol)]
        );
        assert_eq!(
            categories("<="),
            vec![T::Operator(OperatorKind::Symbol)]
        );
        assert_eq!(lex("<-")[0].1, "<-");
    }

    #[test]
    fn strings_swallow_their_escapes() {
        assert_eq!(
            categories(r#""hi \"there\"""#),
            vec![T::StringLiteral(StringKind::Double)]
        );
    }

    #[test]
    fn attributes_and_uppercase_names() {
        assert_eq!(categories("@external"), vec![T::Attribute]);
        assert_eq!(categories("Int"), vec![T::Type]);
        assert_eq!(categories("Ok"), vec![T::Constant]);
        assert_eq!(categories("Wobble"), vec![T::Type]);
    }

    #[test]
    fn representative_line_tokenizes_as_expected() {
        assert_eq!(
            categories("pub fn main() { let x = 42 }"),
            vec![
                T::Keyword,                            // pub
                T::Whitespace,
                T::Keyword,                            // fn
                T::Whitespace,
                T::Function,                           // main
                T::Punctuation,                        // (
                T::Punctuation,                        // )
                T::Whitespace,
                T::Punctuation,                        // {
                T::Whitespace,
                T::Keyword,                            // let
                T::Whitespace,
                T::Identifier,                         // x
                T::Whitespace,
                T::Operator(OperatorKind::Symbol),     // =
                T::Whitespace,
                T::Number(NumberKind::Integer),        // 42
                T::Whitespace,
                T::Punctuation,                        // }
            ]
        );
    }

    #[test]
    fn word_lists_have_no_duplicates() {
        for list in [KEYWORDS, BUILTIN_TYPES, CONSTANTS] {
            let mut seen = std::collections::HashSet::new();
            for word in list {
                assert!(seen.insert(word), "duplicate word: {}", word);
            }
        }
    }

    #[test]
    fn root_rule_order_is_pinned() {
        // Order is the precedence contract. A reordering that still
        // compiles would silently change tokenization, so the table
        // layout itself is asserted here.
        let compiled = grammar().compile().unwrap();
        let patterns: Vec<&str> = compiled
            .mode(compiled.root())
            .rules
            .iter()
            .map(|r| r.pattern.as_str())
            .collect();

        let whitespace = patterns.iter().position(|p| *p == r"\s+").unwrap();
        let line_comment = patterns.iter().position(|p| *p == r"//[^\n]*").unwrap();
        let block_open = patterns.iter().position(|p| *p == r"/\*").unwrap();
        let fn_def = patterns.iter().position(|p| p.starts_with(r"\b(fn)")).unwrap();
        let keywords = patterns
            .iter()
            .position(|p| p.contains("let|fn") || p.contains("fn|let"))
            .unwrap();
        let qualified = patterns.iter().position(|p| p.contains(r"(\.)")).unwrap();
        let identifier = patterns
            .iter()
            .position(|p| *p == format!(r"\b{}\b", IDENT))
            .unwrap();
        let hex = patterns
            .iter()
            .position(|p| p.contains("0x"))
            .unwrap();
        let integer = patterns.iter().position(|p| *p == r"\b\d+\b").unwrap();
        let multi_op = patterns.iter().position(|p| p.contains(r"\|>")).unwrap();
        let single_op = patterns
            .iter()
            .position(|p| *p == r"[-+/*%=!<>&|^~]")
            .unwrap();

        assert!(whitespace < line_comment);
        assert!(line_comment < block_open);
        assert!(block_open < fn_def);
        assert!(fn_def < keywords, "fn definitions must outrank the keyword list");
        assert!(keywords < qualified);
        assert!(qualified < identifier, "qualified calls must outrank identifiers");
        assert!(hex < integer, "prefixed numbers must outrank plain integers");
        assert!(multi_op < single_op, "|> must outrank the single-char class");
    }
}
