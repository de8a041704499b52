//! Odin grammar.
//!
//! Covers the `*.odin` surface: `//` line comments, nestable `/* */`
//! block comments, the `proc` definition form, word operators
//! (`and`, `or`, `not`), and `@attribute` markers.

use super::rules::{word_pattern, Grammar, Mode, Rule};
use crate::tokens::TokenCategory as T;
use crate::tokens::{CommentKind, NumberKind, OperatorKind, StringKind};

pub const NAME: &str = "odin";
pub const ALIASES: &[&str] = &["odin"];
pub const EXTENSIONS: &[&str] = &["odin"];
pub const MIME_TYPES: &[&str] = &["text/x-odin"];

pub const KEYWORDS: &[&str] = &[
    "if", "else", "for", "switch", "case", "break", "continue", "return", "defer", "proc",
    "struct", "enum", "import", "foreign", "package", "using", "in", "cast", "typeid", "map",
    "dynamic",
];

pub const BUILTIN_TYPES: &[&str] = &[
    "int", "float", "string", "bool", "rune", "byte", "uintptr", "complex", "rawptr", "any",
    "void",
];

pub const CONSTANTS: &[&str] = &["true", "false", "nil"];

pub const WORD_OPERATORS: &[&str] = &["and", "or", "not"];

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
            // name gets function styling instead of `proc` eating the match
            Rule::groups(
                format!(r"\b(proc)(\s+)({})", IDENT),
                vec![T::Keyword, T::Whitespace, T::Function],
            ),
            Rule::token(word_pattern(KEYWORDS), T::Keyword),
            Rule::token(word_pattern(BUILTIN_TYPES), T::Type),
            Rule::token(word_pattern(CONSTANTS), T::Constant),
            // Word operators before the identifier rule, which matches the
            // same text and would otherwise shadow them
            Rule::token(word_pattern(WORD_OPERATORS), T::Operator(OperatorKind::Word)),
            // Qualified calls like fmt.println
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
            Rule::token(r"@[a-zA-Z_][a-zA-Z0-9_]*", T::Attribute),
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
