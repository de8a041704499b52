//! The token category taxonomy shared by all grammars.
//!
//! Categories are a closed set so downstream consumers (themes, the
//! token dump) can handle every case exhaustively. Sub-kinds refine a
//! category without changing how it is styled by default: all numbers
//! share one style unless a theme says otherwise.
use serde::{Deserialize, Serialize};
use serde::ser::Serializer;
use std::fmt;

/// Comment flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommentKind {
    /// `// ...` to end of line
    Line,
    /// `/* ... */`, possibly nested
    Block,
}

/// Numeric literal flavors, in rule-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberKind {
    /// `0b1010`
    Binary,
    /// `0o755`
    Octal,
    /// `0x1A3F`
    Hex,
    /// `3.14`, `3.14e-2`
    Float,
    /// `42`
    Integer,
}

/// String literal flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StringKind {
    /// `"..."`
    Double,
    /// `'...'`
    Single,
}

/// Operator flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorKind {
    /// Symbolic operators (`+`, `|>`, `==`, ...)
    Symbol,
    /// Word operators (`and`, `or`, `not` in Odin)
    Word,
}

/// Category assigned to every emitted token.
///
/// The set is fixed across languages; a grammar selects which members it
/// actually produces. `Error` is reserved for the fallback token emitted
/// when no rule matches at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    // === LAYOUT ===
    /// Runs of spaces, tabs, and newlines
    Whitespace,
    /// Line and block comments
    Comment(CommentKind),

    // === WORDS ===
    /// Reserved words (`fn`, `proc`, `let`, ...)
    Keyword,
    /// Built-in and user type names (`Int`, `rawptr`, `Option`)
    Type,
    /// Language constants (`Nil`, `true`, `nil`)
    Constant,
    /// Function names in definitions and qualified calls
    Function,
    /// Module qualifier in a qualified call (`list` in `list.map`)
    Namespace,
    /// Plain lowercase-leading identifiers
    Identifier,

    // === LITERALS ===
    /// Numeric literals
    Number(NumberKind),
    /// Quoted string literals
    StringLiteral(StringKind),
    /// Escape sequence outside a string (`\n`)
    Escape,

    // === MARKERS AND SYMBOLS ===
    /// Attribute / decorator (`@external`)
    Attribute,
    /// Symbolic and word operators
    Operator(OperatorKind),
    /// Brackets, commas, and other structural characters
    Punctuation,

    // === RECOVERY ===
    /// Fallback for input no rule matched
    Error,
}

impl TokenCategory {
    /// Dotted display name, used by the token dump and in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::Comment(CommentKind::Line) => "comment.line",
            Self::Comment(CommentKind::Block) => "comment.block",
            Self::Keyword => "keyword",
            Self::Type => "type",
            Self::Constant => "constant",
            Self::Function => "function",
            Self::Namespace => "namespace",
            Self::Identifier => "identifier",
            Self::Number(NumberKind::Binary) => "number.binary",
            Self::Number(NumberKind::Octal) => "number.octal",
            Self::Number(NumberKind::Hex) => "number.hex",
            Self::Number(NumberKind::Float) => "number.float",
            Self::Number(NumberKind::Integer) => "number.integer",
            Self::StringLiteral(StringKind::Double) => "string.double",
            Self::StringLiteral(StringKind::Single) => "string.single",
            Self::Escape => "escape",
            Self::Attribute => "attribute",
            Self::Operator(OperatorKind::Symbol) => "operator",
            Self::Operator(OperatorKind::Word) => "operator.word",
            Self::Punctuation => "punctuation",
            Self::Error => "error",
        }
    }

    /// Check if this is the whitespace category
    pub const fn is_whitespace(self) -> bool {
        matches!(self, Self::Whitespace)
    }

    /// Check if this is a comment category (either kind)
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::Comment(_))
    }

    /// Check if this is a literal category (number, string, escape)
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::Number(_) | Self::StringLiteral(_) | Self::Escape
        )
    }

    /// Check if this is the fallback category
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Check if this token carries content a reader cares about
    /// (everything except whitespace and comments)
    pub const fn is_significant(self) -> bool {
        !matches!(self, Self::Whitespace | Self::Comment(_))
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Serialized as the dotted name so token dumps stay flat and greppable.
impl Serialize for TokenCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
