use std::fmt;

use bstr::BString;

use crate::toolchain::diagnostics::Location;

/// A contiguous range of source text, from the first byte of a lexeme to one past its last byte.
///
/// `end` is exclusive, so for a single-line token `end.column - begin.column` is the byte length
/// of the lexeme. The file name rides along for diagnostics and is not otherwise interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationRange {
    pub file_name: String,
    pub begin: Location,
    pub end: Location,
}

impl LocationRange {
    pub fn new(file_name: &str, begin: Location, end: Location) -> LocationRange {
        LocationRange { file_name: String::from(file_name), begin, end }
    }
}

impl fmt::Display for LocationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:({})-({})", self.file_name, self.begin, self.end)
    }
}

/// A single lexical token of jex source.
///
/// Tokens own all of their data; no field borrows from the input buffer, so the buffer may be
/// released as soon as lexing completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The kind of Token.
    pub kind: TokenKind,

    /// Text associated with the token. The meaning depends on the kind: the decoded value for
    /// string literals (escape sequences processed, so possibly arbitrary bytes), the exact
    /// source spelling for numbers, operators, and identifiers, and empty for everything else.
    pub data: BString,

    /// Where the token appeared in the input.
    pub range: LocationRange,
}

impl Token {
    pub fn new(kind: TokenKind, data: BString, range: LocationRange) -> Token {
        Token { kind, data, range }
    }
}

/// An enumeration of all possible token types in jex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// One of the fixed single-character punctuation tokens.
    Delimiter { kind: DelimiterKind },

    /// The end-of-file sentinel. Always the final token of a successful lex, with empty data
    /// and a zero-width range one past the last byte of input.
    EndOfFile,

    /// A name that didn't match any reserved word: `[A-Za-z_][A-Za-z0-9_]*`.
    Identifier,

    /// A numeric literal, kept as its exact source spelling. A leading minus sign is never part
    /// of the literal; it lexes as a separate operator token.
    Number,

    /// An operator such as `+`, `!=`, or a longer run of symbol characters.
    Operator,

    /// A reserved word of the language. Reserved words are matched against whole identifiers
    /// only, so `nulls` is an ordinary identifier.
    ReservedWord { kind: ReservedWordKind },

    /// A string literal, either quoted or a `|||` text block, with its decoded value as data.
    String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelimiterKind {
    /// `}` single-character delimiter.
    BraceClose,

    /// `{` single-character delimiter.
    BraceOpen,

    /// `]` single-character delimiter.
    BracketClose,

    /// `[` single-character delimiter.
    BracketOpen,

    /// `:` single-character delimiter.
    Colon,

    /// `,` single-character delimiter.
    Comma,

    /// `$` single-character delimiter.
    Dollar,

    /// `.` single-character delimiter.
    Dot,

    /// `)` single-character delimiter.
    ParenClose,

    /// `(` single-character delimiter.
    ParenOpen,

    /// `;` single-character delimiter.
    Semicolon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReservedWordKind {
    Assert,
    Else,
    Error,
    False,
    For,
    Function,
    If,
    Import,
    ImportStr,
    In,
    Local,
    Null,
    /// The `self` reference. `Self` is reserved in Rust, hence the longer name.
    SelfRef,
    Super,
    TailStrict,
    Then,
    True,
}

impl ReservedWordKind {
    /// The source spelling of the reserved word.
    pub fn spelling(&self) -> &'static str {
        match self {
            ReservedWordKind::Assert => "assert",
            ReservedWordKind::Else => "else",
            ReservedWordKind::Error => "error",
            ReservedWordKind::False => "false",
            ReservedWordKind::For => "for",
            ReservedWordKind::Function => "function",
            ReservedWordKind::If => "if",
            ReservedWordKind::Import => "import",
            ReservedWordKind::ImportStr => "importstr",
            ReservedWordKind::In => "in",
            ReservedWordKind::Local => "local",
            ReservedWordKind::Null => "null",
            ReservedWordKind::SelfRef => "self",
            ReservedWordKind::Super => "super",
            ReservedWordKind::TailStrict => "tailstrict",
            ReservedWordKind::Then => "then",
            ReservedWordKind::True => "true",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Delimiter { kind: DelimiterKind::BraceClose } => "closing brace '}'",
            TokenKind::Delimiter { kind: DelimiterKind::BraceOpen } => "opening brace '{'",
            TokenKind::Delimiter { kind: DelimiterKind::BracketClose } => "closing bracket ']'",
            TokenKind::Delimiter { kind: DelimiterKind::BracketOpen } => "opening bracket '['",
            TokenKind::Delimiter { kind: DelimiterKind::Colon } => "colon ':'",
            TokenKind::Delimiter { kind: DelimiterKind::Comma } => "comma ','",
            TokenKind::Delimiter { kind: DelimiterKind::Dollar } => "dollar sign '$'",
            TokenKind::Delimiter { kind: DelimiterKind::Dot } => "dot '.'",
            TokenKind::Delimiter { kind: DelimiterKind::ParenClose } => "closing parenthesis ')'",
            TokenKind::Delimiter { kind: DelimiterKind::ParenOpen } => "opening parenthesis '('",
            TokenKind::Delimiter { kind: DelimiterKind::Semicolon } => "semicolon ';'",

            TokenKind::EndOfFile => "end of file",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number literal",
            TokenKind::Operator => "operator",
            TokenKind::String => "string literal",

            TokenKind::ReservedWord { kind } => {
                return write!(f, "reserved word '{}'", kind.spelling());
            }
        };
        f.write_str(s)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier | TokenKind::Number | TokenKind::Operator | TokenKind::String => {
                write!(f, "{} '{}' at {}", self.kind, self.data, self.range)
            }

            // The remaining kinds are text-invariant, so repeating the data is redundant.
            _ => write!(f, "{} at {}", self.kind, self.range),
        }
    }
}
