use bstr::BString;

use crate::toolchain::diagnostics::{Location, StaticError};
use crate::toolchain::source::SourceBuffer;

use super::token::{DelimiterKind, LocationRange, ReservedWordKind, Token, TokenKind};

/// Byte cursor over a [SourceBuffer], producing one [Token] per call to [Cursor::next_token].
///
/// The cursor tracks the 1-based line number and the byte offset of the current line start, so
/// a column is always `position - line_start + 1`. Line accounting happens inside [Cursor::bump]
/// and nowhere else, which keeps positions correct through newlines encountered at top level,
/// inside string literals, inside block comments, and inside text blocks.
///
/// Sub-scanners consume exactly the bytes of their lexeme and stop with the cursor on the first
/// unconsumed byte, so the `end` of a token range is always one past its last byte.
pub struct Cursor<'s> {
    source: &'s SourceBuffer<'s>,
    code: &'s [u8],
    position: usize,
    line: u32,
    line_start: usize,
}

impl<'s> Cursor<'s> {
    /// Byte value reported at and beyond the end of input.
    ///
    /// A NUL byte embedded in the input is indistinguishable from the end of it, matching
    /// C-string scanning. At top level it ends the token stream; inside a string literal it
    /// reports "Unterminated string".
    const EOF: u8 = 0;

    pub fn new(source: &'s SourceBuffer<'s>) -> Cursor<'s> {
        Cursor { source, code: source.code(), position: 0, line: 1, line_start: 0 }
    }

    /// Scans and returns the next token, skipping any whitespace and comments before it.
    ///
    /// Returns the [TokenKind::EndOfFile] sentinel at the end of input; calling again keeps
    /// returning it. The first malformed construct aborts scanning with a [StaticError] located
    /// at the start of the offending token.
    pub fn next_token(&mut self) -> Result<Token, StaticError> {
        loop {
            let begin = self.location();
            match self.peek() {
                Self::EOF => return Ok(self.token(TokenKind::EndOfFile, BString::from(""), begin)),

                // Whitespace produces no token. A '\r' does not advance the line count, so a
                // "\r\n" pair counts one line, at the '\n'.
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.bump();
                }

                b'{' => return Ok(self.delimiter(DelimiterKind::BraceOpen, begin)),
                b'}' => return Ok(self.delimiter(DelimiterKind::BraceClose, begin)),
                b'[' => return Ok(self.delimiter(DelimiterKind::BracketOpen, begin)),
                b']' => return Ok(self.delimiter(DelimiterKind::BracketClose, begin)),
                b':' => return Ok(self.delimiter(DelimiterKind::Colon, begin)),
                b',' => return Ok(self.delimiter(DelimiterKind::Comma, begin)),
                b'$' => return Ok(self.delimiter(DelimiterKind::Dollar, begin)),
                b'.' => return Ok(self.delimiter(DelimiterKind::Dot, begin)),
                b'(' => return Ok(self.delimiter(DelimiterKind::ParenOpen, begin)),
                b')' => return Ok(self.delimiter(DelimiterKind::ParenClose, begin)),
                b';' => return Ok(self.delimiter(DelimiterKind::Semicolon, begin)),

                // The unary operators don't belong to the symbol class, to keep them out of
                // multi-character operator runs. Only "!=" pairs up.
                b'!' => {
                    self.bump();
                    let data = if self.peek() == b'=' {
                        self.bump();
                        "!="
                    } else {
                        "!"
                    };
                    return Ok(self.token(TokenKind::Operator, BString::from(data), begin));
                }
                b'~' | b'+' | b'-' => {
                    let data = BString::from(&self.code[self.position..self.position + 1]);
                    self.bump();
                    return Ok(self.token(TokenKind::Operator, data, begin));
                }

                b'0'..=b'9' => return self.number(begin),
                b'"' => return self.quoted_string(begin),

                c if is_identifier_first(c) => return Ok(self.identifier(begin)),

                c if is_symbol(c) => {
                    // Comment prefixes and the text block opener win over operator tokens, but
                    // only at the start of a run; "+//" is an ordinary operator.
                    if c == b'/' && self.peek_at(1) == b'/' {
                        self.line_comment();
                        continue;
                    }
                    if c == b'#' {
                        self.line_comment();
                        continue;
                    }
                    if c == b'/' && self.peek_at(1) == b'*' {
                        self.block_comment(begin)?;
                        continue;
                    }
                    if c == b'|'
                        && self.peek_at(1) == b'|'
                        && self.peek_at(2) == b'|'
                        && self.peek_at(3) == b'\n'
                    {
                        return self.text_block(begin);
                    }
                    return Ok(self.operator(begin));
                }

                c => {
                    // Mirrors a signed char comparison: control bytes and bytes past the ascii
                    // range print as their decimal code.
                    let message = if c < 32 || c >= 128 {
                        format!("Could not lex the character code {}", c)
                    } else {
                        format!("Could not lex the character '{}'", c as char)
                    };
                    return Err(self.error(begin, message));
                }
            }
        }
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        *self.code.get(self.position + offset).unwrap_or(&Self::EOF)
    }

    fn bump(&mut self) {
        if self.position >= self.code.len() {
            return;
        }
        let b = self.code[self.position];
        self.position += 1;
        if b == b'\n' {
            self.line += 1;
            self.line_start = self.position;
        }
    }

    fn location(&self) -> Location {
        Location::new(self.line, (self.position - self.line_start + 1) as u32)
    }

    fn token(&self, kind: TokenKind, data: BString, begin: Location) -> Token {
        let range = LocationRange::new(self.source.file_name(), begin, self.location());
        Token::new(kind, data, range)
    }

    fn error(&self, begin: Location, message: String) -> StaticError {
        StaticError::new(self.source.file_name(), begin, message)
    }

    fn delimiter(&mut self, kind: DelimiterKind, begin: Location) -> Token {
        self.bump();
        self.token(TokenKind::Delimiter { kind }, BString::from(""), begin)
    }

    /// Scans a numeric literal with the json number grammar, minus the leading minus sign.
    ///
    /// The states follow the railroad diagram at <http://www.json.org>. An accept state stops
    /// before the terminating byte; anything else mid-literal is a static error.
    fn number(&mut self, begin: Location) -> Result<Token, StaticError> {
        enum State {
            Begin,
            AfterZero,
            AfterOneToNine,
            AfterDot,
            AfterDigit,
            AfterE,
            AfterExpSign,
            AfterExpDigit,
        }

        let mut data = BString::from("");
        let mut state = State::Begin;
        loop {
            let b = self.peek();
            state = match state {
                State::Begin => match b {
                    b'0' => State::AfterZero,
                    b'1'..=b'9' => State::AfterOneToNine,
                    _ => return Err(self.error(begin, String::from("Couldn't lex number"))),
                },

                State::AfterZero => match b {
                    b'.' => State::AfterDot,
                    b'e' | b'E' => State::AfterE,
                    // No digit may follow a leading zero.
                    b'0'..=b'9' => {
                        return Err(self.error(begin, String::from("Couldn't lex number")));
                    }
                    _ => break,
                },

                State::AfterOneToNine => match b {
                    b'.' => State::AfterDot,
                    b'e' | b'E' => State::AfterE,
                    b'0'..=b'9' => State::AfterOneToNine,
                    _ => break,
                },

                State::AfterDot => match b {
                    b'0'..=b'9' => State::AfterDigit,
                    _ => {
                        let message = format!(
                            "Couldn't lex number, junk after decimal point: {}",
                            b as char
                        );
                        return Err(self.error(begin, message));
                    }
                },

                State::AfterDigit => match b {
                    b'e' | b'E' => State::AfterE,
                    b'0'..=b'9' => State::AfterDigit,
                    _ => break,
                },

                State::AfterE => match b {
                    b'+' | b'-' => State::AfterExpSign,
                    b'0'..=b'9' => State::AfterExpDigit,
                    _ => {
                        let message =
                            format!("Couldn't lex number, junk after 'E': {}", b as char);
                        return Err(self.error(begin, message));
                    }
                },

                State::AfterExpSign => match b {
                    b'0'..=b'9' => State::AfterExpDigit,
                    _ => {
                        let message = format!(
                            "Couldn't lex number, junk after exponent sign: {}",
                            b as char
                        );
                        return Err(self.error(begin, message));
                    }
                },

                State::AfterExpDigit => match b {
                    b'0'..=b'9' => State::AfterExpDigit,
                    _ => break,
                },
            };
            data.push(b);
            self.bump();
        }
        Ok(self.token(TokenKind::Number, data, begin))
    }

    /// Scans a quoted string literal, decoding escape sequences into the token data.
    ///
    /// A raw newline inside the string is kept verbatim and still advances the line counter.
    /// `\u` escapes hold exactly four hex digits naming a 16-bit code point, appended to the
    /// data in utf-8; a lone surrogate is encoded as-is rather than paired.
    fn quoted_string(&mut self, begin: Location) -> Result<Token, StaticError> {
        self.bump();
        let mut data = BString::from("");
        loop {
            match self.peek() {
                Self::EOF => return Err(self.error(begin, String::from("Unterminated string"))),
                b'"' => {
                    self.bump();
                    break;
                }
                b'\\' => {
                    self.bump();
                    match self.peek() {
                        b'"' => {
                            data.push(b'"');
                            self.bump();
                        }
                        b'\\' => {
                            data.push(b'\\');
                            self.bump();
                        }
                        b'/' => {
                            data.push(b'/');
                            self.bump();
                        }
                        b'b' => {
                            data.push(0x08);
                            self.bump();
                        }
                        b'f' => {
                            data.push(0x0c);
                            self.bump();
                        }
                        b'n' => {
                            data.push(b'\n');
                            self.bump();
                        }
                        b'r' => {
                            data.push(b'\r');
                            self.bump();
                        }
                        b't' => {
                            data.push(b'\t');
                            self.bump();
                        }
                        b'u' => {
                            self.bump();
                            let mut code_point: u32 = 0;
                            for _ in 0..4 {
                                let x = self.peek();
                                let digit = match x {
                                    Self::EOF => {
                                        return Err(self
                                            .error(begin, String::from("Unterminated string")));
                                    }
                                    b'"' => {
                                        let message = String::from(
                                            "Truncated unicode escape sequence in \
                                             string literal.",
                                        );
                                        return Err(self.error(begin, message));
                                    }
                                    b'0'..=b'9' => u32::from(x - b'0'),
                                    b'a'..=b'f' => u32::from(x - b'a' + 10),
                                    b'A'..=b'F' => u32::from(x - b'A' + 10),
                                    _ => {
                                        let message = format!(
                                            "Malformed unicode escape character, \
                                             should be hex: '{}'",
                                            x as char
                                        );
                                        return Err(self.error(begin, message));
                                    }
                                };
                                code_point = code_point * 16 + digit;
                                self.bump();
                            }
                            encode_utf8(code_point, &mut data);
                        }
                        Self::EOF => {
                            let message =
                                String::from("Truncated escape sequence in string literal.");
                            return Err(self.error(begin, message));
                        }
                        c => {
                            let message = format!(
                                "Unknown escape sequence in string literal: '{}'",
                                c as char
                            );
                            return Err(self.error(begin, message));
                        }
                    }
                }
                b => {
                    data.push(b);
                    self.bump();
                }
            }
        }
        Ok(self.token(TokenKind::String, data, begin))
    }

    /// Scans a `|||` text block into a string token.
    ///
    /// The whitespace prefix of the first body line is required, byte for byte, at the start of
    /// every body line; the matched prefix is stripped from the block value. A body line that
    /// *extends* the prefix with more whitespace keeps the excess, which is what makes nested
    /// indentation inside a block come out intact. The first line without the prefix ends the
    /// body and must hold the closing `|||` after optional whitespace.
    fn text_block(&mut self, begin: Location) -> Result<Token, StaticError> {
        // Skip the "|||\n" opener.
        self.bump();
        self.bump();
        self.bump();
        self.bump();

        let first_line = self.position;
        let mut ws_chars = 0;
        while matches!(self.peek_at(ws_chars), b' ' | b'\t') {
            ws_chars += 1;
        }
        if ws_chars == 0 {
            let message = String::from("Text block's first line must start with whitespace.");
            return Err(self.error(begin, message));
        }

        let mut data = BString::from("");
        loop {
            let has_prefix = (0..ws_chars).all(|i| self.peek_at(i) == self.code[first_line + i]);
            if !has_prefix {
                break;
            }
            for _ in 0..ws_chars {
                self.bump();
            }
            loop {
                match self.peek() {
                    Self::EOF => return Err(self.error(begin, String::from("Unexpected EOF"))),
                    b'\n' => break,
                    b => {
                        data.push(b);
                        self.bump();
                    }
                }
            }
            data.push(b'\n');
            self.bump();
        }

        // Out of the body; any extra indentation may precede the closing delimiter.
        while matches!(self.peek(), b' ' | b'\t') {
            self.bump();
        }
        if !(self.peek() == b'|' && self.peek_at(1) == b'|' && self.peek_at(2) == b'|') {
            let message = String::from("Text block not terminated with |||");
            return Err(self.error(begin, message));
        }
        self.bump();
        self.bump();
        self.bump();
        Ok(self.token(TokenKind::String, data, begin))
    }

    /// Scans an identifier and promotes it to a reserved word token when the whole name matches.
    fn identifier(&mut self, begin: Location) -> Token {
        let start = self.position;
        while is_identifier(self.peek()) {
            self.bump();
        }
        let id = &self.code[start..self.position];
        let kind = match id {
            b"assert" => TokenKind::ReservedWord { kind: ReservedWordKind::Assert },
            b"else" => TokenKind::ReservedWord { kind: ReservedWordKind::Else },
            b"error" => TokenKind::ReservedWord { kind: ReservedWordKind::Error },
            b"false" => TokenKind::ReservedWord { kind: ReservedWordKind::False },
            b"for" => TokenKind::ReservedWord { kind: ReservedWordKind::For },
            b"function" => TokenKind::ReservedWord { kind: ReservedWordKind::Function },
            b"if" => TokenKind::ReservedWord { kind: ReservedWordKind::If },
            b"import" => TokenKind::ReservedWord { kind: ReservedWordKind::Import },
            b"importstr" => TokenKind::ReservedWord { kind: ReservedWordKind::ImportStr },
            b"in" => TokenKind::ReservedWord { kind: ReservedWordKind::In },
            b"local" => TokenKind::ReservedWord { kind: ReservedWordKind::Local },
            b"null" => TokenKind::ReservedWord { kind: ReservedWordKind::Null },
            b"self" => TokenKind::ReservedWord { kind: ReservedWordKind::SelfRef },
            b"super" => TokenKind::ReservedWord { kind: ReservedWordKind::Super },
            b"tailstrict" => TokenKind::ReservedWord { kind: ReservedWordKind::TailStrict },
            b"then" => TokenKind::ReservedWord { kind: ReservedWordKind::Then },
            b"true" => TokenKind::ReservedWord { kind: ReservedWordKind::True },
            _ => TokenKind::Identifier,
        };
        let data = match kind {
            TokenKind::Identifier => BString::from(id),
            _ => BString::from(""),
        };
        self.token(kind, data, begin)
    }

    /// Scans the maximal run of symbol-class bytes as one operator token.
    fn operator(&mut self, begin: Location) -> Token {
        let start = self.position;
        while is_symbol(self.peek()) {
            self.bump();
        }
        let data = BString::from(&self.code[start..self.position]);
        self.token(TokenKind::Operator, data, begin)
    }

    /// Skips a `//` or `#` comment up to, but not including, the terminating newline, which the
    /// driver then processes for line accounting.
    fn line_comment(&mut self) {
        while self.peek() != Self::EOF && self.peek() != b'\n' {
            self.bump();
        }
    }

    /// Skips a `/* ... */` comment. The opener is consumed before searching for the close, so
    /// `/*/` does not read as a complete comment.
    fn block_comment(&mut self, begin: Location) -> Result<(), StaticError> {
        self.bump();
        self.bump();
        loop {
            match self.peek() {
                Self::EOF => {
                    let message = String::from("Multi-line comment has no terminating */.");
                    return Err(self.error(begin, message));
                }
                b'*' if self.peek_at(1) == b'/' => {
                    self.bump();
                    self.bump();
                    return Ok(());
                }
                _ => {
                    self.bump();
                }
            }
        }
    }
}

fn is_identifier_first(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_lowercase() || b == b'_'
}

fn is_identifier(b: u8) -> bool {
    is_identifier_first(b) || b.is_ascii_digit()
}

fn is_symbol(b: u8) -> bool {
    matches!(b, b'&' | b'|' | b'^' | b'=' | b'<' | b'>' | b'*' | b'/' | b'%' | b'#')
}

/// Appends the utf-8 encoding of a code point below 0x10000 to `out`.
///
/// Surrogate code points pass through as ordinary three-byte sequences, so the output is not
/// guaranteed to be valid utf-8.
fn encode_utf8(code_point: u32, out: &mut BString) {
    if code_point < 0x80 {
        out.push(code_point as u8);
    } else if code_point < 0x800 {
        out.push(0xc0 | (code_point >> 6) as u8);
        out.push(0x80 | (code_point & 0x3f) as u8);
    } else {
        out.push(0xe0 | (code_point >> 12) as u8);
        out.push(0x80 | ((code_point >> 6) & 0x3f) as u8);
        out.push(0x80 | (code_point & 0x3f) as u8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jex;
    use crate::toolchain::source;

    #[test]
    fn tracks_lines_and_byte_columns() {
        let source = jex!("ab\ncd");
        let mut cursor = Cursor::new(source);
        assert_eq!(cursor.location(), Location::new(1, 1));
        cursor.bump();
        cursor.bump();
        assert_eq!(cursor.location(), Location::new(1, 3));
        cursor.bump();
        assert_eq!(cursor.location(), Location::new(2, 1));
        cursor.bump();
        assert_eq!(cursor.location(), Location::new(2, 2));
    }

    #[test]
    fn peek_past_end_reports_eof() {
        let source = jex!("x");
        let mut cursor = Cursor::new(source);
        assert_eq!(cursor.peek(), b'x');
        assert_eq!(cursor.peek_at(1), Cursor::EOF);
        cursor.bump();
        assert_eq!(cursor.peek(), Cursor::EOF);
        // Bumping at the end stays put.
        cursor.bump();
        assert_eq!(cursor.location(), Location::new(1, 2));
    }

    #[test]
    fn utf8_encoding_of_escape_code_points() {
        let mut out = BString::from("");
        encode_utf8(0x24, &mut out);
        encode_utf8(0xe9, &mut out);
        encode_utf8(0x20ac, &mut out);
        assert_eq!(out, BString::from(&b"\x24\xc3\xa9\xe2\x82\xac"[..]));
    }
}
