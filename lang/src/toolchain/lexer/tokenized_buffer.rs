use super::cursor::Cursor;
use super::token::{Token, TokenKind};
use super::TokenIndex;
use crate::toolchain::diagnostics::StaticError;
use crate::toolchain::source::SourceBuffer;

/// The complete, ordered token sequence of one source buffer.
///
/// The buffer owns every token outright, so the [SourceBuffer] it was lexed from may be dropped
/// as soon as [TokenizedBuffer::tokenize] returns.
#[derive(Debug)]
pub struct TokenizedBuffer {
    tokens: Vec<Token>,
}

impl TokenizedBuffer {
    /// Lexes the entire source buffer in one pass.
    ///
    /// On success the returned buffer always terminates with a [TokenKind::EndOfFile] sentinel.
    /// The first malformed construct aborts the pass and returns its [StaticError]; no tokens
    /// are produced for a failed lex.
    pub fn tokenize(source: &SourceBuffer) -> Result<TokenizedBuffer, StaticError> {
        let mut cursor = Cursor::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = cursor.next_token()?;
            let at_end = token.kind == TokenKind::EndOfFile;
            tokens.push(token);
            if at_end {
                return Ok(TokenizedBuffer { tokens });
            }
        }
    }

    pub fn token_at(&self, i: TokenIndex) -> Option<&Token> {
        self.tokens.get(i)
    }

    pub fn tokens(&self) -> &Vec<Token> {
        &self.tokens
    }

    pub fn print_tokens(&self) {
        for token in self.tokens.iter() {
            println!("{}", token);
        }
    }
}
