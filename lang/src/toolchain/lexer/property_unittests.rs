#[cfg(test)]
mod tests {
    use bstr::BString;
    use proptest::prelude::*;

    use crate::toolchain::lexer::token::Token;
    use crate::toolchain::lexer::TokenKind;
    use crate::toolchain::lexer::TokenizedBuffer;
    use crate::toolchain::source::SourceBuffer;

    const RESERVED_WORDS: [&str; 17] = [
        "assert",
        "else",
        "error",
        "false",
        "for",
        "function",
        "if",
        "import",
        "importstr",
        "in",
        "local",
        "null",
        "self",
        "super",
        "tailstrict",
        "then",
        "true",
    ];

    fn begin(token: &Token) -> (u32, u32) {
        (token.range.begin.line, token.range.begin.column)
    }

    proptest! {
        // Any identifier-shaped string that isn't a reserved word lexes back to itself as a
        // single identifier token.
        #[test]
        fn identifier_roundtrip(input in "[A-Za-z_][A-Za-z0-9_]{0,40}") {
            prop_assume!(!RESERVED_WORDS.contains(&input.as_str()));
            let source = SourceBuffer::new_from_string(&input, "property").unwrap();
            let buffer = TokenizedBuffer::tokenize(&source).unwrap();
            prop_assert_eq!(buffer.tokens().len(), 2);
            prop_assert_eq!(buffer.tokens()[0].kind, TokenKind::Identifier);
            prop_assert_eq!(&buffer.tokens()[0].data, &BString::from(input.as_str()));
            prop_assert_eq!(buffer.tokens()[1].kind, TokenKind::EndOfFile);
        }

        // Any spelling the number automaton accepts survives lexing with its text intact. The
        // regex generates exactly the automaton's accepted language.
        #[test]
        fn number_roundtrip(
            input in "(0|[1-9][0-9]{0,8})(\\.[0-9]{1,6})?([eE][+-]?[0-9]{1,3})?"
        ) {
            let source = SourceBuffer::new_from_string(&input, "property").unwrap();
            let buffer = TokenizedBuffer::tokenize(&source).unwrap();
            prop_assert_eq!(buffer.tokens().len(), 2);
            prop_assert_eq!(buffer.tokens()[0].kind, TokenKind::Number);
            prop_assert_eq!(&buffer.tokens()[0].data, &BString::from(input.as_str()));
        }

        // Quoting any printable text free of '"' and '\' yields a string token with exactly
        // that text as its decoded value.
        #[test]
        fn string_roundtrip(body in "[ -!#-\\[\\]-~]{0,40}") {
            let input = format!("\"{}\"", body);
            let source = SourceBuffer::new_from_string(&input, "property").unwrap();
            let buffer = TokenizedBuffer::tokenize(&source).unwrap();
            prop_assert_eq!(buffer.tokens().len(), 2);
            prop_assert_eq!(buffer.tokens()[0].kind, TokenKind::String);
            prop_assert_eq!(&buffer.tokens()[0].data, &BString::from(body.as_str()));
        }

        // Whatever the input bytes, a successful lex ends in exactly one zero-width
        // end-of-file sentinel and token start positions strictly increase.
        #[test]
        fn successful_lex_ends_with_eof_in_order(
            input in proptest::collection::vec(any::<u8>(), 0..256)
        ) {
            let source = SourceBuffer::new_from_bytes(&input, "property").unwrap();
            if let Ok(buffer) = TokenizedBuffer::tokenize(&source) {
                let tokens = buffer.tokens();
                let last = tokens.last().unwrap();
                prop_assert_eq!(last.kind, TokenKind::EndOfFile);
                prop_assert_eq!(last.range.begin, last.range.end);
                for pair in tokens.windows(2) {
                    prop_assert!(begin(&pair[0]) < begin(&pair[1]));
                }
                prop_assert_eq!(
                    tokens.iter().filter(|t| t.kind == TokenKind::EndOfFile).count(),
                    1
                );
            }
        }

        // Whitespace on its own produces nothing but the sentinel.
        #[test]
        fn blank_input_lexes_to_lone_eof(input in "[ \t\r\n]{0,64}") {
            let source = SourceBuffer::new_from_string(&input, "property").unwrap();
            let buffer = TokenizedBuffer::tokenize(&source).unwrap();
            prop_assert_eq!(buffer.tokens().len(), 1);
            prop_assert_eq!(buffer.tokens()[0].kind, TokenKind::EndOfFile);
        }
    }
}
