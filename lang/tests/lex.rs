use bstr::{BString, ByteSlice};

use jex_lang::toolchain::lexer::token::ReservedWordKind;
use jex_lang::toolchain::lexer::{TokenKind, TokenizedBuffer};
use jex_lang::toolchain::source::SourceBuffer;

// Lexes a checked-in configuration through the memory-mapped file path, end to end.
#[test]
fn lex_sample_config() {
    let path = std::path::Path::new("tests/data/sample.jex");
    let source = SourceBuffer::new_from_file(path).unwrap();
    let buffer = TokenizedBuffer::tokenize(&source).unwrap();
    let tokens = buffer.tokens();

    assert_eq!(tokens.last().unwrap().kind, TokenKind::EndOfFile);

    // Both comment styles vanish from the stream.
    assert!(!tokens.iter().any(|t| t.data.contains_str("Example")));
    assert!(!tokens.iter().any(|t| t.data.contains_str("Deployment")));

    // The text block strips the first body line's indentation and keeps the excess.
    let block = tokens
        .iter()
        .find(|t| t.kind == TokenKind::String && t.data.contains_str("release"))
        .unwrap();
    assert_eq!(block.data, BString::from("release notes:\n  lexer rewrite\n"));

    // Spot-check a few classifications.
    assert!(tokens
        .iter()
        .any(|t| t.kind == TokenKind::ReservedWord { kind: ReservedWordKind::Local }));
    assert!(tokens
        .iter()
        .any(|t| t.kind == TokenKind::ReservedWord { kind: ReservedWordKind::Null }));
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Number && t.data == "2.5e-1"));
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Operator && t.data == "!"));

    // The file name rides along on every token.
    assert!(tokens.iter().all(|t| t.range.file_name.ends_with("sample.jex")));
}
