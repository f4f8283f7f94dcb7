#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let source =
        jex_lang::toolchain::source::SourceBuffer::new_from_bytes(data, "fuzz_targets/lex.rs")
            .unwrap();
    let _ = jex_lang::toolchain::lexer::TokenizedBuffer::tokenize(&source);
});
