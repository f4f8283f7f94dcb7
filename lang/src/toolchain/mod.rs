//! Tools for jex language analysis.
//!
//! The toolchain is organized as a pipeline: a [source::SourceBuffer] pairs raw input bytes
//! with a file name, and the [lexer] turns the buffer into an ordered token sequence or a
//! single fatal [diagnostics::StaticError]. Later pipeline stages (parsing, evaluation) consume
//! the token sequence and live outside this crate.
//!

pub mod diagnostics;
pub mod lexer;
pub mod source;
