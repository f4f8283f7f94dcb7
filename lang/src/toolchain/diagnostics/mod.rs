//! Tools for reporting problems found in jex source text.
//!
//! Lexing either succeeds completely or stops at the first problem, so the toolchain reports
//! through a single fatal error type, [StaticError], carrying the file name, the source
//! [Location] of the offending token, and a human-readable message. There is no recovery and no
//! multi-error accumulation at this layer; a consumer that wants to continue past an error must
//! re-invoke the lexer on corrected input.
//!

pub mod static_error;

pub use static_error::Location;
pub use static_error::StaticError;
