//! jex configuration language toolchain.
//!
//! jex is a superset of JSON extended with expressions, functions, and multi-line text blocks.
//! This crate contains the lexical analysis front end of the jex toolchain: byte-oriented
//! source buffers, a hand-written scanner producing location-annotated tokens, and the static
//! error type the scanner reports through.
//!

#[macro_use]
extern crate static_assertions;

pub mod toolchain;
