use std::fmt;

/// A position in source text as a 1-based line and a 1-based byte column.
///
/// Columns count bytes from the start of the line, so a multi-byte utf-8 sequence inside a
/// string literal advances the column once per byte. This matches how the positions are
/// produced, by subtracting the byte offset of the line start from the cursor offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

// Locations are embedded twice in every token range; keep them word-sized.
assert_eq_size!(Location, u64);

impl Location {
    pub fn new(line: u32, column: u32) -> Location {
        Location { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A fatal error detected while scanning source text.
///
/// The location names the *start* of the offending token, not the byte where scanning stopped,
/// so an unterminated string reports at its opening quote.
#[derive(Debug, PartialEq, Eq)]
pub struct StaticError {
    pub file_name: String,
    pub location: Location,
    pub message: String,
}

impl StaticError {
    pub fn new(file_name: &str, location: Location, message: String) -> StaticError {
        StaticError { file_name: String::from(file_name), location, message }
    }
}

impl fmt::Display for StaticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name)?;
        if self.location.line > 0 {
            write!(f, ":{}", self.location.line)?;
        }
        if self.location.column > 0 {
            write!(f, ":{}", self.location.column)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for StaticError {}
