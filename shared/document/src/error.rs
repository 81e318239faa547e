use thiserror::Error;

/// Errors raised while parsing document text
///
/// Offsets count characters in the compacted input, i.e. after whitespace
/// outside of strings has been stripped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input ended while a value, key or delimiter was still expected
    #[error("Document ended unexpectedly at offset {position}")]
    UnexpectedEnd { position: usize },

    /// A structural character showed up where it cannot appear
    #[error("Unexpected character '{found}' at offset {position}")]
    UnexpectedCharacter { found: char, position: usize },

    /// Object keys must be quoted strings
    #[error("Expected a quoted object key at offset {position}")]
    ExpectedKey { position: usize },

    /// A string was opened and never closed
    #[error("String starting at offset {start} is never closed")]
    UnterminatedString { start: usize },

    /// Containers nest deeper than `MAX_DEPTH`
    #[error("Document nests deeper than {max} levels at offset {position}")]
    TooDeep { position: usize, max: usize },

    /// A complete value was read but input remains
    #[error("Trailing characters after the document at offset {position}")]
    TrailingCharacters { position: usize },
}
