#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// A `'` was the last character of the source.
    MalformedLiteral {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `"` opened a string that never closes.
    UnterminatedString {
        /// The source line where the string starts.
        line: usize,
    },
    /// An integer literal does not fit in a 64-bit signed integer.
    LiteralTooLarge {
        /// The offending digits.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl ParseError {
    /// The source line where the error occurred.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::MalformedLiteral { line }
            | Self::UnterminatedString { line }
            | Self::LiteralTooLarge { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedLiteral { line } => {
                write!(f, "Error on line {line}: \"'\" must precede a character.")
            },
            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: String literal is never closed.")
            },
            Self::LiteralTooLarge { literal, line } => {
                write!(f, "Error on line {line}: Literal {literal} is too large.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
