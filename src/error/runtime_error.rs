#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// An operation needed more values than the stack holds.
    StackUnderflow {
        /// The opcode that tried to pop.
        op:   char,
        /// The source line where the error occurred.
        line: usize,
    },
    /// `ø` asked for an item deeper than the stack.
    IndexOutOfRange {
        /// The requested index.
        index: i64,
        /// Stack depth after the index was popped.
        depth: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A value of the wrong kind was consumed.
    TypeMismatch {
        /// The opcode that consumed the value.
        op:       char,
        /// What kind of value the opcode needs.
        expected: &'static str,
        /// What kind of value it got.
        found:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// `;` on a slot that was never stored to.
    UnboundVariable {
        /// The slot letter.
        name: char,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Arithmetic operation overflowed.
    Overflow {
        /// The opcode that overflowed.
        op:   char,
        /// The source line where the error occurred.
        line: usize,
    },
    /// `,` on a value that is not a Unicode scalar value.
    InvalidCharacter {
        /// The rejected code.
        code: i64,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Quotations were executed more deeply nested than the configured limit.
    RecursionLimit {
        /// The configured limit.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Writing to or flushing the output sink failed.
    Io {
        /// The underlying error.
        source: std::io::Error,
        /// The source line where the error occurred.
        line:   usize,
    },
}

impl RuntimeError {
    /// The source line where the error occurred.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::StackUnderflow { line, .. }
            | Self::IndexOutOfRange { line, .. }
            | Self::TypeMismatch { line, .. }
            | Self::UnboundVariable { line, .. }
            | Self::DivisionByZero { line }
            | Self::Overflow { line, .. }
            | Self::InvalidCharacter { line, .. }
            | Self::RecursionLimit { line, .. }
            | Self::Io { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StackUnderflow { op, line } => {
                write!(f, "Error on line {line}: Stack underflow in '{op}'.")
            },
            Self::IndexOutOfRange { index, depth, line } => write!(f,
                                                                   "Error on line {line}: Pick index {index} out of range for stack of depth {depth}."),
            Self::TypeMismatch { op,
                                 expected,
                                 found,
                                 line, } => write!(f,
                                                   "Error on line {line}: '{op}' expected {expected}, but found {found}."),
            Self::UnboundVariable { name, line } => {
                write!(f, "Error on line {line}: Variable '{name}' was never assigned.")
            },
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::Overflow { op, line } => write!(f,
                                                  "Error on line {line}: Integer overflow while computing '{op}'."),
            Self::InvalidCharacter { code, line } => write!(f,
                                                            "Error on line {line}: {code} is not a valid character code."),
            Self::RecursionLimit { limit, line } => write!(f,
                                                           "Error on line {line}: Quotations nested deeper than {limit} levels."),
            Self::Io { source, line } => write!(f, "Error on line {line}: I/O failed: {source}."),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
