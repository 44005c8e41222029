use std::{fmt, mem, rc::Rc};

use crate::util::stack::ensure_sufficient_stack;

/// One of the 26 single-letter variable slots, `a` through `z`.
///
/// The slot is stored as its zero-based index so the environment can be a
/// plain fixed-size array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable(u8);

impl Variable {
    /// Number of variable slots in the language.
    pub const COUNT: usize = 26;

    /// Returns the slot named by a lowercase ASCII letter.
    ///
    /// # Returns
    /// - `Some(Variable)`: If `letter` is in `'a'..='z'`.
    /// - `None`: For any other character.
    ///
    /// # Example
    /// ```
    /// use falsey::ast::Variable;
    ///
    /// assert_eq!(Variable::from_letter('c').map(Variable::index), Some(2));
    /// assert!(Variable::from_letter('A').is_none());
    /// ```
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        if letter.is_ascii_lowercase() {
            Some(Self(letter as u8 - b'a'))
        } else {
            None
        }
    }

    /// The letter naming this slot.
    #[must_use]
    pub const fn letter(self) -> char {
        (b'a' + self.0) as char
    }

    /// Zero-based slot index, `0` for `a`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The closed set of primitive stack operations.
///
/// Each variant corresponds to exactly one opcode character. Control flow
/// (`!`, `?`, `#`) and variable access (`:`, `;`) are not primitives; they
/// are separate [`Instruction`] variants because the evaluator interprets them
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `$`
    Dup,
    /// `%`
    Drop,
    /// `\`
    Swap,
    /// `@`
    Rotate,
    /// `ø`
    Pick,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `_`
    Negate,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `~`
    Not,
    /// `>`
    Greater,
    /// `=`
    Equal,
    /// `^`
    Input,
    /// `,`
    OutputChar,
    /// `.`
    OutputDecimal,
    /// `ß`
    Flush,
}

impl Primitive {
    /// The opcode character that produces this primitive.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Dup => '$',
            Self::Drop => '%',
            Self::Swap => '\\',
            Self::Rotate => '@',
            Self::Pick => 'ø',
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Negate => '_',
            Self::BitAnd => '&',
            Self::BitOr => '|',
            Self::Not => '~',
            Self::Greater => '>',
            Self::Equal => '=',
            Self::Input => '^',
            Self::OutputChar => ',',
            Self::OutputDecimal => '.',
            Self::Flush => 'ß',
        }
    }
}

/// A node of the instruction tree produced by the parser.
///
/// Instructions are immutable once parsed. Quotation bodies sit behind an
/// `Rc` so that pushing a quotation onto the value stack, duplicating it or
/// storing it in a variable never copies the body.
///
/// Every variant records the source line it was parsed from; the evaluator
/// attaches that line to any runtime error raised while executing it.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// A decimal literal such as `42` or `42_`.
    IntegerLiteral {
        /// The literal value, already negated for the `_` suffix.
        value: i64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A character literal such as `'A`. Evaluates exactly like an integer
    /// literal holding the character code.
    CharacterLiteral {
        /// The Unicode scalar value of the quoted character.
        code: i64,
        /// Line number in the source code.
        line: usize,
    },
    /// A letter `a`..`z`; pushes a name token for the slot.
    Variable {
        /// The referenced slot.
        name: Variable,
        /// Line number in the source code.
        line: usize,
    },
    /// A bracketed block `[...]`; pushed as a value, executed later.
    Quotation {
        /// The instructions between the brackets.
        body: Rc<[Self]>,
        /// Line number of the opening bracket.
        line: usize,
    },
    /// A primitive stack operation.
    Primitive {
        /// Which primitive.
        op:   Primitive,
        /// Line number in the source code.
        line: usize,
    },
    /// A string literal `"..."`; written verbatim to the output when reached.
    Print {
        /// Text between the quotes.
        text: Rc<str>,
        /// Line number of the opening quote.
        line: usize,
    },
    /// `!` (unconditional) or `?` (conditional) quotation execution.
    Execute {
        /// `true` for `?`.
        conditional: bool,
        /// Line number in the source code.
        line:        usize,
    },
    /// `#`
    While {
        /// Line number in the source code.
        line: usize,
    },
    /// `:`
    Store {
        /// Line number in the source code.
        line: usize,
    },
    /// `;`
    Load {
        /// Line number in the source code.
        line: usize,
    },
}

impl Instruction {
    /// The source line this instruction was parsed from.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::IntegerLiteral { line, .. }
            | Self::CharacterLiteral { line, .. }
            | Self::Variable { line, .. }
            | Self::Quotation { line, .. }
            | Self::Primitive { line, .. }
            | Self::Print { line, .. }
            | Self::Execute { line, .. }
            | Self::While { line }
            | Self::Store { line }
            | Self::Load { line } => *line,
        }
    }
}

/// Frees nested quotation bodies with an explicit worklist.
///
/// Bodies nest as deep as the source does, so the derived drop glue would
/// recurse once per level. Each uniquely owned body has its children's bodies
/// detached before it is freed, leaving every node shallow when it drops.
impl Drop for Instruction {
    fn drop(&mut self) {
        let Self::Quotation { body, .. } = self else {
            return;
        };
        if body.is_empty() {
            return;
        }

        let mut pending = vec![mem::take(body)];
        while let Some(mut quotation) = pending.pop() {
            let Some(children) = Rc::get_mut(&mut quotation) else {
                continue;
            };
            for child in children.iter_mut() {
                if let Self::Quotation { body, .. } = child
                   && !body.is_empty()
                {
                    pending.push(mem::take(body));
                }
            }
        }
    }
}

/// Renders the instruction back as canonical source text.
///
/// The output parses to a tree of the same shape. Comments and whitespace in
/// the parsed text are not preserved.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntegerLiteral { value, .. } if *value < 0 => {
                write!(f, "{}_", value.unsigned_abs())
            },
            Self::IntegerLiteral { value, .. } => write!(f, "{value}"),
            Self::CharacterLiteral { code, .. } => {
                let c = u32::try_from(*code).ok()
                                            .and_then(char::from_u32)
                                            .unwrap_or(char::REPLACEMENT_CHARACTER);
                write!(f, "'{c}")
            },
            Self::Variable { name, .. } => write!(f, "{name}"),
            Self::Quotation { body, .. } => {
                ensure_sufficient_stack(|| write!(f, "[{}]", Program(body)))
            },
            Self::Primitive { op, .. } => write!(f, "{}", op.symbol()),
            Self::Print { text, .. } => write!(f, "\"{text}\""),
            Self::Execute { conditional, .. } => write!(f, "{}", if *conditional { '?' } else { '!' }),
            Self::While { .. } => write!(f, "#"),
            Self::Store { .. } => write!(f, ":"),
            Self::Load { .. } => write!(f, ";"),
        }
    }
}

/// Display adapter for a whole instruction sequence.
///
/// Instructions are separated by single spaces so that adjacent integer
/// literals stay distinct when the text is parsed again.
///
/// # Example
/// ```
/// use falsey::{ast::Program, interpreter::parser::parse};
///
/// let tree = parse("1 2+[$.]!").unwrap();
/// assert_eq!(Program(&tree).to_string(), "1 2 + [$ .] !");
/// ```
pub struct Program<'a>(pub &'a [Instruction]);

impl fmt::Display for Program<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instruction) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{instruction}")?;
        }
        Ok(())
    }
}
