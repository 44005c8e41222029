use std::{fmt, rc::Rc};

use crate::{
    ast::{Instruction, Variable},
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
};

/// Represents a runtime value on the stack or in a variable slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer. Also used for characters and booleans.
    Integer(i64),
    /// The body of a quotation, shared with the instruction tree.
    Quotation(Rc<[Instruction]>),
    /// A variable slot, pushed by naming a letter and consumed by `:` and `;`.
    Name(Variable),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<Variable> for Value {
    fn from(v: Variable) -> Self {
        Self::Name(v)
    }
}

impl Value {
    /// A short description of the value's kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Quotation(_) => "quotation",
            Self::Name(_) => "variable name",
        }
    }

    /// Returns the integer, or a `TypeMismatch` naming `op`.
    ///
    /// # Example
    /// ```
    /// use falsey::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(3).as_integer('+', 1).unwrap(), 3);
    /// ```
    pub fn as_integer(&self, op: char, line: usize) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            _ => Err(self.mismatch(op, "integer", line)),
        }
    }

    /// Consumes the value and returns the quotation body, or a
    /// `TypeMismatch` naming `op`.
    pub fn into_quotation(self, op: char, line: usize) -> EvalResult<Rc<[Instruction]>> {
        match self {
            Self::Quotation(body) => Ok(body),
            _ => Err(self.mismatch(op, "quotation", line)),
        }
    }

    /// Returns the variable slot, or a `TypeMismatch` naming `op`.
    pub fn as_name(&self, op: char, line: usize) -> EvalResult<Variable> {
        match self {
            Self::Name(name) => Ok(*name),
            _ => Err(self.mismatch(op, "variable name", line)),
        }
    }

    /// Interprets the value as a condition: any nonzero integer is true.
    pub fn is_truthy(&self, op: char, line: usize) -> EvalResult<bool> {
        Ok(self.as_integer(op, line)? != 0)
    }

    fn mismatch(&self, op: char, expected: &'static str, line: usize) -> RuntimeError {
        RuntimeError::TypeMismatch { op,
                                     expected,
                                     found: self.kind(),
                                     line }
    }
}

/// Diagnostic rendering; quotations are shown as an opaque marker.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Quotation(_) => write!(f, "<quotation>"),
            Self::Name(name) => write!(f, "<var {name}>"),
        }
    }
}
