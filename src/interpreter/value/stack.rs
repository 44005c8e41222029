use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// The value stack.
///
/// Popping or peeking an empty stack is a `StackUnderflow` error; the opcode
/// and source line passed in are reported with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stack {
    items: Vec<Value>,
}

impl Stack {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Pushes a value onto the top of the stack.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.items.push(value.into());
    }

    /// Removes and returns the top value.
    ///
    /// # Example
    /// ```
    /// use falsey::interpreter::value::{core::Value, stack::Stack};
    ///
    /// let mut stack = Stack::from(vec![Value::Integer(1)]);
    /// assert_eq!(stack.pop('%', 1).unwrap(), Value::Integer(1));
    /// assert!(stack.pop('%', 1).is_err());
    /// ```
    pub fn pop(&mut self, op: char, line: usize) -> EvalResult<Value> {
        self.items.pop().ok_or(RuntimeError::StackUnderflow { op, line })
    }

    /// Returns the top value without removing it.
    pub fn peek(&self, op: char, line: usize) -> EvalResult<&Value> {
        self.items.last().ok_or(RuntimeError::StackUnderflow { op, line })
    }

    /// Returns the value `index` places below the top, `0` being the top.
    ///
    /// Callers validate `index` against [`Stack::len`] first.
    #[must_use]
    pub fn get_from_top(&self, index: usize) -> Option<&Value> {
        self.items.len()
                  .checked_sub(index + 1)
                  .and_then(|i| self.items.get(i))
    }

    /// Number of values on the stack.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the stack holds no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates from the bottom of the stack to the top.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }

    /// The values from bottom to top.
    #[must_use]
    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }
}

impl From<Vec<Value>> for Stack {
    fn from(items: Vec<Value>) -> Self {
        Self { items }
    }
}

/// Lists the values bottom to top, e.g. `[1, 2, <quotation>]`.
impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underflow_names_the_opcode() {
        let mut stack = Stack::new();
        assert!(matches!(stack.pop('$', 2), Err(RuntimeError::StackUnderflow { op: '$', line: 2 })));
        assert!(stack.peek('$', 2).is_err());
    }

    #[test]
    fn get_from_top_counts_down() {
        let stack = Stack::from(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
        assert_eq!(stack.get_from_top(0), Some(&Value::Integer(3)));
        assert_eq!(stack.get_from_top(2), Some(&Value::Integer(1)));
        assert_eq!(stack.get_from_top(3), None);
    }

    #[test]
    fn display_lists_bottom_to_top() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(-2);
        assert_eq!(stack.to_string(), "[1, -2]");
        assert_eq!(Stack::new().to_string(), "[]");
    }
}
