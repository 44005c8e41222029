use std::io::Write;

use tracing::trace;

use crate::interpreter::{
    evaluator::core::{Context, EvalResult},
    io::CharSource,
};

impl<I: CharSource, O: Write> Context<I, O> {
    /// Evaluates `!` and `?`.
    ///
    /// Pops a quotation and runs it. For `?` the value beneath the quotation
    /// is popped as well, and the quotation only runs when that value is a
    /// nonzero integer.
    ///
    /// # Errors
    /// - `StackUnderflow` if the operands are missing.
    /// - `TypeMismatch` if the top is not a quotation, or the condition is not
    ///   an integer.
    /// - Anything raised by the quotation body.
    ///
    /// # Example
    /// ```
    /// use falsey::interpreter::{evaluator::core::Context, io::NoInput, parser::parse};
    ///
    /// let mut context = Context::new(NoInput, Vec::new());
    /// context.run(&parse("0[1.]? 1[2.]? [3.]!").unwrap()).unwrap();
    /// assert_eq!(context.output(), b"23");
    /// ```
    pub fn eval_execute(&mut self, conditional: bool, line: usize) -> EvalResult<()> {
        let op = if conditional { '?' } else { '!' };
        let body = self.stack.pop(op, line)?.into_quotation(op, line)?;

        if conditional && !self.stack.pop(op, line)?.is_truthy(op, line)? {
            return Ok(());
        }
        self.run_nested(&body, line)
    }

    /// Evaluates `#`.
    ///
    /// Pops the body quotation (pushed last), then the condition quotation.
    /// Runs the condition, pops its result, and stops on zero; otherwise runs
    /// the body and repeats. Both quotations are re-run from scratch on every
    /// iteration.
    ///
    /// # Errors
    /// - `StackUnderflow` if either quotation, or a condition result, is
    ///   missing.
    /// - `TypeMismatch` if either operand is not a quotation or a condition
    ///   result is not an integer.
    pub fn eval_while(&mut self, line: usize) -> EvalResult<()> {
        let body = self.stack.pop('#', line)?;
        let condition = self.stack.pop('#', line)?;
        let body = body.into_quotation('#', line)?;
        let condition = condition.into_quotation('#', line)?;

        let mut iterations: u64 = 0;
        loop {
            self.run_nested(&condition, line)?;
            if !self.stack.pop('#', line)?.is_truthy('#', line)? {
                break;
            }
            self.run_nested(&body, line)?;
            iterations += 1;
        }
        trace!(line, iterations, "loop finished");
        Ok(())
    }
}
