use std::io::Write;

use tracing::debug;

use crate::{
    ast::Primitive,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        io::CharSource,
    },
    util::num::{bool_to_int, code_to_char, floor_div, pick_index},
};

impl<I: CharSource, O: Write> Context<I, O> {
    /// Evaluates a primitive operation against the stack.
    ///
    /// Shuffling primitives (`$ % \ @ ø`) move values of any kind. Arithmetic,
    /// comparison and bitwise primitives need integers; binary ones pop `b`
    /// then `a` and push `op(a, b)`. Comparisons and `~` push `-1` for true and
    /// `0` for false.
    ///
    /// # Parameters
    /// - `op`: The primitive.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// - `StackUnderflow` when an operand is missing.
    /// - `TypeMismatch` when an integer operand is something else.
    /// - `IndexOutOfRange` for `ø` past the bottom of the stack.
    /// - `DivisionByZero`, `Overflow` from arithmetic.
    /// - `InvalidCharacter` for `,` on a non-character code.
    /// - `Io` if the output sink fails.
    pub fn eval_primitive(&mut self, op: Primitive, line: usize) -> EvalResult<()> {
        let sym = op.symbol();
        match op {
            Primitive::Dup => {
                let top = self.stack.peek(sym, line)?.clone();
                self.stack.push(top);
            },
            Primitive::Drop => {
                self.stack.pop(sym, line)?;
            },
            Primitive::Swap => {
                let b = self.stack.pop(sym, line)?;
                let a = self.stack.pop(sym, line)?;
                self.stack.push(b);
                self.stack.push(a);
            },
            Primitive::Rotate => {
                let c = self.stack.pop(sym, line)?;
                let b = self.stack.pop(sym, line)?;
                let a = self.stack.pop(sym, line)?;
                self.stack.push(b);
                self.stack.push(c);
                self.stack.push(a);
            },
            Primitive::Pick => {
                let index = self.stack.pop(sym, line)?.as_integer(sym, line)?;
                let i = pick_index(index, self.stack.len(), line)?;
                let value = self.stack
                                .get_from_top(i)
                                .cloned()
                                .ok_or(RuntimeError::IndexOutOfRange { index,
                                                                       depth: self.stack.len(),
                                                                       line })?;
                self.stack.push(value);
            },
            Primitive::Add => self.binary(sym, line, |a, b| a.checked_add(b))?,
            Primitive::Sub => self.binary(sym, line, |a, b| a.checked_sub(b))?,
            Primitive::Mul => self.binary(sym, line, |a, b| a.checked_mul(b))?,
            Primitive::Div => {
                let b = self.pop_integer(sym, line)?;
                let a = self.pop_integer(sym, line)?;
                self.stack.push(floor_div(a, b, line)?);
            },
            Primitive::BitAnd => self.binary(sym, line, |a, b| Some(a & b))?,
            Primitive::BitOr => self.binary(sym, line, |a, b| Some(a | b))?,
            Primitive::Greater => self.binary(sym, line, |a, b| Some(bool_to_int(a > b)))?,
            Primitive::Equal => self.binary(sym, line, |a, b| Some(bool_to_int(a == b)))?,
            Primitive::Negate => {
                let a = self.pop_integer(sym, line)?;
                let negated = a.checked_neg()
                               .ok_or(RuntimeError::Overflow { op: sym, line })?;
                self.stack.push(negated);
            },
            Primitive::Not => {
                let a = self.pop_integer(sym, line)?;
                self.stack.push(bool_to_int(a == 0));
            },
            Primitive::Input => {
                let code = self.read_input(line)?;
                self.stack.push(code);
            },
            Primitive::OutputChar => {
                let c = code_to_char(self.pop_integer(sym, line)?, line)?;
                let mut buf = [0u8; 4];
                self.write(c.encode_utf8(&mut buf).as_bytes(), line)?;
            },
            Primitive::OutputDecimal => {
                let n = self.pop_integer(sym, line)?;
                self.write(n.to_string().as_bytes(), line)?;
            },
            Primitive::Flush => {
                CharSource::flush(&mut self.input).map_err(|source| RuntimeError::Io { source,
                                                                                      line })?;
                self.output
                    .flush()
                    .map_err(|source| RuntimeError::Io { source, line })?;
            },
        }
        Ok(())
    }

    fn pop_integer(&mut self, op: char, line: usize) -> EvalResult<i64> {
        self.stack.pop(op, line)?.as_integer(op, line)
    }

    /// Pops `b` then `a` and pushes `f(a, b)`; `None` from `f` is an overflow.
    fn binary(&mut self,
              op: char,
              line: usize,
              f: impl FnOnce(i64, i64) -> Option<i64>)
              -> EvalResult<()> {
        let b = self.pop_integer(op, line)?;
        let a = self.pop_integer(op, line)?;
        let result = f(a, b).ok_or(RuntimeError::Overflow { op, line })?;
        self.stack.push(result);
        Ok(())
    }

    /// Reads one character code from the input device.
    ///
    /// Pending output is flushed first so that prompts are visible. End of
    /// input and device errors both yield `-1`.
    fn read_input(&mut self, line: usize) -> EvalResult<i64> {
        self.output
            .flush()
            .map_err(|source| RuntimeError::Io { source, line })?;

        match self.input.read_char() {
            Ok(Some(c)) => Ok(i64::from(u32::from(c))),
            Ok(None) => Ok(-1),
            Err(e) => {
                debug!(line, error = %e, "input device failed; pushing -1");
                Ok(-1)
            },
        }
    }

    fn write(&mut self, bytes: &[u8], line: usize) -> EvalResult<()> {
        self.output
            .write_all(bytes)
            .map_err(|source| RuntimeError::Io { source, line })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        error::RuntimeError,
        interpreter::{
            evaluator::core::{Context, EvalResult},
            io::{NoInput, ReaderSource},
            parser::parse,
            value::core::Value,
        },
    };

    fn run(source: &str) -> (EvalResult<()>, Vec<Value>, String) {
        run_with_input(source, "")
    }

    fn run_with_input(source: &str, input: &str) -> (EvalResult<()>, Vec<Value>, String) {
        let program = parse(source).unwrap();
        let mut context = Context::new(ReaderSource::new(input.as_bytes()), Vec::new());
        let result = context.run(&program);
        let (stack, output) = context.into_parts();
        (result, stack.into_vec(), String::from_utf8(output).unwrap())
    }

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Integer).collect()
    }

    #[test]
    fn shuffles() {
        assert_eq!(run("1$").1, ints(&[1, 1]));
        assert_eq!(run("1 2%").1, ints(&[1]));
        assert_eq!(run("1 2\\").1, ints(&[2, 1]));
        assert_eq!(run("1 2 3@").1, ints(&[2, 3, 1]));
    }

    #[test]
    fn shuffles_move_quotations_too() {
        let (result, stack, _) = run("[1] 2\\");
        result.unwrap();
        assert_eq!(stack[0], Value::Integer(2));
        assert!(matches!(stack[1], Value::Quotation(_)));
    }

    #[test]
    fn pick_copies_from_below() {
        assert_eq!(run("10 20 30 0ø").1, ints(&[10, 20, 30, 30]));
        assert_eq!(run("10 20 30 2ø").1, ints(&[10, 20, 30, 10]));
    }

    #[test]
    fn pick_out_of_range() {
        let (result, ..) = run("1 2 3 5ø");
        assert!(matches!(result, Err(RuntimeError::IndexOutOfRange { index: 5, depth: 3, .. })));
        let (result, ..) = run("1 2 3 3ø");
        assert!(matches!(result, Err(RuntimeError::IndexOutOfRange { index: 3, .. })));
        let (result, ..) = run("1 1_ø");
        assert!(matches!(result, Err(RuntimeError::IndexOutOfRange { index: -1, .. })));
    }

    #[test]
    fn arithmetic_operand_order() {
        assert_eq!(run("5 3-").1, ints(&[2]));
        assert_eq!(run("5 3+").1, ints(&[8]));
        assert_eq!(run("5 3*").1, ints(&[15]));
        assert_eq!(run("7_ 2/").1, ints(&[-4]));
        assert_eq!(run("7 2/").1, ints(&[3]));
        assert_eq!(run("4_").1, ints(&[-4]));
        assert_eq!(run("4_ _").1, ints(&[4]));
    }

    #[test]
    fn division_by_zero() {
        let (result, ..) = run("1 0/");
        assert!(matches!(result, Err(RuntimeError::DivisionByZero { .. })));
    }

    #[test]
    fn overflow_is_reported() {
        let (result, ..) = run("9223372036854775807 1+");
        assert!(matches!(result, Err(RuntimeError::Overflow { op: '+', .. })));
    }

    #[test]
    fn comparisons_are_canonical_booleans() {
        assert_eq!(run("3 2>").1, ints(&[-1]));
        assert_eq!(run("2 3>").1, ints(&[0]));
        assert_eq!(run("4 4=").1, ints(&[-1]));
        assert_eq!(run("0~ 5~").1, ints(&[-1, 0]));
        assert_eq!(run("3 2> 12&").1, ints(&[12]));
        assert_eq!(run("6 3&6 3|").1, ints(&[2, 7]));
    }

    #[test]
    fn arithmetic_needs_integers() {
        let (result, ..) = run("1[2]+");
        assert!(matches!(result,
                         Err(RuntimeError::TypeMismatch { op:    '+',
                                                          found: "quotation",
                                                          .. })));
    }

    #[test]
    fn binary_ops_underflow() {
        for source in ["1+", "$", "%", "1\\", "1 2@", "ø", "_", "~", ".", ","] {
            let (result, ..) = run(source);
            assert!(matches!(result, Err(RuntimeError::StackUnderflow { .. })),
                    "{source} should underflow");
        }
    }

    #[test]
    fn output_primitives() {
        let (result, _, output) = run("72,105, 42. 5_.");
        result.unwrap();
        assert_eq!(output, "Hi42-5");
    }

    #[test]
    fn invalid_character_code() {
        let (result, ..) = run("1_,");
        assert!(matches!(result, Err(RuntimeError::InvalidCharacter { code: -1, .. })));
    }

    #[test]
    fn input_reads_characters_then_minus_one() {
        let (result, stack, _) = run_with_input("^^^", "aé");
        result.unwrap();
        assert_eq!(stack, ints(&[97, 233, -1]));
    }

    #[test]
    fn input_failure_is_minus_one() {
        let (result, stack, _) = run_with_input("^", "\u{0}");
        result.unwrap();
        assert_eq!(stack, ints(&[0]));

        let program = parse("^").unwrap();
        let mut context = Context::new(ReaderSource::new(&[0xFFu8][..]), Vec::new());
        context.run(&program).unwrap();
        assert_eq!(context.stack.into_vec(), ints(&[-1]));
    }

    #[test]
    fn flush_succeeds() {
        let program = parse("\"x\"ß").unwrap();
        let mut context = Context::new(NoInput, Vec::new());
        context.run(&program).unwrap();
        assert_eq!(context.output(), b"x");
    }
}
