use std::io::Write;

use tracing::trace;

use crate::{
    ast::Instruction,
    config::Config,
    error::RuntimeError,
    interpreter::{
        io::CharSource,
        value::{core::Value, environment::Environment, stack::Stack},
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the runtime evaluation context.
///
/// A `Context` owns the value stack and the variable environment for one run,
/// along with the input device and output sink the I/O primitives use. Both
/// the stack and the environment persist across calls to [`Context::run`],
/// so a program may be executed in pieces.
///
/// ## Usage
///
/// ```
/// use falsey::interpreter::{evaluator::core::Context, io::NoInput, parser::parse};
///
/// let program = parse("6 7*.").unwrap();
/// let mut context = Context::new(NoInput, Vec::new());
/// context.run(&program).unwrap();
/// assert_eq!(context.output(), b"42");
/// ```
pub struct Context<I, O> {
    /// The value stack.
    pub stack:     Stack,
    /// Variable slots `a` through `z`.
    pub variables: Environment,
    pub(crate) input:  I,
    pub(crate) output: O,
    config:        Config,
    depth:         usize,
}

impl<I: CharSource, O: Write> Context<I, O> {
    /// Creates a context with an empty stack, unbound variables and the
    /// default [`Config`].
    pub fn new(input: I, output: O) -> Self {
        Self::with_config(input, output, Config::default())
    }

    /// Creates a context with an empty stack and unbound variables, using
    /// `config` for the nesting limit.
    pub fn with_config(input: I, output: O, config: Config) -> Self {
        Self { stack: Stack::new(),
               variables: Environment::new(),
               input,
               output,
               config,
               depth: 0 }
    }

    /// Replaces the stack the run starts from.
    #[must_use]
    pub fn with_stack(mut self, stack: Stack) -> Self {
        self.stack = stack;
        self
    }

    /// The output sink, including anything the program has written so far.
    #[must_use]
    pub const fn output(&self) -> &O {
        &self.output
    }

    /// Consumes the context, returning the final stack and the output sink.
    pub fn into_parts(self) -> (Stack, O) {
        (self.stack, self.output)
    }

    /// Executes a sequence of instructions in order.
    ///
    /// Stops at the first error; the stack and variables keep whatever changes
    /// the instructions before it made.
    ///
    /// # Errors
    /// Any `RuntimeError` raised by an instruction.
    pub fn run(&mut self, instructions: &[Instruction]) -> EvalResult<()> {
        for instruction in instructions {
            self.exec(instruction)?;
        }
        Ok(())
    }

    /// Executes a quotation body one level deeper.
    ///
    /// # Parameters
    /// - `body`: The quotation's instructions.
    /// - `line`: Line of the instruction that triggered the call, for errors.
    pub(crate) fn run_nested(&mut self, body: &[Instruction], line: usize) -> EvalResult<()> {
        if self.depth >= self.config.max_depth {
            return Err(RuntimeError::RecursionLimit { limit: self.config.max_depth,
                                                      line });
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| self.run(body));
        self.depth -= 1;
        result
    }

    fn exec(&mut self, instruction: &Instruction) -> EvalResult<()> {
        match instruction {
            Instruction::Quotation { body, line } => {
                trace!(line, depth = self.stack.len(), len = body.len(), "push quotation");
            },
            _ => trace!(line = instruction.line(), depth = self.stack.len(), "exec {instruction}"),
        }

        match instruction {
            Instruction::IntegerLiteral { value, .. } => self.stack.push(*value),
            Instruction::CharacterLiteral { code, .. } => self.stack.push(*code),
            Instruction::Variable { name, .. } => self.stack.push(*name),
            Instruction::Quotation { body, .. } => {
                self.stack.push(Value::Quotation(body.clone()));
            },
            Instruction::Print { text, line } => {
                self.output
                    .write_all(text.as_bytes())
                    .map_err(|source| RuntimeError::Io { source,
                                                         line: *line })?;
            },
            Instruction::Primitive { op, line } => self.eval_primitive(*op, *line)?,
            Instruction::Execute { conditional, line } => self.eval_execute(*conditional, *line)?,
            Instruction::While { line } => self.eval_while(*line)?,
            Instruction::Store { line } => {
                let name = self.stack.pop(':', *line)?.as_name(':', *line)?;
                let value = self.stack.pop(':', *line)?;
                self.variables.store(name, value);
            },
            Instruction::Load { line } => {
                let name = self.stack.pop(';', *line)?.as_name(';', *line)?;
                let value = self.variables.load(name, *line)?;
                self.stack.push(value);
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        ast::Variable,
        interpreter::{io::NoInput, parser::parse},
    };

    fn run(source: &str) -> (EvalResult<()>, Context<NoInput, Vec<u8>>) {
        let program = parse(source).unwrap();
        let mut context = Context::new(NoInput, Vec::new());
        let result = context.run(&program);
        (result, context)
    }

    #[test]
    fn variable_reference_pushes_a_name_token() {
        let (result, context) = run("x");
        result.unwrap();
        assert_eq!(context.stack.into_vec(), vec![Value::Name(Variable::from_letter('x').unwrap())]);
    }

    #[test]
    fn store_binds_value_below_the_name() {
        let (result, context) = run("[1]q: 7 z:");
        result.unwrap();
        assert!(context.stack.is_empty());
        let q = context.variables.get(Variable::from_letter('q').unwrap());
        assert!(matches!(q, Some(Value::Quotation(_))));
        assert_eq!(context.variables.get(Variable::from_letter('z').unwrap()),
                   Some(&Value::Integer(7)));
    }

    #[test]
    fn load_of_unset_slot_fails() {
        let (result, _) = run("b;");
        assert!(matches!(result, Err(RuntimeError::UnboundVariable { name: 'b', .. })));
    }

    #[test]
    fn store_requires_a_name() {
        let (result, _) = run("1 2:");
        assert!(matches!(result, Err(RuntimeError::TypeMismatch { op: ':', .. })));
    }

    #[test]
    fn print_literal_writes_verbatim() {
        let (result, context) = run("\"hi\n\"");
        result.unwrap();
        assert_eq!(context.output(), b"hi\n");
    }

    #[test]
    fn state_persists_between_runs() {
        let mut context = Context::new(NoInput, Vec::new());
        context.run(&parse("5a:").unwrap()).unwrap();
        context.run(&parse("a;a;+").unwrap()).unwrap();
        assert_eq!(context.stack.into_vec(), vec![Value::Integer(10)]);
    }

    #[test]
    fn starts_from_a_given_stack() {
        let stack = Stack::from(vec![Value::Integer(2), Value::Integer(3)]);
        let mut context = Context::new(NoInput, Vec::new()).with_stack(stack);
        context.run(&parse("*").unwrap()).unwrap();
        assert_eq!(context.into_parts().0.into_vec(), vec![Value::Integer(6)]);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn tracing_a_quotation_push_does_not_render_its_body() {
        let depth = 50_000;
        let source = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
        let program = parse(&source).unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt().with_max_level(tracing::Level::TRACE)
                                                  .with_ansi(false)
                                                  .with_writer(move || writer.clone())
                                                  .finish();
        let mut context = Context::new(NoInput, Vec::new());
        tracing::subscriber::with_default(subscriber, || context.run(&program)).unwrap();

        let log = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(log.contains("push quotation"));
        assert!(log.len() < 1_000, "trace output grew with the body: {} bytes", log.len());
    }

    #[test]
    fn recursion_limit_is_enforced() {
        let program = parse("[r;!]r: r;!").unwrap();
        let mut context = Context::with_config(NoInput, Vec::new(), Config { max_depth: 50 });
        let result = context.run(&program);
        assert!(matches!(result, Err(RuntimeError::RecursionLimit { limit: 50, .. })));
    }
}
