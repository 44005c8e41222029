/// The evaluator module executes instruction trees.
///
/// The evaluator walks the instructions in order against a value stack and a
/// variable environment. Quotations run by recursing into their bodies.
///
/// # Responsibilities
/// - Executes every instruction kind, including `!`, `?` and `#`.
/// - Implements the primitive operation table.
/// - Reports runtime errors such as stack underflow or type mismatches.
pub mod evaluator;
/// Input device abstraction for the `^` primitive.
///
/// The output side needs no trait of its own; any `std::io::Write` will do.
pub mod io;
/// The lexer module tokenizes program text.
///
/// Built on `logos`. Handles the context-sensitive pieces of the syntax:
/// negative-suffixed numbers, character literals, comments and strings.
pub mod lexer;
/// The parser module builds the instruction tree from tokens.
///
/// One recursion level per quotation. The parser is pure and has no state
/// beyond the token stream.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum.
/// - Provides the checked `Stack`.
/// - Provides the variable `Environment`.
pub mod value;
