//! # falsey
//!
//! falsey is a parser and tree-walking interpreter for FALSE, a tiny
//! stack-based language built from single-character opcodes, integer and
//! character literals, bracketed code blocks ("quotations") and 26
//! single-letter variables.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use tracing::debug;

use crate::{
    config::Config,
    error::Error,
    interpreter::{evaluator::core::Context, io::CharSource, parser::parse, value::stack::Stack},
};

/// Defines the instruction tree.
///
/// This module declares the `Instruction` enum produced by the parser and
/// consumed by the evaluator, along with the closed `Primitive` opcode set and
/// the `Variable` slot type. It can also render a tree back to source text.
pub mod ast;
/// Settings that bound an evaluator run.
pub mod config;
/// Provides unified error types for parsing and evaluation.
///
/// Every error carries the source line it was raised on. None of them are
/// recovered from: the first error ends the run.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and the I/O device abstraction.
pub mod interpreter;
/// General utilities for integer handling and deep recursion.
pub mod util;

/// Parses and runs a program, returning the final stack.
///
/// Output produced by the program is written to `output`; `^` reads from
/// `input`.
///
/// # Errors
/// Returns an error if parsing fails or if any runtime error occurs.
///
/// # Examples
/// ```
/// use falsey::{interpreter::io::NoInput, run_source};
///
/// let mut out = Vec::new();
/// let stack = run_source("3 2>[42]?.", NoInput, &mut out).unwrap();
/// assert_eq!(out, b"42");
/// assert!(stack.is_empty());
///
/// // `%` on an empty stack.
/// assert!(run_source("%", NoInput, &mut out).is_err());
/// ```
pub fn run_source<I, O>(source: &str, input: I, output: O) -> Result<Stack, Error>
    where I: CharSource,
          O: Write
{
    run_source_with_config(source, input, output, Config::default())
}

/// Like [`run_source`], with explicit evaluator settings.
pub fn run_source_with_config<I, O>(source: &str,
                                    input: I,
                                    output: O,
                                    config: Config)
                                    -> Result<Stack, Error>
    where I: CharSource,
          O: Write
{
    let program = parse(source)?;
    debug!(instructions = program.len(), "parsed program");

    let mut context = Context::with_config(input, output, config);
    context.run(&program)?;

    let (stack, _) = context.into_parts();
    debug!(depth = stack.len(), "program finished");
    Ok(stack)
}
