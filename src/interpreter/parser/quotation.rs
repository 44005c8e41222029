use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::Instruction,
    interpreter::{lexer::Token,
                  parser::core::{ParseResult, parse_sequence}},
    util::stack::ensure_sufficient_stack,
};

/// Parses the body of a quotation after its opening `[`.
///
/// The body runs to the matching `]`. A quotation still open at the end of
/// the input is closed there without error.
///
/// Grammar: `quotation := "[" sequence`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the opening bracket.
/// - `line`: Line number of the opening bracket.
///
/// # Returns
/// An `Instruction::Quotation` owning the parsed body.
pub fn parse_quotation<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Instruction>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let body = ensure_sufficient_stack(|| parse_sequence(tokens))?;

    Ok(Instruction::Quotation { body: Rc::from(body),
                                line })
}
