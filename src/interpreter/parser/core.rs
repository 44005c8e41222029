use std::iter::Peekable;

use tracing::{debug, warn};

use crate::{
    ast::Instruction,
    error::ParseError,
    interpreter::{lexer::{Token, tokenize},
                  parser::quotation::parse_quotation},
};

/// Result type used throughout the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses program text into the top-level instruction sequence.
///
/// A `]` with no matching `[` ends the program; anything after it is ignored.
///
/// # Errors
/// - `MalformedLiteral` if the text ends in a `'`.
/// - `UnterminatedString` if a `"` is never closed.
/// - `LiteralTooLarge` if an integer literal overflows.
///
/// # Example
/// ```
/// use falsey::{ast::Instruction, interpreter::parser::parse};
///
/// let program = parse("1 [2]").unwrap();
/// assert_eq!(program.len(), 2);
/// assert!(matches!(program[1], Instruction::Quotation { .. }));
/// ```
pub fn parse(source: &str) -> ParseResult<Vec<Instruction>> {
    let tokens = tokenize(source)?;
    debug!(tokens = tokens.len(), "tokenized program");

    let mut iter = tokens.iter().peekable();
    let program = parse_sequence(&mut iter)?;

    if let Some((_, line)) = iter.peek() {
        warn!(line, "unmatched ']' ends the program; the rest is ignored");
    }
    Ok(program)
}

/// Parses instructions until a `]` or the end of the tokens.
///
/// The closing `]` is consumed; the caller decides whether it was expected.
///
/// Grammar: `sequence := instruction* ("]" | EOF)`
pub fn parse_sequence<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Instruction>>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut instructions = Vec::new();

    while let Some((token, line)) = tokens.next() {
        let line = *line;
        let instruction = match token {
            Token::Integer(value) => Instruction::IntegerLiteral { value: *value,
                                                                   line },
            Token::Character(c) => Instruction::CharacterLiteral { code: i64::from(u32::from(*c)),
                                                                   line },
            Token::DanglingQuote => return Err(ParseError::MalformedLiteral { line }),
            Token::Variable(name) => Instruction::Variable { name: *name,
                                                             line },
            Token::Str(text) => Instruction::Print { text: text.clone(),
                                                     line },
            Token::UnterminatedString => return Err(ParseError::UnterminatedString { line }),
            Token::LBracket => parse_quotation(tokens, line)?,
            Token::RBracket => break,
            Token::Primitive(op) => Instruction::Primitive { op: *op, line },
            Token::Execute(conditional) => Instruction::Execute { conditional: *conditional,
                                                                  line },
            Token::While => Instruction::While { line },
            Token::Store => Instruction::Store { line },
            Token::Load => Instruction::Load { line },
            Token::Comment | Token::NewLine | Token::Ignored => continue,
        };
        instructions.push(instruction);
    }

    Ok(instructions)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::{Primitive, Program, Variable};

    #[test]
    fn parses_flat_sequence() {
        let program = parse("1 'a b : ;").unwrap();
        assert_eq!(program,
                   vec![Instruction::IntegerLiteral { value: 1, line: 1 },
                        Instruction::CharacterLiteral { code: 97, line: 1 },
                        Instruction::Variable { name: Variable::from_letter('b').unwrap(),
                                                line: 1, },
                        Instruction::Store { line: 1 },
                        Instruction::Load { line: 1 },]);
    }

    #[test]
    fn control_opcodes_map_to_their_instructions() {
        let program = parse("!?#_").unwrap();
        assert_eq!(program,
                   vec![Instruction::Execute { conditional: false,
                                               line:        1, },
                        Instruction::Execute { conditional: true,
                                               line:        1, },
                        Instruction::While { line: 1 },
                        Instruction::Primitive { op:   Primitive::Negate,
                                                 line: 1, },]);
    }

    #[test]
    fn trailing_quote_is_malformed() {
        assert_eq!(parse("1 2 '").unwrap_err(), ParseError::MalformedLiteral { line: 1 });
    }

    #[test]
    fn unterminated_string_is_rejected() {
        assert_eq!(parse("\n\"abc").unwrap_err(), ParseError::UnterminatedString { line: 2 });
    }

    #[test]
    fn stray_closing_bracket_ends_program() {
        let program = parse("1]2 3").unwrap();
        assert_eq!(Program(&program).to_string(), "1");
    }

    #[test]
    fn reparsing_rendered_program_is_stable() {
        let source = "[$1>[$1-f;!*]?]f: 6f;!. 'x, \"done\" {note} 3_ ø ß [[[]]]";
        let first = parse(source).unwrap();
        let rendered = Program(&first).to_string();
        let second = parse(&rendered).unwrap();
        assert_eq!(Program(&second).to_string(), rendered);
    }
}
