use std::rc::Rc;

use logos::Logos;
use tracing::trace;

use crate::{
    ast::{Primitive, Variable},
    error::ParseError,
};

/// Represents a lexical token in the source input.
///
/// Every opcode is a single character, so most tokens are one character wide.
/// The multi-character tokens are integer literals (with their optional `_`
/// suffix), character literals, and string literals. Comments and whitespace
/// are skipped here, and so is any character the language does not assign a
/// meaning to.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Decimal literal such as `42`, or `42_` for minus forty-two.
    #[regex(r"[0-9]+_?", parse_integer)]
    Integer(i64),
    /// `'c`, the code of whatever character follows the quote.
    #[regex(r"'(.|\n)", parse_character)]
    Character(char),
    /// A `'` with nothing after it.
    #[token("'")]
    DanglingQuote,
    /// A variable slot `a` through `z`.
    #[regex(r"[a-z]", parse_variable)]
    Variable(Variable),
    /// `"text"`
    #[regex(r#""[^"]*""#, parse_string, allow_greedy = true)]
    Str(Rc<str>),
    /// A `"` that is never closed.
    #[regex(r#""[^"]*"#, allow_greedy = true)]
    UnterminatedString,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// Any primitive stack operation.
    #[token("$", |_| Primitive::Dup)]
    #[token("%", |_| Primitive::Drop)]
    #[token("\\", |_| Primitive::Swap)]
    #[token("@", |_| Primitive::Rotate)]
    #[token("ø", |_| Primitive::Pick)]
    #[token("+", |_| Primitive::Add)]
    #[token("-", |_| Primitive::Sub)]
    #[token("*", |_| Primitive::Mul)]
    #[token("/", |_| Primitive::Div)]
    #[token("_", |_| Primitive::Negate)]
    #[token("&", |_| Primitive::BitAnd)]
    #[token("|", |_| Primitive::BitOr)]
    #[token("~", |_| Primitive::Not)]
    #[token(">", |_| Primitive::Greater)]
    #[token("=", |_| Primitive::Equal)]
    #[token("^", |_| Primitive::Input)]
    #[token(",", |_| Primitive::OutputChar)]
    #[token(".", |_| Primitive::OutputDecimal)]
    #[token("ß", |_| Primitive::Flush)]
    Primitive(Primitive),
    /// `!` executes unconditionally, `?` only when the value below is truthy.
    #[token("!", |_| false)]
    #[token("?", |_| true)]
    Execute(bool),
    /// `#`
    #[token("#")]
    While,
    /// `:`
    #[token(":")]
    Store,
    /// `;`
    #[token(";")]
    Load,
    /// `{ Comments. }` An unclosed comment runs to the end of the input.
    #[regex(r"\{[^}]*\}?", |lex| {
        lex.extras.line += count_newlines(lex.slice());
        logos::Skip
    }, allow_greedy = true)]
    Comment,
    /// Line breaks.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

/// Parses an integer literal, negating it when it carries the `_` suffix.
///
/// Negated digits are parsed wide first so that `9223372036854775808_`
/// yields `i64::MIN`.
///
/// # Returns
/// - `Some(i64)`: The literal value.
/// - `None`: If the value does not fit in an `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    let slice = lex.slice();
    match slice.strip_suffix('_') {
        Some(digits) => digits.parse::<i128>()
                              .ok()
                              .and_then(|n| i64::try_from(-n).ok()),
        None => slice.parse().ok(),
    }
}

fn parse_character(lex: &mut logos::Lexer<Token>) -> Option<char> {
    let c = lex.slice()[1..].chars().next()?;
    if c == '\n' {
        lex.extras.line += 1;
    }
    Some(c)
}

fn parse_variable(lex: &logos::Lexer<Token>) -> Option<Variable> {
    lex.slice().chars().next().and_then(Variable::from_letter)
}

fn parse_string(lex: &mut logos::Lexer<Token>) -> Rc<str> {
    let slice = lex.slice();
    lex.extras.line += count_newlines(slice);
    Rc::from(&slice[1..slice.len() - 1])
}

/// Splits source text into tokens, each paired with the line it starts on.
///
/// Characters that are not part of the language are dropped without error.
///
/// # Errors
/// - `LiteralTooLarge` if an integer literal overflows an `i64`.
///
/// # Example
/// ```
/// use falsey::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("12_ 'x").unwrap();
/// assert_eq!(tokens, vec![(Token::Integer(-12), 1), (Token::Character('x'), 1)]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        let line = lexer.extras.line;
        match token {
            Ok(Token::Str(text)) => {
                let start = line - count_newlines(&text);
                tokens.push((Token::Str(text), start));
            },
            Ok(tok) => tokens.push((tok, line)),
            Err(()) => {
                let slice = lexer.slice();
                if slice.starts_with(|c: char| c.is_ascii_digit()) {
                    return Err(ParseError::LiteralTooLarge { literal: slice.to_string(),
                                                             line });
                }
                trace!(line, ignored = slice, "skipping unrecognized input");
            },
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(tok, _)| tok).collect()
    }

    #[test]
    fn underscore_after_digits_negates() {
        assert_eq!(kinds("5_ 5 _"),
                   vec![Token::Integer(-5), Token::Integer(5), Token::Primitive(Primitive::Negate)]);
    }

    #[test]
    fn quote_takes_any_following_character() {
        assert_eq!(kinds("'1'['{"),
                   vec![Token::Character('1'), Token::Character('['), Token::Character('{')]);
        assert_eq!(kinds("'"), vec![Token::DanglingQuote]);
    }

    #[test]
    fn comments_are_skipped_and_may_hold_brackets() {
        assert_eq!(kinds("1{ ] [ ' }2"), vec![Token::Integer(1), Token::Integer(2)]);
        assert_eq!(kinds("1{ never closed 2 3"), vec![Token::Integer(1)]);
    }

    #[test]
    fn strings_keep_their_text() {
        assert_eq!(kinds("\"a{b}c\""), vec![Token::Str(Rc::from("a{b}c"))]);
        assert_eq!(kinds("\"open"), vec![Token::UnterminatedString]);
    }

    #[test]
    fn unknown_characters_are_ignored() {
        assert_eq!(kinds("A 1 Z\t\r"), vec![Token::Integer(1)]);
    }

    #[test]
    fn pick_and_flush_use_non_ascii_symbols() {
        assert_eq!(kinds("øß"),
                   vec![Token::Primitive(Primitive::Pick), Token::Primitive(Primitive::Flush)]);
    }

    #[test]
    fn lines_are_tracked_through_strings_and_comments() {
        let tokens = tokenize("1\n\"a\nb\"{\n}\n2").unwrap();
        let lines: Vec<usize> = tokens.iter().map(|(_, line)| *line).collect();
        assert_eq!(lines, vec![1, 2, 5]);
    }

    #[test]
    fn oversized_literal_is_rejected() {
        let err = tokenize("99999999999999999999").unwrap_err();
        assert!(matches!(err, ParseError::LiteralTooLarge { line: 1, .. }));
        assert!(tokenize("9223372036854775808").is_err());
        assert!(tokenize("9223372036854775809_").is_err());
    }

    #[test]
    fn most_negative_literal_is_accepted() {
        assert_eq!(kinds("9223372036854775808_ 9223372036854775807"),
                   vec![Token::Integer(i64::MIN), Token::Integer(i64::MAX)]);
    }
}
