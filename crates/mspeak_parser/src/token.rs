//! nom tokenizer for the sanitized LaTeX subset.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, satisfy},
    combinator::{map, value},
    sequence::preceded,
    IResult,
};

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal run: letters, digits, operators and spaces.
    Text(&'a str),
    /// `\name`
    Command(&'a str),
    /// `\{`, `\%`, `\|` and other single-symbol escapes.
    Escaped(char),
    /// `\\`
    RowSep,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Sub,
    Sup,
    Align,
}

const SPECIAL: &[char] = &['\\', '{', '}', '[', ']', '_', '^', '&'];

fn is_text(c: char) -> bool {
    !SPECIAL.contains(&c)
}

fn command(input: &str) -> IResult<&str, Token<'_>> {
    map(
        preceded(char('\\'), take_while1(|c: char| c.is_ascii_alphabetic())),
        Token::Command,
    )(input)
}

fn row_sep(input: &str) -> IResult<&str, Token<'_>> {
    value(Token::RowSep, tag("\\\\"))(input)
}

fn escaped(input: &str) -> IResult<&str, Token<'_>> {
    map(
        preceded(char('\\'), satisfy(|c| !c.is_ascii_alphabetic())),
        Token::Escaped,
    )(input)
}

fn punct(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        value(Token::LBrace, char('{')),
        value(Token::RBrace, char('}')),
        value(Token::LBracket, char('[')),
        value(Token::RBracket, char(']')),
        value(Token::Sub, char('_')),
        value(Token::Sup, char('^')),
        value(Token::Align, char('&')),
    ))(input)
}

fn text(input: &str) -> IResult<&str, Token<'_>> {
    map(take_while1(is_text), Token::Text)(input)
}

fn token(input: &str) -> IResult<&str, Token<'_>> {
    alt((row_sep, command, escaped, punct, text))(input)
}

/// Split `input` into tokens. Whitespace stays inside `Text` runs.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let mut tokens = Vec::with_capacity(input.len() / 2 + 1);
    let mut remaining = input;

    while !remaining.is_empty() {
        match token(remaining) {
            Ok((rest, tok)) => {
                tokens.push(tok);
                remaining = rest;
            }
            Err(_) => {
                // A lone trailing backslash is the only input no branch accepts.
                if remaining == "\\" {
                    break;
                }
                return Err(ParseError::Tokenize(remaining.chars().take(20).collect()));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_commands_scripts_and_groups() {
        let tokens = tokenize(r"\frac{1}{2} + x^2").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Command("frac"),
                Token::LBrace,
                Token::Text("1"),
                Token::RBrace,
                Token::LBrace,
                Token::Text("2"),
                Token::RBrace,
                Token::Text(" + x"),
                Token::Sup,
                Token::Text("2"),
            ]
        );
    }

    #[test]
    fn distinguishes_row_separators_from_escapes() {
        let tokens = tokenize(r"a & b \\ \{c\}").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Text("a "),
                Token::Align,
                Token::Text(" b "),
                Token::RowSep,
                Token::Text(" "),
                Token::Escaped('{'),
                Token::Text("c"),
                Token::Escaped('}'),
            ]
        );
    }

    #[test]
    fn trailing_backslash_is_dropped() {
        assert_eq!(tokenize("x\\").unwrap(), vec![Token::Text("x")]);
    }
}
