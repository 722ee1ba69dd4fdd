//! Recursive descent over the token stream.
//!
//! Every nesting construct goes through `enter`/`leave`, so recursion depth
//! is bounded by `ParseOptions::max_depth` no matter what the guard let
//! through. Malformed input never fails the parse: missing closers are
//! supplied at end of input and reported as diagnostics.

use mspeak_ast::{Diagnostic, DiagnosticKind, StructuralNode};
use mspeak_guard::{Deadline, SafeInput};
use rustc_hash::FxHashSet;

use crate::commands;
use crate::error::ParseError;
use crate::token::{tokenize, Token};

/// Loop iterations between deadline checks.
const DEADLINE_STRIDE: usize = 256;

#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub max_depth: usize,
    pub deadline: Deadline,
}

impl ParseOptions {
    /// Options enforcing the depth limit `input` was guarded with.
    pub fn for_input(input: &SafeInput, deadline: Deadline) -> Self {
        Self {
            max_depth: input.max_depth(),
            deadline,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: mspeak_guard::GuardConfig::default().max_depth,
            deadline: Deadline::unlimited(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedExpression {
    pub tree: StructuralNode,
    /// Commands missing from the known-command table, first-seen order.
    pub unknown_commands: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn parse(input: &SafeInput, options: &ParseOptions) -> Result<ParsedExpression, ParseError> {
    options.deadline.check().map_err(timeout)?;
    let tokens = tokenize(input.text())?;
    let token_count = tokens.len();

    let mut parser = Parser::new(tokens, options);
    let children = parser.parse_sequence(Until::End)?;

    tracing::debug!(
        tokens = token_count,
        unknown = parser.unknown.len(),
        diagnostics = parser.diagnostics.len(),
        "parsed expression"
    );
    Ok(ParsedExpression {
        tree: StructuralNode::Group(children),
        unknown_commands: parser.unknown,
        diagnostics: parser.diagnostics,
    })
}

fn timeout(e: mspeak_guard::DeadlineExceeded) -> ParseError {
    ParseError::Timeout {
        elapsed_ms: e.elapsed.as_millis() as u64,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Until {
    End,
    Brace,
    Bracket,
    /// An environment cell: stops before `&`, `\\`, `\end` or `}`.
    Cell,
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    depth: usize,
    max_depth: usize,
    deadline: Deadline,
    steps: usize,
    unknown: Vec<String>,
    seen_unknown: FxHashSet<&'a str>,
    diagnostics: Vec<Diagnostic>,
    reported_unbalanced: bool,
}

impl<'a> Parser<'a> {
    fn new(tokens: Vec<Token<'a>>, options: &ParseOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth: options.max_depth,
            deadline: options.deadline,
            steps: 0,
            unknown: Vec::new(),
            seen_unknown: FxHashSet::default(),
            diagnostics: Vec::new(),
            reported_unbalanced: false,
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn tick(&mut self) -> Result<(), ParseError> {
        self.steps += 1;
        if self.steps % DEADLINE_STRIDE == 0 {
            self.deadline.check().map_err(timeout)?;
        }
        Ok(())
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::TooDeeplyNested {
                depth: self.depth,
                max: self.max_depth,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn report_unbalanced(&mut self) {
        if !self.reported_unbalanced {
            self.reported_unbalanced = true;
            self.diagnostics
                .push(Diagnostic::new(DiagnosticKind::UnbalancedDelimiter));
        }
    }

    fn record_unknown(&mut self, name: &'a str) {
        if self.seen_unknown.insert(name) {
            tracing::trace!(command = name, "unknown command");
            self.unknown.push(name.to_string());
            self.diagnostics.push(Diagnostic::unknown_command(name));
        }
    }

    fn parse_sequence(&mut self, until: Until) -> Result<Vec<StructuralNode>, ParseError> {
        let mut seq = Vec::new();
        loop {
            self.tick()?;
            let Some(tok) = self.peek() else {
                if matches!(until, Until::Brace | Until::Bracket) {
                    self.report_unbalanced();
                }
                break;
            };
            match tok {
                Token::RBrace => match until {
                    Until::Brace => {
                        self.pos += 1;
                        break;
                    }
                    Until::Cell => break,
                    Until::End | Until::Bracket => {
                        self.report_unbalanced();
                        self.pos += 1;
                    }
                },
                Token::RBracket => {
                    self.pos += 1;
                    if until == Until::Bracket {
                        break;
                    }
                    push_text(&mut seq, "]");
                }
                Token::LBracket => {
                    self.pos += 1;
                    push_text(&mut seq, "[");
                }
                Token::LBrace => {
                    self.pos += 1;
                    let group = self.parse_group_body()?;
                    seq.push(group);
                }
                Token::Text(text) => {
                    self.pos += 1;
                    push_text(&mut seq, text);
                }
                Token::Escaped(ch) => {
                    self.pos += 1;
                    seq.push(escaped(ch));
                }
                Token::Command(name) => {
                    if until == Until::Cell && name == "end" {
                        break;
                    }
                    self.pos += 1;
                    if let Some(node) = self.parse_command(name)? {
                        seq.push(node);
                    }
                }
                Token::Sub | Token::Sup => self.parse_scripts(&mut seq)?,
                Token::Align | Token::RowSep => {
                    if until == Until::Cell {
                        break;
                    }
                    self.pos += 1;
                    push_text(&mut seq, " ");
                }
            }
        }
        Ok(seq)
    }

    /// Body of a `{...}` group; the opening brace is already consumed.
    fn parse_group_body(&mut self) -> Result<StructuralNode, ParseError> {
        self.enter()?;
        let children = self.parse_sequence(Until::Brace)?;
        self.leave();
        Ok(StructuralNode::Group(children))
    }

    /// One command or script argument: a braced group, a command, or a
    /// single character. A missing argument is an empty group.
    fn parse_argument(&mut self) -> Result<StructuralNode, ParseError> {
        loop {
            self.tick()?;
            match self.peek() {
                Some(Token::Text(text)) => {
                    let trimmed = text.trim_start();
                    let Some(ch) = trimmed.chars().next() else {
                        self.pos += 1;
                        continue;
                    };
                    self.consume_text_prefix(trimmed, ch.len_utf8());
                    return Ok(StructuralNode::Leaf(ch.to_string()));
                }
                Some(Token::LBrace) => {
                    self.pos += 1;
                    return self.parse_group_body();
                }
                Some(Token::Command(name)) if name != "end" => {
                    self.pos += 1;
                    self.enter()?;
                    let node = self.parse_command(name)?;
                    self.leave();
                    return Ok(node.unwrap_or_else(|| StructuralNode::Group(Vec::new())));
                }
                Some(Token::Escaped(ch)) => {
                    self.pos += 1;
                    return Ok(escaped(ch));
                }
                _ => return Ok(StructuralNode::Group(Vec::new())),
            }
        }
    }

    /// Replace the current text token by what follows its first `len` bytes.
    fn consume_text_prefix(&mut self, text: &'a str, len: usize) {
        let rest = &text[len..];
        if rest.is_empty() {
            self.pos += 1;
        } else {
            self.tokens[self.pos] = Token::Text(rest);
        }
    }

    fn skip_blank_text(&mut self) {
        if let Some(Token::Text(text)) = self.peek() {
            if text.trim().is_empty() {
                self.pos += 1;
            }
        }
    }

    fn parse_optional(&mut self) -> Result<Option<StructuralNode>, ParseError> {
        let save = self.pos;
        self.skip_blank_text();
        if self.peek() != Some(Token::LBracket) {
            self.pos = save;
            return Ok(None);
        }
        self.pos += 1;
        self.enter()?;
        let children = self.parse_sequence(Until::Bracket)?;
        self.leave();
        Ok(Some(StructuralNode::Group(children)))
    }

    fn parse_command(&mut self, name: &'a str) -> Result<Option<StructuralNode>, ParseError> {
        match name {
            "begin" => return self.parse_environment().map(Some),
            "end" => {
                let env = self.read_braced_name();
                self.diagnostics
                    .push(Diagnostic::new(DiagnosticKind::StrayEnd(env.clone())));
                return Ok(Some(StructuralNode::command(
                    "end",
                    vec![StructuralNode::Leaf(env)],
                )));
            }
            // Sizing prefixes; the delimiter itself follows as text.
            "left" | "right" | "middle" => {
                if let Some(Token::Text(text)) = self.peek() {
                    if text.starts_with('.') {
                        self.consume_text_prefix(text, 1);
                    }
                }
                return Ok(None);
            }
            _ => {}
        }

        match commands::shape(name) {
            Some(shape) => {
                let optional_arg = if shape.optional {
                    self.parse_optional()?.map(Box::new)
                } else {
                    None
                };
                let mut args = Vec::with_capacity(shape.args);
                for _ in 0..shape.args {
                    args.push(self.parse_argument()?);
                }
                Ok(Some(StructuralNode::Command {
                    name: name.to_string(),
                    args,
                    optional_arg,
                }))
            }
            None => {
                self.record_unknown(name);
                let mut args = Vec::new();
                if self.peek() == Some(Token::LBrace) {
                    self.pos += 1;
                    args.push(self.parse_group_body()?);
                }
                Ok(Some(StructuralNode::command(name, args)))
            }
        }
    }

    /// `{name}` after `\begin` / `\end`.
    fn read_braced_name(&mut self) -> String {
        let mut name = String::new();
        self.skip_blank_text();
        if self.peek() != Some(Token::LBrace) {
            return name;
        }
        self.pos += 1;
        while let Some(tok) = self.peek() {
            self.pos += 1;
            match tok {
                Token::RBrace => break,
                Token::Text(text) | Token::Command(text) => name.push_str(text),
                Token::Escaped(ch) => name.push(ch),
                _ => {}
            }
        }
        name.trim().to_string()
    }

    fn parse_environment(&mut self) -> Result<StructuralNode, ParseError> {
        let name = self.read_braced_name();
        self.enter()?;

        if is_statement_environment(&name) {
            // Theorem titles such as `[Pythagoras]` are not read.
            self.parse_optional()?;
        }
        for _ in 0..commands::environment_args(&name) {
            self.parse_argument()?;
        }

        let mut rows = Vec::new();
        let mut row = Vec::new();
        loop {
            let cell = self.parse_sequence(Until::Cell)?;
            row.push(if is_blank(&cell) {
                StructuralNode::Group(Vec::new())
            } else {
                StructuralNode::Group(cell)
            });
            match self.peek() {
                Some(Token::Align) => self.pos += 1,
                Some(Token::RowSep) => {
                    self.pos += 1;
                    rows.push(std::mem::take(&mut row));
                }
                Some(Token::Command("end")) => {
                    self.pos += 1;
                    let closing = self.read_braced_name();
                    if closing != name {
                        self.diagnostics.push(Diagnostic::new(
                            DiagnosticKind::UnterminatedEnvironment(name.clone()),
                        ));
                    }
                    break;
                }
                _ => {
                    self.diagnostics.push(Diagnostic::new(
                        DiagnosticKind::UnterminatedEnvironment(name.clone()),
                    ));
                    break;
                }
            }
        }
        rows.push(row);
        while rows.len() > 1
            && rows
                .last()
                .is_some_and(|r| r.iter().all(StructuralNode::is_empty_group))
        {
            rows.pop();
        }

        self.leave();
        Ok(StructuralNode::Environment { name, rows })
    }

    fn parse_scripts(&mut self, seq: &mut Vec<StructuralNode>) -> Result<(), ParseError> {
        let base = pop_base(seq);
        let mut sub = None;
        let mut sup = None;
        loop {
            match self.peek() {
                Some(Token::Sub) if sub.is_none() => {
                    self.pos += 1;
                    sub = Some(Box::new(self.parse_argument()?));
                }
                Some(Token::Sup) if sup.is_none() => {
                    self.pos += 1;
                    sup = Some(Box::new(self.parse_argument()?));
                }
                _ => break,
            }
        }
        seq.push(StructuralNode::Script {
            base: Box::new(base),
            sub,
            sup,
        });
        Ok(())
    }
}

fn is_statement_environment(name: &str) -> bool {
    matches!(
        name.trim_end_matches('*'),
        "theorem"
            | "lemma"
            | "proposition"
            | "corollary"
            | "definition"
            | "example"
            | "remark"
            | "proof"
    )
}

fn is_blank(cell: &[StructuralNode]) -> bool {
    cell.iter()
        .all(|n| matches!(n, StructuralNode::Leaf(t) if t.trim().is_empty()))
}

fn escaped(ch: char) -> StructuralNode {
    StructuralNode::command(ch.to_string(), Vec::new())
}

fn push_text(seq: &mut Vec<StructuralNode>, text: &str) {
    if let Some(StructuralNode::Leaf(prev)) = seq.last_mut() {
        prev.push_str(text);
    } else {
        seq.push(StructuralNode::Leaf(text.to_string()));
    }
}

/// Detach the script base from the end of `seq`: the trailing digit run or
/// last character of a text run, or the last node otherwise.
fn pop_base(seq: &mut Vec<StructuralNode>) -> StructuralNode {
    while let Some(last) = seq.pop() {
        match last {
            StructuralNode::Leaf(mut text) => {
                let trimmed = text.trim_end().len();
                text.truncate(trimmed);
                if text.is_empty() {
                    continue;
                }
                let base = text.split_off(split_point(&text));
                if !text.is_empty() {
                    seq.push(StructuralNode::Leaf(text));
                }
                return StructuralNode::Leaf(base);
            }
            other => return other,
        }
    }
    StructuralNode::Group(Vec::new())
}

fn split_point(text: &str) -> usize {
    let digits = text.bytes().rev().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        text.len() - digits
    } else {
        text.char_indices().last().map_or(0, |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_is_trailing_number_or_last_char() {
        assert_eq!(split_point("2x"), 1);
        assert_eq!(split_point("a + 10"), 4);
        assert_eq!(split_point("é"), 0);
    }

    #[test]
    fn pop_base_skips_blank_text() {
        let mut seq = vec![
            StructuralNode::command("alpha", vec![]),
            StructuralNode::leaf("  "),
        ];
        assert_eq!(pop_base(&mut seq), StructuralNode::command("alpha", vec![]));
        assert!(seq.is_empty());
    }

    #[test]
    fn pop_base_keeps_the_prefix() {
        let mut seq = vec![StructuralNode::leaf("a + x ")];
        assert_eq!(pop_base(&mut seq), StructuralNode::leaf("x"));
        assert_eq!(seq, vec![StructuralNode::leaf("a + ")]);
    }

    #[test]
    fn empty_base_is_an_empty_group() {
        let mut seq = Vec::new();
        assert!(pop_base(&mut seq).is_empty_group());
    }
}
