//! Removal of presentational and hidden content from accepted input.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::scan::DENYLIST;

/// Commands that only affect layout, taking one braced argument.
const ELIDED_WITH_ARG: &[&str] = &[
    "label", "tag", "vspace", "hspace", "phantom", "hphantom", "vphantom",
];

/// Commands that only affect layout, taking no argument.
const ELIDED_BARE: &[&str] = &[
    "displaystyle",
    "textstyle",
    "scriptstyle",
    "scriptscriptstyle",
    "limits",
    "nolimits",
    "nonumber",
    "notag",
    "quad",
    "qquad",
    "big",
    "Big",
    "bigg",
    "Bigg",
    "bigl",
    "bigr",
    "Bigl",
    "Bigr",
];

/// Spacing escapes such as `\,`.
const SPACING: &[char] = &[',', ';', ':', '!', ' '];

/// Denylisted invocations may carry up to this many braced arguments.
const MAX_ELIDED_ARGS: usize = 3;

type Cursor<'a> = Peekable<CharIndices<'a>>;

/// Returns the cleaned text and, when `elide_dangerous` is set, the names of
/// the denylisted commands that were dropped.
pub fn sanitize(text: &str, elide_dangerous: bool) -> (String, Vec<String>) {
    let mut out = String::with_capacity(text.len());
    let mut elided = Vec::new();
    let mut iter = text.char_indices().peekable();

    while let Some((i, ch)) = iter.next() {
        match ch {
            '%' => {
                for (_, c) in iter.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
                out.push(' ');
            }
            '\\' => match iter.peek().copied() {
                Some((_, next)) if next.is_ascii_alphabetic() => {
                    let name = read_name(text, i + 1, &mut iter);
                    if ELIDED_WITH_ARG.contains(&name) {
                        skip_group(&mut iter);
                        out.push(' ');
                    } else if ELIDED_BARE.contains(&name) {
                        out.push(' ');
                    } else if elide_dangerous && DENYLIST.contains(&name) {
                        elided.push(name.to_string());
                        skip_control_word(&mut iter);
                        for _ in 0..MAX_ELIDED_ARGS {
                            if !skip_group(&mut iter) {
                                break;
                            }
                        }
                        out.push(' ');
                    } else {
                        out.push('\\');
                        out.push_str(name);
                        // Keep `\alpha x` from fusing into `\alphax`.
                        if matches!(iter.peek(), Some(&(_, c)) if c.is_ascii_alphabetic() || c.is_whitespace())
                        {
                            out.push(' ');
                        }
                    }
                }
                Some((_, next)) if SPACING.contains(&next) => {
                    iter.next();
                    out.push(' ');
                }
                Some((_, next)) => {
                    iter.next();
                    if !is_hidden(next) {
                        out.push('\\');
                        out.push(next);
                    }
                }
                None => {}
            },
            '\n' | '\r' | '\t' => out.push(' '),
            c if is_hidden(c) => {}
            c => out.push(c),
        }
    }

    (mspeak_ast::collapse_whitespace(&out), elided)
}

fn read_name<'a>(text: &'a str, start: usize, iter: &mut Cursor<'a>) -> &'a str {
    let mut end = start;
    while let Some(&(j, c)) = iter.peek() {
        if !c.is_ascii_alphabetic() {
            break;
        }
        end = j + c.len_utf8();
        iter.next();
    }
    &text[start..end]
}

/// Skips the macro name following `\def`-like commands.
fn skip_control_word(iter: &mut Cursor<'_>) {
    while matches!(iter.peek(), Some(&(_, c)) if c.is_whitespace()) {
        iter.next();
    }
    if !matches!(iter.peek(), Some(&(_, '\\'))) {
        return;
    }
    iter.next();
    while matches!(iter.peek(), Some(&(_, c)) if c.is_ascii_alphabetic()) {
        iter.next();
    }
}

/// Skips leading whitespace and one balanced `{…}` group. Returns whether a
/// group was consumed.
fn skip_group(iter: &mut Cursor<'_>) -> bool {
    while matches!(iter.peek(), Some(&(_, c)) if c.is_whitespace()) {
        iter.next();
    }
    if !matches!(iter.peek(), Some(&(_, '{'))) {
        return false;
    }
    iter.next();
    let mut depth = 1usize;
    while let Some((_, c)) = iter.next() {
        match c {
            '\\' => {
                iter.next();
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
    }
    true
}

/// Control and invisible formatting characters.
fn is_hidden(c: char) -> bool {
    c.is_control()
        || matches!(c,
            '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{2069}'
            | '\u{FEFF}')
}
