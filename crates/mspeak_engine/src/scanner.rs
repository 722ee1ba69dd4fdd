//! Balanced-brace scanners over linearized LaTeX.
//!
//! Regexes cannot match nested braces, so command and environment rules are
//! located with these single-pass scanners instead. All delimiters are ASCII,
//! which keeps every returned range on a character boundary.

use std::ops::Range;

/// A `\name[opt]{arg}...{arg}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMatch {
    pub span: Range<usize>,
    /// Inside of the `[...]` argument, brackets excluded.
    pub optional: Option<Range<usize>>,
    /// Insides of the braced arguments, braces excluded.
    pub args: Vec<Range<usize>>,
}

/// A `\begin{name}...\end{name}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentMatch {
    pub span: Range<usize>,
    pub name: Range<usize>,
    pub body: Range<usize>,
}

/// End (exclusive) of the group opened at `start`. Escaped delimiters do not
/// count.
pub fn group_end(bytes: &[u8], start: usize, open: u8, close: u8) -> Option<usize> {
    if bytes.get(start) != Some(&open) {
        return None;
    }
    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b if b == open => depth += 1,
            b if b == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn skip_spaces(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i) == Some(&b' ') {
        i += 1;
    }
    i
}

/// Position of the next `\name` (not followed by another letter) at or after
/// `from`.
fn find_control_word(text: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut search = from;
    while search < text.len() {
        let found = search + text[search..].find('\\')?;
        let name_start = found + 1;
        let name_end = name_start + name.len();
        let is_name = text
            .get(name_start..name_end)
            .is_some_and(|candidate| candidate == name)
            && !bytes.get(name_end).is_some_and(u8::is_ascii_alphabetic);
        if is_name {
            return Some((found, name_end));
        }
        // Step over escapes such as `\\` as a unit.
        let escaped = text[name_start..].chars().next().map_or(0, char::len_utf8);
        search = name_start + escaped;
    }
    None
}

/// Next occurrence of `\name` with `arity` braced arguments. Occurrences that
/// lack their arguments are skipped.
pub fn find_command(text: &str, name: &str, arity: usize, from: usize) -> Option<CommandMatch> {
    let bytes = text.as_bytes();
    let mut search = from;
    loop {
        let (start, name_end) = find_control_word(text, name, search)?;
        search = name_end;

        let mut i = skip_spaces(bytes, name_end);
        let mut optional = None;
        if bytes.get(i) == Some(&b'[') {
            if let Some(end) = group_end(bytes, i, b'[', b']') {
                optional = Some(i + 1..end - 1);
                i = skip_spaces(bytes, end);
            }
        }

        let mut args = Vec::with_capacity(arity);
        let mut end = if arity == 0 { name_end } else { i };
        for _ in 0..arity {
            let at = skip_spaces(bytes, end);
            match group_end(bytes, at, b'{', b'}') {
                Some(close) => {
                    args.push(at + 1..close - 1);
                    end = close;
                }
                None => break,
            }
        }
        if args.len() == arity {
            return Some(CommandMatch {
                span: start..end,
                optional,
                args,
            });
        }
    }
}

/// Next `\begin{name}` whose name is in `names`, together with its matching
/// `\end{name}`. Same-name nesting is balanced; unterminated environments are
/// skipped.
pub fn find_environment(text: &str, names: &[String], from: usize) -> Option<EnvironmentMatch> {
    let mut search = from;
    loop {
        let found = search + text[search..].find(r"\begin{")?;
        let name_start = found + r"\begin{".len();
        let name_len = text[name_start..].find('}')?;
        let name_end = name_start + name_len;
        let name = &text[name_start..name_end];
        search = name_end;
        if !names.iter().any(|n| n == name) {
            continue;
        }

        let open = format!(r"\begin{{{name}}}");
        let close = format!(r"\end{{{name}}}");
        let body_start = name_end + 1;
        let mut depth = 1usize;
        let mut cursor = body_start;
        while depth > 0 {
            let next_open = text[cursor..].find(&open).map(|p| cursor + p);
            let next_close = text[cursor..].find(&close).map(|p| cursor + p);
            match (next_open, next_close) {
                (Some(o), Some(c)) if o < c => {
                    depth += 1;
                    cursor = o + open.len();
                }
                (_, Some(c)) => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(EnvironmentMatch {
                            span: found..c + close.len(),
                            name: name_start..name_end,
                            body: body_start..c,
                        });
                    }
                    cursor = c + close.len();
                }
                (_, None) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_nested_command_arguments() {
        let text = r"a + \frac{\frac{1}{2}}{3} + b";
        let m = find_command(text, "frac", 2, 0).unwrap();
        assert_eq!(&text[m.span.clone()], r"\frac{\frac{1}{2}}{3}");
        assert_eq!(&text[m.args[0].clone()], r"\frac{1}{2}");
        assert_eq!(&text[m.args[1].clone()], "3");
    }

    #[test]
    fn respects_name_boundaries_and_escapes() {
        assert!(find_command(r"\fracture{a}{b}", "frac", 2, 0).is_none());
        let text = r"\sqrt{\{x\}}";
        let m = find_command(text, "sqrt", 1, 0).unwrap();
        assert_eq!(&text[m.args[0].clone()], r"\{x\}");
    }

    #[test]
    fn reads_optional_argument() {
        let text = r"\sqrt[3]{x}";
        let m = find_command(text, "sqrt", 1, 0).unwrap();
        assert_eq!(m.optional.map(|r| &text[r]), Some("3"));
        assert_eq!(&text[m.args[0].clone()], "x");
    }

    #[test]
    fn skips_occurrences_missing_arguments() {
        let text = r"\frac{1} and \frac{2}{3}";
        let m = find_command(text, "frac", 2, 0).unwrap();
        assert_eq!(&text[m.span], r"\frac{2}{3}");
    }

    #[test]
    fn balances_same_name_environments() {
        let names = vec!["pmatrix".to_string()];
        let text = r"\begin{pmatrix}\begin{pmatrix}1\end{pmatrix} & 2\end{pmatrix}!";
        let m = find_environment(text, &names, 0).unwrap();
        assert_eq!(m.span.end, text.len() - 1);
        assert_eq!(&text[m.name], "pmatrix");
        assert_eq!(&text[m.body], r"\begin{pmatrix}1\end{pmatrix} & 2");
    }

    #[test]
    fn ignores_unlisted_and_unterminated_environments() {
        let names = vec!["cases".to_string()];
        assert!(find_environment(r"\begin{align}x\end{align}", &names, 0).is_none());
        assert!(find_environment(r"\begin{cases}x", &names, 0).is_none());
    }
}
