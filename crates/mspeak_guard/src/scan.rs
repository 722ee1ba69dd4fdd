//! Single linear pass over raw input.
//!
//! Everything the guard decides is derived from one `InputProfile`, built
//! by walking the characters once. Nothing here recurses on bracket depth.

use rustc_hash::FxHashMap;

/// Commands with side effects or unbounded macro expansion.
pub const DENYLIST: &[&str] = &[
    // file and shell I/O
    "input",
    "include",
    "includeonly",
    "openin",
    "openout",
    "read",
    "readline",
    "write",
    "immediate",
    "special",
    "closein",
    "closeout",
    // macro (re)definition
    "def",
    "edef",
    "gdef",
    "xdef",
    "let",
    "futurelet",
    "newcommand",
    "renewcommand",
    "providecommand",
    "newenvironment",
    "renewenvironment",
    "DeclareMathOperator",
    "DeclareRobustCommand",
    // catcodes and expansion control
    "catcode",
    "uccode",
    "lccode",
    "mathcode",
    "csname",
    "endcsname",
    "expandafter",
    "afterassignment",
    "aftergroup",
    "noexpand",
    "loop",
    "repeat",
    "usepackage",
    "makeatletter",
];

/// Commands whose repetition or nesting multiplies downstream work.
pub const RISKY: &[&str] = &[
    "frac", "dfrac", "tfrac", "cfrac", "sqrt", "binom", "dbinom", "tbinom",
];

/// TeX's `^^` character notation can smuggle arbitrary characters.
pub const CARET_ESCAPE: &str = "^^";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct InputProfile {
    pub max_depth: usize,
    pub open_braces: usize,
    pub close_braces: usize,
    /// First denylisted construct encountered.
    pub dangerous: Option<String>,
    /// Most frequent risky command and its count.
    pub top_risky: Option<(String, usize)>,
    pub nested_risky_streak: usize,
    pub scripts: usize,
    pub non_space_chars: usize,
    pub longest_char_run: Option<(char, usize)>,
    pub longest_command_run: Option<(String, usize)>,
}

impl InputProfile {
    pub fn scan(text: &str) -> Self {
        let mut profile = InputProfile::default();
        let mut risky_counts: FxHashMap<&str, usize> = FxHashMap::default();

        let mut depth = 0usize;
        let mut run: Option<(char, usize)> = None;
        let mut last_command: Option<&str> = None;
        let mut glue_only = false;
        let mut command_run = 0usize;
        let mut last_risky_depth: Option<usize> = None;
        let mut streak = 0usize;

        let mut iter = text.char_indices().peekable();
        while let Some((i, ch)) = iter.next() {
            if ch.is_whitespace() {
                run = None;
                continue;
            }
            profile.non_space_chars += 1;
            run = match run {
                Some((c, n)) if c == ch => Some((c, n + 1)),
                _ => Some((ch, 1)),
            };
            if let Some((c, n)) = run {
                if profile.longest_char_run.map_or(true, |(_, best)| n > best) {
                    profile.longest_char_run = Some((c, n));
                }
            }

            match ch {
                '\\' => match iter.peek().copied() {
                    Some((_, next)) if next.is_ascii_alphabetic() => {
                        let start = i + 1;
                        let mut end = start;
                        while let Some(&(j, c)) = iter.peek() {
                            if !c.is_ascii_alphabetic() {
                                break;
                            }
                            end = j + c.len_utf8();
                            profile.non_space_chars += 1;
                            iter.next();
                        }
                        let name = &text[start..end];
                        run = None;

                        if profile.dangerous.is_none() && DENYLIST.contains(&name) {
                            profile.dangerous = Some(name.to_string());
                        }

                        if RISKY.contains(&name) {
                            let count = risky_counts.entry(name).or_insert(0);
                            *count += 1;
                            let count = *count;
                            if profile.top_risky.as_ref().map_or(true, |(_, best)| count > *best)
                            {
                                profile.top_risky = Some((name.to_string(), count));
                            }
                            streak = match last_risky_depth {
                                Some(prev) if depth > prev => streak + 1,
                                _ => 1,
                            };
                            last_risky_depth = Some(depth);
                            profile.nested_risky_streak = profile.nested_risky_streak.max(streak);
                        }

                        command_run = if glue_only && last_command == Some(name) {
                            command_run + 1
                        } else {
                            1
                        };
                        if profile
                            .longest_command_run
                            .as_ref()
                            .map_or(true, |(_, best)| command_run > *best)
                        {
                            profile.longest_command_run = Some((name.to_string(), command_run));
                        }
                        last_command = Some(name);
                        glue_only = true;
                    }
                    Some(_) => {
                        // Escaped symbol such as `\{` or `\\`: not a delimiter.
                        iter.next();
                        profile.non_space_chars += 1;
                        run = None;
                        glue_only = false;
                    }
                    None => {}
                },
                '{' => {
                    profile.open_braces += 1;
                    depth += 1;
                }
                '}' => {
                    profile.close_braces += 1;
                    depth = depth.saturating_sub(1);
                }
                '[' | '(' => {
                    depth += 1;
                    glue_only = false;
                }
                ']' | ')' => {
                    depth = depth.saturating_sub(1);
                    glue_only = false;
                }
                '_' | '^' => {
                    profile.scripts += 1;
                    glue_only = false;
                    if ch == '^'
                        && profile.dangerous.is_none()
                        && matches!(iter.peek(), Some(&(_, '^')))
                    {
                        profile.dangerous = Some(CARET_ESCAPE.to_string());
                    }
                }
                _ => glue_only = false,
            }
            profile.max_depth = profile.max_depth.max(depth);
        }

        profile
    }

    pub fn brace_imbalance(&self) -> usize {
        self.open_braces.abs_diff(self.close_braces)
    }

    pub fn script_density(&self) -> f64 {
        if self.non_space_chars == 0 {
            0.0
        } else {
            self.scripts as f64 / self.non_space_chars as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_ignores_escaped_delimiters() {
        let p = InputProfile::scan(r"\{ \{ \{ x \}");
        assert_eq!(p.max_depth, 0);
        assert_eq!(p.open_braces, 0);

        let p = InputProfile::scan("{[(x)]}");
        assert_eq!(p.max_depth, 3);
    }

    #[test]
    fn finds_denylisted_commands_by_whole_name() {
        assert_eq!(
            InputProfile::scan(r"x + \input{secret}").dangerous.as_deref(),
            Some("input")
        );
        assert_eq!(InputProfile::scan(r"\inputx + \letter").dangerous, None);
        assert_eq!(
            InputProfile::scan("x^^5c").dangerous.as_deref(),
            Some(CARET_ESCAPE)
        );
    }

    #[test]
    fn counts_risky_commands_and_nesting() {
        let p = InputProfile::scan(r"\frac{\frac{\frac{1}{2}}{3}}{4} + \frac{a}{b}");
        assert_eq!(p.top_risky, Some(("frac".to_string(), 4)));
        assert_eq!(p.nested_risky_streak, 3);
    }

    #[test]
    fn sibling_fractions_do_not_form_a_streak() {
        let p = InputProfile::scan(r"\frac{a}{b} + \frac{c}{d} + \frac{e}{f}");
        assert_eq!(p.nested_risky_streak, 1);
    }

    #[test]
    fn command_runs_allow_only_brace_glue() {
        let p = InputProfile::scan(r"\sqrt{\sqrt{\sqrt{x}}}");
        assert_eq!(p.longest_command_run, Some(("sqrt".to_string(), 3)));

        let p = InputProfile::scan(r"\alpha + \alpha + \alpha");
        assert_eq!(p.longest_command_run, Some(("alpha".to_string(), 1)));
    }

    #[test]
    fn tracks_character_runs_and_scripts() {
        let p = InputProfile::scan("x^2 + aaaaa");
        assert_eq!(p.longest_char_run, Some(('a', 5)));
        assert_eq!(p.scripts, 1);
        assert!(p.script_density() > 0.0);
    }
}
