//! Rewrite patterns: how a rule finds notation and what it says instead.

use std::fmt;

use mspeak_ast::DomainContext;
use regex::Regex;

use crate::error::RuleError;
use crate::scanner;

/// Rule priority. Higher runs earlier within its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriorityTier {
    Low,
    Medium,
    High,
    Critical,
}

impl PriorityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTier::Critical => "critical",
            PriorityTier::High => "high",
            PriorityTier::Medium => "medium",
            PriorityTier::Low => "low",
        }
    }
}

impl Priority {
    pub const CRITICAL: Priority = Priority(1000);
    pub const HIGH: Priority = Priority(300);
    pub const MEDIUM: Priority = Priority(200);

    pub fn tier(self) -> PriorityTier {
        if self >= Self::CRITICAL {
            PriorityTier::Critical
        } else if self >= Self::HIGH {
            PriorityTier::High
        } else if self >= Self::MEDIUM {
            PriorityTier::Medium
        } else {
            PriorityTier::Low
        }
    }

    /// Critical rules are included in every domain's rule set.
    pub fn is_critical(self) -> bool {
        self.tier() == PriorityTier::Critical
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.tier().as_str())
    }
}

/// What a matcher captured for one occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
    /// `$1..$9`: regex groups, or the braced arguments of a command, or the
    /// body of an environment.
    pub groups: Vec<String>,
    /// `[...]` argument of a command.
    pub optional: Option<String>,
    /// Environment name.
    pub name: Option<String>,
}

impl Captures {
    /// Group `n`, counting from 1. Missing groups read as empty.
    pub fn get(&self, n: usize) -> &str {
        n.checked_sub(1)
            .and_then(|i| self.groups.get(i))
            .map_or("", String::as_str)
    }

    fn from_regex(caps: &regex::Captures<'_>) -> Self {
        Self {
            groups: caps
                .iter()
                .skip(1)
                .map(|m| m.map_or_else(String::new, |m| m.as_str().to_string()))
                .collect(),
            optional: None,
            name: None,
        }
    }
}

pub type RewriteFn = fn(&Captures) -> String;

#[derive(Clone)]
pub enum Replacement {
    /// Text with `$1..$9` back-references; `$$` is a literal dollar.
    Template(String),
    Function(RewriteFn),
}

impl From<&str> for Replacement {
    fn from(template: &str) -> Self {
        Replacement::Template(template.to_string())
    }
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Replacement::Function(_) => f.write_str("Function"),
        }
    }
}

impl Replacement {
    pub fn render(&self, caps: &Captures) -> String {
        match self {
            Replacement::Template(template) => expand(template, caps),
            Replacement::Function(f) => f(caps),
        }
    }
}

fn expand(template: &str, caps: &Captures) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('$') => {
                chars.next();
                out.push('$');
            }
            Some(d @ '1'..='9') => {
                chars.next();
                out.push_str(caps.get(d as usize - '0' as usize));
            }
            _ => out.push('$'),
        }
    }
    out
}

#[derive(Debug, Clone)]
pub enum Matcher {
    /// Linear-time automaton; never backtracks.
    Regex(Regex),
    /// `\name` followed by `arity` braced arguments (and an optional `[...]`).
    Command { name: String, arity: usize },
    /// `\begin{name}...\end{name}` for any of `names`.
    Environment { names: Vec<String> },
}

impl Matcher {
    /// Human-readable source, also hashed into the rule-set revision.
    pub fn source(&self) -> String {
        match self {
            Matcher::Regex(re) => format!("regex {}", re.as_str()),
            Matcher::Command { name, arity } => format!(r"command \{name}/{arity}"),
            Matcher::Environment { names } => format!("environment {}", names.join("|")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pattern {
    pub id: String,
    pub domain: DomainContext,
    pub priority: Priority,
    pub matcher: Matcher,
    pub replacement: Replacement,
    pub description: String,
}

impl Pattern {
    pub fn regex(
        id: &str,
        domain: DomainContext,
        priority: Priority,
        pattern: &str,
        replacement: Replacement,
        description: &str,
    ) -> Result<Self, RuleError> {
        let re = Regex::new(pattern).map_err(|e| RuleError::InvalidPattern {
            id: id.to_string(),
            source: Box::new(e),
        })?;
        Ok(Self::with_matcher(
            id,
            domain,
            priority,
            Matcher::Regex(re),
            replacement,
            description,
        ))
    }

    pub fn command(
        id: &str,
        domain: DomainContext,
        priority: Priority,
        name: &str,
        arity: usize,
        replacement: Replacement,
        description: &str,
    ) -> Self {
        let matcher = Matcher::Command {
            name: name.to_string(),
            arity,
        };
        Self::with_matcher(id, domain, priority, matcher, replacement, description)
    }

    pub fn environment(
        id: &str,
        domain: DomainContext,
        priority: Priority,
        names: &[&str],
        replacement: Replacement,
        description: &str,
    ) -> Self {
        let matcher = Matcher::Environment {
            names: names.iter().map(|n| n.to_string()).collect(),
        };
        Self::with_matcher(id, domain, priority, matcher, replacement, description)
    }

    fn with_matcher(
        id: &str,
        domain: DomainContext,
        priority: Priority,
        matcher: Matcher,
        replacement: Replacement,
        description: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            domain,
            priority,
            matcher,
            replacement,
            description: description.to_string(),
        }
    }

    /// Rewrite every non-overlapping occurrence, left to right. `None` when
    /// the text is unchanged.
    pub fn rewrite(&self, text: &str) -> Option<String> {
        let out = match &self.matcher {
            Matcher::Regex(re) => {
                if !re.is_match(text) {
                    return None;
                }
                re.replace_all(text, |c: &regex::Captures<'_>| {
                    self.replacement.render(&Captures::from_regex(c))
                })
                .into_owned()
            }
            Matcher::Command { name, arity } => {
                self.rewrite_spans(text, |from| {
                    let m = scanner::find_command(text, name, *arity, from)?;
                    // Nested uses of the same command are read innermost first.
                    let caps = Captures {
                        groups: m
                            .args
                            .iter()
                            .map(|r| {
                                let arg = &text[r.clone()];
                                self.rewrite(arg).unwrap_or_else(|| arg.to_string())
                            })
                            .collect(),
                        optional: m.optional.map(|r| text[r].to_string()),
                        name: None,
                    };
                    Some((m.span.start, m.span.end, caps))
                })?
            }
            Matcher::Environment { names } => self.rewrite_spans(text, |from| {
                let m = scanner::find_environment(text, names, from)?;
                let caps = Captures {
                    groups: vec![text[m.body].to_string()],
                    optional: None,
                    name: Some(text[m.name].to_string()),
                };
                Some((m.span.start, m.span.end, caps))
            })?,
        };
        (out != text).then_some(out)
    }

    fn rewrite_spans<F>(&self, text: &str, mut next: F) -> Option<String>
    where
        F: FnMut(usize) -> Option<(usize, usize, Captures)>,
    {
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        let mut found = false;
        while let Some((start, end, caps)) = next(cursor) {
            out.push_str(&text[cursor..start]);
            out.push_str(&self.replacement.render(&caps));
            cursor = end;
            found = true;
        }
        if !found {
            return None;
        }
        out.push_str(&text[cursor..]);
        Some(out)
    }
}
