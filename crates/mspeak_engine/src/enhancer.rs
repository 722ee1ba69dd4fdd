//! Final polish of rewritten text: spacing, repetition, pauses, audience
//! vocabulary and capitalization. Never adds mathematical content.

use std::sync::LazyLock;

use mspeak_ast::{collapse_whitespace, AudienceLevel};
use regex::{Captures, Regex};

/// Rounds of the full pass sequence; one round is almost always enough.
const MAX_ROUNDS: usize = 4;

/// Words that may legitimately repeat back to back ("sin sin x", "x x").
const FUNCTION_WORDS: &[&str] = &[
    "sin", "cos", "tan", "sec", "csc", "cot", "sinh", "cosh", "tanh", "arcsin", "arccos",
    "arctan", "log", "ln", "exp", "det", "plus", "minus", "times", "over", "equals", "and",
    "or", "not", "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    "ten", "prime",
];

static RE_SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,.;:])").expect("valid regex literal"));

static RE_TRAILING_DIFFERENTIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^,])\s+d ([a-zA-Z])(\s*[.!?]?)$").expect("valid regex literal")
});

static RE_QUANTITY_POWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(the quantity [^,]+?)\s+(squared|cubed|to the)\b").expect("valid regex literal")
});

static RE_SENTENCE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?]\s+)([a-z])").expect("valid regex literal"));

struct Substitution {
    pattern: Regex,
    replacement: &'static str,
}

fn table(entries: &[(&str, &'static str)]) -> Vec<Substitution> {
    entries
        .iter()
        .map(|(phrase, replacement)| Substitution {
            pattern: Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase)))
                .expect("vocabulary phrases are escaped"),
            replacement,
        })
        .collect()
}

static ELEMENTARY: LazyLock<Vec<Substitution>> = LazyLock::new(|| {
    table(&[
        ("approaches", "gets closer to"),
        ("is approximately equal to", "is about"),
        ("is greater than or equal to", "is at least"),
        ("is less than or equal to", "is at most"),
    ])
});

static HIGH_SCHOOL: LazyLock<Vec<Substitution>> = LazyLock::new(|| {
    table(&[
        ("approaches", "gets closer to"),
        ("is approximately equal to", "is about"),
    ])
});

static GRADUATE: LazyLock<Vec<Substitution>> = LazyLock::new(|| {
    table(&[("approaches", "tends to"), ("for every", "for all")])
});

fn vocabulary(audience: AudienceLevel) -> &'static [Substitution] {
    match audience {
        AudienceLevel::Elementary => &ELEMENTARY,
        AudienceLevel::HighSchool => &HIGH_SCHOOL,
        AudienceLevel::Undergraduate => &[],
        AudienceLevel::Graduate | AudienceLevel::Research => &GRADUATE,
    }
}

/// Polish `text` for `audience`. Idempotent:
/// `enhance(&enhance(x, a), a) == enhance(x, a)`.
pub fn enhance(text: &str, audience: AudienceLevel) -> String {
    let mut current = text.to_string();
    for _ in 0..MAX_ROUNDS {
        let next = round(&current, audience);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn round(text: &str, audience: AudienceLevel) -> String {
    let text = normalize(text);
    let text = avoid_repetition(&text);
    let text = insert_pauses(&text);
    let text = substitute_vocabulary(&text, audience);
    capitalize(&text)
}

fn normalize(text: &str) -> String {
    let text = collapse_whitespace(text);
    RE_SPACE_BEFORE_PUNCT.replace_all(&text, "$1").into_owned()
}

fn is_function_word(word: &str) -> bool {
    word.len() == 1
        || word.chars().all(|c| c.is_ascii_digit())
        || FUNCTION_WORDS.contains(&word.to_ascii_lowercase().as_str())
}

fn avoid_repetition(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for word in text.split(' ') {
        if let Some(prev) = kept.last() {
            if prev.eq_ignore_ascii_case(word) && !is_function_word(word) {
                continue;
            }
        }
        kept.push(word);
    }
    kept.join(" ")
}

fn insert_pauses(text: &str) -> String {
    let text = RE_TRAILING_DIFFERENTIAL.replace(text, "$1, d $2$3");
    RE_QUANTITY_POWER.replace_all(&text, "$1, $2").into_owned()
}

fn substitute_vocabulary(text: &str, audience: AudienceLevel) -> String {
    vocabulary(audience)
        .iter()
        .fold(text.to_string(), |acc, s| {
            s.pattern.replace_all(&acc, s.replacement).into_owned()
        })
}

fn capitalize(text: &str) -> String {
    let text = RE_SENTENCE_START.replace_all(text, |c: &Captures<'_>| {
        format!("{}{}", &c[1], c[2].to_ascii_uppercase())
    });
    // Bare fragments stay lowercase; only full sentences start with a capital.
    if text.ends_with(['.', '!', '?']) {
        let mut chars = text.chars();
        if let Some(first) = chars.next() {
            if first.is_ascii_lowercase() {
                return format!("{}{}", first.to_ascii_uppercase(), chars.as_str());
            }
        }
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const U: AudienceLevel = AudienceLevel::Undergraduate;

    #[test]
    fn spacing_is_normalized() {
        assert_eq!(enhance("  x   plus  y , z ;  ", U), "x plus y, z;");
    }

    #[test]
    fn duplicate_words_collapse_unless_they_may_repeat() {
        assert_eq!(enhance("the the integral", U), "the integral");
        assert_eq!(enhance("sin sin x", U), "sin sin x");
        assert_eq!(enhance("x x", U), "x x");
        assert_eq!(enhance("1 1 2", U), "1 1 2");
    }

    #[test]
    fn pause_before_trailing_differential() {
        assert_eq!(
            enhance("the integral from 0 to 1 of x squared d x", U),
            "the integral from 0 to 1 of x squared, d x"
        );
        assert_eq!(enhance("f of x, d x", U), "f of x, d x");
    }

    #[test]
    fn pause_after_quantity_group() {
        assert_eq!(
            enhance("the quantity x plus 1 squared", U),
            "the quantity x plus 1, squared"
        );
    }

    #[test]
    fn audience_vocabulary() {
        let text = "x approaches 0 for every x";
        assert_eq!(
            enhance(text, AudienceLevel::Elementary),
            "x gets closer to 0 for every x"
        );
        assert_eq!(enhance(text, U), text);
        assert_eq!(
            enhance(text, AudienceLevel::Research),
            "x tends to 0 for all x"
        );
    }

    #[test]
    fn only_full_sentences_are_capitalized() {
        assert_eq!(enhance("one half", U), "one half");
        assert_eq!(enhance("x equals 1. so y equals 2.", U), "X equals 1. So y equals 2.");
    }

    #[test]
    fn replacements_never_contain_their_phrase() {
        for level in AudienceLevel::ALL {
            for s in vocabulary(level) {
                assert!(!s.pattern.is_match(s.replacement), "{}", s.replacement);
            }
        }
    }

    #[test]
    fn enhancing_twice_changes_nothing() {
        let samples = [
            "the the quantity a plus b squared d x",
            "x approaches approaches infinity.",
            "  a , b . c ",
        ];
        for level in AudienceLevel::ALL {
            for sample in samples {
                let once = enhance(sample, level);
                assert_eq!(enhance(&once, level), once);
            }
        }
    }
}
