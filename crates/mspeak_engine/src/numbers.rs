//! Small numbers in words: cardinals, ordinals and simple fractions.
//!
//! Outputs never contain hyphens ("twenty one", "twenty first") so that
//! screen readers do not announce them.

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const ORDINAL_ONES: [&str; 20] = [
    "zeroth", "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth",
    "ninth", "tenth", "eleventh", "twelfth", "thirteenth", "fourteenth", "fifteenth",
    "sixteenth", "seventeenth", "eighteenth", "nineteenth",
];

const ORDINAL_TENS: [&str; 10] = [
    "", "", "twentieth", "thirtieth", "fortieth", "fiftieth", "sixtieth", "seventieth",
    "eightieth", "ninetieth",
];

/// Cardinal words for `0..1000`; larger numbers stay as digits.
pub fn cardinal(n: u32) -> String {
    match n {
        0..=19 => ONES[n as usize].to_string(),
        20..=99 => {
            let (tens, ones) = (n / 10, n % 10);
            if ones == 0 {
                TENS[tens as usize].to_string()
            } else {
                format!("{} {}", TENS[tens as usize], ONES[ones as usize])
            }
        }
        100..=999 => {
            let (hundreds, rest) = (n / 100, n % 100);
            if rest == 0 {
                format!("{} hundred", ONES[hundreds as usize])
            } else {
                format!("{} hundred {}", ONES[hundreds as usize], cardinal(rest))
            }
        }
        _ => n.to_string(),
    }
}

/// Ordinal words for `0..100`, `{n}th` style digits beyond.
pub fn ordinal(n: u32) -> String {
    match n {
        0..=19 => ORDINAL_ONES[n as usize].to_string(),
        20..=99 => {
            let (tens, ones) = (n / 10, n % 10);
            if ones == 0 {
                ORDINAL_TENS[tens as usize].to_string()
            } else {
                format!("{} {}", TENS[tens as usize], ORDINAL_ONES[ones as usize])
            }
        }
        _ => {
            let suffix = match (n % 10, n % 100) {
                (_, 11..=13) => "th",
                (1, _) => "st",
                (2, _) => "nd",
                (3, _) => "rd",
                _ => "th",
            };
            format!("{n}{suffix}")
        }
    }
}

/// Ordinal for an exponent that may be a variable: `5` is "fifth", `n` is
/// "nth".
pub fn ordinal_for(exponent: &str) -> Option<String> {
    let exponent = exponent.trim();
    if let Ok(n) = exponent.parse::<u32>() {
        return Some(ordinal(n));
    }
    let mut chars = exponent.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(format!("{c}th")),
        _ => None,
    }
}

/// "one half", "two thirds", "three quarters". `None` unless both parts are
/// small plain integers with a denominator of at least 2.
pub fn fraction_words(numerator: &str, denominator: &str) -> Option<String> {
    let num: u32 = numerator.trim().parse().ok()?;
    let den: u32 = denominator.trim().parse().ok()?;
    if !(2..=20).contains(&den) || num > 99 {
        return None;
    }
    let plural = num != 1;
    let unit = match (den, plural) {
        (2, false) => "half".to_string(),
        (2, true) => "halves".to_string(),
        (4, false) => "quarter".to_string(),
        (4, true) => "quarters".to_string(),
        (_, false) => ordinal(den),
        (_, true) => format!("{}s", ordinal(den)),
    };
    Some(format!("{} {}", cardinal(num), unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinals_have_no_hyphens() {
        assert_eq!(cardinal(0), "zero");
        assert_eq!(cardinal(21), "twenty one");
        assert_eq!(cardinal(340), "three hundred forty");
        assert_eq!(cardinal(1200), "1200");
        assert!((0..1000).all(|n| !cardinal(n).contains('-')));
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(5), "fifth");
        assert_eq!(ordinal(12), "twelfth");
        assert_eq!(ordinal(30), "thirtieth");
        assert_eq!(ordinal(42), "forty second");
        assert_eq!(ordinal(111), "111th");
        assert_eq!(ordinal(101), "101st");
        assert_eq!(ordinal_for("n").as_deref(), Some("nth"));
        assert_eq!(ordinal_for("10").as_deref(), Some("tenth"));
        assert_eq!(ordinal_for("n+1"), None);
    }

    #[test]
    fn common_fractions() {
        assert_eq!(fraction_words("1", "2").as_deref(), Some("one half"));
        assert_eq!(fraction_words("3", "2").as_deref(), Some("three halves"));
        assert_eq!(fraction_words("2", "3").as_deref(), Some("two thirds"));
        assert_eq!(fraction_words("3", "4").as_deref(), Some("three quarters"));
        assert_eq!(fraction_words("1", "10").as_deref(), Some("one tenth"));
        assert_eq!(fraction_words("1", "1"), None);
        assert_eq!(fraction_words("x", "2"), None);
        assert_eq!(fraction_words("1", "57"), None);
    }
}
