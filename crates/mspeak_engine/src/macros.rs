/// Registers a table of regex rules for one domain.
///
/// Each row is `id, priority, pattern, replacement, description;` where the
/// replacement is a template string or a `Replacement::Function`. Must be used
/// inside a function returning `Result<_, RuleError>`.
#[macro_export]
macro_rules! regex_rules {
    (
        $rules:expr, $domain:expr;
        $( $id:literal, $priority:literal, $pattern:literal, $replacement:expr, $desc:literal; )+
    ) => {
        $(
            $rules.add($crate::pattern::Pattern::regex(
                $id,
                $domain,
                $crate::pattern::Priority($priority),
                $pattern,
                $crate::pattern::Replacement::from($replacement),
                $desc,
            )?)?;
        )+
    };
}

/// Declares a lazily compiled `static` regex from a literal pattern.
macro_rules! static_regex {
    ($name:ident, $re:expr) => {
        static $name: ::std::sync::LazyLock<::regex::Regex> = ::std::sync::LazyLock::new(|| {
            ::regex::Regex::new($re).expect("valid regex literal")
        });
    };
}

pub(crate) use static_regex;
