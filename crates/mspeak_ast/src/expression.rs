//! Input value handed to the engine by every front end.

use crate::domain::DomainContext;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered vocabulary register, from least to most formal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum AudienceLevel {
    Elementary,
    HighSchool,
    #[default]
    Undergraduate,
    Graduate,
    Research,
}

impl AudienceLevel {
    pub const ALL: [AudienceLevel; 5] = [
        AudienceLevel::Elementary,
        AudienceLevel::HighSchool,
        AudienceLevel::Undergraduate,
        AudienceLevel::Graduate,
        AudienceLevel::Research,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudienceLevel::Elementary => "elementary",
            AudienceLevel::HighSchool => "high-school",
            AudienceLevel::Undergraduate => "undergraduate",
            AudienceLevel::Graduate => "graduate",
            AudienceLevel::Research => "research",
        }
    }
}

impl fmt::Display for AudienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognised audience or domain names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName {
    pub what: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.what, self.value)
    }
}

impl std::error::Error for UnknownName {}

impl FromStr for AudienceLevel {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "elementary" | "primary" => Ok(AudienceLevel::Elementary),
            "high-school" | "highschool" | "secondary" => Ok(AudienceLevel::HighSchool),
            "undergraduate" | "undergrad" | "college" => Ok(AudienceLevel::Undergraduate),
            "graduate" | "grad" => Ok(AudienceLevel::Graduate),
            "research" | "expert" => Ok(AudienceLevel::Research),
            _ => Err(UnknownName {
                what: "audience level",
                value: s.to_string(),
            }),
        }
    }
}

/// Raw LaTeX plus the rendering options that travel with it.
///
/// The value is immutable once built; the non-empty / length / balance
/// invariants are enforced by the resource guard, not by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expression {
    latex: String,
    audience: AudienceLevel,
    domain_hint: Option<DomainContext>,
}

impl Expression {
    pub fn new(latex: impl Into<String>) -> Self {
        Self {
            latex: latex.into(),
            audience: AudienceLevel::default(),
            domain_hint: None,
        }
    }

    pub fn with_audience(mut self, audience: AudienceLevel) -> Self {
        self.audience = audience;
        self
    }

    pub fn with_domain_hint(mut self, hint: Option<DomainContext>) -> Self {
        self.domain_hint = hint;
        self
    }

    pub fn latex(&self) -> &str {
        &self.latex
    }

    pub fn audience(&self) -> AudienceLevel {
        self.audience
    }

    pub fn domain_hint(&self) -> Option<DomainContext> {
        self.domain_hint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audience_levels_are_ordered() {
        assert!(AudienceLevel::Elementary < AudienceLevel::HighSchool);
        assert!(AudienceLevel::Graduate < AudienceLevel::Research);
        assert_eq!(AudienceLevel::default(), AudienceLevel::Undergraduate);
    }

    #[test]
    fn audience_parses_common_spellings() {
        assert_eq!(
            "High School".parse::<AudienceLevel>().unwrap(),
            AudienceLevel::HighSchool
        );
        assert_eq!(
            "highschool".parse::<AudienceLevel>().unwrap(),
            AudienceLevel::HighSchool
        );
        assert_eq!(
            "RESEARCH".parse::<AudienceLevel>().unwrap(),
            AudienceLevel::Research
        );
        assert!("kindergarten".parse::<AudienceLevel>().is_err());
    }

    #[test]
    fn builder_keeps_options() {
        let expr = Expression::new("x^2")
            .with_audience(AudienceLevel::Graduate)
            .with_domain_hint(Some(DomainContext::Calculus));
        assert_eq!(expr.latex(), "x^2");
        assert_eq!(expr.audience(), AudienceLevel::Graduate);
        assert_eq!(expr.domain_hint(), Some(DomainContext::Calculus));
    }
}
