//! The rule repository: every registered pattern plus the precomputed
//! application order for each domain.

use mspeak_ast::DomainContext;
use rustc_hash::FxHashSet;
use sha2::{Digest, Sha256};

use crate::error::RuleError;
use crate::pattern::Pattern;

/// Collects patterns from the rule tables before the repository is frozen.
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    patterns: Vec<Pattern>,
    ids: FxHashSet<String>,
}

impl RuleSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, pattern: Pattern) -> Result<(), RuleError> {
        if !self.ids.insert(pattern.id.clone()) {
            return Err(RuleError::DuplicateId(pattern.id));
        }
        self.patterns.push(pattern);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn build(self) -> RuleRepository {
        RuleRepository::from_patterns(self.patterns)
    }
}

/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug)]
pub struct RuleRepository {
    patterns: Vec<Pattern>,
    /// Indices into `patterns`, one ordered list per `DomainContext::index`.
    ordered: Vec<Vec<usize>>,
    revision: u64,
}

/// The rules one call applies, in application order.
#[derive(Debug, Clone)]
pub struct OrderedRuleSet<'a> {
    pub domain: DomainContext,
    rules: Vec<&'a Pattern>,
}

impl<'a> OrderedRuleSet<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Pattern> + '_ {
        self.rules.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.rules.iter().map(|p| p.id.as_str()).collect()
    }
}

impl RuleRepository {
    /// Repository with every built-in rule table registered.
    pub fn with_default_rules() -> Result<Self, RuleError> {
        let mut builder = RuleSetBuilder::new();
        crate::rules::register_all(&mut builder)?;
        let repository = builder.build();
        tracing::debug!(
            rules = repository.len(),
            revision = repository.revision,
            "rule repository built"
        );
        Ok(repository)
    }

    pub fn from_patterns(patterns: Vec<Pattern>) -> Self {
        let ordered = DomainContext::ALL
            .iter()
            .map(|&domain| order_for(&patterns, domain))
            .collect();
        let revision = revision_of(&patterns);
        Self {
            patterns,
            ordered,
            revision,
        }
    }

    /// Critical rules, then `domain`'s rules, then general rules; each group
    /// by descending priority with ties in registration order.
    pub fn ordered_for(&self, domain: DomainContext) -> OrderedRuleSet<'_> {
        OrderedRuleSet {
            domain,
            rules: self.ordered[domain.index()]
                .iter()
                .map(|&i| &self.patterns[i])
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.id == id)
    }

    /// All patterns in registration order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Digest of every rule's id, domain, priority, matcher and template.
    /// Part of the cache key, so editing a rule invalidates cached speech.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

fn order_for(patterns: &[Pattern], domain: DomainContext) -> Vec<usize> {
    let group = |p: &Pattern| -> Option<u8> {
        if p.priority.is_critical() {
            Some(0)
        } else if p.domain == domain && !domain.is_general() {
            Some(1)
        } else if p.domain.is_general() {
            Some(2)
        } else {
            None
        }
    };
    let mut keyed: Vec<(u8, std::cmp::Reverse<i32>, usize)> = patterns
        .iter()
        .enumerate()
        .filter_map(|(i, p)| group(p).map(|g| (g, std::cmp::Reverse(p.priority.0), i)))
        .collect();
    keyed.sort_unstable();
    keyed.into_iter().map(|(_, _, i)| i).collect()
}

fn revision_of(patterns: &[Pattern]) -> u64 {
    let mut hasher = Sha256::new();
    for p in patterns {
        hasher.update(p.id.as_bytes());
        hasher.update([0]);
        hasher.update(p.domain.as_str().as_bytes());
        hasher.update(p.priority.0.to_le_bytes());
        hasher.update(p.matcher.source().as_bytes());
        hasher.update([0]);
        if let crate::pattern::Replacement::Template(t) = &p.replacement {
            hasher.update(t.as_bytes());
        }
        hasher.update([0xff]);
    }
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
