//! The speech pipeline: guard, parse, detect, rewrite, enhance.
//!
//! ```text
//! Guard -> Analyzer -> {Detector, ContextMemory} -> RuleEngine -> Enhancer
//!            ^-- ResultCache short-circuits on a key hit, stores on a miss
//! ```
//!
//! One [`Deadline`] is started at guard entry and checked by every later
//! stage. Session memory is only written after a call has fully succeeded,
//! so a rejected or timed-out call leaves no trace in memory or cache.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use mspeak_ast::{
    collapse_whitespace, linearize, Diagnostic, DiagnosticKind, DomainContext, Expression,
    Subcontext,
};
use mspeak_cache::{CacheError, CacheKey, CacheStats, ResultCache};
use mspeak_guard::{Deadline, SafeInput};
use mspeak_parser::{parse, ParseError, ParseOptions};
use mspeak_session::{ContextMemory, MemoryEffect};
use serde::{Deserialize, Serialize};

use crate::applier::apply;
use crate::config::EngineConfig;
use crate::detector::select_rules;
use crate::enhancer::enhance;
use crate::error::EngineError;
use crate::repository::RuleRepository;
use crate::symbols;
use crate::voice::{derive_voice_role, VoiceRole};

/// Everything a cache hit needs to reproduce a call, including the memory
/// effects to replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedSpeech {
    pub speech: String,
    pub domain: DomainContext,
    pub subcontext: Subcontext,
    pub voice_role: VoiceRole,
    pub applied_rules: Vec<String>,
    pub unknown_commands: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub effects: Vec<MemoryEffect>,
    /// Time the original computation took.
    pub processing_time_us: u64,
}

/// Result of one successful pipeline call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineResult {
    pub speech: String,
    pub domain: DomainContext,
    pub subcontext: Subcontext,
    pub voice_role: VoiceRole,
    pub unknown_commands: Vec<String>,
    /// Diagnostics from every stage, including those raised while committing
    /// to session memory.
    pub warnings: Vec<Diagnostic>,
    pub applied_rules: Vec<String>,
    pub processing_time: Duration,
    pub cache_hit: bool,
}

impl EngineResult {
    fn new(cached: CachedSpeech, committed: Vec<Diagnostic>, elapsed: Duration, hit: bool) -> Self {
        let mut warnings = cached.diagnostics;
        warnings.extend(committed);
        Self {
            speech: cached.speech,
            domain: cached.domain,
            subcontext: cached.subcontext,
            voice_role: cached.voice_role,
            unknown_commands: cached.unknown_commands,
            warnings,
            applied_rules: cached.applied_rules,
            processing_time: elapsed,
            cache_hit: hit,
        }
    }
}

/// Shared, immutable engine. `Send + Sync`; give every worker an `Arc` and
/// every session its own [`ContextMemory`].
pub struct SpeechEngine {
    config: EngineConfig,
    repository: Arc<RuleRepository>,
    cache: Option<Arc<ResultCache<CachedSpeech>>>,
}

impl SpeechEngine {
    /// Engine with the built-in rule tables.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let repository = Arc::new(RuleRepository::with_default_rules()?);
        Ok(Self::with_repository(config, repository))
    }

    pub fn with_repository(config: EngineConfig, repository: Arc<RuleRepository>) -> Self {
        let cache = config.cache.enabled.then(|| {
            Arc::new(ResultCache::new(config.cache.capacity, config.cache.ttl()))
        });
        Self {
            config,
            repository,
            cache,
        }
    }

    /// Use a cache shared with other engines instead of a private one.
    pub fn with_shared_cache(mut self, cache: Arc<ResultCache<CachedSpeech>>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn repository(&self) -> &RuleRepository {
        &self.repository
    }

    pub fn cache(&self) -> Option<&Arc<ResultCache<CachedSpeech>>> {
        self.cache.as_ref()
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|c| c.stats())
    }

    /// Save the cache to `path`. Returns the number of entries written, zero
    /// when caching is disabled.
    pub fn save_cache(&self, path: &Path) -> Result<usize, CacheError> {
        match &self.cache {
            Some(cache) => cache.save_snapshot(path),
            None => Ok(0),
        }
    }

    pub fn load_cache(&self, path: &Path) -> Result<usize, CacheError> {
        match &self.cache {
            Some(cache) => cache.load_snapshot(path),
            None => Ok(0),
        }
    }

    /// Turn one expression into speech, reading and then updating `memory`.
    pub fn process(
        &self,
        expression: &Expression,
        memory: &mut ContextMemory,
    ) -> Result<EngineResult, EngineError> {
        let started = Instant::now();
        let deadline = Deadline::start(self.config.timeout());
        let input = mspeak_guard::check(expression.latex(), &self.config.guard)?;

        let key = self.cache_key(&input, expression, memory);
        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(&key)) {
            tracing::debug!(%key, "speech cache hit");
            let committed = memory.apply_effects(&cached.effects);
            return Ok(EngineResult::new(cached, committed, started.elapsed(), true));
        }

        let computed = self.compute(&input, expression, memory, &deadline)?;
        if let Some(cache) = &self.cache {
            cache.insert(key, computed.clone());
        }
        let committed = memory.apply_effects(&computed.effects);
        tracing::debug!(
            domain = computed.domain.as_str(),
            rules = computed.applied_rules.len(),
            elapsed_us = computed.processing_time_us,
            "speech computed"
        );
        Ok(EngineResult::new(computed, committed, started.elapsed(), false))
    }

    fn cache_key(&self, input: &SafeInput, expression: &Expression, memory: &ContextMemory) -> CacheKey {
        CacheKey::builder()
            .text(&collapse_whitespace(input.text()))
            .text(expression.audience().as_str())
            .text(expression.domain_hint().map_or("", |d| d.as_str()))
            .bytes(&memory.fingerprint().to_bytes())
            .number(self.repository.revision())
            .number(u64::from(self.config.warn_undefined_symbols))
            .number(self.config.rewrite.max_passes as u64)
            .number(self.config.rewrite.max_growth_factor as u64)
            .finish()
    }

    fn compute(
        &self,
        input: &SafeInput,
        expression: &Expression,
        memory: &ContextMemory,
        deadline: &Deadline,
    ) -> Result<CachedSpeech, EngineError> {
        let started = Instant::now();
        let parsed = parse(input, &ParseOptions::for_input(input, *deadline)).map_err(|e| match e {
            ParseError::Timeout { elapsed_ms } => EngineError::ProcessingTimeout {
                elapsed_ms,
                budget_ms: deadline.budget().as_millis() as u64,
            },
            other => EngineError::from(other),
        })?;

        let selection = select_rules(&parsed.tree, expression.domain_hint(), memory, &self.repository);
        let analysis = symbols::analyze(
            &parsed.tree,
            &parsed.diagnostics,
            memory,
            self.config.warn_undefined_symbols,
        );

        let outcome = apply(
            &linearize(&parsed.tree),
            &selection.rules,
            deadline,
            &self.config.rewrite,
        );
        if outcome.timed_out {
            return Err(EngineError::ProcessingTimeout {
                elapsed_ms: deadline.elapsed().as_millis() as u64,
                budget_ms: deadline.budget().as_millis() as u64,
            });
        }

        let speech = enhance(&outcome.text, expression.audience());
        deadline.check()?;

        let mut diagnostics: Vec<Diagnostic> = parsed
            .diagnostics
            .into_iter()
            .filter(|d| {
                !matches!(&d.kind, DiagnosticKind::StrayEnd(env) if analysis.resolved_ends.contains(env))
            })
            .collect();
        if outcome.limit_hit {
            diagnostics.push(Diagnostic::new(DiagnosticKind::RewriteLimit));
        }
        diagnostics.extend(analysis.diagnostics.iter().cloned());

        let emphasized = parsed.tree.command_names().contains(&"boxed");
        let voice_role = derive_voice_role(emphasized, analysis.opened(), memory);

        let mut effects = analysis.effects;
        if !selection.domain.is_general() {
            effects.push(MemoryEffect::Topic(selection.domain));
        }

        Ok(CachedSpeech {
            speech,
            domain: selection.domain,
            subcontext: selection.subcontext,
            voice_role,
            applied_rules: outcome.applied,
            unknown_commands: parsed.unknown_commands,
            diagnostics,
            effects,
            processing_time_us: started.elapsed().as_micros() as u64,
        })
    }
}
