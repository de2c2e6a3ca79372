use crate::{FilterSchema, SearchRecord, engine};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sitesearch_syntax::{ParsedQuery, parse};
use std::{
    fs,
    path::Path,
    time::{Duration, Instant},
};
use tracing::info;

/// How many recent searches are kept, newest first.
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Caller-owned session state: the recent-search history. Persisted as JSON
/// via [`SessionState::save`]/[`SessionState::load`]; nothing here is global.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    recent: Vec<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recent(&self) -> &[String] {
        &self.recent
    }

    /// Moves `term` to the front of the history, deduplicated and capped.
    pub fn record(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }
        self.recent.retain(|t| t != term);
        self.recent.insert(0, term.to_string());
        self.recent.truncate(MAX_RECENT_SEARCHES);
    }

    pub fn clear(&mut self) {
        self.recent.clear();
    }

    /// Missing files load as an empty session; a corrupt file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read session file {path:?}"))?;
        serde_json::from_str(&data)
            .with_context(|| format!("failed to decode session file {path:?}"))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string(self).context("failed to encode session state")?;
        fs::write(path, data).with_context(|| format!("failed to write session file {path:?}"))
    }
}

/// Where candidate records come from, given the free-text part of a query.
/// The production implementation is a network call; tests inject fixtures.
pub trait RecordSource {
    type Record: SearchRecord;

    fn fetch(&self, text: &str) -> Result<Vec<Self::Record>>;
}

/// Tunables of the search flow. `debounce` is advisory: the engine itself
/// never sleeps, callers debounce keystrokes and discard stale fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub min_query_length: usize,
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_length: 2,
            debounce: Duration::from_millis(300),
        }
    }
}

/// Everything one search produced: the surviving records, the parsed query
/// (with its parse errors), and the schema validation complaints.
#[derive(Debug)]
pub struct SearchOutcome<R> {
    pub records: Vec<R>,
    pub parsed: ParsedQuery,
    pub validation_errors: Vec<String>,
}

impl<R> SearchOutcome<R> {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            parsed: ParsedQuery::default(),
            validation_errors: Vec::new(),
        }
    }
}

/// Composes the full search flow: parse, validate against the schema, fetch
/// candidates for the free text, filter locally, and record the term in the
/// session history.
pub struct Searcher<S: RecordSource> {
    schema: FilterSchema,
    source: S,
    config: SearchConfig,
    pub session: SessionState,
}

impl<S: RecordSource> Searcher<S> {
    pub fn new(schema: FilterSchema, source: S) -> Self {
        Self {
            schema,
            source,
            config: SearchConfig::default(),
            session: SessionState::new(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_session(mut self, session: SessionState) -> Self {
        self.session = session;
        self
    }

    pub fn schema(&self) -> &FilterSchema {
        &self.schema
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs one search. Inputs shorter than the configured minimum yield an
    /// empty outcome without touching the source or the history.
    pub fn search(&mut self, raw: &str) -> Result<SearchOutcome<S::Record>> {
        let term = raw.trim();
        if term.chars().count() < self.config.min_query_length {
            return Ok(SearchOutcome::empty());
        }

        let started = Instant::now();
        let parsed = parse(term);
        let validation_errors = self.schema.validate(&parsed);
        let candidates = self.source.fetch(&parsed.text)?;
        let records = engine::apply(candidates, &parsed, &self.schema);
        info!(
            "search for {term:?} took {:?}, {} results",
            started.elapsed(),
            records.len()
        );

        self.session.record(term);
        Ok(SearchOutcome {
            records,
            parsed,
            validation_errors,
        })
    }
}
