mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use jiff::civil::Date;
use serde::Deserialize;
use sitesearch::{FilterSchema, RecordSource, SearchRecord, Searcher, SessionState};
use std::fs;

/// One searchable record as stored in the JSON file.
#[derive(Debug, Clone, Deserialize)]
struct JsonRecord {
    title: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    author: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    content: String,
    #[serde(default)]
    url: String,
}

impl SearchRecord for JsonRecord {
    fn content_type(&self) -> String {
        self.kind.clone()
    }

    fn category_names(&self) -> Vec<String> {
        self.categories.clone()
    }

    fn tag_names(&self) -> Vec<String> {
        self.tags.clone()
    }

    fn author_name(&self) -> String {
        self.author.clone()
    }

    fn date(&self) -> Option<Date> {
        let raw = self.date.as_deref()?;
        Date::strptime("%Y-%m-%d", raw).ok()
    }

    fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }
}

/// Serves records from the loaded file, narrowed by the query's free text the
/// way the content backend would narrow server-side.
struct FileSource {
    records: Vec<JsonRecord>,
}

impl RecordSource for FileSource {
    type Record = JsonRecord;

    fn fetch(&self, text: &str) -> Result<Vec<JsonRecord>> {
        let needle = text.to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|r| needle.is_empty() || r.searchable_text().to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data = fs::read_to_string(&cli.records)
        .with_context(|| format!("failed to read {:?}", cli.records))?;
    let records: Vec<JsonRecord> =
        serde_json::from_str(&data).with_context(|| format!("failed to decode {:?}", cli.records))?;

    let session = match &cli.session {
        Some(path) => SessionState::load(path)?,
        None => SessionState::new(),
    };

    let source = FileSource { records };
    let mut searcher = Searcher::new(FilterSchema::default(), source).with_session(session);

    let outcome = searcher.search(&cli.query)?;
    for error in &outcome.parsed.errors {
        eprintln!("warning: {error}");
    }
    for error in &outcome.validation_errors {
        eprintln!("warning: {error}");
    }

    if outcome.records.is_empty() {
        println!("No results");
    } else {
        for (i, record) in outcome.records.iter().enumerate() {
            if record.url.is_empty() {
                println!("[{i}] {}", record.title);
            } else {
                println!("[{i}] {} ({})", record.title, record.url);
            }
        }
    }

    if let Some(path) = &cli.session {
        searcher.session.save(path)?;
    }

    Ok(())
}
