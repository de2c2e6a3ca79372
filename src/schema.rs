use itertools::Itertools;
use serde::{Deserialize, Serialize};
use sitesearch_syntax::ParsedQuery;

/// How many autocomplete entries [`FilterSchema::suggestions`] returns at most.
const MAX_SUGGESTIONS: usize = 10;

/// Validation flavor of a filter's values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    Plain,
    /// Values must be `YYYY-MM-DD` calendar dates.
    Date,
}

/// Sentinel value with extra semantics, e.g. `author:is_client`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialValue {
    pub name: String,
    pub label: String,
    pub description: String,
}

/// One recognized filter key: its aliases, allowed values, and UI copy.
///
/// An empty `values` list means any value is accepted. `category` and `tag`
/// ship empty and may be populated from the content backend via
/// [`FilterSchema::with_values`]; every consumer must tolerate them staying
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntry {
    pub key: String,
    /// Accepted spellings, the canonical key included.
    pub aliases: Vec<String>,
    pub label: String,
    pub description: String,
    pub values: Vec<String>,
    pub kind: ValueKind,
    pub placeholder: String,
    pub examples: Vec<String>,
    pub special: Vec<SpecialValue>,
}

/// Autocomplete entry for the search box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub value: String,
    pub display: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionKind {
    FilterKey,
    FilterValue,
}

/// One block of contextual help shown under the search box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<String>,
}

/// The declared filter vocabulary. Immutable once constructed; alias sets of
/// distinct entries must be disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSchema {
    entries: Vec<FilterEntry>,
}

impl Default for FilterSchema {
    /// The schema the site ships with.
    fn default() -> Self {
        Self::new(vec![
            entry(
                "type",
                &["type", "t"],
                "Tipo",
                "Filtrar por tipo de contenido",
                &["page", "blog", "portfolio", "post", "document"],
                ValueKind::Plain,
                "page | blog | portfolio",
                &["type:portfolio", "t:blog"],
            ),
            entry(
                "category",
                &["category", "cat", "c"],
                "Categoría",
                "Filtrar por categoría",
                // Populated from the content backend when available.
                &[],
                ValueKind::Plain,
                "marketing, branding, web...",
                &["category:marketing", "cat:branding"],
            ),
            entry(
                "tag",
                &["tag"],
                "Etiqueta",
                "Filtrar por etiqueta",
                &[],
                ValueKind::Plain,
                "nombre de etiqueta",
                &["tag:diseño", "tag:web"],
            ),
            {
                let mut author = entry(
                    "author",
                    &["author", "by", "owner"],
                    "Autor",
                    "Filtrar por autor",
                    &["me", "klef"],
                    ValueKind::Plain,
                    "nombre de autor",
                    &["author:klef", "by:me"],
                );
                author.special.push(SpecialValue {
                    name: "is_client".to_string(),
                    label: "Proyectos de Clientes".to_string(),
                    description: "Solo proyectos de clientes".to_string(),
                });
                author
            },
            entry(
                "after",
                &["after"],
                "Después de",
                "Contenido posterior a esta fecha",
                &[],
                ValueKind::Date,
                "2024-01-01",
                &["after:2024-01-01", "after:2023-12-01"],
            ),
            entry(
                "before",
                &["before"],
                "Antes de",
                "Contenido anterior a esta fecha",
                &[],
                ValueKind::Date,
                "2024-12-31",
                &["before:2024-12-31", "before:2024-06-01"],
            ),
            entry(
                "status",
                &["status", "state"],
                "Estado",
                "Filtrar por estado",
                &["published", "draft", "archived", "pending", "active"],
                ValueKind::Plain,
                "published | draft | archived",
                &["status:published", "state:draft"],
            ),
            entry(
                "sort",
                &["sort", "order"],
                "Orden",
                "Ordenar resultados",
                &["date", "relevance", "title", "alpha"],
                ValueKind::Plain,
                "date | relevance | title",
                &["sort:date", "sort:relevance"],
            ),
        ])
    }
}

fn entry(
    key: &str,
    aliases: &[&str],
    label: &str,
    description: &str,
    values: &[&str],
    kind: ValueKind,
    placeholder: &str,
    examples: &[&str],
) -> FilterEntry {
    FilterEntry {
        key: key.to_string(),
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
        label: label.to_string(),
        description: description.to_string(),
        values: values.iter().map(|v| v.to_string()).collect(),
        kind,
        placeholder: placeholder.to_string(),
        examples: examples.iter().map(|e| e.to_string()).collect(),
        special: Vec::new(),
    }
}

impl FilterSchema {
    pub fn new(entries: Vec<FilterEntry>) -> Self {
        Self { entries }
    }

    /// Replaces the allowed-value list of `key` before the schema is put to
    /// use, e.g. to fill `category` from the backend's term list. Unknown
    /// keys are left alone.
    pub fn with_values(mut self, key: &str, values: Vec<String>) -> Self {
        if let Some(canonical) = self.canonical_key(key).map(str::to_string)
            && let Some(entry) = self.entries.iter_mut().find(|e| e.key == canonical)
        {
            entry.values = values;
        }
        self
    }

    pub fn entries(&self) -> &[FilterEntry] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Resolves a key or alias to its canonical key.
    pub fn canonical_key(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key || e.aliases.iter().any(|a| a == key))
            .map(|e| e.key.as_str())
    }

    /// The entry behind a key or alias.
    pub fn entry(&self, key: &str) -> Option<&FilterEntry> {
        let canonical = self.canonical_key(key)?;
        self.entries.iter().find(|e| e.key == canonical)
    }

    pub fn values_for(&self, key: &str) -> &[String] {
        self.entry(key).map(|e| e.values.as_slice()).unwrap_or(&[])
    }

    pub fn examples_for(&self, key: &str) -> &[String] {
        self.entry(key)
            .map(|e| e.examples.as_slice())
            .unwrap_or(&[])
    }

    /// Filter-key completions for a typed prefix, canonical keys and aliases
    /// alike, capped at ten.
    pub fn suggestions(&self, prefix: &str) -> Vec<Suggestion> {
        let prefix = prefix.to_lowercase();
        let mut found = Vec::new();
        for entry in &self.entries {
            if entry.key.starts_with(&prefix) {
                found.push(key_suggestion(&entry.key, &entry.description));
            }
            for alias in &entry.aliases {
                if *alias != entry.key && alias.starts_with(&prefix) {
                    found.push(key_suggestion(alias, &entry.description));
                }
            }
        }
        found.truncate(MAX_SUGGESTIONS);
        found
    }

    /// Value completions for a filter key: the allowed values plus any
    /// special sentinels, prefix-matched case-insensitively.
    pub fn value_suggestions(&self, key: &str, prefix: &str) -> Vec<Suggestion> {
        let Some(entry) = self.entry(key) else {
            return Vec::new();
        };
        let prefix = prefix.to_lowercase();
        let mut found = Vec::new();
        for value in &entry.values {
            if value.to_lowercase().starts_with(&prefix) {
                found.push(Suggestion {
                    kind: SuggestionKind::FilterValue,
                    value: value.clone(),
                    display: value.clone(),
                    description: String::new(),
                });
            }
        }
        for special in &entry.special {
            if special.name.to_lowercase().starts_with(&prefix) {
                found.push(Suggestion {
                    kind: SuggestionKind::FilterValue,
                    value: special.name.clone(),
                    display: special.name.clone(),
                    description: special.description.clone(),
                });
            }
        }
        found
    }

    /// Checks a parsed query against the schema. Unknown keys and
    /// out-of-vocabulary values are reported; an empty allowed-value list
    /// accepts anything. The parsed query is not modified, and validation
    /// never blocks filtering.
    pub fn validate(&self, parsed: &ParsedQuery) -> Vec<String> {
        let mut errors = Vec::new();
        for (key, filter) in &parsed.filters {
            let Some(entry) = self.entry(key) else {
                errors.push(format!("Filtro desconocido: {key}"));
                continue;
            };
            if !entry.values.is_empty() && !entry.values.iter().any(|v| *v == filter.value) {
                errors.push(format!(
                    "Valor '{}' no válido para {key}. Valores permitidos: {}",
                    filter.value,
                    entry.values.iter().join(", ")
                ));
            }
        }
        errors
    }

    /// Help blocks for the current input: general usage for an empty query,
    /// otherwise whatever parse errors the query currently has.
    pub fn contextual_help(&self, query: &str) -> Vec<HelpSection> {
        let mut help = Vec::new();
        if query.trim().is_empty() {
            help.push(HelpSection {
                title: "Búsqueda con filtros".to_string(),
                items: vec![
                    "Usa filtros como type:portfolio para refinar resultados".to_string(),
                ],
            });
            help.push(HelpSection {
                title: "Filtros disponibles".to_string(),
                items: self
                    .entries
                    .iter()
                    .map(|e| format!("{}: {}", e.key, e.description))
                    .collect(),
            });
            return help;
        }

        let parsed = sitesearch_syntax::parse(query);
        if !parsed.errors.is_empty() {
            help.push(HelpSection {
                title: "Errores detectados".to_string(),
                items: parsed.errors,
            });
        }
        help
    }
}

fn key_suggestion(key: &str, description: &str) -> Suggestion {
    Suggestion {
        kind: SuggestionKind::FilterKey,
        value: format!("{key}:"),
        display: format!("{key}:"),
        description: description.to_string(),
    }
}
