use serde::{Deserialize, Serialize};
use sitesearch_syntax::{FilterMap, FilterValue, ParsedQuery, build};

/// The UI-facing slice of a parsed query: what round-trips through the URL
/// so a filtered search can be shared or restored on reload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub text: String,
    pub filters: FilterMap,
    pub exclude: Vec<String>,
}

impl From<ParsedQuery> for FilterState {
    fn from(parsed: ParsedQuery) -> Self {
        Self {
            text: parsed.text,
            filters: parsed.filters,
            exclude: parsed.exclude,
        }
    }
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.filters.is_empty() && self.exclude.is_empty()
    }

    /// Canonical query-string rendering of this state.
    pub fn to_query(&self) -> String {
        build(&self.filters, &self.text, &self.exclude)
    }
}

/// Serializes a state into URL parameter pairs: `q` first, one `f_{key}` per
/// filter in insertion order (negated filters carry a leading `-` on the
/// value), and `f_exclude` last as a comma-joined list. Empty pieces are
/// omitted entirely.
pub fn to_url_params(state: &FilterState) -> Vec<(String, String)> {
    let mut params = Vec::new();
    if !state.text.is_empty() {
        params.push(("q".to_string(), state.text.clone()));
    }
    for (key, filter) in &state.filters {
        let value = if filter.negated {
            format!("-{}", filter.value)
        } else {
            filter.value.clone()
        };
        params.push((format!("f_{key}"), value));
    }
    if !state.exclude.is_empty() {
        params.push(("f_exclude".to_string(), state.exclude.join(",")));
    }
    params
}

/// Inverse of [`to_url_params`]. Returns `None` when no search parameter
/// (`q`, `f_exclude`, or any `f_*`) is present at all, so callers can tell
/// "nothing to restore" apart from a restored-but-empty state.
pub fn from_url_params(params: &[(String, String)]) -> Option<FilterState> {
    let mut state = FilterState::default();
    let mut recognized = false;

    for (name, value) in params {
        if name == "q" {
            state.text = value.clone();
            recognized = true;
        } else if name == "f_exclude" {
            state.exclude = value
                .split(',')
                .filter(|word| !word.is_empty())
                .map(str::to_string)
                .collect();
            recognized = true;
        } else if let Some(key) = name.strip_prefix("f_") {
            if key.is_empty() {
                continue;
            }
            let (negated, raw) = match value.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, value.as_str()),
            };
            state.filters.insert(
                key,
                FilterValue {
                    value: raw.to_string(),
                    negated,
                },
            );
            recognized = true;
        }
    }

    recognized.then_some(state)
}
