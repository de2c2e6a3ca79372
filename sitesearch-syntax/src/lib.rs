//! # Search query syntax
//!
//! `sitesearch-syntax` turns the free-text search box input into a structured
//! [`ParsedQuery`] so the rest of the search stack can reason about filters,
//! exclusions, and plain text without re-implementing the input rules. The
//! grammar is deliberately forgiving: `key:value` filters (optionally negated
//! with a leading `-`), bare `-word` exclusions, and double-quoted phrases may
//! appear anywhere, and anything that fails to match is kept as free text
//! rather than rejected.
//!
//! ## Example
//! ```
//! use sitesearch_syntax::parse;
//!
//! let parsed = parse("type:portfolio \"hello world\" -draft");
//! assert_eq!(parsed.text, "hello world");
//! assert_eq!(parsed.filters.get("type").unwrap().value, "portfolio");
//! assert_eq!(parsed.exclude, ["draft"]);
//! assert!(parsed.errors.is_empty());
//! ```
//!
//! [`parse`] is total: any input, including empty or garbage strings, yields a
//! valid `ParsedQuery`. Malformed dates and similar problems are reported as
//! strings in [`ParsedQuery::errors`], never as `Err` or a panic.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// One parsed `key:value` binding. `negated` records a leading `-`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterValue {
    pub value: String,
    pub negated: bool,
}

/// Ordered filter-key map with overwrite-in-place semantics: repeating a key
/// keeps its original position but replaces its value, which is what the
/// search box historically did and what [`build`] relies on for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterMap {
    entries: Vec<(String, FilterValue)>,
}

impl FilterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites `key`. The first insertion decides the position.
    pub fn insert(&mut self, key: impl Into<String>, value: FilterValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<'a> IntoIterator for &'a FilterMap {
    type Item = (&'a str, &'a FilterValue);
    type IntoIter = std::vec::IntoIter<(&'a str, &'a FilterValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

impl FromIterator<(String, FilterValue)> for FilterMap {
    fn from_iter<T: IntoIterator<Item = (String, FilterValue)>>(iter: T) -> Self {
        let mut map = FilterMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Structured view of one search-box input.
///
/// `text` keeps its original casing; filter keys/values and exclusion words
/// are lowercased. `errors` accumulates human-readable complaints in token
/// order and never aborts the parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub text: String,
    pub filters: FilterMap,
    pub exclude: Vec<String>,
    pub errors: Vec<String>,
}

/// Parses a raw query string. Total over every input.
pub fn parse(query: &str) -> ParsedQuery {
    let mut result = ParsedQuery::default();

    // Collapse whitespace runs (tabs/newlines included) before tokenizing.
    let normalized = query.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return result;
    }

    let mut text_parts: Vec<String> = Vec::new();
    for token in tokenize(&normalized) {
        // A fully double-quoted token becomes a free-text phrase kept as a
        // single unit, with the quotes stripped.
        if token.starts_with('"') && token.ends_with('"') {
            let inner = if token.len() >= 2 {
                &token[1..token.len() - 1]
            } else {
                ""
            };
            if !inner.is_empty() {
                text_parts.push(inner.to_string());
            }
            continue;
        }

        // Tokens with a stray embedded quote (unterminated regions and the
        // like) are split on the quote: even segments re-enter the normal
        // token path, odd segments were inside quotes and go to text verbatim.
        if token.contains('"') {
            for (i, part) in token.split('"').enumerate() {
                if i % 2 == 0 {
                    let part = part.trim();
                    if !part.is_empty() {
                        process_token(part, &mut result, &mut text_parts);
                    }
                } else if !part.is_empty() {
                    text_parts.push(part.to_string());
                }
            }
            continue;
        }

        process_token(&token, &mut result, &mut text_parts);
    }

    result.text = text_parts.join(" ").trim().to_string();
    result
}

/// Splits on spaces while treating `"..."` and `'...'` runs as single tokens.
/// A quote region is only closed by the same character that opened it, and an
/// unterminated region is flushed as-is rather than dropped.
fn tokenize(query: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote_char: Option<char> = None;

    for ch in query.chars() {
        match quote_char {
            None if ch == '"' || ch == '\'' => {
                if !current.trim().is_empty() {
                    tokens.push(current.trim().to_string());
                }
                current = ch.to_string();
                quote_char = Some(ch);
            }
            Some(q) if ch == q => {
                current.push(ch);
                tokens.push(std::mem::take(&mut current));
                quote_char = None;
            }
            None if ch == ' ' => {
                if !current.trim().is_empty() {
                    tokens.push(current.trim().to_string());
                }
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if !current.trim().is_empty() {
        tokens.push(current.trim().to_string());
    }
    tokens
}

fn process_token(token: &str, result: &mut ParsedQuery, text_parts: &mut Vec<String>) {
    // `-word` exclusion, word chars only.
    if let Some(word) = exclusion_word(token) {
        result.exclude.push(word.to_lowercase());
        return;
    }

    if let Some((negated, key, value)) = split_filter(token) {
        // `key:value:subvalue` re-keys the binding to `value` with the
        // remainder as its value, verbatim. Inherited behavior, kept as-is;
        // see the open questions in DESIGN.md.
        if let Some((new_key, sub_value)) = value.split_once(':') {
            if !sub_value.is_empty() {
                result.filters.insert(
                    new_key,
                    FilterValue {
                        value: sub_value.to_string(),
                        negated,
                    },
                );
            }
            return;
        }

        let key = key.to_lowercase();
        if (key == "after" || key == "before") && !is_calendar_date(value) {
            result
                .errors
                .push(format!("Formato de fecha inválido para {key}: {value}. Usa YYYY-MM-DD"));
            return;
        }
        result.filters.insert(
            key,
            FilterValue {
                value: value.to_lowercase(),
                negated,
            },
        );
        return;
    }

    text_parts.push(token.to_string());
}

fn exclusion_word(token: &str) -> Option<&str> {
    let word = token.strip_prefix('-')?;
    if is_filter_key(word) { Some(word) } else { None }
}

/// `(-)?key:value` with a word-shaped key and non-empty value; the value is
/// everything after the first colon.
fn split_filter(token: &str) -> Option<(bool, &str, &str)> {
    let (negated, rest) = match token.strip_prefix('-') {
        Some(stripped) => (true, stripped),
        None => (false, token),
    };
    let (key, value) = rest.split_once(':')?;
    if !is_filter_key(key) || value.is_empty() {
        return None;
    }
    Some((negated, key, value))
}

fn is_filter_key(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Strict `YYYY-MM-DD` shape plus a real calendar check, so `2024-13-40` is
/// rejected even though it matches the digit pattern.
fn is_calendar_date(value: &str) -> bool {
    let shape_ok = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    shape_ok && Date::strptime("%Y-%m-%d", value).is_ok()
}

/// Serializes a filter state back into a query string: free text first, then
/// `(-)key:value` bindings in map order, then `-word` exclusions.
///
/// The output is always a valid [`parse`] input that reconstructs an
/// equivalent `ParsedQuery` (modulo the lowercasing `parse` applies).
pub fn build(filters: &FilterMap, text: &str, exclude: &[String]) -> String {
    let mut parts = Vec::new();
    if !text.is_empty() {
        parts.push(text.to_string());
    }
    for (key, filter) in filters {
        if filter.negated {
            parts.push(format!("-{key}:{}", filter.value));
        } else {
            parts.push(format!("{key}:{}", filter.value));
        }
    }
    for word in exclude {
        parts.push(format!("-{word}"));
    }
    parts.join(" ")
}

/// Collects every `key:` occurrence for autocomplete, deduplicated in
/// first-seen order. No validation; scanning resumes after each colon, so
/// `author:is_client:x` yields both `author` and `is_client`.
pub fn extract_keys(query: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    let bytes = query.as_bytes();
    let mut search_from = 0;

    while let Some(offset) = query[search_from..].find(':') {
        let colon = search_from + offset;
        let mut start = colon;
        while start > 0 && is_word_byte(bytes[start - 1]) {
            start -= 1;
        }
        // Keys cannot begin with a digit.
        while start < colon && bytes[start].is_ascii_digit() {
            start += 1;
        }
        if start < colon {
            let key = &query[start..colon];
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
        search_from = colon + 1;
    }
    keys
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// What the user is typing at the cursor, for value autocompletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterContext {
    pub key: String,
    /// `None` right after `key:` (possibly with trailing spaces), `Some` once
    /// a partial value has been started.
    pub partial_value: Option<String>,
}

/// Detects whether the cursor sits directly after `key:` or inside
/// `key:partial`. Returns `None` for every other position. `cursor` is a byte
/// offset and is clamped to the nearest char boundary at or below it.
pub fn detect_context(query: &str, cursor: usize) -> Option<FilterContext> {
    let mut cut = cursor.min(query.len());
    while cut > 0 && !query.is_char_boundary(cut) {
        cut -= 1;
    }
    let before = &query[..cut];

    // `key:` with only whitespace between the colon and the cursor.
    let trimmed = before.trim_end();
    if trimmed.ends_with(':') {
        let key = trailing_key(&trimmed[..trimmed.len() - 1])?;
        return Some(FilterContext {
            key,
            partial_value: None,
        });
    }
    if trimmed.len() != before.len() {
        return None;
    }

    // `key:partial` where the partial contains no colon or whitespace.
    let partial_start = before
        .char_indices()
        .rev()
        .take_while(|(_, ch)| *ch != ':' && !ch.is_whitespace())
        .last()
        .map(|(i, _)| i)
        .unwrap_or(before.len());
    let rest = &before[..partial_start];
    let key = trailing_key(rest.strip_suffix(':')?)?;
    Some(FilterContext {
        key,
        partial_value: Some(before[partial_start..].to_string()),
    })
}

/// Longest word-shaped run ending at the end of `s`, minus any leading digits.
fn trailing_key(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut start = s.len();
    while start > 0 && is_word_byte(bytes[start - 1]) {
        start -= 1;
    }
    while start < s.len() && bytes[start].is_ascii_digit() {
        start += 1;
    }
    if start == s.len() {
        None
    } else {
        Some(s[start..].to_string())
    }
}
