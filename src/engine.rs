use crate::FilterSchema;
use jiff::civil::Date;
use memchr::memmem;
use sitesearch_syntax::ParsedQuery;
use tracing::debug;

/// Accessors the filter engine needs from a result record. Implementations
/// must be pure; the engine never mutates records and preserves their order.
pub trait SearchRecord {
    /// Derived content type, e.g. "page" or a category-derived name.
    fn content_type(&self) -> String;
    fn category_names(&self) -> Vec<String>;
    fn tag_names(&self) -> Vec<String>;
    fn author_name(&self) -> String;
    /// Publication date, when the record has one. Records without a date
    /// never satisfy `after:`/`before:`.
    fn date(&self) -> Option<Date>;
    /// Title plus body text, used for the exclusion scan.
    fn searchable_text(&self) -> String;
}

/// Keeps the records that satisfy every filter of `parsed` and contain none
/// of its exclusion terms. Filter keys are resolved through `schema` so
/// aliases like `cat:` behave like `category:`.
///
/// With no filters and no exclusions this is the identity and the input
/// vector is returned untouched, so a plain text search costs nothing extra.
/// Unknown filter keys are ignored here; surfacing them is
/// [`FilterSchema::validate`]'s job.
pub fn apply<R: SearchRecord>(
    records: Vec<R>,
    parsed: &ParsedQuery,
    schema: &FilterSchema,
) -> Vec<R> {
    if parsed.filters.is_empty() && parsed.exclude.is_empty() {
        return records;
    }

    // Exclusion terms are lowercased at parse time; records are lowercased
    // per scan below.
    let finders: Vec<memmem::Finder> = parsed
        .exclude
        .iter()
        .map(|term| memmem::Finder::new(term.as_bytes()))
        .collect();

    let before = records.len();
    let kept: Vec<R> = records
        .into_iter()
        .filter(|record| passes_filters(record, parsed, schema) && !is_excluded(record, &finders))
        .collect();
    debug!("local filters kept {}/{before} records", kept.len());
    kept
}

fn passes_filters<R: SearchRecord>(record: &R, parsed: &ParsedQuery, schema: &FilterSchema) -> bool {
    parsed.filters.iter().all(|(key, filter)| {
        let hit = match schema.canonical_key(key).unwrap_or(key) {
            "type" => record.content_type().to_lowercase() == filter.value,
            "category" => contains_any(&record.category_names(), &filter.value),
            "tag" => contains_any(&record.tag_names(), &filter.value),
            "author" => record.author_name().to_lowercase().contains(&filter.value),
            "after" => date_matches(record, &filter.value, |date, bound| date >= bound),
            "before" => date_matches(record, &filter.value, |date, bound| date <= bound),
            // Unknown keys are no-ops; validation reports them separately.
            _ => return true,
        };
        if filter.negated { !hit } else { hit }
    })
}

/// Substring containment over a name list, e.g. `category:marketing` matches
/// a record categorized "Marketing Digital".
fn contains_any(names: &[String], needle: &str) -> bool {
    names.iter().any(|name| name.to_lowercase().contains(needle))
}

/// Inclusive calendar-date comparison. Values that fail to parse (possible
/// only in hand-built queries, the parser validates dates) leave the record
/// in.
fn date_matches<R: SearchRecord>(
    record: &R,
    raw: &str,
    keep: impl Fn(Date, Date) -> bool,
) -> bool {
    let Some(date) = record.date() else {
        return false;
    };
    match Date::strptime("%Y-%m-%d", raw) {
        Ok(bound) => keep(date, bound),
        Err(_) => {
            debug!("ignoring unparseable date bound {raw:?}");
            true
        }
    }
}

/// A record is dropped when any exclusion term occurs, case-insensitively, in
/// its title or body — regardless of how the positive filters went.
fn is_excluded<R: SearchRecord>(record: &R, finders: &[memmem::Finder]) -> bool {
    if finders.is_empty() {
        return false;
    }
    let haystack = record.searchable_text().to_lowercase();
    finders
        .iter()
        .any(|finder| finder.find(haystack.as_bytes()).is_some())
}
