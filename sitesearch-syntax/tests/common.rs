#![allow(dead_code)]
//! Shared helpers for `sitesearch-syntax` integration tests.

use sitesearch_syntax::*;

pub fn filter<'a>(parsed: &'a ParsedQuery, key: &str) -> &'a FilterValue {
    parsed
        .filters
        .get(key)
        .unwrap_or_else(|| panic!("missing filter {key:?} in {:?}", parsed.filters))
}

pub fn filter_is(parsed: &ParsedQuery, key: &str, value: &str, negated: bool) {
    let f = filter(parsed, key);
    assert_eq!(f.value, value, "value of filter {key:?}");
    assert_eq!(f.negated, negated, "negation of filter {key:?}");
}

pub fn no_filter(parsed: &ParsedQuery, key: &str) {
    assert!(
        parsed.filters.get(key).is_none(),
        "unexpected filter {key:?} in {:?}",
        parsed.filters
    );
}

pub fn positive(value: &str) -> FilterValue {
    FilterValue {
        value: value.to_string(),
        negated: false,
    }
}

pub fn negated(value: &str) -> FilterValue {
    FilterValue {
        value: value.to_string(),
        negated: true,
    }
}
