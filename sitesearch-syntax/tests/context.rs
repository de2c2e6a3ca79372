use sitesearch_syntax::*;

fn ctx(query: &str, cursor: usize) -> Option<FilterContext> {
    detect_context(query, cursor)
}

#[test]
fn extract_keys_dedupes_in_first_seen_order() {
    let keys = extract_keys("type:blog tag:web type:portfolio by:me");
    assert_eq!(keys, ["type", "tag", "by"]);
}

#[test]
fn extract_keys_resumes_after_each_colon() {
    assert_eq!(extract_keys("author:is_client:x"), ["author", "is_client"]);
}

#[test]
fn extract_keys_skips_leading_digits() {
    assert_eq!(extract_keys("9ab: 123:"), ["ab"]);
}

#[test]
fn extract_keys_on_plain_text_is_empty() {
    assert!(extract_keys("no filters here").is_empty());
}

#[test]
fn cursor_right_after_colon_reports_the_key() {
    let found = ctx("type:", 5).expect("context");
    assert_eq!(found.key, "type");
    assert_eq!(found.partial_value, None);
}

#[test]
fn trailing_spaces_after_colon_still_count() {
    let found = ctx("hello type:  ", 13).expect("context");
    assert_eq!(found.key, "type");
    assert_eq!(found.partial_value, None);
}

#[test]
fn partial_value_is_reported() {
    let found = ctx("type:port", 9).expect("context");
    assert_eq!(found.key, "type");
    assert_eq!(found.partial_value.as_deref(), Some("port"));
}

#[test]
fn cursor_in_the_middle_of_the_query_uses_only_the_prefix() {
    let query = "type:port hello";
    let found = ctx(query, 9).expect("context");
    assert_eq!(found.key, "type");
    assert_eq!(found.partial_value.as_deref(), Some("port"));
}

#[test]
fn space_between_colon_and_word_is_not_a_context() {
    assert_eq!(ctx("type: par", 9), None);
}

#[test]
fn cursor_inside_the_key_is_not_a_context() {
    assert_eq!(ctx("type:port", 4), None);
}

#[test]
fn plain_text_has_no_context() {
    assert_eq!(ctx("hello world", 11), None);
    assert_eq!(ctx("hello ", 6), None);
}

#[test]
fn cursor_past_the_end_is_clamped() {
    let found = ctx("tag:", 400).expect("context");
    assert_eq!(found.key, "tag");
}

#[test]
fn key_must_start_with_a_letter_or_underscore() {
    assert_eq!(ctx("12:", 3), None);
    let found = ctx("_private:x", 10).expect("context");
    assert_eq!(found.key, "_private");
    assert_eq!(found.partial_value.as_deref(), Some("x"));
}
