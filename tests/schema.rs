use sitesearch::{FilterSchema, SuggestionKind, parse};

#[test]
fn aliases_resolve_to_canonical_keys() {
    let schema = FilterSchema::default();
    assert_eq!(schema.canonical_key("t"), Some("type"));
    assert_eq!(schema.canonical_key("cat"), Some("category"));
    assert_eq!(schema.canonical_key("by"), Some("author"));
    assert_eq!(schema.canonical_key("state"), Some("status"));
    assert_eq!(schema.canonical_key("type"), Some("type"));
    assert_eq!(schema.canonical_key("bogus"), None);
}

#[test]
fn unknown_keys_are_reported() {
    let schema = FilterSchema::default();
    let errors = schema.validate(&parse("color:blue"));
    assert_eq!(errors, ["Filtro desconocido: color"]);
}

#[test]
fn out_of_vocabulary_values_list_the_allowed_ones() {
    let schema = FilterSchema::default();
    let errors = schema.validate(&parse("type:video"));
    assert_eq!(
        errors,
        ["Valor 'video' no válido para type. Valores permitidos: page, blog, portfolio, post, document"]
    );
}

#[test]
fn empty_value_lists_accept_anything() {
    let schema = FilterSchema::default();
    assert!(schema.validate(&parse("tag:whatever")).is_empty());
    assert!(schema.validate(&parse("category:anything")).is_empty());
}

#[test]
fn aliased_keys_validate_against_the_canonical_entry() {
    let schema = FilterSchema::default();
    assert!(schema.validate(&parse("t:blog")).is_empty());
    assert_eq!(schema.validate(&parse("t:video")).len(), 1);
}

#[test]
fn valid_queries_produce_no_errors() {
    let schema = FilterSchema::default();
    let parsed = parse("branding type:portfolio after:2024-01-01 -draft");
    assert!(schema.validate(&parsed).is_empty());
}

#[test]
fn key_suggestions_match_prefixes_of_keys_and_aliases() {
    let schema = FilterSchema::default();
    let found = schema.suggestions("ca");
    let values: Vec<_> = found.iter().map(|s| s.value.as_str()).collect();
    assert_eq!(values, ["category:", "cat:"]);
    assert!(found.iter().all(|s| s.kind == SuggestionKind::FilterKey));
}

#[test]
fn key_suggestions_are_capped() {
    let schema = FilterSchema::default();
    assert!(schema.suggestions("").len() <= 10);
}

#[test]
fn value_suggestions_include_special_sentinels() {
    let schema = FilterSchema::default();
    let found = schema.value_suggestions("author", "is");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].value, "is_client");
    assert_eq!(found[0].description, "Solo proyectos de clientes");
}

#[test]
fn value_suggestions_work_through_aliases() {
    let schema = FilterSchema::default();
    let found = schema.value_suggestions("t", "p");
    let values: Vec<_> = found.iter().map(|s| s.value.as_str()).collect();
    assert_eq!(values, ["page", "portfolio", "post"]);
}

#[test]
fn with_values_fills_dynamic_entries() {
    let schema = FilterSchema::default()
        .with_values("cat", vec!["marketing".to_string(), "branding".to_string()]);
    assert_eq!(schema.values_for("category"), ["marketing", "branding"]);
    let errors = schema.validate(&parse("category:web"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn contextual_help_lists_filters_for_empty_input() {
    let schema = FilterSchema::default();
    let help = schema.contextual_help("");
    assert_eq!(help.len(), 2);
    assert_eq!(help[1].items.len(), schema.entries().len());
}

#[test]
fn contextual_help_surfaces_parse_errors() {
    let schema = FilterSchema::default();
    let help = schema.contextual_help("after:tomorrow");
    assert_eq!(help.len(), 1);
    assert!(help[0].items[0].contains("Formato de fecha inválido"));
}
