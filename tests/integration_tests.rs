//! Integration tests for the subweave public API

use pretty_assertions::assert_eq;

use subweave::{
    is_parameter, resolve, tokenize, Piece, Replacements, ResolveError, Template,
    TemplateCollection, TokenizedForm,
};

#[test]
fn test_plain_string_tokenizes_to_itself() {
    let form = Template::new("just some text").extract_tokens().unwrap();
    assert_eq!(form, TokenizedForm::Text("just some text".to_string()));
}

#[test]
fn test_whole_token_template_is_an_atom() {
    let form = Template::new("{{x}}").extract_tokens().unwrap();
    assert_eq!(form, TokenizedForm::Parameter("{{x}}".to_string()));
}

#[test]
fn test_interleaved_template_splits_in_order() {
    let form = Template::new("a{{x}}b{{y}}c").extract_tokens().unwrap();
    assert_eq!(
        form,
        TokenizedForm::Pieces(vec![
            Piece::Literal("a".to_string()),
            Piece::Parameter("{{x}}".to_string()),
            Piece::Literal("b".to_string()),
            Piece::Parameter("{{y}}".to_string()),
            Piece::Literal("c".to_string()),
        ])
    );
}

#[test]
fn test_resolve_single_token() {
    let text = resolve("a{{x}}b", &Replacements::new().with("x", "VAL")).unwrap();
    assert_eq!(text, "aVALb");
}

#[test]
fn test_resolve_multiple_tokens() {
    let text = resolve(
        "{{greeting}}, {{name}}!",
        &Replacements::new()
            .with("greeting", "Hello")
            .with("name", "world"),
    )
    .unwrap();
    assert_eq!(text, "Hello, world!");
}

#[test]
fn test_repeated_token_resolves_everywhere() {
    let text = resolve(
        "{{x}} and {{x}} again",
        &Replacements::new().with("x", "once"),
    )
    .unwrap();
    assert_eq!(text, "once and once again");
}

#[test]
fn test_nested_replacement_templates_resolve_in_one_call() {
    let text = resolve(
        "{{x}}",
        &Replacements::new()
            .with("x", Template::new("{{y}}"))
            .with("y", "Z"),
    )
    .unwrap();
    assert_eq!(text, "Z");
}

#[test]
fn test_deeply_chained_templates() {
    let text = resolve(
        "{{a}}",
        &Replacements::new()
            .with("a", Template::new("1{{b}}1"))
            .with("b", Template::new("2{{c}}2"))
            .with("c", Template::new("3{{d}}3"))
            .with("d", "core"),
    )
    .unwrap();
    assert_eq!(text, "123core321");
}

#[test]
fn test_text_replacements_with_tokens_also_resolve() {
    // A plain-text replacement value containing tokens behaves exactly
    // like a Template replacement: everything joins the same batch.
    let text = resolve(
        "{{outer}}",
        &Replacements::new()
            .with("outer", "[{{inner}}]")
            .with("inner", "value"),
    )
    .unwrap();
    assert_eq!(text, "[value]");
}

#[test]
fn test_unresolved_token_round_trips() {
    let text = resolve("{{x}}", &Replacements::new()).unwrap();
    assert_eq!(text, "{{x}}");
}

#[test]
fn test_partially_resolved_template() {
    let text = resolve(
        "{{known}} and {{unknown}}",
        &Replacements::new().with("known", "here"),
    )
    .unwrap();
    assert_eq!(text, "here and {{unknown}}");
}

#[test]
fn test_absent_replacement_is_dropped() {
    let with_absent = resolve("{{x}}", &Replacements::new().without("x")).unwrap();
    let without_entry = resolve("{{x}}", &Replacements::new()).unwrap();
    assert_eq!(with_absent, without_entry);
}

#[test]
fn test_replacement_value_may_be_empty() {
    let text = resolve("a{{x}}b", &Replacements::new().with("x", "")).unwrap();
    assert_eq!(text, "ab");
}

#[test]
fn test_stray_braces_survive_resolution() {
    let text = resolve(
        "fn main() { {{body}} }",
        &Replacements::new().with("body", "println!()"),
    )
    .unwrap();
    assert_eq!(text, "fn main() { println!() }");
}

#[test]
fn test_cycle_reports_error() {
    let result = resolve(
        "{{a}}",
        &Replacements::new()
            .with("a", Template::new("{{b}}"))
            .with("b", Template::new("{{a}}")),
    );
    assert!(matches!(
        result,
        Err(ResolveError::CircularReference { .. })
    ));
}

#[test]
fn test_cycle_error_formats_with_source_context() {
    let source = "{{a}}";
    let err = resolve(
        source,
        &Replacements::new()
            .with("a", Template::new("{{b}}"))
            .with("b", Template::new("{{a}}")),
    )
    .unwrap_err();

    let report = err.format(source, "input.tmpl");
    assert!(report.contains("circular token reference"));
    assert!(report.contains("input.tmpl"));
}

#[test]
fn test_collection_resolution_across_members() {
    let mut collection = TemplateCollection::new();
    collection.insert("page", Template::new("<h1>{{title}}</h1>"));
    collection.insert("{{title}}", Template::new("Welcome, {{user}}"));
    collection.insert("{{user}}", Template::new("admin"));

    let resolved = collection.resolve_parameters().expect("Should resolve");
    assert_eq!(resolved["page"].flatten(), "<h1>Welcome, admin</h1>");
}

#[test]
fn test_collection_token_union() {
    let collection: TemplateCollection = [
        ("a", Template::new("{{x}} {{y}}")),
        ("b", Template::new("{{y}} {{z}}")),
    ]
    .into_iter()
    .collect();

    let tokens = collection.extract_unique_tokens().expect("Should extract");
    let tokens: Vec<&str> = tokens.iter().map(|token| token.as_str()).collect();
    assert_eq!(tokens, vec!["{{x}}", "{{y}}", "{{z}}"]);
}

#[test]
fn test_tokenize_helpers_are_exposed() {
    assert!(is_parameter("{{x}}"));
    assert!(!is_parameter("plain"));
    assert_eq!(
        tokenize("plain"),
        TokenizedForm::Text("plain".to_string())
    );
}
