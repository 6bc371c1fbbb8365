//! Integration tests for prompt rendering
//!
//! Exercises the public API the way a prompt library would: the standard
//! registry, icon sets, colors, and a cache shared between threads.

use std::sync::Arc;

use proptest::prelude::*;
use prompttemplate::{ColorMode, HelperRegistry, IconSet, TemplateCache, color_code};
use serde::Serialize;
use serde_json::json;

const QUESTION: &str = r#"{{color "green+hb"}}{{QuestionIcon}} {{color "reset"}}{{color "default+hb"}}{{message}}{{color "reset"}}"#;

const OPTION: &str = r#"{{#if selected}}{{SelectFocusIcon}}{{else}} {{/if}} {{#if checked}}{{MarkedOptionIcon}}{{else}}{{UnmarkedOptionIcon}}{{/if}} {{label}}"#;

#[derive(Serialize)]
struct OptionLine<'a> {
    selected: bool,
    checked: bool,
    label: &'a str,
}

fn standard_cache(fancy: bool, colors: ColorMode) -> TemplateCache {
    TemplateCache::new(HelperRegistry::standard(&IconSet::for_style(fancy), colors))
}

// =============================================================================
// Standard helpers
// =============================================================================

#[test]
fn test_question_without_color() {
    let cache = standard_cache(false, ColorMode::Disabled);
    let out = cache.render(QUESTION, &json!({"message": "Proceed?"})).unwrap();
    assert_eq!(out, "? Proceed?");
}

#[test]
fn test_question_with_color() {
    let cache = standard_cache(false, ColorMode::Enabled);
    let out = cache.render(QUESTION, &json!({"message": "Proceed?"})).unwrap();

    let expected = format!(
        "{}? {}{}Proceed?{}",
        color_code("green+hb"),
        color_code("reset"),
        color_code("default+hb"),
        color_code("reset")
    );
    assert_eq!(out, expected);
}

#[test]
fn test_option_lines_plain_and_fancy() {
    let line = OptionLine {
        selected: true,
        checked: false,
        label: "apples",
    };

    let plain = standard_cache(false, ColorMode::Disabled);
    assert_eq!(plain.render(OPTION, &line).unwrap(), "> [ ] apples");

    let fancy = standard_cache(true, ColorMode::Disabled);
    assert_eq!(fancy.render(OPTION, &line).unwrap(), "❯ ◯ apples");
}

#[test]
fn test_unknown_color_does_not_block_prompt() {
    let cache = standard_cache(false, ColorMode::Enabled);
    let out = cache
        .render(r#"{{color "ultraviolet"}}{{ErrorIcon}} failed"#, &json!({}))
        .unwrap();
    assert_eq!(out, "X failed");
}

#[test]
fn test_undefined_helper_rejected_before_render() {
    let cache = standard_cache(false, ColorMode::Enabled);
    let err = cache.render(r#"{{colour "red"}}hi"#, &json!({})).unwrap_err();
    assert!(err.is_compile());
    assert_eq!(cache.stats().compilations, 0);
}

#[test]
fn test_missing_field_returns_no_output() {
    let cache = standard_cache(false, ColorMode::Disabled);
    let err = cache.render("{{QuestionIcon}} {{Missing}}", &json!({"Present": true})).unwrap_err();
    assert!(err.is_render());
}

#[test]
fn test_missing_color_argument_fails_render() {
    let cache = standard_cache(false, ColorMode::Enabled);
    let err = cache.render("{{color style}}{{ErrorIcon}}", &json!({})).unwrap_err();
    assert!(err.is_render());

    let out = cache.render("{{color style}}{{ErrorIcon}}", &json!({"style": "red"})).unwrap();
    assert_eq!(out, format!("{}X", color_code("red")));
}

#[test]
fn test_wrong_argument_count_rejected_at_compile() {
    let cache = standard_cache(false, ColorMode::Enabled);
    let err = cache.get_or_compile(r#"{{color "red" "blue"}}"#).unwrap_err();
    assert!(err.is_compile());
}

// =============================================================================
// Cache behaviour
// =============================================================================

#[test]
fn test_independent_caches_do_not_share_entries() {
    let plain = standard_cache(false, ColorMode::Disabled);
    let fancy = standard_cache(true, ColorMode::Disabled);

    assert_eq!(plain.render("{{ErrorIcon}}", &json!({})).unwrap(), "X");
    assert_eq!(fancy.render("{{ErrorIcon}}", &json!({})).unwrap(), "✘");
    assert_eq!(plain.stats().compilations, 1);
    assert_eq!(fancy.stats().compilations, 1);
}

#[test]
fn test_same_output_different_sources() {
    let cache = standard_cache(false, ColorMode::Disabled);
    let a = cache.render("{{ErrorIcon}}", &json!({})).unwrap();
    let b = cache.render("X", &json!({})).unwrap();
    assert_eq!(a, b);
    assert_eq!(cache.len(), 2);
    assert!(cache.contains("X"));
    assert!(cache.contains("{{ErrorIcon}}"));
}

#[test]
fn test_shared_cache_across_threads() {
    let registry = HelperRegistry::builder()
        .helper("upper", 1, |args| args[0].to_uppercase())
        .build();
    let cache = Arc::new(TemplateCache::new(registry));

    let handles: Vec<_> = (0..100)
        .map(|i| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || cache.render(r#"Hi {{upper "bob"}}!"#, &json!({ "n": i })))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), "Hi BOB!");
    }
    assert_eq!(cache.stats().compilations, 1);
}

#[test]
fn test_compiled_handle_renders_different_data() {
    let cache = standard_cache(false, ColorMode::Disabled);
    let compiled = cache.get_or_compile("{{QuestionIcon}} {{message}}").unwrap();

    assert_eq!(cache.execute(&compiled, &json!({"message": "one"})).unwrap(), "? one");
    assert_eq!(cache.execute(&compiled, &json!({"message": "two"})).unwrap(), "? two");
    assert_eq!(compiled.source(), "{{QuestionIcon}} {{message}}");
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_plain_text_renders_verbatim(text in "[a-zA-Z0-9 .,!?:()-]{0,48}") {
        let cache = standard_cache(false, ColorMode::Enabled);
        let first = cache.render(&text, &json!({})).unwrap();
        let second = cache.render(&text, &json!({})).unwrap();
        prop_assert_eq!(&first, &text);
        prop_assert_eq!(&second, &text);
        prop_assert_eq!(cache.stats().compilations, 1);
    }
}
