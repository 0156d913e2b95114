// rulesplit-core/tests/engine_properties.rs
//! Behavioural tests for the rule engine: ordering, non-reprocessing,
//! global-match enforcement, exhaustive matching and capture groups.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rulesplit_core::{
    replace, ContentItem, Pattern, Replacement, Replacer, Rule, RuleEngine, RulesplitError,
    SegmentationEngine,
};
use test_log::test;

fn node(value: &str) -> Replacer<String> {
    Replacer::value(Replacement::Node(value.to_string()))
}

fn marker(value: &str) -> String {
    format!("<{}>", value)
}

#[test]
fn placeholders_pipeline_end_to_end() {
    let rules = vec![
        Rule::new(r"\{name\}").with_replacer(node("Alice")),
        Rule::new(r"\{count\}").with_replacer(node("5")),
    ];
    let sequence = replace("Hello {name}, you have {count} items", rules).unwrap();
    assert_eq!(
        sequence.into_items(),
        vec![
            ContentItem::literal("Hello "),
            ContentItem::node("Alice".to_string(), "{name}1"),
            ContentItem::literal(", you have "),
            ContentItem::node("5".to_string(), "{count}1"),
            ContentItem::literal(" items"),
        ]
    );
}

#[test]
fn every_digit_is_replaced_in_order() {
    let rules = vec![Rule::new(r"\d").with_replacer(node("#"))];
    let sequence = replace("a1b2c3", rules).unwrap();
    let items = sequence.items();
    assert_eq!(sequence.nodes().count(), 3);
    let literals: Vec<&str> = items
        .iter()
        .filter(|item| item.is_literal())
        .filter_map(ContentItem::as_text)
        .collect();
    assert_eq!(literals, vec!["a", "b", "c"]);
    assert!(items[0].is_literal());
    assert!(items[1].is_node());
    assert!(items[5].is_node());
}

#[test]
fn capture_groups_reach_the_replacer() {
    let rules = vec![Rule::new(r"(\d+)-(\d+)").with_replacer(Replacer::func(|_, groups| {
        Replacement::Node(format!("{}{}", groups[1].unwrap_or(""), groups[0].unwrap_or("")))
    }))];
    let sequence = replace("10-20", rules).unwrap();
    let nodes: Vec<&String> = sequence.nodes().collect();
    assert_eq!(nodes, vec!["2010"]);
    assert_eq!(sequence.len(), 1);
}

#[test]
fn non_participating_groups_keep_their_position() {
    let rules = vec![Rule::<String>::new(r"(a)|(b)").with_replacer(Replacer::func(|_, groups| {
        Replacement::Text(format!("{:?}", groups))
    }))];
    let sequence = replace("b", rules).unwrap();
    assert_eq!(sequence.literal_text(), r#"[None, Some("b")]"#);
}

#[test]
fn replaced_content_is_not_rescanned() {
    let rules = vec![
        Rule::new("cat").with_replacer(node("cat")),
        Rule::new("a").with_replacer(node("A")),
    ];
    let sequence = replace("a cat", rules).unwrap();
    assert_eq!(
        sequence.into_items(),
        vec![
            ContentItem::node("A".to_string(), "a0"),
            ContentItem::literal(" "),
            ContentItem::node("cat".to_string(), "cat1"),
        ]
    );
}

#[test]
fn text_replacements_are_not_rescanned() {
    let rules = vec![
        Rule::new("x").with_replacer(Replacer::value(Replacement::text("y"))),
        Rule::new("y").with_replacer(node("Y")),
    ];
    let sequence = replace("xy", rules).unwrap();
    assert_eq!(
        sequence.into_items(),
        vec![ContentItem::text("y"), ContentItem::node("Y".to_string(), "y0")]
    );
}

#[test]
fn non_global_pattern_always_fails() {
    for text in ["", "no digits", "1", "1 2 3"] {
        let err = replace::<String>(text, vec![Rule::literal(r"/\d/")]).unwrap_err();
        assert!(matches!(err, RulesplitError::NonGlobalPattern(_)), "text {:?}: {}", text, err);
        assert!(err.is_validation());
    }
}

#[test]
fn invalid_rule_prevents_every_replacement() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let rules = vec![
        Rule::new("a").with_replacer(Replacer::func(move |whole, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Replacement::Node(whole.to_string())
        })),
        Rule::literal("/b/i"),
    ];
    assert!(replace("aaa", rules).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn slash_delimited_strings_match_their_own_text() {
    let sequence = replace("GET /api/users", vec![Rule::new("/api/").with_replacer(node("API"))]).unwrap();
    assert_eq!(sequence.to_plain_string(), "GET APIusers");

    let sequence = replace("x /usr/bin/gsm y", vec![Rule::new("/usr/bin/gsm").with_replacer(node("X"))]).unwrap();
    assert_eq!(sequence.to_plain_string(), "x X y");
}

#[test]
fn no_op_rule_keeps_the_text() {
    let first = vec![Rule::new("o").with_replacer(node("0"))];
    let second = vec![
        Rule::new("o").with_replacer(node("0")),
        Rule::new("zzz").with_replacer(node("!")),
    ];
    let before = replace("foo bar", first).unwrap();
    let after = replace("foo bar", second).unwrap();
    assert_eq!(before.literal_text(), after.literal_text());
    assert_eq!(before, after);
}

#[test]
fn segments_reconstruct_the_source() {
    let rules = vec![
        Rule::new(r"\{\w+\}").with_replacer(Replacer::func(|whole, _| Replacement::Node(whole.to_string()))),
        Rule::new(r"\d+").with_replacer(Replacer::func(|whole, _| Replacement::Node(whole.to_string()))),
        Rule::new("é+").with_replacer(Replacer::func(|whole, _| Replacement::Node(whole.to_string()))),
    ];
    let text = "café {user} owes 12 €, {user} paid 3";
    let sequence = replace(text, rules).unwrap();
    assert_eq!(sequence.to_plain_string(), text);
}

#[test]
fn repeated_calls_are_identical() {
    let engine = RuleEngine::<String>::new(vec![Rule::new(r"\w+").with_replacer(Replacer::func(|w, _| {
        Replacement::Node(marker(w))
    }))])
    .unwrap();
    let first = engine.segment("one two three").unwrap();
    let second = engine.segment("one two three").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_plain_string(), "<one> <two> <three>");
}

#[test]
fn engine_is_shareable_between_threads() {
    let engine = RuleEngine::<String>::new(vec![Rule::new("x").with_replacer(node("X"))]).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.segment("axbxc").unwrap().to_plain_string())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "aXbXc");
    }
}

#[test]
fn replacer_failure_propagates() {
    let rules = vec![Rule::new("b")
        .named("strict")
        .with_replacer(Replacer::try_func(|whole, _| anyhow::bail!("cannot replace {}", whole)))];
    let err = replace::<String>("abc", rules).unwrap_err();
    assert_eq!(err.to_string(), "Replacer for rule 'strict' failed: cannot replace b");
}

#[test]
fn prebuilt_global_regex_is_accepted() {
    let pattern = Pattern::from_regex(regex::Regex::new("(?i)hello").unwrap(), true);
    let sequence = replace("Hello hello", vec![Rule::new(pattern).with_replacer(node("hi"))]).unwrap();
    assert_eq!(sequence.to_plain_string(), "hi hi");
}

#[test]
fn empty_text_yields_empty_sequence_once_a_rule_runs() {
    let sequence = replace("", vec![Rule::new("a").with_replacer(node("A"))]).unwrap();
    assert!(sequence.is_empty());
}
