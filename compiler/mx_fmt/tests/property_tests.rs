//! Property-based tests for the formatter.
//!
//! These tests use proptest to generate documents and verify:
//! 1. Order: edits are sorted, non-overlapping and inside the text, even
//!    for garbage input
//! 2. Idempotence: formatting the formatted text produces no edits
//! 3. Width: joined text never runs past the limit unless a word does
//! 4. Values: attribute order and value bodies survive quote enforcement

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use mx_fmt::{apply_edits, format_document, FormatConfig, Quotation, TextEdit};
use mx_ir::{Document, NodeId};
use proptest::prelude::*;

// -- Document Generation Strategies --

fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9]{0,5}").expect("valid regex")
}

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9.,]{1,12}").expect("valid regex")
}

/// Whitespace between siblings, possibly empty.
fn gap_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", " ", "   ", "\n", "\n  ", "\n\n\n\n", " \n\t "])
        .prop_map(str::to_owned)
}

/// Whitespace before an attribute, never empty.
fn separator_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![" ", "  ", "\n", "\n      "]).prop_map(str::to_owned)
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((gap_strategy(), word_strategy()), 1..8).prop_map(|words| {
        words
            .into_iter()
            .map(|(gap, word)| format!("{gap}{word}"))
            .collect()
    })
}

fn attributes_strategy() -> impl Strategy<Value = String> {
    let attribute = (
        separator_strategy(),
        name_strategy(),
        prop::string::string_regex("[a-z ]{0,10}").expect("valid regex"),
    );
    prop::collection::vec(attribute, 0..4).prop_map(|attributes| {
        attributes
            .into_iter()
            .map(|(sep, name, value)| format!("{sep}{name}=\"{value}\""))
            .collect()
    })
}

fn node_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (name_strategy(), attributes_strategy(), gap_strategy())
            .prop_map(|(name, attributes, gap)| format!("<{name}{attributes}{gap}/>")),
        text_strategy(),
        Just("<!-- note -->".to_owned()),
    ];
    leaf.prop_recursive(4, 40, 5, |inner| {
        (
            name_strategy(),
            attributes_strategy(),
            prop::collection::vec((gap_strategy(), inner), 0..5),
            gap_strategy(),
        )
            .prop_map(|(name, attributes, children, tail)| {
                let mut element = format!("<{name}{attributes}>");
                for (gap, child) in children {
                    element.push_str(&gap);
                    element.push_str(&child);
                }
                element.push_str(&tail);
                element.push_str(&format!("</{name}>"));
                element
            })
    })
}

fn document_strategy() -> impl Strategy<Value = String> {
    (gap_strategy(), node_strategy(), gap_strategy())
        .prop_map(|(leading, root, trailing)| format!("{leading}{root}{trailing}"))
}

/// Settings that keep formatting idempotent. Preserving attribute line
/// breaks together with splitting attributes is left out: the first pass
/// puts every attribute on its own line, which the second pass preserves at
/// a different indentation.
fn config_strategy() -> impl Strategy<Value = FormatConfig> {
    (
        prop::sample::select(vec![0usize, 8, 20, 40, 100]),
        prop::sample::select(vec![1usize, 2, 4]),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(width, tab_size, join, split, preserve, space, bracket)| {
            FormatConfig {
                closing_bracket_new_line: bracket,
                ..FormatConfig::default()
                    .with_max_line_width(width)
                    .with_tab_size(tab_size)
                    .with_join_content_lines(join)
                    .with_split_attributes(split)
                    .with_preserve_attribute_line_breaks(preserve && !split)
                    .with_space_before_empty_close_tag(space)
            }
        })
}

/// Any mix of markup fragments, well-formed or not.
fn garbage_strategy() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("<a>"),
        Just("</a>"),
        Just("<b x='1' y=\"2\">"),
        Just("</b >"),
        Just("<c/>"),
        Just("<d z=\"3"),
        Just("<!-- c -->"),
        Just("<!--"),
        Just("<?xml version='1.0' ?>"),
        Just("<![CDATA[ x ]]>"),
        Just("<!DOCTYPE d>"),
        Just("<"),
        Just(">"),
        Just("="),
        Just("\""),
        Just(" "),
        Just("\n"),
        Just("\r\n"),
        Just("word"),
        Just("é"),
    ];
    prop::collection::vec(piece, 0..24).prop_map(|pieces| pieces.concat())
}

// -- Helpers --

fn format_edits(text: &str, config: &FormatConfig) -> Vec<TextEdit> {
    let doc = mx_parse::parse(text).document;
    format_document(&doc, config)
}

fn format(text: &str, config: &FormatConfig) -> String {
    apply_edits(text, &format_edits(text, config))
}

fn collect_attributes(doc: &Document, id: NodeId, out: &mut Vec<(String, String)>) {
    let node = doc.node(id);
    if let Some(element) = node.as_element() {
        for attribute in &element.attributes {
            out.push((
                doc.attribute_name(attribute).to_owned(),
                doc.attribute_value(attribute).unwrap_or_default().to_owned(),
            ));
        }
    }
    for &child in &node.children {
        collect_attributes(doc, child, out);
    }
}

fn attributes_of(text: &str) -> Vec<(String, String)> {
    let doc = mx_parse::parse(text).document;
    let mut attributes = Vec::new();
    for &root in doc.roots() {
        collect_attributes(&doc, root, &mut attributes);
    }
    attributes
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn edits_are_ordered(text in garbage_strategy(), config in config_strategy()) {
        let edits = format_edits(&text, &config);
        let mut previous_end = 0;
        for edit in &edits {
            prop_assert!(edit.start <= edit.end, "inverted edit {}", edit);
            prop_assert!(edit.start >= previous_end, "overlapping edit {}", edit);
            prop_assert!(edit.end as usize <= text.len());
            prop_assert!(text.is_char_boundary(edit.start as usize));
            prop_assert!(text.is_char_boundary(edit.end as usize));
            previous_end = edit.end;
        }
    }

    #[test]
    fn formatting_is_idempotent(text in document_strategy(), config in config_strategy()) {
        let first = format(&text, &config);
        let second = format_edits(&first, &config);
        prop_assert!(
            second.is_empty(),
            "second pass changed {:?}:\n{:?}",
            first,
            second
        );
    }

    #[test]
    fn only_whitespace_changes(text in document_strategy(), config in config_strategy()) {
        let formatted = format(&text, &config);
        let strip = |s: &str| s.split_whitespace().collect::<String>();
        prop_assert_eq!(strip(&formatted), strip(&text));
    }

    #[test]
    fn joined_text_respects_width(
        words in prop::collection::vec(word_strategy(), 1..20),
        gaps in prop::collection::vec(gap_strategy(), 20),
        width in 10usize..60,
    ) {
        let mut text = String::from("<a>");
        for (i, word) in words.iter().enumerate() {
            if i > 0 {
                let gap = if gaps[i].is_empty() { " " } else { gaps[i].as_str() };
                text.push_str(gap);
            }
            text.push_str(word);
        }
        text.push_str("</a>");

        let config = FormatConfig::default()
            .with_max_line_width(width)
            .with_join_content_lines(true);
        let formatted = format(&text, &config);
        let content = formatted
            .strip_prefix("<a>")
            .and_then(|rest| rest.strip_suffix("</a>"))
            .unwrap();
        for line in content.lines() {
            let line = line.trim_end();
            prop_assert!(
                line.chars().count() <= width || !line.contains(' '),
                "line {:?} exceeds {}",
                line,
                width
            );
        }
    }

    #[test]
    fn quote_enforcement_keeps_values(
        values in prop::collection::vec(
            (prop::string::string_regex("[a-z '\"]{0,8}").expect("valid regex"), any::<bool>()),
            1..5,
        ),
        single in any::<bool>(),
    ) {
        let mut text = String::from("<a");
        for (i, (value, prefer_single)) in values.iter().enumerate() {
            // The delimiting quote must not occur in the value.
            let quote = match (value.contains('"'), value.contains('\'')) {
                (true, true) => continue,
                (true, false) => '\'',
                (false, true) => '"',
                (false, false) if *prefer_single => '\'',
                (false, false) => '"',
            };
            text.push_str(&format!(" v{i}={quote}{value}{quote}"));
        }
        text.push_str("/>");

        let quotation = if single { Quotation::Single } else { Quotation::Double };
        let config = FormatConfig::default().with_preferred_quotes(quotation);
        let formatted = format(&text, &config);
        prop_assert_eq!(attributes_of(&formatted), attributes_of(&text));
    }
}
