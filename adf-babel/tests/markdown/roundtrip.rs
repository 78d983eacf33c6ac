//! Round-trip properties of the Markdown dialect

use adf_babel::{parse_from_markdown, serialize_to_markdown, Document, Mark, MarkdownOptions, Node};
use proptest::collection::vec;
use proptest::prelude::*;

fn render(source: &str) -> String {
    serialize_to_markdown(&parse_from_markdown(source), &MarkdownOptions::default())
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

// A word, optionally wrapped in one inline construct.
fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => word(),
        1 => word().prop_map(|w| format!("**{w}**")),
        1 => word().prop_map(|w| format!("*{w}*")),
        1 => word().prop_map(|w| format!("`{w}`")),
        1 => (word(), word()).prop_map(|(text, path)| format!("[{text}](https://example.com/{path})")),
    ]
}

fn line() -> impl Strategy<Value = String> {
    vec(token(), 1..6).prop_map(|tokens| tokens.join(" "))
}

// A line that opens nothing on its own but joins into `* word`, `1. word`,
// `> word` and the like once the paragraph is put back on one line.
fn marker_paragraph() -> impl Strategy<Value = String> {
    let marker = prop_oneof![
        Just("*"),
        Just("-"),
        Just("+"),
        Just("1."),
        Just("2)"),
        Just("\\>"),
        Just("\\#"),
        Just("\\---"),
    ];
    (marker, line()).prop_map(|(marker, rest)| format!("{marker}\n{rest}"))
}

fn block() -> impl Strategy<Value = String> {
    prop_oneof![
        vec(line(), 1..3).prop_map(|lines| lines.join("\n")),
        marker_paragraph(),
        (1..=6usize, line()).prop_map(|(level, text)| format!("{} {text}", "#".repeat(level))),
        vec(line(), 1..4).prop_map(|items| items
            .iter()
            .map(|item| format!("- {item}"))
            .collect::<Vec<_>>()
            .join("\n")),
        vec(line(), 1..4).prop_map(|items| items
            .iter()
            .enumerate()
            .map(|(index, item)| format!("{}. {item}", index * 3 + 2))
            .collect::<Vec<_>>()
            .join("\n")),
    ]
}

fn document() -> impl Strategy<Value = String> {
    vec(block(), 1..5).prop_map(|blocks| blocks.join("\n\n"))
}

fn reparse(doc: &Document) -> Vec<Node> {
    parse_from_markdown(&serialize_to_markdown(doc, &MarkdownOptions::default())).content
}

#[test]
fn joined_marker_lines_reach_a_fixed_point() {
    for source in ["*\n1", "\\>#", "-\nnot a list", "1.\nnot a list", "\\> not a quote"] {
        let once = render(source);
        assert_eq!(render(&once), once, "{source:?}");
    }
    assert_eq!(render("*\n1"), r"\* 1");
    assert_eq!(render("\\>#"), r"\>#");
}

#[test]
fn paragraphs_keep_their_type_through_markdown() {
    let paragraphs = [
        "- not a list",
        "* not a list",
        "+ not a list",
        "1. not a list",
        "3) not a list",
        "> not a quote",
        "# not a heading",
        "---",
        "```rust",
        "![alt](https://x.test/a.png)",
    ];
    let doc = Document::new(
        paragraphs
            .iter()
            .map(|text| Node::paragraph(vec![Node::text(*text)]))
            .collect(),
    );
    assert_eq!(reparse(&doc), doc.content);
}

#[test]
fn block_types_survive_markdown() {
    let doc = Document::new(vec![
        Node::heading(2, vec![Node::text("> Title")]),
        Node::paragraph(vec![Node::text("1. intro")]),
        Node::BulletList(vec![
            Node::list_item(vec![Node::text("- one")]),
            Node::list_item(vec![Node::text("two")]),
        ]),
        Node::Blockquote(vec![Node::paragraph(vec![Node::text("# quoted")])]),
        Node::Rule,
        Node::paragraph(vec![Node::text("* tail")]),
    ]);
    assert_eq!(reparse(&doc), doc.content);
}

#[test]
fn link_with_parentheses_survives_markdown() {
    let href = "https://en.wikipedia.org/wiki/Rust_(programming_language)";
    let doc = Document::new(vec![Node::paragraph(vec![
        Node::text("See "),
        Node::marked_text("Rust", vec![Mark::link(href)]),
        Node::text(" (the language)."),
    ])]);
    assert_eq!(reparse(&doc), doc.content);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn rendering_reaches_a_fixed_point(source in document()) {
        let once = render(&source);
        let twice = render(&once);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn plain_paragraph_text_survives_markdown(text in "[-*+#>!`_1.)a-z ]{1,24}") {
        let text = text.trim();
        prop_assume!(!text.is_empty());
        let doc = Document::new(vec![Node::paragraph(vec![Node::text(text)])]);
        prop_assert_eq!(reparse(&doc), doc.content);
    }

    #[test]
    fn arbitrary_input_terminates(source in "\\PC{0,120}") {
        let doc = parse_from_markdown(&source);
        prop_assert!(!doc.content.is_empty());
        let _ = serialize_to_markdown(&doc, &MarkdownOptions::default());
    }

    #[test]
    fn delimiter_soup_terminates(source in "[*_`\\[\\]()!#>\\\\ a-]{0,80}") {
        let once = render(&source);
        let _ = render(&once);
    }
}
