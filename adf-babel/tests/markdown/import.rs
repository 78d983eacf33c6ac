//! Import tests for Markdown format (Markdown → tree)

use adf_babel::format::Format;
use adf_babel::formats::markdown::MarkdownFormat;
use adf_babel::{parse_from_markdown, Mark, Node};

fn blocks(source: &str) -> Vec<Node> {
    parse_from_markdown(source).content
}

fn link(text: &str, href: &str) -> Node {
    Node::marked_text(text, vec![Mark::link(href)])
}

#[test]
fn end_to_end_scenario_parses_into_expected_blocks() {
    let doc = parse_from_markdown(
        "# Title\n\nSome **bold** and [a link](https://example.com).\n\n- one\n- two",
    );
    assert_eq!(
        doc.content,
        vec![
            Node::heading(1, vec![Node::text("Title")]),
            Node::paragraph(vec![
                Node::text("Some "),
                Node::marked_text("bold", vec![Mark::Strong]),
                Node::text(" and "),
                link("a link", "https://example.com"),
                Node::text("."),
            ]),
            Node::BulletList(vec![
                Node::list_item(vec![Node::text("one")]),
                Node::list_item(vec![Node::text("two")]),
            ]),
        ]
    );
}

#[test]
fn headings_clamp_to_six_and_need_a_space() {
    assert_eq!(
        blocks("####### Deep"),
        vec![Node::heading(6, vec![Node::text("Deep")])]
    );
    assert_eq!(
        blocks("#hashtag"),
        vec![Node::paragraph(vec![Node::text("#hashtag")])]
    );
}

#[test]
fn unterminated_bold_stays_literal() {
    assert_eq!(
        blocks("**bold without close"),
        vec![Node::paragraph(vec![Node::text("**bold without close")])]
    );
    assert_eq!(
        blocks("`open code and [open link"),
        vec![Node::paragraph(vec![Node::text("`open code and [open link")])]
    );
}

#[test]
fn empty_input_is_one_empty_paragraph() {
    assert_eq!(blocks(""), vec![Node::paragraph(vec![])]);
    assert_eq!(blocks("\n\n   \n"), vec![Node::paragraph(vec![])]);
}

#[test]
fn paragraph_lines_join_with_spaces() {
    assert_eq!(
        blocks("first line\nsecond line\n\nnext"),
        vec![
            Node::paragraph(vec![Node::text("first line second line")]),
            Node::paragraph(vec![Node::text("next")]),
        ]
    );
}

#[test]
fn a_list_interrupts_a_paragraph() {
    assert_eq!(
        blocks("intro\n- item"),
        vec![
            Node::paragraph(vec![Node::text("intro")]),
            Node::BulletList(vec![Node::list_item(vec![Node::text("item")])]),
        ]
    );
}

#[test]
fn bullet_lists_split_on_marker_change() {
    assert_eq!(
        blocks("- a\n* b"),
        vec![
            Node::BulletList(vec![Node::list_item(vec![Node::text("a")])]),
            Node::BulletList(vec![Node::list_item(vec![Node::text("b")])]),
        ]
    );
}

#[test]
fn ordered_items_accept_both_delimiters() {
    assert_eq!(
        blocks("5. a\n3) b"),
        vec![Node::OrderedList(vec![
            Node::list_item(vec![Node::text("a")]),
            Node::list_item(vec![Node::text("b")]),
        ])]
    );
}

#[test]
fn blockquote_content_is_block_parsed() {
    assert_eq!(
        blocks("> quoted **text**\n> more\n>\n> # inner"),
        vec![Node::Blockquote(vec![
            Node::paragraph(vec![
                Node::text("quoted "),
                Node::marked_text("text", vec![Mark::Strong]),
                Node::text(" more"),
            ]),
            Node::heading(1, vec![Node::text("inner")]),
        ])]
    );
}

#[test]
fn fenced_code_is_verbatim_until_the_closing_fence() {
    assert_eq!(
        blocks("```rust\nlet x = **not bold**;\n\n  indented\n```\nafter"),
        vec![
            Node::code_block(
                Some("rust".to_string()),
                "let x = **not bold**;\n\n  indented"
            ),
            Node::paragraph(vec![Node::text("after")]),
        ]
    );
    assert_eq!(
        blocks("```\nruns to the end"),
        vec![Node::code_block(None, "runs to the end")]
    );
}

#[test]
fn thematic_breaks() {
    assert_eq!(blocks("***"), vec![Node::Rule]);
    assert_eq!(blocks("  ___  "), vec![Node::Rule]);
    assert_eq!(
        blocks("-*-"),
        vec![Node::paragraph(vec![Node::text("-*-")])]
    );
}

#[test]
fn images_are_downgraded_to_links() {
    assert_eq!(
        blocks("![diagram](https://x.test/d.png)"),
        vec![Node::paragraph(vec![link("diagram", "https://x.test/d.png")])]
    );
    assert_eq!(
        blocks("see ![d](https://x.test/d.png) here"),
        vec![Node::paragraph(vec![
            Node::text("see "),
            link("[d](https://x.test/d.png)", "https://x.test/d.png"),
            Node::text(" here"),
        ])]
    );
}

#[test]
fn inline_precedence() {
    assert_eq!(
        blocks("__strong__ _em_ `*code*` [`x`](https://x.test)"),
        vec![Node::paragraph(vec![
            Node::marked_text("strong", vec![Mark::Strong]),
            Node::text(" "),
            Node::marked_text("em", vec![Mark::Em]),
            Node::text(" "),
            Node::marked_text("*code*", vec![Mark::Code]),
            Node::text(" "),
            link("`x`", "https://x.test"),
        ])]
    );
}

#[test]
fn backslash_escapes_are_literal() {
    assert_eq!(
        blocks(r"2 \* 3 = \[six\]"),
        vec![Node::paragraph(vec![Node::text("2 * 3 = [six]")])]
    );
}

#[test]
fn format_trait_parses_markdown() {
    let doc = MarkdownFormat::default().parse("## Hi").unwrap();
    assert_eq!(doc.content, vec![Node::heading(2, vec![Node::text("Hi")])]);
}
