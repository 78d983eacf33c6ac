//! Export tests for Markdown format (tree → Markdown)

use crate::common::kitchen_sink;
use adf_babel::format::Format;
use adf_babel::formats::markdown::MarkdownFormat;
use adf_babel::{parse_from_markdown, serialize_to_markdown, Document, Mark, MarkdownOptions, Node};
use insta::assert_snapshot;
use std::collections::HashMap;

fn render(doc: &Document) -> String {
    serialize_to_markdown(doc, &MarkdownOptions::default())
}

#[test]
fn kitchen_sink_markdown() {
    let md = render(&kitchen_sink());
    assert_snapshot!(md, @r#"
    ## Release notes

    Ship **today**, see [the board](https://tracker.example.com/b/1)
    :check: owner @Sam

    1. build
    2. `tag`

    Mind the gap

    ```sh
    make release
    ```

    first child

    second child

    ---

    ![Diagram.png]
    "#);
}

#[test]
fn end_to_end_scenario_renders_back() {
    let source = "# Title\n\nSome **bold** and [a link](https://example.com).\n\n- one\n- two";
    assert_eq!(render(&parse_from_markdown(source)), source);
}

#[test]
fn ordered_lists_are_renumbered() {
    assert_eq!(
        render(&parse_from_markdown("5. a\n3. b\n9. c")),
        "1. a\n2. b\n3. c"
    );
}

#[test]
fn unterminated_bold_survives_rendering() {
    let md = render(&parse_from_markdown("**bold without close"));
    assert!(md.contains("**bold without close"));
}

#[test]
fn special_characters_are_escaped_only_when_needed() {
    let doc = Document::new(vec![
        Node::paragraph(vec![Node::text("snake_case and 2*3")]),
        Node::paragraph(vec![Node::text("*not em*")]),
    ]);
    assert_eq!(render(&doc), "snake_case and 2*3\n\n\\*not em\\*");
}

#[test]
fn underline_is_dropped_but_text_kept() {
    let doc = Document::new(vec![Node::paragraph(vec![Node::marked_text(
        "under",
        vec![Mark::Underline, Mark::Strong],
    )])]);
    assert_eq!(render(&doc), "**under**");
}

#[test]
fn tables_render_as_pipe_rows() {
    let cell = |text: &str| Node::TableCell(vec![Node::paragraph(vec![Node::text(text)])]);
    let doc = Document::new(vec![Node::Table(vec![
        Node::TableRow(vec![
            Node::TableHeader(vec![Node::paragraph(vec![Node::text("Key")])]),
            Node::TableHeader(vec![Node::paragraph(vec![Node::text("Value")])]),
        ]),
        Node::TableRow(vec![cell("a|b"), cell("1")]),
        Node::TableRow(vec![cell(""), cell("")]),
        Node::TableRow(vec![cell("only")]),
    ])]);
    assert_eq!(
        render(&doc),
        "Key | Value\n--- | ---\na\\|b | 1\nonly | "
    );
}

#[test]
fn nested_list_content_is_indented() {
    let doc = Document::new(vec![Node::BulletList(vec![Node::ListItem(vec![
        Node::paragraph(vec![Node::text("parent")]),
        Node::BulletList(vec![Node::list_item(vec![Node::text("child")])]),
    ])])]);
    assert_eq!(render(&doc), "- parent\n  - child");
}

#[test]
fn blockquote_keeps_paragraph_breaks() {
    let doc = Document::new(vec![Node::Blockquote(vec![
        Node::paragraph(vec![Node::text("one")]),
        Node::paragraph(vec![Node::text("two")]),
    ])]);
    assert_eq!(render(&doc), "> one\n>\n> two");
}

#[test]
fn bullet_marker_is_configurable() {
    let doc = parse_from_markdown("- a\n- b");
    let options = HashMap::from([("bullet-marker".to_string(), "+".to_string())]);
    let md = MarkdownFormat::default()
        .serialize_with_options(&doc, &options)
        .unwrap();
    assert_eq!(md, "+ a\n+ b");
}
