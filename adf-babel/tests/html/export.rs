//! Export tests for HTML format (tree → display markup)

use crate::common::kitchen_sink;
use adf_babel::common::escape::escape_html;
use adf_babel::format::Format;
use adf_babel::formats::html::HtmlFormat;
use adf_babel::{serialize_to_html, AttachmentMap, Document, HtmlOptions, Mark, Node};
use insta::assert_snapshot;
use proptest::prelude::*;
use regex::Regex;
use std::collections::HashMap;

fn snapshot_without_styles(html: &str) -> String {
    let styles = Regex::new(r#" style=(?:'[^']*'|"[^"]*")"#).unwrap();
    styles.replace_all(html, "").into_owned()
}

fn render(doc: &Document) -> String {
    serialize_to_html(doc, &HtmlOptions::default())
}

#[test]
fn small_document_structure() {
    let doc = Document::new(vec![
        Node::heading(2, vec![Node::text("Notes")]),
        Node::paragraph(vec![
            Node::text("See "),
            Node::marked_text("docs", vec![Mark::link("https://x.test")]),
            Node::text(" & more"),
        ]),
        Node::BulletList(vec![Node::list_item(vec![Node::text("one")])]),
    ]);
    assert_snapshot!(snapshot_without_styles(&render(&doc)), @r#"
    <div class="adf-content">
    <h2>Notes</h2>
    <p>See <a href="https://x.test">docs</a> &amp; more</p>
    <ul><li><p>one</p></li></ul>
    </div>
    "#);
}

#[test]
fn script_text_is_escaped() {
    let doc = Document::new(vec![Node::paragraph(vec![Node::text(
        r#"<script>&"</script>"#,
    )])]);
    let html = render(&doc);
    assert!(html.contains("&lt;script&gt;&amp;&quot;&lt;/script&gt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn unknown_block_renders_its_children() {
    let html = render(&kitchen_sink());
    assert!(html.contains("first child"));
    assert!(html.contains("second child"));
    assert!(!html.contains("futureNodeType"));
}

#[test]
fn kitchen_sink_elements() {
    let attachments = AttachmentMap::from([("diagram.png".to_string(), "10042".to_string())]);
    let options = HtmlOptions::new("https://tracker.example.com/").with_attachments(attachments);
    let html = serialize_to_html(&kitchen_sink(), &options);

    assert!(html.starts_with("<div class=\"adf-content\""));
    assert!(html.contains(">Release notes</h2>"));
    assert!(html.contains("<strong>today</strong>"));
    assert!(html.contains("<a href=\"https://tracker.example.com/b/1\""));
    assert!(html.contains("<span title=\":check:\">✅</span>"));
    assert!(html.contains(">@Sam</span>"));
    assert!(html.contains("<ol "));
    assert!(!html.contains("start="));
    assert!(html.contains("background: #fffae6"));
    assert!(html.contains("data-language=\"sh\"><code>make release</code></pre>"));
    assert!(html.contains("<hr "));
    assert!(html.contains("src=\"jira-image://10042\""));
    assert!(html.contains("alt=\"Diagram.png\""));
    assert!(html.contains("width=\"600\""));
    assert!(html.contains("data-fallback=\"https://tracker.example.com\""));
}

#[test]
fn linked_external_image_keeps_its_url() {
    let doc = Document::from_json(
        r#"{"type":"doc","version":1,"content":[{"type":"mediaSingle","content":[
            {"type":"media","attrs":{"type":"link","url":"https://cdn.test/a.png","width":200},
             "marks":[{"type":"link","attrs":{"href":"https://cdn.test/page"}}]}
        ]}]}"#,
    )
    .unwrap();
    let html = snapshot_without_styles(&render(&doc));
    assert!(html.contains(
        "<a href=\"https://cdn.test/page\" target=\"_blank\"><img src=\"https://cdn.test/a.png\" alt=\"image\" width=\"200\" data-fallback=\"\" /></a>"
    ));
}

#[test]
fn empty_document_renders_nothing() {
    assert_eq!(render(&Document::default()), "");
}

#[test]
fn options_flow_through_the_format() {
    let doc = kitchen_sink();
    let options = HashMap::from([
        ("attachment-scheme".to_string(), "att".to_string()),
        ("max-image-width".to_string(), "250".to_string()),
    ]);
    let html = HtmlFormat::default()
        .serialize_with_options(&doc, &options)
        .unwrap();
    assert!(html.contains("src=\"att://9f2c\""));
    assert!(html.contains("width=\"250\""));
}

proptest! {
    #[test]
    fn text_is_always_escaped(text in "\\PC{1,60}") {
        let doc = Document::new(vec![Node::paragraph(vec![Node::text(text.clone())])]);
        let html = render(&doc);
        let expected = format!("{}</p>", escape_html(&text));
        prop_assert!(html.contains(&expected));
    }
}
