//! Tests for the legacy markup → Markdown fallback

use adf_babel::format::Format;
use adf_babel::formats::html::HtmlFormat;
use adf_babel::{html_to_markdown, Mark, Node};

#[test]
fn typical_legacy_description() {
    let html = r#"<p>Deploy <strong>now</strong> &amp; check the <a href="https://x.test/runbook">runbook</a>.</p>
<p>Steps:<br/>1. <em>stop</em><br>2. <code>restart</code></p>"#;
    assert_eq!(
        html_to_markdown(html),
        "Deploy **now** & check the [runbook](https://x.test/runbook).\n\nSteps:\n\n1. *stop*\n\n2. `restart`"
    );
}

#[test]
fn image_inside_anchor_becomes_linked_image() {
    let html = r#"<a href="https://x.test/full.png"><img src="https://x.test/thumb.png" alt="Shot"></a>"#;
    assert_eq!(
        html_to_markdown(html),
        "[![Shot](https://x.test/thumb.png)](https://x.test/full.png)"
    );
}

#[test]
fn relative_images_keep_only_alt() {
    assert_eq!(
        html_to_markdown(r#"<IMG SRC="/secure/attachment/1/a.png" ALT="A">"#),
        "![A]"
    );
}

#[test]
fn unknown_markup_is_stripped() {
    assert_eq!(
        html_to_markdown("<div><span class=\"x\">kept</span></div><table><tr><td>cell</td></tr></table>"),
        "keptcell"
    );
}

#[test]
fn blank_runs_collapse() {
    assert_eq!(
        html_to_markdown("<p>a</p>\n\n\n\n<p>b</p>\n   \n"),
        "a\n\nb"
    );
}

#[test]
fn plain_text_passes_through() {
    assert_eq!(html_to_markdown("nothing to do"), "nothing to do");
    assert_eq!(html_to_markdown(""), "");
}

#[test]
fn html_format_parses_through_markdown() {
    let doc = HtmlFormat::default()
        .parse("<p>Hi <b>there</b></p>")
        .unwrap();
    assert_eq!(
        doc.content,
        vec![Node::paragraph(vec![
            Node::text("Hi "),
            Node::marked_text("there", vec![Mark::Strong]),
        ])]
    );
}
