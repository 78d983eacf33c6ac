//! Shared fixtures for integration tests.

use adf_babel::Document;

/// A description exercising most node and mark types, as stored by the tracker.
pub const KITCHEN_SINK: &str = r##"{
  "type": "doc",
  "version": 1,
  "content": [
    {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Release notes"}]},
    {"type": "paragraph", "content": [
      {"type": "text", "text": "Ship "},
      {"type": "text", "text": "today", "marks": [{"type": "strong"}]},
      {"type": "text", "text": ", see "},
      {"type": "text", "text": "the board", "marks": [{"type": "link", "attrs": {"href": "https://tracker.example.com/b/1"}}]},
      {"type": "hardBreak"},
      {"type": "emoji", "attrs": {"shortName": ":check:"}},
      {"type": "text", "text": " owner "},
      {"type": "mention", "attrs": {"id": "abc", "text": "Sam"}}
    ]},
    {"type": "orderedList", "attrs": {"order": 7}, "content": [
      {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "build"}]}]},
      {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "tag", "marks": [{"type": "code"}]}]}]}
    ]},
    {"type": "panel", "attrs": {"panelType": "warning"}, "content": [
      {"type": "paragraph", "content": [{"type": "text", "text": "Mind the gap"}]}
    ]},
    {"type": "codeBlock", "attrs": {"language": "sh"}, "content": [{"type": "text", "text": "make release"}]},
    {"type": "futureNodeType", "content": [
      {"type": "paragraph", "content": [{"type": "text", "text": "first child"}]},
      {"type": "paragraph", "content": [{"type": "text", "text": "second child"}]}
    ]},
    {"type": "rule"},
    {"type": "mediaSingle", "content": [
      {"type": "media", "attrs": {"id": "9f2c", "type": "file", "alt": "Diagram.png", "width": 900}}
    ]}
  ]
}"##;

pub fn kitchen_sink() -> Document {
    Document::from_json(KITCHEN_SINK).expect("fixture is valid JSON")
}
