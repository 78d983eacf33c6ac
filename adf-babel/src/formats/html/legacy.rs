//! Legacy markup → Markdown fallback
//!
//! Older issues only carry a rendered HTML description. This converter turns
//! that markup into approximate Markdown with an ordered list of regex
//! rewrites. It makes no attempt at structure (lists, tables and headings
//! degrade to their text) and it never fails: markup it does not understand is
//! stripped and its text kept.
//!
//! The order of [`STEPS`] matters. Images and anchors are rewritten before any
//! tag stripping so their URLs survive, and entities are decoded last so that
//! decoded `<` characters are never mistaken for tags.

use crate::common::escape::unescape_html;
use crate::common::links::is_web_url;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

type Step = fn(&str) -> String;

/// The rewrite pipeline, applied in order.
pub const STEPS: &[(&str, Step)] = &[
    ("images", rewrite_images),
    ("anchors", rewrite_anchors),
    ("paragraphs", rewrite_paragraphs),
    ("line-breaks", rewrite_line_breaks),
    ("strong", rewrite_strong),
    ("emphasis", rewrite_emphasis),
    ("inline-code", rewrite_code),
    ("strip-tags", strip_tags),
    ("entities", decode_entities),
    ("normalize", normalize_lines),
];

static IMG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*["']([^"']+)["'][^>]*>"#).expect("valid img regex")
});
static IMG_ALT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\balt\s*=\s*["']([^"']*)["']"#).expect("valid alt regex"));
static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?\bhref\s*=\s*["']([^"']+)["'][^>]*>(.*?)</a\s*>"#)
        .expect("valid anchor regex")
});
static P_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</p\s*>").expect("valid p regex"));
static P_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<p(?:\s[^>]*)?>").expect("valid p regex"));
static BR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));
static STRONG: Lazy<Regex> = Lazy::new(|| tag_pair("strong").expect("valid strong regex"));
static B: Lazy<Regex> = Lazy::new(|| tag_pair("b").expect("valid b regex"));
static EM: Lazy<Regex> = Lazy::new(|| tag_pair("em").expect("valid em regex"));
static I: Lazy<Regex> = Lazy::new(|| tag_pair("i").expect("valid i regex"));
static CODE: Lazy<Regex> = Lazy::new(|| tag_pair("code").expect("valid code regex"));
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

fn tag_pair(tag: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?is)<{tag}(?:\s[^>]*)?>(.*?)</{tag}\s*>"))
}

/// Convert legacy HTML markup to Markdown.
pub fn html_to_markdown(html: &str) -> String {
    STEPS.iter().fold(html.to_string(), |text, (name, step)| {
        let next = step(&text);
        if next != text {
            tracing::trace!(step = *name, "legacy rewrite applied");
        }
        next
    })
}

fn rewrite_images(input: &str) -> String {
    IMG.replace_all(input, |caps: &Captures| {
        let src = &caps[1];
        let alt = IMG_ALT
            .captures(&caps[0])
            .map(|alt| alt[1].to_string())
            .filter(|alt| !alt.is_empty())
            .unwrap_or_else(|| "image".to_string());
        if is_web_url(src) {
            format!("![{alt}]({src})")
        } else {
            format!("![{alt}]")
        }
    })
    .into_owned()
}

fn rewrite_anchors(input: &str) -> String {
    ANCHOR
        .replace_all(input, |caps: &Captures| {
            format!("[{}]({})", remove_tags(&caps[2]), &caps[1])
        })
        .into_owned()
}

fn rewrite_paragraphs(input: &str) -> String {
    let closed = P_CLOSE.replace_all(input, "\n\n");
    P_OPEN.replace_all(&closed, "").into_owned()
}

fn rewrite_line_breaks(input: &str) -> String {
    BR.replace_all(input, "\n").into_owned()
}

fn rewrite_strong(input: &str) -> String {
    let text = wrap_pair(&STRONG, input, "**");
    wrap_pair(&B, &text, "**")
}

fn rewrite_emphasis(input: &str) -> String {
    let text = wrap_pair(&EM, input, "*");
    wrap_pair(&I, &text, "*")
}

fn rewrite_code(input: &str) -> String {
    wrap_pair(&CODE, input, "`")
}

fn wrap_pair(pattern: &Regex, input: &str, delimiter: &str) -> String {
    pattern
        .replace_all(input, |caps: &Captures| {
            format!("{delimiter}{}{delimiter}", remove_tags(&caps[1]))
        })
        .into_owned()
}

fn remove_tags(input: &str) -> String {
    ANY_TAG.replace_all(input, "").into_owned()
}

fn strip_tags(input: &str) -> String {
    remove_tags(input)
}

fn decode_entities(input: &str) -> String {
    unescape_html(input)
}

fn normalize_lines(input: &str) -> String {
    let joined = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    BLANK_RUN
        .replace_all(&joined, "\n\n")
        .trim()
        .to_string()
}
