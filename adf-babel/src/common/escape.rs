//! Escaping helpers shared by the converters.
//!
//! All literal text that ends up in generated markup goes through
//! [`escape_html`]; all literal text that ends up in generated Markdown goes
//! through [`escape_markdown`]. The Markdown parser undoes the latter with its
//! own backslash handling.

/// Characters the Markdown renderer backslash-escapes inside plain text runs.
pub const MARKDOWN_SPECIALS: &[char] = &['\\', '`', '*', '_', '[', ']'];

/// Escape `&`, `<`, `>` and `"` for inclusion in markup text or attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse of [`escape_html`]. `&amp;` is handled last so that `&amp;lt;`
/// becomes `&lt;` rather than `<`.
pub fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Backslash-escape Markdown special characters in a plain text run.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_SPECIALS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Backslash-escape `\`, `(` and `)` in a link destination so the parser
/// reads the URL back up to the right closing parenthesis.
pub fn escape_link_destination(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if matches!(c, '\\' | '(' | ')') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Characters that may follow a backslash to be taken literally.
pub fn is_escapable(c: char) -> bool {
    c.is_ascii_punctuation()
}
