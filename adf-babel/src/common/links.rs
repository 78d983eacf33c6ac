//! URL helpers used when deciding whether a reference can be emitted as-is.

use url::Url;

/// True for absolute `http`/`https` URLs with a host.
pub fn is_web_url(candidate: &str) -> bool {
    match Url::parse(candidate.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

/// Strip every trailing and leading `/` from a base URL.
pub fn trim_slashes(base: &str) -> &str {
    base.trim_matches('/')
}
