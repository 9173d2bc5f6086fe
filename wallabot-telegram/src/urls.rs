//! Strict URL extraction: only candidates with an explicit scheme are returned.

use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:https?|ftp)://[^\s<>"'`]+"#).expect("static URL pattern is valid")
});

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"'];

/// Returns every URL in `text` in order of appearance. Duplicates are kept.
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_RE
        .find_iter(text)
        .map(|m| trim_url(m.as_str()))
        .filter(|url| url.contains("://") && !url.ends_with("://"))
        .map(str::to_string)
        .collect()
}

fn trim_url(mut url: &str) -> &str {
    loop {
        if let Some(stripped) = url.strip_suffix(TRAILING_PUNCTUATION) {
            url = stripped;
            continue;
        }
        if url.ends_with(')') && url.matches(')').count() > url.matches('(').count() {
            url = &url[..url.len() - 1];
            continue;
        }
        return url;
    }
}
