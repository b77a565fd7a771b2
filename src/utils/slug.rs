//! URL slugification.
//!
//! Turns attribute values (categories, tags, titles) into URL-safe slugs
//! for subcollections and archive routes.

use deunicode::deunicode;

/// Convert text to a lowercase ASCII slug: `"Rust & Go"` → `"rust-go"`.
///
/// Non-ASCII text is transliterated first (`"你好"` → `"ni-hao"`).
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Join URL segments with single slashes, dropping empty segments.
///
/// `join_url(&["https://a.com/", "/blog", "post"])` → `"https://a.com/blog/post"`
pub fn join_url(segments: &[&str]) -> String {
    let mut url = String::new();

    for (i, segment) in segments.iter().enumerate() {
        let segment = if i == 0 {
            segment.trim_end_matches('/')
        } else {
            segment.trim_matches('/')
        };
        if segment.is_empty() {
            continue;
        }
        if !url.is_empty() {
            url.push('/');
        }
        url.push_str(segment);
    }

    url
}
