//! URL path utilities for sitemap entry locations.

/// Join a root prefix and path segments into a normalized absolute URL.
///
/// Blank segments are kept (normalization collapses the resulting `//`),
/// so callers can pass raw record fields without pre-cleaning.
///
/// # Examples
/// ```ignore
/// join_url("https://ex.com", &["blog", "hello"]) -> "https://ex.com/blog/hello"
/// join_url("https://ex.com/", &["about"])        -> "https://ex.com/about"
/// ```
pub fn join_url(root: &str, segments: &[&str]) -> String {
    let mut url = String::with_capacity(root.len() + 16);
    url.push_str(root);
    for segment in segments {
        url.push('/');
        url.push_str(segment);
    }
    normalize_url(&url)
}

/// Collapse doubled slashes in the path portion and strip the trailing
/// slash. The scheme separator (`https://`) is preserved.
pub fn normalize_url(url: &str) -> String {
    let (scheme, rest) = match url.find("://") {
        Some(pos) => url.split_at(pos + 3),
        None => ("", url),
    };

    let mut out = String::with_capacity(url.len());
    out.push_str(scheme);

    let mut prev_slash = false;
    for c in rest.chars() {
        if c == '/' {
            if !prev_slash {
                out.push(c);
            }
            prev_slash = true;
        } else {
            out.push(c);
            prev_slash = false;
        }
    }

    while out.len() > scheme.len() && out.ends_with('/') {
        out.pop();
    }

    out
}
