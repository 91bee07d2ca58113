//! Boundary sanitisation for user-supplied text.
//!
//! Strips the fragments most commonly abused for HTML/script injection
//! before content reaches the store: angle brackets, `javascript:` scheme
//! prefixes, and inline `on*=` event-handler attributes. Matching is
//! ASCII-case-insensitive; everything else, including non-ASCII text,
//! passes through untouched.

/// Sanitise one field of user text.
pub fn sanitize(text: &str) -> String {
    let trimmed = text.trim();
    let no_brackets: String = trimmed.chars().filter(|c| *c != '<' && *c != '>').collect();
    let no_scheme = remove_ascii_ci(&no_brackets, "javascript:");
    strip_event_handlers(&no_scheme)
}

/// Remove every ASCII-case-insensitive occurrence of `needle`.
fn remove_ascii_ci(haystack: &str, needle: &str) -> String {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    let mut out = Vec::with_capacity(h.len());
    let mut i = 0;
    while i < h.len() {
        let matches = i + n.len() <= h.len()
            && h[i..i + n.len()]
                .iter()
                .zip(n)
                .all(|(a, b)| a.eq_ignore_ascii_case(b));
        if matches {
            i += n.len();
        } else {
            out.push(h[i]);
            i += 1;
        }
    }
    // Only ASCII bytes were removed, so the remainder is valid UTF-8.
    String::from_utf8_lossy(&out).into_owned()
}

/// Remove `on<word>=` attribute fragments (onclick=, onload=, ...).
fn strip_event_handlers(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if i + 2 < bytes.len()
            && bytes[i].eq_ignore_ascii_case(&b'o')
            && bytes[i + 1].eq_ignore_ascii_case(&b'n')
        {
            let mut j = i + 2;
            while j < bytes.len() && bytes[j].is_ascii_alphanumeric() {
                j += 1;
            }
            if j > i + 2 && j < bytes.len() && bytes[j] == b'=' {
                i = j + 1;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
