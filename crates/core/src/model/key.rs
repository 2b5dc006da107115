/// Key used when a student id sanitizes to nothing.
pub const ANONYMOUS_KEY: &str = "anonymous";

/// Turns an arbitrary id or topic into a safe document-store path segment.
///
/// Path separators and the characters hosted real-time stores reserve
/// (`.`, `#`, `$`, `[`, `]`, `/`) as well as control characters become `_`.
#[must_use]
pub fn sanitize_key(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '.' | '#' | '$' | '[' | ']' | '/' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() {
        ANONYMOUS_KEY.to_string()
    } else {
        cleaned
    }
}
