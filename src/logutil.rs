//! Logging helpers for raw player input and API payloads, so log records stay on one line.

const MAX_PREVIEW: usize = 120;

/// Escape control characters and backslashes (`\n` becomes `\\n`, ESC becomes
/// `\\u{1b}`) and cut the preview at `MAX_PREVIEW` characters with a trailing `...`.
pub fn escape_input(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 3);
    for (n, ch) in s.chars().enumerate() {
        if n == MAX_PREVIEW {
            out.push_str("...");
            break;
        }
        if ch.is_control() || ch == '\\' {
            out.extend(ch.escape_default());
        } else {
            out.push(ch);
        }
    }
    out
}
