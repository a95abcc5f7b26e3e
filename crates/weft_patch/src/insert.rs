//! The insert-after-last-match text transform.

/// Inserts `payload` into `content` immediately after the last occurrence of
/// `anchor`, idempotently.
///
/// The transform is pure and byte-preserving outside the insertion point:
///
/// - If `payload` already occurs verbatim in `content`, the content is
///   returned unchanged. The presence test is the full payload, never a
///   partial-line heuristic, so re-applying the same insertion is a no-op.
/// - If `anchor` does not occur, `payload` is appended at the end.
/// - Otherwise `payload` is placed directly after the end of the last
///   `anchor` match.
///
/// Anchors are literal substrings. An empty payload is always a no-op.
pub fn insert_after_last_match(content: &str, anchor: &str, payload: &str) -> String {
    if payload.is_empty() || content.contains(payload) {
        return content.to_string();
    }
    match content.match_indices(anchor).last() {
        None => {
            let mut out = String::with_capacity(content.len() + payload.len());
            out.push_str(content);
            out.push_str(payload);
            out
        }
        Some((start, matched)) => {
            let insert_at = start + matched.len();
            let mut out = String::with_capacity(content.len() + payload.len());
            out.push_str(&content[..insert_at]);
            out.push_str(payload);
            out.push_str(&content[insert_at..]);
            out
        }
    }
}
