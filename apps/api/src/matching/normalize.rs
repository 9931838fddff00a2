//! Token normalization — the single canonical form every comparison runs on.

/// Lower-cases, trims, and collapses every run of whitespace to a single space.
///
/// Total over all inputs: an empty or whitespace-only string yields an empty token.
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().flat_map(char::to_lowercase));
    }
    out
}
