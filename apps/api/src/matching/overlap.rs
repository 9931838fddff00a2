//! Overlap matching between two tokens.
//!
//! Bidirectional substring containment: "react" overlaps "react.js" and vice versa.
//! This is a heuristic and admits false positives ("ai" sits inside "rails").
//! The containment rule is kept exact so classifications stay stable across callers.

use crate::matching::normalize::normalize;

/// Returns true when either normalized token contains the other.
///
/// An empty token never overlaps anything, including another empty token.
pub fn tokens_overlap(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    normalized_overlap(&a, &b)
}

/// Same test as [`tokens_overlap`] for tokens that are already normalized.
/// Used on hot paths where both sides were normalized once up front.
pub(crate) fn normalized_overlap(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}
