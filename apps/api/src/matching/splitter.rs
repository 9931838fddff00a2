//! Line Token Splitter — breaks a requirement line into comparable tokens.
//!
//! Fragments are cut at list punctuation (`LIST_DELIMITERS`: commas, middle dots,
//! bullets and their full-width forms), at line breaks, and at standalone
//! connective words ("and", "및", ...). Each fragment is normalized; fragments of a
//! single character are dropped as noise.

use std::collections::BTreeSet;

use crate::matching::normalize::normalize;

/// Characters that separate list items inside a single requirement line.
const LIST_DELIMITERS: &[char] = &[',', '，', '、', '·', '•', '・', '\n', '\r'];

/// Whole words that join two list items ("React and Vue", "React 및 Vue").
const CONNECTIVES: &[&str] = &["and", "&", "및", "그리고", "또는", "or"];

/// Minimum fragment length in characters for a fragment to count as a token.
const MIN_TOKEN_CHARS: usize = 2;

/// Splits a single line into normalized tokens. Returns an empty list when
/// nothing survives the noise filter.
pub fn split_to_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for fragment in line.split(LIST_DELIMITERS) {
        let normalized = normalize(fragment);
        if normalized.is_empty() {
            continue;
        }

        let mut current: Vec<&str> = Vec::new();
        for word in normalized.split(' ') {
            if CONNECTIVES.contains(&word) {
                push_fragment(&mut tokens, &current);
                current.clear();
            } else {
                current.push(word);
            }
        }
        push_fragment(&mut tokens, &current);
    }

    tokens
}

fn push_fragment(tokens: &mut Vec<String>, words: &[&str]) {
    if words.is_empty() {
        return;
    }
    let fragment = words.join(" ");
    if fragment.chars().count() >= MIN_TOKEN_CHARS {
        tokens.push(fragment);
    }
}

/// Unions the tokens of every line into a deduplicated set.
///
/// Ordering carries no meaning; a `BTreeSet` keeps API output stable.
pub fn extract_tokens<S: AsRef<str>>(lines: &[S]) -> BTreeSet<String> {
    lines
        .iter()
        .flat_map(|line| split_to_tokens(line.as_ref()))
        .collect()
}
