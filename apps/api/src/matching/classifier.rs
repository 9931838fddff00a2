//! Requirement Classifier — partitions job requirements into matched / missing
//! against a candidate's profile skills.
//!
//! Two entry points share one overlap test:
//! - `classify` takes prose requirement lines and splits them into tokens first.
//! - `classify_tokens` takes requirement tokens that were already extracted.
//!
//! A single-token line classifies the same way through either path.

use serde::{Deserialize, Serialize};

use crate::matching::normalize::normalize;
use crate::matching::overlap::normalized_overlap;
use crate::matching::splitter::split_to_tokens;

/// Partition of the non-empty inputs. Entries keep the caller's original text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl MatchResult {
    /// Number of classified inputs (`matched + missing`).
    pub fn total(&self) -> usize {
        self.matched.len() + self.missing.len()
    }
}

/// Normalized, deduplicated profile skills. Built once per call.
struct ProfileSkills(Vec<String>);

impl ProfileSkills {
    fn new<S: AsRef<str>>(skills: &[S]) -> Self {
        let mut normalized: Vec<String> = skills
            .iter()
            .map(|s| normalize(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        normalized.sort_unstable();
        normalized.dedup();
        Self(normalized)
    }

    fn covers(&self, token: &str) -> bool {
        self.0.iter().any(|skill| normalized_overlap(token, skill))
    }
}

/// Classifies requirement lines. A line is matched iff any of its tokens overlaps
/// any profile skill. Lines that are empty after trimming appear in neither list.
pub fn classify<L: AsRef<str>, S: AsRef<str>>(lines: &[L], profile_skills: &[S]) -> MatchResult {
    let skills = ProfileSkills::new(profile_skills);
    let mut result = MatchResult::default();

    for line in lines {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }

        let is_match = split_to_tokens(line)
            .iter()
            .any(|token| skills.covers(token));

        if is_match {
            result.matched.push(line.to_string());
        } else {
            result.missing.push(line.to_string());
        }
    }

    result
}

/// Classifies pre-extracted requirement tokens. Tokens that normalize to empty
/// appear in neither list.
pub fn classify_tokens<T: AsRef<str>, S: AsRef<str>>(
    tokens: &[T],
    profile_skills: &[S],
) -> MatchResult {
    let skills = ProfileSkills::new(profile_skills);
    let mut result = MatchResult::default();

    for token in tokens {
        let token = token.as_ref();
        let normalized = normalize(token);
        if normalized.is_empty() {
            continue;
        }

        if skills.covers(&normalized) {
            result.matched.push(token.to_string());
        } else {
            result.missing.push(token.to_string());
        }
    }

    result
}
