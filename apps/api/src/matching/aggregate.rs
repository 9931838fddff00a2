//! Section Score Aggregator — folds per-section match counts into one overall
//! percentage plus a per-section breakdown.
//!
//! `overall_percent` is always `round(100 * Σmatched / Σtotal)`; display weights
//! come from a swappable `WeightPolicy` and never affect the overall number.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw counts for one section as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInput {
    pub label: String,
    pub matched: u32,
    pub total: u32,
}

impl SectionInput {
    pub fn new(label: impl Into<String>, matched: u32, total: u32) -> Self {
        Self {
            label: label.into(),
            matched,
            total,
        }
    }
}

/// One scored section in the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionScore {
    pub label: String,
    pub matched_count: u32,
    pub total_count: u32,
    pub weight_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub overall_percent: u32, // 0 – 100
    pub sections: Vec<SectionScore>,
}

/// How display weights are assigned to the sections that survive filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "weights")]
pub enum WeightPolicy {
    /// 100 / n per section; the remainder goes one point at a time to the earliest
    /// sections so weights always sum to 100.
    #[default]
    EvenSplit,
    /// Per-label weights. Labels not listed fall back to their even-split share.
    /// A lone surviving section is always weighted 100.
    Declared(BTreeMap<String, u32>),
}

impl WeightPolicy {
    fn weights_for(&self, labels: &[&str]) -> Vec<u32> {
        if labels.len() == 1 {
            return vec![100];
        }
        let even = even_split(labels.len());
        match self {
            WeightPolicy::EvenSplit => even,
            WeightPolicy::Declared(declared) => labels
                .iter()
                .zip(even)
                .map(|(label, fallback)| declared.get(*label).copied().unwrap_or(fallback))
                .collect(),
        }
    }
}

fn even_split(n: usize) -> Vec<u32> {
    if n == 0 {
        return vec![];
    }
    let n32 = n as u32;
    let base = 100 / n32;
    let remainder = (100 % n32) as usize;
    (0..n)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// Aggregates sections into a breakdown.
///
/// Sections with `total == 0` are dropped first. Returns `None` when nothing is
/// left to score, so callers can tell "0% matched" apart from "no data".
/// A `matched` count above its `total` is clamped to `total`.
pub fn aggregate(sections: &[SectionInput], policy: &WeightPolicy) -> Option<MatchBreakdown> {
    let scored: Vec<&SectionInput> = sections.iter().filter(|s| s.total > 0).collect();
    if scored.is_empty() {
        return None;
    }

    let labels: Vec<&str> = scored.iter().map(|s| s.label.as_str()).collect();
    let weights = policy.weights_for(&labels);

    let mut sum_matched = 0_u64;
    let mut sum_total = 0_u64;
    let sections: Vec<SectionScore> = scored
        .iter()
        .zip(weights)
        .map(|(section, weight_percent)| {
            let matched = section.matched.min(section.total);
            sum_matched += u64::from(matched);
            sum_total += u64::from(section.total);
            SectionScore {
                label: section.label.clone(),
                matched_count: matched,
                total_count: section.total,
                weight_percent,
            }
        })
        .collect();

    Some(MatchBreakdown {
        overall_percent: round_percent(sum_matched, sum_total),
        sections,
    })
}

/// `round(100 * part / whole)` with round-half-up, clamped to 0 – 100.
/// `whole` must be non-zero.
fn round_percent(part: u64, whole: u64) -> u32 {
    let pct = (200 * part + whole) / (2 * whole);
    pct.min(100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_and_preferred_scenario() {
        let sections = vec![
            SectionInput::new("required", 2, 3),
            SectionInput::new("preferred", 1, 2),
        ];
        let breakdown = aggregate(&sections, &WeightPolicy::EvenSplit).unwrap();
        assert_eq!(breakdown.overall_percent, 60);
        assert_eq!(breakdown.sections.len(), 2);
        assert!(breakdown.sections.iter().all(|s| s.weight_percent == 50));
    }

    #[test]
    fn test_all_empty_sections_is_absent() {
        let sections = vec![SectionInput::new("required", 0, 0)];
        assert!(aggregate(&sections, &WeightPolicy::EvenSplit).is_none());
        assert!(aggregate(&[], &WeightPolicy::EvenSplit).is_none());
    }

    #[test]
    fn test_zero_matched_is_a_breakdown_not_absent() {
        let sections = vec![SectionInput::new("required", 0, 4)];
        let breakdown = aggregate(&sections, &WeightPolicy::EvenSplit).unwrap();
        assert_eq!(breakdown.overall_percent, 0);
    }

    #[test]
    fn test_single_surviving_section_gets_full_weight() {
        let sections = vec![
            SectionInput::new("required", 1, 2),
            SectionInput::new("preferred", 0, 0),
        ];
        let breakdown = aggregate(&sections, &WeightPolicy::EvenSplit).unwrap();
        assert_eq!(breakdown.sections.len(), 1);
        assert_eq!(breakdown.sections[0].label, "required");
        assert_eq!(breakdown.sections[0].weight_percent, 100);
        assert_eq!(breakdown.overall_percent, 50);
    }

    #[test]
    fn test_even_split_distributes_remainder() {
        assert_eq!(even_split(3), vec![34, 33, 33]);
        assert_eq!(even_split(2), vec![50, 50]);
        assert_eq!(even_split(1), vec![100]);
        assert_eq!(even_split(7).iter().sum::<u32>(), 100);
    }

    #[test]
    fn test_declared_weights_take_precedence() {
        let mut weights = BTreeMap::new();
        weights.insert("required".to_string(), 70);
        weights.insert("preferred".to_string(), 30);
        let policy = WeightPolicy::Declared(weights);

        let sections = vec![
            SectionInput::new("required", 2, 3),
            SectionInput::new("preferred", 1, 2),
        ];
        let breakdown = aggregate(&sections, &policy).unwrap();
        assert_eq!(breakdown.sections[0].weight_percent, 70);
        assert_eq!(breakdown.sections[1].weight_percent, 30);
        // Display weights do not change the overall ratio.
        assert_eq!(breakdown.overall_percent, 60);
    }

    #[test]
    fn test_declared_weights_ignored_for_single_surviving_section() {
        let mut weights = BTreeMap::new();
        weights.insert("required".to_string(), 70);
        weights.insert("preferred".to_string(), 30);
        let policy = WeightPolicy::Declared(weights);

        let sections = vec![
            SectionInput::new("required", 1, 2),
            SectionInput::new("preferred", 0, 0),
        ];
        let breakdown = aggregate(&sections, &policy).unwrap();
        assert_eq!(breakdown.sections.len(), 1);
        assert_eq!(breakdown.sections[0].weight_percent, 100);
        assert_eq!(breakdown.overall_percent, 50);
    }

    #[test]
    fn test_undeclared_label_falls_back_to_even_share() {
        let mut weights = BTreeMap::new();
        weights.insert("required".to_string(), 80);
        let policy = WeightPolicy::Declared(weights);

        let sections = vec![
            SectionInput::new("required", 1, 1),
            SectionInput::new("bonus", 1, 1),
        ];
        let breakdown = aggregate(&sections, &policy).unwrap();
        assert_eq!(breakdown.sections[0].weight_percent, 80);
        assert_eq!(breakdown.sections[1].weight_percent, 50);
    }

    #[test]
    fn test_rounds_half_up() {
        // 1/8 = 12.5% → 13
        assert_eq!(round_percent(1, 8), 13);
        // 1/3 = 33.3% → 33
        assert_eq!(round_percent(1, 3), 33);
        // 2/3 = 66.6% → 67
        assert_eq!(round_percent(2, 3), 67);
    }

    #[test]
    fn test_matched_above_total_is_clamped() {
        let sections = vec![SectionInput::new("required", 9, 3)];
        let breakdown = aggregate(&sections, &WeightPolicy::EvenSplit).unwrap();
        assert_eq!(breakdown.sections[0].matched_count, 3);
        assert_eq!(breakdown.overall_percent, 100);
    }

    #[test]
    fn test_overall_percent_bounded() {
        let cases = [(0, 1), (1, 1), (3, 7), (99, 100), (u32::MAX, u32::MAX)];
        for (matched, total) in cases {
            let sections = vec![SectionInput::new("s", matched, total)];
            let breakdown = aggregate(&sections, &WeightPolicy::EvenSplit).unwrap();
            assert!(breakdown.overall_percent <= 100);
        }
    }

    #[test]
    fn test_weight_policy_serde_shape() {
        let policy: WeightPolicy =
            serde_json::from_str(r#"{"kind":"declared","weights":{"required":60}}"#).unwrap();
        assert!(matches!(policy, WeightPolicy::Declared(ref w) if w["required"] == 60));

        let even: WeightPolicy = serde_json::from_str(r#"{"kind":"even_split"}"#).unwrap();
        assert_eq!(even, WeightPolicy::EvenSplit);
    }
}
