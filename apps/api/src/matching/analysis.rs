//! Job analysis — classifies a posting's required and preferred qualifications
//! against a profile and folds both into one weighted breakdown.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::aggregate::{aggregate, MatchBreakdown, SectionInput, WeightPolicy};
use crate::matching::classifier::{classify, MatchResult};

pub const REQUIRED_LABEL: &str = "required";
pub const PREFERRED_LABEL: &str = "preferred";

/// Requirement lines of one job posting, grouped by section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub preferred: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub required: MatchResult,
    pub preferred: MatchResult,
    /// `None` when neither section has any non-empty line.
    pub breakdown: Option<MatchBreakdown>,
}

pub fn analyze_job(
    requirements: &JobRequirements,
    profile_skills: &[String],
    policy: &WeightPolicy,
) -> JobAnalysis {
    let required = classify(&requirements.required, profile_skills);
    let preferred = classify(&requirements.preferred, profile_skills);

    let sections = [
        section_input(REQUIRED_LABEL, &required),
        section_input(PREFERRED_LABEL, &preferred),
    ];
    let breakdown = aggregate(&sections, policy);

    debug!(
        required_total = required.total(),
        preferred_total = preferred.total(),
        overall = ?breakdown.as_ref().map(|b| b.overall_percent),
        "job analysis computed"
    );

    JobAnalysis {
        required,
        preferred,
        breakdown,
    }
}

fn section_input(label: &str, result: &MatchResult) -> SectionInput {
    SectionInput::new(label, result.matched.len() as u32, result.total() as u32)
}
