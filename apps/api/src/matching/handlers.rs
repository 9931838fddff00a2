//! Axum route handlers for the Matching API.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::cache::{analysis_fingerprint, CachedAnalysis};
use crate::errors::AppError;
use crate::matching::aggregate::{aggregate, MatchBreakdown, SectionInput, WeightPolicy};
use crate::matching::analysis::{analyze_job, JobAnalysis, JobRequirements};
use crate::matching::classifier::{classify, classify_tokens, MatchResult};
use crate::matching::splitter::extract_tokens;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub lines: Vec<String>,
    #[serde(default)]
    pub profile_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyTokensRequest {
    pub tokens: Vec<String>,
    #[serde(default)]
    pub profile_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractTokensRequest {
    pub lines: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractTokensResponse {
    pub tokens: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AggregateRequest {
    pub sections: Vec<SectionInput>,
    /// Overrides the configured policy for this call.
    pub weights: Option<WeightPolicy>,
}

#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    /// `null` when no section has anything to score.
    pub breakdown: Option<MatchBreakdown>,
}

#[derive(Debug, Deserialize)]
pub struct JobAnalysisRequest {
    #[serde(flatten)]
    pub requirements: JobRequirements,
    #[serde(default)]
    pub profile_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct JobAnalysisResponse {
    pub job_id: Uuid,
    #[serde(flatten)]
    pub cached: CachedAnalysis,
    /// True when served from the analysis store without recomputing.
    pub from_cache: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// Maps a malformed `:job_id` onto the JSON error envelope instead of axum's
/// plain-text rejection.
fn job_id_from(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, AppError> {
    path.map(|Path(job_id)| job_id).map_err(|rejection| {
        AppError::Validation(format!("invalid job id: {}", rejection.body_text()))
    })
}

/// POST /api/v1/match/classify
pub async fn handle_classify(Json(request): Json<ClassifyRequest>) -> Json<MatchResult> {
    let result = classify(&request.lines, &request.profile_skills);
    debug!(
        matched = result.matched.len(),
        missing = result.missing.len(),
        "classified requirement lines"
    );
    Json(result)
}

/// POST /api/v1/match/classify-tokens
pub async fn handle_classify_tokens(
    Json(request): Json<ClassifyTokensRequest>,
) -> Json<MatchResult> {
    Json(classify_tokens(&request.tokens, &request.profile_skills))
}

/// POST /api/v1/match/extract-tokens
///
/// Returns the deduplicated token set, sorted for stable output.
pub async fn handle_extract_tokens(
    Json(request): Json<ExtractTokensRequest>,
) -> Json<ExtractTokensResponse> {
    let tokens = extract_tokens(&request.lines).into_iter().collect();
    Json(ExtractTokensResponse { tokens })
}

/// POST /api/v1/match/aggregate
pub async fn handle_aggregate(
    State(state): State<AppState>,
    Json(request): Json<AggregateRequest>,
) -> Json<AggregateResponse> {
    let policy = request
        .weights
        .as_ref()
        .unwrap_or(&state.config.weight_policy);
    Json(AggregateResponse {
        breakdown: aggregate(&request.sections, policy),
    })
}

/// POST /api/v1/jobs/:job_id/analysis
///
/// Classifies the job's required/preferred lines against the profile and returns
/// the weighted breakdown. Results are cached per job until the inputs change or
/// the entry is invalidated.
pub async fn handle_job_analysis(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    Json(request): Json<JobAnalysisRequest>,
) -> Result<Json<JobAnalysisResponse>, AppError> {
    let job_id = job_id_from(path)?;
    let fingerprint = analysis_fingerprint(&request.requirements, &request.profile_skills);

    if let Some(cached) = state.analysis_store.get(job_id, fingerprint).await {
        debug!(%job_id, "analysis cache hit");
        return Ok(Json(JobAnalysisResponse {
            job_id,
            cached,
            from_cache: true,
        }));
    }

    let analysis: JobAnalysis = analyze_job(
        &request.requirements,
        &request.profile_skills,
        &state.config.weight_policy,
    );
    let cached = CachedAnalysis {
        analysis,
        computed_at: Utc::now(),
    };
    state
        .analysis_store
        .put(job_id, fingerprint, cached.clone())
        .await;

    Ok(Json(JobAnalysisResponse {
        job_id,
        cached,
        from_cache: false,
    }))
}

/// DELETE /api/v1/jobs/:job_id/analysis
pub async fn handle_invalidate_job_analysis(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let job_id = job_id_from(path)?;
    if state.analysis_store.invalidate(job_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "No cached analysis for job {job_id}"
        )))
    }
}
