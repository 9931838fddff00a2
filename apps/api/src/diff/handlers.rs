//! Axum route handlers for the Diff API.

use anyhow::Context;
use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::debug;

use crate::diff::word_diff::{diff_words, word_count, WordDiff};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DiffWordsRequest {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub rewritten: String,
}

/// POST /api/v1/diff/words
///
/// Flags every word of `rewritten` that is not carried over from `original`.
/// Inputs above MAX_DIFF_WORDS on either side are rejected before the O(m·n)
/// table is allocated. The alignment runs on the blocking pool.
pub async fn handle_diff_words(
    State(state): State<AppState>,
    Json(request): Json<DiffWordsRequest>,
) -> Result<Json<WordDiff>, AppError> {
    let limit = state.config.max_diff_words;
    let original_words = word_count(&request.original);
    let rewritten_words = word_count(&request.rewritten);
    if original_words > limit || rewritten_words > limit {
        return Err(AppError::PayloadTooLarge(format!(
            "diff input exceeds {limit} words (original: {original_words}, rewritten: {rewritten_words})"
        )));
    }

    let diff = tokio::task::spawn_blocking(move || {
        diff_words(&request.original, &request.rewritten)
    })
    .await
    .context("word diff task failed")?;

    debug!(
        words = diff.words.len(),
        changed = diff.changed_count(),
        "word diff computed"
    );
    Ok(Json(diff))
}
