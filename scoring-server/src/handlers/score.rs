//! Scoring handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use afews_core::{BiometricRecord, RiskAssessment, RiskReason, RiskTier, ScoreOutput, ScoreRequest};

use crate::{AppError, AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub output: ScoreOutput,
    pub score: u8,
    pub probability: f64,
    pub reason: Option<RiskReason>,
}

impl From<RiskAssessment> for ScoreResponse {
    fn from(assessment: RiskAssessment) -> Self {
        Self {
            output: ScoreOutput::from(&assessment),
            score: assessment.score,
            probability: assessment.probability,
            reason: assessment.reason,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchScoreRequest {
    pub records: Vec<ScoreRequest>,
}

#[derive(Debug, Default, Serialize)]
pub struct TierSummary {
    pub critical: usize,
    pub moderate: usize,
    pub safe: usize,
}

impl TierSummary {
    fn count(&mut self, tier: RiskTier) {
        match tier {
            RiskTier::Critical => self.critical += 1,
            RiskTier::Moderate => self.moderate += 1,
            RiskTier::Safe => self.safe += 1,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchScoreResponse {
    pub total: usize,
    pub summary: TierSummary,
    pub results: Vec<ScoreResponse>,
}

/// Score a single record
pub async fn score(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> AppResult<Json<ScoreResponse>> {
    let Json(req) = payload?;
    let record = BiometricRecord::from(req);
    let assessment = state.engine.score(&record);

    tracing::debug!(
        age = record.age,
        device = %record.device_type,
        tier = %assessment.tier,
        score = assessment.score,
        "Scored record"
    );

    Ok(Json(ScoreResponse::from(assessment)))
}

/// Score a population of records and count them per tier
pub async fn score_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchScoreRequest>, JsonRejection>,
) -> AppResult<Json<BatchScoreResponse>> {
    let Json(req) = payload?;

    if req.records.is_empty() {
        return Err(AppError::ValidationError("records must not be empty".to_string()));
    }
    if req.records.len() > state.config.max_batch_size {
        return Err(AppError::ValidationError(format!(
            "batch of {} records exceeds the limit of {}",
            req.records.len(),
            state.config.max_batch_size
        )));
    }

    let engine = state.engine.clone();
    let response = tokio::task::spawn_blocking(move || {
        let mut summary = TierSummary::default();
        let results: Vec<ScoreResponse> = req
            .records
            .into_iter()
            .map(|r| {
                let assessment = engine.score(&BiometricRecord::from(r));
                summary.count(assessment.tier);
                ScoreResponse::from(assessment)
            })
            .collect();

        BatchScoreResponse {
            total: results.len(),
            summary,
            results,
        }
    })
    .await?;

    tracing::info!(
        total = response.total,
        critical = response.summary.critical,
        moderate = response.summary.moderate,
        safe = response.summary.safe,
        "Scored batch"
    );

    Ok(Json(response))
}
