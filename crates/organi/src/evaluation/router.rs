use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::organization::router::service_error_response;
use crate::organization::{EmployeeId, OrganizationService, OrganizationStore};

use super::domain::{Evaluation, EvaluationUpdate};
use super::roster::open_evaluations_with_result;
use super::scoring::calculate_final_score;
use super::stats::EvaluationStats;
use super::support::{standard_categories, suggest_growth_score, AchievementTier};

type SharedService<S> = Arc<OrganizationService<S>>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterQuery {
    pub period: Option<String>,
    pub result_score: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreSupportRequest {
    pub category: String,
    pub tier: AchievementTier,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequest {
    pub evaluation: Evaluation,
    pub update: EvaluationUpdate,
}

/// Evaluation paired with its computed final score.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredEvaluation {
    #[serde(flatten)]
    pub evaluation: Evaluation,
    pub final_score: Option<u32>,
}

impl From<Evaluation> for ScoredEvaluation {
    fn from(evaluation: Evaluation) -> Self {
        let final_score = calculate_final_score(&evaluation);
        Self {
            evaluation,
            final_score,
        }
    }
}

/// Evaluation period label such as `2025Q1`.
pub fn period_for(now: DateTime<Utc>) -> String {
    format!("{}Q{}", now.year(), now.month0() / 3 + 1)
}

/// Routes for the companion evaluation app: rosters, scoring, and progress.
pub fn evaluation_router<S>(service: SharedService<S>) -> Router
where
    S: OrganizationStore + 'static,
{
    Router::new()
        .route(
            "/api/evaluation/evaluators/:evaluator_id/roster",
            get(roster_handler::<S>),
        )
        .route("/api/evaluation/categories", get(categories_handler))
        .route("/api/evaluation/score-support", post(score_support_handler))
        .route("/api/evaluation/final-score", post(final_score_handler))
        .route("/api/evaluation/updates", post(update_handler))
        .route("/api/evaluation/stats", post(stats_handler))
        .with_state(service)
}

pub(crate) async fn roster_handler<S>(
    State(service): State<SharedService<S>>,
    Path(evaluator_id): Path<String>,
    Query(query): Query<RosterQuery>,
) -> Response
where
    S: OrganizationStore + 'static,
{
    let organization = match service.snapshot() {
        Ok(organization) => organization,
        Err(error) => return service_error_response(error),
    };

    let now = Utc::now();
    let period = query
        .period
        .filter(|period| !period.is_empty())
        .unwrap_or_else(|| period_for(now));
    let evaluations: Vec<ScoredEvaluation> =
        open_evaluations_with_result(
            &EmployeeId(evaluator_id),
            &organization,
            &period,
            query.result_score,
            now,
        )
        .into_iter()
        .map(ScoredEvaluation::from)
        .collect();

    (StatusCode::OK, axum::Json(evaluations)).into_response()
}

pub(crate) async fn categories_handler() -> Response {
    let tiers: Vec<_> = AchievementTier::ordered()
        .into_iter()
        .map(|tier| {
            json!({
                "level": tier,
                "title": tier.title(),
                "description": tier.description(),
            })
        })
        .collect();

    (
        StatusCode::OK,
        axum::Json(json!({ "categories": standard_categories(), "tiers": tiers })),
    )
        .into_response()
}

pub(crate) async fn score_support_handler(
    axum::Json(request): axum::Json<ScoreSupportRequest>,
) -> Response {
    match suggest_growth_score(&request.category, request.tier) {
        Some(suggestion) => (StatusCode::OK, axum::Json(suggestion)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({
                "error": format!("unknown growth category {}", request.category)
            })),
        )
            .into_response(),
    }
}

pub(crate) async fn final_score_handler(
    axum::Json(evaluation): axum::Json<Evaluation>,
) -> Response {
    (
        StatusCode::OK,
        axum::Json(json!({ "finalScore": calculate_final_score(&evaluation) })),
    )
        .into_response()
}

pub(crate) async fn update_handler(axum::Json(request): axum::Json<UpdateRequest>) -> Response {
    let updated = request.evaluation.apply_update(request.update, Utc::now());
    (StatusCode::OK, axum::Json(ScoredEvaluation::from(updated))).into_response()
}

pub(crate) async fn stats_handler(axum::Json(evaluations): axum::Json<Vec<Evaluation>>) -> Response {
    (
        StatusCode::OK,
        axum::Json(EvaluationStats::from_evaluations(&evaluations)),
    )
        .into_response()
}
