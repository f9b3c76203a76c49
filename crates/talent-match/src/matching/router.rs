use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::domain::JobId;
use super::engine::{MatchEngine, MatchResult, MatchingError};
use super::repository::{DataSourceError, MatchDataSource};
use super::weights::MatchWeights;
use crate::config::MatchingConfig;

/// Shared state for the match endpoints.
pub struct MatchRouterState<S> {
    pub(crate) engine: Arc<MatchEngine<S>>,
    pub(crate) default_min_score: u8,
    pub(crate) default_weights: MatchWeights,
    pub(crate) timeout: Duration,
}

/// Query string accepted by the GET variant.
#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    pub min_score: Option<u8>,
}

/// Body accepted by the POST variant. Missing fields fall back to configured defaults.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub min_score: Option<u8>,
    #[serde(default)]
    pub weights: Option<MatchWeights>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub job_id: JobId,
    pub min_score: u8,
    pub weights: MatchWeights,
    pub results: Vec<MatchResult>,
}

/// Router builder exposing match and statistics endpoints for a job.
pub fn match_router<S>(engine: Arc<MatchEngine<S>>, config: &MatchingConfig) -> Router
where
    S: MatchDataSource + 'static,
{
    let state = Arc::new(MatchRouterState {
        engine,
        default_min_score: config.default_min_score,
        default_weights: config.weights,
        timeout: config.request_timeout,
    });

    Router::new()
        .route(
            "/api/v1/jobs/:job_id/matches",
            get(matches_query_handler::<S>).post(matches_body_handler::<S>),
        )
        .route(
            "/api/v1/jobs/:job_id/statistics",
            get(statistics_handler::<S>),
        )
        .with_state(state)
}

pub(crate) async fn matches_query_handler<S>(
    State(state): State<Arc<MatchRouterState<S>>>,
    Path(job_id): Path<String>,
    Query(query): Query<MatchQuery>,
) -> Response
where
    S: MatchDataSource + 'static,
{
    let request = MatchRequest {
        min_score: query.min_score,
        weights: None,
    };
    respond_with_matches(state, JobId(job_id), request).await
}

pub(crate) async fn matches_body_handler<S>(
    State(state): State<Arc<MatchRouterState<S>>>,
    Path(job_id): Path<String>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response
where
    S: MatchDataSource + 'static,
{
    respond_with_matches(state, JobId(job_id), request).await
}

pub(crate) async fn statistics_handler<S>(
    State(state): State<Arc<MatchRouterState<S>>>,
    Path(job_id): Path<String>,
) -> Response
where
    S: MatchDataSource + 'static,
{
    let weights = state.default_weights;
    let job = JobId(job_id);
    match run_scoring(&state, move |engine| {
        engine.compute_statistics_with(&job, &weights)
    })
    .await
    {
        Ok(statistics) => (StatusCode::OK, axum::Json(statistics)).into_response(),
        Err(response) => response,
    }
}

async fn respond_with_matches<S>(
    state: Arc<MatchRouterState<S>>,
    job_id: JobId,
    request: MatchRequest,
) -> Response
where
    S: MatchDataSource + 'static,
{
    let min_score = request.min_score.unwrap_or(state.default_min_score);
    if min_score > 100 {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "min_score must be between 0 and 100".to_string(),
        );
    }

    let weights = request.weights.unwrap_or(state.default_weights);
    if let Some(factor) = weights.invalid_factor() {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("{} weight must be a non-negative number", factor.label()),
        );
    }

    let job = job_id.clone();
    match run_scoring(&state, move |engine| {
        engine.compute_matches(&job, min_score, &weights)
    })
    .await
    {
        Ok(results) => {
            let body = MatchResponse {
                job_id,
                min_score,
                weights,
                results,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(response) => response,
    }
}

/// Run a scoring closure off the async executor, bounded by the configured timeout.
async fn run_scoring<S, T, F>(state: &MatchRouterState<S>, job: F) -> Result<T, Response>
where
    S: MatchDataSource + 'static,
    T: Send + 'static,
    F: FnOnce(&MatchEngine<S>) -> Result<T, MatchingError> + Send + 'static,
{
    let engine = state.engine.clone();
    let task = tokio::task::spawn_blocking(move || job(&engine));

    match tokio::time::timeout(state.timeout, task).await {
        Ok(Ok(Ok(value))) => Ok(value),
        Ok(Ok(Err(MatchingError::JobNotFound(id)))) => Err(error_response(
            StatusCode::NOT_FOUND,
            format!("job {id} not found"),
        )),
        Ok(Ok(Err(MatchingError::DataSource(DataSourceError::Unavailable(reason))))) => {
            Err(error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                format!("data source unavailable: {reason}"),
            ))
        }
        Ok(Err(join_error)) => Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            join_error.to_string(),
        )),
        Err(_) => {
            warn!(timeout_ms = state.timeout.as_millis() as u64, "match computation timed out");
            Err(error_response(
                StatusCode::GATEWAY_TIMEOUT,
                "match computation timed out".to_string(),
            ))
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}
