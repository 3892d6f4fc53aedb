use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{EligibilityDisclosure, EvaluationInput, LeadId, LeadSubmission};
use super::eligibility::{EligibilityError, ThresholdProvider};
use super::repository::{LeadRepository, NotificationPublisher, RepositoryError};
use super::service::{LeadIntakeService, LeadServiceError};

/// Router builder exposing HTTP endpoints for intake and assessment.
pub fn intake_router<R, N, P>(service: Arc<LeadIntakeService<R, N, P>>) -> Router
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    P: ThresholdProvider + 'static,
{
    Router::new()
        .route("/api/v1/leads", post(submit_handler::<R, N, P>))
        .route("/api/v1/leads/:lead_id", get(status_handler::<R, N, P>))
        .route(
            "/api/v1/leads/:lead_id/eligibility",
            post(evaluate_handler::<R, N, P>),
        )
        .route(
            "/api/v1/eligibility/evaluate",
            post(assess_handler::<R, N, P>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EvaluateLeadRequest {
    /// Evaluation date; defaults to today so callers pin historical tables
    /// only when they need to.
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssessRequest {
    #[serde(flatten)]
    pub(crate) input: EvaluationInput,
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) async fn submit_handler<R, N, P>(
    State(service): State<Arc<LeadIntakeService<R, N, P>>>,
    axum::Json(submission): axum::Json<LeadSubmission>,
) -> Response
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    P: ThresholdProvider + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let view = record.status_view(service.disclosure());
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<R, N, P>(
    State(service): State<Arc<LeadIntakeService<R, N, P>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    P: ThresholdProvider + 'static,
{
    let id = LeadId(lead_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view(service.disclosure());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn evaluate_handler<R, N, P>(
    State(service): State<Arc<LeadIntakeService<R, N, P>>>,
    Path(lead_id): Path<String>,
    axum::Json(request): axum::Json<EvaluateLeadRequest>,
) -> Response
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    P: ThresholdProvider + 'static,
{
    let id = LeadId(lead_id);
    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());

    match service.evaluate(&id, as_of) {
        Ok(result) => match service.disclosure() {
            EligibilityDisclosure::Full => (StatusCode::OK, axum::Json(result)).into_response(),
            EligibilityDisclosure::Withheld => {
                let payload = json!({
                    "lead_id": id.0,
                    "status": "assessed",
                    "summary": "assessment complete; our team will follow up by email",
                });
                (StatusCode::OK, axum::Json(payload)).into_response()
            }
        },
        Err(err) => error_response(err),
    }
}

/// Stateless assessment endpoint: nothing is stored, the full result is
/// returned to the caller.
pub(crate) async fn assess_handler<R, N, P>(
    State(service): State<Arc<LeadIntakeService<R, N, P>>>,
    axum::Json(request): axum::Json<AssessRequest>,
) -> Response
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    P: ThresholdProvider + 'static,
{
    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());

    match service.assess(&request.input, as_of) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

/// Map service errors onto HTTP statuses. Validation detail is safe to echo;
/// anything internal collapses to a generic retry message.
fn error_response(err: LeadServiceError) -> Response {
    match err {
        LeadServiceError::Validation(_)
        | LeadServiceError::Eligibility(EligibilityError::Validation(_)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        LeadServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "lead not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        LeadServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": "lead already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            tracing::error!(error = %other, "lead intake request failed");
            let payload = json!({ "error": "could not complete assessment, please try again" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
