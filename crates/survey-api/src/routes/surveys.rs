use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;

use survey_core::EmailAddress;
use survey_core::models::feedback::AggregatedFeedback;
use survey_core::models::submission::SubmissionRequest;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SubmissionResponse {
    message: &'static str,
    email: String,
    feedback_sent: bool,
    feedback: AggregatedFeedback,
}

#[derive(Serialize)]
pub struct SendResponse {
    email: String,
    feedback_sent: bool,
}

/// Commit a submission, then try to e-mail the feedback. A failed send
/// does not fail the request; it shows up as `feedback_sent: false`.
pub async fn submit_survey(
    State(state): State<AppState>,
    body: Result<Json<SubmissionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmissionResponse>), ApiError> {
    let Json(request) = body?;

    let submitted = state.service.submit(request).await?;
    let feedback_sent = state
        .service
        .dispatch_feedback(&submitted.participant, &submitted.feedback)
        .await;

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            message: "Encuesta enviada exitosamente",
            email: submitted.participant.email.to_string(),
            feedback_sent,
            feedback: submitted.feedback,
        }),
    ))
}

pub async fn get_feedback(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<AggregatedFeedback>, ApiError> {
    Ok(Json(state.service.feedback(&email).await?))
}

pub async fn send_feedback(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<SendResponse>, ApiError> {
    let email = EmailAddress::parse(&email)?;
    let feedback_sent = state.service.resend_feedback(email.as_str()).await?;
    Ok(Json(SendResponse {
        email: email.into(),
        feedback_sent,
    }))
}
