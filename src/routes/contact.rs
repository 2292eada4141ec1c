use agentlead_contact::ContactSubmission;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;

use crate::{error::AppError, routes::AppState};

pub const SENT_MESSAGE: &str = "Email sent successfully";

#[derive(Debug, Serialize)]
pub struct SentResponse {
    pub message: &'static str,
}

/// POST /api/contact
///
/// Validates the submission, then sends the admin notification followed by
/// the auto-reply. Nothing is stored; any failure ends the request.
#[tracing::instrument(skip_all)]
pub async fn submit(
    State(app_state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<SentResponse>, AppError> {
    let Json(submission) = payload?;
    let submission = submission.validated()?;

    tracing::info!(
        name = %submission.name,
        email = %submission.email,
        "Contact form submission received"
    );

    app_state.email.send_contact_emails(&submission).await?;

    Ok(Json(SentResponse {
        message: SENT_MESSAGE,
    }))
}
