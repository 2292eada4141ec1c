use agentlead_contact::REQUIRED_FIELDS_MESSAGE;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const SEND_FAILED_MESSAGE: &str = "Failed to send email";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error(transparent)]
    Contact(#[from] agentlead_contact::Error),

    #[error("Mail error: {0:#}")]
    Mail(anyhow::Error),
}

/// JSON payload of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, message) = match &self {
            AppError::InvalidBody(rejection) => {
                tracing::warn!(error = %rejection, "Rejected contact request body");
                (StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE)
            }
            AppError::Contact(agentlead_contact::Error::Validate(_)) => {
                (StatusCode::BAD_REQUEST, REQUIRED_FIELDS_MESSAGE)
            }
            AppError::Contact(agentlead_contact::Error::Template(e)) => {
                tracing::error!(error = %e, "Failed to render contact email");
                (StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED_MESSAGE)
            }
            AppError::Mail(e) => {
                tracing::error!(error = ?e, "Failed to send contact email");
                (StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED_MESSAGE)
            }
        };

        (status_code, Json(ErrorBody { error: message })).into_response()
    }
}
