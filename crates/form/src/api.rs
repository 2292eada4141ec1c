use agentlead_contact::ContactSubmission;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

/// Banner text used when the server gives no usable error message.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong, please retry later";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("server rejected submission with {status}")]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Text shown in the form's error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } => message.to_owned(),
            _ => FALLBACK_ERROR_MESSAGE.to_owned(),
        }
    }
}

#[async_trait]
pub trait ContactApi: Send + Sync {
    async fn submit(&self, submission: &ContactSubmission) -> Result<(), ApiError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Posts submissions as JSON to `{base_url}/api/contact`.
#[derive(Clone)]
pub struct HttpContactApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpContactApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/contact", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContactApi for HttpContactApi {
    async fn submit(&self, submission: &ContactSubmission) -> Result<(), ApiError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.trim().is_empty());

        Err(ApiError::Rejected { status, message })
    }
}
