#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use agentlead::{
    AppState,
    email::{EmailService, Mailer},
};
use agentlead_contact::{ContactSettings, EmailMessage};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Records every email handed to it, optionally failing the n-th send (1-based).
#[derive(Default)]
pub struct RecordingMailer {
    attempts: Mutex<Vec<EmailMessage>>,
    fail_on: Option<usize>,
}

impl RecordingMailer {
    pub fn failing_on(attempt: usize) -> Self {
        Self {
            attempts: Mutex::default(),
            fail_on: Some(attempt),
        }
    }

    pub fn attempts(&self) -> Vec<EmailMessage> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &EmailMessage) -> anyhow::Result<()> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(email.clone());
            attempts.len()
        };

        if self.fail_on == Some(attempt) {
            anyhow::bail!("535 authentication failed");
        }

        Ok(())
    }
}

pub fn settings() -> ContactSettings {
    ContactSettings {
        sender: "AgentLead <leads@agentlead.co>".to_string(),
        admin_address: "hello@agentlead.co".to_string(),
        site_name: "AgentLead".to_string(),
        site_url: "https://agentlead.co".to_string(),
    }
}

pub fn create_test_app(mailer: Arc<RecordingMailer>) -> Router {
    let email = EmailService::with_mailer(mailer, settings());

    agentlead::router(AppState { email })
}

pub async fn post_contact(router: &Router, body: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/contact")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap();

    (status, json)
}

pub const JANE: &str = r#"{
    "name": "Jane Doe",
    "email": "jane@example.com",
    "phone": "",
    "company": "",
    "message": "Interested in ClosePoint plan"
}"#;
