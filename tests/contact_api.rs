//! HTTP contract of POST /api/contact

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use helpers::{JANE, RecordingMailer, create_test_app, post_contact};
use serde_json::json;
use tower::ServiceExt;

mod helpers;

#[tokio::test]
async fn test_valid_submission_sends_both_emails() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = create_test_app(mailer.clone());

    let (status, body) = post_contact(&app, JANE).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Email sent successfully"}));

    let sent = mailer.attempts();
    assert_eq!(sent.len(), 2);

    let admin = &sent[0];
    assert_eq!(admin.to, "hello@agentlead.co");
    assert_eq!(admin.subject, "New Contact Form Submission from Jane Doe");
    assert_eq!(admin.reply_to.as_deref(), Some("jane@example.com"));
    assert_eq!(admin.html.matches("Not provided").count(), 2);

    let reply = &sent[1];
    assert_eq!(reply.to, "jane@example.com");
    assert!(reply.html.contains("Interested in ClosePoint plan"));
    assert!(reply.html.contains("https://agentlead.co"));
}

#[tokio::test]
async fn test_provided_optionals_replace_placeholder() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = create_test_app(mailer.clone());

    let body = json!({
        "name": "Sam Agent",
        "email": "sam@example.com",
        "phone": "+1 555 0100",
        "company": "Sam Sells Homes",
        "message": "Pricing question"
    });
    let (status, _) = post_contact(&app, &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let admin = &mailer.attempts()[0];
    assert!(!admin.html.contains("Not provided"));
    assert!(admin.html.contains("+1 555 0100"));
    assert!(admin.html.contains("Sam Sells Homes"));
}

#[tokio::test]
async fn test_missing_required_fields_are_rejected() {
    let cases = [
        json!({"email": "jane@example.com", "message": "hi"}),
        json!({"name": "Jane", "message": "hi"}),
        json!({"name": "Jane", "email": "jane@example.com"}),
        json!({"name": "", "email": "jane@example.com", "message": "hi"}),
        json!({"name": null, "email": "jane@example.com", "message": "hi"}),
        json!({}),
    ];

    for case in cases {
        let mailer = Arc::new(RecordingMailer::default());
        let app = create_test_app(mailer.clone());

        let (status, body) = post_contact(&app, &case.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "case {case}");
        assert_eq!(
            body,
            json!({"error": "Name, email, and message are required"}),
            "case {case}"
        );
        assert!(mailer.attempts().is_empty(), "case {case} sent email");
    }
}

#[tokio::test]
async fn test_whitespace_message_is_accepted() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = create_test_app(mailer.clone());

    let body = json!({"name": "Jane", "email": "jane@example.com", "message": "   "});
    let (status, body) = post_contact(&app, &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Email sent successfully"}));
    assert_eq!(mailer.attempts().len(), 2);
}

#[tokio::test]
async fn test_optionals_are_rendered_verbatim() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = create_test_app(mailer.clone());

    let body = json!({
        "name": "Jane",
        "email": "jane@example.com",
        "phone": " 555 0100 ",
        "company": "",
        "message": "hi"
    });
    let (status, _) = post_contact(&app, &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let admin = &mailer.attempts()[0];
    assert!(admin.text.contains(" 555 0100 "));
    assert_eq!(admin.text.matches("Not provided").count(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = create_test_app(mailer.clone());

    let (status, body) = post_contact(&app, "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid request body"}));
    assert!(mailer.attempts().is_empty());
}

#[tokio::test]
async fn test_admin_send_failure_returns_500() {
    let mailer = Arc::new(RecordingMailer::failing_on(1));
    let app = create_test_app(mailer.clone());

    let (status, body) = post_contact(&app, JANE).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to send email"}));
    // Auto-reply is never attempted once the notification fails.
    assert_eq!(mailer.attempts().len(), 1);
}

#[tokio::test]
async fn test_auto_reply_failure_returns_500() {
    let mailer = Arc::new(RecordingMailer::failing_on(2));
    let app = create_test_app(mailer.clone());

    let (status, body) = post_contact(&app, JANE).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to send email"}));
    assert_eq!(mailer.attempts().len(), 2);
}

#[tokio::test]
async fn test_message_newlines_render_as_breaks() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = create_test_app(mailer.clone());

    let body = json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "message": "First line\nSecond line"
    });
    let (status, _) = post_contact(&app, &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    for email in mailer.attempts() {
        assert!(email.html.contains("First line<br>Second line"));
        assert!(!email.html.contains("First line\nSecond line"));
    }
}

#[tokio::test]
async fn test_submitted_markup_is_escaped() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = create_test_app(mailer.clone());

    let body = json!({
        "name": "<img src=x onerror=alert(1)>",
        "email": "jane@example.com",
        "company": "<b>Evil</b>",
        "message": "<script>alert('x')</script>"
    });
    let (status, _) = post_contact(&app, &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    for email in mailer.attempts() {
        assert!(!email.html.contains("<img"));
        assert!(!email.html.contains("<script>"));
        assert!(!email.html.contains("<b>Evil</b>"));
    }
}

#[tokio::test]
async fn test_health_returns_ok() {
    let app = create_test_app(Arc::new(RecordingMailer::default()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
