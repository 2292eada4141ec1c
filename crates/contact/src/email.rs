use askama::Template;

use crate::ContactSubmission;

/// Addresses and branding shared by both contact emails.
#[derive(Debug, Clone)]
pub struct ContactSettings {
    /// Mailbox the emails are sent from, e.g. `AgentLead <leads@agentlead.co>`.
    pub sender: String,
    pub admin_address: String,
    pub site_name: String,
    pub site_url: String,
}

/// A rendered email, ready to be handed to a mail transport.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Template)]
#[template(path = "emails/admin-notification.html")]
struct AdminNotificationHtml<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    company: &'a str,
    message: String,
    site_name: &'a str,
}

#[derive(Template)]
#[template(path = "emails/admin-notification.txt")]
struct AdminNotificationText<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    company: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "emails/auto-reply.html")]
struct AutoReplyHtml<'a> {
    name: &'a str,
    message: String,
    site_name: &'a str,
    site_url: &'a str,
}

#[derive(Template)]
#[template(path = "emails/auto-reply.txt")]
struct AutoReplyText<'a> {
    name: &'a str,
    message: &'a str,
    site_name: &'a str,
    site_url: &'a str,
}

/// Builds the notification sent to the agency inbox for a new submission.
///
/// Replies from the inbox go straight to the visitor.
pub fn admin_notification(
    submission: &ContactSubmission,
    settings: &ContactSettings,
) -> crate::Result<EmailMessage> {
    let html = AdminNotificationHtml {
        name: &submission.name,
        email: &submission.email,
        phone: submission.phone_or_placeholder(),
        company: submission.company_or_placeholder(),
        message: linebreaks_html(&submission.message),
        site_name: &settings.site_name,
    }
    .render()?;

    let text = AdminNotificationText {
        name: &submission.name,
        email: &submission.email,
        phone: submission.phone_or_placeholder(),
        company: submission.company_or_placeholder(),
        message: &submission.message,
    }
    .render()?;

    Ok(EmailMessage {
        from: settings.sender.to_owned(),
        to: settings.admin_address.to_owned(),
        reply_to: Some(submission.email.to_owned()),
        subject: format!("New Contact Form Submission from {}", submission.name),
        html,
        text,
    })
}

/// Builds the acknowledgement sent back to the visitor.
pub fn auto_reply(
    submission: &ContactSubmission,
    settings: &ContactSettings,
) -> crate::Result<EmailMessage> {
    let html = AutoReplyHtml {
        name: &submission.name,
        message: linebreaks_html(&submission.message),
        site_name: &settings.site_name,
        site_url: &settings.site_url,
    }
    .render()?;

    let text = AutoReplyText {
        name: &submission.name,
        message: &submission.message,
        site_name: &settings.site_name,
        site_url: &settings.site_url,
    }
    .render()?;

    Ok(EmailMessage {
        from: settings.sender.to_owned(),
        to: submission.email.to_owned(),
        reply_to: None,
        subject: format!("Thank you for contacting {}", settings.site_name),
        html,
        text,
    })
}

/// Escapes `text` for HTML and turns every line break into `<br>`.
///
/// The result is inserted into templates unescaped.
pub fn linebreaks_html(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    html_escape::encode_safe(&text).replace('\n', "<br>")
}
