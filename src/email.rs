//! Contact email delivery using lettre

use std::sync::Arc;

use agentlead_contact::{ContactSettings, ContactSubmission, EmailMessage};
use anyhow::Context;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use tracing::{error, info, warn};

use crate::{
    config::{Config, EmailConfig},
    error::AppError,
};

/// Something that can deliver a rendered email.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &EmailMessage) -> anyhow::Result<()>;
}

/// Delivers through an SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> anyhow::Result<Self> {
        let transport = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                smtp_username = %config.smtp_username,
                "SMTP transport initialized with authentication and TLS"
            );
            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
            // 465 is implicit TLS, everything else upgrades with STARTTLS
            let builder = if config.smtp_port == 465 {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            };

            builder
                .context("Failed to create SMTP transport")?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &EmailMessage) -> anyhow::Result<()> {
        let message = build_message(email)?;

        self.transport
            .send(message)
            .await
            .with_context(|| format!("SMTP relay rejected email to {}", email.to))?;

        Ok(())
    }
}

/// Logs emails instead of sending them.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &EmailMessage) -> anyhow::Result<()> {
        info!(
            to = %email.to,
            subject = %email.subject,
            "Email sending disabled, skipping SMTP"
        );

        Ok(())
    }
}

/// Converts a rendered email into a multipart (text + html) lettre message.
pub fn build_message(email: &EmailMessage) -> anyhow::Result<Message> {
    let from: Mailbox = email.from.parse().context("Failed to parse from email")?;
    let to: Mailbox = email
        .to
        .parse()
        .with_context(|| format!("Failed to parse recipient email {}", email.to))?;

    let mut builder = Message::builder().from(from).to(to).subject(&email.subject);

    if let Some(reply_to) = &email.reply_to {
        // A bad reply-to must not block the notification itself.
        match reply_to.parse::<Mailbox>() {
            Ok(mailbox) => builder = builder.reply_to(mailbox),
            Err(e) => warn!(error = %e, reply_to = %reply_to, "Ignoring invalid reply-to"),
        }
    }

    builder
        .multipart(MultiPart::alternative_plain_html(
            email.text.clone(),
            email.html.clone(),
        ))
        .context("Failed to build email message")
}

/// Sends the two emails produced by a contact submission.
#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<dyn Mailer>,
    settings: ContactSettings,
}

impl EmailService {
    /// Create the email service from configuration
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mailer: Arc<dyn Mailer> = if config.email.skip_sending {
            info!("Email sending disabled by configuration");
            Arc::new(LogMailer)
        } else {
            Arc::new(SmtpMailer::new(&config.email)?)
        };

        Ok(Self::with_mailer(mailer, config.contact_settings()))
    }

    pub fn with_mailer(mailer: Arc<dyn Mailer>, settings: ContactSettings) -> Self {
        Self { mailer, settings }
    }

    pub fn settings(&self) -> &ContactSettings {
        &self.settings
    }

    /// Notifies the agency inbox, then acknowledges the visitor.
    ///
    /// Stops at the first failure; callers cannot tell whether the admin
    /// notification went out before the auto-reply failed.
    pub async fn send_contact_emails(
        &self,
        submission: &ContactSubmission,
    ) -> Result<(), AppError> {
        let notification = agentlead_contact::admin_notification(submission, &self.settings)?;
        let reply = agentlead_contact::auto_reply(submission, &self.settings)?;

        if let Err(e) = self.mailer.send(&notification).await {
            error!(error = ?e, to = %notification.to, "Failed to send admin notification");
            return Err(AppError::Mail(e));
        }
        info!(to = %notification.to, "Admin notification sent");

        if let Err(e) = self.mailer.send(&reply).await {
            error!(error = ?e, to = %reply.to, "Failed to send auto-reply");
            return Err(AppError::Mail(e));
        }
        info!(to = %reply.to, "Auto-reply sent");

        Ok(())
    }
}
