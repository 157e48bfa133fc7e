//! Email notifications.
//!
//! Uses SMTP via lettre when configured. Without SMTP settings the site falls
//! back to [`LogNotifier`], which records the message in the logs instead.
//! Handlers never await delivery: [`dispatch`] hands the message to a
//! detached task and failures only reach the logs.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use meadowlark_core::Email;
use secrecy::ExposeSecret;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::EmailConfig;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// A rendered email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: Email,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Delivers notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a single message.
    async fn send(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Send `notification` in the background.
///
/// The returned handle is only useful to tests; request handlers drop it.
pub fn dispatch(notifier: Arc<dyn Notifier>, notification: Notification) -> JoinHandle<()> {
    tokio::spawn(async move {
        let to = notification.to.clone();
        let subject = notification.subject.clone();
        if let Err(e) = notifier.send(notification).await {
            tracing::error!(to = %to, subject = %subject, error = %e, "Email delivery failed");
        }
    })
}

/// SMTP-backed notifier.
#[derive(Clone)]
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotifier {
    /// Create a new SMTP notifier from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the relay cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| NotifyError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(notification
                .to
                .as_str()
                .parse()
                .map_err(|_| NotifyError::InvalidAddress(notification.to.to_string()))?)
            .subject(notification.subject.as_str())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(notification.text_body),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(notification.html_body),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %notification.to, subject = %notification.subject, "Email sent successfully");
        Ok(())
    }
}

/// Notifier used when SMTP is not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        tracing::info!(
            to = %notification.to,
            subject = %notification.subject,
            body = %notification.text_body,
            "SMTP not configured, email logged instead of sent"
        );
        Ok(())
    }
}
