//! Mailer service implementation
//! 
//! This service handles transactional email delivery through an external
//! HTTP mail API, including client setup, message templating for one-time
//! codes, response parsing, and error handling. When delivery is disabled
//! (local development, tests) messages are logged instead of sent.

use std::time::Duration;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn, debug};
use crate::config::settings::Settings;
use crate::utils::errors::{TurfBookError, MailError, Result};

/// Outbound message posted to the mail API
#[derive(Debug, Clone, Serialize)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Mail API response structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailApiResponse {
    pub ok: bool,
    pub message_id: Option<String>,
    pub error: Option<String>,
}

/// Mailer service for transactional email delivery
#[derive(Clone)]
#[derive(Debug)]
pub struct MailerService {
    client: Client,
    settings: Settings,
}

impl MailerService {
    /// Create a new MailerService instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.mail.timeout_seconds))
            .user_agent("TurfBook-API/1.0")
            .build()
            .map_err(TurfBookError::Http)?;

        Ok(Self { client, settings })
    }

    /// Whether real delivery is enabled
    pub fn is_enabled(&self) -> bool {
        self.settings.mail.enabled
    }

    /// Send a one-time login code to a user
    pub async fn send_otp_email(&self, to: &str, code: &str, ttl_minutes: i64) -> Result<()> {
        let message = MailMessage {
            from: self.settings.mail.sender.clone(),
            to: to.to_string(),
            subject: "Your TurfBook login code".to_string(),
            text: Self::format_otp_message(code, ttl_minutes),
        };

        self.send(message).await
    }

    /// Deliver a message through the mail API
    pub async fn send(&self, message: MailMessage) -> Result<()> {
        if !self.is_enabled() {
            // Local development and tests run without a mail provider.
            info!(to = %message.to, subject = %message.subject, "Mail delivery disabled, message logged only");
            return Ok(());
        }

        debug!(to = %message.to, subject = %message.subject, "Sending mail");

        let url = format!("{}/send", self.settings.mail.api_url.trim_end_matches('/'));
        let response = self.client
            .post(&url)
            .bearer_auth(&self.settings.mail.api_key)
            .json(&message)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TurfBookError::Mail(MailError::Timeout)
                } else {
                    TurfBookError::Mail(MailError::RequestFailed(e.to_string()))
                }
            })?;

        if response.status().is_server_error() {
            warn!(status = %response.status(), "Mail API unavailable");
            return Err(TurfBookError::Mail(MailError::ServiceUnavailable));
        }

        if !response.status().is_success() {
            let status = response.status();
            return Err(TurfBookError::Mail(MailError::RequestFailed(
                format!("Mail API returned status {}", status)
            )));
        }

        let body: MailApiResponse = response.json().await
            .map_err(|e| TurfBookError::Mail(MailError::InvalidResponse(e.to_string())))?;

        if !body.ok {
            return Err(TurfBookError::Mail(MailError::RequestFailed(
                body.error.unwrap_or_else(|| "unknown mail API error".to_string())
            )));
        }

        info!(to = %message.to, message_id = body.message_id.as_deref(), "Mail sent successfully");
        Ok(())
    }

    /// Render the one-time code message body
    fn format_otp_message(code: &str, ttl_minutes: i64) -> String {
        format!(
            "Your TurfBook login code is {}.\n\nIt expires in {} minutes. \
             If you did not request this code, you can ignore this message.",
            code, ttl_minutes
        )
    }
}
