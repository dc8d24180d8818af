//! Delivery channel boundary — the contract the dispatch engine sends through,
//! plus the production email implementation (Resend HTTP API).
//!
//! The channel is deliberately dumb: one synchronous send per call, success or
//! failure, no retries and no queuing. Retry policy lives in the engine.

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by a delivery channel.
///
/// These never propagate out of the dispatch engine as request failures; the
/// engine records the attempt as failed and logs the reason.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider rejected message (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Abstraction over an outbound delivery mechanism.
///
/// Implementations must be cheap to share behind an `Arc` and safe to call
/// concurrently from multiple request handlers.
#[async_trait::async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Attempt a single delivery to `to`. No partial outcomes: the message
    /// either reached the provider or it did not.
    async fn deliver(&self, to: &str, subject: &str, body: &str) -> Result<(), ChannelError>;
}

/// JSON payload accepted by the Resend `/emails` endpoint.
#[derive(Debug, Serialize)]
struct EmailPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

/// Email delivery via the Resend HTTP API.
pub struct ResendMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl ResendMailer {
    /// Build a mailer with an explicit per-call timeout.
    ///
    /// The timeout bounds the whole delivery call; without it a hung provider
    /// would block the dispatching request indefinitely.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, ChannelError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
            from: from.into(),
        })
    }
}

#[async_trait::async_trait]
impl DeliveryChannel for ResendMailer {
    async fn deliver(&self, to: &str, subject: &str, body: &str) -> Result<(), ChannelError> {
        let payload = EmailPayload {
            from: &self.from,
            to: [to],
            subject,
            text: body,
        };

        let response = self
            .client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChannelError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(to, subject, "Email accepted by provider");
        Ok(())
    }
}
