use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailTransportError {
    #[error("Mail relay unreachable: {0}")]
    Unreachable(String),

    #[error("Mail relay rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Delivers one message; retries are the dispatcher's job
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), MailTransportError>;
}

/// Writes mail to the log instead of delivering it
pub struct LogMailTransport;

#[async_trait]
impl MailTransport for LogMailTransport {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), MailTransportError> {
        tracing::info!(recipient, subject, "Mail (log only):\n{}", body);
        Ok(())
    }
}

#[derive(Serialize)]
struct RelayMessage<'a> {
    from: Option<&'a str>,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// POSTs `{from, to, subject, text}` as JSON to an HTTP mail relay
pub struct HttpRelayTransport {
    client: reqwest::Client,
    relay_url: String,
    from: Option<String>,
}

impl HttpRelayTransport {
    pub fn new(relay_url: impl Into<String>, from: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            relay_url: relay_url.into(),
            from,
        })
    }
}

#[async_trait]
impl MailTransport for HttpRelayTransport {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), MailTransportError> {
        let message = RelayMessage {
            from: self.from.as_deref(),
            to: recipient,
            subject,
            text: body,
        };

        let response = self
            .client
            .post(&self.relay_url)
            .json(&message)
            .send()
            .await
            .map_err(|e| MailTransportError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailTransportError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!("Mail relay accepted message for {}", recipient);
        Ok(())
    }
}
