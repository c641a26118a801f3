//! HTTP webhook notifier.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{Notifier, NotifyError};
use crate::config::WebhookConfig;
use crate::ticket::Ticket;

/// POSTs the ticket JSON to a fixed URL.
pub struct WebhookNotifier {
    client: Client,
    url: String,
    timeout: Duration,
}

impl WebhookNotifier {
    /// Create a notifier from configuration.
    pub fn new(config: &WebhookConfig) -> Result<Self, NotifyError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            timeout,
        })
    }

    /// Target endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, ticket: &Ticket) -> Result<(), NotifyError> {
        debug!("POST {} for ticket {}", self.url, ticket.id);

        let response = self
            .client
            .post(&self.url)
            .json(ticket)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NotifyError::Timeout(self.timeout)
                } else {
                    NotifyError::Http(e)
                }
            })?;

        let status = response.status();
        if status.is_success() || status.is_redirection() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotifyError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
