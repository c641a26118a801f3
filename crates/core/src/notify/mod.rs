//! Best-effort notification of ticket updates to an external automation.
//!
//! Delivery is at-most-once: no retry, no queue, and failures never reach
//! the code path that triggered the notification.

mod webhook;

pub use webhook::WebhookNotifier;

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::metrics::{WEBHOOK_DURATION, WEBHOOK_NOTIFICATIONS};
use crate::ticket::Ticket;

/// Errors that can occur when notifying about a ticket update.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The endpoint did not answer within the configured timeout.
    #[error("Webhook request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection or protocol failure.
    #[error("Webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx/3xx status.
    #[error("Webhook returned status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Something that can be told about an updated ticket.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a snapshot of the updated ticket.
    async fn send(&self, ticket: &Ticket) -> Result<(), NotifyError>;
}

/// Runs notifications on detached tasks.
///
/// Outcomes are only observed through logs and metrics.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Send `ticket` in the background.
    ///
    /// The returned handle may be dropped; the task keeps running and its
    /// result is logged either way.
    pub fn dispatch(&self, ticket: Ticket) -> JoinHandle<()> {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            let start = Instant::now();
            let outcome = match notifier.send(&ticket).await {
                Ok(()) => {
                    debug!(ticket_id = ticket.id, "Ticket update notification delivered");
                    "delivered"
                }
                Err(e) => {
                    warn!(
                        ticket_id = ticket.id,
                        error = %e,
                        "Failed to notify webhook about ticket update"
                    );
                    "failed"
                }
            };
            WEBHOOK_NOTIFICATIONS.with_label_values(&[outcome]).inc();
            WEBHOOK_DURATION
                .with_label_values(&[outcome])
                .observe(start.elapsed().as_secs_f64());
        })
    }
}
