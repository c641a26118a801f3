//! Mock notifier for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::{sleep, Instant};

use crate::notify::{Notifier, NotifyError};
use crate::ticket::Ticket;

/// Mock implementation of the Notifier trait.
///
/// Records every delivered ticket and can be switched into a failing mode
/// that answers like an endpoint returning HTTP 500.
#[derive(Debug, Default)]
pub struct MockNotifier {
    sent: Arc<RwLock<Vec<Ticket>>>,
    attempts: Arc<RwLock<usize>>,
    failing: Arc<RwLock<bool>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail (or succeed again).
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }

    /// Tickets delivered successfully, in order.
    pub async fn sent(&self) -> Vec<Ticket> {
        self.sent.read().await.clone()
    }

    /// Number of send attempts, successful or not.
    pub async fn attempt_count(&self) -> usize {
        *self.attempts.read().await
    }

    /// Poll until at least `count` attempts were made or `timeout` elapses.
    pub async fn wait_for_sends(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.attempt_count().await >= count {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, ticket: &Ticket) -> Result<(), NotifyError> {
        *self.attempts.write().await += 1;

        if *self.failing.read().await {
            return Err(NotifyError::Rejected {
                status: 500,
                body: "mock failure".to_string(),
            });
        }

        self.sent.write().await.push(ticket.clone());
        Ok(())
    }
}
