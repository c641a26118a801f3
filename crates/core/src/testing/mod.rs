//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use inbox_core::testing::{fixtures, MockNotifier};
//!
//! let notifier = Arc::new(MockNotifier::new());
//! let dispatcher = NotificationDispatcher::new(notifier.clone());
//!
//! dispatcher.dispatch(fixtures::ticket(1, "Test Alan", "Bug Report"));
//! assert!(notifier.wait_for_sends(1, Duration::from_secs(1)).await);
//! ```

mod mock_notifier;

pub use mock_notifier::MockNotifier;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};

    use crate::ticket::{NewTicket, Ticket};

    /// Fixed reference instant for deterministic ordering.
    pub fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    /// An open, medium-priority ticket with the given id.
    pub fn ticket(id: i64, customer_name: &str, subject: &str) -> Ticket {
        Ticket {
            id,
            created_at: base_time(),
            customer_name: customer_name.to_string(),
            channel: "email".to_string(),
            subject: subject.to_string(),
            status: "open".to_string(),
            priority: "medium".to_string(),
        }
    }

    /// A ticket insert payload with explicit status and priority.
    pub fn new_ticket(
        customer_name: &str,
        subject: &str,
        status: &str,
        priority: &str,
        created_at: DateTime<Utc>,
    ) -> NewTicket {
        NewTicket {
            created_at,
            customer_name: customer_name.to_string(),
            channel: "chat".to_string(),
            subject: subject.to_string(),
            status: status.to_string(),
            priority: priority.to_string(),
        }
    }
}
