//! Ticket storage trait and types.

use thiserror::Error;

use crate::ticket::{NewTicket, Ticket};

/// Error type for ticket operations.
#[derive(Debug, Error)]
pub enum TicketError {
    /// Ticket not found.
    #[error("Ticket not found: {0}")]
    NotFound(i64),
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl From<rusqlite::Error> for TicketError {
    fn from(e: rusqlite::Error) -> Self {
        TicketError::Database(e.to_string())
    }
}

/// Filter for listing tickets.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    /// Case-insensitive substring matched against subject or customer name.
    pub search: Option<String>,
}

impl TicketFilter {
    /// Create a filter matching every ticket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only keep tickets whose subject or customer name contains `text`.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// The search text, if any. An empty string means no filtering.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// Whether a ticket passes this filter.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        match self.search_term() {
            None => true,
            Some(term) => {
                let needle = term.to_lowercase();
                ticket.subject.to_lowercase().contains(&needle)
                    || ticket.customer_name.to_lowercase().contains(&needle)
            }
        }
    }
}

/// Partial update of a ticket's mutable fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketUpdate {
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl TicketUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none()
    }

    /// Apply this update to a ticket snapshot.
    pub fn apply_to(&self, ticket: Ticket) -> Ticket {
        Ticket {
            status: self.status.clone().unwrap_or(ticket.status),
            priority: self.priority.clone().unwrap_or(ticket.priority),
            ..ticket
        }
    }
}

/// Trait for ticket storage backends.
///
/// Implementations hand out owned snapshots; nothing returned borrows from the store.
pub trait TicketStore: Send + Sync {
    /// Insert tickets atomically, returning them with their assigned IDs.
    fn insert_many(&self, tickets: Vec<NewTicket>) -> Result<Vec<Ticket>, TicketError>;

    /// Get a ticket by ID.
    fn get(&self, id: i64) -> Result<Option<Ticket>, TicketError>;

    /// List tickets matching the filter, newest first.
    /// Tickets created at the same instant keep insertion order.
    fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketError>;

    /// Count all stored tickets.
    fn count(&self) -> Result<i64, TicketError>;

    /// Apply a partial update. Either every provided field is persisted or none is.
    /// An empty update returns the stored ticket without writing.
    fn update(&self, id: i64, update: &TicketUpdate) -> Result<Ticket, TicketError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ticket(customer_name: &str, subject: &str) -> Ticket {
        Ticket {
            id: 1,
            created_at: Utc::now(),
            customer_name: customer_name.to_string(),
            channel: "chat".to_string(),
            subject: subject.to_string(),
            status: "open".to_string(),
            priority: "low".to_string(),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let t = ticket("Test Alan", "Bug Report");
        assert!(TicketFilter::new().matches(&t));
        assert!(TicketFilter::new().with_search("").matches(&t));
    }

    #[test]
    fn test_filter_matches_customer_name_case_insensitively() {
        let t = ticket("Test Alan", "Bug Report");
        assert!(TicketFilter::new().with_search("alan").matches(&t));
        assert!(TicketFilter::new().with_search("ALAN").matches(&t));
        assert!(!TicketFilter::new().with_search("Emily").matches(&t));
    }

    #[test]
    fn test_filter_matches_subject_substring() {
        let t = ticket("Test Emily", "Inquiry about pricing");
        assert!(TicketFilter::new().with_search("PRICING").matches(&t));
        assert!(TicketFilter::new().with_search("about pri").matches(&t));
    }

    #[test]
    fn test_filter_handles_non_ascii_case() {
        let t = ticket("JOÃO Pereira", "Devolução de pedido");
        assert!(TicketFilter::new().with_search("joão").matches(&t));
        assert!(TicketFilter::new().with_search("DEVOLUÇÃO").matches(&t));
    }

    #[test]
    fn test_filter_treats_sql_wildcards_literally() {
        let t = ticket("Test Alan", "Bug Report");
        assert!(!TicketFilter::new().with_search("%").matches(&t));
        assert!(!TicketFilter::new().with_search("B_g").matches(&t));
    }

    #[test]
    fn test_update_apply_to_only_touches_provided_fields() {
        let t = ticket("Test Alan", "Bug Report");
        let updated = TicketUpdate::new().with_status("pending").apply_to(t.clone());
        assert_eq!(updated.status, "pending");
        assert_eq!(updated.priority, t.priority);
        assert_eq!(updated.created_at, t.created_at);
    }

    #[test]
    fn test_update_is_empty() {
        assert!(TicketUpdate::new().is_empty());
        assert!(!TicketUpdate::new().with_priority("high").is_empty());
    }
}
