//! Core ticket data types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A support ticket as stored.
///
/// `status` and `priority` are kept as free text: the expected domains are
/// [`TicketStatus`] and [`TicketPriority`], but the store accepts any value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticket {
    /// Store-assigned identifier, increasing in insertion order.
    pub id: i64,
    /// Creation time (serialized as ISO-8601).
    pub created_at: DateTime<Utc>,
    pub customer_name: String,
    /// Origin medium (email, chat, phone, ...).
    pub channel: String,
    pub subject: String,
    pub status: String,
    pub priority: String,
}

/// Ticket payload before the store assigns an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub created_at: DateTime<Utc>,
    pub customer_name: String,
    pub channel: String,
    pub subject: String,
    pub status: String,
    pub priority: String,
}

/// Known ticket statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    Pending,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [Self::Open, Self::Pending, Self::Closed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Pending => "pending",
            Self::Closed => "closed",
        }
    }
}

/// Known ticket priorities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

impl TicketPriority {
    pub const ALL: [TicketPriority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A status or priority value outside its known domain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {field} '{value}', expected one of: {expected}")]
pub struct InvalidValue {
    pub field: &'static str,
    pub value: String,
    pub expected: String,
}

impl InvalidValue {
    fn new(field: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            field,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

impl FromStr for TicketStatus {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                InvalidValue::new("status", s, &Self::ALL.map(|status| status.as_str()))
            })
    }
}

impl FromStr for TicketPriority {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| {
                InvalidValue::new("priority", s, &Self::ALL.map(|priority| priority.as_str()))
            })
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
