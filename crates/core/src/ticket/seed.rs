//! One-time bulk load of the bundled seed dataset into an empty store.
//!
//! Seeding is gated only by an emptiness check. Two processes starting
//! against the same empty database may both seed it; nothing guards that.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use super::{NewTicket, TicketError, TicketStore};

/// Errors while loading seed data.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid created_at '{value}' in seed record {index}")]
    InvalidTimestamp { index: usize, value: String },

    #[error("Failed to insert seed tickets: {0}")]
    Store(#[from] TicketError),
}

/// What happened during seeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty and this many tickets were inserted.
    Inserted(usize),
    /// The store already had tickets; nothing was read or written.
    AlreadyPopulated,
    /// The store was empty but the seed file does not exist.
    MissingFile(PathBuf),
}

/// One record of the seed dataset.
#[derive(Debug, Deserialize)]
struct SeedRecord {
    created_at: String,
    customer_name: String,
    channel: String,
    subject: String,
    status: String,
    priority: String,
}

/// Parse an ISO-8601 date-time. Values without an offset are taken as UTC.
fn parse_created_at(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Parse seed records from a JSON array.
fn parse_seed_data(json: &str) -> Result<Vec<NewTicket>, SeedError> {
    let records: Vec<SeedRecord> = serde_json::from_str(json)?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let created_at = parse_created_at(&record.created_at).ok_or_else(|| {
                SeedError::InvalidTimestamp {
                    index,
                    value: record.created_at.clone(),
                }
            })?;

            Ok(NewTicket {
                created_at,
                customer_name: record.customer_name,
                channel: record.channel,
                subject: record.subject,
                status: record.status,
                priority: record.priority,
            })
        })
        .collect()
}

/// Read and parse a seed file.
fn load_seed_file(path: &Path) -> Result<Vec<NewTicket>, SeedError> {
    let json = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_seed_data(&json)
}

/// Populate the store from `path` if, and only if, it holds no tickets.
///
/// All records are inserted in one transaction: a bad record leaves the store empty.
pub fn seed_if_empty(store: &dyn TicketStore, path: &Path) -> Result<SeedOutcome, SeedError> {
    if store.count()? > 0 {
        info!("Ticket store already contains tickets, skipping seeding");
        return Ok(SeedOutcome::AlreadyPopulated);
    }

    if !path.exists() {
        error!("Seed file not found at {:?}", path);
        return Ok(SeedOutcome::MissingFile(path.to_path_buf()));
    }

    let tickets = load_seed_file(path)?;
    let count = tickets.len();
    info!("Seeding ticket store with {} tickets from {:?}", count, path);

    store.insert_many(tickets)?;
    info!("Seed tickets inserted");

    Ok(SeedOutcome::Inserted(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::{SqliteTicketStore, TicketFilter};
    use chrono::TimeZone;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SEED_JSON: &str = r#"[
        {"created_at": "2024-06-01T10:00:00+00:00", "customer_name": "Ana Lima", "channel": "email", "subject": "Erro no login", "status": "open", "priority": "high"},
        {"created_at": "2024-06-02T08:15:30", "customer_name": "Bruno Costa", "channel": "chat", "subject": "Dúvida sobre plano", "status": "pending", "priority": "low"}
    ]"#;

    fn seed_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_created_at_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 1, 13, 0, 0).unwrap();
        assert_eq!(parse_created_at("2024-06-01T10:00:00-03:00"), Some(expected));
        assert_eq!(parse_created_at("2024-06-01T13:00:00Z"), Some(expected));
        assert_eq!(parse_created_at("2024-06-01T13:00:00"), Some(expected));
        assert_eq!(parse_created_at("2024-06-01 13:00:00"), Some(expected));
        assert_eq!(parse_created_at("yesterday"), None);
    }

    #[test]
    fn test_parse_seed_data() {
        let tickets = parse_seed_data(SEED_JSON).unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].customer_name, "Ana Lima");
        assert_eq!(
            tickets[1].created_at,
            Utc.with_ymd_and_hms(2024, 6, 2, 8, 15, 30).unwrap()
        );
    }

    #[test]
    fn test_parse_seed_data_reports_bad_timestamp_index() {
        let json = r#"[{"created_at": "soon", "customer_name": "X", "channel": "c", "subject": "s", "status": "open", "priority": "low"}]"#;
        let err = parse_seed_data(json).unwrap_err();
        assert!(matches!(err, SeedError::InvalidTimestamp { index: 0, .. }));
    }

    #[test]
    fn test_seed_empty_store() {
        let store = SqliteTicketStore::in_memory().unwrap();
        let file = seed_file(SEED_JSON);

        let outcome = seed_if_empty(&store, file.path()).unwrap();
        assert_eq!(outcome, SeedOutcome::Inserted(2));

        let tickets = store.list(&TicketFilter::new()).unwrap();
        assert_eq!(tickets[0].customer_name, "Bruno Costa");
        assert_eq!(tickets[1].customer_name, "Ana Lima");
    }

    #[test]
    fn test_seed_skips_populated_store() {
        let store = SqliteTicketStore::in_memory().unwrap();
        let file = seed_file(SEED_JSON);

        seed_if_empty(&store, file.path()).unwrap();
        let outcome = seed_if_empty(&store, file.path()).unwrap();

        assert_eq!(outcome, SeedOutcome::AlreadyPopulated);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_seed_missing_file() {
        let store = SqliteTicketStore::in_memory().unwrap();
        let outcome = seed_if_empty(&store, Path::new("/nonexistent/seeds.json")).unwrap();
        assert!(matches!(outcome, SeedOutcome::MissingFile(_)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_seed_invalid_json_inserts_nothing() {
        let store = SqliteTicketStore::in_memory().unwrap();
        let file = seed_file("[{\"created_at\": ");

        let result = seed_if_empty(&store, file.path());
        assert!(matches!(result, Err(SeedError::Parse(_))));
        assert_eq!(store.count().unwrap(), 0);
    }
}
