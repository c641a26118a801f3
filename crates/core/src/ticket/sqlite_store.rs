//! SQLite-backed ticket store implementation.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use super::{NewTicket, Ticket, TicketError, TicketFilter, TicketStore, TicketUpdate};

const SELECT_COLUMNS: &str =
    "SELECT id, created_at, customer_name, channel, subject, status, priority FROM tickets";

/// SQLite-backed ticket store.
///
/// Every operation holds the connection guard for its own duration only, so
/// the connection is released on return whether the operation succeeded or not.
pub struct SqliteTicketStore {
    conn: Mutex<Connection>,
}

impl SqliteTicketStore {
    /// Create a new SQLite ticket store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, TicketError> {
        let conn = Connection::open(path)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite ticket store (useful for testing).
    pub fn in_memory() -> Result<Self, TicketError> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), TicketError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS tickets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                created_at TEXT NOT NULL,
                customer_name TEXT NOT NULL,
                channel TEXT NOT NULL,
                subject TEXT NOT NULL,
                status TEXT NOT NULL,
                priority TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tickets_created_at ON tickets(created_at DESC, id ASC);
            "#,
        )?;
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, TicketError> {
        self.conn
            .lock()
            .map_err(|_| TicketError::Database("ticket store connection lock poisoned".to_string()))
    }

    /// Fixed-width UTC form so that text ordering matches chronological ordering.
    fn format_timestamp(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn row_to_ticket(row: &rusqlite::Row) -> rusqlite::Result<Ticket> {
        let created_at_str: String = row.get(1)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;

        Ok(Ticket {
            id: row.get(0)?,
            created_at,
            customer_name: row.get(2)?,
            channel: row.get(3)?,
            subject: row.get(4)?,
            status: row.get(5)?,
            priority: row.get(6)?,
        })
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Option<Ticket>, TicketError> {
        let ticket = conn
            .query_row(
                &format!("{} WHERE id = ?", SELECT_COLUMNS),
                params![id],
                Self::row_to_ticket,
            )
            .optional()?;
        Ok(ticket)
    }
}

impl TicketStore for SqliteTicketStore {
    fn insert_many(&self, tickets: Vec<NewTicket>) -> Result<Vec<Ticket>, TicketError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let mut inserted = Vec::with_capacity(tickets.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tickets (created_at, customer_name, channel, subject, status, priority) VALUES (?, ?, ?, ?, ?, ?)",
            )?;

            for ticket in tickets {
                // Stored precision is microseconds; keep the returned snapshot identical.
                let created_at = ticket.created_at.trunc_subsecs(6);
                stmt.execute(params![
                    Self::format_timestamp(&created_at),
                    ticket.customer_name,
                    ticket.channel,
                    ticket.subject,
                    ticket.status,
                    ticket.priority,
                ])?;

                inserted.push(Ticket {
                    id: tx.last_insert_rowid(),
                    created_at,
                    customer_name: ticket.customer_name,
                    channel: ticket.channel,
                    subject: ticket.subject,
                    status: ticket.status,
                    priority: ticket.priority,
                });
            }
        }

        tx.commit()?;
        Ok(inserted)
    }

    fn get(&self, id: i64) -> Result<Option<Ticket>, TicketError> {
        let conn = self.conn()?;
        Self::fetch(&conn, id)
    }

    fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketError> {
        let conn = self.conn()?;

        let mut stmt =
            conn.prepare(&format!("{} ORDER BY created_at DESC, id ASC", SELECT_COLUMNS))?;
        let rows = stmt.query_map([], Self::row_to_ticket)?;

        // Matching happens here rather than in SQL: LIKE/lower() only fold ASCII
        // and treat % and _ as wildcards.
        let mut tickets = Vec::new();
        for row_result in rows {
            let ticket = row_result?;
            if filter.matches(&ticket) {
                tickets.push(ticket);
            }
        }

        Ok(tickets)
    }

    fn count(&self) -> Result<i64, TicketError> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))?;
        Ok(count)
    }

    fn update(&self, id: i64, update: &TicketUpdate) -> Result<Ticket, TicketError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let current = Self::fetch(&tx, id)?.ok_or(TicketError::NotFound(id))?;

        if update.is_empty() {
            return Ok(current);
        }

        tx.execute(
            "UPDATE tickets SET status = COALESCE(?1, status), priority = COALESCE(?2, priority) WHERE id = ?3",
            params![update.status, update.priority, id],
        )?;
        tx.commit()?;

        Ok(update.apply_to(current))
    }
}
