//! Support tickets: types, storage and initial seeding.

mod seed;
mod sqlite_store;
mod store;
mod types;

pub use seed::{seed_if_empty, SeedError, SeedOutcome};
pub use sqlite_store::SqliteTicketStore;
pub use store::{TicketError, TicketFilter, TicketStore, TicketUpdate};
pub use types::{InvalidValue, NewTicket, Ticket, TicketPriority, TicketStatus};
