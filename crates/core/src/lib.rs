pub mod config;
pub mod dashboard;
pub mod metrics;
pub mod notify;
pub mod testing;
pub mod ticket;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError, CorsConfig, DatabaseConfig, MetricsConfig, SeedConfig, ServerConfig,
    ValidationConfig, WebhookConfig,
};
pub use dashboard::{MetricsDocument, MetricsError, MetricsReader};
pub use notify::{NotificationDispatcher, Notifier, NotifyError, WebhookNotifier};
pub use ticket::{
    seed_if_empty, InvalidValue, NewTicket, SeedError, SeedOutcome, SqliteTicketStore, Ticket,
    TicketError, TicketFilter, TicketPriority, TicketStatus, TicketStore, TicketUpdate,
};
