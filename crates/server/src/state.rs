use std::sync::Arc;

use inbox_core::{Config, MetricsReader, NotificationDispatcher, TicketStore};

/// Shared application state
///
/// Built once at startup; handlers only read from it.
pub struct AppState {
    config: Config,
    ticket_store: Arc<dyn TicketStore>,
    metrics_reader: MetricsReader,
    notifications: NotificationDispatcher,
}

impl AppState {
    pub fn new(
        config: Config,
        ticket_store: Arc<dyn TicketStore>,
        notifications: NotificationDispatcher,
    ) -> Self {
        let metrics_reader = MetricsReader::new(config.metrics.path.clone());
        Self {
            config,
            ticket_store,
            metrics_reader,
            notifications,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ticket_store(&self) -> Arc<dyn TicketStore> {
        Arc::clone(&self.ticket_store)
    }

    pub fn metrics_reader(&self) -> &MetricsReader {
        &self.metrics_reader
    }

    pub fn notifications(&self) -> &NotificationDispatcher {
        &self.notifications
    }
}
