//! Ticket API handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use tracing::info;

use inbox_core::{
    Ticket, TicketError, TicketFilter, TicketPriority, TicketStatus, TicketStore, TicketUpdate,
};

use super::error::ApiError;
use crate::metrics::TICKET_UPDATES;
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Query parameters for listing tickets
#[derive(Debug, Deserialize)]
pub struct ListTicketsParams {
    /// Case-insensitive text matched against subject or customer name
    pub search: Option<String>,
}

/// Request body for updating a ticket.
///
/// Each field distinguishes "absent" (`None`) from an explicit `null`
/// (`Some(None)`).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTicketBody {
    #[serde(default, deserialize_with = "present")]
    pub status: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub priority: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn non_null(field: &str, value: Option<Option<String>>) -> Result<Option<String>, ApiError> {
    match value {
        None => Ok(None),
        Some(None) => Err(ApiError::BadRequest(format!("{} must not be null", field))),
        Some(Some(v)) => Ok(Some(v)),
    }
}

impl UpdateTicketBody {
    /// Validate the body and turn it into a store update.
    ///
    /// With `enforce_value_domains`, status and priority must be known values.
    pub fn into_update(self, enforce_value_domains: bool) -> Result<TicketUpdate, ApiError> {
        let status = non_null("status", self.status)?;
        let priority = non_null("priority", self.priority)?;

        if enforce_value_domains {
            if let Some(ref s) = status {
                s.parse::<TicketStatus>()
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            }
            if let Some(ref p) = priority {
                p.parse::<TicketPriority>()
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            }
        }

        Ok(TicketUpdate { status, priority })
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Run a blocking store operation off the async runtime.
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&dyn TicketStore) -> Result<T, TicketError> + Send + 'static,
    T: Send + 'static,
{
    let store = state.ticket_store();
    let result = tokio::task::spawn_blocking(move || op(store.as_ref())).await?;
    Ok(result?)
}

// ============================================================================
// Handlers
// ============================================================================

/// List tickets, newest first, optionally filtered by `?search=`
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListTicketsParams>,
) -> Result<Json<Vec<Ticket>>, ApiError> {
    let mut filter = TicketFilter::new();
    if let Some(search) = params.search {
        filter = filter.with_search(search);
    }

    let tickets = with_store(&state, move |store| store.list(&filter)).await?;
    Ok(Json(tickets))
}

/// Get a ticket by ID
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Ticket>, ApiError> {
    let Path(id) = path.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let ticket = with_store(&state, move |store| store.get(id)).await?;
    ticket.map(Json).ok_or(ApiError::TicketNotFound(id))
}

/// Update a ticket's status and/or priority, then notify the webhook.
///
/// An empty body returns the ticket untouched and sends nothing. The
/// notification runs detached; its outcome never changes this response.
pub async fn update_ticket(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateTicketBody>, JsonRejection>,
) -> Result<Json<Ticket>, ApiError> {
    let Path(id) = path.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let update = body
        .into_update(state.config().validation.enforce_value_domains)
        .inspect_err(|_| TICKET_UPDATES.with_label_values(&["invalid"]).inc())?;

    let unchanged = update.is_empty();
    let ticket = with_store(&state, move |store| store.update(id, &update))
        .await
        .inspect_err(|e| {
            if matches!(e, ApiError::TicketNotFound(_)) {
                TICKET_UPDATES.with_label_values(&["not_found"]).inc();
            }
        })?;

    if unchanged {
        TICKET_UPDATES.with_label_values(&["unchanged"]).inc();
        return Ok(Json(ticket));
    }

    TICKET_UPDATES.with_label_values(&["applied"]).inc();
    info!(
        ticket_id = ticket.id,
        status = %ticket.status,
        priority = %ticket.priority,
        "Ticket updated"
    );

    state.notifications().dispatch(ticket.clone());

    Ok(Json(ticket))
}
