//! Dashboard metrics artifact endpoint.

use axum::{extract::State, Json};
use std::sync::Arc;

use inbox_core::MetricsDocument;

use super::error::ApiError;
use crate::state::AppState;

/// Serve the ETL-produced metrics document as-is.
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MetricsDocument>, ApiError> {
    let reader = state.metrics_reader().clone();
    let document = tokio::task::spawn_blocking(move || reader.read()).await??;
    Ok(Json(document))
}
