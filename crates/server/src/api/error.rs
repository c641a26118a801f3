//! HTTP error mapping.
//!
//! Every error body has the shape `{"detail": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use inbox_core::{MetricsError, TicketError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Ticket com ID {0} não encontrado.")]
    TicketNotFound(i64),

    #[error("{0}")]
    BadRequest(String),

    #[error("Arquivo de métricas não encontrado. Execute o job de ETL (python data/etl.py) para gerá-lo.")]
    MetricsMissing,

    #[error("Erro ao ler o arquivo de métricas. JSON inválido.")]
    MetricsCorrupt,

    #[error("Erro desconhecido ao ler o arquivo de métricas.")]
    MetricsUnreadable,

    #[error("Recurso não encontrado.")]
    RouteNotFound,

    #[error("Método não permitido.")]
    MethodNotAllowed,

    #[error("Erro interno do servidor.")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::TicketNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::MetricsMissing
            | ApiError::MetricsCorrupt
            | ApiError::MetricsUnreadable
            | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TicketError> for ApiError {
    fn from(e: TicketError) -> Self {
        match e {
            TicketError::NotFound(id) => ApiError::TicketNotFound(id),
            TicketError::Database(msg) => {
                error!("Ticket store failure: {}", msg);
                ApiError::Internal
            }
        }
    }
}

impl From<MetricsError> for ApiError {
    fn from(e: MetricsError) -> Self {
        error!("Metrics artifact unavailable: {}", e);
        match e {
            MetricsError::Missing { .. } => ApiError::MetricsMissing,
            MetricsError::Corrupt(_) => ApiError::MetricsCorrupt,
            MetricsError::Unreadable(_) => ApiError::MetricsUnreadable,
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        error!("Blocking task failed: {}", e);
        ApiError::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}
