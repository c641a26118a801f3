//! Read-only access to the dashboard metrics artifact.
//!
//! The artifact is a JSON summary regenerated out-of-band by the ETL job.
//! It is never cached: every read goes back to disk.

use std::io::ErrorKind;
use std::path::PathBuf;

use serde_json::value::RawValue;
use thiserror::Error;
use tracing::debug;

use crate::metrics::METRICS_ARTIFACT_READS;

/// The artifact contents, validated as JSON but otherwise untouched.
pub type MetricsDocument = Box<RawValue>;

/// Errors reading the metrics artifact.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The ETL job has not produced the file yet.
    #[error("Metrics artifact not found at {}", path.display())]
    Missing { path: PathBuf },

    /// The file exists but is not valid JSON.
    #[error("Metrics artifact is not valid JSON: {0}")]
    Corrupt(String),

    /// Any other I/O failure.
    #[error("Failed to read metrics artifact: {0}")]
    Unreadable(#[from] std::io::Error),
}

impl MetricsError {
    fn label(&self) -> &'static str {
        match self {
            MetricsError::Missing { .. } => "missing",
            MetricsError::Corrupt(_) => "corrupt",
            MetricsError::Unreadable(_) => "unreadable",
        }
    }
}

/// Reads the metrics artifact from a fixed path.
#[derive(Debug, Clone)]
pub struct MetricsReader {
    path: PathBuf,
}

impl MetricsReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and validate the artifact.
    pub fn read(&self) -> Result<MetricsDocument, MetricsError> {
        let result = self.read_uncounted();
        let label = match &result {
            Ok(_) => "ok",
            Err(e) => e.label(),
        };
        METRICS_ARTIFACT_READS.with_label_values(&[label]).inc();
        result
    }

    fn read_uncounted(&self) -> Result<MetricsDocument, MetricsError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(MetricsError::Missing {
                    path: self.path.clone(),
                });
            }
            // Not UTF-8, so it cannot be JSON either
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(MetricsError::Corrupt(e.to_string()));
            }
            Err(e) => return Err(MetricsError::Unreadable(e)),
        };

        debug!("Read {} bytes from {:?}", contents.len(), self.path);

        RawValue::from_string(contents).map_err(|e| MetricsError::Corrupt(e.to_string()))
    }
}
