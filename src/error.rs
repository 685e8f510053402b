//! Error kinds surfaced by the chart core.

use thiserror::Error;

/// Errors returned by loading, configuration and view-state transitions.
///
/// A missing anchor value during normalization is deliberately absent here:
/// the series is drawn unrebased instead.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The tabular source could not be read at all. Fatal for the host.
    #[error("cannot read data source `{source_name}`: {reason}")]
    DataSource { source_name: String, reason: String },

    /// A window request with `min > max` or a non-finite bound.
    /// The view state is left unchanged.
    #[error("invalid range [{min}, {max}]: bounds must be finite with min <= max")]
    InvalidRange { min: f64, max: f64 },

    #[error("unknown country: {0}")]
    UnknownCountry(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ChartError {
    pub(crate) fn data_source(source_name: impl Into<String>, reason: impl ToString) -> Self {
        ChartError::DataSource {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
