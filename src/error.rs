use crate::models::{Metric, Period};

#[derive(Debug, thiserror::Error)]
pub enum BeneishError {
    #[error("Missing data: {metric} for period {period}")]
    MissingData { metric: Metric, period: Period },

    #[error("M-Score for {current} vs {prior} is not finite")]
    NonFiniteScore { current: Period, prior: Period },

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, BeneishError>;
