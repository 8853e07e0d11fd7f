use thiserror::Error;

use crate::endpoint::Endpoint;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid api base url '{base}': {reason}")]
    InvalidBaseUrl { base: String, reason: String },
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: Endpoint,
        source: reqwest::Error,
    },
    #[error("{endpoint} responded with HTTP {status}")]
    Status {
        endpoint: Endpoint,
        status: reqwest::StatusCode,
    },
    #[error("{endpoint} is unavailable: {reason}")]
    Unavailable { endpoint: Endpoint, reason: String },
    #[error(
        "{} of {} dashboard requests failed: {}",
        .failures.len(),
        Endpoint::ALL.len(),
        summarize(.failures)
    )]
    Batch { failures: Vec<FetchError> },
}

impl FetchError {
    /// Endpoint a single-request error belongs to.
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            FetchError::Transport { endpoint, .. }
            | FetchError::Status { endpoint, .. }
            | FetchError::Unavailable { endpoint, .. } => Some(*endpoint),
            FetchError::InvalidBaseUrl { .. } | FetchError::Batch { .. } => None,
        }
    }

    /// Endpoints that failed, in batch order.
    pub fn failed_endpoints(&self) -> Vec<Endpoint> {
        match self {
            FetchError::Batch { failures } => failures.iter().filter_map(Self::endpoint).collect(),
            other => other.endpoint().into_iter().collect(),
        }
    }
}

fn summarize(failures: &[FetchError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("dashboard load task ended abnormally: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
#[error("failed to load dashboard settings: {0}")]
pub struct SettingsError(#[from] pub config::ConfigError);
