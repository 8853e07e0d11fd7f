use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

pub mod endpoint;
pub mod error;
pub mod merge;
pub mod model;
pub mod orchestrator;
pub mod payload;
pub mod render;
pub mod session;
pub mod settings;

pub use endpoint::{Endpoint, EndpointSet};
pub use error::{FetchError, SessionError, SettingsError};
pub use merge::merge;
pub use model::{DashboardViewModel, StageStatusMap};
pub use orchestrator::{fetch_batch, RawBatch};
pub use render::{render_json, render_text, TextReport};
pub use session::{DashboardSession, DashboardSnapshot, LoadEvent, LoadPhase};
pub use settings::DashboardSettings;

/// Where the dashboard reads its five bodies from.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value, FetchError>;
}

pub struct MissingDashboardSource;

#[async_trait]
impl DashboardSource for MissingDashboardSource {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value, FetchError> {
        Err(FetchError::Unavailable {
            endpoint,
            reason: "no dashboard backend configured".to_string(),
        })
    }
}

/// Reads the endpoints over HTTP GET. Only transport errors and non-2xx
/// statuses fail a request.
pub struct HttpDashboardSource {
    http: Client,
    endpoints: EndpointSet,
}

impl HttpDashboardSource {
    pub fn new(api_base: &str) -> Result<Self, FetchError> {
        Self::with_client(Client::new(), api_base)
    }

    pub fn with_client(http: Client, api_base: &str) -> Result<Self, FetchError> {
        Ok(Self {
            http,
            endpoints: EndpointSet::new(api_base)?,
        })
    }

    pub fn endpoints(&self) -> &EndpointSet {
        &self.endpoints
    }
}

#[async_trait]
impl DashboardSource for HttpDashboardSource {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value, FetchError> {
        let url = self.endpoints.url(endpoint);
        debug!(%endpoint, %url, "requesting dashboard endpoint");

        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;
        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status { endpoint, status });
        }
        let body = res
            .bytes()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;
        Ok(read_body(endpoint, &body))
    }
}

/// JSON value of a successful body. Anything unparseable is passed on as
/// text (or null when empty) so the payload readers blank it out.
fn read_body(endpoint: Endpoint, body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        debug!(%endpoint, "empty response body");
        return Value::Null;
    }
    serde_json::from_slice(body).unwrap_or_else(|error| {
        debug!(%endpoint, %error, "response body is not JSON; reading it as text");
        Value::String(String::from_utf8_lossy(body).into_owned())
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
