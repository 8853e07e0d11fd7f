use std::fmt;

use shared::domain::Stage;
use url::Url;

use crate::error::FetchError;

/// One of the five data sources behind the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Stage(Stage),
    Risks,
}

impl Endpoint {
    /// Fixed request order of a batch.
    pub const ALL: [Endpoint; 5] = [
        Endpoint::Stage(Stage::Govern),
        Endpoint::Stage(Stage::Map),
        Endpoint::Stage(Stage::Measure),
        Endpoint::Stage(Stage::Manage),
        Endpoint::Risks,
    ];

    /// Path relative to the API base.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Stage(Stage::Govern) => "rmf/govern",
            Endpoint::Stage(Stage::Map) => "rmf/map",
            Endpoint::Stage(Stage::Measure) => "rmf/measure",
            Endpoint::Stage(Stage::Manage) => "rmf/manage",
            Endpoint::Risks => "risks/",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}

/// The five endpoint URLs, resolved once against the API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSet {
    base: Url,
    govern: Url,
    map: Url,
    measure: Url,
    manage: Url,
    risks: Url,
}

impl EndpointSet {
    pub fn new(api_base: &str) -> Result<Self, FetchError> {
        let invalid = |reason: String| FetchError::InvalidBaseUrl {
            base: api_base.to_string(),
            reason,
        };

        let mut base = Url::parse(api_base.trim()).map_err(|err| invalid(err.to_string()))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(invalid("expected an http(s) url".to_string()));
        }
        // Url::join replaces the last segment unless the base ends in a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let resolve = |endpoint: Endpoint| {
            base.join(endpoint.path())
                .map_err(|err| invalid(err.to_string()))
        };

        let govern = resolve(Endpoint::Stage(Stage::Govern))?;
        let map = resolve(Endpoint::Stage(Stage::Map))?;
        let measure = resolve(Endpoint::Stage(Stage::Measure))?;
        let manage = resolve(Endpoint::Stage(Stage::Manage))?;
        let risks = resolve(Endpoint::Risks)?;

        Ok(Self {
            base,
            govern,
            map,
            measure,
            manage,
            risks,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn url(&self, endpoint: Endpoint) -> &Url {
        match endpoint {
            Endpoint::Stage(Stage::Govern) => &self.govern,
            Endpoint::Stage(Stage::Map) => &self.map,
            Endpoint::Stage(Stage::Measure) => &self.measure,
            Endpoint::Stage(Stage::Manage) => &self.manage,
            Endpoint::Risks => &self.risks,
        }
    }
}
