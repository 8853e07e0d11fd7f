use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the four governance stages. Declaration order is the fixed
/// display and insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Govern,
    Map,
    Measure,
    Manage,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Govern, Stage::Map, Stage::Measure, Stage::Manage];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Govern => "govern",
            Stage::Map => "map",
            Stage::Measure => "measure",
            Stage::Manage => "manage",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown stage '{0}'")]
pub struct UnknownStage(pub String);

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == raw)
            .ok_or_else(|| UnknownStage(raw.to_string()))
    }
}

/// Impact or likelihood rating. The register owner decides the scale, so
/// both textual levels and numeric scores pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RiskScore {
    Level(String),
    Score(serde_json::Number),
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskScore::Level(level) => f.write_str(level),
            RiskScore::Score(score) => write!(f, "{score}"),
        }
    }
}

impl From<&str> for RiskScore {
    fn from(value: &str) -> Self {
        RiskScore::Level(value.to_string())
    }
}

impl From<i64> for RiskScore {
    fn from(value: i64) -> Self {
        RiskScore::Score(value.into())
    }
}

/// One row of the risk register as the dashboard sees it. Every field is
/// optional: rows are displayed as delivered, never validated. Fields the
/// dashboard does not read are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub impact: Option<RiskScore>,
    #[serde(default)]
    pub likelihood: Option<RiskScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RiskEntry {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        impact: impl Into<RiskScore>,
        likelihood: impl Into<RiskScore>,
    ) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            description: Some(description.into()),
            impact: Some(impact.into()),
            likelihood: Some(likelihood.into()),
            mitigation: None,
            extra: serde_json::Map::new(),
        }
    }
}
