use serde::{Deserialize, Serialize};

use crate::domain::{RiskEntry, RiskScore};

/// API mount point of the backend, relative to its origin.
pub const API_PREFIX: &str = "/api";

/// Body of `GET /rmf/{stage}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageStatusResponse {
    pub status: String,
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// A register row as stored and served by the backend. All fields are
/// required on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub impact: String,
    pub likelihood: String,
    pub mitigation: String,
}

impl From<RiskRecord> for RiskEntry {
    fn from(record: RiskRecord) -> Self {
        Self {
            id: Some(record.id.into()),
            name: Some(record.name),
            description: Some(record.description),
            impact: Some(RiskScore::Level(record.impact)),
            likelihood: Some(RiskScore::Level(record.likelihood)),
            mitigation: Some(record.mitigation),
            extra: serde_json::Map::new(),
        }
    }
}
