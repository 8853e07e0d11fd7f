use std::{collections::BTreeMap, sync::Arc};

use shared::{
    domain::Stage,
    error::ApiException,
    protocol::{RiskRecord, RootResponse, StageStatusResponse},
};
use tokio::sync::RwLock;
use tracing::info;

pub const ROOT_MESSAGE: &str = "AI RMF Backend is Running";

/// Status text each stage reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageBoard {
    statuses: BTreeMap<Stage, String>,
}

impl Default for StageBoard {
    fn default() -> Self {
        Self::from_iter([
            (Stage::Govern, "Govern function documented and mapped"),
            (Stage::Map, "Use case and context mapped"),
            (Stage::Measure, "Trustworthiness metrics in place"),
            (Stage::Manage, "Risks monitored and mitigation tracked"),
        ])
    }
}

impl<S: Into<String>> FromIterator<(Stage, S)> for StageBoard {
    fn from_iter<I: IntoIterator<Item = (Stage, S)>>(iter: I) -> Self {
        Self {
            statuses: iter
                .into_iter()
                .map(|(stage, status)| (stage, status.into()))
                .collect(),
        }
    }
}

impl StageBoard {
    pub fn set(&mut self, stage: Stage, status: impl Into<String>) {
        self.statuses.insert(stage, status.into());
    }

    pub fn status(&self, stage: Stage) -> Option<&str> {
        self.statuses.get(&stage).map(String::as_str)
    }
}

/// In-memory risk register. Rows are kept in submission order and are lost
/// on restart.
#[derive(Clone, Default)]
pub struct RiskRegister {
    rows: Arc<RwLock<Vec<RiskRecord>>>,
}

#[derive(Clone, Default)]
pub struct ApiContext {
    pub board: StageBoard,
    pub register: RiskRegister,
}

pub fn root() -> RootResponse {
    RootResponse {
        message: ROOT_MESSAGE.to_string(),
    }
}

pub fn stage_status(
    ctx: &ApiContext,
    stage: Stage,
) -> Result<StageStatusResponse, ApiException> {
    ctx.board
        .status(stage)
        .map(|status| StageStatusResponse {
            status: status.to_string(),
        })
        .ok_or_else(|| {
            ApiException::not_found(format!("no status recorded for stage {stage}"))
        })
}

/// Parses a path segment into a stage, mapping unknown names to not-found.
pub fn parse_stage(raw: &str) -> Result<Stage, ApiException> {
    raw.parse::<Stage>()
        .map_err(|err| ApiException::not_found(err.to_string()))
}

pub async fn list_risks(ctx: &ApiContext) -> Vec<RiskRecord> {
    ctx.register.rows.read().await.clone()
}

pub async fn add_risk(
    ctx: &ApiContext,
    record: RiskRecord,
) -> Result<RiskRecord, ApiException> {
    if record.name.trim().is_empty() {
        return Err(ApiException::validation("risk name must not be blank"));
    }

    let mut rows = ctx.register.rows.write().await;
    rows.push(record.clone());
    info!(risk_id = record.id, total = rows.len(), "risk recorded");
    Ok(record)
}
