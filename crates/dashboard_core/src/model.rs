use std::collections::BTreeMap;

use serde::Serialize;
use shared::domain::{RiskEntry, Stage};

/// Stage → status. Keys are typed, so only the four known stages can appear;
/// iteration follows stage order regardless of insertion.
pub type StageStatusMap = BTreeMap<Stage, Option<String>>;

/// Render-ready state of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardViewModel {
    pub stage_status: StageStatusMap,
    pub risks: Vec<RiskEntry>,
}

impl DashboardViewModel {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.stage_status.is_empty() && self.risks.is_empty()
    }

    pub fn status(&self, stage: Stage) -> Option<&str> {
        self.stage_status.get(&stage).and_then(|status| status.as_deref())
    }
}
