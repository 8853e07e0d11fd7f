use shared::domain::Stage;

use crate::{model::DashboardViewModel, orchestrator::RawBatch, payload};

/// Folds a successful batch into a view model.
///
/// Stages are read by fixed key in `Stage::ALL` order and the register is
/// passed through in delivered order. Mismatched bodies surface as absent
/// values, never as errors.
pub fn merge(batch: RawBatch) -> DashboardViewModel {
    let stage_status = Stage::ALL
        .into_iter()
        .map(|stage| (stage, payload::stage_status(batch.stage(stage))))
        .collect();

    DashboardViewModel {
        stage_status,
        risks: payload::risk_register(batch.risks),
    }
}
