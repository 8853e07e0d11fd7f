use serde_json::Value;
use shared::domain::Stage;
use tracing::{debug, warn};

use crate::{endpoint::Endpoint, error::FetchError, DashboardSource};

/// The five bodies of a fully successful batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBatch {
    pub govern: Value,
    pub map: Value,
    pub measure: Value,
    pub manage: Value,
    pub risks: Value,
}

impl RawBatch {
    pub fn stage(&self, stage: Stage) -> &Value {
        match stage {
            Stage::Govern => &self.govern,
            Stage::Map => &self.map,
            Stage::Measure => &self.measure,
            Stage::Manage => &self.manage,
        }
    }
}

/// Issues all five requests at once and waits for every one of them.
///
/// The batch succeeds only if all five do. Otherwise every failure is
/// reported in endpoint order and no body is returned.
pub async fn fetch_batch<S>(source: &S) -> Result<RawBatch, FetchError>
where
    S: DashboardSource + ?Sized,
{
    debug!(requests = Endpoint::ALL.len(), "issuing dashboard batch");

    let (govern, map, measure, manage, risks) = futures::join!(
        source.fetch(Endpoint::Stage(Stage::Govern)),
        source.fetch(Endpoint::Stage(Stage::Map)),
        source.fetch(Endpoint::Stage(Stage::Measure)),
        source.fetch(Endpoint::Stage(Stage::Manage)),
        source.fetch(Endpoint::Risks),
    );

    match (govern, map, measure, manage, risks) {
        (Ok(govern), Ok(map), Ok(measure), Ok(manage), Ok(risks)) => Ok(RawBatch {
            govern,
            map,
            measure,
            manage,
            risks,
        }),
        (govern, map, measure, manage, risks) => {
            let failures: Vec<FetchError> = [
                govern.err(),
                map.err(),
                measure.err(),
                manage.err(),
                risks.err(),
            ]
            .into_iter()
            .flatten()
            .collect();
            for failure in &failures {
                warn!(error = %failure, "dashboard request failed");
            }
            Err(FetchError::Batch { failures })
        }
    }
}
