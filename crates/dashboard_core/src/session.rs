//! Mount-scoped load of the dashboard.
//!
//! A session owns one load task. The task fetches the batch, merges it and
//! publishes the result as an immutable [`DashboardSnapshot`]. Consumers read
//! snapshots, never a shared mutable model.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::{
    sync::{oneshot, watch},
    task::JoinHandle,
};
use tokio_stream::wrappers::WatchStream;
use tracing::{info, warn};

use crate::{
    error::SessionError, merge::merge, model::DashboardViewModel, orchestrator::fetch_batch,
    DashboardSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Failed,
    Cancelled,
}

/// Outcome of the load task, fed to [`DashboardSnapshot::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    Loaded(DashboardViewModel),
    Failed(String),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub phase: LoadPhase,
    pub view: Arc<DashboardViewModel>,
    pub failure: Option<String>,
    pub settled_at: Option<DateTime<Utc>>,
}

impl DashboardSnapshot {
    pub fn initial() -> Self {
        Self {
            phase: LoadPhase::Loading,
            view: Arc::new(DashboardViewModel::empty()),
            failure: None,
            settled_at: None,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.phase != LoadPhase::Loading
    }

    /// Next snapshot after `event`. Only a loading snapshot moves; a settled
    /// one is returned unchanged, so the view is written at most once.
    pub fn apply(&self, event: LoadEvent) -> Self {
        if self.is_settled() {
            return self.clone();
        }

        let settled_at = Some(Utc::now());
        match event {
            LoadEvent::Loaded(view) => Self {
                phase: LoadPhase::Ready,
                view: Arc::new(view),
                failure: None,
                settled_at,
            },
            LoadEvent::Failed(reason) => Self {
                phase: LoadPhase::Failed,
                view: Arc::clone(&self.view),
                failure: Some(reason),
                settled_at,
            },
            LoadEvent::Cancelled => Self {
                phase: LoadPhase::Cancelled,
                view: Arc::clone(&self.view),
                failure: None,
                settled_at,
            },
        }
    }
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}

/// One mount of the dashboard.
///
/// Dropping the session without [`join`](Self::join) cancels an unfinished
/// load.
pub struct DashboardSession {
    snapshots: watch::Receiver<DashboardSnapshot>,
    cancel: Option<oneshot::Sender<()>>,
    task: JoinHandle<DashboardSnapshot>,
}

impl DashboardSession {
    /// Spawns the load task. Must be called from within a tokio runtime.
    pub fn mount(source: Arc<dyn DashboardSource>) -> Self {
        let (snapshot_tx, snapshots) = watch::channel(DashboardSnapshot::initial());
        let (cancel, cancel_rx) = oneshot::channel();
        let task = tokio::spawn(run_load(source, snapshot_tx, cancel_rx));
        Self {
            snapshots,
            cancel: Some(cancel),
            task,
        }
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Current snapshot followed by every later one.
    pub fn subscribe(&self) -> WatchStream<DashboardSnapshot> {
        WatchStream::new(self.snapshots.clone())
    }

    /// Resolves once the load has settled.
    pub async fn settled(&self) -> DashboardSnapshot {
        let mut snapshots = self.snapshots.clone();
        let settled = snapshots
            .wait_for(DashboardSnapshot::is_settled)
            .await
            .map(|snapshot| snapshot.clone());
        settled.unwrap_or_else(|_| snapshots.borrow().clone())
    }

    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    /// Waits for the load task and returns the settled snapshot.
    pub async fn join(self) -> Result<DashboardSnapshot, SessionError> {
        let Self { task, cancel, .. } = self;
        let settled = task.await?;
        drop(cancel);
        Ok(settled)
    }
}

async fn run_load(
    source: Arc<dyn DashboardSource>,
    snapshots: watch::Sender<DashboardSnapshot>,
    mut cancel: oneshot::Receiver<()>,
) -> DashboardSnapshot {
    let event = tokio::select! {
        biased;
        _ = &mut cancel => {
            info!("dashboard load cancelled before the batch settled");
            LoadEvent::Cancelled
        }
        result = fetch_batch(source.as_ref()) => match result {
            Ok(batch) => {
                let view = merge(batch);
                info!(
                    stages = view.stage_status.len(),
                    risks = view.risks.len(),
                    "dashboard view model ready"
                );
                LoadEvent::Loaded(view)
            }
            Err(error) => {
                warn!(%error, "dashboard batch failed; keeping the empty view");
                LoadEvent::Failed(error.to_string())
            }
        },
    };

    snapshots.send_modify(|current| *current = current.apply(event));
    let settled = snapshots.borrow().clone();
    settled
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
