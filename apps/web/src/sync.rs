//! Best-effort background sync of a course completion.
//!
//! Runs after the local transaction in `progress::trail` has already been
//! applied. Steps run in order and each is attempted even if an earlier one
//! failed. No retries, no rollback of local state.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::{CareerProgressUpdate, SkillMatchApi};
use crate::http_client::HttpError;
use crate::progress::CompletionDelta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStepKind {
    MarkComplete,
    AddXp,
    UpdateCareerProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncStep {
    pub kind: SyncStepKind,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    pub course_id: i64,
    pub steps: Vec<SyncStep>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.steps.iter().all(|s| s.ok)
    }

    pub fn failed_steps(&self) -> Vec<SyncStepKind> {
        self.steps.iter().filter(|s| !s.ok).map(|s| s.kind).collect()
    }
}

/// Pushes a completion upstream: mark the course complete, add the awarded
/// XP (skipped when zero), then push the career aggregate.
pub async fn sync_completion(
    api: &dyn SkillMatchApi,
    user_id: i64,
    delta: &CompletionDelta,
) -> SyncReport {
    let mut steps = Vec::with_capacity(3);

    steps.push(step(
        SyncStepKind::MarkComplete,
        api.complete_course(user_id, delta.course_id).await,
    ));

    if delta.xp_awarded > 0 {
        steps.push(step(
            SyncStepKind::AddXp,
            api.add_xp(user_id, delta.xp_awarded).await,
        ));
    }

    let update = CareerProgressUpdate {
        career_id: delta.career_id,
        progress: delta.career_progress,
        xp_total: delta.xp_total,
        status: delta.status,
    };
    steps.push(step(
        SyncStepKind::UpdateCareerProgress,
        api.update_career_progress(user_id, &update).await,
    ));

    let report = SyncReport {
        course_id: delta.course_id,
        steps,
    };
    if report.is_success() {
        debug!("Completion of course {} synced", delta.course_id);
    } else {
        warn!(
            "Completion of course {} partially synced, failed steps: {:?}",
            delta.course_id,
            report.failed_steps()
        );
    }
    report
}

/// Runs `sync_completion` on a background task and hands the report to
/// `on_done`.
pub fn spawn_completion_sync<F>(
    api: Arc<dyn SkillMatchApi>,
    user_id: i64,
    delta: CompletionDelta,
    on_done: F,
) -> JoinHandle<()>
where
    F: FnOnce(SyncReport) + Send + 'static,
{
    tokio::spawn(async move {
        let report = sync_completion(api.as_ref(), user_id, &delta).await;
        on_done(report);
    })
}

fn step(kind: SyncStepKind, result: Result<(), HttpError>) -> SyncStep {
    match result {
        Ok(()) => SyncStep {
            kind,
            ok: true,
            error: None,
        },
        Err(e) => {
            warn!("Sync step {kind:?} failed: {e}");
            SyncStep {
                kind,
                ok: false,
                error: Some(e.to_string()),
            }
        }
    }
}
