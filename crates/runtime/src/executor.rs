//! Test-then-act execution pipeline for one activity.
//!
//! Execution runs the activity's host test once, then walks the priority
//! groups in declared order. Within a group every available action runs
//! with its filter-scoped slice of the hit area; as soon as one group
//! produces a successful action, later groups are skipped. The result is
//! appended to the history exactly once, whatever the actions did.

use std::sync::Arc;

use probe_core::{
    ActivityResult, ActorId, HitArea, PriorityClass, SceneId, WallOracle, action_available,
};

use crate::api::Result;
use crate::history::HistoryStore;
use crate::registry::RegisteredActivity;
use crate::services::{ActionContext, TestPromptService};

/// How one execution ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// The test resolved and the pipeline ran; `succeeded` reports whether
    /// any action took effect.
    Completed { succeeded: bool },
    /// The test prompt was dismissed; nothing ran and nothing was recorded.
    Cancelled,
}

/// Drives activity executions against the test service and the history.
pub struct ActivityExecutor {
    tests: Arc<dyn TestPromptService>,
    history: Arc<dyn HistoryStore>,
}

impl ActivityExecutor {
    pub fn new(tests: Arc<dyn TestPromptService>, history: Arc<dyn HistoryStore>) -> Self {
        Self { tests, history }
    }

    /// Executes one activity for one actor against an already-built hit
    /// area.
    ///
    /// The wall oracle is optional because wall-attribute filters degrade
    /// to matching nothing without one.
    pub async fn execute(
        &self,
        scene: &SceneId,
        activity: &RegisteredActivity,
        walls: Option<&dyn WallOracle>,
        actor: &ActorId,
        area: &HitArea,
    ) -> Result<ExecutionStatus> {
        let definition = &activity.definition;

        let Some(outcome) = self.tests.run_test(&definition.test, actor).await? else {
            tracing::debug!("activity {} cancelled at the test prompt", definition.id);
            return Ok(ExecutionStatus::Cancelled);
        };

        let history = self.history.get(scene, &definition.id)?;

        // Duplicate class entries in the group list collapse to the first.
        let mut groups: Vec<PriorityClass> = Vec::new();
        for &class in &definition.priority_groups {
            if !groups.contains(&class) {
                groups.push(class);
            }
        }

        let mut succeeded = false;
        for class in groups {
            for action in definition.actions_in(class) {
                if !action_available(action, area, actor, &history) {
                    continue;
                }
                let Some(runner) = activity.runner(&action.id) else {
                    tracing::warn!(
                        "no runner for action {} of activity {}, skipping",
                        action.id,
                        definition.id
                    );
                    continue;
                };

                let context = ActionContext {
                    action: action.clone(),
                    actor: actor.clone(),
                    hit_area: action.filter.apply(area, walls),
                    outcome: outcome.clone(),
                };
                match runner.run(&context).await {
                    Ok(result) => succeeded |= result.success,
                    Err(err) if err.is_not_found() => {
                        tracing::warn!(
                            "action {} of activity {} skipped: {}",
                            action.id,
                            definition.id,
                            err
                        );
                    }
                    Err(err) => return Err(err),
                }
            }
            // A successful group shadows everything after it.
            if succeeded {
                break;
            }
        }

        self.history.append(
            scene,
            &definition.id,
            ActivityResult {
                outcome,
                hit_area: area.clone(),
                actor: actor.clone(),
            },
        )?;

        Ok(ExecutionStatus::Completed { succeeded })
    }
}
