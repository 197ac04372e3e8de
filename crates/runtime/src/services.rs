//! Host-provided service traits.
//!
//! The runtime owns the pipeline but defers two things to the host: rolling
//! a test for an actor (usually a dialog or dice roller) and performing the
//! concrete effect of an action (revealing a door, placing a note). Both
//! seams are async so hosts can await UI interaction or network calls.

use async_trait::async_trait;

use probe_core::{ActionDefinition, ActorId, HitArea, TestOutcome, TestSpec};

use crate::api::Result;

/// Rolls or prompts the host-side test for an actor.
#[async_trait]
pub trait TestPromptService: Send + Sync {
    /// Resolves the test for one actor. `Ok(None)` means the prompt was
    /// dismissed without a result; the activity is then cancelled without
    /// touching the history.
    async fn run_test(&self, spec: &TestSpec, actor: &ActorId) -> Result<Option<TestOutcome>>;
}

/// Everything a runner gets to see for one action invocation.
#[derive(Clone, Debug)]
pub struct ActionContext {
    pub action: ActionDefinition,
    pub actor: ActorId,
    /// Hit area already narrowed by the action's location filter.
    pub hit_area: HitArea,
    pub outcome: TestOutcome,
}

/// What a runner reports back to the executor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Whether the action considers itself to have taken effect. A
    /// successful normal action suppresses the fallback group.
    pub success: bool,
}

impl ActionOutcome {
    pub fn succeeded() -> Self {
        Self { success: true }
    }

    pub fn failed() -> Self {
        Self { success: false }
    }
}

/// Performs the concrete effect of one action.
#[async_trait]
pub trait ActionRunner: Send + Sync {
    async fn run(&self, context: &ActionContext) -> Result<ActionOutcome>;
}
