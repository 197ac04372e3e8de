//! Activity registry and scene lifecycle.
//!
//! Registration pairs a declarative [`ActivityDefinition`] with the host's
//! action runners; the registry also tracks which scene is currently
//! active, since availability and history are always scoped to one scene.

use std::collections::HashMap;
use std::sync::Arc;

use probe_core::{ActionId, ActivityDefinition, ActivityId, SceneId};

use crate::services::ActionRunner;

/// One registered activity: its definition plus the runners performing its
/// actions.
///
/// Runners are shared via `Arc` so a registered activity can be cloned out
/// of the registry lock before it is executed.
#[derive(Clone)]
pub struct RegisteredActivity {
    pub definition: ActivityDefinition,
    runners: HashMap<ActionId, Arc<dyn ActionRunner>>,
}

impl RegisteredActivity {
    pub fn new(definition: ActivityDefinition) -> Self {
        Self {
            definition,
            runners: HashMap::new(),
        }
    }

    /// Binds a runner to one of the definition's actions.
    pub fn with_runner(
        mut self,
        action: impl Into<ActionId>,
        runner: Arc<dyn ActionRunner>,
    ) -> Self {
        self.runners.insert(action.into(), runner);
        self
    }

    pub fn runner(&self, action: &ActionId) -> Option<&Arc<dyn ActionRunner>> {
        self.runners.get(action)
    }
}

/// Registry of activities known to the runtime.
#[derive(Default)]
pub struct ActivityRegistry {
    activities: HashMap<ActivityId, RegisteredActivity>,
    active_scene: Option<SceneId>,
}

impl ActivityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an activity. An existing registration under the same id
    /// is replaced.
    pub fn register(&mut self, activity: RegisteredActivity) {
        let id = activity.definition.id.clone();
        if self.activities.insert(id.clone(), activity).is_some() {
            tracing::debug!("replaced activity registration {}", id);
        }
    }

    pub fn unregister(&mut self, id: &ActivityId) -> Option<RegisteredActivity> {
        self.activities.remove(id)
    }

    pub fn get(&self, id: &ActivityId) -> Option<&RegisteredActivity> {
        self.activities.get(id)
    }

    /// Registered activities in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredActivity> {
        self.activities.values()
    }

    /// Marks a scene active. Scans and executions fail while no scene is
    /// active.
    pub fn activate_scene(&mut self, scene: SceneId) {
        tracing::info!("scene {} activated", scene);
        self.active_scene = Some(scene);
    }

    pub fn deactivate_scene(&mut self) {
        if let Some(scene) = self.active_scene.take() {
            tracing::info!("scene {} deactivated", scene);
        }
    }

    pub fn active_scene(&self) -> Option<&SceneId> {
        self.active_scene.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use probe_core::TestSpec;

    use crate::services::{ActionContext, ActionOutcome};

    struct NoopRunner;

    #[async_trait]
    impl ActionRunner for NoopRunner {
        async fn run(&self, _context: &ActionContext) -> crate::api::Result<ActionOutcome> {
            Ok(ActionOutcome::succeeded())
        }
    }

    fn definition(id: &str) -> ActivityDefinition {
        ActivityDefinition::new(id, "Test Activity", TestSpec::new("perception", None))
    }

    #[test]
    fn register_replaces_existing_entries() {
        let mut registry = ActivityRegistry::new();
        registry.register(RegisteredActivity::new(definition("door")));
        registry.register(
            RegisteredActivity::new(definition("door"))
                .with_runner("reveal", Arc::new(NoopRunner)),
        );

        let entry = registry.get(&ActivityId::from("door")).unwrap();
        assert!(entry.runner(&ActionId::from("reveal")).is_some());
        assert_eq!(registry.iter().count(), 1);
    }

    #[test]
    fn scene_lifecycle() {
        let mut registry = ActivityRegistry::new();
        assert!(registry.active_scene().is_none());

        registry.activate_scene(SceneId::from("crypt-1"));
        assert_eq!(registry.active_scene(), Some(&SceneId::from("crypt-1")));

        registry.deactivate_scene();
        assert!(registry.active_scene().is_none());
    }

    #[test]
    fn unregister_removes_the_activity() {
        let mut registry = ActivityRegistry::new();
        registry.register(RegisteredActivity::new(definition("door")));
        assert!(registry.unregister(&ActivityId::from("door")).is_some());
        assert!(registry.get(&ActivityId::from("door")).is_none());
    }
}
