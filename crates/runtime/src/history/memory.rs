//! In-memory HistoryStore implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use probe_core::{ActivityId, ActivityResult, SceneId};

use super::{HistoryStore, Result};

/// HashMap-backed store for tests and ephemeral sessions.
#[derive(Default)]
pub struct InMemoryHistoryStore {
    entries: Mutex<HashMap<(SceneId, ActivityId), Vec<ActivityResult>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn get(&self, scene: &SceneId, activity: &ActivityId) -> Result<Vec<ActivityResult>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .get(&(scene.clone(), activity.clone()))
            .cloned()
            .unwrap_or_default())
    }

    fn append(
        &self,
        scene: &SceneId,
        activity: &ActivityId,
        result: ActivityResult,
    ) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries
            .entry((scene.clone(), activity.clone()))
            .or_default()
            .push(result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probe_core::{ActorId, HitArea, TestOutcome};

    fn result(actor: &str) -> ActivityResult {
        ActivityResult {
            outcome: TestOutcome {
                value: 10,
                passed: true,
            },
            hit_area: HitArea::default(),
            actor: ActorId::from(actor),
        }
    }

    #[test]
    fn append_is_scoped_per_scene_and_activity() {
        let store = InMemoryHistoryStore::new();
        let scene_a = SceneId::from("scene-a");
        let scene_b = SceneId::from("scene-b");
        let act = ActivityId::from("secret-door");

        store.append(&scene_a, &act, result("pc-1")).unwrap();
        store.append(&scene_a, &act, result("pc-2")).unwrap();

        assert_eq!(store.get(&scene_a, &act).unwrap().len(), 2);
        assert!(store.get(&scene_b, &act).unwrap().is_empty());
        assert!(
            store
                .get(&scene_a, &ActivityId::from("other"))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn results_come_back_oldest_first() {
        let store = InMemoryHistoryStore::new();
        let scene = SceneId::from("s");
        let act = ActivityId::from("a");
        store.append(&scene, &act, result("first")).unwrap();
        store.append(&scene, &act, result("second")).unwrap();

        let results = store.get(&scene, &act).unwrap();
        assert_eq!(results[0].actor, ActorId::from("first"));
        assert_eq!(results[1].actor, ActorId::from("second"));
    }
}
