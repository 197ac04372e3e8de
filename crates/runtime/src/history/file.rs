//! File-based HistoryStore implementation.
//!
//! Stores one JSON file per scene, mapping activity ids to their result
//! lists. Writes go through a temp file and an atomic rename so a crash
//! mid-write never corrupts recorded history.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use probe_core::{ActivityId, ActivityResult, SceneId};

use super::{HistoryError, HistoryStore, Result};

type SceneHistory = HashMap<ActivityId, Vec<ActivityResult>>;

pub struct FileHistoryStore {
    base_dir: PathBuf,
    // Serializes read-modify-write cycles across the whole store.
    write_guard: Mutex<()>,
}

impl FileHistoryStore {
    /// Creates the store, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(HistoryError::Io)?;
        Ok(Self {
            base_dir,
            write_guard: Mutex::new(()),
        })
    }

    fn scene_path(&self, scene: &SceneId) -> PathBuf {
        self.base_dir.join(format!("history_{}.json", scene))
    }

    fn load_scene(&self, scene: &SceneId) -> Result<SceneHistory> {
        let path = self.scene_path(scene);
        if !path.exists() {
            return Ok(SceneHistory::new());
        }
        let bytes = fs::read(&path).map_err(HistoryError::Io)?;
        serde_json::from_slice(&bytes).map_err(|e| HistoryError::Serialization(e.to_string()))
    }

    fn store_scene(&self, scene: &SceneId, history: &SceneHistory) -> Result<()> {
        let path = self.scene_path(scene);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(history)
            .map_err(|e| HistoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes).map_err(HistoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(HistoryError::Io)?;

        tracing::debug!("saved history for scene {} to {}", scene, path.display());
        Ok(())
    }
}

impl HistoryStore for FileHistoryStore {
    fn get(&self, scene: &SceneId, activity: &ActivityId) -> Result<Vec<ActivityResult>> {
        let _guard = self.write_guard.lock().unwrap();
        Ok(self
            .load_scene(scene)?
            .remove(activity)
            .unwrap_or_default())
    }

    fn append(
        &self,
        scene: &SceneId,
        activity: &ActivityId,
        result: ActivityResult,
    ) -> Result<()> {
        let _guard = self.write_guard.lock().unwrap();
        let mut history = self.load_scene(scene)?;
        history.entry(activity.clone()).or_default().push(result);
        self.store_scene(scene, &history)
    }
}
