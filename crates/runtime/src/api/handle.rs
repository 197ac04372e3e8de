//! The handle hosts embed to drive scans and executions.

use std::sync::{Arc, Mutex};

use probe_core::{
    ActivityDefinition, ActivityId, ActorId, GridOracle, HitArea, HitAreaBuilder, ProbeEnv,
    ProximityRequest, TileOracle, WallOracle, activity_available,
};

use crate::api::{Result, RuntimeError};
use crate::authority::{ActivityRequest, AuthorityChannel, Role};
use crate::executor::{ActivityExecutor, ExecutionStatus};
use crate::history::HistoryStore;
use crate::registry::{ActivityRegistry, RegisteredActivity};
use crate::services::TestPromptService;

/// Host adapters for the three platform layers a scan reads.
///
/// Each oracle is optional; a scan that needs a missing one fails with the
/// corresponding configuration error.
#[derive(Clone, Default)]
pub struct OracleSet {
    grid: Option<Arc<dyn GridOracle>>,
    walls: Option<Arc<dyn WallOracle>>,
    tiles: Option<Arc<dyn TileOracle>>,
}

impl OracleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, grid: Arc<dyn GridOracle>) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn with_walls(mut self, walls: Arc<dyn WallOracle>) -> Self {
        self.walls = Some(walls);
        self
    }

    pub fn with_tiles(mut self, tiles: Arc<dyn TileOracle>) -> Self {
        self.tiles = Some(tiles);
        self
    }

    /// Borrowed oracle aggregate for one query.
    pub fn env(&self) -> ProbeEnv<'_> {
        ProbeEnv::new(
            self.grid.as_deref(),
            self.walls.as_deref(),
            self.tiles.as_deref(),
        )
    }

    pub fn walls_oracle(&self) -> Option<&dyn WallOracle> {
        self.walls.as_deref()
    }
}

/// One activity a scan found available.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivitySummary {
    pub id: ActivityId,
    pub name: String,
}

/// Everything a scan reports back to the host.
#[derive(Clone, Debug)]
pub struct ScanReport {
    pub hit_area: HitArea,
    /// Activities whose availability policies admit this scan, ordered by
    /// activity id.
    pub available_activities: Vec<ActivitySummary>,
}

/// Entry point for hosts.
///
/// Owns the oracle adapters, the activity registry, and the execution
/// pipeline. Scans are read-only; executions are gated by [`Role`] so only
/// the authoritative session touches the history.
pub struct ProbeHandle {
    oracles: OracleSet,
    registry: Mutex<ActivityRegistry>,
    executor: ActivityExecutor,
    history: Arc<dyn HistoryStore>,
    role: Role,
    authority: Mutex<Option<Arc<dyn AuthorityChannel>>>,
}

impl ProbeHandle {
    pub fn new(
        oracles: OracleSet,
        tests: Arc<dyn TestPromptService>,
        history: Arc<dyn HistoryStore>,
        role: Role,
    ) -> Self {
        Self {
            oracles,
            registry: Mutex::new(ActivityRegistry::new()),
            executor: ActivityExecutor::new(tests, Arc::clone(&history)),
            history,
            role,
            authority: Mutex::new(None),
        }
    }

    /// Connects the channel player sessions forward executions through.
    pub fn connect_authority(&self, channel: Arc<dyn AuthorityChannel>) {
        *self.authority.lock().unwrap() = Some(channel);
    }

    pub fn register_activity(&self, activity: RegisteredActivity) {
        self.registry.lock().unwrap().register(activity);
    }

    pub fn unregister_activity(&self, id: &ActivityId) -> bool {
        self.registry.lock().unwrap().unregister(id).is_some()
    }

    pub fn activate_scene(&self, scene: probe_core::SceneId) {
        self.registry.lock().unwrap().activate_scene(scene);
    }

    pub fn deactivate_scene(&self) {
        self.registry.lock().unwrap().deactivate_scene();
    }

    /// Builds the hit area for one proximity query and lists the
    /// registered activities still available to the actor there.
    pub fn scan_proximity(
        &self,
        request: &ProximityRequest,
        actor: Option<&ActorId>,
    ) -> Result<ScanReport> {
        let actor = actor.ok_or(RuntimeError::NoActor)?;

        let (scene, definitions) = {
            let registry = self.registry.lock().unwrap();
            let scene = registry
                .active_scene()
                .cloned()
                .ok_or(RuntimeError::NoActiveScene)?;
            let mut definitions: Vec<ActivityDefinition> = registry
                .iter()
                .map(|entry| entry.definition.clone())
                .collect();
            definitions.sort_by(|a, b| a.id.cmp(&b.id));
            (scene, definitions)
        };

        let hit_area = HitAreaBuilder::new(self.oracles.env()).build(request)?;
        tracing::debug!(
            "scan at {} hit {} cells, {} walls, {} tiles",
            request.origin,
            hit_area.cell_ids.len(),
            hit_area.wall_ids.len(),
            hit_area.tile_ids.len()
        );

        let mut available_activities = Vec::new();
        for definition in definitions {
            let history = self.history.get(&scene, &definition.id)?;
            if activity_available(&definition, &hit_area, actor, &history) {
                available_activities.push(ActivitySummary {
                    id: definition.id,
                    name: definition.name,
                });
            }
        }

        Ok(ScanReport {
            hit_area,
            available_activities,
        })
    }

    /// Executes one activity against an already-scanned hit area.
    ///
    /// On an authoritative session this runs the pipeline directly; a
    /// player session forwards the request over the connected authority
    /// channel.
    pub async fn execute_activity(
        &self,
        activity: &ActivityId,
        actor: &ActorId,
        area: &HitArea,
    ) -> Result<ExecutionStatus> {
        if self.role.is_authority() {
            return self.execute_prepared(activity, actor, area).await;
        }

        let channel = self
            .authority
            .lock()
            .unwrap()
            .clone()
            .ok_or(RuntimeError::NoAuthority)?;
        channel
            .submit(ActivityRequest {
                activity: activity.clone(),
                actor: actor.clone(),
                hit_area: area.clone(),
            })
            .await
    }

    /// Runs the pipeline locally. Fails on non-authoritative sessions.
    pub(crate) async fn execute_prepared(
        &self,
        activity: &ActivityId,
        actor: &ActorId,
        area: &HitArea,
    ) -> Result<ExecutionStatus> {
        if !self.role.is_authority() {
            return Err(RuntimeError::NoAuthority);
        }

        let (scene, registered) = {
            let registry = self.registry.lock().unwrap();
            let scene = registry
                .active_scene()
                .cloned()
                .ok_or(RuntimeError::NoActiveScene)?;
            let registered = registry
                .get(activity)
                .cloned()
                .ok_or_else(|| RuntimeError::ActivityNotFound(activity.clone()))?;
            (scene, registered)
        };

        self.executor
            .execute(
                &scene,
                &registered,
                self.oracles.walls_oracle(),
                actor,
                area,
            )
            .await
    }
}
