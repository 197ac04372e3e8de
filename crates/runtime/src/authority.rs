//! Authority routing for activity execution.
//!
//! Only an authoritative session (the game master's) mutates the scene:
//! player sessions never execute activities locally, they submit a request
//! over an [`AuthorityChannel`] and the authoritative peer runs the
//! pipeline. [`LocalAuthority`] is the in-process channel used when both
//! sides live in one host; networked hosts implement the trait over their
//! own transport.

use std::sync::Arc;

use async_trait::async_trait;

use probe_core::{ActivityId, ActorId, HitArea};

use crate::api::{ProbeHandle, Result};
use crate::executor::ExecutionStatus;

/// Whether this session is allowed to execute activities directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Player,
    GameMaster,
}

impl Role {
    pub fn is_authority(self) -> bool {
        matches!(self, Role::GameMaster)
    }
}

/// One forwarded execution request.
#[derive(Clone, Debug)]
pub struct ActivityRequest {
    pub activity: ActivityId,
    pub actor: ActorId,
    pub hit_area: HitArea,
}

/// Transport delivering execution requests to the authoritative session.
#[async_trait]
pub trait AuthorityChannel: Send + Sync {
    async fn submit(&self, request: ActivityRequest) -> Result<ExecutionStatus>;
}

/// Channel that executes directly against an authoritative handle in the
/// same process.
pub struct LocalAuthority {
    handle: Arc<ProbeHandle>,
}

impl LocalAuthority {
    pub fn new(handle: Arc<ProbeHandle>) -> Self {
        Self { handle }
    }
}

#[async_trait]
impl AuthorityChannel for LocalAuthority {
    async fn submit(&self, request: ActivityRequest) -> Result<ExecutionStatus> {
        tracing::debug!(
            "forwarding activity {} for actor {} to local authority",
            request.activity,
            request.actor
        );
        self.handle
            .execute_prepared(&request.activity, &request.actor, &request.hit_area)
            .await
    }
}
