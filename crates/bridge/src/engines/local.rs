//! In-process placeholder engine.
//!
//! Used when commands are not routed through the companion. It performs no
//! work and reports placeholder results; the companion remains the only
//! source of truth for command semantics.

use serde_json::Map;
use std::path::PathBuf;

use crate::engine::PromptEngine;
use crate::error::BridgeResult;
use crate::types::{
    ComposeOptions, ComposeResult, HealthStatus, InitOptions, InitResult, PromptKind,
    PruneOptions, PruneResult, SyncOptions, SyncResult, UpdateOptions, UpdateResult,
};

/// Placeholder engine that never touches the filesystem.
#[derive(Debug, Clone)]
pub struct LocalEngine {
    workspace: PathBuf,
}

impl LocalEngine {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }
}

#[async_trait::async_trait]
impl PromptEngine for LocalEngine {
    fn name(&self) -> &str {
        "local"
    }

    async fn init(&self, options: &InitOptions) -> BridgeResult<InitResult> {
        tracing::debug!("Local init (no-op): {:?}", options);
        let path = options.path.as_ref().unwrap_or(&self.workspace);

        Ok(InitResult {
            success: true,
            path: path.to_string_lossy().into_owned(),
            extra: Map::new(),
        })
    }

    async fn update(&self, options: &UpdateOptions) -> BridgeResult<UpdateResult> {
        tracing::debug!("Local update (no-op): {:?}", options);
        Ok(UpdateResult {
            success: true,
            updated: Vec::new(),
            extra: Map::new(),
        })
    }

    async fn compose(
        &self,
        kind: PromptKind,
        options: &ComposeOptions,
    ) -> BridgeResult<ComposeResult> {
        tracing::debug!("Local compose (no-op) for {}: {:?}", kind, options);
        Ok(ComposeResult {
            success: true,
            kind: kind.to_string(),
            content: format!("Generated {} prompt", kind),
            extra: Map::new(),
        })
    }

    async fn prune(&self, options: &PruneOptions) -> BridgeResult<PruneResult> {
        tracing::debug!("Local prune (no-op): {:?}", options);
        Ok(PruneResult {
            success: true,
            pruned: Vec::new(),
            extra: Map::new(),
        })
    }

    async fn sync(&self, options: &SyncOptions) -> BridgeResult<SyncResult> {
        tracing::debug!("Local sync (no-op): {:?}", options);
        Ok(SyncResult {
            success: true,
            synced: Vec::new(),
            extra: Map::new(),
        })
    }

    async fn check_health(&self) -> BridgeResult<HealthStatus> {
        Ok(HealthStatus {
            success: true,
            version: env!("CARGO_PKG_VERSION").to_string(),
            platform: std::env::consts::OS.to_string(),
            extra: Map::new(),
        })
    }
}
