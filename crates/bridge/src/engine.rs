//! Prompt engine abstraction.
//!
//! The CLI talks to a `PromptEngine` and does not care whether the work is
//! done by the companion process or by the in-process placeholder engine.

use crate::error::BridgeResult;
use crate::types::{
    ComposeOptions, ComposeResult, HealthStatus, InitOptions, InitResult, PromptKind,
    PruneOptions, PruneResult, SyncOptions, SyncResult, UpdateOptions, UpdateResult,
};

/// Operations every prompt engine provides.
#[async_trait::async_trait]
pub trait PromptEngine: Send + Sync {
    /// Engine name for logs (e.g., "companion", "local").
    fn name(&self) -> &str;

    /// Initialize a prompt repository.
    async fn init(&self, options: &InitOptions) -> BridgeResult<InitResult>;

    /// Update an existing repository.
    async fn update(&self, options: &UpdateOptions) -> BridgeResult<UpdateResult>;

    /// Compose a new prompt of the given kind.
    async fn compose(
        &self,
        kind: PromptKind,
        options: &ComposeOptions,
    ) -> BridgeResult<ComposeResult>;

    /// Prune old prompts.
    async fn prune(&self, options: &PruneOptions) -> BridgeResult<PruneResult>;

    /// Sync with a remote repository.
    async fn sync(&self, options: &SyncOptions) -> BridgeResult<SyncResult>;

    /// Report engine version and platform.
    async fn check_health(&self) -> BridgeResult<HealthStatus>;
}
