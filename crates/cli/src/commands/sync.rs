//! Sync command handler

use agent_bridge::SyncOptions;
use agent_core::{AppConfig, AppResult};
use clap::Args;

use super::with_engine;
use crate::output;

/// Synchronize prompts with a remote
#[derive(Args, Debug)]
pub struct SyncCommand {
    /// Remote to sync with
    #[arg(short, long)]
    pub remote: Option<String>,

    /// Branch to sync
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Use the companion engine
    #[arg(long)]
    pub use_rust: bool,
}

impl SyncCommand {
    pub fn options(&self) -> SyncOptions {
        SyncOptions {
            remote: self.remote.clone(),
            branch: self.branch.clone(),
        }
    }

    pub async fn execute(&self, config: &AppConfig, json: bool) -> AppResult<()> {
        tracing::info!("Executing sync command");
        tracing::debug!("Sync options: {:?}", self);

        let options = self.options();
        let options = &options;

        if !json {
            output::step("Synchronizing prompts...");
        }

        let result =
            with_engine(config, self.use_rust, |engine| async move { engine.sync(options).await })
                .await?;

        if json {
            return output::json(&result);
        }

        output::list("Synced", &result.synced);
        output::success("Sync completed successfully!");
        Ok(())
    }
}
