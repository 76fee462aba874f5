//! Prune command handler

use agent_bridge::PruneOptions;
use agent_core::{AppConfig, AppResult};
use clap::Args;

use super::with_engine;
use crate::output;

/// Remove stale prompts
#[derive(Args, Debug)]
pub struct PruneCommand {
    /// Delete without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Show what would be deleted without deleting
    #[arg(short, long)]
    pub dry_run: bool,

    /// Use the companion engine
    #[arg(long)]
    pub use_rust: bool,
}

impl PruneCommand {
    pub fn options(&self) -> PruneOptions {
        PruneOptions {
            force: self.force,
            dry_run: self.dry_run,
        }
    }

    pub async fn execute(&self, config: &AppConfig, json: bool) -> AppResult<()> {
        tracing::info!("Executing prune command");
        tracing::debug!("Prune options: {:?}", self);

        let options = self.options();
        let options = &options;

        if !json {
            output::step("Pruning prompts...");
        }

        let result =
            with_engine(config, self.use_rust, |engine| async move { engine.prune(options).await })
                .await?;

        if json {
            return output::json(&result);
        }

        let label = if self.dry_run { "Would prune" } else { "Pruned" };
        output::list(label, &result.pruned);
        output::success("Pruning completed successfully!");
        Ok(())
    }
}
