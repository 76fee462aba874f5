//! Health command handler

use agent_core::{AppConfig, AppResult};
use clap::Args;

use super::with_engine;
use crate::output;

/// Report engine version and platform
#[derive(Args, Debug)]
pub struct HealthCommand {
    /// Probe the companion engine
    #[arg(long)]
    pub use_rust: bool,
}

impl HealthCommand {
    pub async fn execute(&self, config: &AppConfig, json: bool) -> AppResult<()> {
        tracing::info!("Executing health command");

        let status = with_engine(config, self.use_rust, |engine| async move {
            engine.check_health().await
        })
        .await?;

        if json {
            return output::json(&status);
        }

        output::step("Engine health");
        output::field("Version", &status.version);
        output::field("Platform", &status.platform);
        output::success("Engine is healthy");
        Ok(())
    }
}
