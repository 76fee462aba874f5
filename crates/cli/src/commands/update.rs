//! Update command handler

use agent_bridge::UpdateOptions;
use agent_core::{AppConfig, AppResult};
use clap::Args;

use super::with_engine;
use crate::output;

/// Update prompts to a newer version
#[derive(Args, Debug)]
pub struct UpdateCommand {
    /// Back up existing prompts first
    #[arg(short, long)]
    pub backup: bool,

    /// Version to update to
    #[arg(short, long, value_name = "VERSION")]
    pub version: Option<String>,

    /// Use the companion engine
    #[arg(long)]
    pub use_rust: bool,
}

impl UpdateCommand {
    pub fn options(&self) -> UpdateOptions {
        UpdateOptions {
            backup: self.backup,
            version: self.version.clone(),
        }
    }

    pub async fn execute(&self, config: &AppConfig, json: bool) -> AppResult<()> {
        tracing::info!("Executing update command");
        tracing::debug!("Update options: {:?}", self);

        let options = self.options();
        let options = &options;

        if !json {
            output::step("Updating prompts...");
        }

        let result =
            with_engine(config, self.use_rust, |engine| async move { engine.update(options).await })
                .await?;

        if json {
            return output::json(&result);
        }

        output::list("Updated", &result.updated);
        output::success("Update completed successfully!");
        Ok(())
    }
}
