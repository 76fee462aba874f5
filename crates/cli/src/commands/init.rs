//! Init command handler

use agent_bridge::InitOptions;
use agent_core::{AppConfig, AppResult};
use clap::Args;
use std::path::PathBuf;

use super::with_engine;
use crate::output;

/// Initialize prompt management in the workspace
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Template to initialize from
    #[arg(short, long)]
    pub template: Option<String>,

    /// Directory to initialize (defaults to the workspace)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Use the companion engine
    #[arg(long)]
    pub use_rust: bool,
}

impl InitCommand {
    pub fn options(&self, config: &AppConfig) -> InitOptions {
        InitOptions {
            force: self.force,
            template: self.template.clone(),
            path: self.path.clone().or_else(|| Some(config.workspace.clone())),
        }
    }

    pub async fn execute(&self, config: &AppConfig, json: bool) -> AppResult<()> {
        tracing::info!("Executing init command");
        tracing::debug!("Init options: {:?}", self);

        let options = self.options(config);
        let options = &options;

        if !json {
            output::step("Initializing prompt management...");
        }

        let result =
            with_engine(config, self.use_rust, |engine| async move { engine.init(options).await })
                .await?;

        if json {
            return output::json(&result);
        }

        if !result.path.is_empty() {
            output::field("Path", &result.path);
        }
        output::success("Initialization completed successfully!");
        Ok(())
    }
}
