//! Compose command handler

use agent_bridge::{ComposeOptions, PromptKind};
use agent_core::{AppConfig, AppResult};
use clap::Args;

use super::with_engine;
use crate::output;

/// Compose a new prompt
#[derive(Args, Debug)]
pub struct ComposeCommand {
    /// Prompt type (memory, sub-agent, cmd)
    #[arg(value_name = "TYPE")]
    pub kind: PromptKind,

    /// Compose interactively
    #[arg(short, long)]
    pub interactive: bool,

    /// Template to compose from
    #[arg(short, long)]
    pub template: Option<String>,

    /// Use the companion engine
    #[arg(long)]
    pub use_rust: bool,
}

impl ComposeCommand {
    pub fn options(&self) -> ComposeOptions {
        ComposeOptions {
            interactive: self.interactive,
            template: self.template.clone(),
        }
    }

    pub async fn execute(&self, config: &AppConfig, json: bool) -> AppResult<()> {
        tracing::info!("Executing compose command");
        tracing::debug!("Compose options: {:?}", self);

        let kind = self.kind;
        let options = self.options();
        let options = &options;

        if !json {
            output::step(&format!("Composing {} prompt...", kind));
        }

        let result = with_engine(config, self.use_rust, |engine| async move {
            engine.compose(kind, options).await
        })
        .await?;

        if json {
            return output::json(&result);
        }

        if !result.content.is_empty() {
            println!("{}", result.content);
        }
        output::success("Prompt composed successfully!");
        Ok(())
    }
}
