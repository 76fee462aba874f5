//! Build command handler.
//!
//! Runs the configured build commands. The `build` command streams their
//! output; the automatic build before a companion retry replays it on stderr
//! so that stdout carries only the command result.

use agent_bridge::{runner, Invocation};
use agent_core::{AppConfig, AppError, AppResult};
use clap::Args;
use std::time::Duration;

use crate::output;

/// Build the companion engine and/or the front end
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Build only the companion engine
    #[arg(long, conflicts_with = "ts_only")]
    pub rust_only: bool,

    /// Build only the front end
    #[arg(long)]
    pub ts_only: bool,
}

impl BuildCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing build command");
        tracing::debug!("Build options: {:?}", self);

        for (label, command) in self.steps(config) {
            run_step(config, label, command, StepOutput::Inherit).await?;
        }

        output::success("Build completed successfully!");
        Ok(())
    }

    fn steps<'a>(&self, config: &'a AppConfig) -> Vec<(&'static str, &'a [String])> {
        let engine = ("engine", config.build.engine.as_slice());
        let frontend = ("frontend", config.build.frontend.as_slice());

        if self.rust_only {
            vec![engine]
        } else if self.ts_only {
            vec![frontend]
        } else {
            vec![engine, frontend]
        }
    }
}

/// Where a build step's own output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepOutput {
    /// Inherit the terminal
    Inherit,
    /// Capture, then replay on stderr
    Stderr,
}

/// Run one build command to completion.
pub(crate) async fn run_step(
    config: &AppConfig,
    label: &str,
    command: &[String],
    step_output: StepOutput,
) -> AppResult<()> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| AppError::Config(format!("build.{} is empty", label)))?;

    output::progress(&format!("Building {}: {}", label, command.join(" ")));

    let invocation = Invocation::new(
        program,
        args.to_vec(),
        Duration::from_millis(config.build.timeout_ms),
    )
    .with_verbose(step_output == StepOutput::Inherit);

    let result = runner::run(&invocation, None)
        .await
        .map_err(|e| AppError::Bridge(format!("{} build failed: {}", label, e)))?;

    if step_output == StepOutput::Stderr {
        eprint!("{}{}", result.stdout, result.stderr);
    }

    Ok(())
}
