//! Agent CLI
//!
//! Main entry point for the prompt management command-line tool.
//! Commands run against the built-in engine or, with `--use-rust`, the
//! companion executable installed next to this binary.

mod commands;
mod output;

use agent_core::{config::AppConfig, logging, AppResult};
use clap::{CommandFactory, Parser, Subcommand};
use commands::{
    BuildCommand, ComposeCommand, EngineCommand, HealthCommand, InitCommand, PruneCommand,
    SyncCommand, UpdateCommand,
};
use std::path::PathBuf;
use tracing::Instrument;

/// Agent CLI - prompt management for AI coding agents
#[derive(Parser, Debug)]
#[command(name = "agent-cli")]
#[command(about = "Prompt management for AI coding agents", long_about = None)]
#[command(version)]
#[command(after_help = "Use 'agent-cli <command> --help' for details on a command.")]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "AGENT_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file (default: <workspace>/.agents/config.yaml)
    #[arg(short, long, global = true, env = "AGENT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Stream companion output and enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Companion call timeout in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize prompt management in the workspace
    Init(InitCommand),

    /// Update prompts to a newer version
    Update(UpdateCommand),

    /// Compose a new prompt (memory, sub-agent, cmd)
    Compose(ComposeCommand),

    /// Remove stale prompts
    Prune(PruneCommand),

    /// Synchronize prompts with a remote
    Sync(SyncCommand),

    /// Report engine version and platform
    Health(HealthCommand),

    /// Run the companion engine with raw arguments
    Engine(EngineCommand),

    /// Build the companion engine and/or the front end
    Build(BuildCommand),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Init(_) => "init",
            Commands::Update(_) => "update",
            Commands::Compose(_) => "compose",
            Commands::Prune(_) => "prune",
            Commands::Sync(_) => "sync",
            Commands::Health(_) => "health",
            Commands::Engine(_) => "engine",
            Commands::Build(_) => "build",
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // File and environment first, then flags
    let config = AppConfig::load_from(cli.workspace, cli.config)?.with_overrides(
        cli.log_level,
        cli.timeout_ms,
        cli.verbose,
        cli.no_color,
    );
    config.validate()?;

    logging::init_logging(config.log_level.as_deref(), config.log_format, config.no_color)?;
    output::configure(config.no_color);

    tracing::info!("Agent CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Engine: {:?}", config.engine);

    let span = tracing::info_span!("command", name = command.name());
    let result = dispatch(command, &config, cli.json).instrument(span).await;

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}

async fn dispatch(command: Commands, config: &AppConfig, json: bool) -> AppResult<()> {
    match command {
        Commands::Init(cmd) => cmd.execute(config, json).await,
        Commands::Update(cmd) => cmd.execute(config, json).await,
        Commands::Compose(cmd) => cmd.execute(config, json).await,
        Commands::Prune(cmd) => cmd.execute(config, json).await,
        Commands::Sync(cmd) => cmd.execute(config, json).await,
        Commands::Health(cmd) => cmd.execute(config, json).await,
        Commands::Engine(cmd) => cmd.execute(config, json).await,
        Commands::Build(cmd) => cmd.execute(config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_bridge::PromptKind;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("agent-cli").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_is_accepted() {
        let cli = parse(&[]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        let err = parse(&["frobnicate"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        assert!(err.render().to_string().contains("--help"));
    }

    #[test]
    fn test_update_flags() {
        let cli = parse(&["update", "-b", "-v", "2.1.0", "--use-rust"]).unwrap();
        match cli.command {
            Some(Commands::Update(cmd)) => {
                assert!(cmd.backup);
                assert_eq!(cmd.version.as_deref(), Some("2.1.0"));
                assert!(cmd.use_rust);
            }
            other => panic!("Expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_compose_type_is_parsed() {
        let cli = parse(&["compose", "sub-agent", "-i"]).unwrap();
        match cli.command {
            Some(Commands::Compose(cmd)) => {
                assert_eq!(cmd.kind, PromptKind::SubAgent);
                assert!(cmd.interactive);
                assert!(!cmd.use_rust);
            }
            other => panic!("Expected compose, got {:?}", other),
        }

        assert!(parse(&["compose", "essay"]).is_err());
        assert!(parse(&["compose"]).is_err());
    }

    #[test]
    fn test_prune_and_sync_short_flags() {
        match parse(&["prune", "-f", "-d"]).unwrap().command {
            Some(Commands::Prune(cmd)) => assert!(cmd.force && cmd.dry_run),
            other => panic!("Expected prune, got {:?}", other),
        }

        match parse(&["sync", "-r", "origin", "-b", "main"]).unwrap().command {
            Some(Commands::Sync(cmd)) => {
                assert_eq!(cmd.remote.as_deref(), Some("origin"));
                assert_eq!(cmd.branch.as_deref(), Some("main"));
            }
            other => panic!("Expected sync, got {:?}", other),
        }
    }

    #[test]
    fn test_init_flags() {
        match parse(&["init", "-f", "-t", "minimal"]).unwrap().command {
            Some(Commands::Init(cmd)) => {
                assert!(cmd.force);
                assert_eq!(cmd.template.as_deref(), Some("minimal"));
            }
            other => panic!("Expected init, got {:?}", other),
        }
    }

    #[test]
    fn test_build_targets_conflict() {
        let err = parse(&["build", "--rust-only", "--ts-only"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        match parse(&["build", "--rust-only"]).unwrap().command {
            Some(Commands::Build(cmd)) => assert!(cmd.rust_only && !cmd.ts_only),
            other => panic!("Expected build, got {:?}", other),
        }
    }

    #[test]
    fn test_engine_passes_hyphenated_args_through() {
        match parse(&["engine", "--version", "--json"]).unwrap().command {
            Some(Commands::Engine(cmd)) => assert_eq!(cmd.args, vec!["--version", "--json"]),
            other => panic!("Expected engine, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["prune", "--json", "--timeout-ms", "500", "--verbose"]).unwrap();
        assert!(cli.json);
        assert!(cli.verbose);
        assert_eq!(cli.timeout_ms, Some(500));
    }
}
