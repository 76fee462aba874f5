//! Process bridge to the companion executable.
//!
//! Each operation builds an argument vector, checks that the companion
//! exists, runs it under a timeout and decodes its stdout.

use agent_core::AppConfig;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::args::ArgsBuilder;
use crate::decode::DecodedResult;
use crate::engine::PromptEngine;
use crate::error::{BridgeError, BridgeResult};
use crate::locate::{install_dir, resolve_binary_path};
use crate::runner::{self, CancelToken, Invocation};
use crate::types::{
    ComposeOptions, ComposeResult, HealthStatus, InitOptions, InitResult, PromptKind,
    PruneOptions, PruneResult, SyncOptions, SyncResult, UpdateOptions, UpdateResult,
};

/// Settings fixed for the lifetime of a bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    binary_path: PathBuf,
    verbose: bool,
    timeout: Duration,
}

impl BridgeConfig {
    /// Bridge settings for an explicit binary path.
    pub fn new(binary_path: impl Into<PathBuf>, timeout: Duration, verbose: bool) -> Self {
        Self {
            binary_path: binary_path.into(),
            verbose,
            timeout,
        }
    }

    /// Resolve the companion next to the running executable.
    pub fn from_app_config(config: &AppConfig) -> BridgeResult<Self> {
        Ok(Self::from_install_dir(&install_dir()?, config))
    }

    /// Resolve the companion relative to `install_dir`.
    pub fn from_install_dir(install_dir: &Path, config: &AppConfig) -> Self {
        let binary_path = resolve_binary_path(
            install_dir,
            &config.engine.relative_dir,
            &config.engine.binary_name,
        );

        Self::new(
            binary_path,
            Duration::from_millis(config.engine.timeout_ms),
            config.verbose,
        )
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Prompt engine backed by the companion executable.
#[derive(Debug, Clone)]
pub struct ProcessBridge {
    config: BridgeConfig,
    cancel: Option<CancelToken>,
}

impl ProcessBridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Abort in-flight calls when `token` is cancelled.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Run the companion with `args` exactly as given and decode its stdout.
    pub async fn run(&self, args: Vec<String>) -> BridgeResult<DecodedResult> {
        self.run_with_input(args, None).await
    }

    /// Like [`ProcessBridge::run`], writing `input` to the companion's stdin.
    pub async fn run_with_input(
        &self,
        args: Vec<String>,
        input: Option<String>,
    ) -> BridgeResult<DecodedResult> {
        let binary_path = &self.config.binary_path;
        if !binary_path.exists() {
            tracing::warn!(binary = %binary_path.display(), "Companion executable not found");
            return Err(BridgeError::ExecutableNotFound {
                path: binary_path.clone(),
            });
        }

        let mut invocation = Invocation::new(binary_path.clone(), args, self.config.timeout)
            .with_verbose(self.config.verbose);
        if let Some(input) = input {
            invocation = invocation.with_input(input);
        }

        let result = runner::run(&invocation, self.cancel.as_ref()).await?;
        Ok(DecodedResult::decode(&result.stdout))
    }

    /// Run an operation and shape the decoded document into `T`.
    async fn call<T>(&self, operation: &str, args: Vec<String>) -> BridgeResult<T>
    where
        T: DeserializeOwned + Send,
    {
        let decoded = self.run(args).await?;
        serde_json::from_value(decoded.into_value()).map_err(|e| {
            BridgeError::UnexpectedOutput {
                operation: operation.to_string(),
                reason: e.to_string(),
            }
        })
    }

    pub fn init_args(options: &InitOptions) -> Vec<String> {
        ArgsBuilder::new("init")
            .json()
            .switch("--force", options.force)
            .option("--template", options.template.as_deref())
            .option("--path", options.path.as_ref().map(|p| p.to_string_lossy()))
            .build()
    }

    pub fn update_args(options: &UpdateOptions) -> Vec<String> {
        ArgsBuilder::new("update")
            .json()
            .switch("--backup", options.backup)
            .option("--version", options.version.as_deref())
            .build()
    }

    pub fn compose_args(kind: PromptKind, options: &ComposeOptions) -> Vec<String> {
        ArgsBuilder::new("compose")
            .positional(kind.as_str())
            .json()
            .switch("--interactive", options.interactive)
            .option("--template", options.template.as_deref())
            .build()
    }

    pub fn prune_args(options: &PruneOptions) -> Vec<String> {
        ArgsBuilder::new("prune")
            .json()
            .switch("--force", options.force)
            .switch("--dry-run", options.dry_run)
            .build()
    }

    pub fn sync_args(options: &SyncOptions) -> Vec<String> {
        ArgsBuilder::new("sync")
            .json()
            .option("--remote", options.remote.as_deref())
            .option("--branch", options.branch.as_deref())
            .build()
    }

    pub fn health_args() -> Vec<String> {
        ArgsBuilder::new("--version").json().build()
    }
}

#[async_trait::async_trait]
impl PromptEngine for ProcessBridge {
    fn name(&self) -> &str {
        "companion"
    }

    async fn init(&self, options: &InitOptions) -> BridgeResult<InitResult> {
        self.call("init", Self::init_args(options)).await
    }

    async fn update(&self, options: &UpdateOptions) -> BridgeResult<UpdateResult> {
        self.call("update", Self::update_args(options)).await
    }

    async fn compose(
        &self,
        kind: PromptKind,
        options: &ComposeOptions,
    ) -> BridgeResult<ComposeResult> {
        self.call("compose", Self::compose_args(kind, options)).await
    }

    async fn prune(&self, options: &PruneOptions) -> BridgeResult<PruneResult> {
        self.call("prune", Self::prune_args(options)).await
    }

    async fn sync(&self, options: &SyncOptions) -> BridgeResult<SyncResult> {
        self.call("sync", Self::sync_args(options)).await
    }

    async fn check_health(&self) -> BridgeResult<HealthStatus> {
        self.call("health", Self::health_args()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_no_blank_tokens(args: &[String]) {
        assert!(
            args.iter().all(|a| !a.trim().is_empty()),
            "blank token in {:?}",
            args
        );
    }

    #[test]
    fn test_default_options_produce_minimal_args() {
        assert_eq!(
            ProcessBridge::init_args(&InitOptions::default()),
            vec!["init", "--json"]
        );
        assert_eq!(
            ProcessBridge::update_args(&UpdateOptions::default()),
            vec!["update", "--json"]
        );
        assert_eq!(
            ProcessBridge::compose_args(PromptKind::Memory, &ComposeOptions::default()),
            vec!["compose", "memory", "--json"]
        );
        assert_eq!(
            ProcessBridge::prune_args(&PruneOptions::default()),
            vec!["prune", "--json"]
        );
        assert_eq!(
            ProcessBridge::sync_args(&SyncOptions::default()),
            vec!["sync", "--json"]
        );
        assert_eq!(ProcessBridge::health_args(), vec!["--version", "--json"]);
    }

    #[test]
    fn test_every_option_combination_is_free_of_blanks() {
        let versions = [None, Some(String::new()), Some("2.1.0".to_string())];
        for backup in [false, true] {
            for version in &versions {
                let args = ProcessBridge::update_args(&UpdateOptions {
                    backup,
                    version: version.clone(),
                });
                assert_no_blank_tokens(&args);
                assert_eq!(args.contains(&"--backup".to_string()), backup);
            }
        }

        for remote in [None, Some("origin".to_string())] {
            for branch in [None, Some("main".to_string())] {
                let args = ProcessBridge::sync_args(&SyncOptions {
                    remote: remote.clone(),
                    branch: branch.clone(),
                });
                assert_no_blank_tokens(&args);
                assert_eq!(args.contains(&"--remote".to_string()), remote.is_some());
                assert_eq!(args.contains(&"--branch".to_string()), branch.is_some());
            }
        }
    }

    #[test]
    fn test_flag_is_followed_by_its_value() {
        let args = ProcessBridge::sync_args(&SyncOptions {
            remote: None,
            branch: Some("release/1.0".to_string()),
        });
        let idx = args.iter().position(|a| a == "--branch").unwrap();
        assert_eq!(args[idx + 1], "release/1.0");
    }

    #[test]
    fn test_init_with_all_options() {
        let args = ProcessBridge::init_args(&InitOptions {
            force: true,
            template: Some("minimal".to_string()),
            path: Some(PathBuf::from("/work/repo")),
        });
        assert_eq!(
            args,
            vec![
                "init",
                "--json",
                "--force",
                "--template",
                "minimal",
                "--path",
                "/work/repo"
            ]
        );
    }

    #[test]
    fn test_compose_and_prune_switches() {
        let compose = ProcessBridge::compose_args(
            PromptKind::SubAgent,
            &ComposeOptions {
                interactive: true,
                template: None,
            },
        );
        assert_eq!(compose, vec!["compose", "sub-agent", "--json", "--interactive"]);

        let prune = ProcessBridge::prune_args(&PruneOptions {
            force: false,
            dry_run: true,
        });
        assert_eq!(prune, vec!["prune", "--json", "--dry-run"]);
    }

    #[test]
    fn test_bridge_config_from_install_dir() {
        let mut app = AppConfig::default();
        app.engine.relative_dir = PathBuf::from("engine");
        app.engine.timeout_ms = 1234;
        app.verbose = true;

        let config = BridgeConfig::from_install_dir(Path::new("/opt/agent/bin"), &app);

        assert!(config.binary_path().starts_with("/opt/agent/bin/engine"));
        assert_eq!(config.timeout(), Duration::from_millis(1234));
        assert!(config.verbose());
    }

    #[tokio::test]
    async fn test_missing_binary_is_reported_before_spawn() {
        let dir = tempfile::TempDir::new().unwrap();
        let bridge = ProcessBridge::new(BridgeConfig::new(
            dir.path().join("agents-core"),
            Duration::from_secs(1),
            false,
        ));

        let err = bridge.prune(&PruneOptions::default()).await.unwrap_err();
        assert!(matches!(err, BridgeError::ExecutableNotFound { .. }));
    }
}
