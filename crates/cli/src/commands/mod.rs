//! Command handlers for the Agent CLI.
//!
//! Each subcommand lives in its own module. Prompt commands run against the
//! engine picked by [`with_engine`].

pub mod build;
pub mod compose;
pub mod engine;
pub mod health;
pub mod init;
pub mod prune;
pub mod sync;
pub mod update;

// Re-export command types for convenience
pub use build::BuildCommand;
pub use compose::ComposeCommand;
pub use engine::EngineCommand;
pub use health::HealthCommand;
pub use init::InitCommand;
pub use prune::PruneCommand;
pub use sync::SyncCommand;
pub use update::UpdateCommand;

use agent_bridge::{create_engine, BridgeResult, PromptEngine};
use agent_core::{AppConfig, AppResult};
use std::future::Future;
use std::sync::Arc;

use crate::output;
use build::StepOutput;

/// Run `operation` against the local engine or the companion.
///
/// The companion is used when `use_rust` is set on the command or
/// `engine.useRust` is enabled in the configuration. With `engine.autoBuild`,
/// a missing companion is built once and the operation retried once.
pub(crate) async fn with_engine<T, F, Fut>(
    config: &AppConfig,
    use_rust: bool,
    operation: F,
) -> AppResult<T>
where
    F: Fn(Arc<dyn PromptEngine>) -> Fut,
    Fut: Future<Output = BridgeResult<T>>,
{
    let use_companion = use_rust || config.engine.use_rust;
    let engine = create_engine(config, use_companion)?;
    tracing::info!(engine = engine.name(), "Dispatching command");

    match operation(Arc::clone(&engine)).await {
        Err(err) if err.is_missing_executable() && config.engine.auto_build => {
            output::warn("Companion executable not found. Building...");
            build::run_step(config, "engine", &config.build.engine, StepOutput::Stderr).await?;
            Ok(operation(engine).await?)
        }
        result => Ok(result?),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use agent_bridge::{create_bridge, PruneOptions, PruneResult};
    use agent_core::AppError;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Removes the companion written next to the test binary.
    struct RemoveOnDrop(PathBuf);

    impl Drop for RemoveOnDrop {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    /// Config whose companion has a name no other test uses; the build step
    /// runs `build_script` through `sh`.
    fn auto_build_config(tag: &str, auto_build: bool, build_script: String) -> AppConfig {
        let mut config = AppConfig::default();
        config.engine.binary_name = format!("agents-core-{}-{}", tag, std::process::id());
        config.engine.auto_build = auto_build;
        config.build.engine = vec!["/bin/sh".to_string(), "-c".to_string(), build_script];
        config
    }

    fn companion_path(config: &AppConfig) -> PathBuf {
        create_bridge(config).unwrap().config().binary_path().to_path_buf()
    }

    fn build_count(count_file: &Path) -> usize {
        std::fs::read_to_string(count_file)
            .map(|s| s.lines().count())
            .unwrap_or(0)
    }

    async fn prune(config: &AppConfig) -> AppResult<PruneResult> {
        with_engine(config, true, |engine| async move {
            engine.prune(&PruneOptions::default()).await
        })
        .await
    }

    #[tokio::test]
    async fn test_missing_companion_without_auto_build_is_not_built() {
        let dir = TempDir::new().unwrap();
        let count_file = dir.path().join("builds");
        let config = auto_build_config(
            "no-build",
            false,
            format!("echo built >> '{}'", count_file.display()),
        );

        match prune(&config).await {
            Err(AppError::Bridge(msg)) => assert!(msg.contains("not found"), "{}", msg),
            other => panic!("Expected missing companion, got {:?}", other),
        }
        assert_eq!(build_count(&count_file), 0);
    }

    #[tokio::test]
    async fn test_auto_build_builds_once_and_retries() {
        let dir = TempDir::new().unwrap();
        let count_file = dir.path().join("builds");
        let template = dir.path().join("companion.sh");
        std::fs::write(
            &template,
            "#!/bin/sh\necho '{\"success\":true,\"pruned\":[\"a\"]}'\n",
        )
        .unwrap();

        let mut config = auto_build_config("rebuild", true, String::new());
        let target = companion_path(&config);
        let _cleanup = RemoveOnDrop(target.clone());
        config.build.engine[2] = format!(
            "echo built >> '{count}' && cp '{template}' '{target}' && chmod 755 '{target}'",
            count = count_file.display(),
            template = template.display(),
            target = target.display(),
        );

        let result = prune(&config).await.unwrap();

        assert_eq!(result.pruned, vec!["a"]);
        assert_eq!(build_count(&count_file), 1);
    }

    #[tokio::test]
    async fn test_still_missing_after_build_is_returned() {
        let dir = TempDir::new().unwrap();
        let count_file = dir.path().join("builds");
        let config = auto_build_config(
            "still-missing",
            true,
            format!("echo built >> '{}'", count_file.display()),
        );

        match prune(&config).await {
            Err(AppError::Bridge(msg)) => assert!(msg.contains("not found"), "{}", msg),
            other => panic!("Expected missing companion, got {:?}", other),
        }
        assert_eq!(build_count(&count_file), 1);
    }

    #[tokio::test]
    async fn test_local_engine_ignores_auto_build() {
        let dir = TempDir::new().unwrap();
        let count_file = dir.path().join("builds");
        let config = auto_build_config(
            "local",
            true,
            format!("echo built >> '{}'", count_file.display()),
        );

        let result = with_engine(&config, false, |engine| async move {
            engine.prune(&PruneOptions::default()).await
        })
        .await
        .unwrap();

        assert!(result.pruned.is_empty());
        assert_eq!(build_count(&count_file), 0);
    }
}
