//! Prompt engine factory.
//!
//! Picks the engine for a command: the companion process when requested,
//! the in-process placeholder otherwise.

use agent_core::AppConfig;
use std::sync::Arc;

use crate::engine::PromptEngine;
use crate::engines::{BridgeConfig, LocalEngine, ProcessBridge};
use crate::error::BridgeResult;

/// Create a process bridge for the companion next to the running executable.
///
/// The companion's existence is checked per call, not here, so a bridge can
/// be created before the companion has been built.
pub fn create_bridge(config: &AppConfig) -> BridgeResult<ProcessBridge> {
    let bridge_config = BridgeConfig::from_app_config(config)?;
    tracing::debug!(
        binary = %bridge_config.binary_path().display(),
        timeout_ms = config.engine.timeout_ms,
        "Configured companion bridge"
    );
    Ok(ProcessBridge::new(bridge_config))
}

/// Create the engine a command should run against.
///
/// # Arguments
/// * `config` - Application configuration
/// * `use_companion` - Route through the companion executable
pub fn create_engine(
    config: &AppConfig,
    use_companion: bool,
) -> BridgeResult<Arc<dyn PromptEngine>> {
    if use_companion {
        Ok(Arc::new(create_bridge(config)?))
    } else {
        Ok(Arc::new(LocalEngine::new(config.workspace.clone())))
    }
}
