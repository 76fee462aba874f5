//! Companion engine bridge for the Agent CLI.
//!
//! This crate locates, invokes and decodes the companion executable that
//! implements prompt management. Each call spawns one child process, bounds
//! it with a timeout, and maps every failure onto [`BridgeError`].
//!
//! # Example
//! ```no_run
//! use agent_bridge::{create_bridge, PromptEngine, PruneOptions};
//! use agent_core::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bridge = create_bridge(&AppConfig::load()?)?;
//! let result = bridge.prune(&PruneOptions { dry_run: true, ..Default::default() }).await?;
//! println!("would prune {:?}", result.pruned);
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod decode;
pub mod engine;
pub mod engines;
pub mod error;
pub mod factory;
pub mod locate;
pub mod runner;
pub mod types;

// Re-export main types
pub use decode::DecodedResult;
pub use engine::PromptEngine;
pub use engines::{BridgeConfig, LocalEngine, ProcessBridge};
pub use error::{BridgeError, BridgeResult};
pub use factory::{create_bridge, create_engine};
pub use runner::{CancelToken, Invocation, InvocationResult};
pub use types::{
    ComposeOptions, ComposeResult, HealthStatus, InitOptions, InitResult, PromptKind,
    PruneOptions, PruneResult, SyncOptions, SyncResult, UpdateOptions, UpdateResult,
};
