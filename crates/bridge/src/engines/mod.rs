//! Prompt engine implementations.

pub mod companion;
pub mod local;

pub use companion::{BridgeConfig, ProcessBridge};
pub use local::LocalEngine;
