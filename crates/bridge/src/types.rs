//! Operation options and result types.
//!
//! Results mirror the companion's JSON documents. Every field has a default
//! and unknown fields are kept in `extra`, so documents are passed through
//! without loss.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Kind of prompt produced by `compose`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptKind {
    Memory,
    SubAgent,
    Cmd,
}

impl PromptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::Memory => "memory",
            PromptKind::SubAgent => "sub-agent",
            PromptKind::Cmd => "cmd",
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(PromptKind::Memory),
            "sub-agent" | "subagent" | "sa" => Ok(PromptKind::SubAgent),
            "cmd" | "command" => Ok(PromptKind::Cmd),
            other => Err(format!(
                "Unknown prompt type: {}. Supported: memory, sub-agent, cmd",
                other
            )),
        }
    }
}

/// Options for `init`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitOptions {
    pub force: bool,
    pub template: Option<String>,
    pub path: Option<PathBuf>,
}

/// Options for `update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    pub backup: bool,
    pub version: Option<String>,
}

/// Options for `compose`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeOptions {
    pub interactive: bool,
    pub template: Option<String>,
}

/// Options for `prune`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneOptions {
    pub force: bool,
    pub dry_run: bool,
}

/// Options for `sync`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOptions {
    pub remote: Option<String>,
    pub branch: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Result of `init`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitResult {
    #[serde(default = "default_true")]
    pub success: bool,

    #[serde(default)]
    pub path: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of `update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResult {
    #[serde(default = "default_true")]
    pub success: bool,

    /// Files touched by the update
    #[serde(default)]
    pub updated: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of `compose`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeResult {
    #[serde(default = "default_true")]
    pub success: bool,

    /// Prompt kind as reported by the engine
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Composed prompt text
    #[serde(default)]
    pub content: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of `prune`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PruneResult {
    #[serde(default = "default_true")]
    pub success: bool,

    /// Paths removed (or that would be removed on a dry run)
    #[serde(default)]
    pub pruned: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of `sync`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResult {
    #[serde(default = "default_true")]
    pub success: bool,

    #[serde(default)]
    pub synced: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of the health probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default = "default_true")]
    pub success: bool,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub platform: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
