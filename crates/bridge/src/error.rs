//! Failure taxonomy for companion invocations.
//!
//! Every variant is terminal: the bridge never retries on its own.

use agent_core::AppError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while invoking the companion executable.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The resolved binary path does not exist; nothing was spawned.
    #[error(
        "Companion executable not found at {}. Run 'agent-cli build --rust-only' first.",
        path.display()
    )]
    ExecutableNotFound { path: PathBuf },

    /// The operating system refused to start the process.
    #[error("Failed to execute {}: {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The child did not finish in time and was killed.
    #[error("Command timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The child exited unsuccessfully.
    #[error("Companion command failed with exit code {}: {stderr}", display_code(*code))]
    NonZeroExit { code: Option<i32>, stderr: String },

    /// The caller cancelled the call and the child was killed.
    #[error("Command cancelled")]
    Cancelled,

    /// Waiting on or reading from the child failed.
    #[error("I/O error while running companion: {0}")]
    Io(#[from] std::io::Error),

    /// The companion returned a document that does not fit the operation's result.
    #[error("Unexpected output from '{operation}': {reason}")]
    UnexpectedOutput { operation: String, reason: String },
}

fn display_code(code: Option<i32>) -> String {
    code.map_or_else(|| "none (terminated by signal)".to_string(), |c| c.to_string())
}

impl BridgeError {
    /// Whether building the companion could fix this error.
    pub fn is_missing_executable(&self) -> bool {
        matches!(self, BridgeError::ExecutableNotFound { .. })
    }
}

impl From<BridgeError> for AppError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::UnexpectedOutput { .. } => AppError::Serialization(err.to_string()),
            other => AppError::Bridge(other.to_string()),
        }
    }
}

/// Convenience type alias for bridge results.
pub type BridgeResult<T> = Result<T, BridgeError>;
