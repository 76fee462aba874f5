//! Child process execution with timeout and cancellation.
//!
//! Each call owns exactly one child, one timer and its own output buffers.
//! The child's exit, the timer and the cancel token race inside a single
//! `select!`, so exactly one outcome is produced per call.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{BridgeError, BridgeResult};

/// A single, fully specified process invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
    input: Option<String>,
    timeout: Duration,
    verbose: bool,
}

impl Invocation {
    /// Create an invocation of `program` with `args`.
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            input: None,
            timeout,
            verbose: false,
        }
    }

    /// Text written to the child's stdin.
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Inherit the parent's stdio instead of capturing it.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

/// Output of a child that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    /// Exit code; `None` if the child was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl InvocationResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Caller-side handle for aborting in-flight calls.
///
/// Clones share state: cancelling one cancels every call observing any clone.
#[derive(Debug, Clone)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once `cancel` has been called.
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

enum Outcome {
    Finished(BridgeResult<InvocationResult>),
    TimedOut,
    Cancelled,
}

/// Spawn the invocation and wait for exactly one terminal outcome.
///
/// A zero exit is returned as `Ok`; a non-zero exit becomes `NonZeroExit`.
/// The timeout covers both the child's exit and draining its output. On
/// timeout or cancellation the child is killed and reaped before returning.
pub async fn run(
    invocation: &Invocation,
    cancel: Option<&CancelToken>,
) -> BridgeResult<InvocationResult> {
    let start = Instant::now();
    let timeout_ms = invocation.timeout.as_millis() as u64;

    info!(
        binary = %invocation.program.display(),
        args = ?invocation.args,
        timeout_ms,
        verbose = invocation.verbose,
        "Starting companion process"
    );

    if cancel.is_some_and(CancelToken::is_cancelled) {
        return Err(BridgeError::Cancelled);
    }

    let mut child = spawn(invocation)?;

    let stdin = child.stdin.take();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    if stdin.is_none() && invocation.input.is_some() {
        warn!("Input ignored: stdin is inherited in verbose mode");
    }

    let outcome = {
        let completion = async {
            let (status, (), stdout, stderr) = tokio::try_join!(
                child.wait(),
                write_input(stdin, invocation.input.as_deref()),
                read_all(stdout),
                read_all(stderr),
            )?;
            Ok::<_, BridgeError>(InvocationResult {
                exit_code: status.code(),
                stdout,
                stderr,
            })
        };

        tokio::select! {
            result = completion => Outcome::Finished(result),
            _ = tokio::time::sleep(invocation.timeout) => Outcome::TimedOut,
            _ = wait_cancelled(cancel) => Outcome::Cancelled,
        }
    };

    let result = match outcome {
        Outcome::Finished(result) => result?,
        Outcome::TimedOut => {
            warn!(pid = ?child.id(), timeout_ms, "Companion timed out, killing");
            terminate(&mut child).await;
            return Err(BridgeError::Timeout { timeout_ms });
        }
        Outcome::Cancelled => {
            warn!(pid = ?child.id(), "Companion call cancelled, killing");
            terminate(&mut child).await;
            return Err(BridgeError::Cancelled);
        }
    };

    info!(
        binary = %invocation.program.display(),
        exit_code = ?result.exit_code,
        duration_ms = start.elapsed().as_millis() as u64,
        "Companion process completed"
    );

    if result.success() {
        Ok(result)
    } else {
        Err(BridgeError::NonZeroExit {
            code: result.exit_code,
            stderr: result.stderr.trim().to_string(),
        })
    }
}

fn spawn(invocation: &Invocation) -> BridgeResult<Child> {
    let mut command = Command::new(&invocation.program);
    command.args(&invocation.args).kill_on_drop(true);

    if invocation.verbose {
        command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
    } else {
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
    }

    command.spawn().map_err(|source| BridgeError::Spawn {
        path: invocation.program.clone(),
        source,
    })
}

/// Write the input (if any), then close stdin so the child sees EOF.
async fn write_input(stdin: Option<ChildStdin>, input: Option<&str>) -> std::io::Result<()> {
    let (Some(mut stdin), Some(input)) = (stdin, input) else {
        return Ok(());
    };

    // A child that exits without reading its input is not an error here;
    // its exit status decides the outcome.
    if let Err(e) = stdin.write_all(input.as_bytes()).await {
        debug!(error = %e, "Companion closed stdin before reading all input");
    }
    Ok(())
}

async fn read_all<R: AsyncRead + Unpin>(reader: Option<R>) -> std::io::Result<String> {
    let Some(mut reader) = reader else {
        return Ok(String::new());
    };

    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

async fn wait_cancelled(cancel: Option<&CancelToken>) {
    match cancel {
        Some(token) => token.cancelled().await,
        None => std::future::pending().await,
    }
}

async fn terminate(child: &mut Child) {
    // SIGKILL (TerminateProcess on Windows), then wait for the exit.
    if let Err(e) = child.kill().await {
        warn!(error = %e, "Failed to kill companion process");
    }
}
