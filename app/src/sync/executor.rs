use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;

use super::compose::CommandLine;
use super::error::{Result, SyncError};
use super::interpret::ProcessOutput;

/// 执行命令并捕获输出
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run `command` to completion and capture its exit code and output.
    async fn execute(&self, command: &CommandLine) -> Result<ProcessOutput>;
}

/// Runs the argument vector directly with `tokio::process`, no shell involved.
#[derive(Debug, Clone, Default)]
pub struct TokioExecutor;

#[async_trait]
impl Executor for TokioExecutor {
    async fn execute(&self, command: &CommandLine) -> Result<ProcessOutput> {
        let output = tokio::process::Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| SyncError::Spawn {
                program: command.program().to_string(),
                source,
            })?;

        Ok(ProcessOutput {
            // killed by a signal
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Resolve the configured rsync binary against `PATH`.
pub fn resolve_tool(binary: &str) -> Result<PathBuf> {
    which::which(binary).map_err(|source| SyncError::ToolNotFound {
        binary: binary.to_string(),
        source,
    })
}
