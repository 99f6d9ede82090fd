use serde::Serialize;

use super::compose::{CommandLine, CHANGE_SENTINEL};
use super::error::{Result, SyncError};

/// 子进程的退出码与输出
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// 同步结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncResult {
    pub changed: bool,
    #[serde(rename = "msg")]
    pub message: String,
    #[serde(rename = "rc")]
    pub exit_code: i32,
    #[serde(rename = "cmd")]
    pub command_line: String,
    #[serde(skip)]
    pub raw_error: String,
}

/// Remove every sentinel occurrence. Returns whether any was present.
pub fn strip_sentinel(stdout: &str) -> (bool, String) {
    let changed = stdout.contains(CHANGE_SENTINEL);
    (changed, stdout.replace(CHANGE_SENTINEL, ""))
}

pub fn interpret(command: &CommandLine, output: ProcessOutput) -> Result<SyncResult> {
    let command_line = command.to_string();

    if output.exit_code != 0 {
        return Err(SyncError::Execution {
            rc: output.exit_code,
            stderr: output.stderr,
            cmd: command_line,
        });
    }

    let (changed, message) = strip_sentinel(&output.stdout);

    Ok(SyncResult {
        changed,
        message,
        exit_code: output.exit_code,
        command_line,
        raw_error: output.stderr,
    })
}
