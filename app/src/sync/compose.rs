use serde::Serialize;

use super::request::{PreserveFlag, SyncRequest};

/// Marker injected into rsync's `--out-format`. One occurrence per changed file.
pub const CHANGE_SENTINEL: &str = "<<CHANGED>>";

/// Remote shell used for `--rsh`. Not configurable.
pub const REMOTE_SHELL: &str = "ssh";

/// rsync 命令：程序加参数向量，不经过 shell 执行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// True when `token` is one of the arguments, compared whole.
    pub fn contains(&self, token: &str) -> bool {
        self.args.iter().any(|arg| arg == token)
    }
}

/// Space-joined rendering. Tokens that need it are single-quoted so the line
/// can be pasted into a shell to reproduce the run.
impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

fn shell_quote(token: &str) -> String {
    let safe = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c));

    if safe {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}

/// `--rsh` value: `ssh [-i <key>] -o StrictHostKeyChecking=no`.
///
/// rsync splits this value on whitespace honouring quotes, so the key path is
/// quoted when needed. Host key checking is always disabled so unattended runs
/// never block on an unknown host prompt.
pub fn remote_shell(private_key: Option<&str>) -> String {
    let mut parts = vec![REMOTE_SHELL.to_string()];
    if let Some(key) = private_key {
        parts.push("-i".to_string());
        parts.push(shell_quote(key));
    }
    parts.push("-o".to_string());
    parts.push("StrictHostKeyChecking=no".to_string());

    parts.join(" ")
}

/// 根据请求生成 rsync 命令，顺序固定
pub fn compose(request: &SyncRequest, tool: impl Into<String>) -> CommandLine {
    let mut cmd = CommandLine::new(tool);

    cmd.arg("--delay-updates")
        .arg("--compress")
        .arg(format!("--timeout={}", request.timeout_seconds));

    if request.dry_run {
        cmd.arg("--dry-run");
    }

    if request.delete {
        cmd.arg("--delete-after");
    }

    // archive 下只输出显式关闭的 --no-*；非 archive 下只输出显式开启的项
    if request.archive {
        cmd.arg("--archive");
        for flag in PreserveFlag::ALL {
            if request.preserve(flag) == Some(false) {
                cmd.arg(format!("--no-{}", flag.name()));
            }
        }
    } else {
        for flag in PreserveFlag::ALL {
            if request.preserve(flag) == Some(true) {
                cmd.arg(format!("--{}", flag.name()));
            }
        }
    }

    if request.dirs_only {
        cmd.arg("--dirs");
    }

    cmd.arg("--rsh")
        .arg(remote_shell(request.private_key.as_deref()));

    if let Some(rsync_path) = &request.remote_tool_path {
        cmd.arg("--rsync-path").arg(rsync_path.as_str());
    }

    cmd.arg(format!("--out-format={}%i %n%L", CHANGE_SENTINEL));

    cmd.arg(request.source.as_str())
        .arg(request.destination.as_str());

    cmd
}
