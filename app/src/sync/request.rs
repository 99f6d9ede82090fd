use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use super::error::{Result, SyncError};

/// 默认 --timeout 秒数
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// 同步方向。仅用于日志，不影响生成的命令：方向由调用方决定在哪台主机上运行。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SyncMode {
    #[default]
    Push,
    Pull,
}

impl std::fmt::Display for SyncMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncMode::Push => write!(f, "push"),
            SyncMode::Pull => write!(f, "pull"),
        }
    }
}

impl FromStr for SyncMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "push" => Ok(SyncMode::Push),
            "pull" => Ok(SyncMode::Pull),
            other => Err(format!("invalid mode '{}', expected push or pull", other)),
        }
    }
}

// 作业文件与命令行接受相同的取值（不区分大小写）
impl TryFrom<String> for SyncMode {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Preservation attributes bundled by `--archive`, in command order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreserveFlag {
    Recursive,
    Links,
    Perms,
    Times,
    Owner,
    Group,
}

impl PreserveFlag {
    pub const ALL: [PreserveFlag; 6] = [
        PreserveFlag::Recursive,
        PreserveFlag::Links,
        PreserveFlag::Perms,
        PreserveFlag::Times,
        PreserveFlag::Owner,
        PreserveFlag::Group,
    ];

    /// rsync long option name without dashes
    pub fn name(self) -> &'static str {
        match self {
            PreserveFlag::Recursive => "recursive",
            PreserveFlag::Links => "links",
            PreserveFlag::Perms => "perms",
            PreserveFlag::Times => "times",
            PreserveFlag::Owner => "owner",
            PreserveFlag::Group => "group",
        }
    }
}

/// 同步请求 - 单次调用的全部输入
///
/// Job files use the option names `src`, `dest`, `rsync_path`, `dirs` and
/// `rsync_timeout`. `dry_run` comes from the caller (`--check`) and is never
/// read from a job file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncRequest {
    #[serde(rename = "src")]
    pub source: String,

    #[serde(rename = "dest")]
    pub destination: String,

    #[serde(default)]
    pub mode: SyncMode,

    #[serde(default)]
    pub delete: bool,

    #[serde(default)]
    pub private_key: Option<String>,

    /// 远端 rsync 路径
    #[serde(default, rename = "rsync_path")]
    pub remote_tool_path: Option<String>,

    #[serde(default = "default_archive")]
    pub archive: bool,

    #[serde(default, rename = "dirs")]
    pub dirs_only: bool,

    // None = 跟随 archive 的默认行为
    #[serde(default)]
    pub recursive: Option<bool>,
    #[serde(default)]
    pub links: Option<bool>,
    #[serde(default)]
    pub perms: Option<bool>,
    #[serde(default)]
    pub times: Option<bool>,
    #[serde(default)]
    pub owner: Option<bool>,
    #[serde(default)]
    pub group: Option<bool>,

    #[serde(default = "default_timeout", rename = "rsync_timeout")]
    pub timeout_seconds: u64,

    #[serde(skip)]
    pub dry_run: bool,
}

fn default_archive() -> bool {
    true
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for SyncRequest {
    fn default() -> Self {
        Self {
            source: String::new(),
            destination: String::new(),
            mode: SyncMode::default(),
            delete: false,
            private_key: None,
            remote_tool_path: None,
            archive: true,
            dirs_only: false,
            recursive: None,
            links: None,
            perms: None,
            times: None,
            owner: None,
            group: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            dry_run: false,
        }
    }
}

impl SyncRequest {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            ..Default::default()
        }
    }

    /// Tri-state value of one preservation attribute.
    pub fn preserve(&self, flag: PreserveFlag) -> Option<bool> {
        match flag {
            PreserveFlag::Recursive => self.recursive,
            PreserveFlag::Links => self.links,
            PreserveFlag::Perms => self.perms,
            PreserveFlag::Times => self.times,
            PreserveFlag::Owner => self.owner,
            PreserveFlag::Group => self.group,
        }
    }

    /// `src` and `dest` must be non-empty. Whitespace-only paths are passed through.
    pub fn validate(&self) -> Result<()> {
        if self.source.is_empty() {
            return Err(SyncError::InvalidRequest("src must not be empty".to_string()));
        }
        if self.destination.is_empty() {
            return Err(SyncError::InvalidRequest("dest must not be empty".to_string()));
        }

        Ok(())
    }

    /// 从 TOML 作业内容解析请求
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let request: SyncRequest = toml::from_str(contents)?;
        request.validate()?;

        Ok(request)
    }

    /// 读取 TOML 作业文件
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| SyncError::JobIo {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&contents)
    }
}
