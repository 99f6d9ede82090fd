use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("rsync binary '{binary}' not found: {source}")]
    ToolNotFound {
        binary: String,
        #[source]
        source: which::Error,
    },

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("rsync exited with code {rc}: {stderr}")]
    Execution { rc: i32, stderr: String, cmd: String },

    #[error("Failed to read job file '{path}': {source}")]
    JobIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid job file: {0}")]
    Job(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;

/// 执行失败时输出的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncFailure {
    pub failed: bool,
    pub msg: String,
    pub rc: i32,
    pub cmd: String,
}

impl SyncError {
    /// Failure payload for a non-zero rsync exit. Other errors never reached rsync.
    pub fn failure(&self) -> Option<SyncFailure> {
        match self {
            SyncError::Execution { rc, stderr, cmd } => Some(SyncFailure {
                failed: true,
                msg: stderr.clone(),
                rc: *rc,
                cmd: cmd.clone(),
            }),
            _ => None,
        }
    }

    /// Context prefix used when the error leaves the sync module.
    pub fn context(&self) -> &'static str {
        match self {
            SyncError::InvalidRequest(_) => "Invalid sync request",
            SyncError::ToolNotFound { .. } => "rsync is not available",
            SyncError::Spawn { .. } => "Failed to start rsync",
            SyncError::Execution { .. } => "rsync failed",
            SyncError::JobIo { .. } | SyncError::Job(_) => "Failed to load job file",
        }
    }
}

impl From<SyncError> for utils::error::Error {
    fn from(err: SyncError) -> Self {
        utils::error::Error::with_source(err.context(), Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_errors_are_not_reported_as_sync_failures() {
        let err = crate::sync::SyncRequest::from_toml_str("src = ").unwrap_err();
        let wrapped = utils::error::Error::from(err);

        assert!(wrapped.to_string().starts_with("Failed to load job file: Invalid job file"));
    }

    #[test]
    fn test_context_per_variant() {
        let invalid = SyncError::InvalidRequest("src must not be empty".to_string());
        assert_eq!(
            utils::error::Error::from(invalid).to_string(),
            "Invalid sync request: Invalid request: src must not be empty"
        );

        let execution = SyncError::Execution {
            rc: 23,
            stderr: "rsync: partial transfer".to_string(),
            cmd: "rsync a b".to_string(),
        };
        assert_eq!(
            utils::error::Error::from(execution).to_string(),
            "rsync failed: rsync exited with code 23: rsync: partial transfer"
        );

        let io = SyncError::JobIo {
            path: "job.toml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(io.context(), "Failed to load job file");
    }
}
