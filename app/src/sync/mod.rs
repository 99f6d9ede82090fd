//! 同步模块 - 组装 rsync 命令、执行并解析结果

mod compose;
mod error;
mod executor;
mod interpret;
mod request;
#[allow(clippy::module_inception)]
mod sync;


pub use compose::{compose, remote_shell, CommandLine, CHANGE_SENTINEL, REMOTE_SHELL};
pub use error::{Result, SyncError, SyncFailure};
pub use executor::{resolve_tool, Executor, TokioExecutor};
pub use interpret::{interpret, strip_sentinel, ProcessOutput, SyncResult};
pub use request::{PreserveFlag, SyncMode, SyncRequest, DEFAULT_TIMEOUT_SECS};
pub use sync::{run, sync};
