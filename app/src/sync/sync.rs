use super::compose::compose;
use super::error::Result;
use super::executor::{resolve_tool, Executor, TokioExecutor};
use super::interpret::{interpret, SyncResult};
use super::request::SyncRequest;

/// 主同步函数 - 生成命令、执行、解析结果，单次执行不重试
pub async fn sync<E>(request: &SyncRequest, tool: &str, executor: &E) -> Result<SyncResult>
where
    E: Executor + ?Sized,
{
    request.validate()?;

    log::info!(
        "Starting {} sync: {} -> {}",
        request.mode,
        request.source,
        request.destination
    );

    let command = compose(request, tool);
    log::debug!("Composed command: {}", command);

    let output = executor.execute(&command).await?;
    log::debug!("rsync exited with code {}", output.exit_code);

    match interpret(&command, output) {
        Ok(result) => {
            log::info!("Sync completed, changed: {}", result.changed);
            Ok(result)
        }
        Err(e) => {
            log::error!("Sync failed: {}", e);
            Err(e)
        }
    }
}

/// Resolve `binary` on `PATH` and run the request with a real subprocess.
pub async fn run(request: &SyncRequest, binary: &str) -> Result<SyncResult> {
    let tool = resolve_tool(binary)?;
    log::debug!("Using rsync binary {}", tool.display());

    sync(request, &tool.to_string_lossy(), &TokioExecutor).await
}
