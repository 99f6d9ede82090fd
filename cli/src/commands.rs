use serde::Serialize;
use std::path::PathBuf;

use app::sync::{compose, resolve_tool, run, SyncRequest};
use utils::app_config::AppConfig;
use utils::error::{Error, Result};

use crate::SyncArgs;

pub async fn sync_cmd(args: SyncArgs) -> Result<()> {
    let config = AppConfig::fetch()?;
    let request = args.into_request(config.rsync.timeout);

    execute(&request, &config.rsync.binary).await
}

pub fn show_cmd(args: SyncArgs) -> Result<()> {
    let config = AppConfig::fetch()?;
    let request = args.into_request(config.rsync.timeout);
    request.validate()?;

    // 与 sync 使用同一个解析后的路径，输出即实际执行的命令
    let tool = resolve_tool(&config.rsync.binary)?;
    println!("{}", compose(&request, tool.to_string_lossy()));
    Ok(())
}

pub async fn run_cmd(job: PathBuf, check: bool) -> Result<()> {
    let config = AppConfig::fetch()?;
    log::info!("Loading job file {}", job.display());

    let mut request = SyncRequest::load(&job)?;
    request.dry_run = check;

    execute(&request, &config.rsync.binary).await
}

/// 执行并以 JSON 输出结果；rsync 失败时同样输出失败信息后返回错误
async fn execute(request: &SyncRequest, binary: &str) -> Result<()> {
    match run(request, binary).await {
        Ok(result) => print_json(&result),
        Err(err) => {
            if let Some(failure) = err.failure() {
                print_json(&failure)?;
            }
            Err(err.into())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| Error::with_source("Failed to serialize result", Box::new(e)))?;
    println!("{}", json);

    Ok(())
}
