use app::sync::{
    run, sync, CommandLine, Executor, ProcessOutput, SyncError, SyncRequest, TokioExecutor,
    CHANGE_SENTINEL,
};
use async_trait::async_trait;
use std::sync::Mutex;

/// 返回预设输出并记录收到的命令
struct ScriptedExecutor {
    output: ProcessOutput,
    seen: Mutex<Vec<CommandLine>>,
}

impl ScriptedExecutor {
    fn new(exit_code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            output: ProcessOutput {
                exit_code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Executor for ScriptedExecutor {
    async fn execute(&self, command: &CommandLine) -> app::sync::Result<ProcessOutput> {
        self.seen.lock().unwrap().push(command.clone());
        Ok(self.output.clone())
    }
}

#[tokio::test]
async fn test_sync_reports_change() {
    let _ = env_logger::builder().is_test(true).try_init();

    let executor = ScriptedExecutor::new(
        0,
        "<<CHANGED>>>f+++++++++ index.html\n<<CHANGED>>>f.st...... app.css\n",
        "",
    );
    let request = SyncRequest {
        delete: true,
        ..SyncRequest::new("a/", "/b")
    };

    let result = sync(&request, "rsync", &executor).await.unwrap();

    assert!(result.changed);
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.message.matches(CHANGE_SENTINEL).count(), 0);
    assert!(result.message.contains("index.html"));

    let seen = executor.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(result.command_line, seen[0].to_string());
    assert!(result.command_line.starts_with(
        "rsync --delay-updates --compress --timeout=10 --delete-after --archive --rsh "
    ));
    assert!(result.command_line.ends_with(" a/ /b"));
}

#[tokio::test]
async fn test_sync_without_change() {
    let executor = ScriptedExecutor::new(0, "", "");

    let result = sync(&SyncRequest::new("a/", "/b"), "rsync", &executor)
        .await
        .unwrap();

    assert!(!result.changed);
    assert!(result.message.is_empty());
}

#[tokio::test]
async fn test_sync_execution_failure() {
    let executor = ScriptedExecutor::new(23, "", "rsync: link_stat \"/nope\" failed");

    let err = sync(&SyncRequest::new("/nope", "/b"), "rsync", &executor)
        .await
        .unwrap_err();

    match &err {
        SyncError::Execution { rc, stderr, cmd } => {
            assert_eq!(*rc, 23);
            assert_eq!(stderr, "rsync: link_stat \"/nope\" failed");
            assert!(cmd.ends_with("/nope /b"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.failure().unwrap().rc, 23);
}

#[tokio::test]
async fn test_sync_rejects_invalid_request_before_executing() {
    let executor = ScriptedExecutor::new(0, "", "");

    let err = sync(&SyncRequest::new("", "/b"), "rsync", &executor)
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::InvalidRequest(_)));
    assert!(err.failure().is_none());
    assert!(executor.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_dry_run_reaches_command() {
    let executor = ScriptedExecutor::new(0, "", "");
    let request = SyncRequest {
        dry_run: true,
        ..SyncRequest::new("a/", "/b")
    };

    sync(&request, "rsync", &executor).await.unwrap();

    assert!(executor.seen.lock().unwrap()[0].contains("--dry-run"));
}

#[tokio::test]
async fn test_run_unknown_binary() {
    let err = run(
        &SyncRequest::new("a/", "/b"),
        "rsync-wrap-definitely-not-installed",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, SyncError::ToolNotFound { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn test_tokio_executor_captures_output() {
    let mut command = CommandLine::new("sh");
    command
        .arg("-c")
        .arg("echo out; echo err >&2; exit 3");

    let output = TokioExecutor.execute(&command).await.unwrap();

    assert_eq!(output.exit_code, 3);
    assert_eq!(output.stdout, "out\n");
    assert_eq!(output.stderr, "err\n");
}

#[tokio::test]
async fn test_tokio_executor_spawn_failure() {
    let command = CommandLine::new("/nonexistent/rsync-wrap/rsync");

    let err = TokioExecutor.execute(&command).await.unwrap_err();

    assert!(matches!(err, SyncError::Spawn { .. }));
}
