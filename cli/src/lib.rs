use clap::builder::BoolishValueParser;
use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::path::PathBuf;

use app::sync::{SyncMode, SyncRequest};
use utils::app_config::AppConfig;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "rsync-wrap", version)]
#[command(about = "Compose, run and report an rsync invocation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set the logging level (debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run rsync with the given options and print the JSON result
    Sync(SyncArgs),

    /// Print the rsync command line without running it
    Show(SyncArgs),

    /// Run the request described by a TOML job file
    Run {
        /// Job file path
        job: PathBuf,

        /// Pass --dry-run to rsync
        #[arg(long)]
        check: bool,
    },
}

/// rsync 选项，名称与作业文件中的键一致
#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    /// Source path, local or `host:path`
    #[arg(long)]
    pub src: String,

    /// Destination path, local or `host:path`
    #[arg(long)]
    pub dest: String,

    /// Transfer direction (push, pull). Informational only
    #[arg(long, default_value = "push")]
    pub mode: SyncMode,

    /// Delete extraneous files on the receiver after the transfer
    #[arg(long)]
    pub delete: bool,

    /// Do not pass --archive
    #[arg(long)]
    pub no_archive: bool,

    /// Transfer directories without recursing
    #[arg(long)]
    pub dirs: bool,

    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub recursive: Option<bool>,

    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub links: Option<bool>,

    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub perms: Option<bool>,

    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub times: Option<bool>,

    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub owner: Option<bool>,

    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub group: Option<bool>,

    /// rsync I/O timeout in seconds [default: rsync.timeout from config]
    #[arg(long, value_name = "SECS")]
    pub rsync_timeout: Option<u64>,

    /// SSH private key passed to ssh with -i
    #[arg(long, value_name = "PATH")]
    pub private_key: Option<String>,

    /// Path of rsync on the remote host
    #[arg(long, value_name = "PATH")]
    pub rsync_path: Option<String>,

    /// Pass --dry-run to rsync
    #[arg(long)]
    pub check: bool,
}

impl SyncArgs {
    pub fn into_request(self, default_timeout: u64) -> SyncRequest {
        SyncRequest {
            source: self.src,
            destination: self.dest,
            mode: self.mode,
            delete: self.delete,
            private_key: self.private_key,
            remote_tool_path: self.rsync_path,
            archive: !self.no_archive,
            dirs_only: self.dirs,
            recursive: self.recursive,
            links: self.links,
            perms: self.perms,
            times: self.times,
            owner: self.owner,
            group: self.group,
            timeout_seconds: self.rsync_timeout.unwrap_or(default_timeout),
            dry_run: self.check,
        }
    }
}

pub async fn cli_match() -> utils::error::Result<()> {
    let matches = Cli::command().get_matches();
    AppConfig::merge_args(&matches)?;
    let cli = Cli::from_arg_matches(&matches)?;

    // 日志依赖 --config / --log-level，解析参数后再初始化
    let _guard = utils::logger::setup_logging()?;

    match cli.command {
        Commands::Sync(args) => commands::sync_cmd(args).await?,
        Commands::Show(args) => commands::show_cmd(args)?,
        Commands::Run { job, check } => commands::run_cmd(job, check).await?,
    }

    Ok(())
}
