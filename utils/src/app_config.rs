use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

use super::error::{Error, Result};

/// Prefix of environment variables that override configuration keys,
/// e.g. `RSYNC_WRAP_RSYNC__BINARY=/usr/local/bin/rsync`.
pub const ENV_PREFIX: &str = "RSYNC_WRAP";

lazy_static! {
    static ref BUILDER: RwLock<ConfigBuilder<DefaultState>> = RwLock::new(Config::builder());
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// debug, info, warn, error
    pub level: String,
    /// 日志文件路径，未设置时不写文件
    #[serde(default)]
    pub file: Option<String>,
}

/// rsync 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsyncConfig {
    /// rsync 可执行文件名或路径，通过 PATH 解析
    pub binary: String,
    /// 请求未指定时使用的 --timeout 秒数
    pub timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub log: LogConfig,
    pub rsync: RsyncConfig,
}

impl AppConfig {
    /// Reset the configuration to the given TOML defaults.
    pub fn init(default_config: Option<&str>) -> Result<()> {
        let mut builder = Config::builder();
        if let Some(contents) = default_config {
            builder = builder.add_source(File::from_str(contents, FileFormat::Toml));
        }

        *Self::write()? = builder;
        Ok(())
    }

    /// Layer a user configuration file over the defaults.
    pub fn merge_config(config_file: Option<&str>) -> Result<()> {
        if let Some(path) = config_file {
            let mut guard = Self::write()?;
            let builder = std::mem::take(&mut *guard);
            *guard = builder.add_source(File::with_name(path));
        }

        Ok(())
    }

    /// Apply global command line arguments (`--config`, `--log-level`).
    pub fn merge_args(matches: &clap::ArgMatches) -> Result<()> {
        if let Ok(Some(path)) = matches.try_get_one::<String>("config") {
            Self::merge_config(Some(path))?;
        }

        if let Ok(Some(level)) = matches.try_get_one::<String>("log_level") {
            Self::set("log.level", level)?;
        }

        Ok(())
    }

    /// Override a single key. Overrides win over every source.
    pub fn set(key: &str, value: &str) -> Result<()> {
        let mut guard = Self::write()?;
        let builder = guard.clone().set_override(key, value)?;
        *guard = builder;

        Ok(())
    }

    pub fn get<'de, T>(key: &str) -> Result<T>
    where
        T: Deserialize<'de>,
    {
        Ok(Self::build()?.get::<T>(key)?)
    }

    pub fn fetch() -> Result<AppConfig> {
        Ok(Self::build()?.try_deserialize()?)
    }

    fn build() -> Result<Config> {
        let builder = BUILDER
            .read()
            .map_err(|_| Error::new("Configuration lock poisoned"))?
            .clone();

        Ok(builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?)
    }

    fn write() -> Result<std::sync::RwLockWriteGuard<'static, ConfigBuilder<DefaultState>>> {
        BUILDER
            .write()
            .map_err(|_| Error::new("Configuration lock poisoned"))
    }
}
