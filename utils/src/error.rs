use thiserror::Error;

/// Boxed error accepted by [`Error::with_source`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

/// 工作区通用错误类型
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    #[error("{message}: {source}")]
    WithSource {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Argument error: {0}")]
    Clap(#[from] clap::Error),
}

impl Error {
    pub fn new(message: impl Into<String>) -> Self {
        Error::Message(message.into())
    }

    /// 包装底层错误并附加上下文信息
    pub fn with_source(message: impl Into<String>, source: BoxError) -> Self {
        Error::WithSource {
            message: message.into(),
            source,
        }
    }
}
