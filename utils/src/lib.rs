//! Shared plumbing for the rsync-wrap workspace: layered configuration,
//! the workspace error type and slog based logging.

pub mod app_config;
pub mod error;
pub mod logger;
