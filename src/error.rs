use thiserror::Error;

use crate::fetcher::FetchError;

/// 客户端错误
///
/// 首次加载耗尽重试属于致命错误，但库内不会终止进程，而是以该类型交给调用方处理
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("invalid settings: {0}")]
    Settings(String),
    #[error("no tokio runtime available to run the refresher")]
    NoRuntime,
    #[error("arrived max retry count before first load after {attempts} attempts: {last_error}")]
    FirstLoadExhausted {
        attempts: usize,
        last_error: FetchError,
    },
    #[error("configuration refresher stopped before first load")]
    Closed,
    #[error("global configuration client already initialized")]
    AlreadyInitialized,
    #[error("global configuration client not initialized")]
    NotInitialized,
}
