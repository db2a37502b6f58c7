use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// 拉取配置相关错误
///
/// 均为瞬时错误：首次加载前按重试预算重试，稳定期按刷新间隔退避，不会暴露给读者
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected status: {0}")]
    Status(u16),
    #[error("empty response body")]
    EmptyBody,
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("other error: {0}")]
    Other(String),
}

/// 配置中心返回的原始键值对
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawConfiguration {
    pub key: String,
    pub value: String,
}

impl RawConfiguration {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// 配置拉取抽象
///
/// 一次调用对应一次完整的网络往返，返回项目当前的全部配置。
/// 实现方需自带超时，失败时返回 `FetchError` 而不是 panic；
/// 重试时会被重复调用，因此应当是幂等的
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawConfiguration>, FetchError>;
}

#[async_trait]
impl<F> Fetcher for Arc<F>
where
    F: Fetcher + ?Sized,
{
    async fn fetch(&self) -> Result<Vec<RawConfiguration>, FetchError> {
        (**self).fetch().await
    }
}

#[async_trait]
impl<F> Fetcher for Box<F>
where
    F: Fetcher + ?Sized,
{
    async fn fetch(&self) -> Result<Vec<RawConfiguration>, FetchError> {
        (**self).fetch().await
    }
}
