//! fetcher 模块 - 远端配置拉取
//!
//! `Fetcher` 是刷新循环唯一的 IO 依赖，`HttpFetcher` 为默认的 HTTP 实现

pub mod core;
pub mod http_fetcher;

pub use self::core::{FetchError, Fetcher, RawConfiguration};
pub use http_fetcher::{HttpFetcher, AGENT_NAME, AGENT_NAME_HEADER, CORRELATION_ID_HEADER};

#[cfg(test)]
pub(crate) mod testing;
