//! 基于 HTTP 的配置拉取
//!
//! `GET {base_url}/configurations/v1/{project_key}`，响应体为 `[{"key": "...", "value": "..."}]`

use anyhow::Result;
use async_trait::async_trait;
use std::time::Instant;
use uuid::Uuid;

use super::core::{FetchError, Fetcher, RawConfiguration};
use crate::cfg::Settings;

/// 每次请求携带的关联 ID 头
pub const CORRELATION_ID_HEADER: &str = "x-correlationid";
/// 客户端标识头
pub const AGENT_NAME_HEADER: &str = "x-agentname";
/// 客户端标识
pub const AGENT_NAME: &str = "configuse-rust-client";

/// HTTP 配置拉取器
///
/// # 示例
/// ```no_run
/// use configuse::cfg::Settings;
/// use configuse::fetcher::{Fetcher, HttpFetcher};
///
/// # async fn run() -> anyhow::Result<()> {
/// let fetcher = HttpFetcher::new(&Settings::new("my-project"))?;
/// let configurations = fetcher.fetch().await?;
/// # Ok(())
/// # }
/// ```
pub struct HttpFetcher {
    url: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            url: settings.request_url(),
            client: reqwest::Client::builder()
                .timeout(settings.request_timeout)
                .build()?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self) -> Result<Vec<RawConfiguration>, FetchError> {
        let correlation_id = Uuid::new_v4().to_string();
        let start = Instant::now();

        let resp = self
            .client
            .get(&self.url)
            .header(CORRELATION_ID_HEADER, correlation_id.as_str())
            .header(AGENT_NAME_HEADER, AGENT_NAME)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        tracing::debug!(
            url = %self.url,
            correlation_id = %correlation_id,
            status = status.as_u16(),
            elapsed = ?start.elapsed(),
            "configuration request finished"
        );

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(FetchError::EmptyBody);
        }

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
