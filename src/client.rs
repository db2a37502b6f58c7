//! 配置客户端
//!
//! 组合缓存、首次加载信号与后台刷新任务，对外只暴露同步读取接口

use garde::Validate;
use tokio::task::JoinHandle;

use crate::cache::{CacheReader, ConfigCache};
use crate::cfg::Settings;
use crate::entry::ConfigurationEntry;
use crate::error::ClientError;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::refresher::Refresher;
use crate::signal::{InitializationSignal, InitializationWaiter};

/// 配置客户端
///
/// 每个实例拥有独立的缓存和一个后台刷新任务，多个实例可以共存；
/// 实例 drop 时后台任务随之停止
///
/// # 示例
/// ```no_run
/// use configuse::{ConfigClient, Settings};
/// use std::time::Duration;
///
/// # async fn run() -> Result<(), configuse::ClientError> {
/// let client = ConfigClient::init(
///     Settings::new("my-project").with_refresh_interval(Duration::from_secs(30)),
/// )?;
///
/// // 首次加载完成前阻塞启动流程
/// client.wait_initialized().await?;
///
/// let enabled = client.get("feature.enabled").as_bool();
/// # Ok(())
/// # }
/// ```
pub struct ConfigClient {
    reader: CacheReader,
    waiter: InitializationWaiter,
    task: JoinHandle<Result<(), ClientError>>,
}

impl ConfigClient {
    /// 使用 HTTP 拉取器启动客户端，需在 tokio 运行时内调用
    pub fn init(settings: Settings) -> Result<Self, ClientError> {
        settings
            .validate()
            .map_err(|e| ClientError::Settings(e.to_string()))?;
        let fetcher =
            HttpFetcher::new(&settings).map_err(|e| ClientError::Settings(e.to_string()))?;
        Self::with_fetcher(&settings, fetcher)
    }

    /// 使用自定义拉取器启动客户端，需在 tokio 运行时内调用
    pub fn with_fetcher<F>(settings: &Settings, fetcher: F) -> Result<Self, ClientError>
    where
        F: Fetcher + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| ClientError::NoRuntime)?;

        let cache = ConfigCache::new();
        let reader = cache.reader();
        let (signal, waiter) = InitializationSignal::channel();
        let refresher = Refresher::new(settings, fetcher, cache, signal);
        let task = runtime.spawn(refresher.run());

        Ok(Self {
            reader,
            waiter,
            task,
        })
    }

    /// 读取配置，从未出现过的 key 返回零值
    pub fn get(&self, key: &str) -> ConfigurationEntry {
        self.reader.get(key)
    }

    pub fn try_get(&self, key: &str) -> Option<ConfigurationEntry> {
        self.reader.try_get(key)
    }

    /// 缓存读端，可交给其他组件独立持有
    pub fn reader(&self) -> CacheReader {
        self.reader.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.waiter.is_initialized()
    }

    /// 首次加载信号的等待端
    pub fn initialization(&self) -> InitializationWaiter {
        self.waiter.clone()
    }

    /// 等待首次加载完成；首次加载重试耗尽时返回 `FirstLoadExhausted`
    pub async fn wait_initialized(&self) -> Result<(), ClientError> {
        self.waiter.wait().await
    }

    /// 后台刷新任务是否仍在运行
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for ConfigClient {
    fn drop(&mut self) {
        self.task.abort();
    }
}
