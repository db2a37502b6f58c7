use backon::{BackoffBuilder, ConstantBackoff, ConstantBuilder};
use std::time::Duration;

use super::state::{Phase, RefresherState};
use crate::cache::ConfigCache;
use crate::cfg::{format_duration, Settings};
use crate::error::ClientError;
use crate::fetcher::{FetchError, Fetcher, RawConfiguration};
use crate::signal::InitializationSignal;

/// 配置刷新循环
///
/// 独占缓存写端与首次加载信号，每轮调用一次 `Fetcher`，根据结果决定下一次等待多久：
///
/// | 阶段 | 成功 | 失败 |
/// |------|------|------|
/// | AwaitingFirstLoad | 合并、触发信号、修正间隔、进入 Steady | 重试预算内等待重试间隔，否则致命 |
/// | Steady | 合并后等待刷新间隔 | 保留旧缓存，等待刷新间隔 |
///
/// 首次加载前的重试节奏由 backon 的固定间隔退避提供，`max_times` 即重试预算
pub struct Refresher<F> {
    fetcher: F,
    cache: ConfigCache,
    signal: InitializationSignal,
    state: RefresherState,
    first_load_backoff: ConstantBackoff,
}

impl<F> Refresher<F>
where
    F: Fetcher,
{
    pub fn new(
        settings: &Settings,
        fetcher: F,
        cache: ConfigCache,
        signal: InitializationSignal,
    ) -> Self {
        let first_load_backoff = ConstantBuilder::default()
            .with_delay(settings.first_load_retry_delay)
            .with_max_times(settings.first_load_retry_count)
            .build();

        Self {
            fetcher,
            cache,
            signal,
            state: RefresherState::new(settings.refresh_interval),
            first_load_backoff,
        }
    }

    pub fn state(&self) -> &RefresherState {
        &self.state
    }

    /// 执行一轮拉取，返回下一轮之前应等待的时长；首次加载重试耗尽时返回错误
    pub async fn poll_once(&mut self) -> Result<Duration, ClientError> {
        match self.fetcher.fetch().await {
            Ok(configurations) => Ok(self.on_success(configurations)),
            Err(err) => self.on_failure(err),
        }
    }

    /// 持续刷新，只在首次加载重试耗尽时返回
    pub async fn run(mut self) -> Result<(), ClientError> {
        loop {
            let delay = self.poll_once().await?;
            tokio::time::sleep(delay).await;
        }
    }

    fn on_success(&mut self, configurations: Vec<RawConfiguration>) -> Duration {
        let first_load = self.state.phase == Phase::AwaitingFirstLoad;
        let report = self.cache.reconcile(configurations, first_load);

        if first_load {
            self.signal.fire();
            self.state.clamp_interval();
            self.state.phase = Phase::Steady;
            tracing::info!(
                added = report.added.len(),
                retries = self.state.retry_counter,
                interval = %format_duration(self.state.configured_interval),
                "first configuration load completed"
            );
        } else if !report.is_noop() {
            tracing::debug!(
                added = report.added.len(),
                changed = report.changed.len(),
                "configurations refreshed"
            );
        }

        self.state.configured_interval
    }

    fn on_failure(&mut self, err: FetchError) -> Result<Duration, ClientError> {
        match self.state.phase {
            Phase::AwaitingFirstLoad => {
                self.state.retry_counter += 1;
                match self.first_load_backoff.next() {
                    Some(delay) => {
                        tracing::warn!(
                            error = %err,
                            retry_counter = self.state.retry_counter,
                            retry_in = %format_duration(delay),
                            "configurations didn't update before first load"
                        );
                        Ok(delay)
                    }
                    None => {
                        let fatal = ClientError::FirstLoadExhausted {
                            attempts: self.state.retry_counter,
                            last_error: err,
                        };
                        tracing::error!(error = %fatal, "giving up first configuration load");
                        self.signal.fail(fatal.clone());
                        Err(fatal)
                    }
                }
            }
            Phase::Steady => {
                tracing::warn!(
                    error = %err,
                    retry_in = %format_duration(self.state.configured_interval),
                    "configurations didn't update, keeping cached values"
                );
                Ok(self.state.configured_interval)
            }
        }
    }
}
