//! 测试用的脚本化 Fetcher

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::core::{FetchError, Fetcher, RawConfiguration};

pub(crate) type FetchResult = Result<Vec<RawConfiguration>, FetchError>;

/// 按顺序返回预设结果，脚本耗尽后一直返回 `fallback`
pub(crate) struct ScriptedFetcher {
    script: Mutex<VecDeque<FetchResult>>,
    fallback: FetchResult,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub(crate) fn new(script: Vec<FetchResult>, fallback: FetchResult) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn always_failing() -> Self {
        Self::new(Vec::new(), Err(FetchError::Request("connection refused".to_string())))
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub(crate) fn ok(pairs: &[(&str, &str)]) -> FetchResult {
    Ok(pairs
        .iter()
        .map(|(k, v)| RawConfiguration::new(*k, *v))
        .collect())
}

pub(crate) fn fail() -> FetchResult {
    Err(FetchError::Status(503))
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self) -> FetchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }
}
