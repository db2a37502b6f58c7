use std::time::Duration;

use crate::cfg::{format_duration, FALLBACK_REFRESH_INTERVAL, MIN_REFRESH_INTERVAL};

/// 刷新循环所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 尚未成功加载过，失败受重试预算约束
    AwaitingFirstLoad,
    /// 已加载成功，失败仅退避不终止
    Steady,
}

/// 刷新循环状态，随刷新任务存活
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefresherState {
    pub phase: Phase,
    /// 首次加载前连续失败次数
    pub retry_counter: usize,
    /// 稳定期轮询间隔
    pub configured_interval: Duration,
}

impl RefresherState {
    pub fn new(configured_interval: Duration) -> Self {
        Self {
            phase: Phase::AwaitingFirstLoad,
            retry_counter: 0,
            configured_interval,
        }
    }

    /// 间隔低于下限时改为兜底值，返回是否发生了修正
    pub fn clamp_interval(&mut self) -> bool {
        if self.configured_interval >= MIN_REFRESH_INTERVAL {
            return false;
        }
        tracing::warn!(
            configured = %format_duration(self.configured_interval),
            fallback = %format_duration(FALLBACK_REFRESH_INTERVAL),
            "wrong refresh interval value, falling back"
        );
        self.configured_interval = FALLBACK_REFRESH_INTERVAL;
        true
    }
}
