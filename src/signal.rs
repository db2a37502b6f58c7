//! 首次加载信号
//!
//! 一次性闸门：首次加载成功后打开，之后永不重置；任意数量的等待者都能观察到

use tokio::sync::watch;

use crate::error::ClientError;

/// 首次加载状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// 尚未成功加载
    Pending,
    /// 已完成首次加载
    Loaded,
    /// 首次加载前刷新循环已致命失败
    Failed(ClientError),
}

/// 信号的触发端，由刷新循环持有
///
/// 触发端被 drop 时，仍在等待的一方会收到 `ClientError::Closed`
pub struct InitializationSignal {
    tx: watch::Sender<LoadStatus>,
}

/// 信号的等待端，可任意克隆
#[derive(Clone)]
pub struct InitializationWaiter {
    rx: watch::Receiver<LoadStatus>,
}

impl InitializationSignal {
    pub fn channel() -> (Self, InitializationWaiter) {
        let (tx, rx) = watch::channel(LoadStatus::Pending);
        (Self { tx }, InitializationWaiter { rx })
    }

    /// 标记首次加载完成，仅第一次调用返回 true
    pub fn fire(&self) -> bool {
        self.tx.send_if_modified(|status| match status {
            LoadStatus::Pending => {
                *status = LoadStatus::Loaded;
                true
            }
            _ => false,
        })
    }

    /// 标记首次加载失败，已加载成功后调用无效
    pub fn fail(&self, error: ClientError) -> bool {
        self.tx.send_if_modified(|status| match status {
            LoadStatus::Pending => {
                *status = LoadStatus::Failed(error);
                true
            }
            _ => false,
        })
    }
}

impl InitializationWaiter {
    pub fn is_initialized(&self) -> bool {
        matches!(*self.rx.borrow(), LoadStatus::Loaded)
    }

    pub fn status(&self) -> LoadStatus {
        self.rx.borrow().clone()
    }

    /// 等待首次加载结束
    ///
    /// 已加载返回 `Ok(())`；刷新循环致命失败返回对应错误；触发端被提前 drop 返回 `Closed`
    pub async fn wait(&self) -> Result<(), ClientError> {
        let mut rx = self.rx.clone();
        let status = rx
            .wait_for(|status| !matches!(status, LoadStatus::Pending))
            .await
            .map(|status| status.clone())
            .map_err(|_| ClientError::Closed)?;

        match status {
            LoadStatus::Failed(error) => Err(error),
            _ => Ok(()),
        }
    }
}
