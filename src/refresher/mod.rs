//! refresher 模块 - 后台刷新循环
//!
//! 首次加载重试与稳定期轮询的状态机

pub mod refresh_loop;
pub mod state;

pub use refresh_loop::Refresher;
pub use state::{Phase, RefresherState};
