//! cfg 模块 - 客户端配置
//!
//! 提供 `Settings` 以及配置文件中人性化时长的解析

pub mod serde_duration;
pub mod settings;

pub use serde_duration::{format_duration, parse_duration, HumanDur};
pub use settings::{
    Settings, DEFAULT_BASE_URL, FALLBACK_REFRESH_INTERVAL, MIN_REFRESH_INTERVAL,
};
