//! cache 模块 - 本地配置缓存
//!
//! 单写者（刷新任务）多读者的并发缓存

pub mod config_cache;

pub use config_cache::{CacheReader, ConfigCache, ReconcileReport};
