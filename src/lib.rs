//! configuse - 远程配置中心客户端
//!
//! 从配置中心拉取项目的键值配置，缓存在本地，并通过后台轮询保持最新。
//! 业务代码只通过同步接口读取本地缓存，从不直接访问网络。
//!
//! ## 模块
//!
//! - **cfg**: 客户端配置 `Settings`（支持 JSON5 / YAML / TOML）
//! - **entry**: 配置项与类型化读取，环境变量读取
//! - **fetcher**: 远端拉取抽象与默认 HTTP 实现
//! - **cache**: 单写者多读者的并发缓存
//! - **refresher**: 首次加载重试与稳定期轮询的状态机
//! - **signal**: 首次加载完成信号
//! - **client**: 组合以上部件的配置客户端
//! - **global**: 可选的进程级全局客户端
//!
//! ## 快速开始
//!
//! ```rust,no_run
//! use configuse::{ConfigClient, Settings};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::from_json(r#"{
//!         project_key: "my-project",
//!         refresh_interval: "30s",
//!         first_load_retry_count: 3,
//!     }"#)?;
//!
//!     let client = ConfigClient::init(settings)?;
//!     client.wait_initialized().await?;
//!
//!     let pool_size = client.get("db.pool_size").as_int()?;
//!     println!("pool size: {}", pool_size);
//!     Ok(())
//! }
//! ```
//!
//! ## 失败语义
//!
//! - 首次加载前失败：按固定间隔重试，超过重试预算后返回 `ClientError::FirstLoadExhausted`
//! - 首次加载后失败：保留已缓存的值，按刷新间隔继续轮询
//! - 类型不符：`as_int` / `as_bool` 返回 `EntryError`，不做静默兜底

pub mod cache;
pub mod cfg;
pub mod client;
pub mod entry;
pub mod error;
pub mod fetcher;
pub mod global;
pub mod refresher;
pub mod signal;

// 重新导出主要的公共 API
pub use cache::{CacheReader, ConfigCache, ReconcileReport};
pub use cfg::Settings;
pub use client::ConfigClient;
pub use entry::{get_environment_variable, ConfigurationEntry, EntryError};
pub use error::ClientError;
pub use fetcher::{FetchError, Fetcher, HttpFetcher, RawConfiguration};
pub use refresher::{Phase, Refresher, RefresherState};
pub use signal::{InitializationSignal, InitializationWaiter, LoadStatus};
