//! 客户端配置
//!
//! `Settings` 描述从哪个配置中心、哪个项目拉取配置，以及刷新与重试节奏

use anyhow::{anyhow, Result};
use garde::Validate;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::path::Path;
use std::time::Duration;

use super::serde_duration::{serde_as, HumanDur};

/// 默认配置中心地址
pub const DEFAULT_BASE_URL: &str = "https://configuse.tech/api";

/// 刷新间隔的最小合法值，低于该值视为配置错误
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

/// 刷新间隔配置错误时使用的兜底值
pub const FALLBACK_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// 客户端配置
///
/// # 示例
/// ```
/// use configuse::cfg::Settings;
/// use std::time::Duration;
///
/// let settings = Settings::from_json(r#"{
///     project_key: "my-project",
///     refresh_interval: "30s",
///     first_load_retry_count: 5,
/// }"#).unwrap();
///
/// assert_eq!(settings.refresh_interval, Duration::from_secs(30));
/// assert_eq!(settings.first_load_retry_delay, Duration::from_secs(5));
/// ```
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SmartDefault, Validate)]
#[serde(default)]
pub struct Settings {
    /// 项目标识，用于定位远端的配置集合
    #[garde(length(min = 1))]
    pub project_key: String,

    /// 配置中心地址
    #[default(DEFAULT_BASE_URL.to_string())]
    #[garde(length(min = 1))]
    pub base_url: String,

    /// 首次加载成功后的轮询间隔
    #[serde_as(as = "HumanDur")]
    #[default(FALLBACK_REFRESH_INTERVAL)]
    #[garde(skip)]
    pub refresh_interval: Duration,

    /// 首次加载允许失败的次数，超过后视为致命错误
    #[default = 3]
    #[garde(skip)]
    pub first_load_retry_count: usize,

    /// 首次加载失败后的重试间隔
    #[serde_as(as = "HumanDur")]
    #[default(Duration::from_secs(5))]
    #[garde(skip)]
    pub first_load_retry_delay: Duration,

    /// 单次请求超时
    #[serde_as(as = "HumanDur")]
    #[default(Duration::from_secs(30))]
    #[garde(skip)]
    pub request_timeout: Duration,
}

impl Settings {
    pub fn new(project_key: impl Into<String>) -> Self {
        Self {
            project_key: project_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_first_load_retry_count(mut self, count: usize) -> Self {
        self.first_load_retry_count = count;
        self
    }

    pub fn with_first_load_retry_delay(mut self, delay: Duration) -> Self {
        self.first_load_retry_delay = delay;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// 从 JSON 字符串创建（支持 JSON5 格式）
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(json5::from_str(json_str)?)
    }

    /// 从 YAML 字符串创建
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// 从 TOML 字符串创建
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// 从文件加载，按扩展名选择格式（json / json5 / yaml / yml / toml）
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read settings file {}: {}", path.display(), e))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") | Some("json5") => Self::from_json(&content),
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            Some("toml") => Self::from_toml(&content),
            _ => Err(anyhow!("unsupported settings file: {}", path.display())),
        }
    }

    /// 拉取配置的完整地址
    pub fn request_url(&self) -> String {
        format!(
            "{}/configurations/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.project_key
        )
    }
}
