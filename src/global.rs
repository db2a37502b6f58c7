//! 全局配置客户端
//!
//! 为只需要一个配置集合的应用提供进程级便捷入口，底层仍是普通的 [`ConfigClient`]。
//! 全局客户端的刷新任务运行在调用 `init` 时所在的 tokio 运行时上

use once_cell::sync::OnceCell;

use crate::cfg::Settings;
use crate::client::ConfigClient;
use crate::entry::ConfigurationEntry;
use crate::error::ClientError;
use crate::fetcher::Fetcher;

static GLOBAL_CLIENT: OnceCell<ConfigClient> = OnceCell::new();

/// 初始化全局客户端，重复调用返回 `AlreadyInitialized`
pub fn init(settings: Settings) -> Result<&'static ConfigClient, ClientError> {
    if GLOBAL_CLIENT.get().is_some() {
        return Err(ClientError::AlreadyInitialized);
    }
    install(ConfigClient::init(settings)?)
}

/// 使用自定义拉取器初始化全局客户端
pub fn init_with_fetcher<F>(
    settings: &Settings,
    fetcher: F,
) -> Result<&'static ConfigClient, ClientError>
where
    F: Fetcher + 'static,
{
    if GLOBAL_CLIENT.get().is_some() {
        return Err(ClientError::AlreadyInitialized);
    }
    install(ConfigClient::with_fetcher(settings, fetcher)?)
}

fn install(client: ConfigClient) -> Result<&'static ConfigClient, ClientError> {
    GLOBAL_CLIENT
        .set(client)
        .map_err(|_| ClientError::AlreadyInitialized)?;
    GLOBAL_CLIENT.get().ok_or(ClientError::NotInitialized)
}

pub fn client() -> Option<&'static ConfigClient> {
    GLOBAL_CLIENT.get()
}

/// 读取全局配置，未初始化或 key 不存在时返回零值
pub fn get(key: &str) -> ConfigurationEntry {
    GLOBAL_CLIENT
        .get()
        .map(|client| client.get(key))
        .unwrap_or_default()
}

pub fn is_initialized() -> bool {
    GLOBAL_CLIENT
        .get()
        .map(ConfigClient::is_initialized)
        .unwrap_or(false)
}

/// 等待全局客户端首次加载完成
pub async fn wait_initialized() -> Result<(), ClientError> {
    GLOBAL_CLIENT
        .get()
        .ok_or(ClientError::NotInitialized)?
        .wait_initialized()
        .await
}
