//! 环境变量读取
//!
//! 将进程环境变量包装为 `ConfigurationEntry`，便于本地覆盖配置时复用同一套类型化读取

use super::configuration_entry::ConfigurationEntry;

/// 读取环境变量，不存在或非 UTF-8 时值为空字符串
///
/// # 示例
/// ```no_run
/// use configuse::get_environment_variable;
///
/// let port = get_environment_variable("PORT").as_int();
/// ```
pub fn get_environment_variable(name: &str) -> ConfigurationEntry {
    ConfigurationEntry::new(name, std::env::var(name).unwrap_or_default())
}
