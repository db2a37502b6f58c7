//! entry 模块 - 配置项及其类型化读取

pub mod configuration_entry;
pub mod env;

pub use configuration_entry::{ConfigurationEntry, EntryError, BOOL_DEFAULT, INT_DEFAULT};
pub use env::get_environment_variable;
