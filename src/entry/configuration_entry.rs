use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 整型读取的名义默认值，解析失败时不会返回它，而是返回错误
pub const INT_DEFAULT: i64 = 0;

/// 布尔读取的名义默认值，解析失败时不会返回它，而是返回错误
pub const BOOL_DEFAULT: bool = false;

/// 类型化读取错误
///
/// 配置值类型不符属于运维配置错误，不做静默兜底，交由调用方决定如何处理
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("configuration {key:?} is not an integer: {value:?}")]
    InvalidInt { key: String, value: String },
    #[error("configuration {key:?} is not a boolean: {value:?}")]
    InvalidBool { key: String, value: String },
}

/// 一条配置项
///
/// `key` 创建后不再变化；`value` 保存原始文本，整型、布尔视图在读取时按需解析
///
/// # 示例
/// ```
/// use configuse::ConfigurationEntry;
///
/// let entry = ConfigurationEntry::new("max_connections", "128");
/// assert_eq!(entry.as_str(), "128");
/// assert_eq!(entry.as_int().unwrap(), 128);
/// assert!(entry.as_bool().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigurationEntry {
    key: String,
    value: String,
}

impl ConfigurationEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 零值配置项（key 与 value 均为空），表示未找到
    pub fn is_empty(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }

    /// 原始文本值，永不失败
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn as_string(&self) -> String {
        self.value.clone()
    }

    /// 按十进制整数解析，允许前导 `+` / `-`
    pub fn as_int(&self) -> Result<i64, EntryError> {
        self.value
            .parse::<i64>()
            .map_err(|_| EntryError::InvalidInt {
                key: self.key.clone(),
                value: self.value.clone(),
            })
    }

    /// 按布尔解析
    ///
    /// 接受 `1 t T TRUE true True` 与 `0 f F FALSE false False`，其余一律报错
    pub fn as_bool(&self) -> Result<bool, EntryError> {
        match self.value.as_str() {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(EntryError::InvalidBool {
                key: self.key.clone(),
                value: self.value.clone(),
            }),
        }
    }

    /// 同 key 的新版本，key 保持不变
    pub(crate) fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            key: self.key.clone(),
            value: value.into(),
        }
    }
}

impl fmt::Display for ConfigurationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
