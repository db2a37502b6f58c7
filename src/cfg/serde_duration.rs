//! 人性化时长的 serde 适配
//!
//! 配置文件中的刷新间隔、超时等字段以 "30s"、"1m30s"、"500ms" 的形式书写

use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

pub use serde_with::serde_as;
use serde_with::{DeserializeAs, SerializeAs};

/// Duration 的人性化格式化器，配合 `#[serde_as(as = "HumanDur")]` 使用
///
/// 支持单位: ns / us / ms / s / m / h / d，可组合书写，如 "1h30m"
pub struct HumanDur;

impl SerializeAs<Duration> for HumanDur {
    fn serialize_as<S>(source: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_duration(*source))
    }
}

impl<'de> DeserializeAs<'de, Duration> for HumanDur {
    fn deserialize_as<D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

/// 单位 -> 纳秒
fn unit_nanos(unit: &str) -> Option<f64> {
    let nanos = match unit {
        "ns" => 1.0,
        "us" | "μs" => 1e3,
        "ms" => 1e6,
        "s" => 1e9,
        "m" => 60.0 * 1e9,
        "h" => 3600.0 * 1e9,
        "d" => 86400.0 * 1e9,
        _ => return None,
    };
    Some(nanos)
}

/// 解析时间字符串: "1m30s" -> Duration
///
/// 纯数字 "0" 视为零时长，其余数字必须带单位
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return Err(anyhow!("empty duration string"));
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total = 0f64;
    let mut rest = s.as_str();
    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if num_len == 0 {
            return Err(anyhow!("expected number in duration: {}", s));
        }
        let (num, tail) = rest.split_at(num_len);
        let value: f64 = num
            .parse()
            .map_err(|_| anyhow!("invalid number in duration: {}", num))?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        if unit.is_empty() {
            return Err(anyhow!("missing unit in duration: {}", s));
        }
        let nanos = unit_nanos(unit).ok_or_else(|| anyhow!("unsupported duration unit: {}", unit))?;

        total += value * nanos;
        rest = tail;
    }

    let total = total.round();
    if total >= u64::MAX as f64 {
        return Err(anyhow!("duration out of range: {}", s));
    }
    Ok(Duration::from_nanos(total as u64))
}

/// Duration 格式化为字符串: Duration -> "1m30s"
pub fn format_duration(duration: Duration) -> String {
    if duration.is_zero() {
        return "0s".to_string();
    }

    let secs = duration.as_secs();
    let nanos = duration.subsec_nanos();
    if secs == 0 {
        return match nanos {
            n if n % 1_000_000 == 0 => format!("{}ms", n / 1_000_000),
            n if n % 1_000 == 0 => format!("{}us", n / 1_000),
            n => format!("{}ns", n),
        };
    }

    let mut out = String::new();
    let mut remaining = secs;
    for (unit, size) in [("d", 86400), ("h", 3600), ("m", 60)] {
        if remaining >= size {
            out.push_str(&format!("{}{}", remaining / size, unit));
            remaining %= size;
        }
    }
    if remaining > 0 || nanos > 0 {
        if nanos > 0 && nanos % 1_000_000 == 0 {
            out.push_str(&format!("{}s{}ms", remaining, nanos / 1_000_000));
        } else if nanos > 0 {
            out.push_str(&format!("{}s{}ns", remaining, nanos));
        } else {
            out.push_str(&format!("{}s", remaining));
        }
    }
    out
}
