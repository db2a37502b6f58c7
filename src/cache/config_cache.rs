use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;

use crate::entry::ConfigurationEntry;
use crate::fetcher::RawConfiguration;

type EntryMap = DashMap<String, ConfigurationEntry>;

/// 一次 reconcile 的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// 首次出现的 key
    pub added: Vec<String>,
    /// 值发生变化的 key
    pub changed: Vec<String>,
    /// 值未变化的条目数
    pub unchanged: usize,
}

impl ReconcileReport {
    /// 本次 reconcile 是否没有改变任何条目
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.changed.is_empty()
    }
}

/// 配置缓存的写端
///
/// 不实现 `Clone`，且 `reconcile` 需要 `&mut self`，由刷新任务独占，
/// 保证任意时刻至多一个写者；读端通过 [`ConfigCache::reader`] 获取
///
/// 底层为 DashMap 分片锁，读者与写者只在同一分片上短暂互斥，单个条目整体替换
pub struct ConfigCache {
    map: Arc<EntryMap>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self {
            map: Arc::new(DashMap::new()),
        }
    }

    /// 获取一个共享读端
    pub fn reader(&self) -> CacheReader {
        CacheReader {
            map: Arc::clone(&self.map),
        }
    }

    /// 将一次拉取结果合并进缓存
    ///
    /// - 新 key：插入并记录 "new configuration found"
    /// - 已有 key 且值不同：整体替换，记录 "configuration value changed"（首次加载时不记录）
    /// - 已有 key 且值相同：忽略
    ///
    /// 本次结果中缺失的旧 key 保留不删
    pub fn reconcile<I>(&mut self, configurations: I, first_load: bool) -> ReconcileReport
    where
        I: IntoIterator<Item = RawConfiguration>,
    {
        let mut report = ReconcileReport::default();

        for RawConfiguration { key, value } in configurations {
            let previous = self.map.get(&key).map(|entry| entry.clone());
            match previous {
                Some(entry) if entry.as_str() == value => {
                    report.unchanged += 1;
                }
                Some(entry) => {
                    if !first_load {
                        tracing::info!(
                            key = %key,
                            new_value = %value,
                            old_value = %entry.as_str(),
                            "configuration value changed"
                        );
                    }
                    self.map.insert(key.clone(), entry.with_value(value));
                    report.changed.push(key);
                }
                None => {
                    tracing::info!(key = %key, value = %value, "new configuration found");
                    self.map
                        .insert(key.clone(), ConfigurationEntry::new(key.clone(), value));
                    report.added.push(key);
                }
            }
        }

        report
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new()
    }
}

/// 配置缓存的读端，可任意克隆并跨线程共享
///
/// 读取为纯内存操作，不涉及网络 IO
#[derive(Clone)]
pub struct CacheReader {
    map: Arc<EntryMap>,
}

impl CacheReader {
    /// 获取配置项，从未出现过的 key 返回零值
    pub fn get(&self, key: &str) -> ConfigurationEntry {
        self.try_get(key).unwrap_or_default()
    }

    pub fn try_get(&self, key: &str) -> Option<ConfigurationEntry> {
        self.map.get(key).map(|entry| entry.clone())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.map.iter().map(|entry| entry.key().clone()).collect()
    }

    /// 当前所有配置的拷贝
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.map
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().as_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use std::thread;
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, Layer};
    use tracing_subscriber::prelude::*;

    /// 收集事件 message 与 key 字段
    #[derive(Clone, Default)]
    struct CaptureLayer {
        events: Arc<Mutex<Vec<(String, String)>>>,
    }

    #[derive(Default)]
    struct EventVisitor {
        message: String,
        key: String,
    }

    impl Visit for EventVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            match field.name() {
                "message" => self.message = format!("{:?}", value),
                "key" => self.key = format!("{:?}", value),
                _ => {}
            }
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = EventVisitor::default();
            event.record(&mut visitor);
            self.events
                .lock()
                .unwrap()
                .push((visitor.message, visitor.key));
        }
    }

    impl CaptureLayer {
        fn take(&self) -> Vec<(String, String)> {
            std::mem::take(&mut *self.events.lock().unwrap())
        }

        fn count(events: &[(String, String)], message: &str, key: &str) -> usize {
            events
                .iter()
                .filter(|(m, k)| m == message && k == key)
                .count()
        }
    }

    fn raw(pairs: &[(&str, &str)]) -> Vec<RawConfiguration> {
        pairs
            .iter()
            .map(|(k, v)| RawConfiguration::new(*k, *v))
            .collect()
    }

    #[test]
    fn test_get_unknown_key_returns_zero_value() {
        let cache = ConfigCache::new();
        let reader = cache.reader();
        assert!(reader.get("missing").is_empty());
        assert!(reader.try_get("missing").is_none());
        assert!(reader.is_empty());
    }

    #[test]
    fn test_reconcile_adds_and_updates() {
        let mut cache = ConfigCache::new();
        let reader = cache.reader();

        let report = cache.reconcile(raw(&[("a", "1")]), true);
        assert_eq!(report.added, vec!["a".to_string()]);
        assert!(report.changed.is_empty());
        assert_eq!(reader.get("a").as_str(), "1");

        let report = cache.reconcile(raw(&[("a", "2"), ("b", "x")]), false);
        assert_eq!(report.added, vec!["b".to_string()]);
        assert_eq!(report.changed, vec!["a".to_string()]);
        assert_eq!(report.unchanged, 0);
        assert_eq!(reader.get("a").as_str(), "2");
        assert_eq!(reader.get("a").key(), "a");
        assert_eq!(reader.get("b").as_str(), "x");
        assert_eq!(reader.len(), 2);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut cache = ConfigCache::new();
        let first = cache.reconcile(raw(&[("a", "1"), ("b", "2")]), true);
        assert!(!first.is_noop());

        let second = cache.reconcile(raw(&[("a", "1"), ("b", "2")]), false);
        assert!(second.is_noop());
        assert_eq!(second.unchanged, 2);
    }

    #[test]
    fn test_reconcile_keeps_absent_keys() {
        let mut cache = ConfigCache::new();
        let reader = cache.reader();
        cache.reconcile(raw(&[("a", "1"), ("b", "2")]), true);
        cache.reconcile(raw(&[("a", "1")]), false);

        assert!(reader.contains("b"));
        assert_eq!(reader.get("b").as_str(), "2");
        let mut keys = reader.keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_reconcile_last_duplicate_wins() {
        let mut cache = ConfigCache::new();
        let report = cache.reconcile(raw(&[("a", "1"), ("a", "2")]), true);
        assert_eq!(report.added, vec!["a".to_string()]);
        assert_eq!(report.changed, vec!["a".to_string()]);
        assert_eq!(cache.reader().get("a").as_str(), "2");
    }

    #[test]
    fn test_reconcile_logs_new_and_changed() {
        let capture = CaptureLayer::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());

        tracing::subscriber::with_default(subscriber, || {
            let mut cache = ConfigCache::new();

            // 首次加载内的重复 key 不记录 changed
            cache.reconcile(raw(&[("a", "1"), ("a", "2")]), true);
            let events = capture.take();
            assert_eq!(CaptureLayer::count(&events, "new configuration found", "a"), 1);
            assert_eq!(CaptureLayer::count(&events, "configuration value changed", "a"), 0);

            // 之后的变化记录 changed，新 key 记录 new
            cache.reconcile(raw(&[("a", "3"), ("b", "x")]), false);
            let events = capture.take();
            assert_eq!(CaptureLayer::count(&events, "configuration value changed", "a"), 1);
            assert_eq!(CaptureLayer::count(&events, "new configuration found", "a"), 0);
            assert_eq!(CaptureLayer::count(&events, "new configuration found", "b"), 1);

            // 值不变不记录任何事件
            cache.reconcile(raw(&[("a", "3"), ("b", "x")]), false);
            assert!(capture.take().is_empty());
        });
    }

    #[test]
    fn test_snapshot() {
        let mut cache = ConfigCache::new();
        cache.reconcile(raw(&[("a", "1"), ("b", "2")]), true);
        let snapshot = cache.reader().snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("a").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_concurrent_readers_never_see_torn_entries() {
        const KEYS: usize = 64;
        let keys: Vec<String> = (0..KEYS).map(|i| format!("key-{}", i)).collect();
        let old: Vec<RawConfiguration> = keys
            .iter()
            .map(|k| RawConfiguration::new(k.clone(), format!("{}=old", k)))
            .collect();
        let new: Vec<RawConfiguration> = keys
            .iter()
            .map(|k| RawConfiguration::new(k.clone(), format!("{}=new", k)))
            .collect();

        let mut cache = ConfigCache::new();
        cache.reconcile(old.clone(), true);

        let done = Arc::new(AtomicBool::new(false));
        let readers: Vec<_> = (0..8)
            .map(|_| {
                let reader = cache.reader();
                let keys = keys.clone();
                let done = Arc::clone(&done);
                thread::spawn(move || {
                    while !done.load(Ordering::Acquire) {
                        for key in &keys {
                            let entry = reader.get(key);
                            assert_eq!(entry.key(), key);
                            let value = entry.as_str();
                            assert!(
                                value == format!("{}=old", key) || value == format!("{}=new", key),
                                "torn value {} for {}",
                                value,
                                key
                            );
                        }
                    }
                })
            })
            .collect();

        for round in 0..200 {
            let batch = if round % 2 == 0 { new.clone() } else { old.clone() };
            cache.reconcile(batch, false);
        }
        done.store(true, Ordering::Release);

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
