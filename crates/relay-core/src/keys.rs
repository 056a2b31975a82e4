//! Object key generation and staging paths.
//!
//! Key format depends on the pipeline variant:
//!
//! - **Simple**: `{name}_{uuid}.zip`
//! - **Extended**: `{name}/{name}_{n}.zip`, where `n` comes from an injected
//!   per-name [`UploadCounter`] starting at 1.
//!
//! The in-memory counter lives as long as the process. A recycled process starts
//! over at 1, so sequential keys are only unique within one running instance.

use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::constants::ARCHIVE_EXTENSION;

/// Destination identifier within the bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ObjectKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Per-name monotonically increasing upload counter.
pub trait UploadCounter: Send + Sync {
    /// Return the next value for `name`. The first call for a name returns 1.
    fn next(&self, name: &str) -> u64;

    /// Forget every name.
    fn reset(&self);
}

/// Process-local counter guarded by a mutex, so concurrent invocations in one
/// process never observe the same value for the same name.
#[derive(Debug, Default)]
pub struct InMemoryUploadCounter {
    counts: Mutex<HashMap<String, u64>>,
}

impl InMemoryUploadCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UploadCounter for InMemoryUploadCounter {
    fn next(&self, name: &str) -> u64 {
        let mut counts = self
            .counts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let count = counts.entry(name.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    fn reset(&self) {
        self.counts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

/// Strategy for deriving a destination key from the submitter name.
pub trait KeyStrategy: Send + Sync {
    fn next_key(&self, name: &str) -> ObjectKey;
}

/// `{name}_{uuid}.zip`
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomKeyStrategy;

impl KeyStrategy for RandomKeyStrategy {
    fn next_key(&self, name: &str) -> ObjectKey {
        ObjectKey(format!("{}_{}.{}", name, Uuid::new_v4(), ARCHIVE_EXTENSION))
    }
}

/// `{name}/{name}_{n}.zip`
#[derive(Clone)]
pub struct SequentialKeyStrategy {
    counter: Arc<dyn UploadCounter>,
}

impl SequentialKeyStrategy {
    pub fn new(counter: Arc<dyn UploadCounter>) -> Self {
        Self { counter }
    }
}

impl KeyStrategy for SequentialKeyStrategy {
    fn next_key(&self, name: &str) -> ObjectKey {
        let n = self.counter.next(name);
        ObjectKey(format!("{}/{}_{}.{}", name, name, n, ARCHIVE_EXTENSION))
    }
}

/// Generate a unique staging path for a submission inside `scratch_dir`.
///
/// The name is reduced to `[A-Za-z0-9_-]` so it cannot escape the scratch directory.
pub fn staging_path(scratch_dir: &Path, name: &str) -> PathBuf {
    let safe_name: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    scratch_dir.join(format!(
        "{}_{}.{}",
        safe_name,
        Uuid::new_v4(),
        ARCHIVE_EXTENSION
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_keys_increase_per_name() {
        let strategy = SequentialKeyStrategy::new(Arc::new(InMemoryUploadCounter::new()));

        assert_eq!(strategy.next_key("alice").as_str(), "alice/alice_1.zip");
        assert_eq!(strategy.next_key("alice").as_str(), "alice/alice_2.zip");
        assert_eq!(strategy.next_key("bob").as_str(), "bob/bob_1.zip");
        assert_eq!(strategy.next_key("alice").as_str(), "alice/alice_3.zip");
    }

    #[test]
    fn test_counter_reset() {
        let counter = Arc::new(InMemoryUploadCounter::new());
        let strategy = SequentialKeyStrategy::new(counter.clone());

        strategy.next_key("alice");
        strategy.next_key("alice");
        counter.reset();

        assert_eq!(strategy.next_key("alice").as_str(), "alice/alice_1.zip");
    }

    #[test]
    fn test_counter_is_safe_across_threads() {
        let counter = Arc::new(InMemoryUploadCounter::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = counter.clone();
                std::thread::spawn(move || {
                    (0..100).map(|_| counter.next("alice")).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut values: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        values.sort_unstable();
        values.dedup();

        assert_eq!(values.len(), 800);
        assert_eq!(counter.next("alice"), 801);
    }

    #[test]
    fn test_random_keys_are_name_prefixed_and_unique() {
        let strategy = RandomKeyStrategy;
        let a = strategy.next_key("alice");
        let b = strategy.next_key("alice");

        assert!(a.as_str().starts_with("alice_"));
        assert!(a.as_str().ends_with(".zip"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_staging_path_stays_in_scratch_dir() {
        let dir = Path::new("/tmp/relay");
        let path = staging_path(dir, "../../etc/passwd");

        assert_eq!(path.parent(), Some(dir));
        let file_name = path.file_name().unwrap().to_str().unwrap();
        assert!(file_name.starts_with("______etc_passwd_"));
        assert!(file_name.ends_with(".zip"));
    }

    #[test]
    fn test_staging_paths_are_unique() {
        let dir = Path::new("/tmp");
        assert_ne!(staging_path(dir, "alice"), staging_path(dir, "alice"));
    }
}
