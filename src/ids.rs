// src/ids.rs
use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Issues opaque, unique identifiers for store records.
///
/// The prefix only makes ids easier to read in logs; callers must not parse it.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self, prefix: &str) -> String;
}

/// Random v4 UUIDs. Used by the server.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::new_v4().simple())
    }
}

/// Monotonic counter ids (`poll-1`, `opt-2`, ...). Deterministic, so tests can
/// predict every id a store hands out.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{n}")
    }
}
