//! Identifier generation for newly created pages and blocks.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of fresh identifiers, unique for the life of the process.
pub trait IdGenerator: Send + Sync {
    /// Produce a new id starting with `{prefix}_`.
    fn new_id(&self, prefix: &str) -> String;
}

/// Time-ordered UUIDv7 ids, e.g. `b_0190f1c2...`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn new_id(&self, prefix: &str) -> String {
        format!("{prefix}_{}", Uuid::now_v7().simple())
    }
}

/// Counter-based ids (`p_1`, `b_2`, ...) for deterministic tests.
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
    fn new_id(&self, prefix: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}_{n}")
    }
}
