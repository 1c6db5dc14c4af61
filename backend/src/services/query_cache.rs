//! Read-through cache for session query results.
//!
//! Keyed by the query's retrieval mode and filter values; the lifecycle
//! manager invalidates affected entries whenever it mutates a session.
//! Purely an optimization: correctness never depends on this cache.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::models::session_view::SessionSummary;
use crate::strategies::RetrievalMode;
use crate::types::{ClassId, StudentId};

/// Cache key: one retrieval mode plus the filter subset it consumed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub mode: RetrievalMode,
    pub class_id: Option<ClassId>,
    pub student_id: Option<StudentId>,
    pub period: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, Vec<SessionSummary>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &QueryKey) -> Option<Vec<SessionSummary>> {
        let entries = self.entries.read().expect("query cache lock poisoned");
        let hit = entries.get(key).cloned();
        tracing::debug!(?key.mode, hit = hit.is_some(), "query cache lookup");
        hit
    }

    pub fn put(&self, key: QueryKey, summaries: Vec<SessionSummary>) {
        let mut entries = self.entries.write().expect("query cache lock poisoned");
        entries.insert(key, summaries);
    }

    /// Drops every entry that could reflect sessions of the given class or
    /// student, including the unfiltered listing.
    pub fn invalidate_for(&self, class_id: ClassId, student_id: StudentId) {
        let mut entries = self.entries.write().expect("query cache lock poisoned");
        let before = entries.len();
        entries.retain(|key, _| {
            let unfiltered = key.class_id.is_none() && key.student_id.is_none();
            let class_hit = key.class_id == Some(class_id);
            let student_hit = key.student_id == Some(student_id);
            !(unfiltered || class_hit || student_hit)
        });
        tracing::debug!(
            %class_id,
            %student_id,
            dropped = before - entries.len(),
            "invalidated cached session queries"
        );
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("query cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
