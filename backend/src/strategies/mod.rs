//! Retrieval strategies for listing practice sessions.
//!
//! The five retrieval modes form a closed set, dispatched through an
//! exhaustive match so a new mode cannot be added without the compiler
//! pointing at every call site. Unknown mode *names* (from the HTTP
//! layer's query string) are rejected at parse time with
//! `UnknownStrategy`.
//!
//! Every strategy returns sessions ordered by `started_at` descending;
//! the stores uphold that and the integration tests verify it.

mod all_sessions;
mod by_class;
mod by_class_and_period;
mod my_open;
mod open_by_class;

pub use all_sessions::AllSessionsStrategy;
pub use by_class::ByClassStrategy;
pub use by_class_and_period::ByClassAndPeriodStrategy;
pub use my_open::MyOpenStrategy;
pub use open_by_class::OpenByClassStrategy;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::session_view::{SessionDetail, SessionSummary};
use crate::repositories::session_repository::SessionRepositoryTrait;
use crate::services::projection::ProjectionService;
use crate::services::query_cache::{QueryCache, QueryKey};
use crate::types::{ClassId, SessionId, StudentId};

/// The closed set of ways sessions can be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RetrievalMode {
    All,
    ByClass,
    OpenByClass,
    MyOpen,
    ByClassAndPeriod,
}

impl RetrievalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RetrievalMode::All => "ALL",
            RetrievalMode::ByClass => "BY_CLASS",
            RetrievalMode::OpenByClass => "OPEN_BY_CLASS",
            RetrievalMode::MyOpen => "MY_OPEN",
            RetrievalMode::ByClassAndPeriod => "BY_CLASS_AND_PERIOD",
        }
    }
}

impl fmt::Display for RetrievalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetrievalMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(RetrievalMode::All),
            "BY_CLASS" => Ok(RetrievalMode::ByClass),
            "OPEN_BY_CLASS" => Ok(RetrievalMode::OpenByClass),
            "MY_OPEN" => Ok(RetrievalMode::MyOpen),
            "BY_CLASS_AND_PERIOD" => Ok(RetrievalMode::ByClassAndPeriod),
            other => Err(AppError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Loosely-typed filter bundle. Each strategy consumes only the subset it
/// needs and rejects a missing required field with `MissingParameter`.
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub class_id: Option<ClassId>,
    /// For `MyOpen`, the caller's own student identity as resolved by the
    /// excluded auth layer.
    pub student_id: Option<StudentId>,
    pub period_start: Option<DateTime<Utc>>,
    pub period_end: Option<DateTime<Utc>>,
}

impl SessionFilter {
    pub fn by_class(class_id: ClassId) -> Self {
        Self {
            class_id: Some(class_id),
            ..Self::default()
        }
    }

    pub fn for_student(student_id: StudentId) -> Self {
        Self {
            student_id: Some(student_id),
            ..Self::default()
        }
    }

    pub fn by_class_and_period(
        class_id: ClassId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            class_id: Some(class_id),
            period_start: Some(start),
            period_end: Some(end),
            ..Self::default()
        }
    }
}

/// One way of fetching and projecting sessions.
#[async_trait]
pub trait SessionListStrategy: Send + Sync {
    fn mode(&self) -> RetrievalMode;

    async fn execute(&self, filter: &SessionFilter) -> Result<Vec<SessionSummary>, AppError>;
}

/// Entry point for all session read paths. Dispatches a retrieval mode to
/// its strategy and caches results read-through; the lifecycle manager
/// invalidates the cache on every mutation.
pub struct SessionQueries {
    sessions: Arc<dyn SessionRepositoryTrait>,
    projection: ProjectionService,
    cache: Arc<QueryCache>,
    all: AllSessionsStrategy,
    by_class: ByClassStrategy,
    open_by_class: OpenByClassStrategy,
    my_open: MyOpenStrategy,
    by_class_and_period: ByClassAndPeriodStrategy,
}

impl SessionQueries {
    pub fn new(
        sessions: Arc<dyn SessionRepositoryTrait>,
        projection: ProjectionService,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            all: AllSessionsStrategy::new(sessions.clone(), projection.clone()),
            by_class: ByClassStrategy::new(sessions.clone(), projection.clone()),
            open_by_class: OpenByClassStrategy::new(sessions.clone(), projection.clone()),
            my_open: MyOpenStrategy::new(sessions.clone(), projection.clone()),
            by_class_and_period: ByClassAndPeriodStrategy::new(
                sessions.clone(),
                projection.clone(),
            ),
            sessions,
            projection,
            cache,
        }
    }

    fn strategy(&self, mode: RetrievalMode) -> &dyn SessionListStrategy {
        match mode {
            RetrievalMode::All => &self.all,
            RetrievalMode::ByClass => &self.by_class,
            RetrievalMode::OpenByClass => &self.open_by_class,
            RetrievalMode::MyOpen => &self.my_open,
            RetrievalMode::ByClassAndPeriod => &self.by_class_and_period,
        }
    }

    fn cache_key(mode: RetrievalMode, filter: &SessionFilter) -> QueryKey {
        // Key only the filter subset the mode consumes, so unrelated
        // fields cannot fragment the cache.
        let (class_id, student_id, period) = match mode {
            RetrievalMode::All => (None, None, None),
            RetrievalMode::ByClass | RetrievalMode::OpenByClass => {
                (filter.class_id, None, None)
            }
            RetrievalMode::MyOpen => (None, filter.student_id, None),
            RetrievalMode::ByClassAndPeriod => (
                filter.class_id,
                None,
                filter.period_start.zip(filter.period_end),
            ),
        };
        QueryKey {
            mode,
            class_id,
            student_id,
            period,
        }
    }

    /// Runs the strategy for `mode`, read-through cached.
    pub async fn execute(
        &self,
        mode: RetrievalMode,
        filter: &SessionFilter,
    ) -> Result<Vec<SessionSummary>, AppError> {
        let key = Self::cache_key(mode, filter);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }
        let summaries = self.strategy(mode).execute(filter).await?;
        self.cache.put(key, summaries.clone());
        Ok(summaries)
    }

    /// Parses a mode name (e.g. from a query string) and dispatches.
    /// Unknown names fail with `UnknownStrategy`.
    pub async fn execute_by_name(
        &self,
        mode: &str,
        filter: &SessionFilter,
    ) -> Result<Vec<SessionSummary>, AppError> {
        let mode: RetrievalMode = mode.parse()?;
        self.execute(mode, filter).await
    }

    /// Full view of a single session.
    pub async fn detail(&self, id: SessionId) -> Result<SessionDetail, AppError> {
        let session = self.sessions.find_by_id(id).await?;
        self.projection.detail(&session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_round_trip() {
        for mode in [
            RetrievalMode::All,
            RetrievalMode::ByClass,
            RetrievalMode::OpenByClass,
            RetrievalMode::MyOpen,
            RetrievalMode::ByClassAndPeriod,
        ] {
            let parsed: RetrievalMode = mode.as_str().parse().unwrap();
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn unknown_mode_name_is_rejected() {
        let err = "BOGUS".parse::<RetrievalMode>().unwrap_err();
        assert!(matches!(err, AppError::UnknownStrategy(name) if name == "BOGUS"));
    }
}
