//! Practice session lifecycle: open, close and auto-close transitions.
//!
//! One state machine per (student, class) pair: NONE -> OPEN -> CLOSED,
//! where CLOSED is terminal and does not block a new OPEN for the same
//! pair. The manager guarantees at most one open session per pair by
//! serializing each pair's read-then-write under a keyed lock and by
//! persisting every transition through one atomic store call.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::practice_session::PracticeSession;
use crate::models::submission::{Submission, SubmissionKind};
use crate::repositories::session_repository::SessionRepositoryTrait;
use crate::services::query_cache::QueryCache;
use crate::types::{ClassId, StudentId};

/// Outcome of dispatching one submission through the lifecycle.
#[derive(Debug)]
pub enum SessionTransition {
    Opened {
        session: PracticeSession,
        /// The stale session force-closed by this check-in, if one existed.
        auto_closed: Option<PracticeSession>,
    },
    Closed {
        session: PracticeSession,
    },
}

impl SessionTransition {
    /// The session this transition created or mutated.
    pub fn session(&self) -> &PracticeSession {
        match self {
            SessionTransition::Opened { session, .. } => session,
            SessionTransition::Closed { session } => session,
        }
    }
}

pub struct LifecycleService {
    sessions: Arc<dyn SessionRepositoryTrait>,
    cache: Arc<QueryCache>,
    // Serializes transitions per (student, class) pair; different pairs
    // proceed in parallel.
    pair_locks: Mutex<HashMap<(StudentId, ClassId), Arc<tokio::sync::Mutex<()>>>>,
}

impl LifecycleService {
    pub fn new(sessions: Arc<dyn SessionRepositoryTrait>, cache: Arc<QueryCache>) -> Self {
        Self {
            sessions,
            cache,
            pair_locks: Mutex::new(HashMap::new()),
        }
    }

    fn pair_lock(&self, student_id: StudentId, class_id: ClassId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.pair_locks.lock().expect("pair lock table poisoned");
        locks.entry((student_id, class_id)).or_default().clone()
    }

    /// Single entry point: routes a check-in to `open_session` and a
    /// check-out to `close_session`. After this returns, at most one open
    /// session exists for the submission's (student, class) pair.
    pub async fn dispatch(&self, submission: &Submission) -> Result<SessionTransition, AppError> {
        match submission.kind {
            SubmissionKind::CheckIn => self.open_session(submission).await,
            SubmissionKind::CheckOut => self.close_session(submission).await,
        }
    }

    /// Opens a session for the check-in's pair. A stale open session is
    /// force-closed first, using the current check-in's timestamp and
    /// emotion as end values, so stale sessions never accumulate. The
    /// synthesized check-out, the auto-close and the new session are
    /// persisted by one atomic store call.
    pub async fn open_session(
        &self,
        check_in: &Submission,
    ) -> Result<SessionTransition, AppError> {
        let lock = self.pair_lock(check_in.student_id, check_in.class_id);
        let _guard = lock.lock().await;

        let (auto_closed, synthetic) = match self
            .sessions
            .find_open_for(check_in.student_id, check_in.class_id)
            .await?
        {
            Some(mut stale) => {
                let synthetic = Submission::synthesized_check_out(check_in);
                stale.close(&synthetic).map_err(|err| {
                    tracing::warn!(session_id = %stale.id, %err, "auto-close failed");
                    err
                })?;
                tracing::info!(
                    session_id = %stale.id,
                    student_id = %check_in.student_id,
                    class_id = %check_in.class_id,
                    duration_seconds = stale.duration_seconds,
                    "auto-closing stale practice session"
                );
                (Some(stale), Some(synthetic))
            }
            None => (None, None),
        };

        let session = PracticeSession::open(check_in);
        self.sessions
            .persist_transition(synthetic.as_ref(), auto_closed.as_ref(), Some(&session))
            .await?;
        self.cache
            .invalidate_for(check_in.class_id, check_in.student_id);
        tracing::info!(
            session_id = %session.id,
            student_id = %session.student_id,
            class_id = %session.class_id,
            "opened practice session"
        );
        Ok(SessionTransition::Opened {
            session,
            auto_closed,
        })
    }

    /// Closes the open session for the check-out's pair. A check-out with
    /// no matching open session is rejected with `NoOpenSession`; nothing
    /// is created or mutated.
    pub async fn close_session(
        &self,
        check_out: &Submission,
    ) -> Result<SessionTransition, AppError> {
        let lock = self.pair_lock(check_out.student_id, check_out.class_id);
        let _guard = lock.lock().await;

        let mut session = match self
            .sessions
            .find_open_for(check_out.student_id, check_out.class_id)
            .await?
        {
            Some(session) => session,
            None => {
                tracing::warn!(
                    student_id = %check_out.student_id,
                    class_id = %check_out.class_id,
                    "check-out without a matching open session"
                );
                return Err(AppError::NoOpenSession);
            }
        };

        session.close(check_out).map_err(|err| {
            tracing::warn!(session_id = %session.id, %err, "close rejected");
            err
        })?;
        self.sessions
            .persist_transition(None, Some(&session), None)
            .await?;
        self.cache
            .invalidate_for(check_out.class_id, check_out.student_id);
        tracing::info!(
            session_id = %session.id,
            duration_seconds = session.duration_seconds,
            "closed practice session"
        );
        Ok(SessionTransition::Closed { session })
    }
}
