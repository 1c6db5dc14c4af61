use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;
use crate::models::submission::{Submission, SubmissionKind};
use crate::types::{ClassId, SessionId, StudentId, SubmissionId};
use crate::utils::time;

/// The paired check-in/check-out interval for one student in one class.
///
/// Open while `check_out_id` (equivalently `ended_at`) is unset. The
/// lifecycle manager guarantees at most one open session per
/// (student, class) pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PracticeSession {
    pub id: SessionId,
    pub student_id: StudentId,
    pub class_id: ClassId,
    pub check_in_id: SubmissionId,
    pub check_out_id: Option<SubmissionId>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_seconds: Option<i64>,
    pub start_emotion: i32,
    pub end_emotion: Option<i32>,
}

impl PracticeSession {
    /// Opens a new session from a check-in submission.
    pub fn open(check_in: &Submission) -> Self {
        debug_assert_eq!(check_in.kind, SubmissionKind::CheckIn);
        Self {
            id: SessionId::new(),
            student_id: check_in.student_id,
            class_id: check_in.class_id,
            check_in_id: check_in.id,
            check_out_id: None,
            started_at: check_in.recorded_at,
            ended_at: None,
            duration_seconds: None,
            start_emotion: check_in.emotion,
            end_emotion: None,
        }
    }

    /// Closes the session with a check-out submission, computing the whole-
    /// second duration. A negative duration is a data-integrity fault and is
    /// propagated, never clamped.
    pub fn close(&mut self, check_out: &Submission) -> Result<(), AppError> {
        debug_assert_eq!(check_out.kind, SubmissionKind::CheckOut);
        let duration = (check_out.recorded_at - self.started_at).num_seconds();
        if duration < 0 {
            return Err(AppError::DataIntegrity(format!(
                "session {} would close {}s before it started",
                self.id, -duration
            )));
        }
        self.check_out_id = Some(check_out.id);
        self.ended_at = Some(check_out.recorded_at);
        self.end_emotion = Some(check_out.emotion);
        self.duration_seconds = Some(duration);
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.check_out_id.is_none()
    }

    pub fn status(&self) -> &'static str {
        if self.is_open() {
            "OPEN"
        } else {
            "CLOSED"
        }
    }

    /// `HH:MM:SS` once closed, `"Em andamento"` while open.
    pub fn formatted_duration(&self) -> String {
        time::format_session_duration(self.duration_seconds)
    }
}
