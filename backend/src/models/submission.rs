use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::{ActivationCodeId, ClassId, StudentId, SubmissionId};

/// Whether a submission opens or closes a practice session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    CheckIn,
    CheckOut,
}

/// A single timestamped emotional check-in or check-out event.
///
/// Immutable once created. The class is denormalized from the activation
/// code at record time so session queries never have to chase the code.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Submission {
    pub id: SubmissionId,
    pub student_id: StudentId,
    pub class_id: ClassId,
    /// `None` only for check-outs synthesized by an auto-close; those are
    /// not gated by a code.
    pub code_id: Option<ActivationCodeId>,
    pub emotion: i32,
    pub kind: SubmissionKind,
    pub recorded_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(
        student_id: StudentId,
        class_id: ClassId,
        code_id: ActivationCodeId,
        emotion: i32,
        kind: SubmissionKind,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SubmissionId::new(),
            student_id,
            class_id,
            code_id: Some(code_id),
            emotion,
            kind,
            recorded_at,
        }
    }

    /// Builds the check-out used to force-close a stale open session. It
    /// carries the triggering check-in's timestamp and emotion as the end
    /// values.
    pub fn synthesized_check_out(check_in: &Submission) -> Self {
        Self {
            id: SubmissionId::new(),
            student_id: check_in.student_id,
            class_id: check_in.class_id,
            code_id: None,
            emotion: check_in.emotion,
            kind: SubmissionKind::CheckOut,
            recorded_at: check_in.recorded_at,
        }
    }
}

/// One row of the professor dashboard's raw submission feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardEntry {
    pub recorded_at: String,
    pub emotion: i32,
    pub kind: SubmissionKind,
    pub class_name: String,
}
