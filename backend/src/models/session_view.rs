use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::practice_session::PracticeSession;
use crate::types::{ClassId, SessionId, StudentId, SubmissionId};

/// Compact session view for listings and dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: SessionId,
    /// `"OPEN"` or `"CLOSED"`.
    pub status: String,
    pub student_name: String,
    pub class_name: String,
    pub professor_name: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    /// `HH:MM:SS`, or `"Em andamento"` while open.
    pub formatted_duration: String,
}

impl SessionSummary {
    pub fn project(
        session: &PracticeSession,
        student_name: String,
        class_name: String,
        professor_name: String,
    ) -> Self {
        Self {
            id: session.id,
            status: session.status().to_string(),
            student_name,
            class_name,
            professor_name,
            started_at: session.started_at,
            ended_at: session.ended_at,
            formatted_duration: session.formatted_duration(),
        }
    }
}

/// Full session view, adding emotion values and submission links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDetail {
    pub id: SessionId,
    pub status: String,
    pub student_id: StudentId,
    pub student_name: String,
    pub class_id: ClassId,
    pub class_name: String,
    pub professor_name: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_seconds: Option<i64>,
    pub formatted_duration: String,
    pub start_emotion: i32,
    pub end_emotion: Option<i32>,
    pub check_in_id: SubmissionId,
    pub check_out_id: Option<SubmissionId>,
}

impl SessionDetail {
    pub fn project(
        session: &PracticeSession,
        student_name: String,
        class_name: String,
        professor_name: String,
    ) -> Self {
        Self {
            id: session.id,
            status: session.status().to_string(),
            student_id: session.student_id,
            student_name,
            class_id: session.class_id,
            class_name,
            professor_name,
            started_at: session.started_at,
            ended_at: session.ended_at,
            duration_seconds: session.duration_seconds,
            formatted_duration: session.formatted_duration(),
            start_emotion: session.start_emotion,
            end_emotion: session.end_emotion,
            check_in_id: session.check_in_id,
            check_out_id: session.check_out_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submission::{Submission, SubmissionKind};
    use crate::types::ActivationCodeId;

    #[test]
    fn summary_projects_open_session() {
        let check_in = Submission::new(
            StudentId::new(),
            ClassId::new(),
            ActivationCodeId::new(),
            2,
            SubmissionKind::CheckIn,
            Utc::now(),
        );
        let session = PracticeSession::open(&check_in);
        let summary = SessionSummary::project(
            &session,
            "Ana".into(),
            "Turma A".into(),
            "Prof. Silva".into(),
        );
        assert_eq!(summary.status, "OPEN");
        assert_eq!(summary.formatted_duration, "Em andamento");
        assert_eq!(summary.ended_at, None);
        assert_eq!(summary.student_name, "Ana");
    }

    #[test]
    fn detail_links_submissions() {
        let check_in = Submission::new(
            StudentId::new(),
            ClassId::new(),
            ActivationCodeId::new(),
            3,
            SubmissionKind::CheckIn,
            Utc::now(),
        );
        let session = PracticeSession::open(&check_in);
        let detail = SessionDetail::project(
            &session,
            "Ana".into(),
            "Turma A".into(),
            "Prof. Silva".into(),
        );
        assert_eq!(detail.check_in_id, check_in.id);
        assert_eq!(detail.check_out_id, None);
        assert_eq!(detail.start_emotion, 3);
    }
}
