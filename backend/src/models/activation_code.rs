use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::submission::SubmissionKind;
use crate::types::{ActivationCodeId, ClassId, ProfessorId};

/// Short-lived code a professor issues to gate check-in or check-out
/// submissions for one class.
///
/// Never mutated after issuance except for deactivation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivationCode {
    pub id: ActivationCodeId,
    pub code: String,
    pub kind: SubmissionKind,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub professor_id: ProfessorId,
    pub class_id: ClassId,
    pub active: bool,
}

impl ActivationCode {
    pub fn new(
        code: String,
        kind: SubmissionKind,
        professor_id: ProfessorId,
        class_id: ClassId,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ActivationCodeId::new(),
            code,
            kind,
            issued_at,
            expires_at,
            professor_id,
            class_id,
            active: true,
        }
    }

    /// A code is usable only while active and strictly before its expiry.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.active && now < self.expires_at
    }
}
