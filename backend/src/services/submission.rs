//! Validation and recording of emotional submissions.
//!
//! The recorder owns the wiring invariant: every recorded submission
//! triggers exactly one lifecycle transition, because `record` invokes the
//! lifecycle manager itself instead of leaving that to the caller.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;
use crate::models::submission::{DashboardEntry, Submission};
use crate::repositories::activation_code_repository::ActivationCodeRepositoryTrait;
use crate::repositories::directory::DirectoryRepositoryTrait;
use crate::repositories::submission_repository::SubmissionRepositoryTrait;
use crate::services::lifecycle::{LifecycleService, SessionTransition};
use crate::utils::time;
use crate::validation::rules::{validate_activation_code, validate_emotion};

/// Payload for the "submit emotion with code" action.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordSubmissionRequest {
    #[validate(custom(function = validate_activation_code))]
    pub code: String,
    /// Emotion on the 1-5 scale.
    #[validate(custom(function = validate_emotion))]
    pub emotion: i32,
}

pub struct SubmissionService {
    codes: Arc<dyn ActivationCodeRepositoryTrait>,
    directory: Arc<dyn DirectoryRepositoryTrait>,
    submissions: Arc<dyn SubmissionRepositoryTrait>,
    lifecycle: Arc<LifecycleService>,
}

impl SubmissionService {
    pub fn new(
        codes: Arc<dyn ActivationCodeRepositoryTrait>,
        directory: Arc<dyn DirectoryRepositoryTrait>,
        submissions: Arc<dyn SubmissionRepositoryTrait>,
        lifecycle: Arc<LifecycleService>,
    ) -> Self {
        Self {
            codes,
            directory,
            submissions,
            lifecycle,
        }
    }

    /// Whether a usable activation code with this value exists right now.
    pub async fn verify_code(&self, code: &str, now: DateTime<Utc>) -> Result<bool, AppError> {
        Ok(self.codes.find_usable(code, now).await?.is_some())
    }

    /// Records one emotional submission and drives it through the
    /// lifecycle. The submission's kind and class come from the activation
    /// code; its timestamp is `now`.
    pub async fn record(
        &self,
        google_id: &str,
        code: &str,
        emotion: i32,
        now: DateTime<Utc>,
    ) -> Result<(Submission, SessionTransition), AppError> {
        let payload = RecordSubmissionRequest {
            code: code.to_string(),
            emotion,
        };
        payload.validate()?;

        let activation = self
            .codes
            .find_usable(code, now)
            .await?
            .ok_or(AppError::InvalidCode)?;
        let student = self.directory.student_by_google_id(google_id).await?;

        let submission = Submission::new(
            student.id,
            activation.class_id,
            activation.id,
            emotion,
            activation.kind,
            now,
        );
        self.submissions.insert(&submission).await?;
        tracing::info!(
            submission_id = %submission.id,
            student_id = %submission.student_id,
            class_id = %submission.class_id,
            kind = ?submission.kind,
            "recorded emotional submission"
        );

        let transition = self.lifecycle.dispatch(&submission).await?;
        Ok((submission, transition))
    }

    /// All submissions newest-first, formatted for the professor dashboard.
    pub async fn dashboard(&self, tz: &Tz) -> Result<Vec<DashboardEntry>, AppError> {
        let submissions = self.submissions.find_all_desc().await?;
        let mut entries = Vec::with_capacity(submissions.len());
        for submission in submissions {
            let class = self.directory.class(submission.class_id).await?;
            entries.push(DashboardEntry {
                recorded_at: time::format_dashboard_timestamp(submission.recorded_at, tz),
                emotion: submission.emotion,
                kind: submission.kind,
                class_name: class.name,
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_rejects_malformed_code() {
        let payload = RecordSubmissionRequest {
            code: "abc".into(),
            emotion: 3,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn payload_rejects_emotion_off_scale() {
        for emotion in [0, 6, 9] {
            let payload = RecordSubmissionRequest {
                code: "A1B2C3".into(),
                emotion,
            };
            assert!(payload.validate().is_err(), "accepted emotion {emotion}");
        }
    }

    #[test]
    fn payload_accepts_valid_input() {
        let payload = RecordSubmissionRequest {
            code: "A1B2C3".into(),
            emotion: 5,
        };
        assert!(payload.validate().is_ok());
    }
}
