//! Issuance of activation codes by professors.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::config::Config;
use crate::error::AppError;
use crate::models::activation_code::ActivationCode;
use crate::models::class_group::ClassGroup;
use crate::models::submission::SubmissionKind;
use crate::repositories::activation_code_repository::ActivationCodeRepositoryTrait;
use crate::repositories::directory::DirectoryRepositoryTrait;

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub struct CodeIssuerService {
    codes: Arc<dyn ActivationCodeRepositoryTrait>,
    directory: Arc<dyn DirectoryRepositoryTrait>,
    code_ttl: Duration,
    code_length: usize,
}

impl CodeIssuerService {
    pub fn new(
        codes: Arc<dyn ActivationCodeRepositoryTrait>,
        directory: Arc<dyn DirectoryRepositoryTrait>,
        config: &Config,
    ) -> Self {
        Self {
            codes,
            directory,
            code_ttl: Duration::minutes(config.code_ttl_minutes),
            code_length: config.code_length,
        }
    }

    /// Issues a fresh activation code for one of the professor's classes,
    /// creating the class on first use of its name. The code is valid from
    /// `now` until `now + CODE_TTL_MINUTES`.
    pub async fn issue(
        &self,
        professor_google_id: &str,
        class_name: &str,
        kind: SubmissionKind,
        now: DateTime<Utc>,
    ) -> Result<ActivationCode, AppError> {
        let professor = self
            .directory
            .professor_by_google_id(professor_google_id)
            .await?;

        let class = match self
            .directory
            .class_by_name(professor.id, class_name)
            .await?
        {
            Some(class) => class,
            None => {
                let class = ClassGroup::new(class_name.to_string(), professor.id);
                self.directory.insert_class(&class).await?;
                tracing::info!(class_id = %class.id, name = %class.name, "created class");
                class
            }
        };

        let code = ActivationCode::new(
            random_code(self.code_length),
            kind,
            professor.id,
            class.id,
            now,
            now + self.code_ttl,
        );
        self.codes.insert(&code).await?;
        tracing::info!(
            code_id = %code.id,
            class_id = %class.id,
            kind = ?kind,
            expires_at = %code.expires_at,
            "issued activation code"
        );
        Ok(code)
    }

    /// Names of the professor's classes, for the issuing UI.
    pub async fn class_names(&self, professor_google_id: &str) -> Result<Vec<String>, AppError> {
        let professor = self
            .directory
            .professor_by_google_id(professor_google_id)
            .await?;
        let classes = self.directory.classes_by_professor(professor.id).await?;
        Ok(classes.into_iter().map(|c| c.name).collect())
    }
}

fn random_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CODE_CHARSET.len());
            CODE_CHARSET[idx] as char
        })
        .collect()
}
