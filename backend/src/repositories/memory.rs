//! In-memory store implementations.
//!
//! Used by the integration tests and for embedding the core without a
//! database. They uphold the same contracts as the Postgres stores:
//! list queries ordered by `started_at` descending and atomic
//! `persist_transition` (a single locked mutation here).

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::activation_code::ActivationCode;
use crate::models::class_group::ClassGroup;
use crate::models::practice_session::PracticeSession;
use crate::models::submission::Submission;
use crate::models::user::{Professor, Student};
use crate::repositories::activation_code_repository::ActivationCodeRepositoryTrait;
use crate::repositories::directory::DirectoryRepositoryTrait;
use crate::repositories::session_repository::SessionRepositoryTrait;
use crate::repositories::submission_repository::SubmissionRepositoryTrait;
use crate::types::{ActivationCodeId, ClassId, ProfessorId, SessionId, StudentId, SubmissionId};

fn sort_desc(sessions: &mut [PracticeSession]) {
    sessions.sort_by(|a, b| b.started_at.cmp(&a.started_at).then(b.id.cmp(&a.id)));
}

#[derive(Debug)]
pub struct MemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, PracticeSession>>,
    // Transitions write synthesized check-outs here, under the session
    // lock, mirroring the Postgres store's single transaction.
    submissions: Arc<MemorySubmissionRepository>,
}

impl MemorySessionRepository {
    pub fn new(submissions: Arc<MemorySubmissionRepository>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            submissions,
        }
    }

    fn collect<F>(&self, filter: F) -> Vec<PracticeSession>
    where
        F: Fn(&PracticeSession) -> bool,
    {
        let sessions = self.sessions.read().expect("session store lock poisoned");
        let mut out: Vec<PracticeSession> =
            sessions.values().filter(|s| filter(s)).cloned().collect();
        sort_desc(&mut out);
        out
    }
}

#[async_trait]
impl SessionRepositoryTrait for MemorySessionRepository {
    async fn find_open_for(
        &self,
        student_id: StudentId,
        class_id: ClassId,
    ) -> Result<Option<PracticeSession>, AppError> {
        let open = self.collect(|s| {
            s.student_id == student_id && s.class_id == class_id && s.is_open()
        });
        Ok(open.into_iter().next())
    }

    async fn persist_transition<'a>(
        &self,
        synthetic_check_out: Option<&'a Submission>,
        closed: Option<&'a PracticeSession>,
        opened: Option<&'a PracticeSession>,
    ) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().expect("session store lock poisoned");
        if let Some(submission) = synthetic_check_out {
            self.submissions.push(submission.clone());
        }
        if let Some(session) = closed {
            sessions.insert(session.id, session.clone());
        }
        if let Some(session) = opened {
            sessions.insert(session.id, session.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: SessionId) -> Result<PracticeSession, AppError> {
        let sessions = self.sessions.read().expect("session store lock poisoned");
        sessions
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Practice session".into()))
    }

    async fn find_all(&self) -> Result<Vec<PracticeSession>, AppError> {
        Ok(self.collect(|_| true))
    }

    async fn find_by_class(&self, class_id: ClassId) -> Result<Vec<PracticeSession>, AppError> {
        Ok(self.collect(|s| s.class_id == class_id))
    }

    async fn find_open_by_class(
        &self,
        class_id: ClassId,
    ) -> Result<Vec<PracticeSession>, AppError> {
        Ok(self.collect(|s| s.class_id == class_id && s.is_open()))
    }

    async fn find_open_by_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<PracticeSession>, AppError> {
        Ok(self.collect(|s| s.student_id == student_id && s.is_open()))
    }

    async fn find_by_class_and_period(
        &self,
        class_id: ClassId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PracticeSession>, AppError> {
        Ok(self.collect(|s| {
            s.class_id == class_id && s.started_at >= from && s.started_at <= to
        }))
    }
}

#[derive(Debug, Default)]
pub struct MemorySubmissionRepository {
    submissions: RwLock<Vec<Submission>>,
}

impl MemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, submission: Submission) {
        self.submissions
            .write()
            .expect("submission store lock poisoned")
            .push(submission);
    }

    pub fn len(&self) -> usize {
        self.submissions.read().expect("submission store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SubmissionRepositoryTrait for MemorySubmissionRepository {
    async fn insert(&self, submission: &Submission) -> Result<(), AppError> {
        self.push(submission.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: SubmissionId) -> Result<Submission, AppError> {
        let submissions = self
            .submissions
            .read()
            .expect("submission store lock poisoned");
        submissions
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Submission".into()))
    }

    async fn find_all_desc(&self) -> Result<Vec<Submission>, AppError> {
        let submissions = self
            .submissions
            .read()
            .expect("submission store lock poisoned");
        let mut out = submissions.clone();
        out.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(out)
    }
}

#[derive(Debug, Default)]
pub struct MemoryActivationCodeRepository {
    codes: RwLock<HashMap<ActivationCodeId, ActivationCode>>,
}

impl MemoryActivationCodeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivationCodeRepositoryTrait for MemoryActivationCodeRepository {
    async fn insert(&self, code: &ActivationCode) -> Result<(), AppError> {
        let mut codes = self.codes.write().expect("code store lock poisoned");
        codes.insert(code.id, code.clone());
        Ok(())
    }

    async fn find_usable(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ActivationCode>, AppError> {
        let codes = self.codes.read().expect("code store lock poisoned");
        Ok(codes
            .values()
            .find(|c| c.code == code && c.is_usable(now))
            .cloned())
    }

    async fn deactivate(&self, id: ActivationCodeId) -> Result<(), AppError> {
        let mut codes = self.codes.write().expect("code store lock poisoned");
        if let Some(code) = codes.get_mut(&id) {
            code.active = false;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryDirectory {
    students: RwLock<HashMap<StudentId, Student>>,
    professors: RwLock<HashMap<ProfessorId, Professor>>,
    classes: RwLock<HashMap<ClassId, ClassGroup>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_student(&self, student: Student) {
        self.students
            .write()
            .expect("directory lock poisoned")
            .insert(student.id, student);
    }

    pub fn insert_professor(&self, professor: Professor) {
        self.professors
            .write()
            .expect("directory lock poisoned")
            .insert(professor.id, professor);
    }
}

#[async_trait]
impl DirectoryRepositoryTrait for MemoryDirectory {
    async fn student(&self, id: StudentId) -> Result<Student, AppError> {
        self.students
            .read()
            .expect("directory lock poisoned")
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Student".into()))
    }

    async fn student_by_google_id(&self, google_id: &str) -> Result<Student, AppError> {
        self.students
            .read()
            .expect("directory lock poisoned")
            .values()
            .find(|s| s.google_id == google_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Student".into()))
    }

    async fn professor(&self, id: ProfessorId) -> Result<Professor, AppError> {
        self.professors
            .read()
            .expect("directory lock poisoned")
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Professor".into()))
    }

    async fn professor_by_google_id(&self, google_id: &str) -> Result<Professor, AppError> {
        self.professors
            .read()
            .expect("directory lock poisoned")
            .values()
            .find(|p| p.google_id == google_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Professor".into()))
    }

    async fn class(&self, id: ClassId) -> Result<ClassGroup, AppError> {
        self.classes
            .read()
            .expect("directory lock poisoned")
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Class".into()))
    }

    async fn class_by_name(
        &self,
        professor_id: ProfessorId,
        name: &str,
    ) -> Result<Option<ClassGroup>, AppError> {
        Ok(self
            .classes
            .read()
            .expect("directory lock poisoned")
            .values()
            .find(|c| c.professor_id == professor_id && c.name == name)
            .cloned())
    }

    async fn insert_class(&self, class: &ClassGroup) -> Result<(), AppError> {
        self.classes
            .write()
            .expect("directory lock poisoned")
            .insert(class.id, class.clone());
        Ok(())
    }

    async fn classes_by_professor(
        &self,
        professor_id: ProfessorId,
    ) -> Result<Vec<ClassGroup>, AppError> {
        let classes = self.classes.read().expect("directory lock poisoned");
        let mut out: Vec<ClassGroup> = classes
            .values()
            .filter(|c| c.professor_id == professor_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }
}
