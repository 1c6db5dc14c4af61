#![allow(dead_code)]
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use vibecheck_backend::config::Config;
use vibecheck_backend::models::activation_code::ActivationCode;
use vibecheck_backend::models::class_group::ClassGroup;
use vibecheck_backend::models::submission::SubmissionKind;
use vibecheck_backend::models::user::{Professor, Student};
use vibecheck_backend::repositories::{
    ActivationCodeRepositoryTrait, DirectoryRepositoryTrait, MemoryActivationCodeRepository,
    MemoryDirectory, MemorySessionRepository, MemorySubmissionRepository, SessionRepositoryTrait,
    SubmissionRepositoryTrait,
};
use vibecheck_backend::services::{
    CodeIssuerService, LifecycleService, ProjectionService, QueryCache, SubmissionService,
};
use vibecheck_backend::strategies::SessionQueries;

static TRACING: std::sync::Once = std::sync::Once::new();

/// Makes transition logs visible in test runs (`RUST_LOG=debug` etc.).
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/vibecheck_test".into(),
        time_zone: chrono_tz::America::Sao_Paulo,
        professor_emails: vec!["prof@example.com".into()],
        code_ttl_minutes: 30,
        code_length: 6,
    }
}

/// Fully wired in-memory stack: stores, lifecycle, recorder, issuer and
/// query dispatcher all share the same state.
pub struct TestEnv {
    pub directory: Arc<MemoryDirectory>,
    pub sessions: Arc<MemorySessionRepository>,
    pub submissions: Arc<MemorySubmissionRepository>,
    pub codes: Arc<MemoryActivationCodeRepository>,
    pub cache: Arc<QueryCache>,
    pub lifecycle: Arc<LifecycleService>,
    pub recorder: SubmissionService,
    pub issuer: CodeIssuerService,
    pub queries: SessionQueries,
}

pub fn test_env() -> TestEnv {
    init_tracing();
    let directory = Arc::new(MemoryDirectory::new());
    let submissions = Arc::new(MemorySubmissionRepository::new());
    let sessions = Arc::new(MemorySessionRepository::new(submissions.clone()));
    let codes = Arc::new(MemoryActivationCodeRepository::new());
    let cache = Arc::new(QueryCache::new());

    let lifecycle = Arc::new(LifecycleService::new(
        sessions.clone() as Arc<dyn SessionRepositoryTrait>,
        cache.clone(),
    ));
    let recorder = SubmissionService::new(
        codes.clone() as Arc<dyn ActivationCodeRepositoryTrait>,
        directory.clone() as Arc<dyn DirectoryRepositoryTrait>,
        submissions.clone() as Arc<dyn SubmissionRepositoryTrait>,
        lifecycle.clone(),
    );
    let issuer = CodeIssuerService::new(
        codes.clone() as Arc<dyn ActivationCodeRepositoryTrait>,
        directory.clone() as Arc<dyn DirectoryRepositoryTrait>,
        &test_config(),
    );
    let projection = ProjectionService::new(directory.clone() as Arc<dyn DirectoryRepositoryTrait>);
    let queries = SessionQueries::new(
        sessions.clone() as Arc<dyn SessionRepositoryTrait>,
        projection,
        cache.clone(),
    );

    TestEnv {
        directory,
        sessions,
        submissions,
        codes,
        cache,
        lifecycle,
        recorder,
        issuer,
        queries,
    }
}

/// A fixed instant on 2026-03-10, so tests are independent of wall time.
pub fn at(hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, hour, min, sec).unwrap()
}

pub fn seed_student(env: &TestEnv, google_id: &str, name: &str) -> Student {
    let student = Student::new(
        google_id.into(),
        name.into(),
        format!("{google_id}@example.com"),
    );
    env.directory.insert_student(student.clone());
    student
}

pub async fn seed_class(env: &TestEnv, class_name: &str) -> (Professor, ClassGroup) {
    let professor = Professor::new(
        "prof-google-id".into(),
        "Prof. Silva".into(),
        "prof@example.com".into(),
    );
    let class = ClassGroup::new(class_name.into(), professor.id);
    env.directory.insert_professor(professor.clone());
    env.directory.insert_class(&class).await.expect("seed class");
    (professor, class)
}

/// Inserts a code with a known value, valid for 30 minutes from `now`.
pub async fn seed_code(
    env: &TestEnv,
    value: &str,
    kind: SubmissionKind,
    professor: &Professor,
    class: &ClassGroup,
    now: DateTime<Utc>,
) -> ActivationCode {
    let code = ActivationCode::new(
        value.into(),
        kind,
        professor.id,
        class.id,
        now,
        now + Duration::minutes(30),
    );
    env.codes.insert(&code).await.expect("seed activation code");
    code
}
