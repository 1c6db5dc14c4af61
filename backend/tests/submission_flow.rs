mod support;

use chrono::Duration;
use vibecheck_backend::error::AppError;
use vibecheck_backend::models::submission::SubmissionKind;
use vibecheck_backend::repositories::ActivationCodeRepositoryTrait;
use vibecheck_backend::services::SessionTransition;

use support::{at, seed_class, seed_code, seed_student, test_config, test_env};

#[tokio::test]
async fn record_pairs_check_in_and_check_out_through_codes() {
    let env = test_env();
    let student = seed_student(&env, "stud-1", "Ana");
    let (professor, class) = seed_class(&env, "Turma A").await;
    seed_code(&env, "CHKIN1", SubmissionKind::CheckIn, &professor, &class, at(9, 0, 0)).await;
    seed_code(&env, "CHKOUT", SubmissionKind::CheckOut, &professor, &class, at(9, 0, 0)).await;

    let (submission, transition) = env
        .recorder
        .record("stud-1", "CHKIN1", 3, at(9, 0, 0))
        .await
        .unwrap();
    assert_eq!(submission.student_id, student.id);
    assert_eq!(submission.class_id, class.id);
    assert_eq!(submission.kind, SubmissionKind::CheckIn);
    assert!(matches!(transition, SessionTransition::Opened { .. }));

    let (_, transition) = env
        .recorder
        .record("stud-1", "CHKOUT", 5, at(9, 30, 0))
        .await
        .unwrap();
    let SessionTransition::Closed { session } = transition else {
        panic!("check-out must close the session");
    };
    assert_eq!(session.duration_seconds, Some(1800));
    assert_eq!(session.start_emotion, 3);
    assert_eq!(session.end_emotion, Some(5));
}

#[tokio::test]
async fn record_rejects_unknown_code() {
    let env = test_env();
    seed_student(&env, "stud-1", "Ana");

    let err = env
        .recorder
        .record("stud-1", "ZZZZZZ", 3, at(9, 0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCode));
    assert!(env.submissions.is_empty());
}

#[tokio::test]
async fn record_rejects_expired_code() {
    let env = test_env();
    seed_student(&env, "stud-1", "Ana");
    let (professor, class) = seed_class(&env, "Turma A").await;
    // Issued at 08:00, 30-minute validity: dead by 09:00.
    seed_code(&env, "CHKIN1", SubmissionKind::CheckIn, &professor, &class, at(8, 0, 0)).await;

    let err = env
        .recorder
        .record("stud-1", "CHKIN1", 3, at(9, 0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCode));
}

#[tokio::test]
async fn record_rejects_deactivated_code() {
    let env = test_env();
    seed_student(&env, "stud-1", "Ana");
    let (professor, class) = seed_class(&env, "Turma A").await;
    let code =
        seed_code(&env, "CHKIN1", SubmissionKind::CheckIn, &professor, &class, at(9, 0, 0)).await;
    env.codes.deactivate(code.id).await.unwrap();

    let err = env
        .recorder
        .record("stud-1", "CHKIN1", 3, at(9, 5, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCode));
}

#[tokio::test]
async fn record_rejects_unknown_student() {
    let env = test_env();
    let (professor, class) = seed_class(&env, "Turma A").await;
    seed_code(&env, "CHKIN1", SubmissionKind::CheckIn, &professor, &class, at(9, 0, 0)).await;

    let err = env
        .recorder
        .record("nobody", "CHKIN1", 3, at(9, 0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(env.submissions.is_empty());
}

#[tokio::test]
async fn record_rejects_emotion_off_scale() {
    let env = test_env();
    seed_student(&env, "stud-1", "Ana");
    let (professor, class) = seed_class(&env, "Turma A").await;
    seed_code(&env, "CHKIN1", SubmissionKind::CheckIn, &professor, &class, at(9, 0, 0)).await;

    for emotion in [0, 6] {
        let err = env
            .recorder
            .record("stud-1", "CHKIN1", emotion, at(9, 0, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
    assert!(env.submissions.is_empty());
}

#[tokio::test]
async fn verify_code_tracks_usability() {
    let env = test_env();
    let (professor, class) = seed_class(&env, "Turma A").await;
    let code =
        seed_code(&env, "CHKIN1", SubmissionKind::CheckIn, &professor, &class, at(9, 0, 0)).await;

    assert!(env.recorder.verify_code("CHKIN1", at(9, 10, 0)).await.unwrap());
    assert!(!env.recorder.verify_code("CHKIN1", at(10, 0, 0)).await.unwrap());
    assert!(!env.recorder.verify_code("OTHER1", at(9, 10, 0)).await.unwrap());

    env.codes.deactivate(code.id).await.unwrap();
    assert!(!env.recorder.verify_code("CHKIN1", at(9, 10, 0)).await.unwrap());
}

#[tokio::test]
async fn issued_codes_are_immediately_usable() {
    let env = test_env();
    seed_student(&env, "stud-1", "Ana");
    seed_class(&env, "Turma A").await;

    let code = env
        .issuer
        .issue("prof-google-id", "Turma A", SubmissionKind::CheckIn, at(9, 0, 0))
        .await
        .unwrap();
    assert_eq!(code.code.len(), test_config().code_length);
    assert_eq!(code.expires_at, at(9, 0, 0) + Duration::minutes(30));

    let (_, transition) = env
        .recorder
        .record("stud-1", &code.code, 2, at(9, 5, 0))
        .await
        .unwrap();
    assert!(matches!(transition, SessionTransition::Opened { .. }));
}

#[tokio::test]
async fn issuing_creates_the_class_once() {
    let env = test_env();
    seed_class(&env, "Turma A").await;

    env.issuer
        .issue("prof-google-id", "Turma B", SubmissionKind::CheckIn, at(9, 0, 0))
        .await
        .unwrap();
    env.issuer
        .issue("prof-google-id", "Turma B", SubmissionKind::CheckOut, at(9, 1, 0))
        .await
        .unwrap();

    let names = env.issuer.class_names("prof-google-id").await.unwrap();
    assert_eq!(names, vec!["Turma A".to_string(), "Turma B".to_string()]);
}

#[tokio::test]
async fn dashboard_lists_submissions_newest_first() {
    let env = test_env();
    seed_student(&env, "stud-1", "Ana");
    let (professor, class) = seed_class(&env, "Turma A").await;
    seed_code(&env, "CHKIN1", SubmissionKind::CheckIn, &professor, &class, at(9, 0, 0)).await;
    seed_code(&env, "CHKOUT", SubmissionKind::CheckOut, &professor, &class, at(9, 0, 0)).await;

    env.recorder.record("stud-1", "CHKIN1", 2, at(9, 0, 0)).await.unwrap();
    env.recorder.record("stud-1", "CHKOUT", 4, at(9, 15, 0)).await.unwrap();

    let entries = env.recorder.dashboard(&chrono_tz::UTC).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].kind, SubmissionKind::CheckOut);
    assert_eq!(entries[0].emotion, 4);
    assert_eq!(entries[0].class_name, "Turma A");
    assert_eq!(entries[0].recorded_at, "10/03/2026 09:15");
    assert_eq!(entries[1].recorded_at, "10/03/2026 09:00");
}
