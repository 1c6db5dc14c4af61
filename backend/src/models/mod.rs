//! Data models shared across store access and services.

pub mod activation_code;
pub mod class_group;
pub mod practice_session;
pub mod session_view;
pub mod submission;
pub mod user;

pub use activation_code::ActivationCode;
pub use class_group::ClassGroup;
pub use practice_session::PracticeSession;
pub use session_view::{SessionDetail, SessionSummary};
pub use submission::{DashboardEntry, Submission, SubmissionKind};
pub use user::{Professor, Student};
