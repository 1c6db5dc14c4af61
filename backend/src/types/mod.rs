mod id;

pub use id::{ActivationCodeId, ClassId, ProfessorId, SessionId, StudentId, SubmissionId};
