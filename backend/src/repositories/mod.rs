pub mod activation_code_repository;
pub mod directory;
pub mod memory;
pub mod session_repository;
pub mod submission_repository;
pub mod transaction;

pub use activation_code_repository::{ActivationCodeRepositoryTrait, PgActivationCodeRepository};
pub use directory::DirectoryRepositoryTrait;
pub use memory::{
    MemoryActivationCodeRepository, MemoryDirectory, MemorySessionRepository,
    MemorySubmissionRepository,
};
pub use session_repository::{PgSessionRepository, SessionRepositoryTrait};
pub use submission_repository::{PgSubmissionRepository, SubmissionRepositoryTrait};
