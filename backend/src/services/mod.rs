pub mod code_issuer;
pub mod lifecycle;
pub mod projection;
pub mod query_cache;
pub mod submission;

pub use code_issuer::CodeIssuerService;
pub use lifecycle::{LifecycleService, SessionTransition};
pub use projection::ProjectionService;
pub use query_cache::{QueryCache, QueryKey};
pub use submission::{RecordSubmissionRequest, SubmissionService};
