use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::{ProfessorId, StudentId};

/// A student, provisioned from the identity provider on first login.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: StudentId,
    /// Stable subject identifier from the identity provider.
    pub google_id: String,
    pub name: String,
    pub email: String,
}

impl Student {
    pub fn new(google_id: String, name: String, email: String) -> Self {
        Self {
            id: StudentId::new(),
            google_id,
            name,
            email,
        }
    }
}

/// A professor. Role resolution from the e-mail allow-list happens in the
/// identity layer; the core only consumes resolved records.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Professor {
    pub id: ProfessorId,
    pub google_id: String,
    pub name: String,
    pub email: String,
}

impl Professor {
    pub fn new(google_id: String, name: String, email: String) -> Self {
        Self {
            id: ProfessorId::new(),
            google_id,
            name,
            email,
        }
    }
}
