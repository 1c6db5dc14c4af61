use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::{ClassId, ProfessorId};

/// A class taught by one professor. Created on demand the first time a
/// professor issues an activation code for a class name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClassGroup {
    pub id: ClassId,
    pub name: String,
    pub professor_id: ProfessorId,
}

impl ClassGroup {
    pub fn new(name: String, professor_id: ProfessorId) -> Self {
        Self {
            id: ClassId::new(),
            name,
            professor_id,
        }
    }
}
