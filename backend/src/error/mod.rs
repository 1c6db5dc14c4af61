use thiserror::Error;

/// Business-rule and infrastructure failures surfaced by the core.
///
/// All variants are rejections of the triggering operation; none are retried
/// internally. The HTTP layer maps each variant to a response status.
#[derive(Debug, Error)]
pub enum AppError {
    /// The activation code is unknown, inactive or past its expiry window.
    #[error("Invalid or expired activation code")]
    InvalidCode,

    /// A referenced student, professor, class or record does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// A check-out was submitted with no matching open session for its
    /// (student, class) pair. No session is created or mutated.
    #[error("No open session for this student in this class")]
    NoOpenSession,

    /// A query strategy was invoked without a filter field it requires.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// A period filter has `start > end`.
    #[error("Invalid period: start must not be after end")]
    InvalidRange,

    /// An unregistered retrieval mode name was requested.
    #[error("Unknown retrieval mode: {0}")]
    UnknownStrategy(String),

    /// A computed session duration came out negative. Indicates a clock or
    /// ordering bug upstream; logged and propagated, never clamped.
    #[error("Data integrity fault: {0}")]
    DataIntegrity(String),

    /// A request payload failed field validation.
    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code, used by callers translating errors to
    /// wire responses.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCode => "INVALID_CODE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::NoOpenSession => "NO_OPEN_SESSION",
            AppError::MissingParameter(_) => "MISSING_PARAMETER",
            AppError::InvalidRange => "INVALID_RANGE",
            AppError::UnknownStrategy(_) => "UNKNOWN_STRATEGY",
            AppError::DataIntegrity(_) => "DATA_INTEGRITY",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let code = e.code.as_ref();
                    format!("{}: {}", field, code)
                })
            })
            .collect();
        AppError::Validation(messages)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource".to_string()),
            _ => AppError::Internal(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(AppError::InvalidCode.code(), "INVALID_CODE");
        assert_eq!(AppError::NoOpenSession.code(), "NO_OPEN_SESSION");
        assert_eq!(
            AppError::UnknownStrategy("BOGUS".into()).code(),
            "UNKNOWN_STRATEGY"
        );
        assert_eq!(AppError::MissingParameter("class_id").code(), "MISSING_PARAMETER");
    }

    #[test]
    fn sqlx_row_not_found_maps_to_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn display_messages_name_the_rejection() {
        let err = AppError::NotFound("Student".into());
        assert_eq!(err.to_string(), "Student not found");
        let err = AppError::UnknownStrategy("BOGUS".into());
        assert_eq!(err.to_string(), "Unknown retrieval mode: BOGUS");
    }
}
