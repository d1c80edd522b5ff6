use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("invalid metrics: {field} {reason}")]
    InvalidMetrics { field: &'static str, reason: String },

    #[error("collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    #[error("analysis {0} not found")]
    NotFound(Uuid),

    #[error("unknown learning style: {0}")]
    UnknownStyle(String),
}

impl AdvisorError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidMetrics {
            field,
            reason: reason.into(),
        }
    }
}

impl From<sqlx::Error> for AdvisorError {
    fn from(err: sqlx::Error) -> Self {
        Self::CollaboratorUnavailable(format!("storage error: {err}"))
    }
}

impl From<sqlx::migrate::MigrateError> for AdvisorError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::CollaboratorUnavailable(format!("migration failed: {err}"))
    }
}
