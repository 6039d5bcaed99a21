//! Shared error mapping for the sqlx persistence layer

use application::error::ApplicationError;

/// Map a sqlx error to an application-layer error
pub fn map_sqlx_error(e: sqlx::Error) -> ApplicationError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            ApplicationError::ExternalService(format!("Database unavailable: {e}"))
        }
        other => ApplicationError::Internal(format!("Database error: {other}")),
    }
}
