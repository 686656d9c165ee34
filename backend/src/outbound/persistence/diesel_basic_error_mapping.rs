//! Diesel and pool error mapping shared by every repository.
//!
//! Each port error has `Connection` and `Query` variants; these helpers pick
//! the right one and log the underlying database detail at debug level so
//! the message returned to callers stays generic.

use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure into the repository's connection constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map a Diesel failure into the repository's query or connection constructor.
pub fn map_basic_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection closed")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("conflicting row already exists")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            query("row violates a check constraint")
        }
        DieselError::DeserializationError(_) | DieselError::SerializationError(_) => {
            query("column value could not be converted")
        }
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::CheckInRepositoryError;
    use rstest::rstest;

    fn map(error: diesel::result::Error) -> CheckInRepositoryError {
        map_basic_diesel_error(
            error,
            CheckInRepositoryError::query,
            CheckInRepositoryError::connection,
        )
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        assert_eq!(
            map(diesel::result::Error::NotFound),
            CheckInRepositoryError::query("record not found")
        );
    }

    #[rstest]
    fn pool_checkout_is_a_connection_error() {
        let err = map_basic_pool_error(PoolError::checkout("timed out"), |message| {
            CheckInRepositoryError::connection(message)
        });

        assert_eq!(err, CheckInRepositoryError::connection("timed out"));
    }
}
