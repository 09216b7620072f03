//! Transaction and column conversion helpers shared by the repositories.

use sqlx::{PgPool, Postgres, Transaction};
use std::fmt::Display;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, UserId};

pub(crate) async fn begin(pool: &PgPool) -> Result<Transaction<'static, Postgres>, DomainError> {
    pool.begin()
        .await
        .map_err(|e| DomainError::database("Failed to begin transaction", e))
}

pub(crate) async fn commit(tx: Transaction<'_, Postgres>) -> Result<(), DomainError> {
    tx.commit()
        .await
        .map_err(|e| DomainError::database("Failed to commit transaction", e))
}

/// Parses a text column into a domain enum; bad values are database errors.
pub(crate) fn parse_column<T>(column: &str, value: &str) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|e| DomainError::database(&format!("Invalid {} value '{}'", column, value), e))
}

pub(crate) fn user_id_from_column(value: String) -> Result<UserId, DomainError> {
    UserId::new(value).map_err(|e| DomainError::database("Invalid user id", e))
}
