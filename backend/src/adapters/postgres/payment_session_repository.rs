//! PostgreSQL implementation of PaymentSessionRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{BookingId, DomainError, ErrorCode, PaymentSessionId, Timestamp};
use crate::domain::payment::{PaymentSession, PaymentStatus};
use crate::ports::PaymentSessionRepository;

use super::support::{parse_column, user_id_from_column};

pub struct PostgresPaymentSessionRepository {
    pool: PgPool,
}

impl PostgresPaymentSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentSessionRow {
    id: Uuid,
    booking_id: Uuid,
    customer_id: String,
    stripe_session_id: String,
    checkout_url: Option<String>,
    amount_cents: i64,
    currency: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentSessionRow> for PaymentSession {
    type Error = DomainError;

    fn try_from(row: PaymentSessionRow) -> Result<Self, Self::Error> {
        let status: PaymentStatus = parse_column("status", &row.status)?;

        Ok(PaymentSession::reconstitute(
            PaymentSessionId::from_uuid(row.id),
            BookingId::from_uuid(row.booking_id),
            user_id_from_column(row.customer_id)?,
            row.stripe_session_id,
            row.checkout_url,
            row.amount_cents,
            row.currency,
            status,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, booking_id, customer_id, stripe_session_id, checkout_url, amount_cents,
           currency, status, created_at, updated_at
    FROM payment_sessions
"#;

#[async_trait]
impl PaymentSessionRepository for PostgresPaymentSessionRepository {
    async fn save(&self, session: &PaymentSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payment_sessions (
                id, booking_id, customer_id, stripe_session_id, checkout_url, amount_cents,
                currency, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.booking_id().as_uuid())
        .bind(session.customer_id().as_str())
        .bind(session.provider_session_id())
        .bind(session.checkout_url())
        .bind(session.amount_cents())
        .bind(session.currency())
        .bind(session.status().as_str())
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("payment_sessions_stripe_session_id_key") {
                    return DomainError::new(
                        ErrorCode::AlreadyExists,
                        "Provider session already recorded",
                    );
                }
            }
            DomainError::database("Failed to save payment session", e)
        })?;

        Ok(())
    }

    async fn update(&self, session: &PaymentSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE payment_sessions SET status = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(session.id().as_uuid())
        .bind(session.status().as_str())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update payment session", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PaymentSessionNotFound,
                format!("Payment session {} not found", session.id()),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentSessionId) -> Result<Option<PaymentSession>, DomainError> {
        let row: Option<PaymentSessionRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to find payment session", e))?;

        row.map(PaymentSession::try_from).transpose()
    }

    async fn find_by_provider_session_id(
        &self,
        provider_session_id: &str,
    ) -> Result<Option<PaymentSession>, DomainError> {
        let row: Option<PaymentSessionRow> =
            sqlx::query_as(&format!("{} WHERE stripe_session_id = $1", SELECT_COLUMNS))
                .bind(provider_session_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to find payment session", e))?;

        row.map(PaymentSession::try_from).transpose()
    }

    async fn find_by_booking(&self, booking_id: &BookingId) -> Result<Vec<PaymentSession>, DomainError> {
        let rows: Vec<PaymentSessionRow> = sqlx::query_as(&format!(
            "{} WHERE booking_id = $1 ORDER BY created_at",
            SELECT_COLUMNS
        ))
        .bind(booking_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list payment sessions", e))?;

        rows.into_iter().map(PaymentSession::try_from).collect()
    }
}
