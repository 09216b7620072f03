//! PostgreSQL implementation of BookingRepository.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::catalog::ServiceCategory;
use crate::domain::foundation::{
    AddressId, BookingId, DomainError, ErrorCode, PaymentSessionId, ServiceId, Timestamp, UserId,
};
use crate::domain::region::Region;
use crate::domain::scheduling::TimeSlot;
use crate::ports::{BookingRepository, SlotCheck};

use super::support::{begin, commit, parse_column, user_id_from_column};

const SELECT_COLUMNS: &str = r#"
    SELECT id, customer_id, service_id, category, address_id, region, booking_date,
           start_time, duration_minutes, status, payment_session_id, notes,
           cancellation_reason, rescheduled_from, created_at, updated_at
    FROM bookings
"#;

/// High half of the advisory lock key for appointment dates.
const DATE_LOCK_NAMESPACE: i64 = 0x6961_6972 << 32;

pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a booking.
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    customer_id: String,
    service_id: Uuid,
    category: String,
    address_id: Option<Uuid>,
    region: String,
    booking_date: NaiveDate,
    start_time: NaiveTime,
    duration_minutes: i32,
    status: String,
    payment_session_id: Option<Uuid>,
    notes: Option<String>,
    cancellation_reason: Option<String>,
    rescheduled_from: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DomainError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let category: ServiceCategory = parse_column("category", &row.category)?;
        let region: Region = parse_column("region", &row.region)?;
        let status: BookingStatus = parse_column("status", &row.status)?;
        let duration = u32::try_from(row.duration_minutes)
            .map_err(|e| DomainError::database("Invalid duration_minutes", e))?;

        Ok(Booking::reconstitute(
            BookingId::from_uuid(row.id),
            user_id_from_column(row.customer_id)?,
            ServiceId::from_uuid(row.service_id),
            category,
            row.address_id.map(AddressId::from_uuid),
            region,
            TimeSlot::new(row.booking_date, row.start_time, duration),
            status,
            row.payment_session_id.map(PaymentSessionId::from_uuid),
            row.notes,
            row.cancellation_reason,
            row.rescheduled_from.map(BookingId::from_uuid),
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

async fn insert(tx: &mut Transaction<'_, Postgres>, booking: &Booking) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO bookings (
            id, customer_id, service_id, category, address_id, region, booking_date,
            start_time, duration_minutes, status, payment_session_id, notes,
            cancellation_reason, rescheduled_from, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        "#,
    )
    .bind(booking.id().as_uuid())
    .bind(booking.customer_id().as_str())
    .bind(booking.service_id().as_uuid())
    .bind(booking.category().as_str())
    .bind(booking.address_id().map(|a| *a.as_uuid()))
    .bind(booking.region().as_str())
    .bind(booking.date())
    .bind(booking.start_time())
    .bind(booking.duration_minutes() as i32)
    .bind(booking.status().as_str())
    .bind(booking.payment_session_id().map(|p| *p.as_uuid()))
    .bind(booking.notes())
    .bind(booking.cancellation_reason())
    .bind(booking.rescheduled_from().map(|b| *b.as_uuid()))
    .bind(booking.created_at().as_datetime())
    .bind(booking.updated_at().as_datetime())
    .execute(&mut **tx)
    .await
    .map_err(|e| DomainError::database("Failed to save booking", e))?;
    Ok(())
}

async fn update_mutable(
    tx: &mut Transaction<'_, Postgres>,
    booking: &Booking,
) -> Result<(), DomainError> {
    let result = sqlx::query(
        r#"
        UPDATE bookings SET
            status = $2,
            payment_session_id = $3,
            cancellation_reason = $4,
            updated_at = $5
        WHERE id = $1
        "#,
    )
    .bind(booking.id().as_uuid())
    .bind(booking.status().as_str())
    .bind(booking.payment_session_id().map(|p| *p.as_uuid()))
    .bind(booking.cancellation_reason())
    .bind(booking.updated_at().as_datetime())
    .execute(&mut **tx)
    .await
    .map_err(|e| DomainError::database("Failed to update booking", e))?;

    if result.rows_affected() == 0 {
        return Err(DomainError::new(
            ErrorCode::BookingNotFound,
            format!("Booking {} not found", booking.id()),
        ));
    }
    Ok(())
}

/// Held until the transaction ends; serialises checked writes per date
/// across every process sharing the database.
async fn lock_date(tx: &mut Transaction<'_, Postgres>, date: NaiveDate) -> Result<(), DomainError> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(DATE_LOCK_NAMESPACE + i64::from(date.num_days_from_ce()))
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to lock booking date", e))?;
    Ok(())
}

fn occupying_statuses() -> Vec<&'static str> {
    [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
        BookingStatus::Rescheduled,
        BookingStatus::NoShow,
    ]
    .iter()
    .filter(|s| s.occupies_slot())
    .map(|s| s.as_str())
    .collect()
}

async fn occupying_on<'e>(executor: impl PgExecutor<'e>, date: NaiveDate) -> Result<Vec<Booking>, DomainError> {
    let rows: Vec<BookingRow> = sqlx::query_as(&format!(
        "{} WHERE booking_date = $1 AND status = ANY($2) ORDER BY start_time",
        SELECT_COLUMNS
    ))
    .bind(date)
    .bind(occupying_statuses())
    .fetch_all(executor)
    .await
    .map_err(|e| DomainError::database("Failed to load bookings for date", e))?;

    rows.into_iter().map(Booking::try_from).collect()
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), DomainError> {
        let mut tx = begin(&self.pool).await?;
        insert(&mut tx, booking).await?;
        commit(tx).await
    }

    async fn update(&self, booking: &Booking) -> Result<(), DomainError> {
        let mut tx = begin(&self.pool).await?;
        update_mutable(&mut tx, booking).await?;
        commit(tx).await
    }

    async fn save_checked(&self, booking: &Booking, check: &SlotCheck<'_>) -> Result<(), DomainError> {
        let mut tx = begin(&self.pool).await?;
        lock_date(&mut tx, booking.date()).await?;
        check(&occupying_on(&mut *tx, booking.date()).await?)?;
        insert(&mut tx, booking).await?;
        commit(tx).await
    }

    async fn save_reschedule(
        &self,
        original: &Booking,
        replacement: &Booking,
        check: &SlotCheck<'_>,
    ) -> Result<(), DomainError> {
        let mut tx = begin(&self.pool).await?;
        lock_date(&mut tx, replacement.date()).await?;
        let others: Vec<Booking> = occupying_on(&mut *tx, replacement.date())
            .await?
            .into_iter()
            .filter(|b| b.id() != original.id())
            .collect();
        check(&others)?;
        update_mutable(&mut tx, original).await?;
        insert(&mut tx, replacement).await?;
        commit(tx).await
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        let row: Option<BookingRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to find booking", e))?;

        row.map(Booking::try_from).transpose()
    }

    async fn find_by_customer(&self, customer_id: &UserId) -> Result<Vec<Booking>, DomainError> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "{} WHERE customer_id = $1 ORDER BY booking_date DESC, start_time DESC",
            SELECT_COLUMNS
        ))
        .bind(customer_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list bookings", e))?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn find_occupying_on(&self, date: NaiveDate) -> Result<Vec<Booking>, DomainError> {
        occupying_on(&self.pool, date).await
    }
}
