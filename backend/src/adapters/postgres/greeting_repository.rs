//! PostgreSQL implementation of GreetingRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, GreetingId, Timestamp};
use crate::domain::notification::{GreetingStatus, HolidayGreeting, MessageTemplate};
use crate::ports::GreetingRepository;

use super::support::parse_column;

pub struct PostgresGreetingRepository {
    pool: PgPool,
}

impl PostgresGreetingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GreetingRow {
    id: Uuid,
    holiday_name: String,
    holiday_date: NaiveDate,
    send_at: DateTime<Utc>,
    template: String,
    status: String,
    sent_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<GreetingRow> for HolidayGreeting {
    type Error = DomainError;

    fn try_from(row: GreetingRow) -> Result<Self, Self::Error> {
        let status: GreetingStatus = parse_column("status", &row.status)?;
        let template = MessageTemplate::new(row.template)
            .map_err(|e| DomainError::database("Invalid template", e))?;
        let sent_count = u32::try_from(row.sent_count)
            .map_err(|e| DomainError::database("Invalid sent_count", e))?;

        Ok(HolidayGreeting::reconstitute(
            GreetingId::from_uuid(row.id),
            row.holiday_name,
            row.holiday_date,
            Timestamp::from_datetime(row.send_at),
            template,
            status,
            sent_count,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, holiday_name, holiday_date, send_at, template, status, sent_count,
           created_at, updated_at
    FROM holiday_greetings
"#;

#[async_trait]
impl GreetingRepository for PostgresGreetingRepository {
    async fn save(&self, greeting: &HolidayGreeting) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO holiday_greetings (
                id, holiday_name, holiday_date, send_at, template, status, sent_count,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(greeting.id().as_uuid())
        .bind(greeting.holiday_name())
        .bind(greeting.holiday_date())
        .bind(greeting.send_at().as_datetime())
        .bind(greeting.template().as_str())
        .bind(greeting.status().as_str())
        .bind(greeting.sent_count() as i32)
        .bind(greeting.created_at().as_datetime())
        .bind(greeting.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save greeting", e))?;

        Ok(())
    }

    async fn update(&self, greeting: &HolidayGreeting) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE holiday_greetings SET status = $2, sent_count = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(greeting.id().as_uuid())
        .bind(greeting.status().as_str())
        .bind(greeting.sent_count() as i32)
        .bind(greeting.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update greeting", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::GreetingNotFound,
                format!("Greeting {} not found", greeting.id()),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &GreetingId) -> Result<Option<HolidayGreeting>, DomainError> {
        let row: Option<GreetingRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to find greeting", e))?;

        row.map(HolidayGreeting::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<HolidayGreeting>, DomainError> {
        let rows: Vec<GreetingRow> = sqlx::query_as(&format!("{} ORDER BY send_at", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list greetings", e))?;

        rows.into_iter().map(HolidayGreeting::try_from).collect()
    }

    async fn find_due(&self, now: &Timestamp) -> Result<Vec<HolidayGreeting>, DomainError> {
        let rows: Vec<GreetingRow> = sqlx::query_as(&format!(
            "{} WHERE status = $1 AND send_at <= $2 ORDER BY send_at",
            SELECT_COLUMNS
        ))
        .bind(GreetingStatus::Scheduled.as_str())
        .bind(now.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find due greetings", e))?;

        rows.into_iter().map(HolidayGreeting::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_converts_to_greeting() {
        let row = GreetingRow {
            id: Uuid::new_v4(),
            holiday_name: "Hari Raya Puasa".to_string(),
            holiday_date: NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
            send_at: Utc::now(),
            template: "Selamat Hari Raya, {{ first_name }}!".to_string(),
            status: "sent".to_string(),
            sent_count: 42,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let greeting = HolidayGreeting::try_from(row).unwrap();
        assert_eq!(greeting.status(), GreetingStatus::Sent);
        assert_eq!(greeting.sent_count(), 42);
    }
}
