//! PostgreSQL implementation of ServiceCatalog.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{Service, ServiceCategory};
use crate::domain::foundation::{DomainError, ServiceId, Timestamp};
use crate::ports::ServiceCatalog;

use super::support::parse_column;

pub struct PostgresServiceCatalog {
    pool: PgPool,
}

impl PostgresServiceCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ServiceRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    price_cents: i64,
    currency: String,
    duration_minutes: i32,
    category: String,
    active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<ServiceRow> for Service {
    type Error = DomainError;

    fn try_from(row: ServiceRow) -> Result<Self, Self::Error> {
        let category: ServiceCategory = parse_column("category", &row.category)?;
        let duration = u32::try_from(row.duration_minutes)
            .map_err(|e| DomainError::database("Invalid duration_minutes", e))?;

        Ok(Service::reconstitute(
            ServiceId::from_uuid(row.id),
            row.title,
            row.description,
            row.price_cents,
            row.currency,
            duration,
            category,
            row.active,
            Timestamp::from_datetime(row.created_at),
        ))
    }
}

#[async_trait]
impl ServiceCatalog for PostgresServiceCatalog {
    async fn list_active(&self) -> Result<Vec<Service>, DomainError> {
        let rows: Vec<ServiceRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, price_cents, currency, duration_minutes,
                   category, active, created_at
            FROM services
            WHERE active
            ORDER BY title
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list services", e))?;

        rows.into_iter().map(Service::try_from).collect()
    }

    async fn find_by_id(&self, id: &ServiceId) -> Result<Option<Service>, DomainError> {
        let row: Option<ServiceRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, price_cents, currency, duration_minutes,
                   category, active, created_at
            FROM services
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find service", e))?;

        row.map(Service::try_from).transpose()
    }

    async fn save(&self, service: &Service) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO services (
                id, title, description, price_cents, currency, duration_minutes,
                category, active, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                price_cents = EXCLUDED.price_cents,
                duration_minutes = EXCLUDED.duration_minutes,
                category = EXCLUDED.category,
                active = EXCLUDED.active
            "#,
        )
        .bind(service.id().as_uuid())
        .bind(service.title())
        .bind(service.description())
        .bind(service.price_cents())
        .bind(service.currency())
        .bind(service.duration_minutes() as i32)
        .bind(service.category().as_str())
        .bind(service.is_active())
        .bind(service.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save service", e))?;

        Ok(())
    }
}
